use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn start(budget: Duration) -> Self { Self { started: Instant::now(), budget } }

    pub fn unbounded() -> Self { Self::start(Duration::MAX) }

    pub fn expired(&self) -> bool { self.started.elapsed() >= self.budget }
    pub fn elapsed(&self) -> Duration { self.started.elapsed() }
    pub fn budget(&self) -> Duration { self.budget }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_is_already_expired() {
        assert!(Deadline::start(Duration::ZERO).expired());
        assert!(!Deadline::unbounded().expired());
    }
}
