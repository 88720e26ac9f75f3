use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{self, Display, Formatter, Write as _};

use crate::grid::Grid;

/// SHA-256 of a grid's dimensions and packed cells. Formatting of the original
/// submission never reaches the hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Checksum([u8; 32]);

impl Checksum {
    pub fn as_bytes(&self) -> &[u8; 32] { &self.0 }

    pub fn to_hex(&self) -> String {
        self.0.iter().fold(String::with_capacity(64), |mut s, b| { let _ = write!(s, "{b:02x}"); s })
    }
}

impl Display for Checksum {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str(&self.to_hex()) }
}

impl Serialize for Checksum {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Checksum {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;
        let hex = String::deserialize(deserializer)?;
        if hex.len() != 64 || !hex.is_ascii() { return Err(D::Error::custom(format!("checksum must be 64 hex digits, got {}", hex.len()))); }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).map_err(D::Error::custom)?;
        }
        Ok(Self(bytes))
    }
}

pub fn fingerprint(grid: &Grid) -> Checksum {
    let mut hasher = Sha256::new();
    hasher.update((grid.width() as u32).to_be_bytes());
    hasher.update((grid.height() as u32).to_be_bytes());
    hasher.update(grid.encode());
    Checksum(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridLimits;

    #[test]
    fn formatting_does_not_change_checksum() {
        let a = Grid::from_text("#.#\n.#.\n", GridLimits::default()).unwrap();
        let b = Grid::parse(&["  #.# ", "\t.#."], 3, 2, GridLimits::default()).unwrap();
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn dimensions_are_part_of_the_pattern() {
        let wide = Grid::from_text("..", GridLimits::default()).unwrap();
        let tall = Grid::from_text(".\n.", GridLimits::default()).unwrap();
        assert_ne!(fingerprint(&wide), fingerprint(&tall));
    }

    #[test]
    fn hex_round_trips_through_serde() {
        let sum = fingerprint(&Grid::from_text("#", GridLimits::default()).unwrap());
        assert_eq!(sum.to_hex().len(), 64);
        let json = serde_json::to_string(&sum).unwrap();
        assert_eq!(serde_json::from_str::<Checksum>(&json).unwrap(), sum);
    }
}
