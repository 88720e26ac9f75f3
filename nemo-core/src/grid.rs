use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use crate::error::GridError;

pub const FILLED: char = '#';
pub const BLANK: char = '.';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos { pub r: usize, pub c: usize }

impl Pos { pub fn idx(self, width: usize) -> usize { self.r * width + self.c } }

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLimits { pub max_width: usize, pub max_height: usize }

impl Default for GridLimits {
    fn default() -> Self { Self { max_width: 50, max_height: 50 } }
}

// A fully known picture: `true` is a filled cell. Row-major, always `width * height` cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn parse<S: AsRef<str>>(rows: &[S], width: usize, height: usize, limits: GridLimits) -> Result<Self, GridError> {
        if rows.is_empty() || width == 0 || height == 0 { return Err(GridError::Empty); }
        if rows.len() != height { return Err(GridError::HeightMismatch { claimed: height, actual: rows.len() }); }
        if width > limits.max_width || height > limits.max_height {
            return Err(GridError::TooLarge { width, height, max_width: limits.max_width, max_height: limits.max_height });
        }
        let first = rows[0].as_ref().trim().chars().count();
        if first != width { return Err(GridError::WidthMismatch { claimed: width, actual: first }); }

        let mut cells = Vec::with_capacity(width * height);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref().trim();
            let found = row.chars().count();
            if found != width { return Err(GridError::RaggedRow { row: r, expected: width, found }); }
            for (c, ch) in row.chars().enumerate() {
                match ch {
                    FILLED => cells.push(true),
                    BLANK => cells.push(false),
                    symbol => return Err(GridError::InvalidSymbol { row: r, col: c, symbol }),
                }
            }
        }
        Ok(Self { width, height, cells })
    }

    /// Reads one row per line; blank lines and surrounding whitespace are ignored and
    /// the dimensions are taken from the rows themselves.
    pub fn from_text(text: &str, limits: GridLimits) -> Result<Self, GridError> {
        let rows: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        Self::parse(&rows, width, rows.len(), limits)
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn area(&self) -> usize { self.width * self.height }
    pub fn get(&self, p: Pos) -> bool { self.cells[p.idx(self.width)] }
    pub fn cells(&self) -> &[bool] { &self.cells }
    pub fn row(&self, r: usize) -> &[bool] { &self.cells[r * self.width..(r + 1) * self.width] }
    pub fn column(&self, c: usize) -> impl Iterator<Item = bool> + '_ { self.cells.iter().skip(c).step_by(self.width).copied() }
    pub fn filled_count(&self) -> usize { self.cells.iter().filter(|&&f| f).count() }

    pub fn density(&self) -> f64 { self.filled_count() as f64 / self.area() as f64 }

    pub fn iterate_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.area()).map(move |i| Pos { r: i / self.width, c: i % self.width })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.area().div_ceil(8)];
        for (i, &filled) in self.cells.iter().enumerate() {
            if filled { bytes[i / 8] |= 0x80 >> (i % 8); }
        }
        bytes
    }

    pub fn decode(bytes: &[u8], width: usize, height: usize, limits: GridLimits) -> Result<Self, GridError> {
        if width == 0 || height == 0 { return Err(GridError::Empty); }
        let too_large = || GridError::TooLarge { width, height, max_width: limits.max_width, max_height: limits.max_height };
        if width > limits.max_width || height > limits.max_height { return Err(too_large()); }
        let area = width.checked_mul(height).ok_or_else(too_large)?;
        let expected = area.div_ceil(8);
        if bytes.len() != expected {
            return Err(GridError::BadEncoding { width, height, expected, found: bytes.len() });
        }
        let cells = (0..area).map(|i| bytes[i / 8] & (0x80 >> (i % 8)) != 0).collect();
        Ok(Self { width, height, cells })
    }

    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|r| self.row(r).iter().map(|&f| if f { FILLED } else { BLANK }).collect())
            .collect()
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() { writeln!(f, "{row}")?; }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> GridLimits { GridLimits::default() }

    #[test]
    fn parses_rows_with_surrounding_whitespace() {
        let g = Grid::parse(&[" #. ", ".#"], 2, 2, limits()).unwrap();
        assert_eq!(g.width(), 2);
        assert!(g.get(Pos { r: 0, c: 0 }));
        assert!(!g.get(Pos { r: 0, c: 1 }));
        assert!(g.get(Pos { r: 1, c: 1 }));
    }

    #[test]
    fn rejects_structural_errors() {
        let none: [&str; 0] = [];
        assert_eq!(Grid::parse(&none, 2, 2, limits()), Err(GridError::Empty));
        assert_eq!(Grid::parse(&["##"], 2, 2, limits()), Err(GridError::HeightMismatch { claimed: 2, actual: 1 }));
        assert_eq!(Grid::parse(&["###", "###"], 2, 2, limits()), Err(GridError::WidthMismatch { claimed: 2, actual: 3 }));
        assert_eq!(Grid::parse(&["##", "#"], 2, 2, limits()), Err(GridError::RaggedRow { row: 1, expected: 2, found: 1 }));
        assert_eq!(Grid::parse(&["#x", "##"], 2, 2, limits()), Err(GridError::InvalidSymbol { row: 0, col: 1, symbol: 'x' }));
    }

    #[test]
    fn rejects_oversized_grid() {
        let small = GridLimits { max_width: 3, max_height: 3 };
        let rows = vec!["....".to_string(); 2];
        assert!(matches!(Grid::parse(&rows, 4, 2, small), Err(GridError::TooLarge { width: 4, .. })));
    }

    #[test]
    fn encode_decode_keeps_pattern() {
        let g = Grid::from_text("#..\n.#.\n..#\n", limits()).unwrap();
        let bytes = g.encode();
        assert_eq!(bytes, vec![0b1000_1000, 0b1000_0000]);
        assert_eq!(Grid::decode(&bytes, 3, 3, limits()).unwrap(), g);
        assert!(matches!(Grid::decode(&bytes, 5, 5, limits()), Err(GridError::BadEncoding { expected: 4, found: 2, .. })));
    }

    #[test]
    fn decode_rejects_untrusted_dimensions() {
        assert!(matches!(Grid::decode(&[0u8; 2], 51, 1, limits()), Err(GridError::TooLarge { width: 51, .. })));
        let unbounded = GridLimits { max_width: usize::MAX, max_height: usize::MAX };
        assert!(matches!(Grid::decode(&[], usize::MAX, 2, unbounded), Err(GridError::TooLarge { height: 2, .. })));
    }

    #[test]
    fn from_text_skips_blank_lines() {
        let g = Grid::from_text("\n  ##.\n\n  .#.  \n", limits()).unwrap();
        assert_eq!((g.width(), g.height()), (3, 2));
        assert_eq!(g.to_rows(), vec!["##.", ".#."]);
        assert_eq!(g.column(1).collect::<Vec<_>>(), vec![true, true]);
    }
}
