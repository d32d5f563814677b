//! Bounded index of a point on the Morabaraba board.
//!
//! A [`Point`] can only be constructed for indices 0-23, so every engine
//! query and transition is total over its inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of points on the board.
pub const POINT_COUNT: usize = 24;

/// One of the 24 points of the board (0-23).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Point(u8);

/// Error returned when an index does not name a board point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("Point index {} is out of range (must be 0-23)", _0)]
pub struct PointOutOfRange(pub usize);

impl std::error::Error for PointOutOfRange {}

impl Point {
    /// All 24 points in index order.
    pub const ALL: [Point; POINT_COUNT] = {
        let mut all = [Point(0); POINT_COUNT];
        let mut i = 0;
        while i < POINT_COUNT {
            all[i] = Point(i as u8);
            i += 1;
        }
        all
    };

    /// Creates a point from a board index, if it is in range.
    pub const fn new(index: usize) -> Option<Self> {
        if index < POINT_COUNT {
            Some(Point(index as u8))
        } else {
            None
        }
    }

    /// Creates a point from an index known to be valid.
    ///
    /// Used for the static board tables, where an out-of-range index is a
    /// programming error caught at compile time.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 24`.
    pub const fn at(index: usize) -> Self {
        assert!(index < POINT_COUNT, "point index out of range");
        Point(index as u8)
    }

    /// Returns the board index (0-23).
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Parses a point from user input such as `"7"`.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<usize>().ok().and_then(Self::new)
    }
}

impl TryFrom<u8> for Point {
    type Error = PointOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as usize).ok_or(PointOutOfRange(value as usize))
    }
}

impl TryFrom<usize> for Point {
    type Error = PointOutOfRange;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PointOutOfRange(value))
    }
}

impl From<Point> for u8 {
    fn from(point: Point) -> Self {
        point.0
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
