//! Grid coordinates.
//!
//! `Position` is a plain `Copy` value.  Moving a robot produces a new
//! `Position`; nothing ever holds a mutable reference into another robot's
//! coordinates.

use std::fmt;

// ── Direction ─────────────────────────────────────────────────────────────────

/// One axis-aligned unit move.  There is no diagonal and no wait variant.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Fixed enumeration order shared by search successor generation and
    /// conflict repair.  Changing it changes every tie-break in the planner.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// `(d_row, d_col)` offset of this move.
    #[inline]
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up    => (-1, 0),
            Direction::Down  => (1, 0),
            Direction::Left  => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up    => "up",
            Direction::Down  => "down",
            Direction::Left  => "left",
            Direction::Right => "right",
        };
        f.write_str(s)
    }
}

// ── Position ──────────────────────────────────────────────────────────────────

/// A `(row, col)` grid coordinate.  Row 0 is the top row.
///
/// Ordering is row-major, which makes `BTreeMap<Position, _>` iteration
/// match a top-to-bottom scan of the grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Manhattan (L1) distance.  The admissible, consistent heuristic for
    /// unit-cost 4-connected movement.
    #[inline]
    pub fn manhattan(self, other: Position) -> u64 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u64
    }

    /// `true` if `other` is exactly one axis-aligned step away.
    #[inline]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    /// The cell one step in `dir`, or `None` if that would leave the
    /// non-negative quadrant.  Upper bounds are the grid's concern.
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = u32::try_from(self.row as i64 + dr).ok()?;
        let col = u32::try_from(self.col as i64 + dc).ok()?;
        Some(Position { row, col })
    }

    /// Up to four neighbors in [`Direction::ALL`] order.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        Direction::ALL.into_iter().filter_map(move |d| self.step(d))
    }
}

impl From<(u32, u32)> for Position {
    #[inline]
    fn from((row, col): (u32, u32)) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
