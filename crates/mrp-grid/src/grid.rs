//! Occupancy grid representation and builder.
//!
//! # Data layout
//!
//! Passability is a single row-major `Vec<bool>`: cell `(r, c)` lives at
//! index `r * cols + c`.  A neighbor lookup is one bounds check plus one
//! indexed load, which keeps the search inner loop free of hashing.
//!
//! A `Grid` is immutable once built.  Every planning call borrows it
//! read-only, so one instance can be shared across search threads.

use mrp_core::{PlanError, Position, Robot};

use crate::{GridError, GridResult};

// ── Cell ──────────────────────────────────────────────────────────────────────

/// One grid square as seen by callers: its coordinate and whether robots may
/// enter it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos:      Position,
    pub passable: bool,
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Immutable R×C passable/impassable map.
///
/// Do not construct directly; use [`GridBuilder`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows:     u32,
    cols:     u32,
    passable: Vec<bool>,
}

impl Grid {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells (`rows * cols`).
    pub fn cell_count(&self) -> usize {
        self.passable.len()
    }

    /// Number of cells robots may enter.
    pub fn passable_count(&self) -> usize {
        self.passable.iter().filter(|&&p| p).count()
    }

    // ── Bounds ────────────────────────────────────────────────────────────

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// `Ok(())` if `pos` is inside the grid, otherwise [`GridError::OutOfBounds`].
    pub fn check_bounds(&self, pos: Position) -> GridResult<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds { pos, rows: self.rows, cols: self.cols })
        }
    }

    #[inline]
    fn idx(&self, pos: Position) -> usize {
        pos.row as usize * self.cols as usize + pos.col as usize
    }

    // ── Cell queries ──────────────────────────────────────────────────────

    /// Whether robots may enter `pos`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `pos` lies outside the grid.
    pub fn is_passable(&self, pos: Position) -> GridResult<bool> {
        self.check_bounds(pos)?;
        Ok(self.passable[self.idx(pos)])
    }

    /// Non-failing variant for hot loops: `false` for anything out of bounds.
    #[inline]
    pub fn is_open(&self, pos: Position) -> bool {
        self.contains(pos) && self.passable[self.idx(pos)]
    }

    pub fn cell(&self, pos: Position) -> GridResult<Cell> {
        Ok(Cell { pos, passable: self.is_passable(pos)? })
    }

    /// In-bounds, passable neighbors of `pos` in the fixed direction order.
    ///
    /// Always a fresh `Vec`; callers filter further by building another
    /// collection rather than removing from this one.
    pub fn passable_neighbors(&self, pos: Position) -> Vec<Position> {
        pos.neighbors().filter(|&n| self.is_open(n)).collect()
    }

    /// Check that a robot's start and goal are inside the grid and passable.
    pub fn check_robot(&self, robot: &Robot) -> Result<(), PlanError> {
        for (pos, what) in [(robot.start, "start"), (robot.goal, "goal")] {
            if !self.is_passable(pos)? {
                return Err(PlanError::Impassable { robot: robot.id, pos, what });
            }
        }
        Ok(())
    }

    /// Iterator over every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols as usize;
        self.passable.iter().enumerate().map(move |(i, &passable)| Cell {
            pos: Position::new((i / cols) as u32, (i % cols) as u32),
            passable,
        })
    }
}

// ── GridBuilder ───────────────────────────────────────────────────────────────

/// Construct a [`Grid`], then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use mrp_core::Position;
/// use mrp_grid::GridBuilder;
///
/// let mut b = GridBuilder::new(3, 4);
/// b.block(Position::new(1, 1));
/// let grid = b.build().unwrap();
/// assert_eq!(grid.passable_count(), 11);
/// assert!(!grid.is_passable(Position::new(1, 1)).unwrap());
/// ```
pub struct GridBuilder {
    rows:     u32,
    cols:     u32,
    passable: Vec<bool>,
    /// First out-of-range position passed to `block`/`open`, reported by `build`.
    stray:    Option<Position>,
}

impl GridBuilder {
    /// Start from an all-passable `rows × cols` grid.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            passable: vec![true; rows as usize * cols as usize],
            stray:    None,
        }
    }

    /// Build from string rows: `'X'`/`'#'` are walls, `'.'`/`' '` are open.
    ///
    /// Intended for in-memory fixtures; every row must have the same width.
    pub fn from_rows(lines: &[&str]) -> GridResult<Self> {
        let expected = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        let mut passable = Vec::with_capacity(lines.len() * expected);

        for (row, line) in lines.iter().enumerate() {
            let got = line.chars().count();
            if got != expected {
                return Err(GridError::Ragged { row, expected, got });
            }
            for (col, glyph) in line.chars().enumerate() {
                match glyph {
                    'X' | '#' => passable.push(false),
                    '.' | ' ' => passable.push(true),
                    _ => return Err(GridError::UnknownGlyph { row, col, glyph }),
                }
            }
        }

        Ok(Self {
            rows: lines.len() as u32,
            cols: expected as u32,
            passable,
            stray: None,
        })
    }

    /// Mark `pos` impassable.  An out-of-range `pos` makes
    /// [`build`](Self::build) fail with [`GridError::OutOfBounds`].
    pub fn block(&mut self, pos: Position) -> &mut Self {
        self.set(pos, false)
    }

    /// Mark `pos` passable again.
    pub fn open(&mut self, pos: Position) -> &mut Self {
        self.set(pos, true)
    }

    fn set(&mut self, pos: Position, passable: bool) -> &mut Self {
        if pos.row < self.rows && pos.col < self.cols {
            let i = pos.row as usize * self.cols as usize + pos.col as usize;
            self.passable[i] = passable;
        } else if self.stray.is_none() {
            self.stray = Some(pos);
        }
        self
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Consume the builder and produce a [`Grid`].
    ///
    /// # Errors
    ///
    /// [`GridError::Empty`] for a zero-sized grid, [`GridError::OutOfBounds`]
    /// if a cell outside the grid was edited.
    pub fn build(self) -> GridResult<Grid> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::Empty);
        }
        if let Some(pos) = self.stray {
            return Err(GridError::OutOfBounds { pos, rows: self.rows, cols: self.cols });
        }
        debug_assert_eq!(self.passable.len(), self.rows as usize * self.cols as usize);
        Ok(Grid {
            rows:     self.rows,
            cols:     self.cols,
            passable: self.passable,
        })
    }
}
