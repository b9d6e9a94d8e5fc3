//! Time-stamped robot paths.

use std::fmt;

use mrp_core::{Position, Tick};

// ── TimeState ─────────────────────────────────────────────────────────────────

/// A `(position, tick)` node of the time-expanded state space.
///
/// Ordered by position (row-major), then tick.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeState {
    pub pos:  Position,
    pub tick: Tick,
}

impl TimeState {
    #[inline]
    pub fn new(pos: Position, tick: Tick) -> Self {
        Self { pos, tick }
    }
}

impl fmt::Display for TimeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.pos, self.tick)
    }
}

// ── PathDefect ────────────────────────────────────────────────────────────────

/// The first invariant a path breaks, as reported by [`Path::validate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathDefect {
    Empty,
    /// Entry `index` is stamped with the wrong tick.
    TimeGap { index: usize, found: Tick },
    /// The robot stays put between `tick - 1` and `tick`.
    Stationary { tick: Tick, pos: Position },
    /// The robot jumps more than one step between `tick - 1` and `tick`.
    Jump { tick: Tick, from: Position, to: Position },
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// Ordered `(position, tick)` sequence for one robot, starting at `Tick::ZERO`.
///
/// Entry `i` is always stamped `Tick(i)`.  A path produced by search moves
/// exactly one step per tick.  The conflict resolver may later overwrite
/// single entries (detours and waits), which can leave a path with
/// stationary entries or, after a detour, a jump at the following tick; see
/// [`Path::validate`] and [`Path::validate_allowing_waits`].
///
/// After its last entry a robot is *pinned*: [`Path::position_at`] keeps
/// returning the final cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    states: Vec<TimeState>,
}

impl Path {
    /// Build from an ordered list of cells; entry `i` is stamped `Tick(i)`.
    ///
    /// Returns `None` for an empty list.
    pub fn from_positions<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let states: Vec<TimeState> = positions
            .into_iter()
            .enumerate()
            .map(|(i, pos)| TimeState::new(pos, Tick(i as u64)))
            .collect();
        if states.is_empty() { None } else { Some(Self { states }) }
    }

    /// Single-entry path for a robot already standing on its goal.
    pub fn stationary(pos: Position) -> Self {
        Self { states: vec![TimeState::new(pos, Tick::ZERO)] }
    }

    pub fn states(&self) -> &[TimeState] {
        &self.states
    }

    /// Cells in tick order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.states.iter().map(|s| s.pos)
    }

    /// Number of entries (moves + 1).
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`: a `Path` holds at least its start entry.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of moves, which is also the tick of the last entry.
    pub fn moves(&self) -> u64 {
        self.states.len().saturating_sub(1) as u64
    }

    /// Tick of the last entry.
    pub fn final_tick(&self) -> Tick {
        Tick(self.moves())
    }

    pub fn start(&self) -> Position {
        self.states[0].pos
    }

    /// The last cell, where the robot stays pinned once the path ends.
    pub fn end(&self) -> Position {
        self.states[self.states.len() - 1].pos
    }

    /// `true` once `tick` is past the last entry.
    #[inline]
    pub fn is_pinned_at(&self, tick: Tick) -> bool {
        tick.index() >= self.states.len()
    }

    /// Cell occupied at `tick`, pinned at [`Path::end`] after the path ends.
    #[inline]
    pub fn position_at(&self, tick: Tick) -> Position {
        self.states
            .get(tick.index())
            .map_or_else(|| self.end(), |s| s.pos)
    }

    // ── Mutation (used by the conflict resolver) ──────────────────────────

    /// Overwrite the cell at `tick`, padding with the final cell first if the
    /// path is shorter.  Entries after `tick` are left as they are.
    pub fn set_position(&mut self, tick: Tick, pos: Position) {
        self.pad_to(tick);
        self.states[tick.index()].pos = pos;
    }

    /// Repeat the final cell until the path has an entry at `tick`.
    pub fn pad_to(&mut self, tick: Tick) {
        let end = self.end();
        while self.states.len() <= tick.index() {
            let t = Tick(self.states.len() as u64);
            self.states.push(TimeState::new(end, t));
        }
    }

    /// Append one entry at the next tick.
    pub fn push(&mut self, pos: Position) {
        let t = Tick(self.states.len() as u64);
        self.states.push(TimeState::new(pos, t));
    }

    // ── Invariant checks ──────────────────────────────────────────────────

    /// Strict check for search output: ticks run 0, 1, 2, … and every
    /// consecutive pair of cells is exactly one axis-aligned step apart.
    pub fn validate(&self) -> Result<(), PathDefect> {
        self.check(false)
    }

    /// Like [`validate`](Self::validate) but accepts stationary entries
    /// (waits inserted by conflict repair).  A failure here means a repaired
    /// path has become desynchronized: the robot would have to jump.
    pub fn validate_allowing_waits(&self) -> Result<(), PathDefect> {
        self.check(true)
    }

    fn check(&self, allow_waits: bool) -> Result<(), PathDefect> {
        if self.states.is_empty() {
            return Err(PathDefect::Empty);
        }
        for (i, s) in self.states.iter().enumerate() {
            if s.tick != Tick(i as u64) {
                return Err(PathDefect::TimeGap { index: i, found: s.tick });
            }
        }
        for pair in self.states.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match a.pos.manhattan(b.pos) {
                1 => {}
                0 if allow_waits => {}
                0 => return Err(PathDefect::Stationary { tick: b.tick, pos: b.pos }),
                _ => return Err(PathDefect::Jump { tick: b.tick, from: a.pos, to: b.pos }),
            }
        }
        Ok(())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.states.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", s.pos)?;
        }
        Ok(())
    }
}
