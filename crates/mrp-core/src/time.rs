//! Planning time model.
//!
//! # Design
//!
//! Time is a discrete `Tick` counter.  Every robot move takes exactly one
//! tick, and a path's entry at index `i` is the robot's cell at `Tick(i)`.
//! Dynamic-agent waypoints are pinned to exact ticks as well, so hazard
//! lookups are integer comparisons with no interpolation.

use std::fmt;

use crate::{PlanError, PlanResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute planning tick.  `Tick::ZERO` is the instant every robot
/// stands on its start cell.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// The following tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// The preceding tick, or `None` at `Tick::ZERO`.
    #[inline]
    pub fn prev(self) -> Option<Tick> {
        self.0.checked_sub(1).map(Tick)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }

    /// Cast to `usize` for indexing a path's entries.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── PlannerConfig ─────────────────────────────────────────────────────────────

/// Top-level planner configuration.
///
/// Typically built in code by the application (or deserialized with the
/// `serde` feature) and handed to the planner builder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Search bound: a robot's search gives up once it dequeues a state later
    /// than this tick.  A safety valve, not a correctness guarantee; size it
    /// well above the longest expected path.  Default: 1000.
    pub max_time: u64,

    /// Worker thread count for parallel per-robot search (`parallel`
    /// feature).  `None` uses Rayon's global pool.
    pub num_threads: Option<usize>,

    /// Extra ticks the conflict sweep may run past `max_time` when a robot
    /// that already reached its goal has to step aside and come back.
    /// Default: 32.
    pub resolve_slack: u64,
}

impl PlannerConfig {
    /// Last tick the conflict sweep will examine.
    #[inline]
    pub fn resolve_horizon(&self) -> Tick {
        Tick(self.max_time.saturating_add(self.resolve_slack))
    }

    /// Reject settings that cannot produce any plan.
    pub fn validate(&self) -> PlanResult<()> {
        if self.max_time == 0 {
            return Err(PlanError::Config("max_time must be at least 1".into()));
        }
        if self.num_threads == Some(0) {
            return Err(PlanError::Config("num_threads must be at least 1 when set".into()));
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_time:      1_000,
            num_threads:   None,
            resolve_slack: 32,
        }
    }
}
