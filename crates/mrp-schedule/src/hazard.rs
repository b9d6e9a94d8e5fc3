//! `HazardSchedule`: time-bucketed lookup of cells occupied by dynamic agents.
//!
//! # Performance note
//!
//! The outer map is keyed by tick and the inner set by position, so
//! `is_occupied` is O(1) average.  Empty ticks have no bucket at all.  With
//! the `fx-hash` feature both levels use FxHash, which is noticeably faster
//! on small integer keys than the default SipHash.

use mrp_core::{Position, Tick};
use mrp_grid::Grid;

use crate::{DynamicAgent, ScheduleError, ScheduleResult};

#[cfg(feature = "fx-hash")]
type TickMap<V> = rustc_hash::FxHashMap<Tick, V>;
#[cfg(not(feature = "fx-hash"))]
type TickMap<V> = std::collections::HashMap<Tick, V>;

#[cfg(feature = "fx-hash")]
type CellSet = rustc_hash::FxHashSet<Position>;
#[cfg(not(feature = "fx-hash"))]
type CellSet = std::collections::HashSet<Position>;

/// Immutable mapping from tick → set of hazardous positions.
///
/// Built once from every dynamic agent before planning and then only read.
#[derive(Clone, Debug, Default)]
pub struct HazardSchedule {
    buckets:   TickMap<CellSet>,
    /// Distinct `(tick, position)` entries across all buckets.
    entries:   usize,
    horizon:   Option<Tick>,
    agents:    usize,
}

impl HazardSchedule {
    /// A schedule with no hazards.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate every agent's waypoints against `grid` and bucket them by tick.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::Waypoint`] for a waypoint outside the grid.  Waypoints
    /// on impassable cells are accepted; they never matter to a search.
    pub fn build(grid: &Grid, agents: &[DynamicAgent]) -> ScheduleResult<Self> {
        let mut schedule = Self { agents: agents.len(), ..Self::default() };

        for agent in agents {
            for w in agent.waypoints() {
                grid.check_bounds(w.pos)
                    .map_err(|source| ScheduleError::Waypoint { agent: agent.id, source })?;
                schedule.insert(w.tick, w.pos);
            }
        }

        Ok(schedule)
    }

    fn insert(&mut self, tick: Tick, pos: Position) {
        if self.buckets.entry(tick).or_default().insert(pos) {
            self.entries += 1;
        }
        self.horizon = self.horizon.max(Some(tick));
    }

    /// `true` iff some dynamic agent lists exactly `(pos, tick)`.
    #[inline]
    pub fn is_occupied(&self, pos: Position, tick: Tick) -> bool {
        self.buckets
            .get(&tick)
            .is_some_and(|cells| cells.contains(&pos))
    }

    /// Hazardous cells at `tick`, in no particular order.
    pub fn occupied_at(&self, tick: Tick) -> impl Iterator<Item = Position> + '_ {
        self.buckets.get(&tick).into_iter().flat_map(|cells| cells.iter().copied())
    }

    /// Last tick with any hazard, or `None` for an empty schedule.
    pub fn horizon(&self) -> Option<Tick> {
        self.horizon
    }

    /// Number of distinct `(tick, position)` hazards.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Number of agents the schedule was built from.
    pub fn agent_count(&self) -> usize {
        self.agents
    }

    /// Number of distinct ticks that have at least one hazard.
    pub fn tick_count(&self) -> usize {
        self.buckets.len()
    }
}
