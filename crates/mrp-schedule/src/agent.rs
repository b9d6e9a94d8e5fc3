//! Dynamic agents: hazards that follow a fixed, pre-known trajectory.

use mrp_core::{DynamicAgentId, Position, Tick};

use crate::{ScheduleError, ScheduleResult};

// ── Waypoint ──────────────────────────────────────────────────────────────────

/// A single `(tick, position)` entry of a dynamic agent's trajectory.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub tick: Tick,
    pub pos:  Position,
}

// ── DynamicAgent ──────────────────────────────────────────────────────────────

/// An entity the planner must avoid but does not control.
///
/// Occupancy is defined only at the listed ticks.  Between two waypoints the
/// agent occupies nothing, regardless of how far apart the cells are.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicAgent {
    pub id: DynamicAgentId,
    waypoints: Vec<Waypoint>,
}

impl DynamicAgent {
    /// Create from waypoints.  Waypoints are stored sorted by tick; the sort
    /// is stable so duplicates keep their input order.
    pub fn new(id: DynamicAgentId, mut waypoints: Vec<Waypoint>) -> Self {
        waypoints.sort_by_key(|w| w.tick);
        Self { id, waypoints }
    }

    /// Pair a position list with a time list index-wise.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::Malformed`] if the lists differ in length.
    pub fn from_lists(
        id:        DynamicAgentId,
        positions: Vec<Position>,
        times:     Vec<u64>,
    ) -> ScheduleResult<Self> {
        if positions.len() != times.len() {
            return Err(ScheduleError::Malformed {
                agent:     id,
                positions: positions.len(),
                times:     times.len(),
            });
        }
        let waypoints = times
            .into_iter()
            .zip(positions)
            .map(|(t, pos)| Waypoint { tick: Tick(t), pos })
            .collect();
        Ok(Self::new(id, waypoints))
    }

    /// Waypoints in ascending tick order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// The cell this agent occupies at exactly `tick`, if any.
    ///
    /// If an agent lists the same tick twice, the first entry wins here; the
    /// hazard schedule still marks both cells.
    pub fn position_at(&self, tick: Tick) -> Option<Position> {
        let i = self.waypoints.partition_point(|w| w.tick < tick);
        self.waypoints
            .get(i)
            .filter(|w| w.tick == tick)
            .map(|w| w.pos)
    }

    /// Last tick this agent occupies anything.
    pub fn last_tick(&self) -> Option<Tick> {
        self.waypoints.last().map(|w| w.tick)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}
