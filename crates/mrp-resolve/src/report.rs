//! What the resolver did.
//!
//! Repair exhaustion is not an error: the robot waits instead.  It still
//! shows up here so operators and tests can see it happened.

use std::collections::BTreeSet;

use mrp_core::{Position, RobotId, Tick};

/// One resolver action, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolveEvent {
    /// `robot` wanted `pos` at `tick`, but `keeper` (placed earlier) holds it.
    Conflict {
        tick:   Tick,
        pos:    Position,
        keeper: RobotId,
        robot:  RobotId,
    },
    /// `robot` was moved off its planned cell `from` into the free neighbor `to`.
    Rerouted {
        robot: RobotId,
        tick:  Tick,
        from:  Position,
        to:    Position,
    },
    /// No neighbor was free; `robot` holds `pos`, its cell at `tick - 1`.
    Waited {
        robot: RobotId,
        tick:  Tick,
        pos:   Position,
    },
    /// `robot` was repaired at or past the end of its path and steps back
    /// onto its final cell `pos` at `tick`.  `hazardous` is set when a
    /// dynamic agent is listed on `pos` at `tick`; the step is kept anyway.
    Returned {
        robot:     RobotId,
        tick:      Tick,
        pos:       Position,
        hazardous: bool,
    },
}

/// Counters and event log for one resolver pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolveReport {
    /// Contested `(cell, tick)` claims.
    pub conflicts: usize,
    /// Repairs that found a free neighbor.
    pub rerouted: usize,
    /// Repairs that fell back to a wait.
    pub waited: usize,
    /// Repairs that left the robot on a cell someone else still holds,
    /// plus collisions at tick 0 (which cannot be repaired).
    pub unresolved: usize,
    /// Robots whose repaired path now needs a jump somewhere.
    pub desynchronized: BTreeSet<RobotId>,
    /// Last tick swept.
    pub horizon: Tick,
    /// `true` if the sweep stopped at the configured horizon cap while paths
    /// were still being extended.
    pub truncated: bool,
    pub events: Vec<ResolveEvent>,
}

impl ResolveReport {
    /// `true` if the pass changed nothing.
    pub fn is_clean(&self) -> bool {
        self.conflicts == 0
    }

    /// Robots that were rerouted or made to wait at least once.
    pub fn repaired_robots(&self) -> BTreeSet<RobotId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ResolveEvent::Rerouted { robot, .. } | ResolveEvent::Waited { robot, .. } => {
                    Some(*robot)
                }
                ResolveEvent::Conflict { .. } | ResolveEvent::Returned { .. } => None,
            })
            .collect()
    }
}
