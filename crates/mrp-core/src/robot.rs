//! Robot description.

use crate::{Position, RobotId};

/// A robot to be planned: where it starts at tick 0 and where it must end.
///
/// Start and goal must be passable; the planner builder checks this before
/// any search runs.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Robot {
    pub id:    RobotId,
    pub start: Position,
    pub goal:  Position,
}

impl Robot {
    #[inline]
    pub fn new(id: RobotId, start: Position, goal: Position) -> Self {
        Self { id, start, goal }
    }

    /// Lower bound on the number of moves this robot needs.
    #[inline]
    pub fn min_moves(&self) -> u64 {
        self.start.manhattan(self.goal)
    }
}
