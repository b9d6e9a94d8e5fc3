//! Read-only planning context.

use mrp_core::{Position, Tick};
use mrp_grid::Grid;
use mrp_schedule::HazardSchedule;

/// Everything a planning call may read: the static grid and the hazard
/// schedule.  Both are borrowed immutably for the whole run, so the context
/// is `Copy` and can be handed to every search thread.
#[derive(Copy, Clone, Debug)]
pub struct PlanningContext<'a> {
    pub grid:     &'a Grid,
    pub schedule: &'a HazardSchedule,
}

impl<'a> PlanningContext<'a> {
    pub fn new(grid: &'a Grid, schedule: &'a HazardSchedule) -> Self {
        Self { grid, schedule }
    }

    /// In bounds, passable, and not hazardous at `tick`.
    #[inline]
    pub fn is_free(&self, pos: Position, tick: Tick) -> bool {
        self.grid.is_open(pos) && !self.schedule.is_occupied(pos, tick)
    }
}
