//! Result of one planning run.

use std::collections::BTreeMap;

use mrp_core::{RobotId, Tick};
use mrp_resolve::ResolveReport;
use mrp_search::{Path, SearchError};

/// Aggregate counters for one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanStats {
    pub robots:    usize,
    pub planned:   usize,
    pub failed:    usize,
    /// States expanded, summed over successful searches.
    pub expanded:  u64,
    /// States generated, summed over successful searches.
    pub generated: u64,
}

/// Everything [`Planner::plan`][crate::Planner::plan] produced.
///
/// A robot appears in exactly one of `paths` and `failures`.
#[derive(Debug)]
pub struct PlanOutcome {
    /// Final (post-resolution) paths, keyed and ordered by robot id.
    pub paths:    BTreeMap<RobotId, Path>,
    /// Robots for which no path was found.
    pub failures: BTreeMap<RobotId, SearchError>,
    pub report:   ResolveReport,
    pub stats:    PlanStats,
}

impl PlanOutcome {
    /// Total completion time: the latest final tick over all planned robots.
    /// `Tick::ZERO` if nothing was planned.
    pub fn makespan(&self) -> Tick {
        self.paths.values().map(Path::final_tick).max().unwrap_or(Tick::ZERO)
    }

    /// Sum of path lengths in moves.
    pub fn total_moves(&self) -> u64 {
        self.paths.values().map(Path::moves).sum()
    }

    /// Every robot got a path and no shared cell survived the resolver.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.report.unresolved == 0 && !self.report.truncated
    }

    pub fn path(&self, robot: RobotId) -> Option<&Path> {
        self.paths.get(&robot)
    }
}
