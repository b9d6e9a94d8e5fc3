//! The `Planner` struct and its run loop.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use mrp_core::{PlannerConfig, Robot, RobotId};
use mrp_grid::Grid;
use mrp_resolve::ConflictResolver;
use mrp_schedule::HazardSchedule;
use mrp_search::{Found, PathSearch, PlanningContext, SearchResult};

use crate::{PlanObserver, PlanOutcome, PlanStats};

// ── Planner ───────────────────────────────────────────────────────────────────

/// A validated planning problem, ready to run.
///
/// One [`plan`](Self::plan) call does two phases:
///
/// 1. **Search** (optionally parallel with the `parallel` feature): one
///    independent [`PathSearch::search`] per robot against the grid and the
///    hazard schedule.  Robots never see each other here.
/// 2. **Resolve** (sequential): one [`ConflictResolver`] pass over the
///    paths that were found.  Robots without a path are left out.
///
/// `plan` takes `&self`; the same planner can be run any number of times
/// and always returns the same outcome.
///
/// Create via [`PlannerBuilder`][crate::PlannerBuilder].
pub struct Planner<S: PathSearch> {
    pub config:   PlannerConfig,
    pub grid:     Grid,
    pub schedule: HazardSchedule,
    /// Sorted by id.
    pub robots:   Vec<Robot>,
    pub search:   S,
    pub resolver: ConflictResolver,

    /// Dedicated pool when `config.num_threads` is set.
    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<S: PathSearch> Planner<S> {
    /// Read-only view of the grid and hazard schedule.
    pub fn context(&self) -> PlanningContext<'_> {
        PlanningContext::new(&self.grid, &self.schedule)
    }

    /// Plan every robot, then repair conflicts between the paths found.
    ///
    /// A robot whose search fails is recorded in
    /// [`PlanOutcome::failures`]; it never aborts the others.
    pub fn plan<O: PlanObserver>(&self, observer: &mut O) -> PlanOutcome {
        let ctx = self.context();
        observer.on_plan_start(self.robots.len());

        // ── Phase 1: independent searches ─────────────────────────────────
        let results = self.search_all(&ctx);

        let mut stats = PlanStats { robots: self.robots.len(), ..PlanStats::default() };
        let mut paths = BTreeMap::new();
        let mut failures = BTreeMap::new();

        // Results are in ascending RobotId order whichever way they were
        // computed.
        for (robot, result) in results {
            observer.on_search_end(robot, &result);
            match result {
                Ok(Found { path, stats: s }) => {
                    debug!(%robot, moves = path.moves(), expanded = s.expanded, "path found");
                    stats.planned += 1;
                    stats.expanded += s.expanded;
                    stats.generated += s.generated;
                    paths.insert(robot, path);
                }
                Err(e) => {
                    warn!(%robot, error = %e, "no path");
                    stats.failed += 1;
                    failures.insert(robot, e);
                }
            }
        }

        // ── Phase 2: conflict repair ──────────────────────────────────────
        let (paths, report) = self.resolver.resolve(&ctx, paths);
        for event in &report.events {
            observer.on_resolve_event(event);
        }

        let outcome = PlanOutcome { paths, failures, report, stats };
        info!(
            robots = stats.robots,
            planned = stats.planned,
            failed = stats.failed,
            makespan = outcome.makespan().0,
            conflicts = outcome.report.conflicts,
            waited = outcome.report.waited,
            "plan finished"
        );
        observer.on_plan_end(&outcome);
        outcome
    }

    /// Run one search per robot.  Output order matches `self.robots`.
    fn search_all(&self, ctx: &PlanningContext<'_>) -> Vec<(RobotId, SearchResult<Found>)> {
        let max_time = self.config.max_time;
        let search = &self.search;
        let one = |r: &Robot| (r.id, search.search(ctx, r.start, r.goal, max_time));

        #[cfg(not(feature = "parallel"))]
        {
            self.robots.iter().map(one).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let run = || -> Vec<(RobotId, SearchResult<Found>)> {
                self.robots.par_iter().map(one).collect()
            };
            match &self.pool {
                Some(pool) => pool.install(run),
                None => run(),
            }
        }
    }
}
