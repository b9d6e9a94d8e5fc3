//! Planner observer trait for progress reporting and data collection.

use mrp_core::RobotId;
use mrp_resolve::ResolveEvent;
use mrp_search::{Found, SearchResult};

use crate::PlanOutcome;

/// Callbacks invoked by [`Planner::plan`][crate::Planner::plan] at key
/// points of a run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: failure counter
///
/// ```rust,ignore
/// struct Failures(usize);
///
/// impl PlanObserver for Failures {
///     fn on_search_end(&mut self, _robot: RobotId, result: &SearchResult<Found>) {
///         if result.is_err() {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait PlanObserver {
    /// Called once before any search runs.
    fn on_plan_start(&mut self, _robots: usize) {}

    /// Called once per robot, in ascending `RobotId` order, after all
    /// searches have finished (also when they ran in parallel).
    fn on_search_end(&mut self, _robot: RobotId, _result: &SearchResult<Found>) {}

    /// Called for every conflict, reroute, and wait recorded by the
    /// resolver pass, in the order they happened.
    fn on_resolve_event(&mut self, _event: &ResolveEvent) {}

    /// Called once with the finished outcome.
    fn on_plan_end(&mut self, _outcome: &PlanOutcome) {}
}

/// A [`PlanObserver`] that does nothing.
pub struct NoopObserver;

impl PlanObserver for NoopObserver {}
