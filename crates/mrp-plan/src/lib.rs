//! `mrp-plan`: planner orchestrator for the rust_mrp multi-robot planner.
//!
//! # Two-phase run
//!
//! ```text
//! PlannerBuilder::build()
//!   validate config, robots (bounds, passable, unique ids, distinct starts)
//!   and dynamic agents, then bucket agent waypoints into a HazardSchedule
//!
//! Planner::plan()
//!   ① Search  : one PathSearch call per robot against grid + hazards
//!                (parallel with the `parallel` feature); NoPath is recorded,
//!                never fatal.
//!   ② Resolve : one ConflictResolver sweep over the paths found.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the search phase on Rayon's thread pool.          |
//! | `fx-hash`  | FxHash buckets in the hazard schedule.                 |
//! | `serde`    | Serde derives on config, ids, paths, and reports.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mrp_core::{PlannerConfig, Position, Robot, RobotId};
//! use mrp_grid::GridBuilder;
//! use mrp_plan::{NoopObserver, PlannerBuilder};
//!
//! let grid = GridBuilder::new(5, 5).build()?;
//! let planner = PlannerBuilder::new(grid, PlannerConfig::default())
//!     .robots(vec![Robot::new(RobotId(0), Position::new(0, 0), Position::new(4, 4))])
//!     .build()?;
//! let outcome = planner.plan(&mut NoopObserver);
//! assert_eq!(outcome.makespan().0, 8);
//! ```

pub mod builder;
pub mod observer;
pub mod outcome;
pub mod planner;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;
pub use observer::{NoopObserver, PlanObserver};
pub use outcome::{PlanOutcome, PlanStats};
pub use planner::Planner;
