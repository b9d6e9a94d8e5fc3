//! `mrp-resolve`: repair collisions between independently planned paths.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`resolver`] | `ConflictResolver`, `ResolverConfig`                       |
//! | [`report`]   | `ResolveReport`, `ResolveEvent`                            |
//!
//! # Sweep (summary)
//!
//! ```text
//! for t in 0..=horizon:
//!   for robot in ascending RobotId:
//!     cell = robot's cell at t (pinned at its last cell once its path ends)
//!     if cell unclaimed                → claim it
//!     elif both robots resting there   → tolerate
//!     else                             → repair from the robot's cell at t-1:
//!          first free neighbor (right, down, left, up) → detour at t only
//!          none free                                   → wait at the t-1 cell
//! ```
//!
//! The sweep is strictly sequential: a repair at `t` depends on every
//! lower-id robot's final cell at `t`.  Only the entry at `t` is rewritten;
//! later entries are not re-timed, so a detour can leave a path that jumps
//! at `t + 1`.  Such robots are listed as desynchronized in the report.

pub mod report;
pub mod resolver;


pub use report::{ResolveEvent, ResolveReport};
pub use resolver::{ConflictResolver, ResolverConfig};
