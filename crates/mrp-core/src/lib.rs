//! `mrp-core`: foundational types for the `rust_mrp` multi-robot planner.
//!
//! This crate is a dependency of every other `mrp-*` crate.  It has no
//! `mrp-*` dependencies and a single required external one (`thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`ids`]      | `RobotId`, `DynamicAgentId`                            |
//! | [`position`] | `Position`, `Direction`, Manhattan distance            |
//! | [`robot`]    | `Robot` (id, start, goal)                              |
//! | [`time`]     | `Tick`, `PlannerConfig`                                |
//! | [`error`]    | `PlanError`, `PlanResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod position;
pub mod robot;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{PlanError, PlanResult};
pub use ids::{DynamicAgentId, RobotId};
pub use position::{Direction, Position};
pub use robot::Robot;
pub use time::{PlannerConfig, Tick};
