//! `mrp-schedule`: dynamic agents and the hazard schedule built from them.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`agent`]  | `DynamicAgent`, `Waypoint`                                |
//! | [`hazard`] | `HazardSchedule` (`Tick → set of Position`)               |
//! | [`error`]  | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Occupancy model (summary)
//!
//! A dynamic agent is a list of `(tick, position)` waypoints.  It occupies a
//! cell **only** at the exact ticks it lists:
//!
//! ```text
//! waypoints = [(T2, (1,1)), (T5, (1,4))]
//! occupied(1,1) at T2       → true
//! occupied(1,2) at T3 or T4 → false   (no interpolation)
//! ```
//!
//! `HazardSchedule` buckets all waypoints by tick once, before planning, so
//! a search-time lookup is two hash probes.

pub mod agent;
pub mod error;
pub mod hazard;


pub use agent::{DynamicAgent, Waypoint};
pub use error::{ScheduleError, ScheduleResult};
pub use hazard::HazardSchedule;
