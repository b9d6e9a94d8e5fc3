//! `mrp-search`: single-robot search through space *and* time.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`context`] | `PlanningContext`: borrowed grid + hazard schedule          |
//! | [`path`]    | `TimeState`, `Path`, `PathDefect`                            |
//! | [`search`]  | `PathSearch` trait, `TimeExpandedAStar`, `Found`, `SearchStats` |
//! | [`error`]   | `SearchError`, `NoPathReason`, `SearchResult<T>`             |
//!
//! # State space
//!
//! Nodes are `(position, tick)`.  Every move goes to one of the four
//! neighbors at `tick + 1`; there is no wait move.  A neighbor is rejected if
//! it is off the grid, impassable, or listed in the hazard schedule at
//! `tick + 1`.  Only the destination cell at the destination tick is checked,
//! so two hazards swapping cells are not detected.

pub mod context;
pub mod error;
pub mod path;
pub mod search;


pub use context::PlanningContext;
pub use error::{NoPathReason, SearchError, SearchResult};
pub use path::{Path, PathDefect, TimeState};
pub use search::{Found, PathSearch, SearchStats, TimeExpandedAStar};
