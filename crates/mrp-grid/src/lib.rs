//! `mrp-grid`: the static map robots plan over.
//!
//! # Crate layout
//!
//! | Module    | Contents                                           |
//! |-----------|----------------------------------------------------|
//! | [`grid`]  | `Grid`, `GridBuilder`, `Cell`                      |
//! | [`error`] | `GridError`, `GridResult<T>`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;


pub use error::{GridError, GridResult};
pub use grid::{Cell, Grid, GridBuilder};
