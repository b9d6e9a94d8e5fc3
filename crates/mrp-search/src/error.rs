//! Search error type.

use thiserror::Error;

use mrp_core::Position;

/// Why a search gave up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoPathReason {
    /// Every reachable `(position, tick)` state was expanded without
    /// touching the goal.
    Exhausted,
    /// A dequeued state was later than the `max_time` bound.
    TimeBoundExceeded { max_time: u64 },
}

/// Errors produced by `mrp-search`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no path from {from} to {to} ({reason:?}, {expanded} states expanded)")]
    NoPath {
        from:     Position,
        to:       Position,
        reason:   NoPathReason,
        expanded: u64,
    },

    #[error(transparent)]
    Grid(#[from] mrp_grid::GridError),
}

pub type SearchResult<T> = Result<T, SearchError>;
