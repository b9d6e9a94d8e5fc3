//! Search trait and default time-expanded A* implementation.
//!
//! # Pluggability
//!
//! `mrp-plan` calls search via the [`PathSearch`] trait, so applications can
//! swap in another engine (a different heuristic, a bounded-suboptimal
//! variant) without touching the orchestrator.  [`TimeExpandedAStar`] is the
//! default.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use tracing::trace;

use mrp_core::{Position, Tick};

use crate::{NoPathReason, Path, PlanningContext, SearchError, SearchResult, TimeState};

// ── Results ───────────────────────────────────────────────────────────────────

/// Work counters for one search call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// States popped from the open set and expanded.
    pub expanded:  u64,
    /// Distinct states pushed onto the open set (including the start).
    pub generated: u64,
}

/// A successful search: the path and what it cost to find it.
#[derive(Clone, Debug)]
pub struct Found {
    pub path:  Path,
    pub stats: SearchStats,
}

// ── PathSearch trait ──────────────────────────────────────────────────────────

/// Pluggable single-robot search engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one engine can be shared across
/// Rayon workers when robots are searched in parallel.
pub trait PathSearch: Send + Sync {
    /// Find a path from `start` to `goal` that never enters a hazardous
    /// `(cell, tick)` for `tick > 0`.
    ///
    /// Returns [`SearchError::NoPath`] if the goal is unreachable or the
    /// `max_time` bound is hit.  Never returns a partial path.
    fn search(
        &self,
        ctx:      &PlanningContext<'_>,
        start:    Position,
        goal:     Position,
        max_time: u64,
    ) -> SearchResult<Found>;
}

// ── TimeExpandedAStar ─────────────────────────────────────────────────────────

/// A* over `(position, tick)` with a Manhattan heuristic.
///
/// Each move costs one tick, so a state's g-value *is* its tick and every
/// state is generated at most once.  The open set is ordered by
/// `f = tick + manhattan(pos, goal)`; equal `f` values pop by
/// [`TimeState`] order (row, then column, then tick), which makes the result
/// a pure function of the inputs.
pub struct TimeExpandedAStar;

impl PathSearch for TimeExpandedAStar {
    fn search(
        &self,
        ctx:      &PlanningContext<'_>,
        start:    Position,
        goal:     Position,
        max_time: u64,
    ) -> SearchResult<Found> {
        ctx.grid.check_bounds(start)?;
        ctx.grid.check_bounds(goal)?;
        time_expanded_astar(ctx, start, goal, max_time)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Arena entry: a generated state and the arena index it was reached from.
struct Node {
    state:  TimeState,
    parent: Option<usize>,
}

fn time_expanded_astar(
    ctx:      &PlanningContext<'_>,
    start:    Position,
    goal:     Position,
    max_time: u64,
) -> SearchResult<Found> {
    let mut stats = SearchStats::default();

    if start == goal {
        stats.generated = 1;
        return Ok(Found { path: Path::stationary(start), stats });
    }

    let mut arena: Vec<Node> = Vec::new();
    // A state's cost equals its tick, so the first generation of a state is
    // the only one that can ever matter.
    let mut seen: HashSet<TimeState> = HashSet::new();
    // Min-heap keyed by (f, state).  States are unique, so the arena index
    // never takes part in the ordering.
    let mut open: BinaryHeap<Reverse<(u64, TimeState, usize)>> = BinaryHeap::new();

    let root = TimeState::new(start, Tick::ZERO);
    arena.push(Node { state: root, parent: None });
    seen.insert(root);
    open.push(Reverse((start.manhattan(goal), root, 0)));
    stats.generated = 1;

    while let Some(Reverse((_f, TimeState { pos, tick }, idx))) = open.pop() {

        if tick.0 > max_time {
            trace!(%start, %goal, max_time, expanded = stats.expanded, "time bound exceeded");
            return Err(SearchError::NoPath {
                from:     start,
                to:       goal,
                reason:   NoPathReason::TimeBoundExceeded { max_time },
                expanded: stats.expanded,
            });
        }

        if pos == goal {
            let path = reconstruct(&arena, idx);
            trace!(%start, %goal, moves = path.moves(), expanded = stats.expanded, "path found");
            return Ok(Found { path, stats });
        }

        stats.expanded += 1;
        let next = tick.next();

        // Fresh filtered list; nothing is removed from a collection while
        // it is being walked.
        let successors: Vec<Position> = ctx
            .grid
            .passable_neighbors(pos)
            .into_iter()
            .filter(|&n| !ctx.schedule.is_occupied(n, next))
            .collect();

        for n in successors {
            let state = TimeState::new(n, next);
            if seen.insert(state) {
                let child = arena.len();
                arena.push(Node { state, parent: Some(idx) });
                open.push(Reverse((next.0 + n.manhattan(goal), state, child)));
                stats.generated += 1;
            }
        }
    }

    trace!(%start, %goal, expanded = stats.expanded, "open set exhausted");
    Err(SearchError::NoPath {
        from:     start,
        to:       goal,
        reason:   NoPathReason::Exhausted,
        expanded: stats.expanded,
    })
}

/// Follow parent links from `idx` back to the tick-0 root.
fn reconstruct(arena: &[Node], mut idx: usize) -> Path {
    let mut cells = vec![arena[idx].state.pos];
    while let Some(parent) = arena[idx].parent {
        idx = parent;
        cells.push(arena[idx].state.pos);
    }
    cells.reverse();
    // The root is always present, so the list is never empty.
    Path::from_positions(cells).unwrap_or_else(|| Path::stationary(arena[0].state.pos))
}
