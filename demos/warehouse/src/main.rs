//! warehouse: small end-to-end run of the rust_mrp planner.
//!
//! Six robots cross a 7×11 shelf floor while two forklifts drive fixed
//! routes down the middle aisle and one cross aisle.  Forklift waypoints are
//! hazards; robots plan around them independently and the conflict pass then
//! separates the robots from each other.
//!
//! Set `RUST_LOG=mrp_resolve=debug` to see every reroute.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mrp_core::{PlannerConfig, Position, Robot, RobotId};
use mrp_grid::GridBuilder;
use mrp_plan::{PlanObserver, PlannerBuilder};
use mrp_resolve::ResolveEvent;
use mrp_search::{Found, SearchResult};

// ── Layout ────────────────────────────────────────────────────────────────────

const FLOOR: [&str; 7] = [
    "...........",
    ".XX.XX.XX..",
    ".XX.XX.XX..",
    "...........",
    ".XX.XX.XX..",
    ".XX.XX.XX..",
    "...........",
];

/// `(start, goal)` per robot, in id order.
const JOBS: [((u32, u32), (u32, u32)); 6] = [
    ((0, 0),  (6, 10)),
    ((6, 10), (0, 0)),
    ((3, 0),  (3, 10)),
    ((0, 3),  (6, 6)),
    ((6, 0),  (0, 9)),
    ((3, 10), (0, 6)),
];

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts what happened without holding on to the paths.
#[derive(Default)]
struct CountingObserver {
    searches: usize,
    failures: usize,
    reroutes: usize,
    waits:    usize,
}

impl PlanObserver for CountingObserver {
    fn on_search_end(&mut self, robot: RobotId, result: &SearchResult<Found>) {
        self.searches += 1;
        if let Err(e) = result {
            self.failures += 1;
            warn!(%robot, error = %e, "search failed");
        }
    }

    fn on_resolve_event(&mut self, event: &ResolveEvent) {
        match event {
            ResolveEvent::Rerouted { .. } => self.reroutes += 1,
            ResolveEvent::Waited { .. } => self.waits += 1,
            ResolveEvent::Conflict { .. } | ResolveEvent::Returned { .. } => {}
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<()> {
    init_logging();

    // 1. Floor plan.
    let grid = GridBuilder::from_rows(&FLOOR)?.build()?;
    info!(rows = grid.rows(), cols = grid.cols(), open = grid.passable_count(), "floor loaded");

    // 2. Robots.
    let robots: Vec<Robot> = JOBS
        .iter()
        .enumerate()
        .map(|(i, &(start, goal))| {
            Robot::new(RobotId(i as u32), Position::from(start), Position::from(goal))
        })
        .collect();

    // 3. Forklifts: one sweeps the middle aisle right to left from T1, the
    //    other drives down column 9 from T2.
    let aisle: Vec<Position> = (0..=10).rev().map(|c| Position::new(3, c)).collect();
    let aisle_ticks: Vec<u64> = (1..=11).collect();
    let column: Vec<Position> = (0..7).map(|r| Position::new(r, 9)).collect();
    let column_ticks: Vec<u64> = (2..9).collect();

    // 4. Build and run.
    let planner = PlannerBuilder::new(grid, PlannerConfig::default())
        .robots(robots)
        .agent_lists(aisle, aisle_ticks)
        .agent_lists(column, column_ticks)
        .build()?;
    info!(hazards = planner.schedule.len(), "hazard schedule built");

    let mut obs = CountingObserver::default();
    let t0 = Instant::now();
    let outcome = planner.plan(&mut obs);
    let elapsed = t0.elapsed();

    // 5. Summary.
    println!("Planned in {:.3} ms", elapsed.as_secs_f64() * 1_000.0);
    println!(
        "  searches {} (failed {}), reroutes {}, waits {}",
        obs.searches, obs.failures, obs.reroutes, obs.waits
    );
    println!("  makespan {}, total moves {}", outcome.makespan(), outcome.total_moves());
    if !outcome.report.desynchronized.is_empty() {
        println!("  desynchronized after repair: {:?}", outcome.report.desynchronized);
    }
    println!();

    // 6. Per-robot table.
    println!("{:<10} {:<10} {:<10} {:<6}", "Robot", "Start", "Goal", "Moves");
    println!("{}", "-".repeat(38));
    for r in &planner.robots {
        let moves = outcome
            .path(r.id)
            .map_or_else(|| "none".to_string(), |p| p.moves().to_string());
        println!("{:<10} {:<10} {:<10} {:<6}", r.id.0, r.start.to_string(), r.goal.to_string(), moves);
    }
    println!();

    // 7. Routes.
    for (id, path) in &outcome.paths {
        println!("{id}: {path}");
    }
    for (id, err) in &outcome.failures {
        println!("{id}: {err}");
    }

    if !outcome.is_complete() {
        warn!("plan incomplete");
    }
    Ok(())
}
