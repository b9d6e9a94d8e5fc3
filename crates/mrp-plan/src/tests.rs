//! Integration tests for mrp-plan.

use mrp_core::{PlannerConfig, Position, Robot, RobotId, Tick};
use mrp_grid::{Grid, GridBuilder};

use crate::{NoopObserver, PlanObserver, PlanOutcome, PlannerBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn p(row: u32, col: u32) -> Position {
    Position::new(row, col)
}

fn robot(id: u32, start: Position, goal: Position) -> Robot {
    Robot::new(RobotId(id), start, goal)
}

fn open(rows: u32, cols: u32) -> Grid {
    GridBuilder::new(rows, cols).build().unwrap()
}

fn grid(rows: &[&str]) -> Grid {
    GridBuilder::from_rows(rows).unwrap().build().unwrap()
}

fn config(max_time: u64) -> PlannerConfig {
    PlannerConfig { max_time, ..PlannerConfig::default() }
}

/// Every `(cell, tick)` for `tick >= 1` is held by at most one robot, unless
/// every robot on it is resting on its own final cell.
fn assert_no_conflicts(outcome: &PlanOutcome) {
    let horizon = outcome.makespan().0;
    for t in 1..=horizon {
        let mut by_cell: std::collections::BTreeMap<Position, Vec<RobotId>> = Default::default();
        for (&id, path) in &outcome.paths {
            by_cell.entry(path.position_at(Tick(t))).or_default().push(id);
        }
        for (pos, ids) in by_cell.into_iter().filter(|(_, ids)| ids.len() > 1) {
            let all_resting = ids.iter().all(|id| {
                let path = &outcome.paths[id];
                path.position_at(Tick(t)) == path.end() && path.position_at(Tick(t - 1)) == path.end()
            });
            assert!(all_resting, "{ids:?} share {pos} at T{t}");
        }
    }
}

// ── PlannerBuilder validation ─────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use mrp_core::{DynamicAgentId, PlanError};
    use mrp_schedule::{DynamicAgent, Waypoint};

    use super::*;

    #[test]
    fn builds_with_defaults() {
        let planner = PlannerBuilder::new(open(3, 3), PlannerConfig::default())
            .build()
            .unwrap();
        assert!(planner.robots.is_empty());
        assert!(planner.schedule.is_empty());
    }

    #[test]
    fn robots_sorted_by_id() {
        let planner = PlannerBuilder::new(open(3, 3), PlannerConfig::default())
            .robots(vec![robot(2, p(0, 0), p(2, 2)), robot(0, p(1, 1), p(0, 0))])
            .build()
            .unwrap();
        let ids: Vec<_> = planner.robots.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RobotId(0), RobotId(2)]);
    }

    #[test]
    fn invalid_config_rejected() {
        let err = PlannerBuilder::new(open(3, 3), config(0)).build().err().unwrap();
        assert!(matches!(err, PlanError::Config(_)));

        let threads = PlannerConfig { num_threads: Some(0), ..PlannerConfig::default() };
        let err = PlannerBuilder::new(open(3, 3), threads).build().err().unwrap();
        assert!(matches!(err, PlanError::Config(_)));
    }

    #[test]
    fn out_of_bounds_robot_rejected() {
        let err = PlannerBuilder::new(open(3, 3), PlannerConfig::default())
            .robots(vec![robot(0, p(0, 0), p(3, 0))])
            .build()
            .err()
            .unwrap();
        assert_eq!(err, PlanError::OutOfBounds { pos: p(3, 0), rows: 3, cols: 3 });
    }

    #[test]
    fn blocked_goal_rejected() {
        let err = PlannerBuilder::new(grid(&["..", ".X"]), PlannerConfig::default())
            .robots(vec![robot(0, p(0, 0), p(1, 1))])
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, PlanError::Impassable { what: "goal", .. }));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = PlannerBuilder::new(open(3, 3), PlannerConfig::default())
            .robots(vec![robot(1, p(0, 0), p(2, 2)), robot(1, p(1, 1), p(0, 0))])
            .build()
            .err()
            .unwrap();
        assert_eq!(err, PlanError::DuplicateRobot(RobotId(1)));
    }

    #[test]
    fn shared_start_rejected() {
        let err = PlannerBuilder::new(open(3, 3), PlannerConfig::default())
            .robots(vec![
                robot(0, p(1, 1), p(0, 0)),
                robot(1, p(2, 2), p(0, 2)),
                robot(2, p(1, 1), p(2, 0)),
            ])
            .build()
            .err()
            .unwrap();
        assert_eq!(
            err,
            PlanError::SharedStart { first: RobotId(0), second: RobotId(2), pos: p(1, 1) }
        );
    }

    #[test]
    fn mismatched_agent_lists_rejected() {
        let err = PlannerBuilder::new(open(3, 3), PlannerConfig::default())
            .agent_lists(vec![p(0, 0), p(0, 1)], vec![1])
            .build()
            .err()
            .unwrap();
        assert_eq!(
            err,
            PlanError::MalformedSchedule { agent: DynamicAgentId(0), positions: 2, times: 1 }
        );
    }

    #[test]
    fn agent_lists_take_next_free_id() {
        let err = PlannerBuilder::new(open(3, 3), PlannerConfig::default())
            .dynamic_agents(vec![DynamicAgent::new(
                DynamicAgentId(4),
                vec![Waypoint { tick: Tick(1), pos: p(0, 0) }],
            )])
            .agent_lists(vec![p(1, 1)], vec![])
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            PlanError::MalformedSchedule { agent: DynamicAgentId(5), .. }
        ));
    }

    #[test]
    fn out_of_bounds_waypoint_rejected() {
        let err = PlannerBuilder::new(open(3, 3), PlannerConfig::default())
            .agent_lists(vec![p(0, 7)], vec![2])
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, PlanError::OutOfBounds { .. }));
    }
}

// ── Planning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planning {
    use mrp_search::{Found, NoPathReason, PathSearch, PlanningContext, SearchError, SearchResult};

    use super::*;

    #[test]
    fn open_grid_corner_to_corner() {
        let planner = PlannerBuilder::new(open(5, 5), PlannerConfig::default())
            .robots(vec![robot(0, p(0, 0), p(4, 4))])
            .build()
            .unwrap();
        let outcome = planner.plan(&mut NoopObserver);

        let path = outcome.path(RobotId(0)).unwrap();
        assert_eq!(path.len(), 9);
        assert!(path.validate().is_ok());
        assert_eq!(outcome.makespan(), Tick(8));
        assert_eq!(outcome.total_moves(), 8);
        assert!(outcome.is_complete());
        assert_eq!(outcome.stats.planned, 1);
    }

    #[test]
    fn dynamic_agent_on_route_avoided() {
        let planner = PlannerBuilder::new(open(5, 5), PlannerConfig::default())
            .robots(vec![robot(0, p(4, 1), p(0, 1))])
            .agent_lists(vec![p(1, 1)], vec![3])
            .build()
            .unwrap();
        let outcome = planner.plan(&mut NoopObserver);

        let path = outcome.path(RobotId(0)).unwrap();
        assert_ne!(path.position_at(Tick(3)), p(1, 1));
        assert_eq!(path.moves(), 6);
        assert!(path.validate().is_ok());
    }

    #[test]
    fn swapping_corners_repairs_higher_id() {
        let robots = vec![robot(0, p(0, 0), p(2, 2)), robot(1, p(2, 2), p(0, 0))];
        let planner = PlannerBuilder::new(open(3, 3), PlannerConfig::default())
            .robots(robots)
            .build()
            .unwrap();
        let solo = |r: Robot| {
            PlannerBuilder::new(open(3, 3), PlannerConfig::default())
                .robots(vec![r])
                .build()
                .unwrap()
                .plan(&mut NoopObserver)
                .paths
                .remove(&r.id)
                .unwrap()
        };
        let solo0 = solo(robot(0, p(0, 0), p(2, 2)));
        let solo1 = solo(robot(1, p(2, 2), p(0, 0)));
        // Both searches reach (0,2) at T2.
        assert_eq!(solo0.positions().collect::<Vec<_>>(), vec![p(0, 0), p(0, 1), p(0, 2), p(1, 2), p(2, 2)]);
        assert_eq!(solo1.positions().collect::<Vec<_>>(), vec![p(2, 2), p(1, 2), p(0, 2), p(0, 1), p(0, 0)]);

        let outcome = planner.plan(&mut NoopObserver);
        assert_eq!(outcome.paths[&RobotId(0)], solo0);
        let r1 = &outcome.paths[&RobotId(1)];
        assert_ne!(*r1, solo1);
        // Right of (1,2) is off the grid; down is free.
        assert_eq!(r1.position_at(Tick(2)), p(2, 2));
        assert_eq!(r1.end(), p(0, 0));

        assert!(outcome.report.conflicts >= 1);
        assert_eq!(outcome.report.rerouted, 1);
        assert_no_conflicts(&outcome);
        assert!(outcome.is_complete());
    }

    #[test]
    fn crossing_robot_is_rerouted() {
        let planner = PlannerBuilder::new(open(3, 3), PlannerConfig::default())
            .robots(vec![robot(0, p(1, 0), p(1, 2)), robot(1, p(0, 1), p(2, 1))])
            .build()
            .unwrap();
        let outcome = planner.plan(&mut NoopObserver);

        let r0: Vec<_> = outcome.paths[&RobotId(0)].positions().collect();
        assert_eq!(r0, vec![p(1, 0), p(1, 1), p(1, 2)]);
        // Robot 0 holds (1,1) at T1; right of (0,1) is the first free neighbor.
        let r1: Vec<_> = outcome.paths[&RobotId(1)].positions().collect();
        assert_eq!(r1, vec![p(0, 1), p(0, 2), p(2, 1)]);

        assert_eq!(outcome.report.conflicts, 1);
        assert_eq!(outcome.report.rerouted, 1);
        assert!(outcome.report.desynchronized.contains(&RobotId(1)));
        assert_no_conflicts(&outcome);
    }

    #[test]
    fn unreachable_goal_does_not_abort_batch() {
        let g = grid(&[".X.", ".X.", ".X."]);
        let planner = PlannerBuilder::new(g, config(20))
            .robots(vec![robot(0, p(0, 0), p(0, 2)), robot(1, p(2, 0), p(0, 0))])
            .build()
            .unwrap();
        let outcome = planner.plan(&mut NoopObserver);

        assert!(matches!(
            outcome.failures.get(&RobotId(0)),
            Some(SearchError::NoPath { reason: NoPathReason::TimeBoundExceeded { max_time: 20 }, .. })
        ));
        assert!(outcome.path(RobotId(0)).is_none());
        assert_eq!(outcome.path(RobotId(1)).unwrap().moves(), 2);
        assert_eq!(outcome.stats.failed, 1);
        assert_eq!(outcome.stats.planned, 1);
        assert!(!outcome.is_complete());
    }

    #[test]
    fn repeated_runs_match() {
        let robots = vec![
            robot(0, p(0, 0), p(3, 3)),
            robot(1, p(3, 3), p(0, 0)),
            robot(2, p(0, 3), p(3, 0)),
            robot(3, p(3, 0), p(0, 3)),
        ];
        let planner = PlannerBuilder::new(open(4, 4), PlannerConfig::default())
            .robots(robots)
            .agent_lists(vec![p(1, 1), p(2, 2)], vec![2, 2])
            .build()
            .unwrap();
        let a = planner.plan(&mut NoopObserver);
        let b = planner.plan(&mut NoopObserver);
        assert_eq!(a.paths, b.paths);
        assert_eq!(a.report, b.report);
        assert_eq!(a.stats, b.stats);
    }

    struct Refuse;

    impl PathSearch for Refuse {
        fn search(
            &self,
            _ctx:      &PlanningContext<'_>,
            start:     Position,
            goal:      Position,
            _max_time: u64,
        ) -> SearchResult<Found> {
            Err(SearchError::NoPath {
                from:     start,
                to:       goal,
                reason:   NoPathReason::Exhausted,
                expanded: 0,
            })
        }
    }

    #[test]
    fn custom_search_engine_is_used() {
        let planner = PlannerBuilder::new(open(3, 3), PlannerConfig::default())
            .robots(vec![robot(0, p(0, 0), p(2, 2)), robot(1, p(2, 2), p(0, 0))])
            .search(Refuse)
            .build()
            .unwrap();
        let outcome = planner.plan(&mut NoopObserver);
        assert!(outcome.paths.is_empty());
        assert_eq!(outcome.failures.len(), 2);
        assert!(outcome.report.is_clean());
        assert_eq!(outcome.makespan(), Tick::ZERO);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use mrp_resolve::ResolveEvent;
    use mrp_search::{Found, SearchResult};

    use super::*;

    #[derive(Default)]
    struct Recorder {
        started:  Option<usize>,
        searched: Vec<(RobotId, bool)>,
        events:   Vec<ResolveEvent>,
        ended:    usize,
    }

    impl PlanObserver for Recorder {
        fn on_plan_start(&mut self, robots: usize) {
            self.started = Some(robots);
        }
        fn on_search_end(&mut self, robot: RobotId, result: &SearchResult<Found>) {
            self.searched.push((robot, result.is_ok()));
        }
        fn on_resolve_event(&mut self, event: &ResolveEvent) {
            self.events.push(event.clone());
        }
        fn on_plan_end(&mut self, outcome: &PlanOutcome) {
            assert_eq!(outcome.stats.robots, self.searched.len());
            self.ended += 1;
        }
    }

    #[test]
    fn hooks_fire_in_robot_order() {
        let planner = PlannerBuilder::new(open(3, 3), PlannerConfig::default())
            .robots(vec![robot(1, p(0, 1), p(2, 1)), robot(0, p(1, 0), p(1, 2))])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let outcome = planner.plan(&mut rec);

        assert_eq!(rec.started, Some(2));
        assert_eq!(rec.searched, vec![(RobotId(0), true), (RobotId(1), true)]);
        assert_eq!(rec.events, outcome.report.events);
        assert!(!rec.events.is_empty());
        assert_eq!(rec.ended, 1);
    }
}

// ── Randomized invariants ─────────────────────────────────────────────────────

#[cfg(test)]
mod randomized {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use mrp_search::TimeExpandedAStar;

    use super::*;
    use crate::Planner;

    const SIZE: u32 = 8;

    /// Random 8×8 grid, up to six robots on distinct open starts and goals,
    /// and a handful of single-waypoint hazards.
    fn scenario(seed: u64) -> (Grid, Vec<Robot>, Vec<(Position, u64)>) {
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut b = GridBuilder::new(SIZE, SIZE);
        let mut open_cells = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if rng.gen_bool(0.15) {
                    b.block(p(row, col));
                } else {
                    open_cells.push(p(row, col));
                }
            }
        }
        let g = b.build().unwrap();

        let mut starts = open_cells.clone();
        let mut goals = open_cells.clone();
        let count = 6.min(open_cells.len());
        let robots: Vec<Robot> = (0..count)
            .map(|i| {
                let start = take(&mut rng, &mut starts);
                let goal = take(&mut rng, &mut goals);
                robot(i as u32, start, goal)
            })
            .collect();

        let hazards = (0..6)
            .map(|_| (open_cells[rng.gen_range(0..open_cells.len())], rng.gen_range(1..12)))
            .collect();

        (g, robots, hazards)
    }

    fn take(rng: &mut SmallRng, cells: &mut Vec<Position>) -> Position {
        let i = rng.gen_range(0..cells.len());
        cells.swap_remove(i)
    }

    fn planner(seed: u64) -> (Planner<TimeExpandedAStar>, Vec<Robot>, Vec<(Position, u64)>) {
        let (g, robots, hazards) = scenario(seed);
        let mut builder = PlannerBuilder::new(g, config(200)).robots(robots.clone());
        for &(pos, t) in &hazards {
            builder = builder.agent_lists(vec![pos], vec![t]);
        }
        (builder.build().unwrap(), robots, hazards)
    }

    fn plan(seed: u64) -> (PlanOutcome, Vec<Robot>, Vec<(Position, u64)>) {
        let (planner, robots, hazards) = planner(seed);
        (planner.plan(&mut NoopObserver), robots, hazards)
    }

    #[test]
    fn paths_keep_endpoints() {
        for seed in 0..40 {
            let (outcome, robots, _) = plan(seed);
            assert_eq!(outcome.paths.len() + outcome.failures.len(), robots.len());
            for r in &robots {
                if let Some(path) = outcome.path(r.id) {
                    assert_eq!(path.start(), r.start, "seed {seed}");
                    assert_eq!(path.end(), r.goal, "seed {seed}");
                    assert!(path.moves() >= r.min_moves(), "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn untouched_paths_are_strict_and_avoid_hazards() {
        for seed in 0..40 {
            let (outcome, _, hazards) = plan(seed);
            let repaired = outcome.report.repaired_robots();
            for (id, path) in outcome.paths.iter().filter(|(id, _)| !repaired.contains(id)) {
                assert!(path.validate().is_ok(), "seed {seed}, {id}: {path}");
                for &(pos, t) in &hazards {
                    if (t as usize) < path.len() {
                        assert_ne!(path.position_at(Tick(t)), pos, "seed {seed}, {id}");
                    }
                }
            }
        }
    }

    #[test]
    fn resolved_outcomes_have_no_conflicts() {
        for seed in 0..40 {
            let (outcome, _, _) = plan(seed);
            if outcome.report.unresolved == 0 && !outcome.report.truncated {
                assert_no_conflicts(&outcome);
            }
            for path in outcome.paths.values() {
                assert!(path.states().iter().enumerate().all(|(i, s)| s.tick == Tick(i as u64)));
            }
        }
    }

    #[test]
    fn second_resolve_pass_changes_nothing() {
        for seed in 0..100 {
            let (planner, _, _) = planner(seed);
            let outcome = planner.plan(&mut NoopObserver);
            if outcome.report.truncated {
                continue;
            }
            let (again, report) = planner.resolver.resolve(&planner.context(), outcome.paths.clone());
            assert_eq!(again, outcome.paths, "seed {seed}");
            if outcome.report.unresolved == 0 {
                assert!(report.is_clean(), "seed {seed}");
            }
        }
    }

    #[test]
    fn same_seed_same_outcome() {
        for seed in [3, 17, 29] {
            let (a, _, _) = plan(seed);
            let (b, _, _) = plan(seed);
            assert_eq!(a.paths, b.paths);
            assert_eq!(a.report, b.report);
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn dedicated_pool_matches_global_pool() {
        for seed in 0..10 {
            let (g, robots, _) = scenario(seed);
            let pooled = PlannerConfig { num_threads: Some(2), ..config(200) };
            let a = PlannerBuilder::new(g.clone(), pooled)
                .robots(robots.clone())
                .build()
                .unwrap()
                .plan(&mut NoopObserver);
            let b = PlannerBuilder::new(g, config(200))
                .robots(robots)
                .build()
                .unwrap()
                .plan(&mut NoopObserver);
            assert_eq!(a.paths, b.paths);
        }
    }
}
