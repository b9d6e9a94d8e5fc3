//! Fluent builder for constructing a [`Planner`].

use std::collections::BTreeMap;

use mrp_core::{DynamicAgentId, PlanError, PlanResult, PlannerConfig, Position, Robot, RobotId};
use mrp_grid::Grid;
use mrp_resolve::{ConflictResolver, ResolverConfig};
use mrp_schedule::{DynamicAgent, HazardSchedule};
use mrp_search::{PathSearch, TimeExpandedAStar};

use crate::Planner;

/// Fluent builder for [`Planner<S>`].
///
/// # Required inputs
///
/// - [`Grid`]: the static obstacle map
/// - [`PlannerConfig`]: search bound, thread count, resolver slack
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                |
/// |--------------------------|------------------------|
/// | `.robots(v)`             | No robots              |
/// | `.dynamic_agents(v)`     | No hazards             |
/// | `.agent_lists(p, t)`     | (appends one agent)    |
/// | `.search(engine)`        | [`TimeExpandedAStar`]  |
///
/// # Example
///
/// ```rust,ignore
/// let planner = PlannerBuilder::new(grid, PlannerConfig::default())
///     .robots(robots)
///     .dynamic_agents(agents)
///     .build()?;
/// let outcome = planner.plan(&mut NoopObserver);
/// ```
pub struct PlannerBuilder<S: PathSearch = TimeExpandedAStar> {
    grid:   Grid,
    config: PlannerConfig,
    robots: Vec<Robot>,
    agents: Vec<DynamicAgent>,
    /// Raw index-paired lists, checked for matching lengths in `build`.
    lists:  Vec<(Vec<Position>, Vec<u64>)>,
    search: S,
}

impl PlannerBuilder<TimeExpandedAStar> {
    /// Create a builder with all required inputs and the default search.
    pub fn new(grid: Grid, config: PlannerConfig) -> Self {
        Self {
            grid,
            config,
            robots: Vec::new(),
            agents: Vec::new(),
            lists:  Vec::new(),
            search: TimeExpandedAStar,
        }
    }
}

impl<S: PathSearch> PlannerBuilder<S> {
    /// Supply the robots to plan.  Ids must be unique; order does not matter.
    pub fn robots(mut self, robots: Vec<Robot>) -> Self {
        self.robots = robots;
        self
    }

    /// Supply dynamic agents whose waypoints become hazards.
    pub fn dynamic_agents(mut self, agents: Vec<DynamicAgent>) -> Self {
        self.agents = agents;
        self
    }

    /// Add one dynamic agent from separate position and tick lists, paired by
    /// index.  The agent gets the next free id after those passed to
    /// [`dynamic_agents`](Self::dynamic_agents).
    ///
    /// Lists of different lengths are reported by [`build`](Self::build) as
    /// [`PlanError::MalformedSchedule`].
    pub fn agent_lists(mut self, positions: Vec<Position>, ticks: Vec<u64>) -> Self {
        self.lists.push((positions, ticks));
        self
    }

    /// Swap in a different search engine.
    pub fn search<T: PathSearch>(self, search: T) -> PlannerBuilder<T> {
        PlannerBuilder {
            grid:   self.grid,
            config: self.config,
            robots: self.robots,
            agents: self.agents,
            lists:  self.lists,
            search,
        }
    }

    /// Validate every input and return a ready-to-run [`Planner`].
    ///
    /// Nothing is searched here; any error returned means no robot was
    /// planned.
    pub fn build(self) -> PlanResult<Planner<S>> {
        self.config.validate()?;

        // ── Robots ────────────────────────────────────────────────────────
        let mut robots = self.robots;
        robots.sort_by_key(|r| r.id);
        for pair in robots.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(PlanError::DuplicateRobot(pair[1].id));
            }
        }

        let mut starts: BTreeMap<Position, RobotId> = BTreeMap::new();
        for robot in &robots {
            self.grid.check_robot(robot)?;
            if let Some(&first) = starts.get(&robot.start) {
                return Err(PlanError::SharedStart {
                    first,
                    second: robot.id,
                    pos:    robot.start,
                });
            }
            starts.insert(robot.start, robot.id);
        }

        // ── Dynamic agents ────────────────────────────────────────────────
        let mut agents = self.agents;
        let mut next_id = agents.iter().map(|a| a.id.0 + 1).max().unwrap_or(0);
        for (positions, ticks) in self.lists {
            agents.push(DynamicAgent::from_lists(DynamicAgentId(next_id), positions, ticks)?);
            next_id += 1;
        }
        let schedule = HazardSchedule::build(&self.grid, &agents)?;

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| PlanError::Config(e.to_string()))?,
            ),
            None => None,
        };

        Ok(Planner {
            resolver: ConflictResolver::new(ResolverConfig::from(&self.config)),
            config:   self.config,
            grid:     self.grid,
            schedule,
            robots,
            search:   self.search,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
