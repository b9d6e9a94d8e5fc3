//! The time-stepped repair sweep.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use mrp_core::{PlannerConfig, Position, RobotId, Tick};
use mrp_search::{Path, PlanningContext};

use crate::{ResolveEvent, ResolveReport};

// ── ResolverConfig ────────────────────────────────────────────────────────────

/// Knobs for one [`ConflictResolver`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolverConfig {
    /// Hard stop for the sweep.  Repairs that extend a path (see
    /// [`ConflictResolver::resolve`]) can push the horizon out; the sweep
    /// never goes past this tick, or past the longest input path if that is
    /// later.
    pub max_horizon: Tick,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { max_horizon: PlannerConfig::default().resolve_horizon() }
    }
}

impl From<&PlannerConfig> for ResolverConfig {
    fn from(config: &PlannerConfig) -> Self {
        Self { max_horizon: config.resolve_horizon() }
    }
}

// ── ConflictResolver ──────────────────────────────────────────────────────────

/// Who holds a cell at the tick being swept.
#[derive(Copy, Clone)]
struct Claim {
    robot:   RobotId,
    resting: bool,
}

/// Index-priority conflict repair.
///
/// Deterministic: the same input map always yields the same output map and
/// the same event log.
#[derive(Clone, Debug, Default)]
pub struct ConflictResolver {
    config: ResolverConfig,
}

impl ConflictResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Consume a path map and return the repaired map with its report.
    pub fn resolve(
        &self,
        ctx:       &PlanningContext<'_>,
        mut paths: BTreeMap<RobotId, Path>,
    ) -> (BTreeMap<RobotId, Path>, ResolveReport) {
        let report = self.resolve_in_place(ctx, &mut paths);
        (paths, report)
    }

    /// Repair `paths` so that no two robots share a cell at any tick.
    ///
    /// For each tick `t`, robots are placed in ascending id order.  A robot
    /// whose cell is already claimed is moved, for tick `t` only, into the
    /// first neighbor of its `t - 1` cell (right, down, left, up) that is
    /// free (in bounds, passable, not hazardous at `t`) and unclaimed.  With
    /// no such neighbor it waits on its `t - 1` cell.
    ///
    /// A robot repaired at or after its own final tick gets one extra entry:
    /// a step back to its final cell at `t + 1`.  Its path therefore still
    /// ends on the same cell, and the sweep keeps going until that step has
    /// been checked against other robots too (bounded by
    /// [`ResolverConfig::max_horizon`]).  The step is recorded as
    /// [`ResolveEvent::Returned`]; it is taken even if the final cell is
    /// hazardous at `t + 1`, in which case the event is flagged and a warning
    /// is logged.
    ///
    /// Two robots that are both resting on the same cell (there at `t - 1`
    /// and `t`, and it is their final cell) are left alone.
    ///
    /// Tick 0 is never repaired.  Robots sharing a start are counted as
    /// unresolved.
    ///
    /// Running the pass again on its own output changes no path, unless the
    /// first pass was truncated at the horizon cap.
    pub fn resolve_in_place(
        &self,
        ctx:   &PlanningContext<'_>,
        paths: &mut BTreeMap<RobotId, Path>,
    ) -> ResolveReport {
        let mut report = ResolveReport::default();

        let mut horizon = longest(paths);
        let cap = self.config.max_horizon.max(horizon);

        let mut t = Tick::ZERO;
        loop {
            let mut claims: HashMap<Position, Claim> = HashMap::with_capacity(paths.len());

            for (&robot, path) in paths.iter_mut() {
                let pos = path.position_at(t);
                let resting = is_resting(path, t);

                let Some(keeper) = claims.get(&pos).copied() else {
                    claims.insert(pos, Claim { robot, resting });
                    continue;
                };
                if keeper.resting && resting {
                    continue;
                }

                report.conflicts += 1;
                report.events.push(ResolveEvent::Conflict {
                    tick: t, pos, keeper: keeper.robot, robot,
                });

                let Some(before) = t.prev() else {
                    report.unresolved += 1;
                    continue;
                };
                let from = path.position_at(before);
                let end = path.end();
                let needs_return = t >= path.final_tick();

                let detour = from
                    .neighbors()
                    .find(|&n| ctx.is_free(n, t) && !claims.contains_key(&n));

                let target = match detour {
                    Some(to) => {
                        debug!(%robot, tick = %t, %from, %to, "rerouted");
                        report.rerouted += 1;
                        report.events.push(ResolveEvent::Rerouted { robot, tick: t, from: pos, to });
                        to
                    }
                    None => {
                        warn!(%robot, tick = %t, pos = %from, "no free neighbor; waiting");
                        report.waited += 1;
                        report.events.push(ResolveEvent::Waited { robot, tick: t, pos: from });
                        from
                    }
                };

                if target != pos {
                    path.set_position(t, target);
                    if needs_return && target != end {
                        let back = t.next();
                        let hazardous = !ctx.is_free(end, back);
                        if hazardous {
                            warn!(%robot, tick = %back, pos = %end, "return step lands on a hazard");
                        }
                        path.push(end);
                        report.events.push(ResolveEvent::Returned {
                            robot, tick: back, pos: end, hazardous,
                        });
                        horizon = horizon.max(back);
                    }
                }

                if claims.contains_key(&target) {
                    report.unresolved += 1;
                } else {
                    claims.insert(target, Claim { robot, resting: is_resting(path, t) });
                }
            }

            if t >= horizon || t >= cap {
                break;
            }
            t = t.next();
        }

        report.horizon = t;
        report.truncated = horizon > t;

        let repaired = report.repaired_robots();
        report.desynchronized = repaired
            .into_iter()
            .filter(|id| {
                paths
                    .get(id)
                    .is_some_and(|p| p.validate_allowing_waits().is_err())
            })
            .collect();

        if !report.is_clean() {
            debug!(
                conflicts = report.conflicts,
                rerouted = report.rerouted,
                waited = report.waited,
                unresolved = report.unresolved,
                desynchronized = report.desynchronized.len(),
                "resolver pass finished"
            );
        }
        report
    }
}

/// Latest final tick over all paths.
fn longest(paths: &BTreeMap<RobotId, Path>) -> Tick {
    paths.values().map(Path::final_tick).max().unwrap_or(Tick::ZERO)
}

/// On its final cell at `t` and already there at `t - 1`.
fn is_resting(path: &Path, t: Tick) -> bool {
    let end = path.end();
    path.position_at(t) == end && t.prev().is_some_and(|b| path.position_at(b) == end)
}
