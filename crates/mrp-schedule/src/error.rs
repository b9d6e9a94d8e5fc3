use mrp_core::{DynamicAgentId, PlanError};
use mrp_grid::GridError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("{agent} has {positions} positions but {times} times")]
    Malformed {
        agent:     DynamicAgentId,
        positions: usize,
        times:     usize,
    },

    #[error("{agent} waypoint: {source}")]
    Waypoint {
        agent:  DynamicAgentId,
        #[source]
        source: GridError,
    },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

impl From<ScheduleError> for PlanError {
    fn from(e: ScheduleError) -> Self {
        match e {
            ScheduleError::Malformed { agent, positions, times } => {
                PlanError::MalformedSchedule { agent, positions, times }
            }
            ScheduleError::Waypoint { source, .. } => source.into(),
        }
    }
}
