//! Planner error type.
//!
//! Sub-crates define their own error enums and convert them into `PlanError`
//! via `From` impls where a failure must abort planning before it starts.
//! Per-robot search failures are *not* `PlanError`s: they are collected in
//! the plan outcome and never abort the batch.

use thiserror::Error;

use crate::{DynamicAgentId, Position, RobotId};

/// Errors that stop a planning run before any search begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("position {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds { pos: Position, rows: u32, cols: u32 },

    #[error("{robot} has an impassable {what} cell at {pos}")]
    Impassable {
        robot: RobotId,
        pos:   Position,
        what:  &'static str,
    },

    #[error("{agent} has {positions} positions but {times} times")]
    MalformedSchedule {
        agent:     DynamicAgentId,
        positions: usize,
        times:     usize,
    },

    #[error("{0} appears more than once")]
    DuplicateRobot(RobotId),

    #[error("{first} and {second} share the start cell {pos}")]
    SharedStart {
        first:  RobotId,
        second: RobotId,
        pos:    Position,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for fallible setup across the `mrp-*` crates.
pub type PlanResult<T> = Result<T, PlanError>;
