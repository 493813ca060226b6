//! Core domain types for the Caravan routing engine.
//!
//! The crate holds the immutable problem inputs ([`Job`], [`Vehicle`],
//! [`DurationMatrix`]), the result model ([`Solution`] and its [`Plan`]), the
//! [`Solver`] contract shared by every strategy, and the two leaf components
//! every strategy builds on: the duration evaluator and the capacity
//! feasibility check.
//!
//! Input shape is *not* re-checked here. Callers run [`validate_request`]
//! before handing a request to a solver; solvers treat an out-of-range
//! location index as a broken precondition.

#![forbid(unsafe_code)]

mod budget;
mod duration;
mod feasibility;
mod job;
mod matrix;
mod route;
mod solution;
mod solver;
mod validation;
mod vehicle;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use budget::{CancelFlag, SearchBudget};
pub use duration::sequence_duration;
pub use feasibility::{is_capacity_feasible, is_fleet_undersized, total_demand};
pub use job::Job;
pub use matrix::DurationMatrix;
pub use route::{Route, VehicleRoute};
pub use solution::{Infeasibility, Optimality, Plan, Solution};
pub use solver::{Diagnostics, SolveError, SolveRequest, SolveResponse, Solver};
pub use validation::{SolveRequestValidationError, validate_request};
pub use vehicle::{Capacity, Vehicle};
