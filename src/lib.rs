//! Facade crate for the Caravan routing engine.
//!
//! This crate re-exports the core domain types and exposes the exact and
//! `vrp-core` backed solvers behind feature flags.
//!
//! Strategies are interchangeable behind [`Solver`]:
//!
//! ```
//! # #[cfg(feature = "solver-exact")]
//! # {
//! use caravan_engine::{
//!     Capacity, DurationMatrix, ExactSolver, Job, SolveRequest, Solver, Vehicle,
//!     validate_request,
//! };
//!
//! let request = SolveRequest {
//!     vehicles: vec![Vehicle::new("v1", 0).with_capacity(Capacity::Limited(10))],
//!     jobs: vec![Job::new("j1", 1).with_delivery(4).with_service(60)],
//!     matrix: DurationMatrix::new(vec![vec![0, 300], vec![300, 0]]),
//!     deadline: None,
//! };
//! validate_request(&request).expect("request is well formed");
//!
//! let solver: Box<dyn Solver> = Box::new(ExactSolver::new());
//! let response = solver.solve(&request).expect("exact solve never fails");
//! assert_eq!(response.solution.total_duration(), Some(360));
//! # }
//! ```

#![forbid(unsafe_code)]

pub use caravan_core::{
    CancelFlag, Capacity, Diagnostics, DurationMatrix, Infeasibility, Job, Optimality, Plan,
    Route, SearchBudget, Solution, SolveError, SolveRequest, SolveRequestValidationError,
    SolveResponse, Solver, Vehicle, VehicleRoute, is_capacity_feasible, is_fleet_undersized,
    sequence_duration, total_demand, validate_request,
};

#[cfg(feature = "solver-exact")]
pub use caravan_solver_exact::{ExactSolver, ExactSolverConfig, sequence_route};

#[cfg(feature = "solver-vrp")]
pub use caravan_solver_vrp::{VrpSolver, VrpSolverConfig};
