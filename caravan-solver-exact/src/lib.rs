//! Exhaustive Vehicle Routing Problem solver for Caravan.
//!
//! [`ExactSolver`] implements [`Solver`](caravan_core::Solver) by backtracking
//! over vehicles in input order. Each vehicle picks a capacity-feasible subset
//! of the jobs still unassigned, the [`sequence_route`] search orders that
//! subset, and the cheapest complete assignment wins. The result is a ground
//! truth for small instances: proven optimal unless a deadline or
//! cancellation stops the search first.
//!
//! Exploration order is fixed, so repeated solves of the same request return
//! identical plans:
//!
//! - vehicles are filled in input order;
//! - a vehicle's candidate subsets are visited include-first over the
//!   remaining jobs in input order, so the first candidate loads every job
//!   onto the first vehicle;
//! - orderings within a route are visited lexicographically by input order;
//! - a candidate replaces the incumbent only when strictly cheaper.

#![forbid(unsafe_code)]

mod enumerate;
mod search;
mod sequence;
mod solver;

pub use sequence::sequence_route;
pub use solver::{ExactSolver, ExactSolverConfig};
