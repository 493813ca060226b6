//! Metaheuristic Vehicle Routing Problem solver for Caravan.
//!
//! [`VrpSolver`] implements [`Solver`](caravan_core::Solver) on top of the
//! `vrp-core` evolutionary search. It models the request as a capacitated VRP
//! with open routes (no return leg) and minimises total travel time. Plans are
//! always [`Optimality::BestEffort`](caravan_core::Optimality::BestEffort);
//! pair it with the exact solver on small instances to measure the gap.

#![forbid(unsafe_code)]

mod solver;
mod vrp;

pub use solver::{VrpSolver, VrpSolverConfig};
