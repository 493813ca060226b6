//! Property-based tests for the exact solver.
//!
//! # Invariants tested
//!
//! - **Optimality:** the total matches an unpruned reference enumeration.
//! - **Determinism:** repeated solves return identical solutions.
//! - **Permutation invariance:** reordering jobs or vehicles keeps the total.
//! - **Capacity, completeness and round-trip:** feasible plans pass
//!   `check_plan`.
//! - **Zero jobs:** always feasible with total duration zero.
//! - **Route cache:** enabling it never changes the solution.

#![expect(
    clippy::expect_used,
    reason = "property tests use expect for readable failures"
)]


use caravan_core::test_support::check_plan;
use caravan_core::{Infeasibility, Optimality, Solution, SolveRequest, Solver};
use caravan_solver_exact::{ExactSolver, ExactSolverConfig};
use proptest::prelude::*;

use proptest_support::{reference_optimum, request_strategy};

fn solve(request: &SolveRequest) -> Solution {
    ExactSolver::new()
        .solve(request)
        .expect("exact solver does not fail on valid input")
        .solution
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    /// Property: the pruned search finds the same optimum as brute force.
    #[test]
    fn total_matches_reference(request in request_strategy(5)) {
        let solution = solve(&request);
        prop_assert_eq!(solution.total_duration(), reference_optimum(&request));
        if !solution.is_feasible() {
            prop_assert_eq!(solution, Solution::Infeasible(Infeasibility::Proven));
        }
    }

    /// Property: feasible plans satisfy capacity, completeness and
    /// round-trip invariants, and are proven without a deadline.
    #[test]
    fn feasible_plans_are_valid(request in request_strategy(5)) {
        if let Solution::Feasible(plan) = solve(&request) {
            prop_assert_eq!(check_plan(&request, &plan), Ok(()));
            prop_assert_eq!(plan.optimality, Optimality::Proven);
        }
    }

    /// Property: identical inputs give identical outputs.
    #[test]
    fn solving_is_deterministic(request in request_strategy(5)) {
        prop_assert_eq!(solve(&request), solve(&request));
    }

    /// Property: input order never changes the optimal total.
    #[test]
    fn total_ignores_input_order(request in request_strategy(5)) {
        let mut reordered = request.clone();
        reordered.jobs.reverse();
        reordered.vehicles.reverse();
        prop_assert_eq!(
            solve(&request).total_duration(),
            solve(&reordered).total_duration()
        );
    }

    /// Property: an empty job list is feasible at zero cost.
    #[test]
    fn empty_job_list_costs_nothing(request in request_strategy(0)) {
        let solution = solve(&request);
        prop_assert_eq!(solution.total_duration(), Some(0));
        let plan = solution.plan().expect("zero jobs is feasible");
        prop_assert_eq!(plan.routes.len(), request.vehicles.len());
    }

    /// Property: the route cache is transparent.
    #[test]
    fn route_cache_is_transparent(request in request_strategy(5)) {
        let uncached = ExactSolver::with_config(ExactSolverConfig { cache_routes: false })
            .solve(&request)
            .expect("exact solver does not fail on valid input")
            .solution;
        prop_assert_eq!(solve(&request), uncached);
    }
}
