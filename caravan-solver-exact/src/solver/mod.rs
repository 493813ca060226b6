//! `ExactSolver` implementation of the solve contract.

use std::time::Instant;

use caravan_core::{
    CancelFlag, Diagnostics, Infeasibility, Optimality, Plan, Route, SearchBudget, Solution,
    SolveError, SolveRequest, SolveResponse, Solver, VehicleRoute, is_fleet_undersized,
};
use log::{debug, warn};

use crate::search::Search;

/// Configuration for [`ExactSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactSolverConfig {
    /// Memoise sequenced routes per start location and job subset within one
    /// solve. Never changes the result; trades memory for time.
    pub cache_routes: bool,
}

impl Default for ExactSolverConfig {
    fn default() -> Self {
        Self { cache_routes: true }
    }
}

/// Exhaustive solver returning a proven optimum or an explicit infeasibility.
///
/// A request deadline, or the optional [`CancelFlag`], is polled before each
/// branch. When either fires the best plan found so far is returned as
/// [`Optimality::BestEffort`], or [`Infeasibility::Undetermined`] if none was
/// found yet.
///
/// # Examples
/// ```
/// use caravan_core::{Capacity, DurationMatrix, Job, SolveRequest, Solver, Vehicle};
/// use caravan_solver_exact::ExactSolver;
///
/// let request = SolveRequest {
///     vehicles: vec![
///         Vehicle::new("v1", 0).with_capacity(Capacity::Limited(100)),
///         Vehicle::new("v2", 0).with_capacity(Capacity::Limited(100)),
///     ],
///     jobs: vec![
///         Job::new("j1", 1).with_delivery(30).with_service(300),
///         Job::new("j2", 2).with_delivery(40).with_service(600),
///     ],
///     matrix: DurationMatrix::new(vec![
///         vec![0, 600, 900],
///         vec![600, 0, 300],
///         vec![900, 300, 0],
///     ]),
///     deadline: None,
/// };
///
/// let response = ExactSolver::new().solve(&request).expect("exact solve never fails");
/// assert_eq!(response.solution.total_duration(), Some(1800));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExactSolver {
    config: ExactSolverConfig,
    cancel: Option<CancelFlag>,
}

impl ExactSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ExactSolverConfig::default())
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: ExactSolverConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Stop searching once `flag` is cancelled.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> ExactSolverConfig {
        self.config
    }
}

impl Solver for ExactSolver {
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        let mut budget = request.budget();
        if let Some(flag) = &self.cancel {
            budget = budget.with_cancel_flag(flag.clone());
        }
        Ok(self.solve_within(request, &budget))
    }
}

impl ExactSolver {
    /// Solve `request`, stopping early once `budget` is exhausted.
    pub(crate) fn solve_within(
        &self,
        request: &SolveRequest,
        budget: &SearchBudget,
    ) -> SolveResponse {
        let started_at = Instant::now();

        if request.jobs.is_empty() {
            return respond(empty_plan(request), Diagnostics::default(), started_at);
        }
        if request.vehicles.is_empty() || is_fleet_undersized(&request.vehicles, &request.jobs) {
            debug!("exact search skipped: capacity cannot cover demand");
            return respond(
                Solution::Infeasible(Infeasibility::Proven),
                Diagnostics::default(),
                started_at,
            );
        }

        let outcome = Search::new(request, budget, self.config.cache_routes).run();
        let diagnostics = Diagnostics {
            solve_time: std::time::Duration::ZERO,
            assignments_evaluated: outcome.evaluated,
            branches_pruned: outcome.pruned,
        };

        let solution = match (outcome.plan, outcome.expired) {
            (Some(plan), _) => Solution::Feasible(plan),
            (None, true) => Solution::Infeasible(Infeasibility::Undetermined),
            (None, false) => Solution::Infeasible(Infeasibility::Proven),
        };
        if outcome.expired {
            warn!(
                "exact search stopped early after {} assignments; result is best effort",
                outcome.evaluated
            );
        }
        debug!(
            "exact search finished: total={:?} evaluated={} pruned={}",
            solution.total_duration(),
            outcome.evaluated,
            outcome.pruned
        );
        respond(solution, diagnostics, started_at)
    }
}

fn respond(solution: Solution, mut diagnostics: Diagnostics, started_at: Instant) -> SolveResponse {
    diagnostics.solve_time = started_at.elapsed();
    SolveResponse {
        solution,
        diagnostics,
    }
}

/// Every vehicle idle, as returned when there is nothing to deliver.
fn empty_plan(request: &SolveRequest) -> Solution {
    let routes = request
        .vehicles
        .iter()
        .map(|vehicle| VehicleRoute::new(vehicle.id.clone(), Route::empty()))
        .collect();
    Solution::Feasible(Plan::new(routes, Optimality::Proven))
}

#[cfg(test)]
mod tests;
