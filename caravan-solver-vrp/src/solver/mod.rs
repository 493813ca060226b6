//! `VrpSolver` implementation backed by `vrp-core`.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use caravan_core::{
    Diagnostics, Infeasibility, Job, Optimality, Plan, Route, Solution, SolveError, SolveRequest,
    SolveResponse, Solver, VehicleRoute, is_fleet_undersized, sequence_duration,
};
use log::{debug, warn};

use crate::vrp::{Tours, VrpSolveContext};

/// Configuration for [`VrpSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VrpSolverConfig {
    /// Upper bound on `vrp-core` generations.
    pub max_generations: usize,
}

impl Default for VrpSolverConfig {
    fn default() -> Self {
        Self {
            max_generations: 200,
        }
    }
}

/// Approximate solver using the `vrp-core` metaheuristics.
///
/// Plans are [`Optimality::BestEffort`]. When the search leaves any job
/// unplaced the outcome is [`Infeasibility::Undetermined`], since a heuristic
/// cannot prove that no plan exists. Requests that capacity alone rules out
/// are still reported as [`Infeasibility::Proven`] without searching.
///
/// The search counters in [`Diagnostics`] belong to exhaustive search and
/// stay zero here.
#[derive(Debug, Clone, Default)]
pub struct VrpSolver {
    config: VrpSolverConfig,
}

impl VrpSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(VrpSolverConfig::default())
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: VrpSolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> VrpSolverConfig {
        self.config
    }
}

impl Solver for VrpSolver {
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        let started_at = Instant::now();

        if request.jobs.is_empty() {
            let routes = request
                .vehicles
                .iter()
                .map(|vehicle| VehicleRoute::new(vehicle.id.clone(), Route::empty()))
                .collect();
            let plan = Plan::new(routes, Optimality::Proven);
            return Ok(respond(Solution::Feasible(plan), started_at));
        }
        if request.vehicles.is_empty() || is_fleet_undersized(&request.vehicles, &request.jobs) {
            debug!("vrp search skipped: capacity cannot cover demand");
            return Ok(respond(
                Solution::Infeasible(Infeasibility::Proven),
                started_at,
            ));
        }

        let tours = VrpSolveContext::new(&self.config).solve(request)?;
        let solution = assemble(request, &tours).map_or_else(
            || {
                warn!(
                    "vrp search left {} of {} jobs unassigned",
                    tours.unassigned,
                    request.jobs.len()
                );
                Solution::Infeasible(Infeasibility::Undetermined)
            },
            Solution::Feasible,
        );
        Ok(respond(solution, started_at))
    }
}

fn respond(solution: Solution, started_at: Instant) -> SolveResponse {
    SolveResponse {
        solution,
        diagnostics: Diagnostics {
            solve_time: started_at.elapsed(),
            ..Diagnostics::default()
        },
    }
}

/// Lay the tours out in input vehicle order with durations recomputed from
/// the request matrix.
///
/// Returns `None` unless every job appears in exactly one tour.
fn assemble(request: &SolveRequest, tours: &Tours) -> Option<Plan> {
    if tours.unassigned > 0 {
        return None;
    }
    let by_id: HashMap<&str, &Job> = request
        .jobs
        .iter()
        .map(|job| (job.id.as_str(), job))
        .collect();

    let mut served = HashSet::with_capacity(request.jobs.len());
    let mut routes = Vec::with_capacity(request.vehicles.len());
    for vehicle in &request.vehicles {
        let ids = tours.routes.get(&vehicle.id).cloned().unwrap_or_default();
        let visits = ids
            .iter()
            .map(|id| by_id.get(id.as_str()).copied())
            .collect::<Option<Vec<&Job>>>()?;
        if !visits.iter().all(|job| served.insert(job.id.as_str())) {
            return None;
        }
        let duration = sequence_duration(&request.matrix, vehicle.start, visits);
        routes.push(VehicleRoute::new(vehicle.id.clone(), Route::new(ids, duration)));
    }

    (served.len() == request.jobs.len()).then(|| Plan::new(routes, Optimality::BestEffort))
}
