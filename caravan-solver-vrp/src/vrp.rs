//! `vrp-core` modelling helpers for `VrpSolver`.
//!
//! This module converts a [`SolveRequest`] into a capacitated `vrp-core`
//! problem with open routes, runs the evolutionary search, and reads every
//! tour back as job identifiers in visit order.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use caravan_core::{Capacity, DurationMatrix, SolveError, SolveRequest, total_demand};
use log::debug;
use vrp_core::models::common::{Location, Profile};
use vrp_core::models::problem::{JobIdDimension, TravelTime, VehicleIdDimension};
use vrp_core::models::solution::Route as VrpRoute;
use vrp_core::prelude::*;
use vrp_core::rosomaxa::evolution::TelemetryMode;

use crate::solver::VrpSolverConfig;

#[expect(
    clippy::cast_precision_loss,
    reason = "vrp-core measures time in f64 seconds"
)]
const fn seconds(value: u64) -> f64 {
    value as f64
}

fn define_goal(transport: Arc<dyn TransportCost>) -> GenericResult<GoalContext> {
    let minimize_unassigned = MinimizeUnassignedBuilder::new("min-unassigned").build()?;
    let transport_feature = TransportFeatureBuilder::new("min-travel-time")
        .set_transport_cost(transport)
        .set_time_constrained(false)
        .build_minimize_distance()?;
    let capacity_feature = CapacityFeatureBuilder::<SingleDimLoad>::new("capacity").build()?;

    GoalContextBuilder::with_features(&[minimize_unassigned, transport_feature, capacity_feature])?
        .build()
}

/// Static delivery of `amount` with no pickup.
fn delivery(amount: i32) -> Demand<SingleDimLoad> {
    Demand {
        pickup: (SingleDimLoad::default(), SingleDimLoad::default()),
        delivery: (SingleDimLoad::new(amount), SingleDimLoad::default()),
    }
}

/// Unbounded vehicles and limits past `i32::MAX` both saturate. Total demand
/// is checked against the same bound before modelling, so saturation never
/// admits a load the real vehicle would refuse.
fn capacity_load(capacity: Capacity) -> i32 {
    capacity
        .limit()
        .map_or(i32::MAX, |limit| i32::try_from(limit).unwrap_or(i32::MAX))
}

fn define_problem(
    request: &SolveRequest,
    transport: Arc<dyn TransportCost>,
    goal: GoalContext,
) -> GenericResult<Problem> {
    let jobs = request
        .jobs
        .iter()
        .map(|job| {
            SingleBuilder::default()
                .id(job.id.as_str())
                .demand(delivery(i32::try_from(job.delivery).unwrap_or(i32::MAX)))
                .location(job.location)?
                .duration(seconds(job.service))?
                .build_as_job()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let vehicles = request
        .vehicles
        .iter()
        .map(|vehicle| {
            VehicleBuilder::default()
                .id(vehicle.id.as_str())
                .add_detail(
                    VehicleDetailBuilder::default()
                        .set_start_location(vehicle.start)
                        .set_start_time(0.0)
                        .build()?,
                )
                .capacity(SingleDimLoad::new(capacity_load(vehicle.capacity)))
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    ProblemBuilder::default()
        .add_jobs(jobs.into_iter())
        .add_vehicles(vehicles.into_iter())
        .with_goal(goal)
        .with_transport_cost(transport)
        .build()
}

struct MatrixTransportCost {
    durations: Vec<Vec<f64>>,
}

impl MatrixTransportCost {
    fn new(matrix: &DurationMatrix) -> Self {
        let durations = matrix
            .rows()
            .iter()
            .map(|row| row.iter().copied().map(seconds).collect())
            .collect();
        Self { durations }
    }

    fn lookup(&self, from: Location, to: Location) -> f64 {
        let result = self
            .durations
            .get(from)
            .and_then(|row| row.get(to))
            .copied();
        debug_assert!(result.is_some(), "matrix lookup failed: from={from}, to={to}");
        result.unwrap_or(0.0)
    }
}

impl TransportCost for MatrixTransportCost {
    // The matrix already holds travel time, so distance and duration coincide
    // and neither depends on the route or departure time.
    fn distance(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> Cost {
        self.lookup(from, to)
    }

    fn duration(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> f64 {
        self.lookup(from, to)
    }

    fn distance_approx(&self, profile: &Profile, from: usize, to: usize) -> f64 {
        self.duration_approx(profile, from, to)
    }

    fn duration_approx(&self, _profile: &Profile, from: usize, to: usize) -> f64 {
        self.lookup(from, to)
    }
}

/// Tours read back from a `vrp-core` solution.
#[derive(Debug, Default)]
pub(super) struct Tours {
    /// Job identifiers in visit order, keyed by vehicle identifier. Vehicles
    /// left unused have no entry.
    pub(super) routes: HashMap<String, Vec<String>>,
    /// Number of jobs the search could not place.
    pub(super) unassigned: usize,
}

/// Search time limit in whole seconds, rounded up and never zero.
fn time_limit(deadline: Duration) -> usize {
    let whole = deadline.as_secs() + u64::from(deadline.subsec_nanos() > 0);
    usize::try_from(whole.max(1)).unwrap_or(usize::MAX)
}

fn backend(err: impl std::fmt::Display) -> SolveError {
    SolveError::Backend(err.to_string())
}

/// Context for running a `vrp-core` solve.
pub(super) struct VrpSolveContext<'a> {
    config: &'a VrpSolverConfig,
}

impl<'a> VrpSolveContext<'a> {
    /// Create a new solve context.
    pub(super) const fn new(config: &'a VrpSolverConfig) -> Self {
        Self { config }
    }

    /// Solve `request` and return the tours found.
    ///
    /// Fails with [`SolveError::Unsupported`] when total demand does not fit
    /// `vrp-core`'s 32-bit loads, and with [`SolveError::Backend`] when
    /// `vrp-core` rejects the model.
    pub(super) fn solve(&self, request: &SolveRequest) -> Result<Tours, SolveError> {
        let demand = total_demand(&request.jobs);
        if i32::try_from(demand).is_err() {
            return Err(SolveError::Unsupported(format!(
                "total demand {demand} exceeds the vrp backend limit of {}",
                i32::MAX
            )));
        }

        let transport = Arc::new(MatrixTransportCost::new(&request.matrix));
        let goal = define_goal(transport.clone()).map_err(backend)?;
        let problem = Arc::new(define_problem(request, transport, goal).map_err(backend)?);

        let vrp_config = VrpConfigBuilder::new(problem.clone())
            .set_telemetry_mode(TelemetryMode::None)
            .prebuild()
            .map_err(backend)?
            .with_max_generations(Some(self.config.max_generations))
            .with_max_time(request.deadline.map(time_limit))
            .build()
            .map_err(backend)?;

        let solution = vrp_core::solver::Solver::new(problem, vrp_config)
            .solve()
            .map_err(backend)?;

        let routes = solution
            .routes
            .iter()
            .filter_map(|route| {
                let vehicle_id = route.actor.vehicle.dimens.get_vehicle_id()?.clone();
                let jobs = route
                    .tour
                    .all_activities()
                    .filter_map(|activity| activity.job.as_ref())
                    .filter_map(|single| single.dimens.get_job_id().cloned())
                    .collect();
                Some((vehicle_id, jobs))
            })
            .collect();
        debug!(
            "vrp search finished: cost={} unassigned={}",
            solution.cost,
            solution.unassigned.len()
        );

        Ok(Tours {
            routes,
            unassigned: solution.unassigned.len(),
        })
    }
}
