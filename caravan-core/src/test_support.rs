//! Shared fixtures for unit, behavioural and property tests.
//!
//! Gated behind the `test-support` feature (and `cfg(test)`) so solver crates
//! can reuse the same scenarios and invariant checks.

use std::collections::HashMap;

use crate::{Capacity, DurationMatrix, Job, Plan, SolveRequest, Vehicle, sequence_duration};

/// Two identical vehicles and two jobs whose optimum serves both jobs on one
/// vehicle, `j1` then `j2`, for a total of 1800.
#[must_use]
pub fn two_job_scenario() -> SolveRequest {
    SolveRequest {
        vehicles: vec![
            Vehicle::new("v1", 0).with_capacity(Capacity::Limited(100)),
            Vehicle::new("v2", 0).with_capacity(Capacity::Limited(100)),
        ],
        jobs: vec![
            Job::new("j1", 1).with_delivery(30).with_service(300),
            Job::new("j2", 2).with_delivery(40).with_service(600),
        ],
        matrix: DurationMatrix::new(vec![
            vec![0, 600, 900],
            vec![600, 0, 300],
            vec![900, 300, 0],
        ]),
        deadline: None,
    }
}

/// Two small vehicles that force a split: `vehicle_1` takes `job_1` then
/// `job_2` (1800) and `vehicle_2` takes `job_3` (1650), 3450 in total.
#[must_use]
pub fn split_fleet_scenario() -> SolveRequest {
    SolveRequest {
        vehicles: vec![
            Vehicle::new("vehicle_1", 0).with_capacity(Capacity::Limited(70)),
            Vehicle::new("vehicle_2", 0).with_capacity(Capacity::Limited(25)),
        ],
        jobs: vec![
            Job::new("job_1", 1).with_delivery(30).with_service(300),
            Job::new("job_2", 2).with_delivery(40).with_service(600),
            Job::new("job_3", 3).with_delivery(25).with_service(450),
        ],
        matrix: DurationMatrix::new(vec![
            vec![0, 600, 900, 1200],
            vec![600, 0, 300, 800],
            vec![900, 300, 0, 400],
            vec![1200, 800, 400, 0],
        ]),
        deadline: None,
    }
}

/// Three vehicles, one unbounded. The optimum puts `J1`, `J2`, `J3` on `V1`
/// for 485; `V3` ties but comes later in the fleet.
#[must_use]
pub fn mixed_fleet_scenario() -> SolveRequest {
    SolveRequest {
        vehicles: vec![
            Vehicle::new("V1", 0).with_capacity(Capacity::Limited(10)),
            Vehicle::new("V2", 0).with_capacity(Capacity::Limited(8)),
            Vehicle::new("V3", 0),
        ],
        jobs: vec![
            Job::new("J1", 1).with_delivery(5).with_service(60),
            Job::new("J2", 2).with_delivery(3).with_service(30),
            Job::new("J3", 3).with_delivery(2).with_service(45),
        ],
        matrix: DurationMatrix::new(vec![
            vec![0, 100, 200, 300],
            vec![100, 0, 150, 250],
            vec![200, 150, 0, 100],
            vec![300, 250, 100, 0],
        ]),
        deadline: None,
    }
}

/// [`two_job_scenario`] with a third job no vehicle can carry.
#[must_use]
pub fn overweight_job_scenario() -> SolveRequest {
    let mut request = two_job_scenario();
    request
        .jobs
        .push(Job::new("j3", 2).with_delivery(101).with_service(60));
    request
}

/// [`two_job_scenario`] where each job fits some vehicle but the fleet cannot
/// carry both: vehicles hold 50 and 30, the jobs need 45 each.
#[must_use]
pub fn undersized_fleet_scenario() -> SolveRequest {
    let mut request = two_job_scenario();
    for (vehicle, limit) in request.vehicles.iter_mut().zip([50, 30]) {
        vehicle.capacity = Capacity::Limited(limit);
    }
    for job in &mut request.jobs {
        job.delivery = 45;
    }
    request
}

/// Check that `plan` is a valid answer to `request`.
///
/// Verifies one route per vehicle in input order, every job assigned exactly
/// once, capacities respected, route durations matching a fresh evaluation,
/// and the total equalling the sum of routes.
///
/// # Errors
///
/// Returns a description of the first violated invariant.
pub fn check_plan(request: &SolveRequest, plan: &Plan) -> Result<(), String> {
    let vehicle_ids: Vec<&str> = request.vehicles.iter().map(|v| v.id.as_str()).collect();
    let route_ids: Vec<&str> = plan.routes.iter().map(|r| r.vehicle_id.as_str()).collect();
    if vehicle_ids != route_ids {
        return Err(format!("routes {route_ids:?} do not follow fleet {vehicle_ids:?}"));
    }

    let jobs: HashMap<&str, &Job> = request.jobs.iter().map(|job| (job.id.as_str(), job)).collect();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (vehicle, entry) in request.vehicles.iter().zip(&plan.routes) {
        let mut visits = Vec::with_capacity(entry.route.jobs.len());
        for id in &entry.route.jobs {
            let job = jobs
                .get(id.as_str())
                .ok_or_else(|| format!("route for {} visits unknown job {id}", vehicle.id))?;
            *seen.entry(job.id.as_str()).or_default() += 1;
            visits.push(*job);
        }
        if !crate::is_capacity_feasible(visits.iter().copied(), vehicle.capacity) {
            return Err(format!("vehicle {} is overloaded", vehicle.id));
        }
        let expected = sequence_duration(&request.matrix, vehicle.start, visits.iter().copied());
        if expected != entry.route.duration {
            return Err(format!(
                "vehicle {} reports {} but its route takes {expected}",
                vehicle.id, entry.route.duration
            ));
        }
    }

    if let Some(job) = request.jobs.iter().find(|job| seen.get(job.id.as_str()) != Some(&1)) {
        return Err(format!("job {} is not assigned exactly once", job.id));
    }
    let sum = plan
        .routes
        .iter()
        .fold(0_u64, |total, entry| total.saturating_add(entry.route.duration));
    if sum != plan.total_duration {
        return Err(format!("total {} differs from route sum {sum}", plan.total_duration));
    }
    Ok(())
}
