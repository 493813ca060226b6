//! Capacity feasibility of a job subset.

use crate::{Capacity, Job, Vehicle};

/// Sum of the delivery demand of `jobs`, widened so it cannot overflow.
#[must_use]
pub fn total_demand<'a, I>(jobs: I) -> u128
where
    I: IntoIterator<Item = &'a Job>,
{
    jobs.into_iter().map(|job| u128::from(job.delivery)).sum()
}

/// Whether `jobs` fit within `capacity`.
///
/// Unbounded vehicles accept any set, including the empty one, without
/// summing demand.
///
/// # Examples
/// ```
/// use caravan_core::{Capacity, Job, is_capacity_feasible};
///
/// let jobs = [
///     Job::new("j1", 1).with_delivery(30),
///     Job::new("j2", 2).with_delivery(40),
/// ];
/// assert!(is_capacity_feasible(&jobs, Capacity::Limited(70)));
/// assert!(!is_capacity_feasible(&jobs, Capacity::Limited(69)));
/// assert!(is_capacity_feasible(&jobs, Capacity::Unbounded));
/// ```
#[must_use]
pub fn is_capacity_feasible<'a, I>(jobs: I, capacity: Capacity) -> bool
where
    I: IntoIterator<Item = &'a Job>,
{
    match capacity {
        Capacity::Unbounded => true,
        Capacity::Limited(_) => capacity.admits(total_demand(jobs)),
    }
}

/// Whether capacity alone rules out every assignment of `jobs` to `vehicles`.
///
/// True when some job outweighs every vehicle, or when the fleet is entirely
/// bounded and its combined capacity is below total demand. A `false` answer
/// does not imply feasibility.
///
/// # Examples
/// ```
/// use caravan_core::{Capacity, Job, Vehicle, is_fleet_undersized};
///
/// let jobs = [Job::new("j1", 1).with_delivery(45), Job::new("j2", 2).with_delivery(45)];
/// let fleet = [
///     Vehicle::new("v1", 0).with_capacity(Capacity::Limited(50)),
///     Vehicle::new("v2", 0).with_capacity(Capacity::Limited(30)),
/// ];
/// assert!(is_fleet_undersized(&fleet, &jobs));
/// ```
#[must_use]
pub fn is_fleet_undersized(vehicles: &[Vehicle], jobs: &[Job]) -> bool {
    let oversized = jobs.iter().any(|job| {
        vehicles
            .iter()
            .all(|vehicle| !vehicle.capacity.admits(u128::from(job.delivery)))
    });
    if oversized {
        return true;
    }
    let fleet: Option<u128> = vehicles
        .iter()
        .map(|vehicle| vehicle.capacity.limit().map(u128::from))
        .sum();
    fleet.is_some_and(|capacity| total_demand(jobs) > capacity)
}
