//! Tests for the `ExactSolver`.

use std::time::Duration;

use super::*;
use caravan_core::test_support::{
    check_plan, mixed_fleet_scenario, overweight_job_scenario, split_fleet_scenario,
    two_job_scenario, undersized_fleet_scenario,
};
use caravan_core::{Capacity, DurationMatrix, Job, Vehicle};
use rstest::rstest;

fn solve(request: &SolveRequest) -> SolveResponse {
    ExactSolver::new()
        .solve(request)
        .expect("exact solver does not fail on valid input")
}

#[rstest]
fn two_job_scenario_serves_both_jobs_on_first_vehicle() {
    let request = two_job_scenario();
    let response = solve(&request);
    let plan = response.solution.plan().expect("scenario is feasible");
    assert_eq!(plan.total_duration, 1800);
    assert_eq!(plan.optimality, Optimality::Proven);
    assert_eq!(
        plan.route("v1"),
        Some(&Route::new(vec!["j1".into(), "j2".into()], 1800))
    );
    assert_eq!(plan.route("v2"), Some(&Route::empty()));
    assert_eq!(check_plan(&request, plan), Ok(()));
}

#[rstest]
fn small_vehicles_force_a_split() {
    let request = split_fleet_scenario();
    let response = solve(&request);
    let plan = response.solution.plan().expect("scenario is feasible");
    assert_eq!(plan.total_duration, 3450);
    assert_eq!(
        plan.route("vehicle_1"),
        Some(&Route::new(vec!["job_1".into(), "job_2".into()], 1800))
    );
    assert_eq!(
        plan.route("vehicle_2"),
        Some(&Route::new(vec!["job_3".into()], 1650))
    );
}

#[rstest]
fn ties_between_vehicles_keep_the_earlier_one() {
    let request = mixed_fleet_scenario();
    let response = solve(&request);
    let plan = response.solution.plan().expect("scenario is feasible");
    assert_eq!(plan.total_duration, 485);
    assert_eq!(
        plan.route("V1").map(|route| route.jobs.clone()),
        Some(vec!["J1".to_owned(), "J2".to_owned(), "J3".to_owned()])
    );
    assert_eq!(plan.route("V3"), Some(&Route::empty()));
}

#[rstest]
#[case::overweight_job(overweight_job_scenario())]
#[case::undersized_fleet(undersized_fleet_scenario())]
fn infeasible_requests_are_marked(#[case] request: SolveRequest) {
    let response = solve(&request);
    assert_eq!(
        response.solution,
        Solution::Infeasible(Infeasibility::Proven)
    );
}

#[rstest]
fn infeasibility_found_by_search_is_proven() {
    // Each job fits a vehicle and total capacity covers demand, yet no split
    // works: 6 + 6 cannot be packed into 7 + 5.
    let mut request = two_job_scenario();
    request.vehicles = vec![
        Vehicle::new("v1", 0).with_capacity(Capacity::Limited(7)),
        Vehicle::new("v2", 0).with_capacity(Capacity::Limited(5)),
    ];
    for job in &mut request.jobs {
        job.delivery = 6;
    }
    let response = solve(&request);
    assert_eq!(
        response.solution,
        Solution::Infeasible(Infeasibility::Proven)
    );
    assert_eq!(response.diagnostics.assignments_evaluated, 0);
    assert!(response.diagnostics.branches_pruned > 0);
}

#[rstest]
fn zero_jobs_return_idle_fleet() {
    let mut request = two_job_scenario();
    request.jobs.clear();
    let response = solve(&request);
    let plan = response.solution.plan().expect("no jobs is trivially feasible");
    assert_eq!(plan.total_duration, 0);
    assert_eq!(plan.optimality, Optimality::Proven);
    assert!(plan.routes.iter().all(|entry| entry.route.is_empty()));
    assert_eq!(plan.routes.len(), 2);
}

#[rstest]
fn zero_jobs_without_vehicles_is_feasible() {
    let request = SolveRequest {
        matrix: DurationMatrix::new(vec![vec![0]]),
        ..SolveRequest::default()
    };
    let response = solve(&request);
    assert_eq!(response.solution.total_duration(), Some(0));
}

#[rstest]
fn jobs_without_vehicles_are_infeasible() {
    let mut request = two_job_scenario();
    request.vehicles.clear();
    let response = solve(&request);
    assert_eq!(
        response.solution,
        Solution::Infeasible(Infeasibility::Proven)
    );
}

#[rstest]
fn expired_deadline_is_undetermined() {
    let mut request = split_fleet_scenario();
    request.deadline = Some(Duration::ZERO);
    let response = solve(&request);
    assert_eq!(
        response.solution,
        Solution::Infeasible(Infeasibility::Undetermined)
    );
    assert!(response.solution.is_best_effort());
}

#[rstest]
fn budget_expiring_after_an_incumbent_returns_best_effort_plan() {
    // Two polls reach the first complete assignment (both jobs on v1); the
    // third, before the next branch, finds the budget spent.
    let request = two_job_scenario();
    let budget = SearchBudget::unlimited().with_poll_limit(2);
    let response = ExactSolver::new().solve_within(&request, &budget);

    let plan = response.solution.plan().expect("an incumbent was found");
    assert_eq!(plan.optimality, Optimality::BestEffort);
    assert_eq!(plan.total_duration, 1800);
    assert_eq!(check_plan(&request, plan), Ok(()));
    assert!(response.solution.is_best_effort());
    assert_eq!(response.diagnostics.assignments_evaluated, 1);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(5)]
fn every_interrupted_plan_is_valid(#[case] polls: u64) {
    let request = split_fleet_scenario();
    let budget = SearchBudget::unlimited().with_poll_limit(polls);
    let response = ExactSolver::new().solve_within(&request, &budget);
    if let Some(plan) = response.solution.plan() {
        assert_eq!(plan.optimality, Optimality::BestEffort);
        assert_eq!(check_plan(&request, plan), Ok(()));
    } else {
        assert_eq!(
            response.solution,
            Solution::Infeasible(Infeasibility::Undetermined)
        );
    }
}

#[rstest]
fn deadline_interrupts_long_route_sequencing() {
    // The first candidate puts all ten jobs on one vehicle, which alone has
    // 10! orderings to try.
    let size = 10;
    let request = SolveRequest {
        vehicles: vec![Vehicle::new("v1", 0), Vehicle::new("v2", 0)],
        jobs: (1..=size)
            .map(|location| Job::new(format!("j{location}"), location).with_service(5))
            .collect(),
        matrix: DurationMatrix::new(vec![vec![7; size + 1]; size + 1]),
        deadline: Some(Duration::from_millis(50)),
    };

    let started_at = std::time::Instant::now();
    let response = solve(&request);
    assert!(
        started_at.elapsed() < Duration::from_secs(1),
        "search overran its deadline: {:?}",
        started_at.elapsed()
    );
    assert!(response.solution.is_best_effort());
    if let Some(plan) = response.solution.plan() {
        assert_eq!(check_plan(&request, plan), Ok(()));
    }
}

#[rstest]
fn huge_service_times_saturate_instead_of_overflowing() {
    let request = SolveRequest {
        vehicles: vec![Vehicle::new("v1", 0)],
        jobs: vec![
            Job::new("slow", 1).with_service(u64::MAX),
            Job::new("quick", 1).with_service(1),
        ],
        matrix: DurationMatrix::new(vec![vec![0, 3], vec![3, 0]]),
        deadline: None,
    };
    let response = solve(&request);
    let plan = response.solution.plan().expect("one unbounded vehicle serves all");
    assert_eq!(plan.total_duration, u64::MAX);
    assert_eq!(plan.optimality, Optimality::Proven);
    assert_eq!(check_plan(&request, plan), Ok(()));
}

#[rstest]
fn cancelled_search_stops() {
    let flag = CancelFlag::default();
    flag.cancel();
    let solver = ExactSolver::new().with_cancel_flag(flag);
    let response = solver
        .solve(&two_job_scenario())
        .expect("cancellation is not an error");
    assert_eq!(
        response.solution,
        Solution::Infeasible(Infeasibility::Undetermined)
    );
}

#[rstest]
fn generous_deadline_is_still_proven() {
    let mut request = split_fleet_scenario();
    request.deadline = Some(Duration::from_secs(3600));
    let response = solve(&request);
    assert!(!response.solution.is_best_effort());
    assert_eq!(response.solution.total_duration(), Some(3450));
}

#[rstest]
#[case(ExactSolverConfig { cache_routes: true })]
#[case(ExactSolverConfig { cache_routes: false })]
fn cache_setting_does_not_change_plan(#[case] config: ExactSolverConfig) {
    let request = mixed_fleet_scenario();
    let baseline = solve(&request).solution;
    let response = ExactSolver::with_config(config)
        .solve(&request)
        .expect("exact solver does not fail on valid input");
    assert_eq!(response.solution, baseline);
}

#[rstest]
fn job_exceeding_one_vehicle_goes_to_the_other() {
    let mut request = two_job_scenario();
    request.vehicles = vec![
        Vehicle::new("small", 0).with_capacity(Capacity::Limited(10)),
        Vehicle::new("large", 0).with_capacity(Capacity::Limited(100)),
    ];
    request
        .jobs
        .push(Job::new("j3", 1).with_delivery(5).with_service(10));
    let response = solve(&request);
    let plan = response.solution.plan().expect("large vehicle can carry all");
    assert_eq!(check_plan(&request, plan), Ok(()));
    assert!(
        plan.route("small")
            .is_some_and(|route| route.jobs.iter().all(|id| id == "j3"))
    );
}

#[rstest]
fn unbounded_vehicle_disables_total_capacity_check() {
    let mut request = undersized_fleet_scenario();
    request.vehicles.push(Vehicle::new("spare", 0));
    let response = solve(&request);
    assert!(response.solution.is_feasible());
}
