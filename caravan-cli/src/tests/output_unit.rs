//! Unit tests for the printed JSON document.

use std::time::Duration;

use crate::output::SolveOutput;
use caravan_core::{
    Diagnostics, Infeasibility, Optimality, Plan, Route, Solution, SolveResponse, VehicleRoute,
};
use rstest::rstest;
use serde_json::{Value, json};

fn respond(solution: Solution) -> SolveResponse {
    SolveResponse {
        solution,
        diagnostics: Diagnostics {
            solve_time: Duration::from_millis(12),
            assignments_evaluated: 4,
            branches_pruned: 1,
        },
    }
}

fn render(solution: Solution) -> Value {
    serde_json::to_value(SolveOutput::new(&respond(solution))).expect("output serialises")
}

#[rstest]
fn feasible_plan_lists_routes_in_vehicle_order() {
    let plan = Plan::new(
        vec![
            VehicleRoute::new("v2", Route::new(vec!["j1".into(), "j2".into()], 1800)),
            VehicleRoute::new("v1", Route::empty()),
        ],
        Optimality::Proven,
    );
    let response = respond(Solution::Feasible(plan));
    let text = serde_json::to_string(&SolveOutput::new(&response)).expect("output serialises");
    assert!(text.find("\"v2\"") < text.find("\"v1\""));

    let value: Value = serde_json::from_str(&text).expect("output is JSON");
    assert_eq!(
        value,
        json!({
            "feasible": true,
            "optimal": true,
            "total_delivery_duration": 1800,
            "routes": {
                "v2": { "jobs": ["j1", "j2"], "delivery_duration": 1800 },
                "v1": { "jobs": [], "delivery_duration": 0 },
            },
            "diagnostics": {
                "solve_time_ms": 12,
                "assignments_evaluated": 4,
                "branches_pruned": 1,
            },
        })
    );
}

#[rstest]
fn best_effort_plan_is_not_optimal() {
    let plan = Plan::new(
        vec![VehicleRoute::new("v1", Route::new(vec!["j1".into()], 600))],
        Optimality::BestEffort,
    );
    let value = render(Solution::Feasible(plan));
    assert_eq!(value["feasible"], json!(true));
    assert_eq!(value["optimal"], json!(false));
    assert!(value.get("infeasibility").is_none());
}

#[rstest]
#[case(Infeasibility::Proven, "proven")]
#[case(Infeasibility::Undetermined, "undetermined")]
fn infeasible_outcome_has_no_routes(#[case] reason: Infeasibility, #[case] label: &str) {
    let value = render(Solution::Infeasible(reason));
    assert_eq!(value["feasible"], json!(false));
    assert_eq!(value["optimal"], json!(false));
    assert_eq!(value["infeasibility"], json!(label));
    assert_eq!(value["total_delivery_duration"], Value::Null);
    assert_eq!(value["routes"], json!({}));
}
