//! JSON document printed by `caravan solve`.
//!
//! ```json
//! {
//!   "feasible": true,
//!   "optimal": true,
//!   "total_delivery_duration": 1800,
//!   "routes": {
//!     "v1": { "jobs": ["j1", "j2"], "delivery_duration": 1800 },
//!     "v2": { "jobs": [], "delivery_duration": 0 }
//!   },
//!   "diagnostics": { "solve_time_ms": 0, "assignments_evaluated": 4, "branches_pruned": 0 }
//! }
//! ```
//!
//! Routes keep the input vehicle order. Infeasible outcomes print
//! `"feasible": false`, a null total, no routes, and an `infeasibility` of
//! `"proven"` or `"undetermined"`.

use caravan_core::{Diagnostics, Infeasibility, Optimality, Solution, SolveResponse, VehicleRoute};
use serde::{Serialize, Serializer};

#[derive(Debug, Serialize)]
pub(crate) struct SolveOutput<'a> {
    feasible: bool,
    optimal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    infeasibility: Option<Infeasibility>,
    total_delivery_duration: Option<u64>,
    routes: RoutesOutput<'a>,
    diagnostics: DiagnosticsOutput,
}

impl<'a> SolveOutput<'a> {
    pub(crate) fn new(response: &'a SolveResponse) -> Self {
        let diagnostics = DiagnosticsOutput::from(response.diagnostics);
        match &response.solution {
            Solution::Feasible(plan) => Self {
                feasible: true,
                optimal: plan.optimality == Optimality::Proven,
                infeasibility: None,
                total_delivery_duration: Some(plan.total_duration),
                routes: RoutesOutput(&plan.routes),
                diagnostics,
            },
            Solution::Infeasible(reason) => Self {
                feasible: false,
                optimal: false,
                infeasibility: Some(*reason),
                total_delivery_duration: None,
                routes: RoutesOutput(&[]),
                diagnostics,
            },
        }
    }
}

/// Routes as an object keyed by vehicle id, in input vehicle order.
#[derive(Debug)]
struct RoutesOutput<'a>(&'a [VehicleRoute]);

impl Serialize for RoutesOutput<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|entry| {
            (
                entry.vehicle_id.as_str(),
                RouteOutput {
                    jobs: &entry.route.jobs,
                    delivery_duration: entry.route.duration,
                },
            )
        }))
    }
}

#[derive(Debug, Serialize)]
struct RouteOutput<'a> {
    jobs: &'a [String],
    delivery_duration: u64,
}

#[derive(Debug, Serialize)]
struct DiagnosticsOutput {
    solve_time_ms: u64,
    assignments_evaluated: u64,
    branches_pruned: u64,
}

impl From<Diagnostics> for DiagnosticsOutput {
    fn from(diagnostics: Diagnostics) -> Self {
        Self {
            solve_time_ms: u64::try_from(diagnostics.solve_time.as_millis()).unwrap_or(u64::MAX),
            assignments_evaluated: diagnostics.assignments_evaluated,
            branches_pruned: diagnostics.branches_pruned,
        }
    }
}
