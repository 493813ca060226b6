//! Results of a solve.
//!
//! A [`Solution`] is either a complete [`Plan`] covering every job or an
//! explicit infeasibility marker. An infeasible outcome never carries routes,
//! so it cannot be mistaken for the zero-duration plan of an empty job list.

use crate::{Route, VehicleRoute};

/// How much confidence a plan carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Optimality {
    /// The search space was exhausted; no cheaper plan exists.
    Proven,
    /// The search stopped early; the plan is the best found so far.
    BestEffort,
}

/// Why no plan was returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Infeasibility {
    /// No assignment satisfies every capacity.
    Proven,
    /// The search stopped before finding any feasible assignment.
    Undetermined,
}

/// A complete assignment of every job to a vehicle.
///
/// Routes are listed in the order vehicles were supplied, one per vehicle,
/// including vehicles with an empty route.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    /// One route per input vehicle.
    pub routes: Vec<VehicleRoute>,
    /// Sum of all route durations.
    pub total_duration: u64,
    /// Whether the plan is proven optimal.
    pub optimality: Optimality,
}

impl Plan {
    /// Build a plan, deriving the total from the routes. The total saturates
    /// at `u64::MAX`.
    #[must_use]
    pub fn new(routes: Vec<VehicleRoute>, optimality: Optimality) -> Self {
        let total_duration = routes
            .iter()
            .fold(0_u64, |total, entry| total.saturating_add(entry.route.duration));
        Self {
            routes,
            total_duration,
            optimality,
        }
    }

    /// Look up the route driven by `vehicle_id`.
    #[must_use]
    pub fn route(&self, vehicle_id: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|entry| entry.vehicle_id == vehicle_id)
            .map(|entry| &entry.route)
    }
}

/// Outcome of a solve.
///
/// # Examples
/// ```
/// use caravan_core::{Infeasibility, Optimality, Plan, Route, Solution, VehicleRoute};
///
/// let plan = Plan::new(vec![VehicleRoute::new("v1", Route::empty())], Optimality::Proven);
/// let solution = Solution::Feasible(plan);
/// assert!(solution.is_feasible());
/// assert_eq!(solution.total_duration(), Some(0));
///
/// let none = Solution::Infeasible(Infeasibility::Proven);
/// assert!(!none.is_feasible());
/// assert_eq!(none.total_duration(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "status", content = "detail", rename_all = "snake_case")
)]
pub enum Solution {
    /// Every job is assigned and every capacity respected.
    Feasible(Plan),
    /// No plan is available.
    Infeasible(Infeasibility),
}

impl Solution {
    /// Whether a plan is present.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }

    /// Whether the search stopped before it could prove its answer.
    #[must_use]
    pub const fn is_best_effort(&self) -> bool {
        matches!(
            self,
            Self::Feasible(Plan {
                optimality: Optimality::BestEffort,
                ..
            }) | Self::Infeasible(Infeasibility::Undetermined)
        )
    }

    /// The plan, if any.
    #[must_use]
    pub const fn plan(&self) -> Option<&Plan> {
        match self {
            Self::Feasible(plan) => Some(plan),
            Self::Infeasible(_) => None,
        }
    }

    /// Total duration of the plan, if any.
    #[must_use]
    pub fn total_duration(&self) -> Option<u64> {
        self.plan().map(|plan| plan.total_duration)
    }
}
