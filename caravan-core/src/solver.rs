//! The contract every solving strategy implements.

use std::time::Duration;

use thiserror::Error;

use crate::{DurationMatrix, Job, SearchBudget, Solution, Vehicle};

/// Inputs for one solve.
///
/// The request is assumed to have passed
/// [`validate_request`](crate::validate_request): a square matrix, in-range
/// location indices, and unique identifiers.
///
/// # Examples
/// ```rust
/// use std::time::Duration;
/// use caravan_core::{Capacity, DurationMatrix, Job, SolveRequest, Vehicle};
///
/// let request = SolveRequest {
///     vehicles: vec![Vehicle::new("v1", 0).with_capacity(Capacity::Limited(10))],
///     jobs: vec![Job::new("j1", 1).with_delivery(4)],
///     matrix: DurationMatrix::new(vec![vec![0, 5], vec![5, 0]]),
///     deadline: Some(Duration::from_secs(2)),
/// };
/// assert_eq!(request.jobs.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    /// Fleet, in the order routes are reported.
    pub vehicles: Vec<Vehicle>,
    /// Jobs to assign; their order fixes tie-breaking.
    pub jobs: Vec<Job>,
    /// Travel durations between locations.
    pub matrix: DurationMatrix,
    /// Optional time budget; the search may stop early once it elapses.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub deadline: Option<Duration>,
}

impl SolveRequest {
    /// Start a [`SearchBudget`] for this request's deadline.
    #[must_use]
    pub fn budget(&self) -> SearchBudget {
        SearchBudget::starting_now(self.deadline)
    }
}

/// Counters describing the work a solver performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent solving.
    pub solve_time: Duration,
    /// Complete, capacity-feasible assignments whose cost was computed.
    pub assignments_evaluated: u64,
    /// Branches abandoned for capacity or cost reasons.
    pub branches_pruned: u64,
}

/// Result of a successful solve.
///
/// Infeasible instances and expired budgets are successful solves; they are
/// reported through [`Solution`], not through [`SolveError`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResponse {
    /// The outcome.
    pub solution: Solution,
    /// Work counters for the invocation.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The request cannot be expressed for this backend.
    #[error("request not supported by this solver: {0}")]
    Unsupported(String),
    /// The backend failed while solving.
    #[error("solver backend failed: {0}")]
    Backend(String),
}

/// Alias for the solver error type.
pub type Error = SolveError;

/// Assign jobs to vehicles and order each vehicle's visits.
///
/// Every strategy, exact or approximate, implements this trait so that the
/// orchestrating layer can swap them by configuration. Solvers must be
/// `Send + Sync` to operate safely across threads.
pub trait Solver: Send + Sync {
    /// Solve a request.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] only when the backend itself fails or cannot
    /// represent the request.
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, Error>;
}
