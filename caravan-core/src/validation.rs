//! Shape checks run before a request reaches any solver.
//!
//! Solvers assume a square matrix, in-range indices and unique identifiers.
//! [`validate_request`] establishes those preconditions once, at the boundary.

use std::collections::HashSet;

use thiserror::Error;

use crate::SolveRequest;

/// Reasons a [`SolveRequest`] is rejected before solving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveRequestValidationError {
    /// The fleet is empty.
    #[error("at least one vehicle is required")]
    NoVehicles,
    /// The duration matrix has no rows.
    #[error("duration matrix must not be empty")]
    EmptyMatrix,
    /// A matrix row has the wrong number of columns.
    #[error("duration matrix must be square: row {row} has {len} columns, expected {expected}")]
    NonSquareMatrix {
        /// Index of the first offending row.
        row: usize,
        /// Number of columns in that row.
        len: usize,
        /// Required number of columns.
        expected: usize,
    },
    /// A vehicle start or job location falls outside the matrix.
    #[error("location index {max_index} is out of range for a matrix of size {size}")]
    LocationOutOfRange {
        /// Largest location index referenced by the request.
        max_index: usize,
        /// Number of locations in the matrix.
        size: usize,
    },
    /// Two vehicles share an identifier.
    #[error("duplicate vehicle id `{0}`")]
    DuplicateVehicleId(String),
    /// Two jobs share an identifier.
    #[error("duplicate job id `{0}`")]
    DuplicateJobId(String),
}

/// Check the shape of `request`.
///
/// Checks run in a fixed order and the first failure is returned: fleet,
/// matrix emptiness, squareness, index bounds, then identifier uniqueness.
/// An empty job list is valid.
///
/// # Errors
///
/// Returns the first [`SolveRequestValidationError`] encountered.
///
/// # Examples
/// ```
/// use caravan_core::{
///     DurationMatrix, Job, SolveRequest, SolveRequestValidationError, Vehicle, validate_request,
/// };
///
/// let mut request = SolveRequest {
///     vehicles: vec![Vehicle::new("v1", 0)],
///     jobs: vec![Job::new("j1", 1)],
///     matrix: DurationMatrix::new(vec![vec![0, 5], vec![5, 0]]),
///     deadline: None,
/// };
/// assert!(validate_request(&request).is_ok());
///
/// request.jobs.push(Job::new("j2", 2));
/// assert_eq!(
///     validate_request(&request),
///     Err(SolveRequestValidationError::LocationOutOfRange { max_index: 2, size: 2 }),
/// );
/// ```
pub fn validate_request(request: &SolveRequest) -> Result<(), SolveRequestValidationError> {
    if request.vehicles.is_empty() {
        return Err(SolveRequestValidationError::NoVehicles);
    }
    let matrix = &request.matrix;
    if matrix.is_empty() {
        return Err(SolveRequestValidationError::EmptyMatrix);
    }
    let size = matrix.size();
    if let Some((row, cols)) = matrix
        .rows()
        .iter()
        .enumerate()
        .find(|(_, cols)| cols.len() != size)
    {
        return Err(SolveRequestValidationError::NonSquareMatrix {
            row,
            len: cols.len(),
            expected: size,
        });
    }

    let max_index = request
        .vehicles
        .iter()
        .map(|vehicle| vehicle.start)
        .chain(request.jobs.iter().map(|job| job.location))
        .max()
        .unwrap_or_default();
    if max_index >= size {
        return Err(SolveRequestValidationError::LocationOutOfRange { max_index, size });
    }

    if let Some(id) = first_duplicate(request.vehicles.iter().map(|vehicle| vehicle.id.as_str())) {
        return Err(SolveRequestValidationError::DuplicateVehicleId(id.to_owned()));
    }
    if let Some(id) = first_duplicate(request.jobs.iter().map(|job| job.id.as_str())) {
        return Err(SolveRequestValidationError::DuplicateJobId(id.to_owned()));
    }
    Ok(())
}

fn first_duplicate<'a>(mut ids: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    ids.find(|id| !seen.insert(*id))
}
