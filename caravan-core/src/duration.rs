//! Duration of an ordered visit sequence.

use crate::{DurationMatrix, Job};

/// Total time to visit `jobs` in order, starting at location `start`.
///
/// Each visit adds the travel leg from the previous location plus the job's
/// service time. There is no return leg. An empty sequence costs nothing.
/// The total saturates at `u64::MAX`.
///
/// # Panics
///
/// Panics when `start` or a job location lies outside `matrix`.
///
/// # Examples
/// ```
/// use caravan_core::{DurationMatrix, Job, sequence_duration};
///
/// let matrix = DurationMatrix::new(vec![
///     vec![0, 600, 900],
///     vec![600, 0, 300],
///     vec![900, 300, 0],
/// ]);
/// let j1 = Job::new("j1", 1).with_service(300);
/// let j2 = Job::new("j2", 2).with_service(600);
///
/// assert_eq!(sequence_duration(&matrix, 0, [&j1, &j2]), 1800);
/// assert_eq!(sequence_duration(&matrix, 0, [&j2, &j1]), 2100);
/// assert_eq!(sequence_duration(&matrix, 0, Vec::<&Job>::new()), 0);
/// ```
#[must_use]
pub fn sequence_duration<'a, I>(matrix: &DurationMatrix, start: usize, jobs: I) -> u64
where
    I: IntoIterator<Item = &'a Job>,
{
    let (_, total) = jobs
        .into_iter()
        .fold((start, 0_u64), |(previous, total), job| {
            let leg = matrix.duration(previous, job.location);
            (job.location, total.saturating_add(leg).saturating_add(job.service))
        });
    total
}
