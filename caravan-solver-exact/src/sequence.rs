//! Optimal visiting order for a fixed job subset.

use caravan_core::{DurationMatrix, Job, Route, SearchBudget, sequence_duration};

/// Permutations evaluated between budget polls.
const POLL_INTERVAL: u64 = 1024;

/// Best ordering of a subset, as positions into the slice that was sequenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Ordering {
    pub(crate) positions: Vec<usize>,
    pub(crate) duration: u64,
    /// False when the budget ran out before every permutation was tried; the
    /// ordering is then only the best of those seen.
    pub(crate) complete: bool,
}

/// Find the cheapest ordering of `jobs` starting from `start`.
///
/// Every permutation is evaluated, in lexicographic order of positions.
/// Only a strictly cheaper ordering replaces the current best, so the first
/// optimum encountered wins. `budget` is polled every [`POLL_INTERVAL`]
/// permutations.
pub(crate) fn best_ordering(
    matrix: &DurationMatrix,
    start: usize,
    jobs: &[&Job],
    budget: &SearchBudget,
) -> Ordering {
    let cost = |positions: &[usize]| {
        sequence_duration(
            matrix,
            start,
            positions.iter().filter_map(|&position| jobs.get(position).copied()),
        )
    };

    let mut positions: Vec<usize> = (0..jobs.len()).collect();
    let mut best = Ordering {
        duration: cost(&positions),
        positions: positions.clone(),
        complete: true,
    };
    let mut until_poll = POLL_INTERVAL;
    while next_permutation(&mut positions) {
        until_poll -= 1;
        if until_poll == 0 {
            if budget.is_exhausted() {
                best.complete = false;
                break;
            }
            until_poll = POLL_INTERVAL;
        }
        let duration = cost(&positions);
        if duration < best.duration {
            best.duration = duration;
            best.positions.clone_from(&positions);
        }
    }
    best
}

/// Rearrange `items` into the next lexicographic permutation.
///
/// Returns `false`, leaving `items` untouched, once the last permutation has
/// been reached.
fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    let Some(pivot) = items
        .windows(2)
        .rposition(|pair| matches!(pair, [lhs, rhs] if lhs < rhs))
    else {
        return false;
    };
    let Some(successor) = items
        .get(pivot)
        .and_then(|value| items.iter().rposition(|item| item > value))
    else {
        return false;
    };
    items.swap(pivot, successor);
    if let Some(tail) = items.get_mut(pivot + 1..) {
        tail.reverse();
    }
    true
}

/// Order `jobs` for a vehicle starting at `start` with minimum duration.
///
/// Ties go to the ordering that comes first lexicographically by position in
/// `jobs`. An empty slice yields an empty route of duration zero. The search
/// is factorial in `jobs.len()`.
///
/// # Panics
///
/// Panics when `start` or a job location lies outside `matrix`.
///
/// # Examples
/// ```
/// use caravan_core::{DurationMatrix, Job};
/// use caravan_solver_exact::sequence_route;
///
/// let matrix = DurationMatrix::new(vec![
///     vec![0, 600, 900],
///     vec![600, 0, 300],
///     vec![900, 300, 0],
/// ]);
/// let j1 = Job::new("j1", 1).with_service(300);
/// let j2 = Job::new("j2", 2).with_service(600);
///
/// let route = sequence_route(&matrix, 0, &[&j2, &j1]);
/// assert_eq!(route.jobs, vec!["j1".to_owned(), "j2".to_owned()]);
/// assert_eq!(route.duration, 1800);
/// ```
#[must_use]
pub fn sequence_route(matrix: &DurationMatrix, start: usize, jobs: &[&Job]) -> Route {
    let ordering = best_ordering(matrix, start, jobs, &SearchBudget::unlimited());
    let ids = ordering
        .positions
        .iter()
        .filter_map(|&position| jobs.get(position))
        .map(|job| job.id.clone())
        .collect();
    Route::new(ids, ordering.duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn matrix() -> DurationMatrix {
        DurationMatrix::new(vec![
            vec![0, 600, 900],
            vec![600, 0, 300],
            vec![900, 300, 0],
        ])
    }

    #[rstest]
    fn permutations_follow_lexicographic_order() {
        let mut items = [0, 1, 2];
        let mut seen = vec![items.to_vec()];
        while next_permutation(&mut items) {
            seen.push(items.to_vec());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[rstest]
    #[case(&[])]
    #[case(&[7])]
    fn trivial_slices_have_one_permutation(#[case] items: &[u8]) {
        let mut copy = items.to_vec();
        assert!(!next_permutation(&mut copy));
        assert_eq!(copy, items);
    }

    #[rstest]
    fn empty_subset_costs_nothing(matrix: DurationMatrix) {
        let route = sequence_route(&matrix, 0, &[]);
        assert!(route.is_empty());
        assert_eq!(route.duration, 0);
    }

    #[rstest]
    fn first_optimum_wins_ties() {
        let matrix = DurationMatrix::new(vec![vec![0, 5, 5], vec![5, 0, 5], vec![5, 5, 0]]);
        let a = Job::new("a", 1);
        let b = Job::new("b", 2);
        let ordering = best_ordering(&matrix, 0, &[&b, &a], &SearchBudget::unlimited());
        assert_eq!(ordering.positions, vec![0, 1]);
        assert_eq!(ordering.duration, 10);
        assert!(ordering.complete);
    }

    #[rstest]
    fn expired_budget_stops_long_orderings() {
        let size = 9;
        let matrix = DurationMatrix::new(vec![vec![1; size + 1]; size + 1]);
        let jobs: Vec<Job> = (1..=size)
            .map(|location| Job::new(format!("j{location}"), location))
            .collect();
        let refs: Vec<&Job> = jobs.iter().collect();
        let budget = SearchBudget::starting_now(Some(std::time::Duration::ZERO));

        let ordering = best_ordering(&matrix, 0, &refs, &budget);
        assert!(!ordering.complete);
        assert_eq!(ordering.positions.len(), size);
    }

    #[rstest]
    fn short_orderings_finish_despite_expired_budget(matrix: DurationMatrix) {
        let j1 = Job::new("j1", 1).with_service(300);
        let j2 = Job::new("j2", 2).with_service(600);
        let budget = SearchBudget::starting_now(Some(std::time::Duration::ZERO));

        let ordering = best_ordering(&matrix, 0, &[&j2, &j1], &budget);
        assert!(ordering.complete);
        assert_eq!(ordering.duration, 1800);
    }

    #[rstest]
    fn service_time_counts_once_per_job(matrix: DurationMatrix) {
        let j1 = Job::new("j1", 1).with_service(300);
        let route = sequence_route(&matrix, 0, &[&j1]);
        assert_eq!(route.duration, 900);
    }

    #[rstest]
    fn asymmetric_legs_pick_cheaper_direction() {
        let matrix = DurationMatrix::new(vec![vec![0, 10, 1], vec![1, 0, 50], vec![1, 1, 0]]);
        let a = Job::new("a", 1);
        let b = Job::new("b", 2);
        let route = sequence_route(&matrix, 0, &[&a, &b]);
        assert_eq!(route.jobs, vec!["b".to_owned(), "a".to_owned()]);
        assert_eq!(route.duration, 2);
    }
}
