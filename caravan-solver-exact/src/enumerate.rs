//! Candidate job subsets for one vehicle.
//!
//! Subsets are produced by an include/exclude walk over the remaining jobs
//! in input order, trying "include" first. Demand only grows along an include
//! chain, so a job that would overflow the vehicle cuts every superset of the
//! current choice at once.

use std::ops::ControlFlow;

use caravan_core::{Capacity, Job};

/// Include-first walk over the capacity-feasible subsets of `remaining`.
pub(crate) struct SubsetWalk<'a> {
    jobs: &'a [Job],
    remaining: &'a [usize],
    capacity: Capacity,
    chosen: Vec<usize>,
    rest: Vec<usize>,
    load: u128,
    pruned: u64,
}

impl<'a> SubsetWalk<'a> {
    /// Prepare a walk over `remaining`, a list of indices into `jobs`.
    pub(crate) fn new(jobs: &'a [Job], remaining: &'a [usize], capacity: Capacity) -> Self {
        Self {
            jobs,
            remaining,
            capacity,
            chosen: Vec::with_capacity(remaining.len()),
            rest: Vec::with_capacity(remaining.len()),
            load: 0,
            pruned: 0,
        }
    }

    /// Call `visit(chosen, rest)` for each feasible subset until it breaks.
    ///
    /// Both slices keep the input order of `remaining`.
    pub(crate) fn try_for_each<B, F>(&mut self, mut visit: F) -> ControlFlow<B>
    where
        F: FnMut(&[usize], &[usize]) -> ControlFlow<B>,
    {
        self.walk(0, &mut visit)
    }

    /// Include branches cut because the vehicle would overflow.
    pub(crate) const fn pruned(&self) -> u64 {
        self.pruned
    }

    fn walk<B, F>(&mut self, position: usize, visit: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&[usize], &[usize]) -> ControlFlow<B>,
    {
        let Some(&job_index) = self.remaining.get(position) else {
            return visit(&self.chosen, &self.rest);
        };
        let demand = self
            .jobs
            .get(job_index)
            .map_or(0, |job| u128::from(job.delivery));

        let previous = self.load;
        let load = previous + demand;
        if self.capacity.admits(load) {
            self.chosen.push(job_index);
            self.load = load;
            let flow = self.walk(position + 1, visit);
            self.chosen.pop();
            self.load = previous;
            flow?;
        } else {
            self.pruned += 1;
        }

        self.rest.push(job_index);
        let flow = self.walk(position + 1, visit);
        self.rest.pop();
        flow
    }
}
