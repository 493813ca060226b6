//! Backtracking search over vehicles with branch-and-bound.

use std::collections::HashMap;
use std::ops::ControlFlow;

use caravan_core::{
    Capacity, Job, Optimality, Plan, Route, SearchBudget, SolveRequest, VehicleRoute, total_demand,
};
use log::debug;

use crate::enumerate::SubsetWalk;
use crate::sequence::best_ordering;

/// A sequenced route for one vehicle, as job indices in visiting order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Leg {
    jobs: Vec<usize>,
    duration: u64,
}

#[derive(Debug)]
struct Incumbent {
    total: u64,
    legs: Vec<Leg>,
}

/// How a search ended.
#[derive(Debug)]
pub(crate) struct SearchOutcome {
    /// Cheapest complete assignment found, if any.
    pub(crate) plan: Option<Plan>,
    /// Whether the budget ran out before the space was exhausted.
    pub(crate) expired: bool,
    /// Complete assignments whose cost was computed.
    pub(crate) evaluated: u64,
    /// Branches cut by capacity or cost.
    pub(crate) pruned: u64,
}

/// Depth-first search state for one invocation.
pub(crate) struct Search<'a> {
    request: &'a SolveRequest,
    budget: &'a SearchBudget,
    /// Bounded capacity still available from each vehicle onwards, `None`
    /// once an unbounded vehicle appears in the suffix.
    suffix_capacity: Vec<Option<u128>>,
    cache: Option<HashMap<(usize, Vec<usize>), Leg>>,
    best: Option<Incumbent>,
    evaluated: u64,
    pruned: u64,
}

impl<'a> Search<'a> {
    /// Prepare a search. The request must have at least one vehicle.
    pub(crate) fn new(
        request: &'a SolveRequest,
        budget: &'a SearchBudget,
        cache_routes: bool,
    ) -> Self {
        let mut suffix_capacity = vec![Some(0_u128); request.vehicles.len() + 1];
        for (index, vehicle) in request.vehicles.iter().enumerate().rev() {
            let after = suffix_capacity.get(index + 1).copied().flatten();
            let here = match vehicle.capacity {
                Capacity::Unbounded => None,
                Capacity::Limited(limit) => after.map(|sum| sum + u128::from(limit)),
            };
            if let Some(slot) = suffix_capacity.get_mut(index) {
                *slot = here;
            }
        }
        Self {
            request,
            budget,
            suffix_capacity,
            cache: cache_routes.then(HashMap::new),
            best: None,
            evaluated: 0,
            pruned: 0,
        }
    }

    /// Explore every assignment of the request's jobs.
    pub(crate) fn run(mut self) -> SearchOutcome {
        let remaining: Vec<usize> = (0..self.request.jobs.len()).collect();
        let mut partial = Vec::with_capacity(self.request.vehicles.len());
        let expired = self.descend(0, &remaining, &mut partial, 0).is_break();

        let optimality = if expired {
            Optimality::BestEffort
        } else {
            Optimality::Proven
        };
        let plan = self.best.take().map(|best| self.plan(best, optimality));
        SearchOutcome {
            plan,
            expired,
            evaluated: self.evaluated,
            pruned: self.pruned,
        }
    }

    fn descend(
        &mut self,
        vehicle: usize,
        remaining: &[usize],
        partial: &mut Vec<Leg>,
        partial_total: u64,
    ) -> ControlFlow<()> {
        if self.budget.is_exhausted() {
            return ControlFlow::Break(());
        }
        let request = self.request;
        let Some(current) = request.vehicles.get(vehicle) else {
            return ControlFlow::Continue(());
        };

        if vehicle + 1 == request.vehicles.len() {
            let demand = total_demand(remaining.iter().filter_map(|&index| request.jobs.get(index)));
            if !current.capacity.admits(demand) {
                self.pruned += 1;
                return ControlFlow::Continue(());
            }
            let Some(leg) = self.sequence(current.start, remaining) else {
                return ControlFlow::Break(());
            };
            let total = partial_total.saturating_add(leg.duration);
            self.evaluated += 1;
            partial.push(leg);
            self.consider(total, partial);
            partial.pop();
            return ControlFlow::Continue(());
        }

        let later_capacity = self.suffix_capacity.get(vehicle + 1).copied().flatten();
        let mut walk = SubsetWalk::new(&request.jobs, remaining, current.capacity);
        let flow = walk.try_for_each(|chosen, rest| {
            if let Some(limit) = later_capacity {
                let leftover = total_demand(rest.iter().filter_map(|&index| request.jobs.get(index)));
                if leftover > limit {
                    self.pruned += 1;
                    return ControlFlow::Continue(());
                }
            }
            let Some(leg) = self.sequence(current.start, chosen) else {
                return ControlFlow::Break(());
            };
            let total = partial_total.saturating_add(leg.duration);
            if self.best.as_ref().is_some_and(|best| total >= best.total) {
                self.pruned += 1;
                return ControlFlow::Continue(());
            }
            partial.push(leg);
            let step = self.descend(vehicle + 1, rest, partial, total);
            partial.pop();
            step
        });
        self.pruned += walk.pruned();
        flow
    }

    /// Sequence `subset` from `start`, or `None` when the budget ran out
    /// before every ordering was tried.
    fn sequence(&mut self, start: usize, subset: &[usize]) -> Option<Leg> {
        if subset.is_empty() {
            return Some(Leg {
                jobs: Vec::new(),
                duration: 0,
            });
        }
        let key = (start, subset.to_vec());
        if let Some(leg) = self.cache.as_ref().and_then(|cache| cache.get(&key)) {
            return Some(leg.clone());
        }

        let jobs: Vec<&Job> = subset
            .iter()
            .filter_map(|&index| self.request.jobs.get(index))
            .collect();
        let ordering = best_ordering(&self.request.matrix, start, &jobs, self.budget);
        if !ordering.complete {
            return None;
        }
        let leg = Leg {
            jobs: ordering
                .positions
                .iter()
                .filter_map(|&position| subset.get(position).copied())
                .collect(),
            duration: ordering.duration,
        };
        if let Some(cache) = self.cache.as_mut() {
            cache.insert(key, leg.clone());
        }
        Some(leg)
    }

    fn consider(&mut self, total: u64, legs: &[Leg]) {
        if self.best.as_ref().is_some_and(|best| total >= best.total) {
            return;
        }
        debug!(
            "exact search improved incumbent to {total} after {} assignments",
            self.evaluated
        );
        self.best = Some(Incumbent {
            total,
            legs: legs.to_vec(),
        });
    }

    fn plan(&self, best: Incumbent, optimality: Optimality) -> Plan {
        let routes = self
            .request
            .vehicles
            .iter()
            .zip(best.legs)
            .map(|(vehicle, leg)| {
                let ids = leg
                    .jobs
                    .iter()
                    .filter_map(|&index| self.request.jobs.get(index))
                    .map(|job| job.id.clone())
                    .collect();
                VehicleRoute::new(vehicle.id.clone(), Route::new(ids, leg.duration))
            })
            .collect();
        Plan::new(routes, optimality)
    }
}
