//! Per-vehicle visit sequences.

/// An ordered list of job identifiers and the time needed to serve them.
///
/// The duration covers travel and service from the vehicle's start up to the
/// last job; there is no return leg.
///
/// # Examples
/// ```
/// use caravan_core::Route;
///
/// let route = Route::new(vec!["j1".into(), "j2".into()], 1800);
/// assert_eq!(route.jobs.len(), 2);
/// assert!(Route::empty().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Job identifiers in visiting order.
    pub jobs: Vec<String>,
    /// Travel plus service time along the route.
    pub duration: u64,
}

impl Route {
    /// Construct a route from an ordered job list and its duration.
    #[must_use]
    pub const fn new(jobs: Vec<String>, duration: u64) -> Self {
        Self { jobs, duration }
    }

    /// A route that visits nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    /// Whether the route visits no jobs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// A [`Route`] bound to the vehicle that drives it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleRoute {
    /// Identifier of the vehicle.
    pub vehicle_id: String,
    /// The vehicle's visit sequence.
    pub route: Route,
}

impl VehicleRoute {
    /// Bind `route` to `vehicle_id`.
    #[must_use]
    pub fn new(vehicle_id: impl Into<String>, route: Route) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            route,
        }
    }
}
