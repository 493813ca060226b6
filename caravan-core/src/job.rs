//! Delivery jobs.

/// A delivery task at a single location.
///
/// `location` indexes into the [`DurationMatrix`](crate::DurationMatrix).
/// `delivery` is the load the job consumes from a vehicle's capacity and
/// `service` is the time spent on site, both defaulting to zero.
///
/// # Examples
/// ```
/// use caravan_core::Job;
///
/// let job = Job::new("j1", 1).with_delivery(30).with_service(300);
/// assert_eq!(job.location, 1);
/// assert_eq!(job.delivery, 30);
/// assert_eq!(job.service, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Job {
    /// Unique, stable identifier.
    pub id: String,
    /// Location index into the duration matrix.
    #[cfg_attr(feature = "serde", serde(rename = "location_index", alias = "loc"))]
    pub location: usize,
    /// Delivery demand counted against vehicle capacity.
    #[cfg_attr(feature = "serde", serde(default))]
    pub delivery: u64,
    /// Service duration spent at the job's location.
    #[cfg_attr(feature = "serde", serde(default))]
    pub service: u64,
}

impl Job {
    /// Construct a job with zero demand and zero service time.
    #[must_use]
    pub fn new(id: impl Into<String>, location: usize) -> Self {
        Self {
            id: id.into(),
            location,
            delivery: 0,
            service: 0,
        }
    }

    /// Set the delivery demand.
    #[must_use]
    pub const fn with_delivery(mut self, delivery: u64) -> Self {
        self.delivery = delivery;
        self
    }

    /// Set the service duration.
    #[must_use]
    pub const fn with_service(mut self, service: u64) -> Self {
        self.service = service;
        self
    }
}
