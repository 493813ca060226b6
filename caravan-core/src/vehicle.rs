//! Vehicles and their load limits.

/// Load limit of a vehicle.
///
/// The two cases are explicit so that an unlimited vehicle never relies on a
/// large number standing in for infinity. When (de)serialised the value maps
/// to an optional integer: `null` or an absent field means unbounded.
///
/// # Examples
/// ```
/// use caravan_core::Capacity;
///
/// assert!(Capacity::Limited(10).admits(10));
/// assert!(!Capacity::Limited(10).admits(11));
/// assert!(Capacity::Unbounded.admits(u128::MAX));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Option<u64>", into = "Option<u64>")
)]
pub enum Capacity {
    /// No load limit.
    #[default]
    Unbounded,
    /// At most this much total delivery demand.
    Limited(u64),
}

impl Capacity {
    /// Whether a total load of `demand` fits.
    ///
    /// Loads are summed as `u128` (see [`total_demand`](crate::total_demand))
    /// so no sum of `u64` demands can wrap past a limit.
    #[must_use]
    pub fn admits(self, demand: u128) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Limited(limit) => demand <= u128::from(limit),
        }
    }

    /// The numeric limit, if any.
    #[must_use]
    pub const fn limit(self) -> Option<u64> {
        match self {
            Self::Unbounded => None,
            Self::Limited(limit) => Some(limit),
        }
    }
}

impl From<Option<u64>> for Capacity {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::Unbounded, Self::Limited)
    }
}

impl From<Capacity> for Option<u64> {
    fn from(value: Capacity) -> Self {
        value.limit()
    }
}

/// A vehicle that starts at a fixed location and does not return.
///
/// # Examples
/// ```
/// use caravan_core::{Capacity, Vehicle};
///
/// let vehicle = Vehicle::new("v1", 0).with_capacity(Capacity::Limited(100));
/// assert_eq!(vehicle.capacity.limit(), Some(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    /// Unique identifier.
    pub id: String,
    /// Start location index into the duration matrix.
    #[cfg_attr(feature = "serde", serde(rename = "start_index", alias = "start"))]
    pub start: usize,
    /// Load limit; unbounded when omitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub capacity: Capacity,
}

impl Vehicle {
    /// Construct an unbounded vehicle.
    #[must_use]
    pub fn new(id: impl Into<String>, start: usize) -> Self {
        Self {
            id: id.into(),
            start,
            capacity: Capacity::Unbounded,
        }
    }

    /// Set the load limit.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }
}
