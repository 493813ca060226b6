//! Pairwise travel durations between locations.

/// Square table of travel durations indexed by location.
///
/// `matrix[i][j]` is the time to travel from location `i` to `j`. The matrix
/// is neither required to be symmetric nor to have a zero diagonal.
///
/// # Examples
/// ```
/// use caravan_core::DurationMatrix;
///
/// let matrix = DurationMatrix::new(vec![vec![0, 600], vec![550, 0]]);
/// assert_eq!(matrix.duration(0, 1), 600);
/// assert_eq!(matrix.duration(1, 0), 550);
/// assert!(matrix.is_square());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct DurationMatrix {
    rows: Vec<Vec<u64>>,
}

impl DurationMatrix {
    /// Wrap raw rows. Shape is not checked.
    #[must_use]
    pub const fn new(rows: Vec<Vec<u64>>) -> Self {
        Self { rows }
    }

    /// Number of rows (locations).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no locations at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether every row has exactly [`size`](Self::size) columns.
    #[must_use]
    pub fn is_square(&self) -> bool {
        let size = self.size();
        self.rows.iter().all(|row| row.len() == size)
    }

    /// Borrow the raw rows.
    #[must_use]
    pub const fn rows(&self) -> &[Vec<u64>] {
        self.rows.as_slice()
    }

    /// Travel duration from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics when either index is outside the matrix. Indices are checked
    /// by [`validate_request`](crate::validate_request) before solving.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "location bounds are a validated precondition of every solve"
    )]
    pub fn duration(&self, from: usize, to: usize) -> u64 {
        self.rows[from][to]
    }
}

impl From<Vec<Vec<u64>>> for DurationMatrix {
    fn from(rows: Vec<Vec<u64>>) -> Self {
        Self::new(rows)
    }
}
