//! Per-dimension box bounds.

use crate::error::{ConfigError, OutOfBoundsError};
use rand::Rng;

/// Closed interval `[low, high]` for every dimension of the search space.
///
/// Validated once at construction and immutable afterwards.
///
/// # Examples
///
/// ```
/// use u_realga::ga::Bounds;
///
/// let bounds = Bounds::new(vec![(-5.0, 5.0), (0.0, 1.0)]).unwrap();
/// assert_eq!(bounds.dimension(), 2);
/// assert!((bounds.span(0) - 10.0).abs() < 1e-12);
///
/// assert!(Bounds::new(vec![(1.0, 1.0)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>"))]
pub struct Bounds {
    ranges: Vec<(f64, f64)>,
}

impl Bounds {
    /// Creates bounds from `(low, high)` pairs.
    ///
    /// Fails with [`ConfigError::EmptyBounds`] for zero dimensions and with
    /// [`ConfigError::InvalidBounds`] when `low >= high`, an endpoint is
    /// not finite, or the width `high - low` overflows.
    pub fn new(ranges: Vec<(f64, f64)>) -> Result<Self, ConfigError> {
        if ranges.is_empty() {
            return Err(ConfigError::EmptyBounds);
        }
        for (index, &(low, high)) in ranges.iter().enumerate() {
            if !low.is_finite() || !high.is_finite() || low >= high || !(high - low).is_finite() {
                return Err(ConfigError::InvalidBounds { index, low, high });
            }
        }
        Ok(Self { ranges })
    }

    /// Same interval repeated for `dimension` dimensions.
    pub fn uniform(low: f64, high: f64, dimension: usize) -> Result<Self, ConfigError> {
        Self::new(vec![(low, high); dimension])
    }

    /// Number of dimensions.
    pub fn dimension(&self) -> usize {
        self.ranges.len()
    }

    pub fn low(&self, i: usize) -> f64 {
        self.ranges[i].0
    }

    pub fn high(&self, i: usize) -> f64 {
        self.ranges[i].1
    }

    /// Width of dimension `i`: `high - low`.
    pub fn span(&self, i: usize) -> f64 {
        self.ranges[i].1 - self.ranges[i].0
    }

    /// The `(low, high)` pairs.
    pub fn ranges(&self) -> &[(f64, f64)] {
        &self.ranges
    }

    /// Clamps `x` into dimension `i`.
    pub fn clamp(&self, i: usize, x: f64) -> f64 {
        x.clamp(self.ranges[i].0, self.ranges[i].1)
    }

    /// Clamps every gene into its interval.
    pub fn clamp_in_place(&self, genes: &mut [f64]) {
        for (x, &(low, high)) in genes.iter_mut().zip(&self.ranges) {
            *x = x.clamp(low, high);
        }
    }

    /// Index of the first gene outside its interval, if any.
    ///
    /// NaN genes count as violations.
    pub fn first_violation(&self, genes: &[f64]) -> Option<usize> {
        genes
            .iter()
            .zip(&self.ranges)
            .position(|(&x, &(low, high))| !(low..=high).contains(&x))
    }

    /// Whether `genes` has the right length and lies inside the box.
    pub fn contains(&self, genes: &[f64]) -> bool {
        genes.len() == self.dimension() && self.first_violation(genes).is_none()
    }

    /// Checks `genes` against the box, reporting the first violation.
    pub fn check(&self, genes: &[f64]) -> Result<(), OutOfBoundsError> {
        match self.first_violation(genes) {
            None => Ok(()),
            Some(index) => Err(OutOfBoundsError {
                genome: genes.to_vec(),
                index,
                value: genes[index],
                low: self.ranges[index].0,
                high: self.ranges[index].1,
            }),
        }
    }

    /// Draws a genome uniformly from the box.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.ranges
            .iter()
            .map(|&(low, high)| rng.random_range(low..=high))
            .collect()
    }
}

impl TryFrom<Vec<(f64, f64)>> for Bounds {
    type Error = ConfigError;

    fn try_from(ranges: Vec<(f64, f64)>) -> Result<Self, Self::Error> {
        Self::new(ranges)
    }
}

impl From<Bounds> for Vec<(f64, f64)> {
    fn from(bounds: Bounds) -> Self {
        bounds.ranges
    }
}
