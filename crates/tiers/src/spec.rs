//! Tier specifications: a labelled percent range.

use crate::error::TierError;

/// A single tier definition: a 1-based index and a top-percent range.
///
/// The percent pair `(10, 20)` reads "the cells between the top 10 % and
/// the top 20 % of the temporal-mean distribution". The pair is normalized
/// at construction so `(20, 10)` defines the same tier; downstream code can
/// rely on `min_percent <= max_percent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierSpec {
    index: usize,
    min_percent: f64,
    max_percent: f64,
}

impl TierSpec {
    /// Create a tier spec, normalizing the percent pair.
    ///
    /// # Errors
    ///
    /// Returns [`TierError::InvalidTierIndex`] when `index` is zero and
    /// [`TierError::InvalidPercentRange`] when either percent is non-finite
    /// or outside `0..=100`.
    pub fn new(index: usize, percent_a: f64, percent_b: f64) -> Result<Self, TierError> {
        if index == 0 {
            return Err(TierError::InvalidTierIndex { index });
        }
        for p in [percent_a, percent_b] {
            if !p.is_finite() || !(0.0..=100.0).contains(&p) {
                return Err(TierError::InvalidPercentRange {
                    lower: percent_a,
                    upper: percent_b,
                });
            }
        }
        Ok(Self {
            index,
            min_percent: percent_a.min(percent_b),
            max_percent: percent_a.max(percent_b),
        })
    }

    /// The 1-based tier index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The smaller percent of the normalized pair.
    pub fn min_percent(&self) -> f64 {
        self.min_percent
    }

    /// The larger percent of the normalized pair.
    pub fn max_percent(&self) -> f64 {
        self.max_percent
    }

    /// Quantile level of the band's lower numeric bound.
    ///
    /// The top `max_percent` % of the distribution starts at the
    /// `1 - max_percent / 100` quantile.
    pub fn lower_quantile(&self) -> f64 {
        1.0 - self.max_percent / 100.0
    }

    /// Quantile level of the band's upper numeric bound.
    pub fn upper_quantile(&self) -> f64 {
        1.0 - self.min_percent / 100.0
    }

    /// Column label for this tier, e.g. `tier_1`.
    pub fn label(&self) -> String {
        format!("tier_{}", self.index)
    }
}
