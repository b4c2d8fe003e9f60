//! Percentile bounds of a tier over a masked temporal-mean subset.

use ndarray::ArrayView2;

use aeolus_stats::{quantile_linear, sorted};

use crate::spec::TierSpec;

/// How cells outside the polygon (or with an all-missing mean) enter the
/// percentile sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskPolicy {
    /// Substitute `0.0` for outside and all-missing cells, keeping every
    /// cell of the bounding-rectangle subset in the sample.
    ///
    /// Zero-filled cells deflate the sample and pull percentile bounds
    /// downward when the polygon covers only part of its bounding
    /// rectangle. Capacity factors are non-negative, so strict band
    /// selection still never picks a zero-filled cell itself.
    ZeroFillOutsidePolygon,
    /// Sample only the finite means of cells inside the polygon.
    ExcludeOutsidePolygon,
}

/// Numeric band of a tier: quantile values of the percentile sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierBound {
    /// Value at the tier's lower quantile level.
    pub lower: f64,
    /// Value at the tier's upper quantile level.
    pub upper: f64,
}

/// Compute a tier's numeric band from a temporal-mean subset and its
/// polygon mask.
///
/// `mean_subset` and `mask` cover the same bounding-rectangle window of the
/// grid. Returns `None` when the policy leaves an empty sample, which the
/// caller treats as "every tier empty".
pub fn compute_bound(
    mean_subset: ArrayView2<'_, f64>,
    mask: ArrayView2<'_, bool>,
    spec: &TierSpec,
    policy: MaskPolicy,
) -> Option<TierBound> {
    let sample: Vec<f64> = match policy {
        MaskPolicy::ZeroFillOutsidePolygon => mean_subset
            .iter()
            .zip(mask.iter())
            .map(|(&m, &inside)| if inside && m.is_finite() { m } else { 0.0 })
            .collect(),
        MaskPolicy::ExcludeOutsidePolygon => mean_subset
            .iter()
            .zip(mask.iter())
            .filter(|(m, &inside)| inside && m.is_finite())
            .map(|(&m, _)| m)
            .collect(),
    };
    if sample.is_empty() {
        return None;
    }

    let sample = sorted(&sample);
    Some(TierBound {
        lower: quantile_linear(&sample, spec.lower_quantile()),
        upper: quantile_linear(&sample, spec.upper_quantile()),
    })
}
