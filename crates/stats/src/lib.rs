//! Statistical helper functions for aeolus tier generation.

/// Mean over the finite entries of a slice, skipping NaN.
///
/// Returns NaN when no entry is finite, so all-missing cells stay marked
/// as missing rather than silently becoming zero.
pub fn nan_mean(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &x in data {
        if x.is_nan() {
            continue;
        }
        sum += x;
        count += 1;
    }
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Linear-interpolation quantile (matching NumPy's default `percentile`
/// method and R's type 7).
///
/// **Expects pre-sorted input** (caller's responsibility). `p` is a
/// fraction in `[0, 1]`.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_linear(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_linear: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Sort a copy of `data` ascending, tolerating NaN by treating incomparable
/// pairs as equal.
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut out = data.to_vec();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    out
}
