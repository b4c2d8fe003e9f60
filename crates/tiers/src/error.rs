//! Error types for the aeolus-tiers crate.

/// Error type for all fallible operations in the aeolus-tiers crate.
///
/// Configuration-level variants (`InvalidPercentRange`, `InvalidTierIndex`,
/// `InvalidScale`, `InvalidPercent`) are fatal for a run and surface before
/// any computation. `AllMissing` is fatal only for the geometry that
/// selected the offending cell; batch processing continues past it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TierError {
    /// Returned when a tier percent range is non-finite or outside 0..=100.
    #[error("invalid percent range ({lower}, {upper}): values must be finite and within 0..=100")]
    InvalidPercentRange {
        /// Lower value of the pair as supplied.
        lower: f64,
        /// Upper value of the pair as supplied.
        upper: f64,
    },

    /// Returned when a tier index is zero.
    #[error("invalid tier index {index}: indices start at 1")]
    InvalidTierIndex {
        /// The offending index.
        index: usize,
    },

    /// Returned when the scaling constant is non-positive or non-finite.
    #[error("invalid maximum capacity {maximum_capacity}: must be positive and finite")]
    InvalidScale {
        /// The offending maximum-capacity value.
        maximum_capacity: f64,
    },

    /// Returned when a top-percent selection percentage is non-finite or
    /// outside 0..=100.
    #[error("invalid percentage {percent}: must be finite and within 0..=100")]
    InvalidPercent {
        /// The offending percentage.
        percent: f64,
    },

    /// Returned when a selected point cell contains only missing data.
    #[error("cell at (lat {lat}, lon {lon}) contains only missing data")]
    AllMissing {
        /// Latitude of the cell center.
        lat: f64,
        /// Longitude of the cell center.
        lon: f64,
    },

    /// Returned when no grid cell has a finite temporal mean, so no
    /// selection threshold can be derived.
    #[error("grid contains no cells with a finite mean capacity factor")]
    NoUsableCells,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_percent_range() {
        let e = TierError::InvalidPercentRange {
            lower: -5.0,
            upper: 110.0,
        };
        assert_eq!(
            e.to_string(),
            "invalid percent range (-5, 110): values must be finite and within 0..=100"
        );
    }

    #[test]
    fn error_invalid_tier_index() {
        let e = TierError::InvalidTierIndex { index: 0 };
        assert_eq!(e.to_string(), "invalid tier index 0: indices start at 1");
    }

    #[test]
    fn error_invalid_scale() {
        let e = TierError::InvalidScale {
            maximum_capacity: 0.0,
        };
        assert_eq!(
            e.to_string(),
            "invalid maximum capacity 0: must be positive and finite"
        );
    }

    #[test]
    fn error_all_missing() {
        let e = TierError::AllMissing {
            lat: -31.0,
            lon: 27.0,
        };
        assert_eq!(
            e.to_string(),
            "cell at (lat -31, lon 27) contains only missing data"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<TierError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<TierError>();
    }
}
