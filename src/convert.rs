//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use aeolus_io::GridReaderConfig;
use aeolus_tiers::{MaskPolicy, TierSpec};

use crate::config::{IoToml, ScalingToml, TiersToml};

/// Parses a mask policy name string into the corresponding enum variant.
pub fn parse_mask_policy(s: &str) -> Result<MaskPolicy> {
    match s.to_lowercase().as_str() {
        "zero_fill" => Ok(MaskPolicy::ZeroFillOutsidePolygon),
        "exclude" => Ok(MaskPolicy::ExcludeOutsidePolygon),
        other => bail!("unknown mask policy: {other:?} (expected zero_fill or exclude)"),
    }
}

/// Builds a [`GridReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> GridReaderConfig {
    GridReaderConfig::default()
        .with_data_var(&io.data_var)
        .with_time_var(&io.time_var)
        .with_lat_aliases(io.lat_aliases.clone())
        .with_lon_aliases(io.lon_aliases.clone())
}

/// Builds the ordered tier specifications from the TOML tier configuration.
pub fn build_tier_specs(tiers: &TiersToml) -> Result<Vec<TierSpec>> {
    if tiers.percent_ranges.is_empty() {
        bail!("no tiers configured: set [tiers].percent_ranges");
    }
    tiers
        .percent_ranges
        .iter()
        .enumerate()
        .map(|(i, &[a, b])| {
            TierSpec::new(i + 1, a, b).with_context(|| format!("tier {} is invalid", i + 1))
        })
        .collect()
}

/// Validate the scaling section before any computation runs.
pub fn validate_scaling(scaling: &ScalingToml) -> Result<()> {
    if scaling.scale_output
        && (!scaling.maximum_capacity.is_finite() || scaling.maximum_capacity <= 0.0)
    {
        bail!(
            "maximum_capacity must be positive and finite, got {}",
            scaling.maximum_capacity
        );
    }
    Ok(())
}
