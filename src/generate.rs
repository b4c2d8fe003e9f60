use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use aeolus_io::{read_geometries, read_grid, write_geometry_records, write_tier_table};
use aeolus_tiers::{GeometryRecord, GeometryVerdict, TierError, process_geometry};

use crate::cli::GenerateArgs;
use crate::config::AeolusConfig;
use crate::convert;

/// Run tier generation for every geometry in the configured GeoJSON file.
pub fn run(args: GenerateArgs) -> Result<()> {
    let config = load_config(&args.config)?;

    // Step 1: Resolve paths
    let grid_path = args
        .grid
        .or(config.io.grid.clone())
        .ok_or_else(|| anyhow::anyhow!("no grid path: set [io].grid in config or use --grid"))?;
    let geometry_path = args.geometries.or(config.io.geometries.clone()).ok_or_else(|| {
        anyhow::anyhow!("no geometry path: set [io].geometries in config or use --geometries")
    })?;
    let output_dir = resolve_output_dir(args.output, &config)?;

    // Step 2: Build configs from TOML; configuration errors abort before
    // any computation.
    let reader_cfg = convert::build_reader_config(&config.io);
    let specs = convert::build_tier_specs(&config.tiers)?;
    let policy = convert::parse_mask_policy(&config.tiers.mask_policy)?;
    convert::validate_scaling(&config.scaling)?;

    // Step 3: Read inputs
    info!(path = %grid_path.display(), "reading capacity-factor grid");
    let grid = read_grid(&grid_path, &reader_cfg)
        .with_context(|| format!("failed to read grid: {}", grid_path.display()))?;

    let features = read_geometries(&geometry_path)
        .with_context(|| format!("failed to read geometries: {}", geometry_path.display()))?;
    info!(n_geometries = features.len(), "geometries loaded");

    // Step 4: Process each geometry; per-geometry failures are recorded
    // and skipped, never fatal for the batch.
    let mut records = Vec::with_capacity(features.len());
    for feature in &features {
        let Some(geometry) = &feature.geometry else {
            warn!(
                label = %feature.label,
                kind = %feature.kind_tag,
                "unsupported geometry kind, no tier generated"
            );
            records.push(GeometryRecord {
                label: feature.label.clone(),
                kind: feature.kind_tag.clone(),
                coordinates: String::new(),
                verdict: GeometryVerdict::Outside,
            });
            continue;
        };

        match process_geometry(&grid, geometry, &feature.label, &specs, policy) {
            Ok(outcome) => {
                for tier in &outcome.empty_tiers {
                    warn!(label = %feature.label, tier, "tier matched no cells");
                }
                if let Some(mut table) = outcome.table {
                    if config.scaling.scale_output {
                        table
                            .scale(config.scaling.maximum_capacity)
                            .context("scaling failed")?;
                    }
                    let path = output_dir.join(format!("tiers_{}.csv", feature.label));
                    write_tier_table(&path, grid.times(), &table)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                } else {
                    info!(label = %feature.label, "no populated tiers");
                }
                records.push(outcome.record);
            }
            Err(e @ TierError::AllMissing { .. }) => {
                warn!(label = %feature.label, error = %e, "skipping geometry");
                records.push(GeometryRecord {
                    label: feature.label.clone(),
                    kind: geometry.kind().to_string(),
                    coordinates: geometry.to_string(),
                    verdict: GeometryVerdict::Inside,
                });
            }
            Err(e) => return Err(e).context(format!("tier generation failed for {}", feature.label)),
        }
    }

    // Step 5: Write the geometry reference table
    let record_path = output_dir.join("geometries.csv");
    write_geometry_records(&record_path, &records)
        .with_context(|| format!("failed to write {}", record_path.display()))?;

    Ok(())
}

/// Load and parse the TOML configuration file.
pub fn load_config(path: &Path) -> Result<AeolusConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Resolve and create the output directory.
pub fn resolve_output_dir(override_dir: Option<PathBuf>, config: &AeolusConfig) -> Result<PathBuf> {
    let dir = override_dir
        .or(config.io.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    Ok(dir)
}
