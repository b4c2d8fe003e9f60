use anyhow::{Context, Result};
use tracing::{info, warn};

use aeolus_io::{read_grid, write_cell_locations, write_tier_table};
use aeolus_tiers::top_percent_table;

use crate::cli::TopPercentArgs;
use crate::convert;
use crate::generate::{load_config, resolve_output_dir};

/// Select the top percent of grid cells and write their series and
/// locations.
pub fn run(args: TopPercentArgs) -> Result<()> {
    let config = load_config(&args.config)?;

    let grid_path = args
        .grid
        .or(config.io.grid.clone())
        .ok_or_else(|| anyhow::anyhow!("no grid path: set [io].grid in config or use --grid"))?;
    let output_dir = resolve_output_dir(args.output, &config)?;
    let percent = args.percent.unwrap_or(config.top_percent.percent);

    let reader_cfg = convert::build_reader_config(&config.io);
    convert::validate_scaling(&config.scaling)?;

    info!(path = %grid_path.display(), "reading capacity-factor grid");
    let grid = read_grid(&grid_path, &reader_cfg)
        .with_context(|| format!("failed to read grid: {}", grid_path.display()))?;

    let selection = top_percent_table(&grid, percent)
        .with_context(|| format!("top-percent selection failed at {percent} %"))?;
    info!(
        percent,
        n_selected = selection.cells.len(),
        "top-percent selection complete"
    );

    match selection.table {
        Some(mut table) => {
            if config.scaling.scale_output {
                table
                    .scale(config.scaling.maximum_capacity)
                    .context("scaling failed")?;
            }
            let path = output_dir.join("top_percent_tiers.csv");
            write_tier_table(&path, grid.times(), &table)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => warn!(percent, "no cell strictly exceeds the selection threshold"),
    }

    let location_path = output_dir.join("top_percent_locations.csv");
    write_cell_locations(&location_path, &selection.cells)
        .with_context(|| format!("failed to write {}", location_path.display()))?;

    Ok(())
}
