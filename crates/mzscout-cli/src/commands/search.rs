use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::output;
use crate::utils::peaks;
use crate::utils::progress::CliProgressHandler;
use mzscout::core::chem::blocks::{BuildingBlockTable, Metal};
use mzscout::core::chem::coarseness::CoarsenessLevel;
use mzscout::engine::config::{AnnotationConfigBuilder, LevelSelection};
use mzscout::engine::progress::ProgressReporter;
use mzscout::workflows::annotate;
use tracing::info;

pub fn run(cli: &Cli) -> Result<()> {
    let table = load_table(cli)?;

    let levels = if cli.scan_all {
        LevelSelection::All
    } else {
        let level = CoarsenessLevel::try_from(cli.coarseness)
            .map_err(|e| CliError::Argument(e.to_string()))?;
        LevelSelection::Single(level)
    };

    let config = AnnotationConfigBuilder::new()
        .ppm_tolerance(cli.ppm)
        .levels(levels)
        .mode(cli.mode.into())
        .max_hits_per_adduct(cli.max_hits)
        .apply_cluster_filter(!cli.no_filter)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let annotations = if let Some(path) = &cli.peaks_file {
        let peak_list = peaks::read_peak_list(path)?;
        info!(
            "Annotating {} peak(s) from '{}'...",
            peak_list.len(),
            path.display()
        );
        annotate::annotate_peaks(&table, &peak_list, &config, &reporter)?
    } else {
        let mz = cli.peak_mz.ok_or_else(|| {
            CliError::Argument("a peak m/z value or --peaks-file is required".to_string())
        })?;
        info!("Annotating peak at m/z {}...", mz);
        annotate::annotate_peak(&table, mz, &config, &reporter)?
    };

    if annotations.is_empty() {
        println!("No matches found.");
        return Ok(());
    }

    info!("Found {} matching formula(s).", annotations.len());
    output::print_results(&annotations, cli.scan_all);
    Ok(())
}

fn load_table(cli: &Cli) -> Result<BuildingBlockTable> {
    match &cli.table {
        Some(path) => {
            info!("Loading building-block table from '{}'...", path.display());
            Ok(BuildingBlockTable::load(path)?)
        }
        None => {
            let metal = Metal::from(cli.metal);
            info!("Using built-in {}-based cluster table.", metal);
            Ok(BuildingBlockTable::for_metal(metal))
        }
    }
}
