use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::{debug, error, info, warn, LevelFilter};
use particle_snapshots::{
    decode_all, export_snapshot, list_data_files, read_particles, step_label, OutputFormat, ParticleSnapshot,
    SnapshotSummary, SnapshotToolConfig,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Command-line arguments for the snapshot tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Snapshot file or directory of snapshot files (defaults to input.data_dir from the config)
    input: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: json, bincode, messagepack or csv (overrides the config)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Directory for exported snapshots (overrides the config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Only log per-snapshot summaries, do not export
    #[arg(long)]
    summary_only: bool,

    /// Hide the progress bar during batch decoding
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    run_with_args(args)
}

fn run_with_args(args: Args) -> Result<()> {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting particle snapshot tool...");

    let config = match &args.config {
        Some(path) => {
            let config = SnapshotToolConfig::load(path)?;
            info!("Loaded configuration from {}", path.display());
            config
        }
        None => {
            info!("No config file given, using defaults.");
            SnapshotToolConfig::default()
        }
    };
    debug!("Configuration: {:#?}", config);

    let input = args.input.clone().unwrap_or_else(|| config.input.data_dir.clone());
    let format = args.format.unwrap_or(config.output.format);
    let output_dir = args.output_dir.clone().unwrap_or_else(|| config.output.output_dir.clone());
    let show_progress = config.output.progress && !args.no_progress;

    let start_time = Instant::now();
    let paths = if input.is_dir() {
        let grid_files = list_data_files(&input, &config.input.grid_extension)
            .with_context(|| format!("Failed to list grid files in {}", input.display()))?;
        if !grid_files.is_empty() {
            info!("{} grid files present alongside snapshots (not decoded).", grid_files.len());
        }
        list_data_files(&input, &config.input.extension)
            .with_context(|| format!("Failed to list snapshot files in {}", input.display()))?
    } else {
        vec![input.clone()]
    };

    if paths.is_empty() {
        warn!("No '.{}' snapshot files found in {}. Exiting.", config.input.extension, input.display());
        return Ok(());
    }

    let entries = if paths.len() == 1 {
        let result = read_particles(&paths[0]);
        vec![particle_snapshots::BatchEntry { path: paths[0].clone(), result }]
    } else {
        decode_all(&paths, show_progress)
    };

    let mut failures = 0;
    for entry in &entries {
        match &entry.result {
            Ok(snapshot) => {
                log_summary(&entry.path, snapshot);
                if !args.summary_only {
                    let base_name = export_name(&entry.path, snapshot);
                    if let Err(e) = export_snapshot(snapshot, &output_dir, &base_name, format) {
                        error!("Error exporting {}: {:#}", entry.path.display(), e);
                        failures += 1;
                    }
                }
            }
            Err(e) => {
                error!("Error decoding {}: {}", entry.path.display(), e);
                failures += 1;
            }
        }
    }

    let duration = start_time.elapsed();
    info!(
        "Processed {} snapshot files in {:.3} seconds ({} failed).",
        entries.len(),
        duration.as_secs_f64(),
        failures
    );

    if failures > 0 {
        anyhow::bail!("{} of {} snapshot files could not be processed.", failures, entries.len());
    }
    Ok(())
}

fn log_summary(path: &Path, snapshot: &ParticleSnapshot) {
    let summary = SnapshotSummary::from_snapshot(snapshot);
    info!("{}:", path.display());
    info!("  Step: {} | Time: {} | Particles: {}", summary.step, summary.time, summary.particle_count);
    if let Some((lo, hi)) = summary.id_range {
        info!("  Particle ids: {}..={}", lo, hi);
    }
    if let Some((lo, hi)) = summary.bounds {
        info!(
            "  Bounds: [{:.4}, {:.4}] x [{:.4}, {:.4}] x [{:.4}, {:.4}]",
            lo.x, hi.x, lo.y, hi.y, lo.z, hi.z
        );
    }
    if let Some((lo, hi)) = summary.stopping_time_range {
        info!("  Stopping time: {:.4e} .. {:.4e}", lo, hi);
    }
    info!(
        "  Mean speed: {:.4e} | Occupied cells: {} (max {} per cell)",
        summary.mean_speed, summary.occupied_cells, summary.max_particles_per_cell
    );
}

/// Output base name: the input file stem plus the zero-padded step.
fn export_name(path: &Path, snapshot: &ParticleSnapshot) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("particles");
    match u32::try_from(snapshot.step()) {
        Ok(step) => format!("{}_step{}", stem, step_label(step)),
        Err(_) => stem.to_string(),
    }
}
