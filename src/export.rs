use anyhow::{Context, Result};
use log::info;
use particle_common::{OutputFormat, ParticleSnapshot};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const CSV_HEADER: [&str; 11] = [
    "pid", "pcell_x", "pcell_y", "pcell_z", "pos_x", "pos_y", "pos_z", "vel_x", "vel_y", "vel_z", "tstop",
];

/// Writes `snapshot` to `<dir>/<base_name>.<ext>` in the given format and
/// returns the path written. `dir` is created if missing.
pub fn export_snapshot(
    snapshot: &ParticleSnapshot,
    dir: &Path,
    base_name: &str,
    format: OutputFormat,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let filename = dir.join(format!("{}.{}", base_name, format.extension()));

    match format {
        OutputFormat::Json => {
            // JSON has no NaN or infinity; serde_json would write them as null.
            if let Some((id, field)) = snapshot.first_non_finite() {
                anyhow::bail!(
                    "Cannot export '{}' as JSON: particle {} has non-finite {} (use bincode, messagepack or csv)",
                    filename.display(),
                    id.map_or_else(|| "header".to_string(), |id| id.to_string()),
                    field
                );
            }
            let mut writer = create(&filename)?;
            serde_json::to_writer(&mut writer, snapshot)
                .with_context(|| format!("Error serializing snapshot to JSON '{}'", filename.display()))?;
            writer.flush()?;
        }
        OutputFormat::Bincode => {
            let mut writer = create(&filename)?;
            bincode::serialize_into(&mut writer, snapshot)
                .with_context(|| format!("Error serializing snapshot to bincode '{}'", filename.display()))?;
            writer.flush()?;
        }
        OutputFormat::Messagepack => {
            let mut writer = create(&filename)?;
            rmp_serde::encode::write(&mut writer, snapshot)
                .with_context(|| format!("Error serializing snapshot to MessagePack '{}'", filename.display()))?;
            writer.flush()?;
        }
        OutputFormat::Csv => write_csv(snapshot, &filename)?,
    }

    info!("Snapshot (step {}, {} particles) saved to {}", snapshot.step(), snapshot.len(), filename.display());
    Ok(filename)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("Error creating output file '{}'", path.display()))?;
    Ok(BufWriter::new(file))
}

/// One row per particle in id order. Floats use Rust's shortest round-trip
/// formatting so no precision is lost.
fn write_csv(snapshot: &ParticleSnapshot, path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Error creating CSV file '{}'", path.display()))?;
    writer.write_record(CSV_HEADER)?;
    for p in snapshot.particles() {
        writer.write_record(&[
            p.id.to_string(),
            p.cell[0].to_string(),
            p.cell[1].to_string(),
            p.cell[2].to_string(),
            p.position.x.to_string(),
            p.position.y.to_string(),
            p.position.z.to_string(),
            p.velocity.x.to_string(),
            p.velocity.y.to_string(),
            p.velocity.z.to_string(),
            p.stopping_time.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
