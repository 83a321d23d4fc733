use crate::decoder::read_particles;
use crate::discovery::list_data_files;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use particle_common::{ParticleSnapshot, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Outcome of decoding one file in a batch.
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub result: Result<ParticleSnapshot>,
}

impl BatchEntry {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Decodes every path in parallel. Entries come back in input order and each
/// carries its own result, so one bad file does not affect the rest.
pub fn decode_all(paths: &[PathBuf], show_progress: bool) -> Vec<BatchEntry> {
    let progress_bar = if show_progress {
        let bar = ProgressBar::new(paths.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} snapshots ({percent}%) [{eta}]")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    info!("Decoding {} snapshot files on {} Rayon threads.", paths.len(), rayon::current_num_threads());
    let entries: Vec<BatchEntry> = paths
        .par_iter()
        .map(|path| {
            let result = read_particles(path);
            if let Err(e) = &result {
                warn!("Failed to decode {}: {}", path.display(), e);
            }
            progress_bar.inc(1);
            BatchEntry { path: path.clone(), result }
        })
        .collect();
    progress_bar.finish_and_clear();

    let failed = entries.iter().filter(|e| !e.is_ok()).count();
    if failed > 0 {
        warn!("{} of {} snapshot files failed to decode.", failed, entries.len());
    }
    entries
}

/// Decodes all files with `extension` in `dir`, sorted by file name.
pub fn decode_directory<P: AsRef<Path>>(dir: P, extension: &str, show_progress: bool) -> Result<Vec<BatchEntry>> {
    let paths = list_data_files(dir, extension)?;
    Ok(decode_all(&paths, show_progress))
}
