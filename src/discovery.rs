use log::debug;
use particle_common::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Lists regular files in `dir` whose extension is exactly `extension`
/// (without the dot), sorted by file name.
pub fn list_data_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Found {} '.{}' files in {}", files.len(), extension, dir.display());
    Ok(files)
}

/// Formats a step number zero-padded to at least four digits.
pub fn step_label(step: u32) -> String {
    format!("{:04}", step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_labels_pad_to_four_digits() {
        assert_eq!(step_label(0), "0000");
        assert_eq!(step_label(7), "0007");
        assert_eq!(step_label(250), "0250");
        assert_eq!(step_label(12345), "12345");
    }

    #[test]
    fn missing_directory_is_an_io_failure() {
        let err = list_data_files("/definitely/not/a/real/dir", "dat").unwrap_err();
        assert!(err.is_io());
    }
}
