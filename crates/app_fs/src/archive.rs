//! Archive writer
//!
//! Compresses a set of local files/directories into one zip archive.
//! Directory inputs keep their top-level name as the first stored path
//! segment; file inputs land at the archive root.

use crate::{FsError, Result};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Compress `inputs` into a new archive at `archive_path`.
///
/// Refuses to overwrite an existing archive. Any I/O failure aborts with
/// `false`; a partially written archive may remain on disk.
pub fn compress(inputs: &[PathBuf], archive_path: &Path) -> bool {
    if archive_path.exists() {
        tracing::warn!(
            "Archive already exists, refusing to overwrite: {}",
            archive_path.display()
        );
        return false;
    }

    match write_archive(inputs, archive_path) {
        Ok(()) => {
            tracing::info!(
                "Compressed {} inputs into {}",
                inputs.len(),
                archive_path.display()
            );
            true
        }
        Err(e) => {
            tracing::debug!("Compression failed for {}: {}", archive_path.display(), e);
            false
        }
    }
}

fn write_archive(inputs: &[PathBuf], archive_path: &Path) -> Result<()> {
    let file = std::fs::File::create(archive_path)?;
    let mut zip = ZipWriter::new(file);

    for input in inputs {
        if input.is_dir() {
            add_dir(&mut zip, input, "")?;
        } else {
            add_file(&mut zip, input, "")?;
        }
    }

    zip.finish().map_err(|e| FsError::Archive(e.to_string()))?;
    Ok(())
}

fn add_file(zip: &mut ZipWriter<std::fs::File>, file: &Path, prefix: &str) -> Result<()> {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(format!("{}{}", prefix, name), options)
        .map_err(|e| FsError::Archive(e.to_string()))?;

    let mut input = std::fs::File::open(file)?;
    std::io::copy(&mut input, zip)?;
    Ok(())
}

fn add_dir(zip: &mut ZipWriter<std::fs::File>, dir: &Path, prefix: &str) -> Result<()> {
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let child_prefix = format!("{}{}/", prefix, dir_name);

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            add_dir(zip, &path, &child_prefix)?;
        } else {
            add_file(zip, &path, &child_prefix)?;
        }
    }

    Ok(())
}
