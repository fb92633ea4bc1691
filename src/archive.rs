//! Archive writing
//!
//! Packs the distributable page into a single-entry deflate zip and
//! measures the result.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Write a single-entry zip archive and return its byte size.
pub fn write_archive(archive_path: &Path, entry_name: &str, content: &[u8]) -> Result<u64> {
    let file = File::create(archive_path)
        .with_context(|| format!("Failed to create archive: {}", archive_path.display()))?;
    let mut zip = ZipWriter::new(file);

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(entry_name, options)
        .with_context(|| format!("Failed to start archive entry '{}'", entry_name))?;
    zip.write_all(content)
        .context("Failed to write archive entry")?;
    zip.finish().context("Failed to finalize archive")?;

    let size = fs::metadata(archive_path)
        .with_context(|| format!("Failed to stat archive: {}", archive_path.display()))?
        .len();
    Ok(size)
}
