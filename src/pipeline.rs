use anyhow::{Context, Result};
use image::{DynamicImage, ImageError, ImageReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::clean;
use crate::config::Config;
use crate::exif;

/// Why a single file failed.
///
/// Failures never cross file boundaries: the driver logs the error and moves
/// on to the next file. The variants distinguish which step gave up, so a
/// caller can tell an undecodable input from a failed report or clean-copy
/// write.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The file could not be decoded as an image; nothing was produced for it.
    #[error("could not open as an image: {0}")]
    OpenFailed(#[source] ImageError),
    /// Reading the metadata table or writing the report failed. The clean
    /// copy is not attempted after this.
    #[error("metadata extraction failed: {0}")]
    ExtractFailed(anyhow::Error),
    /// Rebuilding or persisting the clean copy failed.
    #[error("clean copy failed: {0}")]
    ReconstructFailed(anyhow::Error),
}

/// The outcome of processing a single file.
#[derive(Debug)]
pub struct ProcessResult {
    pub path: PathBuf,
    /// Whether the metadata table held at least one tag.
    pub tags_found: bool,
    /// Report location, if the report was written.
    pub report_path: Option<PathBuf>,
    /// Clean-copy location, if the copy was written.
    pub clean_path: Option<PathBuf>,
    pub error: Option<ProcessError>,
}

/// Create the clean-output and log folders. Idempotent; a failure here is
/// fatal to the whole run.
pub fn ensure_dirs(config: &Config) -> Result<()> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output folder {}", config.output_dir.display())
    })?;
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log folder {}", config.log_dir.display()))?;
    Ok(())
}

/// List the regular files of the input folder, sorted by path.
///
/// The listing is flat — subdirectories and other non-file entries are
/// skipped, not descended into. There is no extension filter: every file is
/// a candidate, and files that are not decodable images surface later as
/// [`ProcessError::OpenFailed`].
pub fn collect_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        anyhow::bail!("Input folder {} does not exist", input_dir.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();

    files.sort();
    Ok(files)
}

/// Process one file: open it as an image, write its metadata report, and
/// write its clean copy.
///
/// Errors stay inside the returned [`ProcessResult`]; the first failing step
/// aborts the remaining steps for this file only. The decoded image is
/// dropped when this function returns.
pub fn process_file(path: &Path, config: &Config) -> ProcessResult {
    let mut result = ProcessResult {
        path: path.to_path_buf(),
        tags_found: false,
        report_path: None,
        clean_path: None,
        error: None,
    };

    let image = match open_image(path) {
        Ok(image) => image,
        Err(e) => {
            result.error = Some(ProcessError::OpenFailed(e));
            return result;
        }
    };

    // Step 1: extract and report
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let report_path = config.report_path(path);

    let entries = match exif::read_metadata(path) {
        Ok(entries) => entries,
        Err(e) => {
            result.error = Some(ProcessError::ExtractFailed(e));
            return result;
        }
    };
    match exif::write_report(&report_path, &file_name, &entries) {
        Ok(found) => {
            result.tags_found = found;
            result.report_path = Some(report_path);
        }
        Err(e) => {
            result.error = Some(ProcessError::ExtractFailed(e));
            return result;
        }
    }

    // Step 2: clean copy
    let clean_path = config.clean_path(path);
    match clean::write_clean_copy(&image, &clean_path) {
        Ok(()) => result.clean_path = Some(clean_path),
        Err(e) => result.error = Some(ProcessError::ReconstructFailed(e)),
    }

    result
}

/// Decode a file as an image, sniffing the format from the content with the
/// file extension as fallback.
fn open_image(path: &Path) -> std::result::Result<DynamicImage, ImageError> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(ImageError::IoError)?;
    reader.decode()
}
