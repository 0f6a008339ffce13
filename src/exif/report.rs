use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::reader::TagEntry;

/// Serialize a metadata table to a plain-text report file.
///
/// The report is created fresh and overwrites any previous run's output:
///
/// ```text
/// --- METADATA REPORT: photo.jpg ---
///
/// DateTime: 2024:01:01 10:00:00
/// Orientation: 1
/// ```
///
/// An empty table produces a single "no metadata" line instead. Returns
/// whether at least one tag was written.
pub fn write_report(report_path: &Path, source_name: &str, entries: &[TagEntry]) -> Result<bool> {
    let file = File::create(report_path)
        .with_context(|| format!("Failed to create report {}", report_path.display()))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "--- METADATA REPORT: {source_name} ---")?;
    writeln!(out)?;

    if entries.is_empty() {
        writeln!(out, "No EXIF metadata found in this image.")?;
        out.flush().context("Failed to write report")?;
        return Ok(false);
    }

    for entry in entries {
        writeln!(out, "{}: {}", entry.label, entry.value)?;
    }

    out.flush().context("Failed to write report")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::TagValue;
    use tempfile::TempDir;

    fn entry(label: &str, value: TagValue) -> TagEntry {
        TagEntry {
            ifd: 0,
            tag_id: 0,
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn report_lists_every_tag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo_report.txt");

        let entries = vec![
            entry("DateTime", TagValue::Text("2024:01:01 10:00:00".into())),
            entry("Orientation", TagValue::Int(1)),
        ];

        let found = write_report(&path, "photo.jpg", &entries).unwrap();
        assert!(found);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "--- METADATA REPORT: photo.jpg ---\n\n\
             DateTime: 2024:01:01 10:00:00\n\
             Orientation: 1\n"
        );
    }

    #[test]
    fn empty_table_reports_no_metadata() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty_report.txt");

        let found = write_report(&path, "empty.png", &[]).unwrap();
        assert!(!found);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "--- METADATA REPORT: empty.png ---\n\n\
             No EXIF metadata found in this image.\n"
        );
    }

    #[test]
    fn rerun_overwrites_previous_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo_report.txt");

        let many = vec![
            entry("Make", TagValue::Text("ACME".into())),
            entry("Model", TagValue::Text("Shutter 9000".into())),
        ];
        write_report(&path, "photo.jpg", &many).unwrap();

        write_report(&path, "photo.jpg", &[]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("No EXIF metadata found"));
        assert!(!contents.contains("ACME"));
    }

    #[test]
    fn unwritable_location_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing_subdir").join("report.txt");
        assert!(write_report(&path, "photo.jpg", &[]).is_err());
    }
}
