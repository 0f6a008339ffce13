//! # exif-scrub
//!
//! Batch EXIF reporter and metadata stripper — dump every embedded metadata tag
//! of an image to a plain-text report, then rebuild a metadata-free copy of the
//! image from its raw pixel samples.
//!
//! ## Quick Start
//!
//! The simplest way to use the library is through the pipeline module, which
//! handles the full open → report → clean-copy flow for a folder of images:
//!
//! ```rust,no_run
//! use exif_scrub::config::Config;
//! use exif_scrub::pipeline::{self, collect_files, process_file};
//!
//! fn main() -> anyhow::Result<()> {
//!     // Defaults: ./Images_Input, ./Images_Clean, ./Metadata_Logs
//!     let config = Config::default();
//!
//!     // Create the output folders (idempotent)
//!     pipeline::ensure_dirs(&config)?;
//!
//!     for path in collect_files(&config.input_dir)? {
//!         let result = process_file(&path, &config);
//!
//!         if let Some(ref err) = result.error {
//!             eprintln!("Could not process {}: {err}", path.display());
//!         } else {
//!             println!("Processed: {}", path.display());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! For more control, the tag reader, report writer, and pixel reconstructor
//! can be called individually:
//!
//! ```rust,no_run
//! use exif_scrub::clean::write_clean_copy;
//! use exif_scrub::exif::{read_metadata, write_report};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let path = Path::new("photo.jpg");
//!
//!     // 1. Read the full metadata table
//!     let entries = read_metadata(path)?;
//!     for entry in &entries {
//!         println!("{}: {}", entry.label, entry.value);
//!     }
//!
//!     // 2. Serialize it to a report file
//!     let found = write_report(Path::new("photo_report.txt"), "photo.jpg", &entries)?;
//!     println!("metadata found: {found}");
//!
//!     // 3. Write a pixel-identical copy carrying no metadata
//!     let image = image::open(path)?;
//!     write_clean_copy(&image, Path::new("photo_clean.jpg"))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Supported Formats
//!
//! Any format the `image` crate can decode and encode works end to end; the
//! clean-copy encoder is chosen from the output file extension.
//!
//! | Format | EXIF report | Clean copy |
//! |--------|-------------|------------|
//! | JPEG (`.jpg`, `.jpeg`) | Yes | Yes (re-encoded) |
//! | PNG (`.png`) | Yes (`eXIf` chunk) | Yes (lossless) |
//! | TIFF (`.tif`, `.tiff`) | Yes | Yes (lossless) |
//! | WebP (`.webp`) | Yes | Yes (lossless) |
//!
//! Files that fail to decode are skipped with a diagnostic; a report is still
//! written for decodable images whose metadata table is empty.
//!
//! ## Modules
//!
//! - [`config`] — folder configuration and loading/saving
//! - [`exif`] — metadata table reading and report writing
//! - [`clean`] — pixel-level reconstruction of metadata-free copies
//! - [`pipeline`] — batch driver, file collection, and per-file error isolation

pub mod clean;
pub mod config;
pub mod exif;
pub mod pipeline;
