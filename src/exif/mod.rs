//! EXIF metadata reading and report writing.
//!
//! This module provides the two halves of the metadata side of the pipeline:
//!
//! - [`read_metadata`] — Decode an image's embedded tag table into [`TagEntry`] values
//! - [`write_report`] — Serialize a tag table to a per-image plain-text report
//!
//! Tag identifiers are translated to human-readable names through the EXIF tag
//! dictionary; tags the dictionary does not know keep their raw numeric
//! identifier as the label. Tag values are normalized into the [`TagValue`]
//! variant type so their textual rendering is the same on every platform.

mod reader;
mod report;

pub use reader::{TagEntry, TagValue, read_metadata};
pub use report::write_report;
