use anyhow::{Context, Result};
use exif::{Error as ExifError, Field, Reader, Tag, Value};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Byte payloads up to this length are rendered as hex; longer ones as a size.
const MAX_INLINE_BYTES: usize = 16;

/// A decoded tag value, normalized from the raw EXIF field types.
///
/// The `Display` impl is the single textual representation used in reports,
/// so rendering does not depend on any ambient default conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Sequence(Vec<TagValue>),
}

/// One entry of an image's metadata table.
#[derive(Debug, Clone)]
pub struct TagEntry {
    /// IFD the tag was found in (0 = primary image, 1 = thumbnail).
    pub ifd: u16,
    /// Raw numeric tag identifier.
    pub tag_id: u16,
    /// Human-readable tag name, or the numeric identifier when unknown.
    pub label: String,
    pub value: TagValue,
}

impl TagEntry {
    fn from_field(field: &Field) -> Self {
        // The table can hold the same tag once per IFD (e.g. Orientation on
        // both the primary image and its thumbnail); disambiguate everything
        // outside the primary IFD in the label.
        let label = match field.ifd_num.0 {
            0 => tag_label(field.tag),
            1 => format!("{} (thumbnail)", tag_label(field.tag)),
            n => format!("{} (IFD{n})", tag_label(field.tag)),
        };
        Self {
            ifd: field.ifd_num.0,
            tag_id: field.tag.1,
            label,
            value: TagValue::from_exif(&field.value),
        }
    }
}

/// Read the full metadata table of an image, in table order.
///
/// Entries from every IFD are included; non-primary ones (thumbnail) are
/// marked in their label. A missing or unparseable EXIF segment yields an
/// empty table — for the report there is no difference between "no segment"
/// and "zero entries". Only I/O errors propagate to the caller.
pub fn read_metadata(path: &Path) -> Result<Vec<TagEntry>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} for metadata read", path.display()))?;
    let mut reader = BufReader::new(file);

    let exif = match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(ExifError::Io(e)) => {
            return Err(e).context("I/O error while reading metadata");
        }
        Err(e) => {
            log::debug!("No EXIF data found in {}: {e}", path.display());
            return Ok(Vec::new());
        }
    };

    Ok(exif.fields().map(TagEntry::from_field).collect())
}

/// Translate a tag through the name dictionary, falling back to the raw
/// numeric identifier. Unknown tags Display as `Tag(<context>, <number>)`.
fn tag_label(tag: Tag) -> String {
    let name = tag.to_string();
    if name.starts_with("Tag(") {
        tag.1.to_string()
    } else {
        name
    }
}

impl TagValue {
    /// Normalize a raw EXIF field value.
    ///
    /// Numeric vectors of length one collapse to a scalar; longer ones become
    /// a [`TagValue::Sequence`]. Rationals are reduced to their decimal value.
    pub fn from_exif(value: &Value) -> TagValue {
        match value {
            Value::Ascii(lines) => {
                let text = lines
                    .iter()
                    .map(|raw| String::from_utf8_lossy(raw).trim_matches('\0').trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ");
                TagValue::Text(text)
            }
            Value::Byte(bytes) => TagValue::Bytes(bytes.clone()),
            Value::Undefined(bytes, _) => TagValue::Bytes(bytes.clone()),
            Value::Short(v) => from_ints(v.iter().map(|&x| i64::from(x))),
            Value::Long(v) => from_ints(v.iter().map(|&x| i64::from(x))),
            Value::SByte(v) => from_ints(v.iter().map(|&x| i64::from(x))),
            Value::SShort(v) => from_ints(v.iter().map(|&x| i64::from(x))),
            Value::SLong(v) => from_ints(v.iter().map(|&x| i64::from(x))),
            Value::Rational(v) => from_floats(v.iter().map(|r| r.to_f64())),
            Value::SRational(v) => from_floats(v.iter().map(|r| r.to_f64())),
            Value::Float(v) => from_floats(v.iter().map(|&x| f64::from(x))),
            Value::Double(v) => from_floats(v.iter().copied()),
            _ => TagValue::Text("(opaque value)".to_string()),
        }
    }
}

fn from_ints<I: Iterator<Item = i64>>(values: I) -> TagValue {
    let mut items: Vec<TagValue> = values.map(TagValue::Int).collect();
    if items.len() == 1 {
        items.remove(0)
    } else {
        TagValue::Sequence(items)
    }
}

fn from_floats<I: Iterator<Item = f64>>(values: I) -> TagValue {
    let mut items: Vec<TagValue> = values.map(TagValue::Float).collect();
    if items.len() == 1 {
        items.remove(0)
    } else {
        TagValue::Sequence(items)
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Int(v) => write!(f, "{v}"),
            TagValue::Float(v) => write!(f, "{v}"),
            TagValue::Text(s) => f.write_str(s),
            TagValue::Bytes(bytes) => {
                if bytes.len() <= MAX_INLINE_BYTES {
                    for (i, byte) in bytes.iter().enumerate() {
                        if i > 0 {
                            f.write_str(" ")?;
                        }
                        write!(f, "{byte:02x}")?;
                    }
                    Ok(())
                } else {
                    write!(f, "({} bytes)", bytes.len())
                }
            }
            TagValue::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}
