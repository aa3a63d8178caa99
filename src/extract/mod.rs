//! Record extraction — rebuild element records from a labeled line stream.
//!
//! An export file has no record delimiter. Each line is classified by its
//! label:
//!
//! | Label | Role |
//! |-------|------|
//! | `<Category> ID` | opens a record, value is the element id |
//! | `<Category> Connections` | every value is a connection reference of the open record |
//! | anything else | one feature value; every `F`-th closes a feature vector |
//!
//! Identifier and connection boundaries are explicit; the feature boundary
//! is implied by counting. The extractor therefore checks the count at
//! every identifier line, at every closed feature vector and at end of
//! input, and refuses to emit sequences that are not index-aligned.

pub mod rows;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::config::{CategorySpec, Schema};
use crate::model::{Connections, ElementRecord};
use crate::{Error, Result};
use self::rows::RowReader;

pub use self::rows::{Row, split_fields};

// ============================================================================
// Extraction result
// ============================================================================

/// Parallel sequences extracted from one category file.
///
/// `ids[i]`, `connections[i]` and `features[i]` describe the same element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub category: String,
    pub source_name: String,
    pub ids: Vec<String>,
    pub connections: Vec<Connections>,
    pub features: Vec<Vec<f64>>,
}

impl Extraction {
    pub fn new(category: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            source_name: source_name.into(),
            ..Self::default()
        }
    }

    /// Number of identifiers read.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_aligned(&self) -> bool {
        self.ids.len() == self.connections.len() && self.ids.len() == self.features.len()
    }

    pub fn check_alignment(&self) -> Result<()> {
        if self.is_aligned() {
            return Ok(());
        }
        Err(Error::ParseAlignmentError {
            source_name: self.source_name.clone(),
            message: format!(
                "{} identifiers, {} connection lists, {} feature vectors",
                self.ids.len(),
                self.connections.len(),
                self.features.len(),
            ),
        })
    }

    /// Zip the parallel sequences into records.
    pub fn into_records(self) -> Result<Vec<ElementRecord>> {
        self.check_alignment()?;
        let category = self.category;
        Ok(self.ids.into_iter()
            .zip(self.connections)
            .zip(self.features)
            .map(|((id, connections), features)| ElementRecord {
                id,
                category: category.clone(),
                connections,
                features,
            })
            .collect())
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Extract one category file. The category is inferred from the file name.
pub fn extract_file(path: &Path, schema: &Schema, feature_width: Option<usize>) -> Result<Extraction> {
    let source_name = path.display().to_string();
    let category = schema.infer(path).ok_or_else(|| Error::ParseError {
        source_name: source_name.clone(),
        line: None,
        message: "file name does not contain any known category name".into(),
    })?;
    let file = File::open(path)?;
    extract_reader(BufReader::new(file), category, &source_name, feature_width)
}

/// Extract records of a known category from any line source.
///
/// `feature_width` is the working width every vector is cut to; `None`
/// keeps the category's native `F`.
pub fn extract_reader<R: BufRead>(
    reader: R,
    category: &CategorySpec,
    source_name: &str,
    feature_width: Option<usize>,
) -> Result<Extraction> {
    let native = category.feature_count;
    let width = working_width(category, feature_width)?;
    let id_label = category.id_label();
    let connections_label = category.connections_label();

    let parse_error = |line: usize, message: String| Error::ParseError {
        source_name: source_name.to_string(),
        line: Some(line),
        message,
    };
    let alignment_error = |line: usize, message: String| Error::ParseAlignmentError {
        source_name: source_name.to_string(),
        message: format!("line {line}: {message}"),
    };

    let mut out = Extraction::new(category.name.clone(), source_name);
    let mut pending: Vec<f64> = Vec::with_capacity(native);
    let mut pending_since = 0;

    for row in RowReader::new(reader, source_name) {
        let row = row?;
        if row.is_blank() {
            continue;
        }
        let label = row.label();

        if label == id_label {
            if !pending.is_empty() {
                return Err(parse_error(row.line, format!(
                    "new record starts with {} of {native} feature values pending since line {pending_since}",
                    pending.len(),
                )));
            }
            if let Some(open) = out.ids.last() {
                if out.connections.len() < out.ids.len() {
                    return Err(alignment_error(row.line, format!("element '{open}' has no connections line")));
                }
                if out.features.len() < out.ids.len() {
                    return Err(alignment_error(row.line, format!("element '{open}' has no feature values")));
                }
            }
            let id = row.first_value()
                .ok_or_else(|| parse_error(row.line, format!("'{label}' line has no value")))?;
            if row.values().iter().skip(1).any(|v| !v.trim().is_empty()) {
                return Err(parse_error(row.line, format!("'{label}' line has more than one value")));
            }
            out.ids.push(id.to_string());
        } else if label == connections_label {
            if out.connections.len() >= out.ids.len() {
                let message = match out.ids.last() {
                    Some(open) => format!("second connections line for element '{open}'"),
                    None => "connections line before any identifier".to_string(),
                };
                return Err(alignment_error(row.line, message));
            }
            let refs: Connections = row.values().iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect();
            out.connections.push(refs);
        } else {
            let raw = row.first_value()
                .ok_or_else(|| parse_error(row.line, format!("feature '{label}' has no value")))?;
            let value: f64 = raw.parse()
                .map_err(|_| parse_error(row.line, format!("feature '{label}' value '{raw}' is not a number")))?;
            if pending.is_empty() {
                pending_since = row.line;
            }
            pending.push(value);
            if pending.len() == native {
                if out.features.len() >= out.ids.len() {
                    let message = match out.ids.last() {
                        Some(open) => format!("second feature vector for element '{open}'"),
                        None => "feature values before any identifier".to_string(),
                    };
                    return Err(alignment_error(pending_since, message));
                }
                let mut vector = std::mem::replace(&mut pending, Vec::with_capacity(native));
                vector.truncate(width);
                out.features.push(vector);
            }
        }
    }

    if !pending.is_empty() {
        return Err(parse_error(pending_since, format!(
            "{} trailing feature values do not complete a record of {native}",
            pending.len(),
        )));
    }
    out.check_alignment()?;

    debug!(
        category = %out.category,
        source = source_name,
        records = out.len(),
        native_width = native,
        width,
        "extracted category"
    );
    Ok(out)
}

fn working_width(category: &CategorySpec, requested: Option<usize>) -> Result<usize> {
    let native = category.feature_count;
    match requested {
        None => Ok(native),
        Some(0) => Err(Error::ConfigError("feature width must be at least 1".into())),
        Some(w) if w > native => Err(Error::ConfigError(format!(
            "feature width {w} exceeds the {native} features of category '{}'",
            category.name,
        ))),
        Some(w) => Ok(w),
    }
}
