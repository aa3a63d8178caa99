//! Line reader for the comma-separated export format.
//!
//! One row per line, fields separated by `,`. A field may be wrapped in
//! double quotes to carry commas; `""` inside quotes is a literal quote.
//! Quoted fields cannot span lines.

use std::io::BufRead;
use crate::{Error, Result};

/// One non-empty line of an export file.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based line number.
    pub line: usize,
    pub fields: Vec<String>,
}

impl Row {
    /// First field, trimmed.
    pub fn label(&self) -> &str {
        self.fields.first().map_or("", |f| f.trim())
    }

    /// Every field after the label.
    pub fn values(&self) -> &[String] {
        self.fields.get(1..).unwrap_or(&[])
    }

    /// First value, trimmed, if present and non-empty.
    pub fn first_value(&self) -> Option<&str> {
        self.values().first().map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }
}

/// Split one line into fields.
pub fn split_fields(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".into());
    }
    fields.push(field);
    Ok(fields)
}

/// Iterator over the rows of a reader.
pub struct RowReader<R> {
    reader: R,
    source_name: String,
    line: usize,
    buf: String,
}

impl<R: BufRead> RowReader<R> {
    pub fn new(reader: R, source_name: impl Into<String>) -> Self {
        Self {
            reader,
            source_name: source_name.into(),
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_line(&mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                let line = self.line;
                let mut text = self.buf.trim_end_matches(['\n', '\r']);
                if line == 1 {
                    // Spreadsheet exports on Windows often start with a BOM.
                    text = text.trim_start_matches('\u{feff}');
                }
                Some(
                    split_fields(text)
                        .map(|fields| Row { line, fields })
                        .map_err(|message| Error::ParseError {
                            source_name: self.source_name.clone(),
                            line: Some(line),
                            message,
                        }),
                )
            }
            Err(e) => Some(Err(Error::Io(e))),
        }
    }
}
