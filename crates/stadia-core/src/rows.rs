//! CSV input: comma-delimited, no header row, fixed width per file.

use std::{fs, io, path::Path};

use crate::{Error, Result};

/// One CSV record with the 1-based line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
  pub line:   u64,
  pub fields: Vec<String>,
}

impl Record {
  pub fn new(line: u64, fields: &[&str]) -> Self {
    Self { line, fields: fields.iter().map(|f| (*f).to_owned()).collect() }
  }

  /// The leading team-name field.
  pub fn team(&self) -> &str {
    self.fields.first().map(String::as_str).unwrap_or_default()
  }

  /// Everything after the team-name field.
  pub fn values(&self) -> &[String] {
    self.fields.get(1..).unwrap_or_default()
  }
}

/// Read every record of `path`, requiring exactly `width` fields on each.
///
/// A blank line counts as a record with no fields. The first record of the
/// wrong width aborts the read with [`Error::MalformedRow`].
pub fn read_records(path: &Path, width: usize) -> Result<Vec<Record>> {
  let content = fs::read_to_string(path).map_err(|e| match e.kind() {
    io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
    _ => Error::Io(e),
  })?;

  let malformed = |line, found| Error::MalformedRow {
    path: path.to_path_buf(),
    line,
    expected: width,
    found,
  };

  // The csv reader drops empty lines on its own, so find them up front.
  let blank = first_blank_line(&content);

  let mut reader = csv::ReaderBuilder::new()
    .has_headers(false)
    .flexible(true)
    .from_reader(content.as_bytes());

  let mut records = Vec::new();
  for result in reader.records() {
    let record = result?;
    let line = record.position().map(|p| p.line()).unwrap_or_default();

    if let Some(blank) = blank
      && blank < line
    {
      return Err(malformed(blank, 0));
    }
    if record.len() != width {
      return Err(malformed(line, record.len()));
    }

    records.push(Record {
      line,
      fields: record.iter().map(str::to_owned).collect(),
    });
  }

  if let Some(blank) = blank {
    return Err(malformed(blank, 0));
  }

  tracing::debug!(path = %path.display(), records = records.len(), "read csv");
  Ok(records)
}

/// 1-based number of the first empty line outside a quoted field.
fn first_blank_line(content: &str) -> Option<u64> {
  let mut quoted = false;
  for (i, line) in content.lines().enumerate() {
    if !quoted && line.is_empty() {
      return Some(i as u64 + 1);
    }
    if line.matches('"').count() % 2 == 1 {
      quoted = !quoted;
    }
  }
  None
}
