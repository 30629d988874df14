//! Loading name records from comma-separated text.
//!
//! Rows follow the layout of the New York State baby names dataset:
//!
//! ```text
//! Year,First Name,County,Sex,Count
//! 2010,EMMA,KINGS,F,100
//! ```
//!
//! Lines that do not describe a valid record, the header included, are
//! skipped rather than treated as fatal.

use std::io;
use std::io::BufRead;
use std::num::ParseIntError;

use smallvec::SmallVec;
use tracing::debug;
use tracing::info;

use crate::record::Name;
use crate::record::NameError;
use crate::year::YearError;
use crate::year::YearIndex;

/// Fields of one line. Dataset rows have five.
pub type Fields = SmallVec<[String; 8]>;

/// Column positions within a row.
const YEAR: usize = 0;
const NAME: usize = 1;
const COUNTY: usize = 2;
const GENDER: usize = 3;
const COUNT: usize = 4;
const COLUMNS: usize = 5;

/// Error returned when a line cannot be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("expected {expected} columns, found {found}")]
    MissingColumns { expected: usize, found: usize },
    #[error("invalid year '{value}': {source}")]
    InvalidYear { value: String, source: ParseIntError },
    #[error("invalid count '{value}': {source}")]
    InvalidCount { value: String, source: ParseIntError },
    #[error(transparent)]
    Name(#[from] NameError),
}

/// Outcome of [`load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read, including skipped ones.
    pub lines: usize,
    /// Records added to the index.
    pub inserted: usize,
    /// Valid records whose key was already present for their year.
    pub duplicates: usize,
    /// Lines that did not yield a record.
    pub skipped: usize,
}

fn is_quote(ch: char) -> bool {
    return matches!(ch, '"' | '\u{201C}' | '\u{201D}');
}

/// Split one line on commas, honouring double quotes.
///
/// Straight and typographic double quotes toggle quoted mode and are
/// dropped. Inside quotes, commas and whitespace are literal. Outside an
/// entry, whitespace is skipped. The last entry is trimmed and kept only
/// when non-empty.
pub fn split_line(line: &str) -> Fields {
    let mut entries = Fields::new();
    let mut word = String::new();
    let mut inside_quotes = false;
    let mut inside_entry = false;

    for ch in line.chars() {
        if is_quote(ch) {
            inside_quotes = !inside_quotes;
            inside_entry = inside_quotes;
        } else if ch.is_whitespace() {
            if inside_quotes || inside_entry {
                word.push(ch);
            }
        } else if ch == ',' {
            if inside_quotes {
                word.push(ch);
            } else {
                inside_entry = false;
                entries.push(std::mem::take(&mut word));
            }
        } else {
            word.push(ch);
            inside_entry = true;
        }
    }

    if !word.is_empty() {
        entries.push(word.trim().to_string());
    }
    return entries;
}

/// Parse one dataset line into its year and record.
pub fn parse_row(line: &str) -> Result<(u16, Name), RowError> {
    let fields = split_line(line);
    if fields.len() < COLUMNS {
        return Err(RowError::MissingColumns {
            expected: COLUMNS,
            found: fields.len(),
        });
    }

    let year = fields[YEAR].trim();
    let year = year.parse::<u16>().map_err(|source| RowError::InvalidYear {
        value: year.to_string(),
        source,
    })?;
    let count = fields[COUNT].trim();
    let count = count.parse::<i64>().map_err(|source| RowError::InvalidCount {
        value: count.to_string(),
        source,
    })?;
    let name = Name::new(
        fields[NAME].trim(),
        fields[GENDER].trim(),
        count,
        fields[COUNTY].trim(),
    )?;
    return Ok((year, name));
}

/// Read every line of `reader` into `index`.
///
/// Invalid UTF-8 is replaced rather than rejected. Only I/O failures are
/// returned as errors.
pub fn load<R: BufRead>(mut reader: R, index: &mut YearIndex) -> io::Result<LoadStats> {
    let mut stats = LoadStats::default();
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        stats.lines += 1;

        let line = String::from_utf8_lossy(&buffer);
        let line = line.trim_end_matches(['\n', '\r']);
        match ingest(line, index) {
            Ok(true) => stats.inserted += 1,
            Ok(false) => stats.duplicates += 1,
            Err(error) => {
                debug!(line = stats.lines, %error, "skipping line");
                stats.skipped += 1;
            }
        }
    }

    info!(
        lines = stats.lines,
        inserted = stats.inserted,
        duplicates = stats.duplicates,
        skipped = stats.skipped,
        "loaded dataset"
    );
    return Ok(stats);
}

/// Why a line was skipped during [`load`].
#[derive(Debug, thiserror::Error)]
enum LineError {
    #[error(transparent)]
    Row(#[from] RowError),
    #[error(transparent)]
    Year(#[from] YearError),
}

fn ingest(line: &str, index: &mut YearIndex) -> Result<bool, LineError> {
    let (year, name) = parse_row(line)?;
    return Ok(index.insert(year, name)?);
}
