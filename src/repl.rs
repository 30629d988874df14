//! Interactive name lookups.
//!
//! A [`Session`] repeatedly asks for a name and a county and prints, for
//! every loaded year, the share of babies given that name as a percentage
//! followed by a bar proportional to it. The session only reads the index.

use std::fmt;
use std::io;
use std::io::BufRead;
use std::io::Write;

use tracing::debug;

use crate::config::Config;
use crate::year::YearIndex;

const NAME_PROMPT: &str = "Please enter a name";
const COUNTY_PROMPT: &str = "Please enter a county (ALL, for search in all counties):";
const NO_MATCH: &str = "No such name/county in the dataset.";
const QUIT: &str = "q";
const BAR: char = '|';

/// One line of a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramRow {
    pub year: u16,
    /// Share of the year's (or county's) babies, in `[0, 1]`.
    pub fraction: f64,
    /// Number of bar characters to draw.
    pub bars: usize,
}

impl HistogramRow {
    pub fn new(year: u16, fraction: f64, bar_scale: u32) -> HistogramRow {
        let bars = (fraction * f64::from(bar_scale)).ceil() as usize;
        return HistogramRow { year, fraction, bars };
    }
}

/// Renders as `year (percent): bars`, the percentage with four decimals.
impl fmt::Display for HistogramRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:5.4}): ", self.year, self.fraction * 100.0)?;
        for _ in 0..self.bars {
            write!(f, "{BAR}")?;
        }
        return Ok(());
    }
}

/// Read-only query loop over a loaded [`YearIndex`].
pub struct Session<'a> {
    index: &'a YearIndex,
    config: &'a Config,
}

impl<'a> Session<'a> {
    pub fn new(index: &'a YearIndex, config: &'a Config) -> Session<'a> {
        return Session { index, config };
    }

    /// One row per year from the earliest to the latest loaded year.
    ///
    /// Returns `None` if no loaded year has a baby with `name` in `county`.
    /// `county` may be `ALL`.
    pub fn histogram(&self, name: &str, county: &str) -> Option<Vec<HistogramRow>> {
        let span = self.index.span()?;
        let found = span.clone().any(|year| {
            self.index
                .get(year)
                .is_some_and(|names| names.count_by_name_county(name, county) != 0)
        });
        if !found {
            return None;
        }

        let rows = span
            .map(|year| {
                let fraction = self
                    .index
                    .get(year)
                    .map_or(0.0, |names| names.fraction_by_name_county(name, county));
                HistogramRow::new(year, fraction, self.config.bar_scale)
            })
            .collect();
        return Some(rows);
    }

    /// Prompt on `output` and answer queries from `input` until the user
    /// enters `q` (in any case) or the input ends.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> io::Result<()> {
        loop {
            writeln!(output, "{NAME_PROMPT}")?;
            output.flush()?;
            let Some(name) = read_line(&mut input)? else {
                return Ok(());
            };
            if name.eq_ignore_ascii_case(QUIT) {
                return Ok(());
            }

            writeln!(output, "{COUNTY_PROMPT}")?;
            output.flush()?;
            let Some(county) = read_line(&mut input)? else {
                return Ok(());
            };

            debug!(%name, %county, "histogram query");
            match self.histogram(&name, &county) {
                Some(rows) => {
                    for row in rows {
                        writeln!(output, "{row}")?;
                    }
                }
                None => writeln!(output, "{NO_MATCH}")?,
            }
        }
    }
}

/// Next line without surrounding whitespace, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    return Ok(Some(line.trim().to_string()));
}
