//! Name records grouped by calendar year.

use std::fmt;
use std::ops::RangeInclusive;

use rustc_hash::FxHashMap;

use crate::record::Name;
use crate::record::county_filter;
use crate::tree::AvlTree;

/// Earliest year accepted by default.
pub const FIRST_YEAR: u16 = 1900;
/// Latest year accepted by default.
pub const LAST_YEAR: u16 = 2018;

/// Error returned when a record's year is outside the accepted range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum YearError {
    #[error("invalid year {year}: valid range is {first}-{last}")]
    OutOfRange { year: u16, first: u16, last: u16 },
}

/// Every name recorded in one calendar year.
///
/// County arguments accept [`ALL_COUNTIES`](crate::record::ALL_COUNTIES),
/// in any case, to query across all counties.
pub struct YearNames {
    year: u16,
    names: AvlTree<Name>,
}

impl YearNames {
    pub fn new(year: u16) -> YearNames {
        return YearNames {
            year,
            names: AvlTree::new(),
        };
    }

    pub fn year(&self) -> u16 {
        return self.year;
    }

    pub fn names(&self) -> &AvlTree<Name> {
        return &self.names;
    }

    /// Returns `false` if a record with the same key is already present.
    pub fn insert(&mut self, name: Name) -> bool {
        return self.names.insert(name);
    }

    pub fn remove(&mut self, key: &Name) -> bool {
        return self.names.remove(key);
    }

    pub fn len(&self) -> usize {
        return self.names.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.names.is_empty();
    }

    /// Number of babies recorded this year.
    pub fn total_count(&self) -> u64 {
        return self.names.total_weight();
    }

    pub fn count_by_name(&self, name: &str) -> u64 {
        return self.names.weight_by_primary(name);
    }

    pub fn count_by_name_county(&self, name: &str, county: &str) -> u64 {
        return self.names.weight_by_prefix(name, county_filter(county));
    }

    /// Share of this year's babies that received `name`.
    pub fn fraction_by_name(&self, name: &str) -> f64 {
        return self.names.fraction_by_primary(name);
    }

    /// Share of this year's babies born in `county` that received `name`.
    pub fn fraction_by_name_county(&self, name: &str, county: &str) -> f64 {
        return self.names.fraction_by_prefix(name, county_filter(county));
    }
}

impl fmt::Display for YearNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.year);
    }
}

/// One [`YearNames`] per year within an accepted range.
pub struct YearIndex {
    accepted: RangeInclusive<u16>,
    years: FxHashMap<u16, YearNames>,
    /// Smallest and largest year that received a record.
    span: Option<(u16, u16)>,
}

impl YearIndex {
    /// An empty index accepting [`FIRST_YEAR`] through [`LAST_YEAR`].
    pub fn new() -> YearIndex {
        return YearIndex::with_range(FIRST_YEAR..=LAST_YEAR);
    }

    pub fn with_range(accepted: RangeInclusive<u16>) -> YearIndex {
        return YearIndex {
            accepted,
            years: FxHashMap::default(),
            span: None,
        };
    }

    /// Years this index accepts.
    pub fn accepted(&self) -> RangeInclusive<u16> {
        return self.accepted.clone();
    }

    /// Add `name` under `year`.
    ///
    /// Returns `Ok(false)` if that year already holds a record with the same
    /// key. The year still counts toward [`span`](Self::span).
    pub fn insert(&mut self, year: u16, name: Name) -> Result<bool, YearError> {
        if !self.accepted.contains(&year) {
            return Err(YearError::OutOfRange {
                year,
                first: *self.accepted.start(),
                last: *self.accepted.end(),
            });
        }

        self.span = match self.span {
            Some((first, last)) => Some((first.min(year), last.max(year))),
            None => Some((year, year)),
        };
        let names = self.years.entry(year).or_insert_with(|| YearNames::new(year));
        return Ok(names.insert(name));
    }

    pub fn get(&self, year: u16) -> Option<&YearNames> {
        return self.years.get(&year);
    }

    pub fn get_mut(&mut self, year: u16) -> Option<&mut YearNames> {
        return self.years.get_mut(&year);
    }

    /// Years from the earliest to the latest that received a record, or
    /// `None` if nothing was inserted.
    pub fn span(&self) -> Option<RangeInclusive<u16>> {
        return self.span.map(|(first, last)| first..=last);
    }

    /// Total number of records across all years.
    pub fn len(&self) -> usize {
        return self.years.values().map(YearNames::len).sum();
    }

    pub fn is_empty(&self) -> bool {
        return self.len() == 0;
    }
}

impl Default for YearIndex {
    fn default() -> Self {
        return Self::new();
    }
}
