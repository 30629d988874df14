//! Baby name records.
//!
//! A [`Name`] is keyed by `(name, county, gender)`, every component compared
//! without regard to case, and weighted by its count. Two records with the
//! same key are the same record even if their counts differ.

use std::cmp::Ordering;
use std::fmt;

use crate::query::CompositeKey;
use crate::query::Weighted;

/// County token that disables county filtering in queries.
pub const ALL_COUNTIES: &str = "ALL";

/// Error returned when a record's fields are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("invalid name: name should not be empty")]
    EmptyName,
    #[error("invalid gender '{0}': gender should be either 'F' or 'M'")]
    InvalidGender(String),
    #[error("invalid count {0}: count should not be negative")]
    NegativeCount(i64),
    #[error("invalid count {0}: count should be at most {max}", max = u32::MAX)]
    CountTooLarge(i64),
    #[error("invalid county: county should not be empty")]
    EmptyCounty,
}

/// Case-insensitive string order, folding each character to lowercase.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    let a = a.chars().flat_map(char::to_lowercase);
    let b = b.chars().flat_map(char::to_lowercase);
    return a.cmp(b);
}

/// `None` for the [`ALL_COUNTIES`] token, otherwise the county itself.
pub fn county_filter(county: &str) -> Option<&str> {
    if cmp_ignore_case(county, ALL_COUNTIES) == Ordering::Equal {
        return None;
    }
    return Some(county);
}

/// How many babies received a name in one county, for one gender.
#[derive(Clone, Debug)]
pub struct Name {
    name: String,
    gender: String,
    count: u32,
    county: String,
}

impl Name {
    /// Build a validated record. Field spelling is kept as given.
    pub fn new(name: &str, gender: &str, count: i64, county: &str) -> Result<Name, NameError> {
        if name.is_empty() {
            return Err(NameError::EmptyName);
        }
        if !gender.eq_ignore_ascii_case("f") && !gender.eq_ignore_ascii_case("m") {
            return Err(NameError::InvalidGender(gender.to_string()));
        }
        if count < 0 {
            return Err(NameError::NegativeCount(count));
        }
        let count = u32::try_from(count).map_err(|_| NameError::CountTooLarge(count))?;
        if county.is_empty() {
            return Err(NameError::EmptyCounty);
        }

        return Ok(Name {
            name: name.to_string(),
            gender: gender.to_string(),
            count,
            county: county.to_string(),
        });
    }

    pub fn name(&self) -> &str {
        return &self.name;
    }

    pub fn gender(&self) -> &str {
        return &self.gender;
    }

    pub fn count(&self) -> u64 {
        return u64::from(self.count);
    }

    pub fn county(&self) -> &str {
        return &self.county;
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        return cmp_ignore_case(&self.name, &other.name)
            .then_with(|| cmp_ignore_case(&self.county, &other.county))
            .then_with(|| cmp_ignore_case(&self.gender, &other.gender));
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        return self.cmp(other) == Ordering::Equal;
    }
}

impl Eq for Name {}

/// Renders as `name,gender,count,county`.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{},{},{},{}", self.name, self.gender, self.count, self.county);
    }
}

impl Weighted for Name {
    fn weight(&self) -> u64 {
        return u64::from(self.count);
    }
}

impl CompositeKey for Name {
    type Primary = str;
    type Secondary = str;

    fn cmp_primary(&self, name: &str) -> Ordering {
        return cmp_ignore_case(&self.name, name);
    }

    fn cmp_secondary(&self, county: &str) -> Ordering {
        return cmp_ignore_case(&self.county, county);
    }
}
