//! Runtime configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `BABYNAMES_BAR_SCALE`: histogram bars drawn for a fraction of 1.0
//!   (default: `10000`)
//! - `BABYNAMES_FIRST_YEAR`: earliest accepted record year (default: `1900`)
//! - `BABYNAMES_LAST_YEAR`: latest accepted record year (default: `2018`)
//!
//! Log filtering is controlled separately through `RUST_LOG`.

use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::year::FIRST_YEAR;
use crate::year::LAST_YEAR;

const BAR_SCALE_VAR: &str = "BABYNAMES_BAR_SCALE";
const FIRST_YEAR_VAR: &str = "BABYNAMES_FIRST_YEAR";
const LAST_YEAR_VAR: &str = "BABYNAMES_LAST_YEAR";

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    /// The accepted year range contains no years.
    #[error("empty year range: {first} is after {last}")]
    EmptyRange { first: u16, last: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bars drawn for a fraction of 1.0; a year's bar length is
    /// `ceil(fraction * bar_scale)`.
    pub bar_scale: u32,
    pub first_year: u16,
    pub last_year: u16,
}

impl Config {
    pub const DEFAULT_BAR_SCALE: u32 = 10_000;

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but does not parse, or if the
    /// first year is after the last.
    pub fn from_env() -> Result<Self, ConfigError> {
        return Self::from_lookup(|name| std::env::var(name).ok());
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// or `None` when it is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bar_scale = load(&lookup, BAR_SCALE_VAR, Self::DEFAULT_BAR_SCALE)?;
        let first_year = load(&lookup, FIRST_YEAR_VAR, FIRST_YEAR)?;
        let last_year = load(&lookup, LAST_YEAR_VAR, LAST_YEAR)?;

        if first_year > last_year {
            return Err(ConfigError::EmptyRange {
                first: first_year,
                last: last_year,
            });
        }

        return Ok(Self {
            bar_scale,
            first_year,
            last_year,
        });
    }

    /// Years a record may carry.
    pub fn year_range(&self) -> RangeInclusive<u16> {
        return self.first_year..=self.last_year;
    }
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            bar_scale: Self::DEFAULT_BAR_SCALE,
            first_year: FIRST_YEAR,
            last_year: LAST_YEAR,
        };
    }
}

/// Parse `name` through `lookup`, falling back to `default` when unset.
fn load<T, F>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(default);
    };
    return value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        message: format!("'{value}' is not a valid non-negative integer"),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        return move |name| {
            pairs
                .iter()
                .find(|(candidate, _)| candidate == name)
                .map(|(_, value)| value.clone())
        };
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bar_scale, 10_000);
        assert_eq!(config.year_range(), 1900..=2018);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("BABYNAMES_BAR_SCALE", "100"),
            ("BABYNAMES_FIRST_YEAR", " 1950 "),
            ("BABYNAMES_LAST_YEAR", "2020"),
        ]))
        .unwrap();
        assert_eq!(config.bar_scale, 100);
        assert_eq!(config.year_range(), 1950..=2020);
    }

    #[test]
    fn rejects_unparseable_value() {
        let error = Config::from_lookup(lookup(&[("BABYNAMES_BAR_SCALE", "lots")])).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid value for BABYNAMES_BAR_SCALE: 'lots' is not a valid non-negative integer"
        );
    }

    #[test]
    fn rejects_inverted_range() {
        let error = Config::from_lookup(lookup(&[
            ("BABYNAMES_FIRST_YEAR", "2000"),
            ("BABYNAMES_LAST_YEAR", "1999"),
        ]))
        .unwrap_err();
        assert_eq!(error, ConfigError::EmptyRange { first: 2000, last: 1999 });
    }
}
