//! Babynames - per-year name popularity backed by a weight-aggregating AVL tree.
//!
//! The core is [`tree::AvlTree`], a generic height-balanced ordered set.
//! [`query`] adds weight folds to trees of composite-key records that skip
//! every subtree outside the queried key prefix. The remaining modules load
//! the New York State baby names dataset into one tree per year and answer
//! interactive lookups.
//!
//! # Quick Start
//!
//! ```
//! use babynames::record::Name;
//! use babynames::year::YearNames;
//!
//! let mut year = YearNames::new(2010);
//! year.insert(Name::new("Emma", "F", 100, "Kings").unwrap());
//! year.insert(Name::new("Emma", "M", 5, "Kings").unwrap());
//! year.insert(Name::new("Emma", "F", 50, "Queens").unwrap());
//! year.insert(Name::new("Liam", "M", 80, "Kings").unwrap());
//!
//! assert_eq!(year.count_by_name("emma"), 155);
//! assert_eq!(year.count_by_name_county("emma", "kings"), 105);
//! assert_eq!(year.count_by_name_county("emma", "ALL"), 155);
//! ```

pub mod config;
pub mod dataset;
pub mod query;
pub mod record;
pub mod repl;
pub mod tree;
pub mod year;
