//! Tabular data sources for Smoothie Scout.
//!
//! Responsibilities:
//! - Load the competitor table and the recipe catalog from CSV files.
//! - Open files through capability-based UTF-8 paths.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `scout-core`); loaders only map
//!   rows onto validated core records.
//!
//! Invariants:
//! - Tables are read once and returned as immutable values.
//! - Every failure names the file and, for row errors, the line.

#![forbid(unsafe_code)]

mod competitors;
mod error;
pub mod fs;
mod recipes;
mod table;

pub use competitors::{load_competitors, read_competitors};
pub use error::DataSourceError;
pub use recipes::{load_recipes, read_recipes};
