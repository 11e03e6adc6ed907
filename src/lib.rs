//! flatframe – an in-memory tabular dataset for exploring flat files.
//!
//! Load a comma-separated (or JSON records) file once, then select, filter,
//! sort, deduplicate and clean it with plain synchronous calls:
//!
//! ```no_run
//! use flatframe::{load_file, Predicate};
//!
//! # fn main() -> flatframe::Result<()> {
//! let sightings = load_file("sightings.csv".as_ref())?;
//! let texas = sightings.filter(&Predicate::eq("State", "TX"))?;
//! let ordered = texas.sort_by(&[("City", true)])?;
//! println!("{} sightings in Texas", ordered.len());
//! # Ok(())
//! # }
//! ```
//!
//! Every row carries a stable label assigned at load time, so rows stay
//! addressable across filtering and sorting. Operations either fully succeed
//! or fail with a [`DatasetError`] and no side effect.

pub mod data;
pub mod error;

pub use data::filter::Predicate;
pub use data::loader::load_file;
pub use data::missing::DropNulls;
pub use data::model::{Column, DType, Dataset, RowView, Value};
pub use data::summary::ColumnSummary;
pub use error::{DatasetError, Result};
