/// Data layer: core types, loading, and the dataset operations.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  columns + labelled rows
///   └──────────┘
///        │
///        ▼
///   select │ filter │ sort │ missing │ summary
/// ```
///
/// Row-set operations return a new `Dataset`; column mutation and fills
/// happen in place (see the contract on `model::Dataset`).

pub mod filter;
pub mod loader;
pub mod missing;
pub mod model;
pub mod select;
pub mod sort;
pub mod summary;
