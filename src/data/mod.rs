/// Data layer: core types, loading, and passenger domains.
///
/// Architecture:
/// ```text
///  remote .csv / local .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch / parse → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  named columns of dynamically typed cells
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ passenger │  coerce cells → Class, Sex, AgeBracket, surname
///   └───────────┘
/// ```

pub mod loader;
pub mod model;
pub mod passenger;
