//! Survival, family and fare summaries over the Titanic passenger list.
//!
//! ```text
//!   remote CSV / local copy
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  fetch + parse → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  summary  │  Table → derived Table + summary rows
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  chart    │  summary → ChartSpec
//!   └──────────┘
//! ```

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod summary;

pub use chart::{visualize_demographic, visualize_families, ChartSpec};
pub use config::DatasetSource;
pub use data::model::Table;
pub use error::DataError;
pub use summary::{family_groups, last_names, survival_demographics, Analysis, Derived};
