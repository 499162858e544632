//! Summaries derived from the passenger table.
//!
//! Every derivation borrows the base [`Table`] and hands back a fresh table
//! carrying its derived column next to the summary, so no call depends on a
//! column added by an earlier one.

pub mod family;
pub mod surname;
pub mod survival;

use crate::chart::{self, ChartSpec};
use crate::config::DatasetSource;
use crate::data::loader;
use crate::data::model::Table;
use crate::error::DataError;

pub use family::{family_groups, FamilyFareRow, FamilyFareSummary};
pub use surname::{last_names, SurnameCount, SurnameTally};
pub use survival::{survival_demographics, SurvivalRow, SurvivalSummary};

/// A summary together with the base table extended by its derived column.
#[derive(Debug, Clone)]
pub struct Derived<S> {
    pub table: Table,
    pub summary: S,
}

// ---------------------------------------------------------------------------
// Analysis – the loaded dataset and its argument-free operations
// ---------------------------------------------------------------------------

/// The passenger table loaded once, with every summary and chart available
/// as a method.
#[derive(Debug, Clone)]
pub struct Analysis {
    table: Table,
}

impl Analysis {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// Load the dataset from `source`. A failure here is meant to be fatal.
    pub fn load(source: &DatasetSource) -> anyhow::Result<Self> {
        loader::load(source).map(Self::new)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn survival_demographics(&self) -> Result<SurvivalSummary, DataError> {
        survival_demographics(&self.table).map(|d| d.summary)
    }

    pub fn visualize_demographic(&self) -> Result<ChartSpec, DataError> {
        self.survival_demographics()
            .map(|summary| chart::visualize_demographic(&summary))
    }

    pub fn family_groups(&self) -> Result<FamilyFareSummary, DataError> {
        family_groups(&self.table).map(|d| d.summary)
    }

    pub fn visualize_families(&self) -> Result<ChartSpec, DataError> {
        self.family_groups()
            .map(|summary| chart::visualize_families(&summary))
    }

    pub fn last_names(&self) -> Result<SurnameTally, DataError> {
        last_names(&self.table).map(|d| d.summary)
    }
}
