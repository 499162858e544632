use std::collections::HashMap;

use serde::Serialize;

use super::Derived;
use crate::data::model::{Table, Value};
use crate::data::passenger::{surname, NAME, SURNAME};
use crate::error::DataError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurnameCount {
    pub surname: String,
    pub count: usize,
}

/// Surname frequencies, most common first; ties in alphabetical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurnameTally {
    pub counts: Vec<SurnameCount>,
    /// Names with no comma, an empty surname, or no name at all.
    pub dropped: usize,
}

impl SurnameTally {
    pub fn get(&self, surname: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|c| c.surname == surname)
            .map(|c| c.count)
    }

    /// Number of passengers with a readable surname.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }
}

/// Copy of `table` with a `surname` column; null for unreadable names.
pub fn add_surnames(table: &Table) -> Result<Table, DataError> {
    let surnames = table
        .column(NAME)?
        .iter()
        .map(|name| {
            name.as_str()
                .and_then(surname)
                .map(|s| Value::String(s.to_string()))
                .unwrap_or(Value::Null)
        })
        .collect();
    table.with_column(SURNAME, surnames)
}

/// Occurrences of each surname, most common first.
pub fn last_names(table: &Table) -> Result<Derived<SurnameTally>, DataError> {
    let derived = add_surnames(table)?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut dropped = 0;
    for value in derived.column(SURNAME)? {
        match value.as_str() {
            Some(name) => *counts.entry(name).or_default() += 1,
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        log::warn!("{dropped} names have no 'Last, First' surname and were left out of the tally");
    }

    let mut counts: Vec<SurnameCount> = counts
        .into_iter()
        .map(|(surname, count)| SurnameCount {
            surname: surname.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.surname.cmp(&b.surname)));

    Ok(Derived {
        table: derived,
        summary: SurnameTally { counts, dropped },
    })
}
