use std::collections::BTreeMap;

use serde::Serialize;

use super::Derived;
use crate::data::model::{Table, Value};
use crate::data::passenger::{
    AgeBracket, Class, Sex, AGE, AGE_GROUP, CLASS, PASSENGER_ID, SEX, SURVIVED,
};
use crate::error::DataError;

/// Survival counts for one class × sex × age bracket cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalRow {
    pub class: Class,
    pub sex: Sex,
    pub age_group: AgeBracket,
    pub n_passengers: usize,
    pub n_survivors: usize,
    pub survival_rate: f64,
}

/// All 24 class × sex × age bracket cells, sorted in category order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalSummary {
    pub rows: Vec<SurvivalRow>,
    /// Passengers that fall in no named cell (missing age, unknown class/sex).
    pub excluded: usize,
}

impl SurvivalSummary {
    pub fn get(&self, class: Class, sex: Sex, age_group: AgeBracket) -> Option<&SurvivalRow> {
        self.rows
            .iter()
            .find(|r| r.class == class && r.sex == sex && r.age_group == age_group)
    }
}

/// `survivors / passengers`, defined as 0 for an empty group.
pub fn survival_rate(n_survivors: usize, n_passengers: usize) -> f64 {
    if n_passengers == 0 {
        0.0
    } else {
        n_survivors as f64 / n_passengers as f64
    }
}

/// Copy of `table` with an `age_group` column: the bracket label, or null
/// when the age is missing or out of range.
pub fn add_age_groups(table: &Table) -> Result<Table, DataError> {
    let groups = table
        .column(AGE)?
        .iter()
        .enumerate()
        .map(|(row, age)| {
            if age.is_null() {
                return Ok(Value::Null);
            }
            let years = age.as_f64().ok_or_else(|| invalid(AGE, row, age, "a number"))?;
            Ok(AgeBracket::from_age(years)
                .map(|b| Value::String(b.label().to_string()))
                .unwrap_or(Value::Null))
        })
        .collect::<Result<Vec<_>, DataError>>()?;
    table.with_column(AGE_GROUP, groups)
}

/// Survival counts and rates per class, sex and age bracket.
///
/// Every combination of the three domains is present, empty ones with zero
/// counts. Passengers without a bracket are left out of all cells.
pub fn survival_demographics(table: &Table) -> Result<Derived<SurvivalSummary>, DataError> {
    let ids = table.column(PASSENGER_ID)?;
    let classes = table.column(CLASS)?;
    let sexes = table.column(SEX)?;
    let survived = table.column(SURVIVED)?;
    let derived = add_age_groups(table)?;
    let groups = derived.column(AGE_GROUP)?;

    let mut observed: BTreeMap<(Class, Sex, AgeBracket), (usize, usize)> = BTreeMap::new();
    let mut excluded = 0;

    for row in 0..table.len() {
        let did_survive = survival_flag(&survived[row], row)?;
        if ids[row].is_null() {
            excluded += 1;
            continue;
        }
        let key = match (
            Class::from_value(&classes[row]),
            Sex::from_value(&sexes[row]),
            AgeBracket::from_value(&groups[row]),
        ) {
            (Some(class), Some(sex), Some(bracket)) => (class, sex, bracket),
            _ => {
                excluded += 1;
                continue;
            }
        };
        let counts = observed.entry(key).or_default();
        counts.0 += 1;
        if did_survive {
            counts.1 += 1;
        }
    }

    if excluded > 0 {
        log::debug!("{excluded} passengers fall outside the class/sex/age-group cells");
    }

    let rows = Class::ALL
        .into_iter()
        .flat_map(|class| Sex::ALL.into_iter().map(move |sex| (class, sex)))
        .flat_map(|(class, sex)| AgeBracket::ALL.into_iter().map(move |b| (class, sex, b)))
        .map(|(class, sex, age_group)| {
            let (n_passengers, n_survivors) =
                observed.get(&(class, sex, age_group)).copied().unwrap_or((0, 0));
            SurvivalRow {
                class,
                sex,
                age_group,
                n_passengers,
                n_survivors,
                survival_rate: survival_rate(n_survivors, n_passengers),
            }
        })
        .collect();

    Ok(Derived {
        table: derived,
        summary: SurvivalSummary { rows, excluded },
    })
}

/// Read the survival flag; null counts as not survived.
fn survival_flag(value: &Value, row: usize) -> Result<bool, DataError> {
    if value.is_null() {
        return Ok(false);
    }
    match value.as_i64() {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err(invalid(SURVIVED, row, value, "0 or 1")),
    }
}

fn invalid(column: &str, row: usize, value: &Value, expected: &'static str) -> DataError {
    DataError::InvalidValue {
        column: column.to_string(),
        row,
        value: value.to_string(),
        expected,
    }
}
