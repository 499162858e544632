use std::collections::BTreeMap;

use serde::Serialize;

use super::Derived;
use crate::data::model::{Table, Value};
use crate::data::passenger::{
    family_size, Class, CLASS, FAMILY_SIZE, FARE, PARENTS_CHILDREN, SIBLINGS_SPOUSES,
};
use crate::error::DataError;

/// Fare statistics for one observed family size within a class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyFareRow {
    pub family_size: i64,
    pub class: Class,
    pub n_passengers: usize,
    pub avg_fare: f64,
    pub min_fare: f64,
    pub max_fare: f64,
}

/// Observed family size × class groups, sorted by class then family size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyFareSummary {
    pub rows: Vec<FamilyFareRow>,
    /// Passengers without a usable class or family size.
    pub excluded: usize,
}

/// Mean, minimum and maximum of a set of fares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl FareStats {
    /// Statistics over `fares`, or `None` when there are none.
    pub fn new<I>(fares: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for fare in fares {
            count += 1;
            sum += fare;
            min = min.min(fare);
            max = max.max(fare);
        }
        if count == 0 {
            return None;
        }
        // Summation error must not push the mean outside [min, max].
        let mean = (sum / count as f64).clamp(min, max);
        Some(Self { mean, min, max })
    }
}

/// Copy of `table` with a `family_size` column; null when either count is
/// missing.
pub fn add_family_size(table: &Table) -> Result<Table, DataError> {
    let siblings = table.column(SIBLINGS_SPOUSES)?;
    let parents = table.column(PARENTS_CHILDREN)?;

    let sizes = siblings
        .iter()
        .zip(parents)
        .enumerate()
        .map(|(row, (s, p))| {
            if s.is_null() || p.is_null() {
                return Ok(Value::Null);
            }
            let size = family_size(
                count(SIBLINGS_SPOUSES, row, s)?,
                count(PARENTS_CHILDREN, row, p)?,
            )
            .ok_or_else(|| DataError::InvalidValue {
                column: FAMILY_SIZE.to_string(),
                row,
                value: format!("{s} + {p} + 1"),
                expected: "a family size within the i64 range",
            })?;
            Ok(Value::Integer(size))
        })
        .collect::<Result<Vec<_>, DataError>>()?;
    table.with_column(FAMILY_SIZE, sizes)
}

/// Passenger count and fare statistics per observed family size and class.
///
/// Every passenger in a group is counted; fare statistics use the known fares,
/// and a group with none reports 0.0 for all three.
pub fn family_groups(table: &Table) -> Result<Derived<FamilyFareSummary>, DataError> {
    let classes = table.column(CLASS)?;
    let fares = table.column(FARE)?;
    let derived = add_family_size(table)?;
    let sizes = derived.column(FAMILY_SIZE)?;

    let mut groups: BTreeMap<(Class, i64), (usize, Vec<f64>)> = BTreeMap::new();
    let mut excluded = 0;

    for row in 0..table.len() {
        let fare = if fares[row].is_null() {
            None
        } else {
            let fare = fares[row].as_f64().filter(|f| f.is_finite());
            Some(fare.ok_or_else(|| DataError::InvalidValue {
                column: FARE.to_string(),
                row,
                value: fares[row].to_string(),
                expected: "a finite number",
            })?)
        };
        let (Some(class), Some(size)) = (Class::from_value(&classes[row]), sizes[row].as_i64())
        else {
            excluded += 1;
            continue;
        };
        let group = groups.entry((class, size)).or_default();
        group.0 += 1;
        group.1.extend(fare);
    }

    if excluded > 0 {
        log::debug!("{excluded} passengers have no usable class or family size");
    }

    let rows = groups
        .into_iter()
        .map(|((class, family_size), (n_passengers, fares))| {
            let stats = FareStats::new(fares).unwrap_or(FareStats {
                mean: 0.0,
                min: 0.0,
                max: 0.0,
            });
            FamilyFareRow {
                family_size,
                class,
                n_passengers,
                avg_fare: stats.mean,
                min_fare: stats.min,
                max_fare: stats.max,
            }
        })
        .collect();

    Ok(Derived {
        table: derived,
        summary: FamilyFareSummary { rows, excluded },
    })
}

fn count(column: &str, row: usize, value: &Value) -> Result<i64, DataError> {
    value
        .as_i64()
        .filter(|n| *n >= 0)
        .ok_or_else(|| DataError::InvalidValue {
            column: column.to_string(),
            row,
            value: value.to_string(),
            expected: "a non-negative integer",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passengers(rows: &[(i64, i64, i64, Option<f64>)]) -> Table {
        let classes: Vec<Value> = rows.iter().map(|r| Value::Integer(r.0)).collect();
        let siblings: Vec<Value> = rows.iter().map(|r| Value::Integer(r.1)).collect();
        let parents: Vec<Value> = rows.iter().map(|r| Value::Integer(r.2)).collect();
        let fares: Vec<Value> = rows
            .iter()
            .map(|r| r.3.map(Value::Float).unwrap_or(Value::Null))
            .collect();
        Table::from_columns([
            (CLASS.to_string(), classes),
            (SIBLINGS_SPOUSES.to_string(), siblings),
            (PARENTS_CHILDREN.to_string(), parents),
            (FARE.to_string(), fares),
        ])
        .unwrap()
    }

    #[test]
    fn family_size_column() {
        let table = passengers(&[(3, 1, 2, Some(7.25))]);
        let derived = add_family_size(&table).unwrap();
        assert_eq!(derived.column(FAMILY_SIZE).unwrap(), &[Value::Integer(4)]);
    }

    #[test]
    fn groups_sorted_by_class_then_size() {
        let table = passengers(&[
            (3, 0, 0, Some(8.0)),
            (1, 1, 0, Some(80.0)),
            (3, 4, 1, Some(30.0)),
            (1, 0, 0, Some(50.0)),
            (1, 0, 0, Some(30.0)),
        ]);
        let summary = family_groups(&table).unwrap().summary;
        let keys: Vec<_> = summary.rows.iter().map(|r| (r.class, r.family_size)).collect();
        assert_eq!(
            keys,
            vec![
                (Class::First, 1),
                (Class::First, 2),
                (Class::Third, 1),
                (Class::Third, 6)
            ]
        );

        let solo_first = &summary.rows[0];
        assert_eq!(solo_first.n_passengers, 2);
        assert_eq!(solo_first.avg_fare, 40.0);
        assert_eq!(solo_first.min_fare, 30.0);
        assert_eq!(solo_first.max_fare, 50.0);
    }

    #[test]
    fn unobserved_combinations_are_omitted() {
        let table = passengers(&[(2, 0, 0, Some(13.0))]);
        let summary = family_groups(&table).unwrap().summary;
        assert_eq!(summary.rows.len(), 1);
    }

    #[test]
    fn fare_bounds_hold() {
        let table = passengers(&[
            (1, 0, 0, Some(0.1)),
            (1, 0, 0, Some(0.2)),
            (1, 0, 0, Some(0.7)),
            (2, 2, 0, None),
        ]);
        for row in family_groups(&table).unwrap().summary.rows {
            assert!(row.min_fare <= row.avg_fare && row.avg_fare <= row.max_fare);
        }
    }

    #[test]
    fn unknown_fares_still_counted() {
        let table = passengers(&[(2, 1, 0, None), (2, 1, 0, Some(26.0))]);
        let summary = family_groups(&table).unwrap().summary;
        assert_eq!(summary.rows[0].n_passengers, 2);
        assert_eq!(summary.rows[0].avg_fare, 26.0);

        let table = passengers(&[(2, 1, 0, None)]);
        let row = &family_groups(&table).unwrap().summary.rows[0];
        assert_eq!((row.avg_fare, row.min_fare, row.max_fare), (0.0, 0.0, 0.0));
    }

    #[test]
    fn missing_fare_column_surfaces() {
        let table = Table::from_columns([(CLASS.to_string(), vec![Value::Integer(1)])]).unwrap();
        assert!(matches!(
            family_groups(&table),
            Err(DataError::MissingColumn { .. })
        ));
    }

    #[test]
    fn negative_counts_are_rejected() {
        let table = passengers(&[(1, -1, 0, Some(10.0))]);
        assert!(matches!(
            add_family_size(&table),
            Err(DataError::InvalidValue { .. })
        ));
    }

    #[test]
    fn non_finite_fares_are_rejected() {
        let base = passengers(&[(1, 0, 0, Some(10.0)), (1, 0, 0, Some(20.0))]);
        for bad in [
            vec![Value::String("NaN".to_string()), Value::Null],
            vec![Value::Float(f64::INFINITY), Value::Float(f64::NEG_INFINITY)],
            vec![Value::String("inf".to_string()), Value::String("-inf".to_string())],
        ] {
            let table = base.with_column(FARE, bad).unwrap();
            assert!(matches!(
                family_groups(&table),
                Err(DataError::InvalidValue { row: 0, .. })
            ));
        }
    }

    #[test]
    fn infinite_fare_text_from_json_is_rejected() {
        let table = crate::data::loader::parse_json(
            r#"[{"Pclass": 1, "SibSp": 0, "Parch": 0, "Fare": "inf"}]"#,
        )
        .unwrap();
        assert!(matches!(
            family_groups(&table),
            Err(DataError::InvalidValue { .. })
        ));
    }

    #[test]
    fn overflowing_family_size_is_rejected() {
        let table = passengers(&[(3, i64::MAX, 0, Some(7.0))]);
        assert!(matches!(
            add_family_size(&table),
            Err(DataError::InvalidValue { row: 0, .. })
        ));
        assert!(family_groups(&table).is_err());
    }

    #[test]
    fn fare_stats_empty() {
        assert_eq!(FareStats::new(std::iter::empty()), None);
    }
}
