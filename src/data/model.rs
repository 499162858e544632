use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::DataError;

// ---------------------------------------------------------------------------
// Value – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so Value can key a BTreeMap --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Guess the type of a raw text cell (CSV field).
    pub fn infer(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("nan") {
            return Value::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
        if s == "true" || s == "True" || s == "false" || s == "False" {
            return Value::Bool(s.eq_ignore_ascii_case("true"));
        }
        Value::String(s.to_string())
    }

    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the cell. Numeric strings are coerced; "NaN" and
    /// "inf" text is not a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) if !v.is_nan() => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Integral view of the cell. Floats are accepted only when whole.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded dataset, column-oriented
// ---------------------------------------------------------------------------

/// A column-oriented table: every column holds exactly `len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Column names in source order.
    pub column_names: Vec<String>,
    columns: BTreeMap<String, Vec<Value>>,
    n_rows: usize,
}

impl Table {
    /// Build a table from named columns. All columns must have the same length.
    pub fn from_columns<I>(columns: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (String, Vec<Value>)>,
    {
        let mut table = Table::default();
        for (name, values) in columns {
            table.insert_column(name, values)?;
        }
        Ok(table)
    }

    /// Build a table from a header and row-major cells. Short rows are padded
    /// with nulls.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let mut columns: Vec<Vec<Value>> = vec![Vec::with_capacity(rows.len()); headers.len()];
        let n_rows = rows.len();
        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.push(cells.next().unwrap_or(Value::Null));
            }
        }
        let column_names = headers.clone();
        Table {
            column_names,
            columns: headers.into_iter().zip(columns).collect(),
            n_rows,
        }
    }

    fn insert_column(&mut self, name: String, values: Vec<Value>) -> Result<(), DataError> {
        if self.column_names.is_empty() {
            self.n_rows = values.len();
        } else if values.len() != self.n_rows {
            return Err(DataError::RaggedColumn {
                column: name,
                found: values.len(),
                expected: self.n_rows,
            });
        }
        if !self.columns.contains_key(&name) {
            self.column_names.push(name.clone());
        }
        self.columns.insert(name, values);
        Ok(())
    }

    /// Return a copy of this table with `name` added (or replaced).
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Result<Table, DataError> {
        let mut table = self.clone();
        table.insert_column(name.to_string(), values)?;
        Ok(table)
    }

    /// Cells of a column, or a [`DataError::MissingColumn`] naming it.
    pub fn column(&self, name: &str) -> Result<&[Value], DataError> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| DataError::missing(name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_guesses_types() {
        assert_eq!(Value::infer("3"), Value::Integer(3));
        assert_eq!(Value::infer("22.5"), Value::Float(22.5));
        assert_eq!(Value::infer(""), Value::Null);
        assert_eq!(Value::infer("True"), Value::Bool(true));
        assert_eq!(Value::infer("male"), Value::String("male".to_string()));
    }

    #[test]
    fn as_i64_rejects_fractions() {
        assert_eq!(Value::Float(2.0).as_i64(), Some(2));
        assert_eq!(Value::Float(2.5).as_i64(), None);
        assert_eq!(Value::Null.as_i64(), None);
    }

    #[test]
    fn non_finite_text_is_not_numeric() {
        for text in ["NaN", "inf", "-inf", "infinity"] {
            assert_eq!(Value::String(text.to_string()).as_f64(), None, "{text}");
        }
        assert_eq!(Value::String(" 7.25 ".to_string()).as_f64(), Some(7.25));
    }

    #[test]
    fn nan_counts_as_null() {
        assert!(Value::Float(f64::NAN).is_null());
        assert_eq!(Value::Float(f64::NAN).as_f64(), None);
    }

    #[test]
    fn from_rows_pads_short_rows() {
        let table = Table::from_rows(
            vec!["a".into(), "b".into()],
            vec![vec![Value::Integer(1)], vec![Value::Integer(2), Value::Integer(3)]],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("b").unwrap(), &[Value::Null, Value::Integer(3)]);
    }

    #[test]
    fn missing_column_is_named() {
        let table = Table::default();
        assert_eq!(
            table.column("Fare"),
            Err(DataError::MissingColumn {
                column: "Fare".to_string()
            })
        );
    }

    #[test]
    fn with_column_leaves_base_untouched() {
        let base = Table::from_columns([("a".to_string(), vec![Value::Integer(1)])]).unwrap();
        let derived = base.with_column("b", vec![Value::Bool(true)]).unwrap();
        assert!(!base.has_column("b"));
        assert_eq!(derived.column_names, vec!["a", "b"]);
    }

    #[test]
    fn with_column_rejects_ragged_input() {
        let base = Table::from_columns([("a".to_string(), vec![Value::Integer(1)])]).unwrap();
        assert!(matches!(
            base.with_column("b", vec![]),
            Err(DataError::RaggedColumn { .. })
        ));
    }
}
