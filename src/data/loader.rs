use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Table, Value};
use crate::config::DatasetSource;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the passenger table from wherever `source` points.
pub fn load(source: &DatasetSource) -> Result<Table> {
    let table = match source {
        DatasetSource::Remote(url) => fetch_csv(url)?,
        DatasetSource::Local(path) => load_file(path)?,
    };
    log::info!(
        "Loaded {} passengers from {source} with columns {:?}",
        table.len(),
        table.column_names
    );
    Ok(table)
}

/// Fetch a CSV over HTTP(S). A single attempt; any failure is returned as is.
pub fn fetch_csv(url: &str) -> Result<Table> {
    log::debug!("Fetching {url}");
    let response = ureq::get(url)
        .call()
        .with_context(|| format!("fetching {url}"))?;
    read_csv(response.into_reader()).with_context(|| format!("parsing CSV from {url}"))
}

/// Load a local copy of the dataset.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one passenger per line
/// * `.json`    – `[{ "PassengerId": 1, "Pclass": 3, ... }, ...]`
/// * `.parquet` – one column per field
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)
        }
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Parse CSV with a header row. Cell types are guessed per field.
pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(Value::infer).collect());
    }

    Ok(Table::from_rows(headers, rows))
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "PassengerId": 1, "Pclass": 3, "Name": "Braund, Mr. Owen Harris", ... },
///   ...
/// ]
/// ```
///
/// Keys missing from a record become nulls.
pub fn parse_json(text: &str) -> Result<Table> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_value).unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Ok(Table::from_rows(headers, rows))
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load a Parquet file, one table column per Arrow field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); column_names.len()];

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (col_idx, values) in columns.iter_mut().enumerate() {
            let col_array = batch.column(col_idx);
            values.extend((0..batch.num_rows()).map(|row| extract_value(col_array, row)));
        }
    }

    Table::from_columns(column_names.into_iter().zip(columns)).context("assembling parquet columns")
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_value(col: &ArrayRef, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Null;
    }
    match col.data_type() {
        DataType::Utf8 => Value::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Value::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Value::Integer(i64::from(col.as_primitive::<Int32Type>().value(row))),
        DataType::Int64 => Value::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Value::Float(f64::from(col.as_primitive::<Float32Type>().value(row))),
        DataType::Float64 => Value::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Value::Bool(col.as_boolean().value(row)),
        other => {
            log::warn!("Unsupported parquet column type {other:?}, reading as null");
            Value::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const CSV: &str = "PassengerId,Pclass,Name,Age\n\
                       1,3,\"Braund, Mr. Owen Harris\",22\n\
                       2,1,\"Cumings, Mrs. John Bradley\",\n";

    #[test]
    fn csv_keeps_quoted_commas_and_nulls() {
        let table = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.column("Name").unwrap()[0],
            Value::String("Braund, Mr. Owen Harris".to_string())
        );
        assert_eq!(table.column("Age").unwrap()[1], Value::Null);
    }

    #[test]
    fn json_fills_missing_keys() {
        let table = parse_json(r#"[{"Pclass": 1, "Age": 30.5}, {"Pclass": 2}]"#).unwrap();
        assert_eq!(table.column_names, vec!["Pclass", "Age"]);
        assert_eq!(table.column("Age").unwrap(), &[Value::Float(30.5), Value::Null]);
    }

    #[test]
    fn json_rejects_non_array() {
        assert!(parse_json(r#"{"Pclass": 1}"#).is_err());
    }

    #[test]
    fn unsupported_extension_fails() {
        let err = load_file(Path::new("passengers.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn csv_file_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.column("Pclass").unwrap(), &[Value::Integer(3), Value::Integer(1)]);
    }

    #[test]
    fn parquet_round_trips_typed_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Pclass", DataType::Int64, false),
            Field::new("Sex", DataType::Utf8, false),
            Field::new("Age", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![1, 3])),
                Arc::new(StringArray::from(vec!["female", "male"])),
                Arc::new(Float64Array::from(vec![Some(38.0), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("Age").unwrap(), &[Value::Float(38.0), Value::Null]);
        assert_eq!(table.column("Sex").unwrap()[1], Value::String("male".to_string()));
    }
}
