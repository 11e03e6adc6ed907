use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value as JsonValue;

use super::model::{Dataset, Value};
use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with column names, one record per line
/// * `.json` – records-oriented: `[{ "col": value, ... }, ...]`
///
/// Row labels are assigned `0..n` in file order.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        other => {
            return Err(DatasetError::format(format!(
                "unsupported file extension: .{other}"
            )))
        }
    };

    let (rows, cols) = dataset.shape();
    log::info!("loaded {rows} rows, {cols} columns from {}", path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: first row is the header, every following row one record.
/// Empty fields become [`Value::Null`]; everything else goes through
/// [`guess_value`]. A row whose field count differs from the header is a
/// format error.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_open_error(e, path))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DatasetError::format(format!("reading CSV header: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut dataset = Dataset::new(headers)?;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            // The csv crate reports ragged rows (UnequalLengths) here.
            DatasetError::format(format!("CSV row {row_no}: {e}"))
        })?;
        let values: Vec<Value> = record.iter().map(guess_value).collect();
        dataset.push_loaded_row(values);
    }

    Ok(dataset)
}

fn csv_open_error(e: csv::Error, path: &Path) -> DatasetError {
    match e.kind() {
        csv::ErrorKind::Io(io) if io.kind() == ErrorKind::NotFound => DatasetError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DatasetError::format(format!("opening CSV: {e}")),
    }
}

/// Guess the scalar type of one CSV field.
fn guess_value(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    if s == "true" || s == "false" {
        return Value::Bool(s == "true");
    }
    Value::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "City": "Dallas", "State": "TX", "Shape": null },
///   { "City": "Reno",   "State": "NV" }
/// ]
/// ```
///
/// The column set is the union of keys in order of first appearance; keys
/// absent from a record become [`Value::Null`]. Nested arrays or objects are
/// a format error.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            DatasetError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DatasetError::format(format!("reading JSON file: {e}"))
        }
    })?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| DatasetError::format(format!("parsing JSON: {e}")))?;

    let records = root
        .as_array()
        .ok_or_else(|| DatasetError::format("expected top-level JSON array"))?;

    // First pass: the column set, in order of first appearance.
    let mut objects = Vec::with_capacity(records.len());
    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DatasetError::format(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let mut dataset = Dataset::new(columns.clone())?;

    // Second pass: one row per record, aligned with the column list.
    for (i, obj) in objects.into_iter().enumerate() {
        let values = columns
            .iter()
            .map(|col| match obj.get(col) {
                Some(v) => json_to_value(v, i, col),
                None => Ok(Value::Null),
            })
            .collect::<Result<Vec<Value>>>()?;
        dataset.push_loaded_row(values);
    }

    Ok(dataset)
}

fn json_to_value(val: &JsonValue, row: usize, col: &str) -> Result<Value> {
    match val {
        JsonValue::String(s) => Ok(Value::String(s.clone())),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Ok(Value::String(n.to_string()))
            }
        }
        JsonValue::Bool(b) => Ok(Value::Bool(*b)),
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Array(_) | JsonValue::Object(_) => Err(DatasetError::format(format!(
            "row {row}, column '{col}': nested values are not supported"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::Builder;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut tmp = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(tmp, "{contents}").unwrap();
        tmp
    }

    #[test]
    fn csv_round_trip_with_type_guessing() {
        let tmp = write_temp(
            ".csv",
            "City,State,Sightings,Avg\nDallas,TX,12,1.5\nReno,NV,,0.25\n",
        );
        let ds = load_file(tmp.path()).unwrap();
        assert_eq!(ds.shape(), (2, 4));
        assert_eq!(ds.columns(), ["City", "State", "Sightings", "Avg"]);
        assert_eq!(ds.row(0).unwrap().1[2], Value::Integer(12));
        assert_eq!(ds.row(0).unwrap().1[3], Value::Float(1.5));
        assert_eq!(ds.row(1).unwrap().1[2], Value::Null);
        assert_eq!(ds.labels(), vec![0, 1]);
    }

    #[test]
    fn csv_ragged_row_is_a_format_error() {
        let tmp = write_temp(".csv", "a,b\n1,2\n3\n");
        let err = load_file(tmp.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Format { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_file(Path::new("/no/such/dir/data.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound { .. }));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("data.parquet")).unwrap_err();
        assert!(matches!(err, DatasetError::Format { .. }));
    }

    #[test]
    fn json_records_take_column_union() {
        let tmp = write_temp(
            ".json",
            r#"[{"City":"Dallas","State":"TX"},{"City":"Reno","Shape":"disk"}]"#,
        );
        let ds = load_file(tmp.path()).unwrap();
        assert_eq!(ds.columns(), ["City", "State", "Shape"]);
        assert_eq!(ds.row(0).unwrap().1[2], Value::Null);
        assert_eq!(ds.row(1).unwrap().1[1], Value::Null);
        assert_eq!(ds.row(1).unwrap().1[2], Value::String("disk".into()));
    }

    #[test]
    fn json_nested_value_is_a_format_error() {
        let tmp = write_temp(".json", r#"[{"City":["Dallas"]}]"#);
        let err = load_file(tmp.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Format { .. }));
    }
}
