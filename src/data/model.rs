use std::collections::BTreeSet;
use std::fmt;

use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Value – a single cell of the dataset
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value guessed from flat-file input.
/// Used as a sort and dedup key downstream so `Value` must be `Ord` + `Hash`.
///
/// Equality is by variant, then payload: `Integer(2)` and `Float(2.0)` are
/// distinct values, matching what the loader's type guessing produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Missing sentinel: no data recorded for this cell.
    Null,
}

// -- Manual Eq/Ord so Value can be a sort key and live in BTreeSet --

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

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
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
    /// Whether this cell is the missing sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

// ---------------------------------------------------------------------------
// DType – per-column type summary
// ---------------------------------------------------------------------------

/// The inferred type of a column, reported by [`Dataset::dtypes`].
///
/// Nulls are ignored during inference; an all-null column is `Null`. A column
/// mixing integers and floats is `Float`, any other mix is `Mixed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    String,
    Integer,
    Float,
    Bool,
    Null,
    Mixed,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::String => "string",
            DType::Integer => "integer",
            DType::Float => "float",
            DType::Bool => "bool",
            DType::Null => "null",
            DType::Mixed => "mixed",
        };
        write!(f, "{name}")
    }
}

fn dtype_of(value: &Value) -> DType {
    match value {
        Value::String(_) => DType::String,
        Value::Integer(_) => DType::Integer,
        Value::Float(_) => DType::Float,
        Value::Bool(_) => DType::Bool,
        Value::Null => DType::Null,
    }
}

fn merge_dtypes(a: DType, b: DType) -> DType {
    match (a, b) {
        (x, y) if x == y => x,
        (DType::Null, other) | (other, DType::Null) => other,
        (DType::Integer, DType::Float) | (DType::Float, DType::Integer) => DType::Float,
        _ => DType::Mixed,
    }
}

// ---------------------------------------------------------------------------
// Row – one record with its stable label
// ---------------------------------------------------------------------------

/// One record. The label is assigned at load time and survives filtering,
/// sorting and row selection, so a row stays addressable after reordering.
#[derive(Debug, Clone)]
pub(crate) struct Row {
    pub(crate) label: u64,
    pub(crate) values: Vec<Value>,
}

/// Borrowed view of one row, handed to column-derivation closures.
#[derive(Clone, Copy)]
pub struct RowView<'a> {
    columns: &'a [String],
    row: &'a Row,
}

impl<'a> RowView<'a> {
    /// Stable label of this row.
    pub fn label(&self) -> u64 {
        self.row.label
    }

    /// Value of the named column, if the column exists.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.row.values.get(idx)
    }
}

// ---------------------------------------------------------------------------
// Column – an owned projection of a single column
// ---------------------------------------------------------------------------

/// A named ordered sequence of values, aligned with the row labels it was
/// projected from.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    labels: Vec<u64>,
    values: Vec<Value>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn labels(&self) -> &[u64] {
        &self.labels
    }

    /// Value at a zero-based position.
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    /// Per-position missing-sentinel mask.
    pub fn is_null(&self) -> Vec<bool> {
        self.values.iter().map(Value::is_null).collect()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// An in-memory table: ordered column names and ordered labelled rows.
///
/// Invariant: every row holds exactly one value (possibly [`Value::Null`])
/// per declared column, in column order.
///
/// Ownership contract: operations that change the column set or fill values
/// mutate in place (`add_column`, `rename_columns`, `drop_column`,
/// `fill_missing`); every row-set operation returns a new `Dataset` and
/// leaves the receiver untouched.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Row>,
}

impl Dataset {
    /// Create an empty dataset with the given column names.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        check_unique_columns(&columns)?;
        Ok(Dataset {
            columns,
            rows: Vec::new(),
        })
    }

    /// Build a dataset from in-memory records. Labels are assigned 0..n in
    /// the order given.
    pub fn from_rows(columns: Vec<String>, records: Vec<Vec<Value>>) -> Result<Self> {
        check_unique_columns(&columns)?;
        for (i, rec) in records.iter().enumerate() {
            if rec.len() != columns.len() {
                return Err(DatasetError::format(format!(
                    "row {i}: expected {} values, found {}",
                    columns.len(),
                    rec.len()
                )));
            }
        }
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(i, values)| Row {
                label: i as u64,
                values,
            })
            .collect();
        Ok(Dataset { columns, rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row labels in current row order.
    pub fn labels(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.label).collect()
    }

    /// Label and values of the row at a zero-based position.
    pub fn row(&self, position: usize) -> Option<(u64, &[Value])> {
        self.rows
            .get(position)
            .map(|r| (r.label, r.values.as_slice()))
    }

    /// Resolve a column name to its index, or fail with `UnknownColumn`.
    pub(crate) fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DatasetError::unknown_column(name))
    }

    /// Project a single column by name.
    pub fn column(&self, name: &str) -> Result<Column> {
        let idx = self.column_index(name)?;
        Ok(Column {
            name: name.to_string(),
            labels: self.labels(),
            values: self.rows.iter().map(|r| r.values[idx].clone()).collect(),
        })
    }

    /// Inferred type of every column, in column order.
    pub fn dtypes(&self) -> Vec<(String, DType)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let dtype = self
                    .rows
                    .iter()
                    .map(|r| dtype_of(&r.values[idx]))
                    .fold(DType::Null, merge_dtypes);
                (name.clone(), dtype)
            })
            .collect()
    }

    /// Append a freshly loaded record, labelling it with its load position.
    /// The loader guarantees arity; not exposed outside the crate.
    pub(crate) fn push_loaded_row(&mut self, values: Vec<Value>) {
        let label = self.rows.len() as u64;
        self.rows.push(Row { label, values });
    }

    /// New dataset keeping the rows at the given positions, in the order
    /// given. Positions must be in bounds; callers validate.
    pub(crate) fn take_positions(&self, positions: &[usize]) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            rows: positions.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    // ---- Column mutation (in place) ----

    /// Append a column derived from each row. Fails with `DuplicateColumn`
    /// if the name is already taken; the dataset is unchanged on error.
    pub fn add_column<F>(&mut self, name: &str, mut derive: F) -> Result<()>
    where
        F: FnMut(RowView<'_>) -> Value,
    {
        if self.columns.iter().any(|c| c == name) {
            return Err(DatasetError::DuplicateColumn {
                name: name.to_string(),
            });
        }
        let new_values: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                derive(RowView {
                    columns: &self.columns,
                    row,
                })
            })
            .collect();
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(new_values) {
            row.values.push(value);
        }
        log::debug!("added column '{name}'");
        Ok(())
    }

    /// Rename columns in place. Every source name must exist and no rename
    /// may collide with a surviving name; validation happens up front so a
    /// failed call leaves the dataset unchanged.
    pub fn rename_columns(&mut self, mapping: &[(&str, &str)]) -> Result<()> {
        let mut renamed = self.columns.clone();
        for &(from, to) in mapping {
            let idx = self.column_index(from)?;
            renamed[idx] = to.to_string();
        }
        check_unique_columns(&renamed)?;
        self.columns = renamed;
        Ok(())
    }

    /// Remove a column and its values from every row.
    pub fn drop_column(&mut self, name: &str) -> Result<()> {
        let idx = self.column_index(name)?;
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.values.remove(idx);
        }
        log::debug!("dropped column '{name}'");
        Ok(())
    }
}

fn check_unique_columns(columns: &[String]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for name in columns {
        if !seen.insert(name.as_str()) {
            return Err(DatasetError::DuplicateColumn { name: name.clone() });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
