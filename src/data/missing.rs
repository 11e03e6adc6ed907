use super::model::{Dataset, Value};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Missing-value handling
// ---------------------------------------------------------------------------

/// Which rows [`Dataset::drop_nulls`] removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropNulls {
    /// Drop a row if any column is missing.
    Any,
    /// Drop a row only if every column is missing.
    All,
}

impl Dataset {
    /// Per-row missing mask for one column, in current row order.
    pub fn is_null(&self, column: &str) -> Result<Vec<bool>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(|r| r.values[idx].is_null()).collect())
    }

    /// Complement of [`Dataset::is_null`].
    pub fn not_null(&self, column: &str) -> Result<Vec<bool>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(|r| !r.values[idx].is_null()).collect())
    }

    /// Missing-value count per column, in column order.
    pub fn null_counts(&self) -> Vec<(String, usize)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let count = self.rows.iter().filter(|r| r.values[idx].is_null()).count();
                (name.clone(), count)
            })
            .collect()
    }

    /// New dataset without the rows that have missing values, per `mode`.
    pub fn drop_nulls(&self, mode: DropNulls) -> Dataset {
        let positions: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                let nulls = row.values.iter().filter(|v| v.is_null()).count();
                match mode {
                    DropNulls::Any => nulls == 0,
                    DropNulls::All => nulls < row.values.len(),
                }
            })
            .map(|(i, _)| i)
            .collect();
        self.take_positions(&positions)
    }

    /// Replace every missing sentinel with `value`, in place, scoped to one
    /// column or (with `None`) to the whole dataset. Filling does not coerce
    /// the column dtype: a string fill in a numeric column reads back as
    /// `Mixed` from [`Dataset::dtypes`].
    pub fn fill_missing(&mut self, value: Value, column: Option<&str>) -> Result<()> {
        let indices: Vec<usize> = match column {
            Some(name) => vec![self.column_index(name)?],
            None => (0..self.columns.len()).collect(),
        };
        let mut filled = 0usize;
        for row in &mut self.rows {
            for &idx in &indices {
                if row.values[idx].is_null() {
                    row.values[idx] = value.clone();
                    filled += 1;
                }
            }
        }
        log::debug!("filled {filled} missing values");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatasetError;

    fn holey() -> Dataset {
        Dataset::from_rows(
            vec!["Shape".into(), "Colors".into()],
            vec![
                vec!["disk".into(), "red".into()],
                vec![Value::Null, "green".into()],
                vec!["light".into(), Value::Null],
                vec![Value::Null, Value::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn null_masks_are_complementary() {
        let ds = holey();
        let isnull = ds.is_null("Shape").unwrap();
        let notnull = ds.not_null("Shape").unwrap();
        assert_eq!(isnull, vec![false, true, false, true]);
        for (a, b) in isnull.iter().zip(&notnull) {
            assert_ne!(a, b);
        }

        let err = ds.is_null("shape").unwrap_err();
        assert!(matches!(err, DatasetError::UnknownColumn { .. }));
    }

    #[test]
    fn null_counts_per_column() {
        let ds = holey();
        assert_eq!(
            ds.null_counts(),
            vec![("Shape".to_string(), 2), ("Colors".to_string(), 2)]
        );
    }

    #[test]
    fn drop_nulls_any_vs_all() {
        let ds = holey();
        assert_eq!(ds.drop_nulls(DropNulls::Any).labels(), vec![0]);
        assert_eq!(ds.drop_nulls(DropNulls::All).labels(), vec![0, 1, 2]);
    }

    #[test]
    fn fill_missing_one_column() {
        let mut ds = holey();
        ds.fill_missing(Value::from("Unknown"), Some("Colors"))
            .unwrap();
        assert_eq!(ds.is_null("Colors").unwrap(), vec![false; 4]);
        // The other column is untouched.
        assert_eq!(ds.is_null("Shape").unwrap(), vec![false, true, false, true]);
    }

    #[test]
    fn fill_missing_everywhere_leaves_no_sentinel() {
        let mut ds = holey();
        ds.fill_missing(Value::from("Unknown"), None).unwrap();
        for name in ["Shape", "Colors"] {
            assert!(ds.is_null(name).unwrap().iter().all(|&n| !n));
        }
    }
}
