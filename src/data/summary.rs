use std::collections::BTreeMap;

use super::model::{Dataset, Value};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Column summaries
// ---------------------------------------------------------------------------

/// Object-style summary of one column, as reported by [`Dataset::describe`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    /// Non-missing values.
    pub count: usize,
    /// Distinct non-missing values.
    pub unique: usize,
    /// Most frequent non-missing value, if any.
    pub top: Option<Value>,
    /// Occurrences of `top`.
    pub freq: usize,
}

impl Dataset {
    /// Occurrence count of each value in a column, most frequent first,
    /// ties in value order. Missing values are excluded unless
    /// `dropna` is `false`, in which case [`Value::Null`] gets its own row.
    pub fn value_counts(&self, column: &str, dropna: bool) -> Result<Vec<(Value, usize)>> {
        let idx = self.column_index(column)?;
        let mut counts: BTreeMap<&Value, usize> = BTreeMap::new();
        for row in &self.rows {
            let value = &row.values[idx];
            if dropna && value.is_null() {
                continue;
            }
            *counts.entry(value).or_insert(0) += 1;
        }
        // BTreeMap iteration gives value order; the stable sort keeps it for
        // equal counts.
        let mut out: Vec<(Value, usize)> = counts
            .into_iter()
            .map(|(v, n)| (v.clone(), n))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(out)
    }

    /// Count / unique / top / freq for one column.
    pub fn describe(&self, column: &str) -> Result<ColumnSummary> {
        let counts = self.value_counts(column, true)?;
        let count = counts.iter().map(|(_, n)| n).sum();
        let (top, freq) = match counts.first() {
            Some((value, n)) => (Some(value.clone()), *n),
            None => (None, 0),
        };
        Ok(ColumnSummary {
            count,
            unique: counts.len(),
            top,
            freq,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes() -> Dataset {
        Dataset::from_rows(
            vec!["Shape".into()],
            vec![
                vec!["disk".into()],
                vec!["light".into()],
                vec!["disk".into()],
                vec![Value::Null],
                vec!["disk".into()],
                vec!["circle".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn value_counts_orders_by_count_then_value() {
        let ds = shapes();
        let counts = ds.value_counts("Shape", true).unwrap();
        assert_eq!(
            counts,
            vec![
                (Value::from("disk"), 3),
                (Value::from("circle"), 1),
                (Value::from("light"), 1),
            ]
        );
    }

    #[test]
    fn value_counts_can_include_nulls() {
        let ds = shapes();
        let counts = ds.value_counts("Shape", false).unwrap();
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, ds.len());
        assert!(counts.contains(&(Value::Null, 1)));
    }

    #[test]
    fn describe_reports_top_and_freq() {
        let ds = shapes();
        let summary = ds.describe("Shape").unwrap();
        assert_eq!(
            summary,
            ColumnSummary {
                count: 5,
                unique: 3,
                top: Some(Value::from("disk")),
                freq: 3,
            }
        );
    }

    #[test]
    fn describe_of_all_null_column_is_empty() {
        let ds = Dataset::from_rows(
            vec!["c".into()],
            vec![vec![Value::Null], vec![Value::Null]],
        )
        .unwrap();
        let summary = ds.describe("c").unwrap();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.top, None);
    }
}
