use std::ops::Range;

use super::model::{Dataset, Row};
use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Column and row selection
// ---------------------------------------------------------------------------

impl Dataset {
    /// New dataset containing only the requested columns, in the requested
    /// order, row order preserved. Unknown names fail with `UnknownColumn`.
    pub fn select_columns(&self, names: &[&str]) -> Result<Dataset> {
        let indices: Vec<usize> = names
            .iter()
            .map(|n| self.column_index(n))
            .collect::<Result<_>>()?;
        let rows = self
            .rows
            .iter()
            .map(|r| Row {
                label: r.label,
                values: indices.iter().map(|&i| r.values[i].clone()).collect(),
            })
            .collect();
        Ok(Dataset {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows,
        })
    }

    /// Rows whose label falls in `[from, to]`, inclusive on both ends, in
    /// current row order. Both endpoint labels must be present in the
    /// dataset; an absent endpoint fails with `RowOutOfBounds`.
    pub fn select_rows_by_label(&self, from: u64, to: u64) -> Result<Dataset> {
        for endpoint in [from, to] {
            if !self.rows.iter().any(|r| r.label == endpoint) {
                return Err(DatasetError::RowOutOfBounds {
                    what: format!("label {endpoint}"),
                });
            }
        }
        let positions: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, r)| (from..=to).contains(&r.label))
            .map(|(i, _)| i)
            .collect();
        Ok(self.take_positions(&positions))
    }

    /// Rows at zero-based positions `[range.start, range.end)`. An end past
    /// the row count fails with `RowOutOfBounds`; an empty range yields an
    /// empty dataset.
    pub fn select_rows_by_position(&self, range: Range<usize>) -> Result<Dataset> {
        if range.end > self.rows.len() {
            return Err(DatasetError::RowOutOfBounds {
                what: format!(
                    "position {} (dataset has {} rows)",
                    range.end,
                    self.rows.len()
                ),
            });
        }
        let positions: Vec<usize> = range.collect();
        Ok(self.take_positions(&positions))
    }

    /// First `n` rows (all of them if the dataset is shorter).
    pub fn head(&self, n: usize) -> Dataset {
        let take = n.min(self.rows.len());
        let positions: Vec<usize> = (0..take).collect();
        self.take_positions(&positions)
    }

    /// Last `n` rows (all of them if the dataset is shorter).
    pub fn tail(&self, n: usize) -> Dataset {
        let skip = self.rows.len().saturating_sub(n);
        let positions: Vec<usize> = (skip..self.rows.len()).collect();
        self.take_positions(&positions)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Value;

    fn numbers() -> Dataset {
        Dataset::from_rows(
            vec!["n".into(), "tag".into()],
            (0..5)
                .map(|i| vec![Value::Integer(i), Value::String(format!("r{i}"))])
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn selecting_all_columns_is_identity() {
        let ds = numbers();
        let all = ds.select_columns(&["n", "tag"]).unwrap();
        assert_eq!(all.columns(), ds.columns());
        assert_eq!(all.labels(), ds.labels());
        for i in 0..ds.len() {
            assert_eq!(all.row(i).unwrap().1, ds.row(i).unwrap().1);
        }
    }

    #[test]
    fn select_columns_reorders_and_projects() {
        let ds = numbers();
        let proj = ds.select_columns(&["tag"]).unwrap();
        assert_eq!(proj.columns(), ["tag"]);
        assert_eq!(proj.shape(), (5, 1));

        let swapped = ds.select_columns(&["tag", "n"]).unwrap();
        assert_eq!(swapped.columns(), ["tag", "n"]);
        assert_eq!(swapped.row(0).unwrap().1[1], Value::Integer(0));
    }

    #[test]
    fn select_columns_rejects_unknown_name() {
        let err = numbers().select_columns(&["n", "missing"]).unwrap_err();
        assert!(matches!(err, DatasetError::UnknownColumn { .. }));
    }

    #[test]
    fn label_range_is_inclusive() {
        let ds = numbers();
        let slice = ds.select_rows_by_label(1, 3).unwrap();
        assert_eq!(slice.labels(), vec![1, 2, 3]);
    }

    #[test]
    fn label_selection_requires_present_endpoints() {
        let ds = numbers();
        let single = ds.select_rows_by_label(1, 1).unwrap();
        assert_eq!(single.labels(), vec![1]);

        // Label 0 was sliced away, so it can no longer anchor a range.
        let err = single.select_rows_by_label(0, 1).unwrap_err();
        assert!(matches!(err, DatasetError::RowOutOfBounds { .. }));
    }

    #[test]
    fn position_range_is_half_open() {
        let ds = numbers();
        let slice = ds.select_rows_by_position(0..3).unwrap();
        assert_eq!(slice.labels(), vec![0, 1, 2]);

        let empty = ds.select_rows_by_position(2..2).unwrap();
        assert!(empty.is_empty());

        let err = ds.select_rows_by_position(3..6).unwrap_err();
        assert!(matches!(err, DatasetError::RowOutOfBounds { .. }));
    }

    #[test]
    fn head_and_tail_partition_the_rows() {
        let ds = numbers();
        let head = ds.head(2);
        let tail = ds.tail(3);
        assert_eq!(head.labels(), vec![0, 1]);
        assert_eq!(tail.labels(), vec![2, 3, 4]);
        assert_eq!(head.len() + tail.len(), ds.len());

        assert_eq!(ds.head(99).len(), 5);
        assert_eq!(ds.tail(99).len(), 5);
    }
}
