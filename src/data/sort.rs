use std::cmp::Ordering;
use std::collections::HashSet;

use super::model::{Dataset, Value};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

impl Dataset {
    /// New dataset with rows sorted by the given `(column, ascending)` keys.
    /// The sort is stable: rows comparing equal on every key keep their
    /// original relative order. Unknown key columns fail with
    /// `UnknownColumn`.
    pub fn sort_by(&self, keys: &[(&str, bool)]) -> Result<Dataset> {
        let key_indices: Vec<(usize, bool)> = keys
            .iter()
            .map(|&(name, ascending)| self.column_index(name).map(|i| (i, ascending)))
            .collect::<Result<_>>()?;

        let mut positions: Vec<usize> = (0..self.rows.len()).collect();
        positions.sort_by(|&a, &b| {
            for &(idx, ascending) in &key_indices {
                let ord = self.rows[a].values[idx].cmp(&self.rows[b].values[idx]);
                let ord = if ascending { ord } else { ord.reverse() };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
        Ok(self.take_positions(&positions))
    }

    /// New dataset with rows ordered by their stable labels.
    pub fn sort_by_label(&self, ascending: bool) -> Dataset {
        let mut positions: Vec<usize> = (0..self.rows.len()).collect();
        positions.sort_by_key(|&i| self.rows[i].label);
        if !ascending {
            positions.reverse();
        }
        self.take_positions(&positions)
    }
}

// ---------------------------------------------------------------------------
// Duplicate detection
// ---------------------------------------------------------------------------

impl Dataset {
    /// Per-row duplicate mask in current row order: `true` when an earlier
    /// row has equal values in all key columns (all columns when
    /// `key_columns` is `None`). The first occurrence is never marked.
    pub fn duplicated(&self, key_columns: Option<&[&str]>) -> Result<Vec<bool>> {
        let indices: Vec<usize> = match key_columns {
            Some(names) => names
                .iter()
                .map(|n| self.column_index(n))
                .collect::<Result<_>>()?,
            None => (0..self.columns.len()).collect(),
        };

        let mut seen: HashSet<Vec<Value>> = HashSet::with_capacity(self.rows.len());
        Ok(self
            .rows
            .iter()
            .map(|row| {
                let key: Vec<Value> = indices.iter().map(|&i| row.values[i].clone()).collect();
                !seen.insert(key)
            })
            .collect())
    }

    /// New dataset keeping only the first occurrence of each key, row order
    /// preserved.
    pub fn drop_duplicates(&self, key_columns: Option<&[&str]>) -> Result<Dataset> {
        let duplicated = self.duplicated(key_columns)?;
        let positions: Vec<usize> = duplicated
            .iter()
            .enumerate()
            .filter(|(_, &dup)| !dup)
            .map(|(i, _)| i)
            .collect();
        Ok(self.take_positions(&positions))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
