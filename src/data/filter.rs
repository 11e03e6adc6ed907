use super::model::{Dataset, Value};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Predicate – a composable row condition
// ---------------------------------------------------------------------------

/// A boolean condition over one row, composable with `and` / `or` / `not`.
///
/// Column references are validated before evaluation: a predicate naming a
/// column the dataset does not have fails with `UnknownColumn` instead of
/// silently matching nothing.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Column value equals the given value.
    Eq(String, Value),
    /// Column value is one of the given values.
    In(String, Vec<Value>),
    /// Column value is the missing sentinel.
    IsNull(String),
    /// Column value is present.
    NotNull(String),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Predicate::Eq(column.to_string(), value.into())
    }

    pub fn one_of<I, V>(column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Predicate::In(
            column.to_string(),
            values.into_iter().map(Into::into).collect(),
        )
    }

    pub fn is_null(column: &str) -> Self {
        Predicate::IsNull(column.to_string())
    }

    pub fn not_null(column: &str) -> Self {
        Predicate::NotNull(column.to_string())
    }

    pub fn and(self, other: Predicate) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate) -> Self {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    /// Check every referenced column against the dataset's column list.
    fn validate(&self, dataset: &Dataset) -> Result<()> {
        match self {
            Predicate::Eq(col, _)
            | Predicate::In(col, _)
            | Predicate::IsNull(col)
            | Predicate::NotNull(col) => dataset.column_index(col).map(|_| ()),
            Predicate::And(a, b) | Predicate::Or(a, b) => {
                a.validate(dataset)?;
                b.validate(dataset)
            }
            Predicate::Not(inner) => inner.validate(dataset),
        }
    }

    /// Evaluate against one row. Columns were validated beforehand.
    fn eval(&self, columns: &[String], values: &[Value]) -> bool {
        let lookup = |col: &str| {
            let idx = columns.iter().position(|c| c == col).unwrap_or(0);
            &values[idx]
        };
        match self {
            Predicate::Eq(col, expected) => lookup(col) == expected,
            Predicate::In(col, set) => set.contains(lookup(col)),
            Predicate::IsNull(col) => lookup(col).is_null(),
            Predicate::NotNull(col) => !lookup(col).is_null(),
            Predicate::And(a, b) => a.eval(columns, values) && b.eval(columns, values),
            Predicate::Or(a, b) => a.eval(columns, values) || b.eval(columns, values),
            Predicate::Not(inner) => !inner.eval(columns, values),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset filtering
// ---------------------------------------------------------------------------

impl Dataset {
    /// Per-row boolean mask for a predicate, in current row order.
    pub fn mask(&self, predicate: &Predicate) -> Result<Vec<bool>> {
        predicate.validate(self)?;
        Ok(self
            .rows
            .iter()
            .map(|row| predicate.eval(&self.columns, &row.values))
            .collect())
    }

    /// New dataset keeping the rows the predicate accepts, original row
    /// order preserved.
    pub fn filter(&self, predicate: &Predicate) -> Result<Dataset> {
        let mask = self.mask(predicate)?;
        let positions: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter(|(_, &keep)| keep)
            .map(|(i, _)| i)
            .collect();
        Ok(self.take_positions(&positions))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatasetError;

    fn sightings() -> Dataset {
        Dataset::from_rows(
            vec!["City".into(), "State".into(), "Shape".into()],
            vec![
                vec!["Dallas".into(), "TX".into(), "disk".into()],
                vec!["Austin".into(), "TX".into(), Value::Null],
                vec!["Reno".into(), "NV".into(), "light".into()],
                vec!["Houston".into(), "TX".into(), "disk".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn eq_filter_preserves_row_order() {
        let ds = sightings();
        let tx = ds.filter(&Predicate::eq("State", "TX")).unwrap();
        assert_eq!(tx.len(), 3);
        assert_eq!(tx.labels(), vec![0, 1, 3]);
    }

    #[test]
    fn filter_and_negation_partition_the_rows() {
        let ds = sightings();
        let p = Predicate::eq("State", "TX");
        let yes = ds.filter(&p).unwrap();
        let no = ds.filter(&p.clone().not()).unwrap();
        assert_eq!(yes.len() + no.len(), ds.len());
        for label in yes.labels() {
            assert!(!no.labels().contains(&label));
        }
    }

    #[test]
    fn and_or_composition() {
        let ds = sightings();
        let p = Predicate::eq("State", "TX").and(Predicate::eq("Shape", "disk"));
        assert_eq!(ds.filter(&p).unwrap().labels(), vec![0, 3]);

        let p = Predicate::eq("City", "Reno").or(Predicate::eq("City", "Austin"));
        assert_eq!(ds.filter(&p).unwrap().labels(), vec![1, 2]);
    }

    #[test]
    fn one_of_matches_membership() {
        let ds = sightings();
        let p = Predicate::one_of("City", ["Austin", "Dallas", "Houston"]);
        assert_eq!(ds.filter(&p).unwrap().labels(), vec![0, 1, 3]);
    }

    #[test]
    fn null_predicates() {
        let ds = sightings();
        assert_eq!(
            ds.mask(&Predicate::is_null("Shape")).unwrap(),
            vec![false, true, false, false]
        );
        assert_eq!(
            ds.filter(&Predicate::not_null("Shape")).unwrap().labels(),
            vec![0, 2, 3]
        );
    }

    #[test]
    fn unknown_column_is_rejected_anywhere_in_the_tree() {
        let ds = sightings();
        let p = Predicate::eq("State", "TX").and(Predicate::is_null("Shpae"));
        let err = ds.filter(&p).unwrap_err();
        assert!(matches!(err, DatasetError::UnknownColumn { .. }));
    }
}
