use std::fmt;

use crate::error::TableError;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a dataset
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell mirroring the SQLite storage classes plus
/// booleans from CSV input. Sorting relies on the total order, so `CellValue`
/// must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

// -- Manual Eq/Ord so rows can be sorted on any column --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let ra = rank(self);
        let rb = rank(other);
        if ra != rb {
            return ra.cmp(&rb);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// An in-memory table: ordered column names plus rows aligned positionally.
///
/// Replaced wholesale on every load or sort; columns never change after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build a dataset, validating that every row matches the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, TableError> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::MalformedDataset {
                    row: i,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Dataset { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Position of the first column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A copy of this dataset with rows stably sorted ascending on one column.
    /// The caller must have resolved `col` via [`Dataset::column_index`].
    pub(crate) fn sorted_by(&self, col: usize) -> Dataset {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| a[col].cmp(&b[col]));
        Dataset {
            columns: self.columns.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_order_ranks_types_before_values() {
        let mut vals = vec![
            CellValue::Text("a".into()),
            CellValue::Float(0.5),
            CellValue::Integer(7),
            CellValue::Null,
        ];
        vals.sort();
        assert_eq!(
            vals,
            vec![
                CellValue::Null,
                CellValue::Integer(7),
                CellValue::Float(0.5),
                CellValue::Text("a".into()),
            ]
        );
    }

    #[test]
    fn float_order_is_total() {
        let mut vals = vec![
            CellValue::Float(f64::NAN),
            CellValue::Float(1.0),
            CellValue::Float(-1.0),
        ];
        vals.sort();
        assert_eq!(vals[0], CellValue::Float(-1.0));
        assert_eq!(vals[1], CellValue::Float(1.0));
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let err = Dataset::new(
            vec!["a".into(), "b".into()],
            vec![vec![CellValue::Integer(1)]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TableError::MalformedDataset {
                row: 0,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn display_renders_null_as_empty() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Integer(-3).to_string(), "-3");
        assert_eq!(CellValue::Text("hi".into()).to_string(), "hi");
    }
}
