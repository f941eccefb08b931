use log::info;

use crate::data::model::{CellValue, Dataset};
use crate::error::TableError;
use crate::render::RenderPlan;

// ---------------------------------------------------------------------------
// TableView – current dataset + render plan emission
// ---------------------------------------------------------------------------

/// Presentation state for one on-screen table.
///
/// The only state carried between calls is the current dataset, kept so
/// [`TableView::sort_by`] can act without re-fetching. Both operations return
/// the full render plan for the UI layer to draw; nothing is drawn here.
#[derive(Debug, Default)]
pub struct TableView {
    dataset: Option<Dataset>,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently held dataset, if any.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Replace the current dataset and emit a full render plan.
    ///
    /// Fails with [`TableError::MalformedDataset`] when any row's length
    /// differs from the column count; the previous dataset is kept in that
    /// case.
    pub fn set_dataset(
        &mut self,
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<RenderPlan, TableError> {
        let dataset = Dataset::new(columns, rows)?;
        info!(
            "table: loaded {} rows, columns {:?}",
            dataset.len(),
            dataset.columns()
        );
        let plan = render_plan(&dataset);
        self.dataset = Some(dataset);
        Ok(plan)
    }

    /// Stable ascending sort on one column, re-emitting the render plan.
    ///
    /// Returns `Ok(None)` without touching state when no dataset is loaded or
    /// the dataset has zero rows. Fails with [`TableError::UnknownColumn`]
    /// when the name is not among the current columns. There is no direction
    /// state: sorting twice by the same column repeats the same ascending
    /// sort.
    pub fn sort_by(&mut self, column: &str) -> Result<Option<RenderPlan>, TableError> {
        let dataset = match &self.dataset {
            Some(ds) if !ds.is_empty() => ds,
            _ => return Ok(None),
        };
        let col = dataset
            .column_index(column)
            .ok_or_else(|| TableError::UnknownColumn(column.to_string()))?;

        let sorted = dataset.sorted_by(col);
        info!("table: sorted {} rows by {column:?}", sorted.len());
        let plan = render_plan(&sorted);
        self.dataset = Some(sorted);
        Ok(Some(plan))
    }
}

/// Flatten a dataset into header + row-major stringified cells.
fn render_plan(dataset: &Dataset) -> RenderPlan {
    let header: Vec<String> = dataset.columns().to_vec();
    let mut cells = Vec::with_capacity(dataset.len() * header.len());
    for row in dataset.rows() {
        for value in row {
            cells.push(value.to_string());
        }
    }
    RenderPlan {
        cells,
        column_count: header.len(),
        header,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn int(i: i64) -> CellValue {
        CellValue::Integer(i)
    }

    fn two_column_view() -> TableView {
        let mut view = TableView::new();
        view.set_dataset(
            vec!["name".into(), "value".into()],
            vec![
                vec![text("b"), int(2)],
                vec![text("a"), int(1)],
                vec![text("b"), int(1)],
            ],
        )
        .unwrap();
        view
    }

    #[test]
    fn set_dataset_emits_header_and_row_major_cells() {
        let mut view = TableView::new();
        let plan = view
            .set_dataset(
                vec!["station".into(), "temp".into()],
                vec![
                    vec![text("oslo"), CellValue::Float(3.5)],
                    vec![text("kyiv"), int(7)],
                ],
            )
            .unwrap();

        assert_eq!(plan.header, vec!["station", "temp"]);
        assert_eq!(plan.row_count(), 2);
        assert_eq!(plan.cells, vec!["oslo", "3.5", "kyiv", "7"]);
    }

    #[test]
    fn set_dataset_rejects_ragged_rows_and_keeps_previous() {
        let mut view = two_column_view();
        let err = view
            .set_dataset(vec!["only".into()], vec![vec![int(1), int(2)]])
            .unwrap_err();
        assert!(matches!(err, TableError::MalformedDataset { .. }));
        // Previous dataset survives the failed replacement.
        assert_eq!(view.dataset().unwrap().len(), 3);
    }

    #[test]
    fn sort_is_stable() {
        let mut view = two_column_view();
        let plan = view.sort_by("name").unwrap().unwrap();
        // The two "b" rows keep their original relative order.
        assert_eq!(plan.cells, vec!["a", "1", "b", "2", "b", "1"]);
    }

    #[test]
    fn sort_twice_is_idempotent() {
        let mut view = two_column_view();
        let once = view.sort_by("name").unwrap().unwrap();
        let twice = view.sort_by("name").unwrap().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn sort_on_empty_dataset_is_a_noop() {
        let mut view = TableView::new();
        view.set_dataset(vec!["a".into()], vec![]).unwrap();
        // Even a bogus column name is tolerated while there are no rows.
        assert!(view.sort_by("nonexistent").unwrap().is_none());
    }

    #[test]
    fn sort_without_dataset_is_a_noop() {
        let mut view = TableView::new();
        assert!(view.sort_by("name").unwrap().is_none());
    }

    #[test]
    fn sort_on_unknown_column_fails() {
        let mut view = two_column_view();
        let err = view.sort_by("nonexistent").unwrap_err();
        assert!(matches!(err, TableError::UnknownColumn(c) if c == "nonexistent"));
    }

    #[test]
    fn sort_ranks_integers_before_floats() {
        let mut view = TableView::new();
        view.set_dataset(
            vec!["v".into()],
            vec![
                vec![CellValue::Float(2.5)],
                vec![int(3)],
                vec![int(1)],
            ],
        )
        .unwrap();
        let plan = view.sort_by("v").unwrap().unwrap();
        // Integers rank before floats; within each type values are ordered.
        assert_eq!(plan.cells, vec!["1", "3", "2.5"]);
    }
}
