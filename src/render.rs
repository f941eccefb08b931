use crate::forecast::Forecast;

// ---------------------------------------------------------------------------
// RenderPlan – what the UI layer is told to draw
// ---------------------------------------------------------------------------

/// A flat render instruction emitted by [`crate::TableView`]: one header cell
/// per column, then one body cell per (row, column) pair in row-major order,
/// every value already converted to its string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub header: Vec<String>,
    pub cells: Vec<String>,
    pub column_count: usize,
}

impl RenderPlan {
    /// Number of row groups in the body.
    pub fn row_count(&self) -> usize {
        if self.column_count == 0 {
            0
        } else {
            self.cells.len() / self.column_count
        }
    }

    /// Iterate the body row by row.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.cells.chunks(self.column_count.max(1))
    }
}

// ---------------------------------------------------------------------------
// Renderer – the seam to the embedding UI
// ---------------------------------------------------------------------------

/// Implemented by the embedding UI layer. The renderer owns widget layout,
/// click handling (calling [`crate::TableView::sort_by`] when a header is
/// activated) and background/icon selection; this crate only hands it data.
pub trait Renderer {
    fn render_table(&mut self, plan: &RenderPlan);
    fn render_forecast(&mut self, forecast: &Forecast);
}
