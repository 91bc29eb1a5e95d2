use crate::chart::BoxPlot;
use crate::filter::GridQuery;
use crate::record::Column;

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub grid: GridView,
    pub chart: BoxPlot,
    pub status: Option<StatusLine>,
    pub add_row_clicks: u64,
    pub n_intervals: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridView {
    /// Nothing fetched yet.
    Loading,
    /// The last fetch failed; no grid is shown.
    Unavailable { error: String },
    Ready(GridPage),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridPage {
    /// Full schema, hidden columns included.
    pub columns: Vec<Column>,
    pub rows: Vec<GridRow>,
    /// Zero-based, already clamped to `page_count`.
    pub page: usize,
    pub page_count: usize,
    pub total_rows: usize,
    pub matching_rows: usize,
    pub query: GridQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// Position in the snapshot, used by edit and delete controls.
    pub index: usize,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub column: Column,
    pub text: String,
    /// Raw value of the field; `None` when the document lacks it.
    pub tooltip: Option<String>,
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub severity: Severity,
    pub text: String,
}
