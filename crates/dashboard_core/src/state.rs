use crate::chart::build_box_plot;
use crate::filter::GridQuery;
use crate::record::{Column, Record};
use crate::snapshot::TableSnapshot;
use crate::view_model::{
    AppViewModel, GridCell, GridPage, GridRow, GridView, Severity, StatusLine,
};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loaded,
    Failed(String),
}

/// Outcome of the most recent save attempt, shown in the status region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved { count: usize, at: String },
    Failed(String),
    Refused(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    snapshot: TableSnapshot,
    load: LoadState,
    save_status: Option<SaveStatus>,
    add_row_clicks: u64,
    n_intervals: u64,
    page_size: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            snapshot: TableSnapshot::default(),
            load: LoadState::NotLoaded,
            save_status: None,
            add_row_clicks: 0,
            n_intervals: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn snapshot(&self) -> &TableSnapshot {
        &self.snapshot
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn save_status(&self) -> Option<&SaveStatus> {
        self.save_status.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.load == LoadState::Loaded
    }

    pub fn add_row_clicks(&self) -> u64 {
        self.add_row_clicks
    }

    pub fn n_intervals(&self) -> u64 {
        self.n_intervals
    }

    /// Builds the page for the rows selected by `query`. The chart always
    /// covers the whole snapshot, independent of grid filters.
    pub fn view(&self, query: &GridQuery) -> AppViewModel {
        let grid = match &self.load {
            LoadState::NotLoaded => GridView::Loading,
            LoadState::Failed(error) => GridView::Unavailable {
                error: error.clone(),
            },
            LoadState::Loaded => GridView::Ready(self.grid_page(query)),
        };

        AppViewModel {
            grid,
            chart: build_box_plot(self.snapshot.rows()),
            status: self.save_status.as_ref().map(status_line),
            add_row_clicks: self.add_row_clicks,
            n_intervals: self.n_intervals,
        }
    }

    /// Records currently passing the grid filters, across all pages.
    pub fn filtered_records(&self, query: &GridQuery) -> Vec<&Record> {
        let rows = self.snapshot.rows();
        query
            .matching_rows(rows)
            .into_iter()
            .map(|index| &rows[index])
            .collect()
    }

    pub(crate) fn replace_snapshot(&mut self, records: Vec<Record>) {
        self.snapshot = TableSnapshot::new(records);
        self.load = LoadState::Loaded;
    }

    pub(crate) fn fail_load(&mut self, error: String) {
        self.snapshot = TableSnapshot::default();
        self.load = LoadState::Failed(error);
    }

    pub(crate) fn snapshot_mut(&mut self) -> &mut TableSnapshot {
        &mut self.snapshot
    }

    pub(crate) fn set_save_status(&mut self, status: SaveStatus) {
        self.save_status = Some(status);
    }

    pub(crate) fn set_add_row_clicks(&mut self, n_clicks: u64) {
        self.add_row_clicks = n_clicks;
    }

    pub(crate) fn set_n_intervals(&mut self, n_intervals: u64) {
        self.n_intervals = n_intervals;
    }

    fn grid_page(&self, query: &GridQuery) -> GridPage {
        let rows = self.snapshot.rows();
        let matching = query.matching_rows(rows);
        let page_count = matching.len().div_ceil(self.page_size).max(1);
        let page = query.page.min(page_count - 1);

        let visible = matching
            .iter()
            .skip(page * self.page_size)
            .take(self.page_size)
            .map(|&index| GridRow {
                index,
                cells: grid_cells(&rows[index]),
            })
            .collect();

        GridPage {
            columns: Column::ALL.to_vec(),
            rows: visible,
            page,
            page_count,
            total_rows: rows.len(),
            matching_rows: matching.len(),
            query: GridQuery {
                filters: query.filters.clone(),
                page,
            },
        }
    }
}

fn grid_cells(record: &Record) -> Vec<GridCell> {
    Column::ALL
        .into_iter()
        .map(|column| {
            let text = record.display(column);
            GridCell {
                column,
                tooltip: record.has(column).then(|| text.clone()),
                text,
                hidden: column.is_hidden(),
            }
        })
        .collect()
}

fn status_line(status: &SaveStatus) -> StatusLine {
    match status {
        SaveStatus::Saved { count, at } => StatusLine {
            severity: Severity::Information,
            text: format!("Saved {count} records to the database at {at}"),
        },
        SaveStatus::Failed(error) => StatusLine {
            severity: Severity::Error,
            text: format!(
                "Save failed: {error}. Stored data may be incomplete; reload before editing further."
            ),
        },
        SaveStatus::Refused(reason) => StatusLine {
            severity: Severity::Warning,
            text: reason.clone(),
        },
    }
}
