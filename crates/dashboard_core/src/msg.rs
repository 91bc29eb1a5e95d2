use crate::record::{Column, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Browser opened (or refreshed) the dashboard page.
    PageLoaded,
    /// The periodic refresh timer fired for the `n_intervals`-th time.
    IntervalElapsed { n_intervals: u64 },
    /// Store returned the full collection.
    RecordsLoaded(Vec<Record>),
    /// Store could not be read.
    LoadFailed(String),
    /// User clicked Add Row; `n_clicks` is the button's running click count.
    AddRowClicked { n_clicks: u64 },
    /// User clicked the delete control of a row (snapshot position).
    RowDeleted { row: usize },
    /// User changed a cell in place.
    CellEdited {
        row: usize,
        column: Column,
        value: String,
    },
    /// User clicked Save to Database.
    SaveClicked,
    /// Store accepted the replacement.
    SaveCompleted { count: usize, at: String },
    /// Store rejected the replacement, possibly after deleting.
    SaveFailed(String),
    /// Fallback for unrouted events.
    NoOp,
}
