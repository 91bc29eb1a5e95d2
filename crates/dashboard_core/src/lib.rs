//! Dashboard core: record model, pure state machine, and view-model helpers.
mod chart;
mod effect;
mod export;
mod filter;
mod msg;
mod record;
mod snapshot;
mod state;
mod update;
mod view_model;

pub use chart::{build_box_plot, chart_input, BoxPlot, CategoryBox};
pub use effect::Effect;
pub use export::export_csv;
pub use filter::{ColumnFilter, Comparison, FilterExpr, GridQuery};
pub use msg::Msg;
pub use record::{Column, FieldValue, Record, UNCATEGORIZED};
pub use snapshot::TableSnapshot;
pub use state::{AppState, LoadState, SaveStatus, DEFAULT_PAGE_SIZE};
pub use update::update;
pub use view_model::{AppViewModel, GridCell, GridPage, GridRow, GridView, Severity, StatusLine};
