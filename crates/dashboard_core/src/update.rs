use crate::{AppState, Effect, Msg, SaveStatus};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageLoaded => vec![Effect::FetchAll],
        Msg::IntervalElapsed { n_intervals } => {
            state.set_n_intervals(n_intervals);
            vec![Effect::FetchAll]
        }
        Msg::RecordsLoaded(records) => {
            state.replace_snapshot(records);
            Vec::new()
        }
        Msg::LoadFailed(error) => {
            state.fail_load(error);
            Vec::new()
        }
        Msg::AddRowClicked { n_clicks } => {
            // Zero clicks is the button's initial state, not a click.
            if n_clicks > 0 && state.is_loaded() {
                state.set_add_row_clicks(n_clicks);
                state.snapshot_mut().push_blank();
            }
            Vec::new()
        }
        Msg::RowDeleted { row } => {
            if state.is_loaded() {
                state.snapshot_mut().remove(row);
            }
            Vec::new()
        }
        Msg::CellEdited { row, column, value } => {
            if state.is_loaded() {
                state.snapshot_mut().edit_cell(row, column, &value);
            }
            Vec::new()
        }
        Msg::SaveClicked => {
            if state.is_loaded() {
                vec![Effect::ReplaceAll {
                    records: state.snapshot().rows().to_vec(),
                }]
            } else {
                // Saving an unloaded grid would wipe the collection.
                state.set_save_status(SaveStatus::Refused(
                    "Nothing was saved: records have not been loaded from the database.".to_string(),
                ));
                Vec::new()
            }
        }
        Msg::SaveCompleted { count, at } => {
            state.set_save_status(SaveStatus::Saved { count, at });
            Vec::new()
        }
        Msg::SaveFailed(error) => {
            state.set_save_status(SaveStatus::Failed(error));
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
