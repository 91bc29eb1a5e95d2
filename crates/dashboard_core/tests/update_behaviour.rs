use std::sync::Once;

use dashboard_core::{
    update, AppState, Column, Effect, FieldValue, LoadState, Msg, Record, SaveStatus,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

fn recipe(name: &str, category: &str, rating: i64) -> Record {
    Record {
        id: Some(format!("id-{name}")),
        name: Some(FieldValue::from(name)),
        category: Some(FieldValue::from(category)),
        rating: Some(FieldValue::from(rating)),
        ..Record::default()
    }
}

fn loaded(records: Vec<Record>) -> AppState {
    let (state, effects) = update(AppState::new(), Msg::RecordsLoaded(records));
    assert!(effects.is_empty());
    state
}

#[test]
fn page_load_and_interval_request_full_fetch() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::PageLoaded);
    assert_eq!(effects, vec![Effect::FetchAll]);
    assert_eq!(state.load_state(), &LoadState::NotLoaded);

    let (state, effects) = update(state, Msg::IntervalElapsed { n_intervals: 3 });
    assert_eq!(effects, vec![Effect::FetchAll]);
    assert_eq!(state.n_intervals(), 3);
}

#[test]
fn reload_replaces_snapshot() {
    init_logging();
    let state = loaded(vec![recipe("Soup", "starter", 4)]);
    let (state, _) = update(state, Msg::AddRowClicked { n_clicks: 1 });
    assert_eq!(state.snapshot().len(), 2);

    let (state, _) = update(state, Msg::RecordsLoaded(vec![recipe("Stew", "main", 5)]));
    assert_eq!(state.snapshot().len(), 1);
    assert_eq!(state.snapshot().rows()[0].display(Column::Name), "Stew");
}

#[test]
fn zero_clicks_never_adds_a_row() {
    init_logging();
    let state = loaded(vec![recipe("Soup", "starter", 4)]);
    let before = state.clone();

    let (state, effects) = update(state, Msg::AddRowClicked { n_clicks: 0 });
    assert_eq!(state, before);
    assert!(effects.is_empty());
}

#[test]
fn n_clicks_append_n_blank_rows() {
    init_logging();
    let mut state = loaded(vec![recipe("Soup", "starter", 4)]);
    for n_clicks in 1..=3 {
        let (next, effects) = update(state, Msg::AddRowClicked { n_clicks });
        assert!(effects.is_empty());
        state = next;
    }

    let rows = state.snapshot().rows();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].display(Column::Name), "Soup");
    for blank in &rows[1..] {
        assert_eq!(blank, &Record::blank());
        assert!(blank.cells().iter().all(String::is_empty));
    }
    assert_eq!(state.add_row_clicks(), 3);
}

#[test]
fn add_row_before_load_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AddRowClicked { n_clicks: 1 });
    assert!(state.snapshot().is_empty());
}

#[test]
fn delete_removes_by_snapshot_position() {
    init_logging();
    let state = loaded(vec![
        recipe("Soup", "starter", 4),
        recipe("Stew", "main", 5),
        recipe("Pie", "dessert", 3),
    ]);

    let (state, _) = update(state, Msg::RowDeleted { row: 1 });
    let names: Vec<_> = state
        .snapshot()
        .rows()
        .iter()
        .map(|r| r.display(Column::Name))
        .collect();
    assert_eq!(names, vec!["Soup", "Pie"]);

    let (state, _) = update(state, Msg::RowDeleted { row: 9 });
    assert_eq!(state.snapshot().len(), 2);
}

#[test]
fn edits_are_stored_as_text() {
    init_logging();
    let state = loaded(vec![recipe("Soup", "starter", 4)]);
    let (state, _) = update(
        state,
        Msg::CellEdited {
            row: 0,
            column: Column::Calories,
            value: "not a number".to_string(),
        },
    );
    assert_eq!(
        state.snapshot().rows()[0].calories,
        Some(FieldValue::text("not a number"))
    );
}

#[test]
fn save_emits_replace_all_with_current_grid() {
    init_logging();
    let state = loaded(vec![recipe("Soup", "starter", 4), recipe("Stew", "main", 5)]);
    let (state, _) = update(state, Msg::RowDeleted { row: 0 });
    let (state, _) = update(state, Msg::AddRowClicked { n_clicks: 1 });
    let (state, _) = update(
        state,
        Msg::CellEdited {
            row: 1,
            column: Column::Name,
            value: "Bread".to_string(),
        },
    );

    let (state, effects) = update(state, Msg::SaveClicked);
    let mut bread = Record::blank();
    bread.name = Some(FieldValue::text("Bread"));
    assert_eq!(
        effects,
        vec![Effect::ReplaceAll {
            records: vec![recipe("Stew", "main", 5), bread],
        }]
    );
    assert!(state.save_status().is_none());

    let (state, _) = update(
        state,
        Msg::SaveCompleted {
            count: 2,
            at: "12:00:00".to_string(),
        },
    );
    assert_eq!(
        state.save_status(),
        Some(&SaveStatus::Saved {
            count: 2,
            at: "12:00:00".to_string()
        })
    );
}

#[test]
fn save_without_loaded_snapshot_is_refused() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::LoadFailed("connection refused".into()));
    let (state, effects) = update(state, Msg::SaveClicked);

    assert!(effects.is_empty());
    assert!(matches!(state.save_status(), Some(SaveStatus::Refused(_))));
}

#[test]
fn load_failure_discards_previous_snapshot() {
    init_logging();
    let state = loaded(vec![recipe("Soup", "starter", 4)]);
    let (state, _) = update(state, Msg::LoadFailed("timed out".into()));

    assert!(state.snapshot().is_empty());
    assert_eq!(state.load_state(), &LoadState::Failed("timed out".into()));
}

#[test]
fn save_failure_keeps_snapshot_for_retry() {
    init_logging();
    let state = loaded(vec![recipe("Soup", "starter", 4)]);
    let (state, _) = update(state, Msg::SaveFailed("disk full".into()));

    assert_eq!(state.snapshot().len(), 1);
    assert_eq!(
        state.save_status(),
        Some(&SaveStatus::Failed("disk full".into()))
    );
    let (_, effects) = update(state, Msg::SaveClicked);
    assert_eq!(effects.len(), 1);
}
