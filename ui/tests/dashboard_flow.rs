//! End-to-end: files on disk -> loaders -> session -> every pipeline.

use std::fs;
use std::path::Path;

use ui::core::{
    error::{LoadNotice, PipelineOutcome},
    load_all,
    pipeline::{recompute, DashboardView},
    session::{SessionStore, Slot, SlotValue, StateSelection},
    sources::DataSources,
};

const RECORDS: &str = r#"{
  "records": [
    { "state": "Alabama", "suicide_rate": 16.6, "gun_ownership": 55.5 },
    { "state": "Alaska",  "suicide_rate": 27.0, "gun_ownership": 61.7 },
    { "state": "Arizona", "suicide_rate": 17.6, "gun_ownership": 32.3 }
  ]
}"#;

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

fn run(dir: &Path, store: &mut SessionStore) -> DashboardView {
    let loaded = load_all(&DataSources::in_dir(dir));
    recompute(&loaded.sources(), store)
}

fn line_points(view: &DashboardView) -> Vec<(usize, f64)> {
    view.line
        .outcome
        .ready()
        .map(|line| line.points.iter().map(|p| (p.index, p.value)).collect())
        .unwrap_or_default()
}

#[test]
fn csv_category_and_threshold_drive_the_line_chart() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data.csv", "Category,Value\nA,10\nA,20\nB,5\n");
    let mut store = SessionStore::new();

    let view = run(dir.path(), &mut store);
    assert_eq!(store.selection().chosen_category, "A");
    assert_eq!(store.selection().min_value, 5.0);
    assert_eq!(line_points(&view), vec![(1, 10.0), (2, 20.0)]);

    store.set_min_value(15.0);
    let view = run(dir.path(), &mut store);
    assert_eq!(line_points(&view), vec![(2, 20.0)]);

    store.choose_category("B");
    store.set_min_value(5.0);
    let view = run(dir.path(), &mut store);
    assert_eq!(line_points(&view), vec![(3, 5.0)]);
}

#[test]
fn aliased_json_fields_reach_the_scatter() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "data.json",
        r#"{"records": [{"state": "X", "SuicideRate": 10, "GunOwnershipPct": 40}]}"#,
    );
    let mut store = SessionStore::new();
    let loaded = load_all(&DataSources::in_dir(dir.path()));
    assert!(matches!(loaded.records.notice, LoadNotice::Loaded { rows: 1 }));

    let view = recompute(&loaded.sources(), &mut store);
    let scatter = view.scatter.outcome.ready().expect("scatter should render");
    assert_eq!(scatter.points.len(), 1);
    assert_eq!(scatter.points[0].state, "X");
    assert_eq!(scatter.points[0].gun_ownership, 40.0);
    assert_eq!(scatter.points[0].suicide_rate, 10.0);
    assert_eq!(scatter.points[0].marker_size, 12.0);

    let bar = view.bar.ready().expect("bar should render");
    assert_eq!(bar.bars[0].suicide_rate, 10.0);
}

#[test]
fn empty_csv_is_not_available_and_line_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data.csv", "");
    write(dir.path(), "data.json", RECORDS);

    let loaded = load_all(&DataSources::in_dir(dir.path()));
    assert!(matches!(loaded.survey.notice, LoadNotice::NotAvailable));
    assert!(loaded.survey.table.is_empty());

    let mut store = SessionStore::new();
    let view = recompute(&loaded.sources(), &mut store);
    assert_eq!(view.line.outcome, PipelineOutcome::Unavailable);
    assert!(view.line.controls.is_none());
    assert!(view.bar.ready().is_some());
}

#[test]
fn missing_files_leave_every_chart_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = SessionStore::new();

    let view = run(dir.path(), &mut store);
    assert_eq!(view.bar, PipelineOutcome::Unavailable);
    assert_eq!(view.scatter.outcome, PipelineOutcome::Unavailable);
    assert_eq!(view.line.outcome, PipelineOutcome::Unavailable);
}

#[test]
fn records_without_list_warn_and_keep_charts_off() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data.json", r#"{"records": []}"#);

    let loaded = load_all(&DataSources::in_dir(dir.path()));
    assert!(matches!(loaded.records.notice, LoadNotice::NoRecords));

    let view = recompute(&loaded.sources(), &mut SessionStore::new());
    assert_eq!(view.bar, PipelineOutcome::Unavailable);
}

#[test]
fn malformed_json_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data.json", "{ not json");
    write(dir.path(), "data.csv", "Category,Value\nA,1\n");

    let loaded = load_all(&DataSources::in_dir(dir.path()));
    assert_eq!(loaded.records.notice.kind(), "malformed");
    assert!(loaded.survey.notice.is_loaded());

    let view = recompute(&loaded.sources(), &mut SessionStore::new());
    assert_eq!(view.scatter.outcome, PipelineOutcome::Unavailable);
    assert_eq!(line_points(&view), vec![(1, 1.0)]);
}

#[test]
fn deselecting_every_state_yields_no_matches() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data.json", RECORDS);
    let mut store = SessionStore::new();

    let view = run(dir.path(), &mut store);
    assert_eq!(view.scatter.outcome.ready().map(|v| v.points.len()), Some(3));

    store.select_states(StateSelection::only(Vec::<String>::new()));
    let view = run(dir.path(), &mut store);
    assert_eq!(view.scatter.outcome, PipelineOutcome::NoMatches);
    assert!(view.scatter.controls.is_some());
    // The bar chart ignores the scatter selection.
    assert_eq!(view.bar.ready().map(|v| v.bars.len()), Some(3));

    store.select_states(StateSelection::only(["Alaska"]));
    let view = run(dir.path(), &mut store);
    let points = view.scatter.outcome.ready().unwrap();
    assert_eq!(points.points.len(), 1);
    assert_eq!(points.points[0].state, "Alaska");
}

#[test]
fn stale_session_values_reset_when_the_data_changes() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data.csv", "Category,Value\nA,10\nB,40\n");
    write(dir.path(), "data.json", RECORDS);
    let mut store = SessionStore::new();

    store.choose_category("B");
    store.set_min_value(35.0);
    store.select_states(StateSelection::only(["Alaska", "Arizona"]));
    run(dir.path(), &mut store);
    assert_eq!(store.selection().chosen_category, "B");
    assert_eq!(store.selection().min_value, 35.0);

    write(dir.path(), "data.csv", "Category,Value\nC,1\nD,2\n");
    write(
        dir.path(),
        "data.json",
        r#"{"records": [{"state": "Alaska", "suicide_rate": 27.0, "gun_ownership": 61.7}]}"#,
    );
    let view = run(dir.path(), &mut store);

    let selection = store.selection();
    assert_eq!(selection.chosen_category, "C");
    assert_eq!(selection.min_value, 1.0);
    assert_eq!(selection.selected_states, StateSelection::only(["Alaska"]));
    assert_eq!(line_points(&view), vec![(1, 1.0)]);
}

#[test]
fn marker_size_bounds_are_enforced_by_the_store() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data.json", RECORDS);
    let mut store = SessionStore::new();

    assert!(store.set(Slot::MarkerSize, SlotValue::Size(30)).is_err());
    store.set_marker_size(40);
    assert_eq!(store.selection().marker_size, 24);

    let view = run(dir.path(), &mut store);
    let alaska = view
        .scatter
        .outcome
        .ready()
        .and_then(|v| v.points.iter().find(|p| p.state == "Alaska").cloned())
        .unwrap();
    // (27.0 * 0.6 + 6) * 2.4
    assert!((alaska.marker_size - 53.28).abs() < 1e-9);
}

#[test]
fn recompute_never_touches_the_loaded_tables() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data.csv", "Category,Value\nA,10\nA,oops\n");
    write(dir.path(), "data.json", RECORDS);

    let loaded = load_all(&DataSources::in_dir(dir.path()));
    let before = loaded.sources();
    let mut store = SessionStore::new();
    recompute(&before, &mut store);
    recompute(&before, &mut store);

    assert_eq!(loaded.sources(), before);
    assert_eq!(loaded.survey.table.len(), 2);
}

#[test]
fn emptied_files_clear_stale_session_values() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data.csv", "Category,Value\nA,10\nB,400\n");
    write(dir.path(), "data.json", RECORDS);
    let mut store = SessionStore::new();

    store.choose_category("B");
    store.set_min_value(300.0);
    store.select_states(StateSelection::only(["Alaska"]));
    run(dir.path(), &mut store);
    assert_eq!(store.selection().chosen_category, "B");
    assert_eq!(store.selection().min_value, 300.0);

    write(dir.path(), "data.csv", "");
    write(dir.path(), "data.json", "");
    let view = run(dir.path(), &mut store);

    assert_eq!(view.line.outcome, PipelineOutcome::Unavailable);
    assert_eq!(view.scatter.outcome, PipelineOutcome::Unavailable);
    let selection = store.selection();
    assert_eq!(selection.chosen_category, "");
    assert_eq!(selection.min_value, 0.0);
    assert_eq!(
        selection.selected_states,
        StateSelection::only(Vec::<String>::new())
    );
}
