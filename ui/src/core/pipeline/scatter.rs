//! Dynamic scatter chart: suicide rate against gun ownership for a chosen
//! subset of states.

use tracing::debug;

use crate::core::error::PipelineOutcome;
use crate::core::records::StateTable;
use crate::core::session::{FilterSelection, StateSelection};

/// Marker size for one point: `(rate * 0.6 + 6) * (control / 10)`.
pub fn derived_marker_size(suicide_rate: f64, marker_control: u8) -> f64 {
    (suicide_rate * 0.6 + 6.0) * (f64::from(marker_control) / 10.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub state: String,
    pub gun_ownership: f64,
    pub suicide_rate: f64,
    pub marker_size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterView {
    pub points: Vec<ScatterPoint>,
    pub show_labels: bool,
}

/// Widget state for the scatter section, after reconciliation with the data.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterControls {
    /// Every distinct state, first-seen order.
    pub options: Vec<String>,
    pub selected: StateSelection,
    pub marker_size: u8,
    pub show_labels: bool,
}

impl ScatterControls {
    pub fn is_selected(&self, state: &str) -> bool {
        self.selected.includes(state)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPanel {
    /// `None` when there is no record data to choose from.
    pub controls: Option<ScatterControls>,
    pub outcome: PipelineOutcome<ScatterView>,
}

/// Filter the record table to the selected states and derive marker sizes.
///
/// An explicit selection is pruned to states still present in `table`, and
/// the pruned value is written back into `selection`. An empty table prunes
/// it to nothing.
pub fn scatter_view(table: &StateTable, selection: &mut FilterSelection) -> ScatterPanel {
    let options = table.states();
    if let StateSelection::Only(chosen) = &mut selection.selected_states {
        let before = chosen.len();
        chosen.retain(|state| options.contains(state));
        if chosen.len() != before {
            debug!(pruned = before - chosen.len(), "dropped stale state selections");
        }
    }

    if table.is_empty() {
        return ScatterPanel {
            controls: None,
            outcome: PipelineOutcome::Unavailable,
        };
    }

    let scale = selection.marker_size;
    let points: Vec<ScatterPoint> = table
        .rows
        .iter()
        .filter(|row| selection.selected_states.includes(&row.state))
        .filter(|row| row.suicide_rate.is_finite() && row.gun_ownership.is_finite())
        .map(|row| ScatterPoint {
            state: row.state.clone(),
            gun_ownership: row.gun_ownership,
            suicide_rate: row.suicide_rate,
            marker_size: derived_marker_size(row.suicide_rate, scale),
        })
        .collect();

    let controls = ScatterControls {
        options,
        selected: selection.selected_states.clone(),
        marker_size: scale,
        show_labels: selection.show_labels,
    };

    let outcome = if points.is_empty() {
        PipelineOutcome::NoMatches
    } else {
        PipelineOutcome::Ready(ScatterView {
            points,
            show_labels: selection.show_labels,
        })
    };

    ScatterPanel {
        controls: Some(controls),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::records::StateRecord;

    fn sample() -> StateTable {
        StateTable {
            rows: vec![
                StateRecord::new("Alaska", 25.1, 64.5),
                StateRecord::new("Maine", 16.2, 47.0),
                StateRecord::new("New York", 8.1, 19.9),
            ],
        }
    }

    #[test]
    fn first_render_shows_every_state() {
        let mut selection = FilterSelection::default();
        let panel = scatter_view(&sample(), &mut selection);
        let view = panel.outcome.ready().unwrap();
        assert_eq!(view.points.len(), 3);
        assert_eq!(
            panel.controls.unwrap().options,
            vec!["Alaska", "Maine", "New York"]
        );
    }

    #[test]
    fn explicit_subset_filters_rows() {
        let mut selection = FilterSelection {
            selected_states: StateSelection::only(["Maine"]),
            ..FilterSelection::default()
        };
        let panel = scatter_view(&sample(), &mut selection);
        let points = &panel.outcome.ready().unwrap().points;
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].state, "Maine");
    }

    #[test]
    fn deselecting_every_state_is_no_matches() {
        let mut selection = FilterSelection {
            selected_states: StateSelection::only(Vec::<String>::new()),
            ..FilterSelection::default()
        };
        let panel = scatter_view(&sample(), &mut selection);
        assert_eq!(panel.outcome, PipelineOutcome::NoMatches);
        assert!(panel.controls.is_some());
    }

    #[test]
    fn stale_states_are_pruned_from_selection() {
        let mut selection = FilterSelection {
            selected_states: StateSelection::only(["Maine", "Atlantis"]),
            ..FilterSelection::default()
        };
        scatter_view(&sample(), &mut selection);
        assert_eq!(selection.selected_states, StateSelection::only(["Maine"]));
    }

    #[test]
    fn marker_size_follows_formula() {
        let mut selection = FilterSelection {
            marker_size: 20,
            ..FilterSelection::default()
        };
        let panel = scatter_view(&sample(), &mut selection);
        let alaska = &panel.outcome.ready().unwrap().points[0];
        let expected = (25.1 * 0.6 + 6.0) * 2.0;
        assert!((alaska.marker_size - expected).abs() < 1e-9);
    }

    #[test]
    fn marker_size_is_monotonic_in_rate_and_control() {
        let rates = [0.0, 3.5, 12.0, 40.0];
        for control in 4..=24u8 {
            for pair in rates.windows(2) {
                assert!(derived_marker_size(pair[0], control) < derived_marker_size(pair[1], control));
            }
        }
        for rate in rates {
            for control in 4..24u8 {
                assert!(derived_marker_size(rate, control) < derived_marker_size(rate, control + 1));
            }
        }
    }

    #[test]
    fn empty_table_has_no_controls() {
        let mut selection = FilterSelection::default();
        let panel = scatter_view(&StateTable::default(), &mut selection);
        assert_eq!(panel.controls, None);
        assert_eq!(panel.outcome, PipelineOutcome::Unavailable);
    }

    #[test]
    fn empty_table_prunes_explicit_selection() {
        let mut selection = FilterSelection {
            selected_states: StateSelection::only(["Maine"]),
            ..FilterSelection::default()
        };
        scatter_view(&StateTable::default(), &mut selection);
        assert_eq!(
            selection.selected_states,
            StateSelection::only(Vec::<String>::new())
        );

        let mut selection = FilterSelection::default();
        scatter_view(&StateTable::default(), &mut selection);
        assert_eq!(selection.selected_states, StateSelection::All);
    }
}
