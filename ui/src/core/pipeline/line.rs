//! Dynamic line chart: values of one survey category over submission order.
//!
//! The x axis is the 1-based position of a row after cleaning. It follows
//! file order, not submission time.

use tracing::debug;

use crate::core::error::PipelineOutcome;
use crate::core::session::FilterSelection;
use crate::core::survey::SurveyTable;

/// Slider bounds used when there is no clean data.
pub const DEFAULT_BOUNDS: (f64, f64) = (0.0, 100.0);

/// A survey row that survived cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRow {
    pub index: usize,
    pub category: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePoint {
    pub index: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineView {
    pub category: String,
    pub points: Vec<LinePoint>,
}

/// Widget state for the line section, after reconciliation with the data.
#[derive(Debug, Clone, PartialEq)]
pub struct LineControls {
    /// Distinct categories, sorted.
    pub categories: Vec<String>,
    pub chosen_category: String,
    pub bounds: (f64, f64),
    pub min_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePanel {
    pub controls: Option<LineControls>,
    pub outcome: PipelineOutcome<LineView>,
}

/// Drop rows without a category or a numeric value and number the rest
/// from 1.
pub fn clean_rows(table: &SurveyTable) -> Vec<CleanRow> {
    table
        .rows
        .iter()
        .filter_map(|row| match (&row.category, row.value) {
            (Some(category), Some(value)) if value.is_finite() => Some((category, value)),
            _ => None,
        })
        .enumerate()
        .map(|(position, (category, value))| CleanRow {
            index: position + 1,
            category: category.clone(),
            value,
        })
        .collect()
}

/// Sorted, de-duplicated category names.
pub fn categories(rows: &[CleanRow]) -> Vec<String> {
    let mut names: Vec<String> = rows.iter().map(|row| row.category.clone()).collect();
    names.sort();
    names.dedup();
    names
}

/// `(min, max)` of the cleaned values, or [`DEFAULT_BOUNDS`] when empty.
pub fn value_bounds(rows: &[CleanRow]) -> (f64, f64) {
    let mut values = rows.iter().map(|row| row.value);
    let Some(first) = values.next() else {
        return DEFAULT_BOUNDS;
    };
    values.fold((first, first), |(lo, hi), value| (lo.min(value), hi.max(value)))
}

/// Reconcile the session's category and minimum with the data, then filter.
///
/// A chosen category that is unset or absent from the data resets to the
/// first category; a minimum outside the bounds resets to the lower bound.
/// Both corrections are written back into `selection`, even when the table
/// is empty and the chart is unavailable.
pub fn line_view(table: &SurveyTable, selection: &mut FilterSelection) -> LinePanel {
    // An empty table still reconciles, so nothing stale survives it.
    let rows = clean_rows(table);
    let categories = categories(&rows);

    if !categories.contains(&selection.chosen_category) {
        let fallback = categories.first().cloned().unwrap_or_default();
        debug!(
            stale = %selection.chosen_category,
            reset = %fallback,
            "resetting chosen category"
        );
        selection.chosen_category = fallback;
    }

    let bounds = value_bounds(&rows);
    if !(bounds.0..=bounds.1).contains(&selection.min_value) {
        debug!(
            stale = selection.min_value,
            reset = bounds.0,
            "resetting minimum value"
        );
        selection.min_value = bounds.0;
    }

    if table.is_empty() {
        return LinePanel {
            controls: None,
            outcome: PipelineOutcome::Unavailable,
        };
    }

    let points: Vec<LinePoint> = rows
        .iter()
        .filter(|row| row.category == selection.chosen_category && row.value >= selection.min_value)
        .map(|row| LinePoint {
            index: row.index,
            value: row.value,
        })
        .collect();

    let controls = LineControls {
        categories,
        chosen_category: selection.chosen_category.clone(),
        bounds,
        min_value: selection.min_value,
    };

    let outcome = if points.is_empty() {
        PipelineOutcome::NoMatches
    } else {
        PipelineOutcome::Ready(LineView {
            category: selection.chosen_category.clone(),
            points,
        })
    };

    LinePanel {
        controls: Some(controls),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::survey::{parse_survey, SurveyRow};

    fn sample() -> SurveyTable {
        parse_survey("Category,Value\nA,10\nA,20\nB,5\n").unwrap()
    }

    fn points(panel: &LinePanel) -> Vec<(usize, f64)> {
        panel
            .outcome
            .ready()
            .map(|view| view.points.iter().map(|p| (p.index, p.value)).collect())
            .unwrap_or_default()
    }

    #[test]
    fn category_and_threshold_filter_rows() {
        let mut selection = FilterSelection {
            chosen_category: "A".into(),
            min_value: 0.0,
            ..FilterSelection::default()
        };
        // 0.0 is below the data minimum of 5, so it resets to 5 first.
        let panel = line_view(&sample(), &mut selection);
        assert_eq!(points(&panel), vec![(1, 10.0), (2, 20.0)]);

        selection.min_value = 15.0;
        let panel = line_view(&sample(), &mut selection);
        assert_eq!(points(&panel), vec![(2, 20.0)]);
    }

    #[test]
    fn ordinal_index_counts_only_clean_rows() {
        let table = SurveyTable {
            rows: vec![
                SurveyRow::new("A", 1.0),
                SurveyRow { category: None, value: Some(4.0) },
                SurveyRow { category: Some("A".into()), value: None },
                SurveyRow::new("A", 3.0),
            ],
        };
        let rows = clean_rows(&table);
        let indices: Vec<_> = rows.iter().map(|r| (r.index, r.value)).collect();
        assert_eq!(indices, vec![(1, 1.0), (2, 3.0)]);
    }

    #[test]
    fn unset_or_stale_category_resets_to_first() {
        let mut selection = FilterSelection::default();
        let panel = line_view(&sample(), &mut selection);
        assert_eq!(selection.chosen_category, "A");
        assert_eq!(panel.controls.unwrap().categories, vec!["A", "B"]);

        selection.chosen_category = "Z".into();
        line_view(&sample(), &mut selection);
        assert_eq!(selection.chosen_category, "A");
    }

    #[test]
    fn no_categories_resets_to_empty() {
        let table = SurveyTable {
            rows: vec![SurveyRow { category: Some("A".into()), value: None }],
        };
        let mut selection = FilterSelection {
            chosen_category: "A".into(),
            min_value: 250.0,
            ..FilterSelection::default()
        };
        let panel = line_view(&table, &mut selection);
        assert_eq!(selection.chosen_category, "");
        assert_eq!(selection.min_value, 0.0);
        assert_eq!(panel.controls.unwrap().bounds, DEFAULT_BOUNDS);
        assert_eq!(panel.outcome, PipelineOutcome::NoMatches);
    }

    #[test]
    fn out_of_bounds_minimum_resets_to_lower_bound() {
        let mut selection = FilterSelection {
            chosen_category: "B".into(),
            min_value: 500.0,
            ..FilterSelection::default()
        };
        let panel = line_view(&sample(), &mut selection);
        assert_eq!(selection.min_value, 5.0);
        assert_eq!(points(&panel), vec![(3, 5.0)]);
    }

    #[test]
    fn high_threshold_inside_bounds_is_no_matches() {
        let mut selection = FilterSelection {
            chosen_category: "B".into(),
            min_value: 20.0,
            ..FilterSelection::default()
        };
        let panel = line_view(&sample(), &mut selection);
        assert_eq!(selection.min_value, 20.0);
        assert_eq!(panel.outcome, PipelineOutcome::NoMatches);
    }

    #[test]
    fn empty_table_is_unavailable() {
        let mut selection = FilterSelection::default();
        let panel = line_view(&SurveyTable::default(), &mut selection);
        assert_eq!(panel.outcome, PipelineOutcome::Unavailable);
        assert!(panel.controls.is_none());
    }

    #[test]
    fn empty_table_still_clears_stale_choices() {
        let mut selection = FilterSelection {
            chosen_category: "B".into(),
            min_value: 300.0,
            ..FilterSelection::default()
        };
        let panel = line_view(&SurveyTable::default(), &mut selection);
        assert_eq!(panel.outcome, PipelineOutcome::Unavailable);
        assert_eq!(selection.chosen_category, "");
        assert_eq!(selection.min_value, DEFAULT_BOUNDS.0);

        // A minimum already inside the default bounds is kept.
        selection.min_value = 42.0;
        line_view(&SurveyTable::default(), &mut selection);
        assert_eq!(selection.min_value, 42.0);
    }
}
