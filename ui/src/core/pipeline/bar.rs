//! Static bar chart: suicide rate per state, no controls.

use crate::core::error::PipelineOutcome;
use crate::core::records::StateTable;

#[derive(Debug, Clone, PartialEq)]
pub struct BarEntry {
    pub state: String,
    pub suicide_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarView {
    pub bars: Vec<BarEntry>,
}

/// One bar per record, indexed by state, in table order. Records are fully
/// populated by the loader, so the state and rate are always present; blank
/// state labels are still skipped.
pub fn bar_view(table: &StateTable) -> PipelineOutcome<BarView> {
    if table.is_empty() {
        return PipelineOutcome::Unavailable;
    }

    let bars: Vec<BarEntry> = table
        .rows
        .iter()
        .filter(|row| !row.state.trim().is_empty() && row.suicide_rate.is_finite())
        .map(|row| BarEntry {
            state: row.state.clone(),
            suicide_rate: row.suicide_rate,
        })
        .collect();

    if bars.is_empty() {
        PipelineOutcome::NoMatches
    } else {
        PipelineOutcome::Ready(BarView { bars })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::records::StateRecord;

    #[test]
    fn empty_table_is_unavailable() {
        assert_eq!(bar_view(&StateTable::default()), PipelineOutcome::Unavailable);
    }

    #[test]
    fn one_bar_per_row() {
        let table = StateTable {
            rows: vec![
                StateRecord::new("Alaska", 25.1, 64.5),
                StateRecord::new("Maine", 16.2, 47.0),
            ],
        };
        let view = bar_view(&table);
        let bars = &view.ready().unwrap().bars;
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].state, "Alaska");
        assert_eq!(bars[1].suicide_rate, 16.2);
    }
}
