//! Filter/projection engine: `(sources, session) -> view`.
//!
//! Each chart has its own pipeline. [`recompute`] runs all three against the
//! loaded tables and the session store; it reads the tables by reference and
//! never modifies them, so the same sources can be recomputed after every
//! widget change.

pub mod bar;
pub mod line;
pub mod scatter;

pub use bar::{bar_view, BarEntry, BarView};
pub use line::{line_view, CleanRow, LineControls, LinePanel, LinePoint, LineView};
pub use scatter::{
    derived_marker_size, scatter_view, ScatterControls, ScatterPanel, ScatterPoint, ScatterView,
};

use tracing::debug;

use super::error::PipelineOutcome;
use super::records::StateTable;
use super::session::SessionStore;
use super::survey::SurveyTable;

/// The tables the pipelines read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sources {
    pub survey: SurveyTable,
    pub records: StateTable,
}

/// Everything the page needs for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub bar: PipelineOutcome<BarView>,
    pub scatter: ScatterPanel,
    pub line: LinePanel,
}

/// Run every pipeline. Session slots are initialized if absent, and any
/// correction a pipeline makes (stale category, out-of-range minimum,
/// vanished states) is written back to `store` before returning.
pub fn recompute(sources: &Sources, store: &mut SessionStore) -> DashboardView {
    store.init_defaults();
    let mut selection = store.selection();

    let bar = bar_view(&sources.records);
    let scatter = scatter_view(&sources.records, &mut selection);
    let line = line_view(&sources.survey, &mut selection);

    store.store_selection(&selection);
    debug!(
        bars = bar.ready().map_or(0, |view| view.bars.len()),
        points = scatter.outcome.ready().map_or(0, |view| view.points.len()),
        line_points = line.outcome.ready().map_or(0, |view| view.points.len()),
        "recomputed dashboard"
    );

    DashboardView { bar, scatter, line }
}
