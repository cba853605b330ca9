//! Chart renderer: projects a filtered view onto visual parameters.
//!
//! No filtering or aggregation happens here. A [`ChartSpec`] says which
//! field drives each axis, where every mark sits in data space, how big and
//! which colour it is, and which caption goes underneath. The Dioxus layer
//! only maps data space to pixels.

use super::pipeline::{BarView, LineView, ScatterView};

pub const BAR_CAPTION: &str = "This static bar chart shows the suicide rate per 100,000 people for each state (from data.json).";
pub const SCATTER_CAPTION: &str = "Dynamic scatter plot showing suicide rate (y) vs. estimated household gun ownership (x). Use the multiselect to choose states and the slider to scale point sizes.";
pub const LINE_CAPTION: &str = "Dynamic line chart of CSV inputs for the selected category over submission order. Use the category dropdown and the minimum-value slider to explore your data.";

/// Categorical colours, assigned in order of first appearance.
pub const PALETTE: [&str; 10] = [
    "#4c78a8", "#f58518", "#e45756", "#72b7b2", "#54a24b", "#eeca3b", "#b279a2", "#ff9da6",
    "#9d755d", "#bab0ac",
];

pub const BAR_COLOR: &str = "#4c78a8";
pub const LINE_COLOR: &str = "#f58518";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Scatter,
    Line,
}

impl ChartKind {
    pub fn caption(self) -> &'static str {
        match self {
            ChartKind::Bar => BAR_CAPTION,
            ChartKind::Scatter => SCATTER_CAPTION,
            ChartKind::Line => LINE_CAPTION,
        }
    }

    pub fn css_modifier(self) -> &'static str {
        match self {
            ChartKind::Bar => "chart--bar",
            ChartKind::Scatter => "chart--scatter",
            ChartKind::Line => "chart--line",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AxisScale {
    /// One band per label, in order.
    Band(Vec<String>),
    /// Continuous `[lo, hi]`.
    Linear(f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub field: &'static str,
    pub scale: AxisScale,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkX {
    Band(usize),
    Value(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub x: MarkX,
    pub y: f64,
    pub size: Option<f64>,
    pub color: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: &'static str,
}

/// Tabular label view shown under the scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRow {
    pub position: usize,
    pub state: String,
    pub gun_ownership: f64,
    pub suicide_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub x: Axis,
    pub y: Axis,
    pub marks: Vec<Mark>,
    /// Line charts join marks in order; one series per chosen category.
    pub series: Option<String>,
    pub legend: Vec<LegendEntry>,
    pub caption: &'static str,
    pub label_rows: Option<Vec<LabelRow>>,
}

pub fn render_bar(view: &BarView) -> ChartSpec {
    let labels: Vec<String> = view.bars.iter().map(|bar| bar.state.clone()).collect();
    let marks = view
        .bars
        .iter()
        .enumerate()
        .map(|(idx, bar)| Mark {
            x: MarkX::Band(idx),
            y: bar.suicide_rate,
            size: None,
            color: BAR_COLOR,
            label: bar.state.clone(),
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Bar,
        x: Axis {
            field: "state",
            scale: AxisScale::Band(labels),
        },
        y: Axis {
            field: "suicide_rate",
            scale: zero_based(view.bars.iter().map(|bar| bar.suicide_rate)),
        },
        marks,
        series: None,
        legend: Vec::new(),
        caption: BAR_CAPTION,
        label_rows: None,
    }
}

pub fn render_scatter(view: &ScatterView) -> ChartSpec {
    let mut legend: Vec<LegendEntry> = Vec::new();
    let mut marks = Vec::with_capacity(view.points.len());
    for point in &view.points {
        let existing = legend
            .iter()
            .find(|entry| entry.label == point.state)
            .map(|entry| entry.color);
        let color = match existing {
            Some(color) => color,
            None => {
                let color = PALETTE[legend.len() % PALETTE.len()];
                legend.push(LegendEntry {
                    label: point.state.clone(),
                    color,
                });
                color
            }
        };
        marks.push(Mark {
            x: MarkX::Value(point.gun_ownership),
            y: point.suicide_rate,
            size: Some(point.marker_size),
            color,
            label: point.state.clone(),
        });
    }

    let label_rows = view.show_labels.then(|| {
        view.points
            .iter()
            .enumerate()
            .map(|(idx, point)| LabelRow {
                position: idx + 1,
                state: point.state.clone(),
                gun_ownership: point.gun_ownership,
                suicide_rate: point.suicide_rate,
            })
            .collect()
    });

    ChartSpec {
        kind: ChartKind::Scatter,
        x: Axis {
            field: "gun_ownership",
            scale: padded(view.points.iter().map(|p| p.gun_ownership)),
        },
        y: Axis {
            field: "suicide_rate",
            scale: padded(view.points.iter().map(|p| p.suicide_rate)),
        },
        marks,
        series: None,
        legend,
        caption: SCATTER_CAPTION,
        label_rows,
    }
}

pub fn render_line(view: &LineView) -> ChartSpec {
    let marks = view
        .points
        .iter()
        .map(|point| Mark {
            x: MarkX::Value(point.index as f64),
            y: point.value,
            size: None,
            color: LINE_COLOR,
            label: point.index.to_string(),
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Line,
        x: Axis {
            field: "SubmissionIndex",
            scale: padded(view.points.iter().map(|p| p.index as f64)),
        },
        y: Axis {
            field: "Value",
            scale: padded(view.points.iter().map(|p| p.value)),
        },
        marks,
        series: Some(view.category.clone()),
        legend: vec![LegendEntry {
            label: view.category.clone(),
            color: LINE_COLOR,
        }],
        caption: LINE_CAPTION,
        label_rows: None,
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
    })
}

/// Bars grow from zero, so the domain always includes it.
fn zero_based(values: impl Iterator<Item = f64>) -> AxisScale {
    let (lo, hi) = extent(values).unwrap_or((0.0, 1.0));
    let (lo, hi) = (lo.min(0.0), hi.max(0.0));
    if lo == hi {
        AxisScale::Linear(lo, lo + 1.0)
    } else {
        AxisScale::Linear(lo, hi)
    }
}

/// Data extent with 5% headroom either side; a single value gets a unit
/// window around it.
fn padded(values: impl Iterator<Item = f64>) -> AxisScale {
    match extent(values) {
        None => AxisScale::Linear(0.0, 1.0),
        Some((lo, hi)) if lo == hi => AxisScale::Linear(lo - 0.5, hi + 0.5),
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.05;
            AxisScale::Linear(lo - pad, hi + pad)
        }
    }
}

/// Maps a continuous domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return (self.range.0 + self.range.1) / 2.0;
        }
        let t = (value - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// `count` evenly spaced domain values from `lo` to `hi` inclusive.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.domain.0],
            _ => {
                let step = (self.domain.1 - self.domain.0) / (count - 1) as f64;
                (0..count).map(|i| self.domain.0 + step * i as f64).collect()
            }
        }
    }
}
