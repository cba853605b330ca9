use dioxus::prelude::*;

use super::marker_radius;
use crate::core::{
    chart::{AxisScale, ChartKind, ChartSpec, LinearScale, Mark, MarkX},
    format::format_value,
};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 72.0;
const Y_TICKS: usize = 5;
const X_TICKS: usize = 6;

/// Pixel placement for a chart's plot area.
struct Frame {
    x: FrameX,
    y: LinearScale,
}

enum FrameX {
    Band { labels: Vec<String>, width: f64 },
    Linear(LinearScale),
}

impl Frame {
    fn for_spec(spec: &ChartSpec) -> Self {
        let plot = (MARGIN_LEFT, WIDTH - MARGIN_RIGHT);
        let x = match &spec.x.scale {
            AxisScale::Band(labels) => FrameX::Band {
                width: (plot.1 - plot.0) / labels.len().max(1) as f64,
                labels: labels.clone(),
            },
            AxisScale::Linear(lo, hi) => FrameX::Linear(LinearScale::new((*lo, *hi), plot)),
        };
        let y_domain = match &spec.y.scale {
            AxisScale::Linear(lo, hi) => (*lo, *hi),
            AxisScale::Band(_) => (0.0, 1.0),
        };
        Self {
            x,
            y: LinearScale::new(y_domain, (HEIGHT - MARGIN_BOTTOM, MARGIN_TOP)),
        }
    }

    fn x_of(&self, mark: &Mark) -> f64 {
        match (&self.x, &mark.x) {
            (FrameX::Band { width, .. }, MarkX::Band(idx)) => {
                MARGIN_LEFT + width * (*idx as f64 + 0.5)
            }
            (FrameX::Linear(scale), MarkX::Value(value)) => scale.map(*value),
            (FrameX::Band { width, .. }, MarkX::Value(value)) => MARGIN_LEFT + width * value,
            (FrameX::Linear(scale), MarkX::Band(idx)) => scale.map(*idx as f64),
        }
    }
}

/// SVG rendering of a [`ChartSpec`] with its caption underneath.
#[component]
pub fn ChartFigure(spec: ChartSpec) -> Element {
    let frame = Frame::for_spec(&spec);
    let baseline = HEIGHT - MARGIN_BOTTOM;
    let y_ticks: Vec<(f64, String)> = frame
        .y
        .ticks(Y_TICKS)
        .into_iter()
        .map(|tick| (frame.y.map(tick), format_value(tick)))
        .collect();

    let x_ticks: Vec<(f64, String, bool)> = match &frame.x {
        FrameX::Band { labels, width } => labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (MARGIN_LEFT + width * (idx as f64 + 0.5), label.clone(), true))
            .collect(),
        FrameX::Linear(scale) => scale
            .ticks(X_TICKS)
            .into_iter()
            .map(|tick| (scale.map(tick), format_value(tick), false))
            .collect(),
    };

    let marks = match spec.kind {
        ChartKind::Bar => render_bars(&spec, &frame),
        ChartKind::Scatter => render_points(&spec, &frame),
        ChartKind::Line => render_line(&spec, &frame),
    };

    let class = format!("chart {}", spec.kind.css_modifier());
    let x_label = spec.x.field;
    let y_label = spec.y.field;
    let right = WIDTH - MARGIN_RIGHT;
    let tick_x = MARGIN_LEFT - 6.0;
    let tick_y = baseline + 16.0;
    let x_label_x = (MARGIN_LEFT + right) / 2.0;
    let x_label_y = HEIGHT - 6.0;
    let y_label_y = (MARGIN_TOP + baseline) / 2.0;

    rsx! {
        figure { class: "{class}",
            svg {
                class: "chart__canvas",
                view_box: "0 0 {WIDTH} {HEIGHT}",
                line {
                    class: "chart__axis",
                    x1: "{MARGIN_LEFT}", y1: "{baseline}",
                    x2: "{right}", y2: "{baseline}",
                }
                line {
                    class: "chart__axis",
                    x1: "{MARGIN_LEFT}", y1: "{MARGIN_TOP}",
                    x2: "{MARGIN_LEFT}", y2: "{baseline}",
                }
                for (idx, (y, label)) in y_ticks.into_iter().enumerate() {
                    g { key: "y{idx}",
                        line {
                            class: "chart__grid",
                            x1: "{MARGIN_LEFT}", y1: "{y}",
                            x2: "{right}", y2: "{y}",
                        }
                        text {
                            class: "chart__tick",
                            x: "{tick_x}", y: "{y}",
                            text_anchor: "end",
                            dominant_baseline: "middle",
                            "{label}"
                        }
                    }
                }
                for (idx, (x, label, rotated)) in x_ticks.into_iter().enumerate() {
                    text {
                        key: "x{idx}",
                        class: "chart__tick",
                        x: "{x}", y: "{tick_y}",
                        text_anchor: if rotated { "end" } else { "middle" },
                        transform: if rotated { format!("rotate(-35 {x} {tick_y})") } else { String::new() },
                        "{label}"
                    }
                }
                text {
                    class: "chart__axis-label",
                    x: "{x_label_x}", y: "{x_label_y}",
                    text_anchor: "middle",
                    "{x_label}"
                }
                text {
                    class: "chart__axis-label",
                    x: "14", y: "{y_label_y}",
                    text_anchor: "middle",
                    transform: "rotate(-90 14 {y_label_y})",
                    "{y_label}"
                }
                {marks}
            }

            if spec.kind == ChartKind::Scatter && !spec.legend.is_empty() {
                ul { class: "chart__legend",
                    for entry in spec.legend.iter() {
                        li { key: "{entry.label}", class: "chart__legend-item",
                            span {
                                class: "chart__legend-swatch",
                                style: "background: {entry.color}",
                            }
                            "{entry.label}"
                        }
                    }
                }
            }

            figcaption { class: "chart__caption", "{spec.caption}" }
        }
    }
}

fn render_bars(spec: &ChartSpec, frame: &Frame) -> Element {
    let width = match &frame.x {
        FrameX::Band { width, .. } => *width * 0.8,
        FrameX::Linear(_) => 12.0,
    };
    let zero = frame.y.map(0.0);

    rsx! {
        for (idx, mark) in spec.marks.iter().enumerate() {
            {
                let center = frame.x_of(mark);
                let top = frame.y.map(mark.y).min(zero);
                let height = (frame.y.map(mark.y) - zero).abs();
                let value = format_value(mark.y);
                let left = center - width / 2.0;
                rsx! {
                    rect {
                        key: "bar{idx}",
                        class: "chart__bar",
                        x: "{left}", y: "{top}",
                        width: "{width}", height: "{height}",
                        fill: mark.color,
                        title { "{mark.label}: {value}" }
                    }
                }
            }
        }
    }
}

fn render_points(spec: &ChartSpec, frame: &Frame) -> Element {
    rsx! {
        for (idx, mark) in spec.marks.iter().enumerate() {
            {
                let cx = frame.x_of(mark);
                let cy = frame.y.map(mark.y);
                let r = marker_radius(mark.size.unwrap_or(10.0));
                let value = format_value(mark.y);
                rsx! {
                    circle {
                        key: "pt{idx}",
                        class: "chart__point",
                        cx: "{cx}", cy: "{cy}", r: "{r}",
                        fill: mark.color,
                        title { "{mark.label}: {value}" }
                    }
                }
            }
        }
    }
}

fn render_line(spec: &ChartSpec, frame: &Frame) -> Element {
    let path = spec
        .marks
        .iter()
        .map(|mark| format!("{:.2},{:.2}", frame.x_of(mark), frame.y.map(mark.y)))
        .collect::<Vec<_>>()
        .join(" ");
    let stroke = spec.marks.first().map(|mark| mark.color).unwrap_or("currentColor");
    let series = spec.series.clone().unwrap_or_default();

    rsx! {
        polyline {
            class: "chart__line",
            points: "{path}",
            fill: "none",
            stroke: stroke,
            stroke_width: "2",
            title { "{series}" }
        }
        for (idx, mark) in spec.marks.iter().enumerate() {
            {
                let cx = frame.x_of(mark);
                let cy = frame.y.map(mark.y);
                rsx! {
                    circle {
                        key: "ln{idx}",
                        class: "chart__line-point",
                        cx: "{cx}", cy: "{cy}", r: "3",
                        fill: mark.color,
                    }
                }
            }
        }
    }
}
