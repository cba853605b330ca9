use super::SourceStatus;
use crate::core::error::PipelineOutcome;

pub(crate) fn load_message(status: &SourceStatus) -> String {
    let file = status.file.clone();
    match status.kind {
        "loaded" => crate::t!("load-success", file = file),
        "no-records" => crate::t!("load-no-records", file = file),
        "malformed" => crate::t!(
            "load-error",
            file = file,
            error = status.error.clone().unwrap_or_default()
        ),
        _ => crate::t!("load-missing", file = file),
    }
}

/// Alert modifier for a load notice.
pub(crate) fn notice_class(status: &SourceStatus) -> &'static str {
    match status.kind {
        "loaded" => "notice notice--success",
        "malformed" => "notice notice--error",
        _ => "notice notice--warning",
    }
}

pub(crate) fn outcome_label<T>(outcome: &PipelineOutcome<T>) -> &'static str {
    match outcome {
        PipelineOutcome::Ready(_) => "ready",
        PipelineOutcome::Unavailable => "unavailable",
        PipelineOutcome::NoMatches => "no-matches",
    }
}

/// Point radius for a derived marker size, read as an area.
pub(crate) fn marker_radius(size: f64) -> f64 {
    size.max(0.0).sqrt() * 1.4
}

/// Parse a slider value from a form event, ignoring junk.
pub(crate) fn parse_slider(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Slider step: a hundredth of the span, at least 0.01.
pub(crate) fn slider_step(bounds: (f64, f64)) -> f64 {
    let span = bounds.1 - bounds.0;
    if span <= 0.0 {
        return 1.0;
    }
    let step = span / 100.0;
    if step >= 1.0 {
        step.floor()
    } else {
        step.max(0.01)
    }
}
