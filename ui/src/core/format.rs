//! Formatting helpers for presenting values.

/// Compact value for tables and tooltips: integers without a fraction,
/// everything else with up to two decimals.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_value).unwrap_or_default()
}
