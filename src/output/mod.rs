// Output formatting for terminal summaries.

pub mod terminal;

/// Format a fraction as a percentage with two decimals ("12.50%").
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}
