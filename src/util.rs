/// `"08:00"`-style label for an hour-of-day axis tick.
pub fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour % 24)
}

/// Render a [0, 1] proportion as a one-decimal percentage.
pub fn percent_label(proportion: f64) -> String {
    format!("{:.1}%", proportion * 100.0)
}
