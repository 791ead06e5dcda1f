/// Shift every value by `-center` so the sequence is zero-centered.
pub fn center_on(values: &[f64], center: f64) -> Vec<f64> {
    values.iter().map(|&v| v - center).collect()
}

/// Round to one decimal place, the precision used for chart labels.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
