//! Numeric helpers shared by the parsers and aggregators.

/// `round(completed / total * 100)` with halves rounded up; 0 when
/// `total == 0`. `completed` is clamped to `total`.
pub fn completion_rate(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let completed = u64::from(completed.min(total));
    let total = u64::from(total);
    ((completed * 200 + total) / (total * 2)) as u32
}

/// Population coefficient of variation (standard deviation over mean).
///
/// Returns `None` for fewer than two samples or a non-positive mean, where
/// dispersion carries no signal.
pub fn coefficient_of_variation(samples: &[u32]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let count = samples.len() as f64;
    let mean = samples.iter().map(|&value| f64::from(value)).sum::<f64>() / count;
    if mean <= 0.0 {
        return None;
    }
    let variance = samples
        .iter()
        .map(|&value| (f64::from(value) - mean).powi(2))
        .sum::<f64>()
        / count;
    Some(variance.sqrt() / mean)
}
