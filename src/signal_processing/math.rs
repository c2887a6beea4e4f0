/// Largest absolute sample value
pub fn peak_abs(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
}

/// Root mean square of a buffer, 0.0 for an empty buffer
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}

/// Level of `measured` relative to `reference` in dB.
///
/// Returns `None` when either level is zero and the ratio is undefined.
pub fn level_change_db(reference: f32, measured: f32) -> Option<f32> {
    if reference <= 0.0 || measured <= 0.0 {
        return None;
    }
    Some(20.0 * (measured / reference).log10())
}
