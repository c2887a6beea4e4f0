//! Synthetic test signals.

use std::f32::consts::PI;

/// Equal-weight sum of sine tones with overall peak at most `amplitude`.
pub fn sine_mix(frequencies: &[f32], amplitude: f32, sample_rate: u32, frames: usize) -> Vec<f32> {
    if frequencies.is_empty() {
        return vec![0.0; frames];
    }
    let weight = amplitude / frequencies.len() as f32;
    let sample_rate = sample_rate as f32;

    (0..frames)
        .map(|i| {
            let t = i as f32 / sample_rate;
            frequencies
                .iter()
                .map(|&f| (2.0 * PI * f * t).sin())
                .sum::<f32>()
                * weight
        })
        .collect()
}

/// `[1, -1, 1, -1, ...]`, the highest frequency a sampled signal can carry.
pub fn alternating(frames: usize) -> Vec<f32> {
    (0..frames)
        .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
        .collect()
}

/// Spread a mono signal over `channels` interleaved channels, channel `k`
/// scaled by `1 / (k + 1)` so every channel is distinct.
pub fn interleave_scaled(mono: &[f32], channels: u16) -> Vec<f32> {
    let channels = channels as usize;
    let mut interleaved = Vec::with_capacity(mono.len() * channels);
    for &sample in mono {
        for k in 0..channels {
            interleaved.push(sample / (k + 1) as f32);
        }
    }
    interleaved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_mix_peak() {
        let signal = sine_mix(&[440.0, 1000.0], 0.8, 48000, 4800);
        assert_eq!(signal.len(), 4800);
        assert!(signal.iter().all(|s| s.abs() <= 0.8 + 1e-6));
    }

    #[test]
    fn test_sine_mix_no_tones_is_silence() {
        assert_eq!(sine_mix(&[], 1.0, 8000, 3), vec![0.0; 3]);
    }

    #[test]
    fn test_interleave_scaled() {
        let interleaved = interleave_scaled(&[1.0, -0.5], 2);
        assert_eq!(interleaved, vec![1.0, 0.5, -0.5, -0.25]);
    }
}
