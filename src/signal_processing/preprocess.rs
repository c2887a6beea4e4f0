//! Channel reduction and amplitude normalization ahead of filtering.

use crate::error::{LowpassError, Result};

/// Outcome of `peak_normalize`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// Every sample was divided by `peak`
    Scaled { peak: f32 },
    /// The buffer was empty or all zeros and was left untouched
    Silent,
}

impl Normalization {
    pub fn is_silent(&self) -> bool {
        matches!(self, Normalization::Silent)
    }
}

/// Extract channel 0 from interleaved frames.
///
/// Remaining channels are dropped, not mixed down. A trailing partial frame
/// is ignored.
///
/// # Errors
/// Returns `LowpassError::InvalidInput` if `channels` is zero.
pub fn select_first_channel(interleaved: &[f32], channels: u16) -> Result<Vec<f32>> {
    if channels == 0 {
        return Err(LowpassError::InvalidInput(
            "audio must have at least one channel".into(),
        ));
    }
    if channels == 1 {
        return Ok(interleaved.to_vec());
    }

    Ok(interleaved
        .chunks_exact(channels as usize)
        .map(|frame| frame[0])
        .collect())
}

/// Scale samples so the largest magnitude becomes 1.0.
///
/// A silent buffer has no peak to divide by and is returned unchanged.
pub fn peak_normalize(samples: &mut [f32]) -> Normalization {
    let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    if peak == 0.0 {
        return Normalization::Silent;
    }

    for sample in samples.iter_mut() {
        *sample /= peak;
    }
    Normalization::Scaled { peak }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_first_channel_stereo() {
        let interleaved = [0.1, -0.9, 0.2, -0.8, 0.3, -0.7];
        let mono = select_first_channel(&interleaved, 2).unwrap();
        assert_eq!(mono, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_select_first_channel_multichannel_partial_frame() {
        let interleaved = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let mono = select_first_channel(&interleaved, 3).unwrap();
        assert_eq!(mono, vec![1.0, 4.0]);
    }

    #[test]
    fn test_select_first_channel_mono_passthrough() {
        let mono = select_first_channel(&[0.5, -0.5], 1).unwrap();
        assert_eq!(mono, vec![0.5, -0.5]);
    }

    #[test]
    fn test_select_first_channel_zero_channels() {
        assert!(select_first_channel(&[0.5], 0).is_err());
    }

    #[test]
    fn test_peak_normalize() {
        let mut samples = vec![0.25, -0.5, 0.1];
        let result = peak_normalize(&mut samples);
        assert_eq!(result, Normalization::Scaled { peak: 0.5 });
        assert_eq!(samples, vec![0.5, -1.0, 0.2]);
    }

    #[test]
    fn test_peak_normalize_silent() {
        let mut samples = vec![0.0; 16];
        let result = peak_normalize(&mut samples);
        assert!(result.is_silent());
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_peak_normalize_empty() {
        let mut samples: Vec<f32> = vec![];
        assert!(peak_normalize(&mut samples).is_silent());
    }

    #[test]
    fn test_peak_normalize_bounds() {
        let mut samples: Vec<f32> = (0..100).map(|i| (i as f32 - 37.0) * 13.5).collect();
        peak_normalize(&mut samples);
        assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert!(samples.iter().any(|&s| s.abs() == 1.0));
    }
}
