//! Time-domain plot data for original and filtered waveforms.
//!
//! `WaveformSeries` is plain data so it can be built and tested without a
//! display. The interactive viewer lives behind the `gui` feature.

#[cfg(feature = "gui")]
mod viewer;

#[cfg(feature = "gui")]
pub use viewer::{WaveformViewer, show_waveforms};

/// One named line of `[time_s, amplitude]` points
#[derive(Debug, Clone)]
pub struct WaveformSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

impl WaveformSeries {
    /// Build a series with sample `i` at time `i / sample_rate`.
    ///
    /// Buffers longer than `max_points` are split into buckets and only each
    /// bucket's minimum and maximum are kept (in time order), so transients
    /// survive decimation.
    pub fn from_samples(
        name: impl Into<String>,
        samples: &[f32],
        sample_rate: u32,
        max_points: usize,
    ) -> Self {
        let dt = 1.0 / sample_rate.max(1) as f64;
        let max_points = max_points.max(2);
        let point = |i: usize| [i as f64 * dt, samples[i] as f64];

        let points = if samples.len() <= max_points {
            (0..samples.len()).map(point).collect()
        } else {
            let bucket_len = samples.len().div_ceil(max_points / 2);
            let mut points = Vec::with_capacity(max_points);
            for start in (0..samples.len()).step_by(bucket_len) {
                let end = (start + bucket_len).min(samples.len());
                let (lo, hi) = extrema(samples, start, end);
                points.push(point(lo.min(hi)));
                if lo != hi {
                    points.push(point(lo.max(hi)));
                }
            }
            points
        };

        Self {
            name: name.into(),
            points,
        }
    }

    /// Time of the last point in seconds
    pub fn end_time(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p[0])
    }
}

/// Indices of the minimum and maximum of `samples[start..end]`.
fn extrema(samples: &[f32], start: usize, end: usize) -> (usize, usize) {
    let mut lo = start;
    let mut hi = start;
    for i in start..end {
        if samples[i] < samples[lo] {
            lo = i;
        }
        if samples[i] > samples[hi] {
            hi = i;
        }
    }
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_buffer_keeps_every_sample() {
        let series = WaveformSeries::from_samples("Original", &[0.0, 0.5, -0.5, 1.0], 4, 100);
        assert_eq!(series.name, "Original");
        assert_eq!(
            series.points,
            vec![[0.0, 0.0], [0.25, 0.5], [0.5, -0.5], [0.75, 1.0]]
        );
        assert_eq!(series.end_time(), 0.75);
    }

    #[test]
    fn test_long_buffer_is_decimated() {
        let mut samples: Vec<f32> = (0..100_000).map(|i| ((i % 64) as f32 / 64.0) - 0.5).collect();
        samples[54_321] = 1.0;
        samples[12_345] = -1.0;

        let series = WaveformSeries::from_samples("Filtered", &samples, 48000, 1000);

        assert!(series.points.len() <= 1000);
        assert!(series.points.iter().any(|p| p[1] == 1.0));
        assert!(series.points.iter().any(|p| p[1] == -1.0));
        assert!(series.points.windows(2).all(|w| w[0][0] < w[1][0]));
    }

    #[test]
    fn test_empty_buffer() {
        let series = WaveformSeries::from_samples("Empty", &[], 44100, 10);
        assert!(series.points.is_empty());
        assert_eq!(series.end_time(), 0.0);
    }
}
