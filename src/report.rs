//! Run summary printed after filtering.

use rolling_stats::Stats;
use serde::Serialize;

use crate::config::FilterConfig;
use crate::error::Result;
use crate::processing::FilterOutcome;
use crate::signal_processing::{level_change_db, rms};
use crate::wav::AudioClip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Level statistics of one buffer
#[derive(Debug, Clone, Serialize)]
pub struct SignalStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub peak: f32,
    pub rms: f32,
}

impl SignalStats {
    pub fn from_samples(samples: &[f32]) -> Self {
        let mut stats: Stats<f32> = Stats::new();
        for &sample in samples {
            stats.update(sample);
        }

        if stats.count == 0 {
            return Self {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                peak: 0.0,
                rms: 0.0,
            };
        }

        Self {
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            peak: stats.min.abs().max(stats.max.abs()),
            rms: rms(samples),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: String,
    pub output: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub frames: usize,
    pub duration_secs: f64,
    pub cutoff_hz: f64,
    pub order: usize,
    pub structure: String,
    pub normalization_skipped: bool,
    pub clipped_samples: usize,
    pub original: SignalStats,
    pub filtered: SignalStats,
    /// Filtered RMS relative to original RMS; absent for silent input
    pub rms_change_db: Option<f32>,
}

impl RunSummary {
    pub fn new(
        input: &str,
        output: &str,
        clip: &AudioClip,
        config: &FilterConfig,
        outcome: &FilterOutcome,
    ) -> Self {
        let original = SignalStats::from_samples(&outcome.original);
        let filtered = SignalStats::from_samples(&outcome.filtered);
        let rms_change_db = level_change_db(original.rms, filtered.rms);

        Self {
            input: input.to_string(),
            output: output.to_string(),
            sample_rate: clip.sample_rate,
            channels: clip.channels,
            frames: clip.frames(),
            duration_secs: clip.duration_secs(),
            cutoff_hz: config.cutoff.as_hz(),
            order: config.order,
            structure: config.structure.to_string(),
            normalization_skipped: outcome.normalization.is_silent(),
            clipped_samples: outcome.clipped,
            original,
            filtered,
            rms_change_db,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn to_text(&self) -> String {
        let rms_change = self
            .rms_change_db
            .map_or("n/a".to_string(), |db| format!("{:.1} dB", db));
        let mut text = String::new();
        text.push_str(&format!("Input:      {}\n", self.input));
        text.push_str(&format!(
            "            {} Hz, {} channel(s), {} frames ({:.2} s)\n",
            self.sample_rate, self.channels, self.frames, self.duration_secs
        ));
        text.push_str(&format!("Output:     {}\n", self.output));
        text.push_str(&format!(
            "Filter:     Butterworth lowpass, cutoff {:.1} Hz, order {}, {}\n",
            self.cutoff_hz, self.order, self.structure
        ));
        if self.normalization_skipped {
            text.push_str("            input is silent, normalization skipped\n");
        }
        text.push_str(&format!(
            "Original:   peak {:.4}, rms {:.4}\n",
            self.original.peak, self.original.rms
        ));
        text.push_str(&format!(
            "Filtered:   peak {:.4}, rms {:.4} ({}), {} clipped\n",
            self.filtered.peak, self.filtered.rms, rms_change, self.clipped_samples
        ));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_stats() {
        let stats = SignalStats::from_samples(&[0.5, -1.0, 0.5]);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 0.5);
        assert_eq!(stats.peak, 1.0);
        assert!(stats.mean.abs() < 1e-6);
        assert!((stats.rms - 0.5f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_signal_stats_empty() {
        let stats = SignalStats::from_samples(&[]);
        assert_eq!(stats.peak, 0.0);
        assert_eq!(stats.rms, 0.0);
    }

    fn summary() -> RunSummary {
        RunSummary {
            input: "in.wav".into(),
            output: "out.wav".into(),
            sample_rate: 44100,
            channels: 2,
            frames: 44100,
            duration_secs: 1.0,
            cutoff_hz: 3000.0,
            order: 6,
            structure: "direct-form".into(),
            normalization_skipped: false,
            clipped_samples: 3,
            original: SignalStats::from_samples(&[1.0, -1.0]),
            filtered: SignalStats::from_samples(&[0.1, -0.1]),
            rms_change_db: Some(-20.0),
        }
    }

    #[test]
    fn test_render_text() {
        let text = summary().render(ReportFormat::Text).unwrap();
        assert!(text.contains("cutoff 3000.0 Hz, order 6, direct-form"));
        assert!(text.contains("-20.0 dB"));
        assert!(text.contains("3 clipped"));
    }

    #[test]
    fn test_render_json() {
        let json = summary().render(ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["order"], 6);
        assert_eq!(value["channels"], 2);
        assert_eq!(value["normalization_skipped"], false);
        assert_eq!(value["original"]["peak"], 1.0);
    }
}
