use crate::config::{FilterConfig, FilterStructure};
use crate::error::{LowpassError, Result};
use crate::signal_processing::{
    DirectFormFilter, Filter, Normalization, SosLowpass, clamp_unit, design_lowpass,
    peak_normalize, quantize_i16, select_first_channel,
};
use crate::wav::AudioClip;

/// Everything produced by one pass of the pipeline
pub struct FilterOutcome {
    pub sample_rate: u32,
    /// Mono, peak-normalized input
    pub original: Vec<f32>,
    /// Filtered and clamped to [-1, 1]
    pub filtered: Vec<f32>,
    /// `filtered` as 16-bit PCM
    pub pcm: Vec<i16>,
    pub normalization: Normalization,
    /// Number of filtered samples that overshot [-1, 1]
    pub clipped: usize,
}

/// Build the configured filter structure with zeroed state.
pub fn create_filter(config: &FilterConfig, sample_rate: u32) -> Result<Box<dyn Filter>> {
    let cutoff_hz = config.cutoff.as_hz();
    let sample_rate = sample_rate as f64;

    Ok(match config.structure {
        FilterStructure::DirectForm => {
            let tf = design_lowpass(cutoff_hz, sample_rate, config.order)?;
            Box::new(DirectFormFilter::new(&tf))
        }
        FilterStructure::Sos => Box::new(SosLowpass::new(cutoff_hz, sample_rate, config.order)?),
    })
}

/// Straight-through low-pass pipeline: first channel, normalize, filter,
/// clamp, quantize.
pub struct LowpassProcessor {
    config: FilterConfig,
}

impl LowpassProcessor {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Run the pipeline on a decoded clip of any channel count.
    ///
    /// # Errors
    /// Fails before touching any samples if the clip is empty, contains a
    /// non-finite sample, or the filter parameters are invalid for its sample
    /// rate (including a direct form too ill-conditioned to realize).
    pub fn process_clip(&self, clip: &AudioClip) -> Result<FilterOutcome> {
        if clip.channels > 1 {
            log::info!(
                "Using first of {} channels; the others are discarded",
                clip.channels
            );
        }
        let mono = select_first_channel(&clip.samples, clip.channels)?;
        self.process_mono(mono, clip.sample_rate)
    }

    /// Run the pipeline on a single channel.
    pub fn process_mono(&self, mut samples: Vec<f32>, sample_rate: u32) -> Result<FilterOutcome> {
        if samples.is_empty() {
            return Err(LowpassError::InvalidInput(
                "input contains no audio frames".into(),
            ));
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(LowpassError::InvalidInput(format!(
                "sample {} is not finite ({})",
                index, samples[index]
            )));
        }
        self.config.validate(sample_rate)?;

        let normalization = peak_normalize(&mut samples);
        match normalization {
            Normalization::Scaled { peak } => log::debug!("Normalized by peak {:.6}", peak),
            Normalization::Silent => log::warn!("Input is silent; skipping normalization"),
        }

        let mut filter = create_filter(&self.config, sample_rate)?;
        let mut filtered = samples.clone();
        filter.process_buffer(&mut filtered);

        let clipped = clamp_unit(&mut filtered);
        if clipped > 0 {
            log::warn!("Clamped {} filtered samples to [-1, 1]", clipped);
        }

        let pcm = quantize_i16(&filtered);

        log::info!(
            "Filtered {} samples at {} Hz (cutoff {}, order {}, {})",
            samples.len(),
            sample_rate,
            self.config.cutoff,
            self.config.order,
            self.config.structure
        );

        Ok(FilterOutcome {
            sample_rate,
            original: samples,
            filtered,
            pcm,
            normalization,
            clipped,
        })
    }
}
