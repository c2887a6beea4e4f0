use crate::error::{LowpassError, Result};
use iir_filters::filter::{DirectForm2Transposed, Filter as _};
use iir_filters::filter_design::{FilterType, butter};
use iir_filters::sos::zpk2sos;

use super::butterworth::validate_design;
use super::filter::Filter;

/// Butterworth IIR lowpass built from second-order sections
///
/// Same response as the polynomial design, but evaluated as a cascade of
/// biquads in direct form II transposed. Stays numerically well behaved at
/// orders and cutoffs where the single high-order polynomial does not.
pub struct SosLowpass {
    filter: DirectForm2Transposed,
}

impl SosLowpass {
    /// Create a new Butterworth lowpass filter
    ///
    /// # Arguments
    /// * `cutoff_hz` - Cutoff frequency in Hz
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `order` - Filter order
    ///
    /// # Errors
    /// Returns `LowpassError::InvalidCutoff` or `LowpassError::FilterDesign`
    /// if filter parameters are invalid
    pub fn new(cutoff_hz: f64, sample_rate: f64, order: usize) -> Result<Self> {
        validate_design(cutoff_hz, sample_rate, order)?;

        let zpk = butter(order as u32, FilterType::LowPass(cutoff_hz), sample_rate)
            .map_err(|e| LowpassError::FilterDesign(format!("{:?}", e)))?;

        let sos =
            zpk2sos(&zpk, None).map_err(|e| LowpassError::FilterDesign(format!("{:?}", e)))?;

        Ok(Self {
            filter: DirectForm2Transposed::new(&sos),
        })
    }
}

impl Filter for SosLowpass {
    fn process(&mut self, sample: f32) -> f32 {
        self.filter.filter(sample as f64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_processing::butterworth::design_lowpass;
    use crate::signal_processing::direct_form::lfilter;
    use std::f32::consts::PI;

    #[test]
    fn test_sos_lowpass_design() {
        assert!(SosLowpass::new(3000.0, 44100.0, 6).is_ok());
    }

    #[test]
    fn test_sos_lowpass_rejects_nyquist() {
        assert!(matches!(
            SosLowpass::new(24000.0, 48000.0, 4),
            Err(LowpassError::InvalidCutoff { .. })
        ));
    }

    #[test]
    fn test_sos_matches_direct_form() {
        let input: Vec<f32> = (0..4800)
            .map(|i| {
                let t = i as f32 / 48000.0;
                0.5 * (2.0 * PI * 440.0 * t).sin() + 0.4 * (2.0 * PI * 9000.0 * t).sin()
            })
            .collect();

        let tf = design_lowpass(2000.0, 48000.0, 4).unwrap();
        let direct = lfilter(&tf, &input);

        let mut sos = SosLowpass::new(2000.0, 48000.0, 4).unwrap();
        let mut cascaded = input.clone();
        sos.process_buffer(&mut cascaded);

        for (i, (d, s)) in direct.iter().zip(&cascaded).enumerate() {
            assert!(
                (d - s).abs() < 1e-4,
                "sample {}: direct {} vs sos {}",
                i,
                d,
                s
            );
        }
    }

    #[test]
    fn test_sos_handles_high_order_low_cutoff() {
        assert!(design_lowpass(100.0, 44100.0, 12).is_err());

        let mut filter = SosLowpass::new(100.0, 44100.0, 12).unwrap();
        let mut output: Vec<f32> = (0..44100)
            .map(|i| 0.9 * (2.0 * PI * 20.0 * i as f32 / 44100.0).sin())
            .collect();
        filter.process_buffer(&mut output);

        assert!(output.iter().all(|y| y.is_finite()));
        let peak = output.iter().fold(0.0f32, |m, y| m.max(y.abs()));
        assert!(peak < 1.5, "High-order sections diverged: peak {}", peak);
    }

    #[test]
    fn test_sos_attenuates_stopband() {
        let mut filter = SosLowpass::new(1000.0, 48000.0, 6).unwrap();

        let input: Vec<f32> = (0..4800)
            .map(|i| (2.0 * PI * 8000.0 * i as f32 / 48000.0).sin())
            .collect();
        let mut output = input.clone();
        filter.process_buffer(&mut output);

        let input_rms: f32 =
            (input.iter().skip(1000).map(|x| x * x).sum::<f32>() / 3800.0).sqrt();
        let output_rms: f32 =
            (output.iter().skip(1000).map(|x| x * x).sum::<f32>() / 3800.0).sqrt();

        let attenuation_db = 20.0 * (output_rms / input_rms).log10();
        assert!(
            attenuation_db < -60.0,
            "Stopband not attenuated enough: {} dB",
            attenuation_db
        );
    }
}
