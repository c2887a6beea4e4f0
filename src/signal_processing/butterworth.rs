//! Butterworth low-pass design via the bilinear transform.
//!
//! The design follows the classic analog-prototype route: place the `N`
//! Butterworth poles on the left half of the unit circle, pre-warp the cutoff,
//! scale the prototype to it, map poles and zeros to the z-plane with the
//! bilinear transform and finally expand everything into polynomial
//! (transfer function) form.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::constants::{DC_GAIN_TOLERANCE, MAX_FILTER_ORDER};
use crate::error::{LowpassError, Result};

/// Digital filter in polynomial form.
///
/// Describes the recurrence
/// `y[n] = sum(b[k] * x[n-k]) - sum(a[k] * y[n-k])` for `k >= 1` in the
/// feedback sum. `a[0]` is always `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl TransferFunction {
    /// Build a transfer function from raw coefficients, normalizing by `a[0]`.
    ///
    /// # Errors
    /// Returns `LowpassError::FilterDesign` if either sequence is empty or
    /// `a[0]` is zero or not finite.
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Result<Self> {
        if b.is_empty() {
            return Err(LowpassError::FilterDesign(
                "feedforward coefficients are empty".into(),
            ));
        }
        let a0 = match a.first() {
            Some(&a0) if a0 != 0.0 && a0.is_finite() => a0,
            Some(&a0) => {
                return Err(LowpassError::FilterDesign(format!(
                    "leading feedback coefficient must be non-zero, got {}",
                    a0
                )));
            }
            None => {
                return Err(LowpassError::FilterDesign(
                    "feedback coefficients are empty".into(),
                ));
            }
        };

        Ok(Self {
            b: b.iter().map(|c| c / a0).collect(),
            a: a.iter().map(|c| c / a0).collect(),
        })
    }

    /// Feedforward (numerator) coefficients
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Feedback (denominator) coefficients, `a[0] == 1.0`
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    pub fn order(&self) -> usize {
        self.b.len().max(self.a.len()) - 1
    }

    /// Gain at 0 Hz
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }

    /// Magnitude of the frequency response at `freq_hz`.
    pub fn magnitude_at(&self, freq_hz: f64, sample_rate: f64) -> f64 {
        let omega = 2.0 * PI * freq_hz / sample_rate;
        let eval = |coeffs: &[f64]| -> Complex64 {
            coeffs
                .iter()
                .enumerate()
                .map(|(k, &c)| c * Complex64::from_polar(1.0, -omega * k as f64))
                .sum()
        };
        eval(&self.b).norm() / eval(&self.a).norm()
    }
}

/// Design a digital Butterworth low-pass filter.
///
/// # Arguments
/// * `cutoff_hz` - -3 dB frequency in Hz, strictly below Nyquist
/// * `sample_rate` - Sample rate in Hz
/// * `order` - Filter order (1..=`MAX_FILTER_ORDER`)
///
/// # Errors
/// Returns `LowpassError::InvalidCutoff` when the cutoff is at or above
/// Nyquist and `LowpassError::FilterDesign` for any other invalid parameter.
pub fn design_lowpass(cutoff_hz: f64, sample_rate: f64, order: usize) -> Result<TransferFunction> {
    validate_design(cutoff_hz, sample_rate, order)?;

    let normalized_cutoff = cutoff_hz / (sample_rate / 2.0);

    // Work at an internal sample rate of 2, so fs2 = 2 * fs = 4.
    let fs2 = 4.0;
    let warped = fs2 * (PI * normalized_cutoff / 2.0).tan();

    let analog_poles: Vec<Complex64> = prototype_poles(order)
        .into_iter()
        .map(|p| p * warped)
        .collect();
    let analog_gain = warped.powi(order as i32);

    let digital_poles: Vec<Complex64> = analog_poles
        .iter()
        .map(|&p| (fs2 + p) / (fs2 - p))
        .collect();
    let denominator: Complex64 = analog_poles.iter().map(|&p| fs2 - p).product();
    let digital_gain = analog_gain * (Complex64::new(1.0, 0.0) / denominator).re;
    let digital_zeros = vec![Complex64::new(-1.0, 0.0); order];

    let b: Vec<f64> = poly(&digital_zeros)
        .iter()
        .map(|c| c.re * digital_gain)
        .collect();
    let a: Vec<f64> = poly(&digital_poles).iter().map(|c| c.re).collect();

    log::debug!(
        "Butterworth lowpass: order {}, cutoff {:.1} Hz @ {:.0} Hz (wn = {:.5}), b = {:?}, a = {:?}",
        order,
        cutoff_hz,
        sample_rate,
        normalized_cutoff,
        b,
        a
    );

    let tf = TransferFunction::new(b, a)?;
    check_realizable(&tf, cutoff_hz, order)?;
    Ok(tf)
}

/// Reject polynomial coefficients that no longer describe the designed
/// filter once rounded to `f64`.
fn check_realizable(tf: &TransferFunction, cutoff_hz: f64, order: usize) -> Result<()> {
    if !is_stable(tf.a()) {
        return Err(LowpassError::FilterDesign(format!(
            "order {} at {:.1} Hz is unstable in direct form; use --structure sos",
            order, cutoff_hz
        )));
    }
    let dc_error = (tf.dc_gain() - 1.0).abs();
    if dc_error.is_nan() || dc_error > DC_GAIN_TOLERANCE {
        return Err(LowpassError::FilterDesign(format!(
            "order {} at {:.1} Hz loses precision in direct form (DC gain {:.6}); use --structure sos",
            order,
            cutoff_hz,
            tf.dc_gain()
        )));
    }
    Ok(())
}

/// Schur-Cohn step-down test: true when every root of the monic feedback
/// polynomial lies strictly inside the unit circle.
fn is_stable(a: &[f64]) -> bool {
    let mut poly = a.to_vec();
    while poly.len() > 1 {
        let m = poly.len() - 1;
        let k = poly[m] / poly[0];
        if !k.is_finite() || k.abs() >= 1.0 {
            return false;
        }
        let denom = 1.0 - k * k;
        poly = (0..m).map(|i| (poly[i] - k * poly[m - i]) / denom).collect();
    }
    true
}

/// Check low-pass design parameters without designing anything.
pub fn validate_design(cutoff_hz: f64, sample_rate: f64, order: usize) -> Result<()> {
    if order == 0 {
        return Err(LowpassError::FilterDesign(
            "filter order must be at least 1".into(),
        ));
    }
    if order > MAX_FILTER_ORDER {
        return Err(LowpassError::FilterDesign(format!(
            "filter order {} exceeds maximum of {}",
            order, MAX_FILTER_ORDER
        )));
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(LowpassError::FilterDesign(format!(
            "sample rate must be positive, got {}",
            sample_rate
        )));
    }
    if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 {
        return Err(LowpassError::FilterDesign(format!(
            "cutoff frequency must be positive, got {}",
            cutoff_hz
        )));
    }
    let nyquist_hz = sample_rate / 2.0;
    if cutoff_hz >= nyquist_hz {
        return Err(LowpassError::InvalidCutoff {
            cutoff_hz,
            nyquist_hz,
        });
    }
    Ok(())
}

/// Unity-cutoff analog Butterworth poles, `-exp(j*pi*m/(2N))` for
/// `m = -N+1, -N+3, ..., N-1`.
fn prototype_poles(order: usize) -> Vec<Complex64> {
    let n = order as i64;
    (-n + 1..n)
        .step_by(2)
        .map(|m| -Complex64::new(0.0, PI * m as f64 / (2.0 * order as f64)).exp())
        .collect()
}

/// Expand roots into monic polynomial coefficients, highest power first.
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * root;
        }
        coeffs = next;
    }
    coeffs
}
