//! Numeric constants shared by the filtering pipeline.

/// Positive full scale of signed 16-bit PCM. Quantization multiplies by this
/// value, so `-1.0` maps to `-32767` and `i16::MIN` is never produced.
pub const I16_FULL_SCALE: f32 = 32767.0;

/// Default low-pass cutoff in Hz.
pub const DEFAULT_CUTOFF_HZ: f64 = 3000.0;

/// Default Butterworth order.
pub const DEFAULT_FILTER_ORDER: usize = 6;

/// Upper bound on the filter order accepted by the designer.
pub const MAX_FILTER_ORDER: usize = 24;

/// Largest accepted deviation of a designed low-pass's DC gain from 1.0.
/// Expanding high orders at low normalized cutoffs into one polynomial loses
/// enough precision to push the realized response past this.
pub const DC_GAIN_TOLERANCE: f64 = 1e-2;

/// Default number of points per plotted waveform after decimation.
pub const DEFAULT_PLOT_POINTS: usize = 4000;
