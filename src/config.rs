//! Configuration for the low-pass pipeline.
//!
//! Settings come from `LowpassConfig::default()`, optionally overlaid by a
//! TOML file and then by command-line flags:
//!
//! ```toml
//! [filter]
//! cutoff = "3khz"     # or a plain number of Hz
//! order = 6
//! structure = "sos"   # or "direct-form"
//!
//! [output]
//! path = "filtered.wav"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::constants::{DEFAULT_CUTOFF_HZ, DEFAULT_FILTER_ORDER};
use crate::error::{LowpassError, Result};
use crate::signal_processing::butterworth::validate_design;

/// Low-pass cutoff frequency
///
/// # Parsing formats
/// - `3000` - frequency in Hz (no suffix)
/// - `3000hz` or `3000Hz` - frequency in Hz (explicit)
/// - `3khz` or `3kHz` - frequency in kHz
///
/// # Example
/// ```
/// use lowpass::config::CutoffFrequency;
///
/// let cutoff: CutoffFrequency = "2.5khz".parse().unwrap();
/// assert!((cutoff.as_hz() - 2500.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "CutoffValue")]
pub struct CutoffFrequency(f64);

impl CutoffFrequency {
    /// Create from frequency in Hz
    pub fn from_hz(hz: f64) -> Self {
        Self(hz)
    }

    /// Get frequency in Hz
    pub fn as_hz(&self) -> f64 {
        self.0
    }
}

impl Default for CutoffFrequency {
    fn default() -> Self {
        Self::from_hz(DEFAULT_CUTOFF_HZ)
    }
}

impl fmt::Display for CutoffFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}hz", self.0)
    }
}

impl FromStr for CutoffFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();

        let (num, scale) = if let Some(num) = lower.strip_suffix("khz") {
            (num, 1000.0)
        } else if let Some(num) = lower.strip_suffix("hz") {
            (num, 1.0)
        } else {
            (lower.as_str(), 1.0)
        };

        let value: f64 = num
            .trim()
            .parse()
            .map_err(|_| format!("invalid frequency: {}", s))?;
        let hz = value * scale;
        if !hz.is_finite() || hz <= 0.0 {
            return Err("frequency must be positive".to_string());
        }
        Ok(Self::from_hz(hz))
    }
}

/// TOML accepts the cutoff either as a bare number or as a suffixed string.
#[derive(Deserialize)]
#[serde(untagged)]
enum CutoffValue {
    Hz(f64),
    Text(String),
}

impl TryFrom<CutoffValue> for CutoffFrequency {
    type Error = String;

    fn try_from(value: CutoffValue) -> std::result::Result<Self, Self::Error> {
        match value {
            CutoffValue::Hz(hz) if hz.is_finite() && hz > 0.0 => Ok(Self::from_hz(hz)),
            CutoffValue::Hz(_) => Err("frequency must be positive".to_string()),
            CutoffValue::Text(text) => text.parse(),
        }
    }
}

/// How the designed filter is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FilterStructure {
    /// Single difference equation over the full `b`/`a` polynomials
    #[default]
    DirectForm,
    /// Cascade of second-order sections (better conditioned at high orders)
    Sos,
}

impl fmt::Display for FilterStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterStructure::DirectForm => write!(f, "direct-form"),
            FilterStructure::Sos => write!(f, "sos"),
        }
    }
}

/// Complete run configuration
///
/// # Example
/// ```
/// use lowpass::config::LowpassConfig;
///
/// let config = LowpassConfig::from_toml_str("[filter]\norder = 4").unwrap();
/// assert_eq!(config.filter.order, 4);
/// assert_eq!(config.filter.cutoff.as_hz(), 3000.0);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LowpassConfig {
    /// Filter design parameters
    pub filter: FilterConfig,
    /// Output file settings
    pub output: OutputConfig,
}

/// Butterworth design parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Cutoff frequency (-3 dB point)
    pub cutoff: CutoffFrequency,
    /// Filter order (steepness of the rolloff)
    pub order: usize,
    /// Evaluation structure
    pub structure: FilterStructure,
}

/// Output file settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Where the filtered 16-bit mono WAV is written
    pub path: PathBuf,
}

impl LowpassConfig {
    /// Parse a TOML document; missing sections and keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| LowpassError::Config(e.to_string()))
    }

    /// Load a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LowpassError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }
}

impl FilterConfig {
    /// Check the design parameters against the input sample rate.
    ///
    /// # Errors
    /// Returns `LowpassError::InvalidCutoff` when the cutoff is not below
    /// Nyquist and `LowpassError::FilterDesign` for a bad order.
    pub fn validate(&self, sample_rate: u32) -> Result<()> {
        validate_design(self.cutoff.as_hz(), sample_rate as f64, self.order)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            cutoff: CutoffFrequency::default(),
            order: DEFAULT_FILTER_ORDER,
            structure: FilterStructure::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("output_audio.wav"),
        }
    }
}
