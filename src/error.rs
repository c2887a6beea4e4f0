use thiserror::Error;

#[derive(Error, Debug)]
pub enum LowpassError {
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Filter design failed: {0}")]
    FilterDesign(String),

    #[error("Cutoff {cutoff_hz:.1} Hz must be below the Nyquist frequency {nyquist_hz:.1} Hz")]
    InvalidCutoff { cutoff_hz: f64, nyquist_hz: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Report serialization failed: {0}")]
    Report(#[from] serde_json::Error),

    #[error("Display error: {0}")]
    Display(String),
}

pub type Result<T> = std::result::Result<T, LowpassError>;
