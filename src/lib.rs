pub mod config;
pub mod constants;
pub mod error;
pub mod processing;
pub mod report;
pub mod signal_processing;
pub mod synthesis;
pub mod visualization;
pub mod wav;

pub use config::LowpassConfig;
pub use error::{LowpassError, Result};
pub use processing::{FilterOutcome, LowpassProcessor};
pub use wav::{AudioClip, load_wav, save_wav_i16};
