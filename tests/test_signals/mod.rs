use std::path::PathBuf;

use lowpass::save_wav_i16;
use lowpass::signal_processing::quantize_i16;

/// Unique path under the system temp directory for a test WAV file.
pub fn temp_wav_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("lowpass-test-{}-{}.wav", std::process::id(), name))
}

/// Write interleaved float samples in [-1, 1] as 16-bit PCM.
pub fn write_test_wav(name: &str, samples: &[f32], sample_rate: u32, channels: u16) -> PathBuf {
    let path = temp_wav_path(name);
    save_wav_i16(&path, &quantize_i16(samples), sample_rate, channels)
        .expect("Failed to write test WAV");
    path
}

/// RMS of `samples` after skipping the filter transient.
pub fn settled_rms(samples: &[f32], skip: usize) -> f32 {
    let tail = &samples[skip.min(samples.len())..];
    if tail.is_empty() {
        return 0.0;
    }
    (tail.iter().map(|x| x * x).sum::<f32>() / tail.len() as f32).sqrt()
}
