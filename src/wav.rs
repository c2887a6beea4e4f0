use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{LowpassError, Result};

/// Decoded WAV contents
///
/// `samples` holds interleaved frames. Integer PCM is scaled by
/// `2^(bits - 1)`, float PCM is kept as stored.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<f32>,
}

impl AudioClip {
    /// Number of complete frames
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }
}

/// Read a WAV file of any channel count.
///
/// # Errors
/// Returns `LowpassError::Wav` if the file is missing, unreadable or not a
/// supported WAV encoding.
pub fn load_wav(path: impl AsRef<Path>) -> Result<AudioClip> {
    let mut reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    log::debug!(
        "{}: {} Hz, {} channel(s), {} bit {:?}",
        path.as_ref().display(),
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format
    );

    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    Ok(AudioClip {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        samples,
    })
}

/// Write interleaved 16-bit PCM frames.
///
/// # Errors
/// Returns `LowpassError::InvalidInput` for zero channels or a sample count
/// that is not a whole number of frames, `LowpassError::Wav` on I/O failure.
pub fn save_wav_i16(
    path: impl AsRef<Path>,
    samples: &[i16],
    sample_rate: u32,
    channels: u16,
) -> Result<()> {
    if channels == 0 || samples.len() % channels as usize != 0 {
        return Err(LowpassError::InvalidInput(format!(
            "{} samples do not form whole {}-channel frames",
            samples.len(),
            channels
        )));
    }

    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;

    for &sample in samples {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("lowpass-wav-{}-{}.wav", std::process::id(), name))
    }

    #[test]
    fn test_save_and_load_i16() {
        let path = temp_path("i16");
        let pcm = [0i16, 16384, -16384, 32767, -32768, 100];
        save_wav_i16(&path, &pcm, 22050, 2).unwrap();

        let clip = load_wav(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(clip.sample_rate, 22050);
        assert_eq!(clip.channels, 2);
        assert_eq!(clip.frames(), 3);
        assert_eq!(clip.samples[1], 0.5);
        assert_eq!(clip.samples[4], -1.0);
    }

    #[test]
    fn test_load_float_wav() {
        let path = temp_path("f32");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for s in [0.25f32, -2.0, 3.5] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let clip = load_wav(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(clip.samples, vec![0.25, -2.0, 3.5]);
        assert!((clip.duration_secs() - 3.0 / 8000.0).abs() < 1e-12);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_wav(temp_path("does-not-exist"));
        assert!(matches!(result, Err(LowpassError::Wav(_))));
    }

    #[test]
    fn test_save_rejects_partial_frames() {
        let path = temp_path("partial");
        assert!(save_wav_i16(&path, &[1, 2, 3], 8000, 2).is_err());
        assert!(save_wav_i16(&path, &[1, 2], 8000, 0).is_err());
    }
}
