use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use lowpass::save_wav_i16;
use lowpass::signal_processing::quantize_i16;
use lowpass::synthesis::{interleave_scaled, sine_mix};

#[derive(Parser, Debug)]
#[command(name = "generate_tone")]
#[command(about = "Generate a 16-bit WAV of mixed sine tones for trying the low-pass filter")]
struct Args {
    /// Output WAV file
    #[arg(default_value = "input_audio.wav")]
    output: PathBuf,

    /// Tone frequencies in Hz, comma-separated
    #[arg(short, long, value_delimiter = ',', default_value = "440,8000")]
    tones: Vec<f32>,

    /// Signal duration in seconds
    #[arg(short, long, default_value_t = 2.0)]
    duration: f32,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 44100)]
    sample_rate: u32,

    /// Number of channels (channel k is scaled by 1/(k+1))
    #[arg(short, long, default_value_t = 1)]
    channels: u16,

    /// Peak amplitude (0-1)
    #[arg(short, long, default_value_t = 0.8)]
    amplitude: f32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.channels == 0 {
        anyhow::bail!("channels must be at least 1");
    }
    if args.duration <= 0.0 {
        anyhow::bail!("duration must be positive");
    }
    let nyquist = args.sample_rate as f32 / 2.0;
    if let Some(tone) = args.tones.iter().find(|&&f| f <= 0.0 || f >= nyquist) {
        anyhow::bail!("tone {} Hz must lie between 0 and {} Hz", tone, nyquist);
    }

    let frames = (args.duration * args.sample_rate as f32).round() as usize;
    let mono = sine_mix(&args.tones, args.amplitude, args.sample_rate, frames);
    let pcm = quantize_i16(&interleave_scaled(&mono, args.channels));

    save_wav_i16(&args.output, &pcm, args.sample_rate, args.channels)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!(
        "Wrote {} ({} frames, {} channel(s), tones {:?} Hz)",
        args.output.display(),
        frames,
        args.channels,
        args.tones
    );
    Ok(())
}
