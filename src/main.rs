use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use lowpass::config::{CutoffFrequency, FilterStructure, LowpassConfig};
use lowpass::constants::DEFAULT_PLOT_POINTS;
use lowpass::report::{ReportFormat, RunSummary};
use lowpass::visualization::WaveformSeries;
use lowpass::{LowpassProcessor, load_wav, save_wav_i16};

#[derive(Parser, Debug)]
#[command(name = "lowpass")]
#[command(about = "Butterworth low-pass filter for WAV files", long_about = None)]
struct Args {
    /// Input WAV file
    input: PathBuf,

    /// Output WAV file (16-bit mono)
    output: Option<PathBuf>,

    /// Cutoff frequency (e.g., "3000", "3000hz", "3khz")
    #[arg(short = 'c', long)]
    cutoff: Option<CutoffFrequency>,

    /// Filter order
    #[arg(short = 'o', long)]
    order: Option<usize>,

    /// Filter structure: direct-form, sos
    #[arg(long, value_enum)]
    structure: Option<FilterStructure>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show original and filtered waveforms
    #[arg(long)]
    plot: bool,

    /// Summary format: text, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &args.config {
        Some(path) => LowpassConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LowpassConfig::default(),
    };
    if let Some(cutoff) = args.cutoff {
        config.filter.cutoff = cutoff;
    }
    if let Some(order) = args.order {
        config.filter.order = order;
    }
    if let Some(structure) = args.structure {
        config.filter.structure = structure;
    }
    if let Some(output) = &args.output {
        config.output.path = output.clone();
    }

    let clip = load_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    log::info!(
        "Loaded {}: {} Hz, {} channel(s), {} frames",
        args.input.display(),
        clip.sample_rate,
        clip.channels,
        clip.frames()
    );

    let processor = LowpassProcessor::new(config.filter.clone());
    let outcome = processor
        .process_clip(&clip)
        .with_context(|| format!("Failed to filter {}", args.input.display()))?;

    save_wav_i16(&config.output.path, &outcome.pcm, outcome.sample_rate, 1)
        .with_context(|| format!("Failed to write {}", config.output.path.display()))?;
    log::info!("Wrote {}", config.output.path.display());

    let summary = RunSummary::new(
        &args.input.display().to_string(),
        &config.output.path.display().to_string(),
        &clip,
        &config.filter,
        &outcome,
    );
    println!("{}", summary.render(args.format)?);

    if args.plot {
        let original = WaveformSeries::from_samples(
            "Original",
            &outcome.original,
            outcome.sample_rate,
            DEFAULT_PLOT_POINTS,
        );
        let filtered = WaveformSeries::from_samples(
            "Filtered",
            &outcome.filtered,
            outcome.sample_rate,
            DEFAULT_PLOT_POINTS,
        );
        show_plot(original, filtered)?;
    }

    Ok(())
}

#[cfg(feature = "gui")]
fn show_plot(original: WaveformSeries, filtered: WaveformSeries) -> anyhow::Result<()> {
    lowpass::visualization::show_waveforms(original, filtered)?;
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn show_plot(original: WaveformSeries, filtered: WaveformSeries) -> anyhow::Result<()> {
    log::warn!(
        "Plotting requires the `gui` feature; skipping {} and {} plots ({:.2} s)",
        original.name,
        filtered.name,
        original.end_time()
    );
    Ok(())
}
