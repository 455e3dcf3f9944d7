//! File-based EQ processing command.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use timbre_core::{ParameterStore, Slope, StereoEqualizer, linear_to_db};
use timbre_io::{WavSpec, read_wav_stereo, write_wav_stereo};
use tracing::info;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Low-cut (highpass) frequency in Hz
    #[arg(long, default_value = "20")]
    low_cut: f32,

    /// Low-cut slope in dB/oct
    #[arg(long, default_value = "12", value_parser = parse_slope)]
    low_cut_slope: Slope,

    /// Peak band center frequency in Hz
    #[arg(long, default_value = "750")]
    peak_freq: f32,

    /// Peak band gain in dB
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    peak_gain: f32,

    /// Peak band Q
    #[arg(long, default_value = "1.0")]
    peak_q: f32,

    /// High-cut (lowpass) frequency in Hz
    #[arg(long, default_value = "20000")]
    high_cut: f32,

    /// High-cut slope in dB/oct
    #[arg(long, default_value = "12", value_parser = parse_slope)]
    high_cut_slope: Slope,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

fn parse_slope(s: &str) -> Result<Slope, String> {
    match s {
        "12" => Ok(Slope::Db12),
        "24" => Ok(Slope::Db24),
        "36" => Ok(Slope::Db36),
        "48" => Ok(Slope::Db48),
        _ => Err(format!("invalid slope '{s}' (expected 12, 24, 36, or 48)")),
    }
}

fn build_store(args: &ProcessArgs) -> ParameterStore {
    let store = ParameterStore::default();
    store.set_low_cut_freq(args.low_cut);
    store.set_low_cut_slope(args.low_cut_slope);
    store.set_peak_freq(args.peak_freq);
    store.set_peak_gain_db(args.peak_gain);
    store.set_peak_q(args.peak_q);
    store.set_high_cut_freq(args.high_cut);
    store.set_high_cut_slope(args.high_cut_slope);
    store
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        anyhow::bail!("bit depth must be 16, 24, or 32");
    }
    if args.block_size == 0 {
        anyhow::bail!("block size must be at least 1");
    }

    println!("Reading {}...", args.input.display());
    let (mut samples, spec) = read_wav_stereo(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} frames, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f32 / sample_rate
    );

    let params = build_store(&args);
    let settings = params.snapshot();
    info!(?settings, "equalizer settings");

    let mut eq = StereoEqualizer::new();
    eq.prepare(sample_rate, args.block_size)?;

    let input_rms = stereo_rms(&samples.left, &samples.right);
    let input_peak = stereo_peak(&samples.left, &samples.right);

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    for (left, right) in samples
        .left
        .chunks_mut(args.block_size)
        .zip(samples.right.chunks_mut(args.block_size))
    {
        eq.process_cycle(&params, left, right)?;
        pb.inc(left.len() as u64);
    }
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(stereo_rms(&samples.left, &samples.right)),
        linear_to_db(stereo_peak(&samples.left, &samples.right))
    );

    let out_spec = WavSpec {
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(&args.output, &samples, out_spec)?;
    println!("Done!");

    Ok(())
}

fn stereo_rms(left: &[f32], right: &[f32]) -> f32 {
    let n = left.len() + right.len();
    if n == 0 {
        return 0.0;
    }
    let sum: f32 = left.iter().chain(right).map(|s| s * s).sum();
    (sum / n as f32).sqrt()
}

fn stereo_peak(left: &[f32], right: &[f32]) -> f32 {
    left.iter().chain(right).map(|s| s.abs()).fold(0.0, f32::max)
}
