//! Summarize and plot a complexity result blob.
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use mea_stats::pipeline::file_label;
use mea_stats::{render_complexity_png, ComplexityBlob, PlotStyle};
#[derive(Parser, Debug)]
#[command(name = "complexity_plot")]
#[command(about = "Complexity plot")]
struct Args {
    /// Save plot to file (default: next to the blob, with a .png extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Plot max value (per-channel only)
    #[arg(short, long)]
    max: bool,
    /// Result file from the complexity analysis (JSON)
    #[arg(value_name = "FILE")]
    filename: PathBuf,
}
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    println!("Loading {}...", args.filename.display());
    let blob = ComplexityBlob::load(&args.filename)
        .with_context(|| format!("failed to load {}", args.filename.display()))?;
    for line in blob.describe() {
        println!("{line}");
    }
    if args.max && !blob.is_per_channel() {
        warn!("--max only applies to per-channel results; plotting values as-is");
    }
    let summaries = blob.summarize(args.max);
    let title = file_label(&args.filename);
    let png = render_complexity_png(&blob, &summaries, &title, &PlotStyle::default())?;
    let output = args
        .output
        .unwrap_or_else(|| args.filename.with_extension("png"));
    fs::write(&output, png).with_context(|| format!("failed to write {}", output.display()))?;
    info!("Saved plot to {}", output.display());
    Ok(())
}
