//! Plot channel statistics (sample, spike and bit counts, mean, std) across recordings.
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use mea_stats::{
    render_stats_png, AggregationMode, ChannelSet, JsonRecordingLoader, PlotStyle, StatsConfig,
    StatsPipeline, TimeRange,
};
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMode {
    /// Sum all selected channels per file
    Total,
    /// One series per channel (not implemented)
    PerChannel,
}
impl From<CliMode> for AggregationMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Total => AggregationMode::Total,
            CliMode::PerChannel => AggregationMode::PerChannel,
        }
    }
}
#[derive(Parser, Debug)]
#[command(name = "plot_stats")]
#[command(about = "Plot per-channel statistics of MEA recordings")]
struct Args {
    /// Save plot to file
    #[arg(short, long, value_name = "FILE", default_value = "stats.png")]
    output: PathBuf,
    /// Comma-separated stats to plot [sample_count,spike_count,bit_count,mean,std]
    #[arg(short, long, default_value = "spike_count")]
    stats: String,
    /// How channels are aggregated
    #[arg(short, long, value_enum, default_value = "total")]
    mode: CliMode,
    /// Start of the time range (seconds)
    #[arg(long, default_value_t = 0.0)]
    t0: f64,
    /// End of the time range (seconds, exclusive)
    #[arg(long, default_value_t = f64::INFINITY)]
    t1: f64,
    /// Comma-separated channels to include (default: all)
    #[arg(short, long)]
    channels: Option<String>,
    /// Comma-separated channels to exclude
    #[arg(short, long)]
    exclude_channels: Option<String>,
    /// Normalize spike and bit counts by sample count
    #[arg(short, long)]
    normalize: bool,
    /// Recordings to analyse (JSON export)
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
}
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = StatsConfig {
        stats: StatsConfig::parse_stats(&args.stats)?,
        channels: ChannelSet::from_lists(
            args.channels.as_deref(),
            args.exclude_channels.as_deref(),
        )?,
        range: TimeRange::new(args.t0, args.t1)?,
        normalize: args.normalize,
        mode: args.mode.into(),
    };
    let pipeline = StatsPipeline::new(JsonRecordingLoader, config)?;
    let config = pipeline.config();
    info!(
        "{} file(s), {} channel(s), range [{}, {}), stats: {}",
        args.files.len(),
        config.channels.len(),
        config.range.t0,
        config.range.t1,
        config
            .stats
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(",")
    );
    let report = pipeline.run(&args.files)?;
    let style = PlotStyle {
        height: 400 * report.results.len().max(1) as u32,
        ..PlotStyle::default()
    };
    let png = render_stats_png(&report, &style)?;
    fs::write(&args.output, png)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("Saved plot to {}", args.output.display());
    Ok(())
}
