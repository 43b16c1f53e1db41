//! Channel-wise statistics over multi-electrode array recordings.
//!
//! Recordings are loaded one at a time, reduced to per-channel statistics (sample, spike and
//! bit counts, mean, std), stacked into files x channels tables, optionally normalized by the
//! sample count and rendered to PNG. Complexity result blobs produced elsewhere can be
//! summarized and plotted the same way.
pub mod analysis;
pub mod complexity;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod recording;
pub use analysis::{Statistic, StatisticTable};
pub use complexity::{ComplexityBlob, EntrySummary};
pub use config::{AggregationMode, ChannelSet, StatsConfig, TimeRange};
pub use error::StatsError;
pub use pipeline::{StatsPipeline, StatsReport};
pub use plot::{render_complexity_png, render_stats_png, PlotStyle};
pub use recording::{JsonRecordingLoader, Recording, RecordingLoader};
