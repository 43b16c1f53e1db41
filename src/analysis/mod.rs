// src/analysis/mod.rs
pub mod digitize;
pub mod range;
pub mod stats;
pub mod table;
pub use digitize::{digitize, split_where, Level};
pub use range::{sample_index_range, stream_data_in_range, timestamp_data_in_range};
pub use stats::{
    bit_count, channel_mean, channel_std, display_label, mean_std, sample_count, spike_count,
    Statistic, BIT_THRESHOLD_SIGMA,
};
pub use table::{aggregate, normalize, StatisticSeries, StatisticTable};
