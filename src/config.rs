use std::collections::BTreeSet;
use std::fmt;
use crate::analysis::Statistic;
use crate::error::StatsError;
/// Electrode count of the recording device; the default channel set covers all of them.
pub const DEVICE_CHANNEL_COUNT: usize = 60;
/// Ordered set of channel ids. Iteration order defines statistic vector order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelSet {
    channels: BTreeSet<usize>,
}
impl ChannelSet {
    pub fn new(channels: impl IntoIterator<Item = usize>) -> Self {
        Self {
            channels: channels.into_iter().collect(),
        }
    }
    /// Every channel of the device.
    pub fn all() -> Self {
        Self::new(0..DEVICE_CHANNEL_COUNT)
    }
    /// Parses comma-separated inclusion/exclusion lists. Exclusion is applied after inclusion.
    pub fn from_lists(include: Option<&str>, exclude: Option<&str>) -> Result<Self, StatsError> {
        let mut set = match include {
            Some(list) => Self::new(parse_channel_list(list)?),
            None => Self::all(),
        };
        if let Some(list) = exclude {
            for channel in parse_channel_list(list)? {
                set.channels.remove(&channel);
            }
        }
        Ok(set)
    }
    pub fn len(&self) -> usize {
        self.channels.len()
    }
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
    pub fn contains(&self, channel: usize) -> bool {
        self.channels.contains(&channel)
    }
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.channels.iter().copied()
    }
}
impl Default for ChannelSet {
    fn default() -> Self {
        Self::all()
    }
}
fn parse_channel_list(list: &str) -> Result<Vec<usize>, StatsError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| StatsError::InvalidChannel(s.to_owned()))
        })
        .collect()
}
/// Half-open time interval `[t0, t1)` in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeRange {
    pub t0: f64,
    pub t1: f64,
}
impl TimeRange {
    pub fn new(t0: f64, t1: f64) -> Result<Self, StatsError> {
        if t0.is_nan() || t1.is_nan() || t0 < 0.0 || t1 < t0 {
            return Err(StatsError::InvalidTimeRange { t0, t1 });
        }
        Ok(Self { t0, t1 })
    }
    pub fn contains(&self, t: f64) -> bool {
        t >= self.t0 && t < self.t1
    }
}
impl Default for TimeRange {
    fn default() -> Self {
        Self {
            t0: 0.0,
            t1: f64::INFINITY,
        }
    }
}
/// How per-channel tables are reduced before plotting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AggregationMode {
    /// Sum every channel into one value per file.
    #[default]
    Total,
    PerChannel,
}
impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationMode::Total => f.write_str("total"),
            AggregationMode::PerChannel => f.write_str("per-channel"),
        }
    }
}
/// Everything a statistics run needs besides the file list.
#[derive(Clone, Debug)]
pub struct StatsConfig {
    pub stats: Vec<Statistic>,
    pub channels: ChannelSet,
    pub range: TimeRange,
    pub normalize: bool,
    pub mode: AggregationMode,
}
impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            stats: vec![Statistic::SpikeCount],
            channels: ChannelSet::all(),
            range: TimeRange::default(),
            normalize: false,
            mode: AggregationMode::Total,
        }
    }
}
impl StatsConfig {
    /// Parses a comma-separated statistic list, rejecting unknown names and dropping repeats.
    pub fn parse_stats(list: &str) -> Result<Vec<Statistic>, StatsError> {
        let mut stats: Vec<Statistic> = Vec::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let stat = name.parse::<Statistic>()?;
            if !stats.contains(&stat) {
                stats.push(stat);
            }
        }
        Ok(stats)
    }
    /// Rejects configurations that cannot run, before any file is opened.
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.stats.is_empty() {
            return Err(StatsError::NoStatistics);
        }
        if self.mode != AggregationMode::Total {
            return Err(StatsError::UnsupportedMode(self.mode.to_string()));
        }
        TimeRange::new(self.range.t0, self.range.t1)?;
        Ok(())
    }
    /// Whether sample counts must be gathered, either for plotting or as the divisor.
    pub fn needs_sample_count(&self) -> bool {
        self.normalize || self.stats.contains(&Statistic::SampleCount)
    }
}
