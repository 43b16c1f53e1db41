use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use log::{debug, info, warn};
use crate::analysis::{
    bit_count, channel_mean, channel_std, display_label, normalize, sample_count, spike_count,
    Statistic, StatisticSeries, StatisticTable,
};
use crate::config::StatsConfig;
use crate::error::StatsError;
use crate::recording::{Recording, RecordingLoader};
/// Aggregated table for one requested statistic.
#[derive(Clone, Debug)]
pub struct StatResult {
    pub stat: Statistic,
    pub label: String,
    pub normalized: bool,
    pub table: StatisticTable,
}
/// Output of a batch run: one result per requested statistic, in request order.
#[derive(Clone, Debug)]
pub struct StatsReport {
    pub files: Vec<PathBuf>,
    pub results: Vec<StatResult>,
}
impl StatsReport {
    pub fn get(&self, stat: Statistic) -> Option<&StatResult> {
        self.results.iter().find(|r| r.stat == stat)
    }
    /// File basenames, used as x axis labels.
    pub fn file_labels(&self) -> Vec<String> {
        self.files.iter().map(|f| file_label(f)).collect()
    }
}
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
/// Sequential batch that loads each recording, reduces it to statistics and drops it.
pub struct StatsPipeline<L: RecordingLoader> {
    loader: L,
    config: StatsConfig,
}
impl<L: RecordingLoader> StatsPipeline<L> {
    /// Validates `config` eagerly so configuration errors surface before any file is read.
    pub fn new(loader: L, config: StatsConfig) -> Result<Self, StatsError> {
        config.validate()?;
        Ok(Self { loader, config })
    }
    pub fn config(&self) -> &StatsConfig {
        &self.config
    }
    pub fn run(&self, files: &[PathBuf]) -> Result<StatsReport, StatsError> {
        let mut series = self.empty_series();
        for file in files {
            info!("Processing {}...", file.display());
            let recording = self.loader.load(file)?;
            self.collect(&recording, &mut series)?;
        }
        let mut tables = BTreeMap::new();
        for (stat, s) in series {
            tables.insert(stat, s.finish()?);
        }
        let divisor = match tables.get(&Statistic::SampleCount) {
            Some(table) if self.config.normalize => Some(table.totals()),
            _ => None,
        };
        let mut results = Vec::with_capacity(self.config.stats.len());
        for &stat in &self.config.stats {
            let Some(table) = tables.remove(&stat) else {
                continue;
            };
            let result = match &divisor {
                Some(divisor) if stat.is_normalizable() => {
                    let table = normalize(&table, divisor)?;
                    warn_non_finite(stat, &table);
                    StatResult {
                        stat,
                        label: display_label(stat, true),
                        normalized: true,
                        table,
                    }
                }
                _ => StatResult {
                    stat,
                    label: display_label(stat, false),
                    normalized: false,
                    table,
                },
            };
            results.push(result);
        }
        Ok(StatsReport {
            files: files.to_vec(),
            results,
        })
    }
    fn empty_series(&self) -> BTreeMap<Statistic, StatisticSeries> {
        let mut series = BTreeMap::new();
        if self.config.needs_sample_count() {
            series.insert(Statistic::SampleCount, StatisticSeries::totals());
        }
        for &stat in &self.config.stats {
            if stat != Statistic::SampleCount {
                series.insert(stat, StatisticSeries::per_channel());
            }
        }
        series
    }
    fn collect(
        &self,
        recording: &Recording,
        series: &mut BTreeMap<Statistic, StatisticSeries>,
    ) -> Result<(), StatsError> {
        let channels = &self.config.channels;
        let range = self.config.range;
        for (&stat, s) in series.iter_mut() {
            match stat {
                Statistic::SampleCount => {
                    let n = sample_count(recording)?;
                    debug!("{stat}: {n}");
                    s.push_total(n as f64)?;
                }
                Statistic::SpikeCount => s.push_row(spike_count(recording, channels, range)?)?,
                Statistic::BitCount => s.push_row(bit_count(recording, channels, range)?)?,
                Statistic::Mean => s.push_row(channel_mean(recording, channels, range)?)?,
                Statistic::Std => s.push_row(channel_std(recording, channels, range)?)?,
            }
        }
        Ok(())
    }
}
fn warn_non_finite(stat: Statistic, table: &StatisticTable) {
    let undefined = match table {
        StatisticTable::Totals(values) => count_non_finite(values.iter()),
        StatisticTable::PerChannel(values) => count_non_finite(values.iter()),
    };
    if undefined > 0 {
        warn!("{stat}: {undefined} value(s) undefined after normalization (zero sample count)");
    }
}
fn count_non_finite<'a>(values: impl Iterator<Item = &'a f64>) -> usize {
    values.filter(|v| !v.is_finite()).count()
}
