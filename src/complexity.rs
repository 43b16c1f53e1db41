//! Complexity result blobs and their reduction to plottable per-entry summaries.
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use serde::Deserialize;
use crate::analysis::mean_std;
use crate::error::StatsError;
/// How the complexity values of a blob were computed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ComplexityMethod {
    /// One value per channel for every entry.
    PerChannel,
    /// One value per entry, tagged with the producer's method name.
    Other(String),
}
impl From<String> for ComplexityMethod {
    fn from(value: String) -> Self {
        if value == "per-channel" {
            ComplexityMethod::PerChannel
        } else {
            ComplexityMethod::Other(value)
        }
    }
}
impl fmt::Display for ComplexityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplexityMethod::PerChannel => f.write_str("per-channel"),
            ComplexityMethod::Other(name) => f.write_str(name),
        }
    }
}
/// A single entry of the `complexity` sequence.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ComplexityValue {
    Scalar(f64),
    PerChannel(Vec<f64>),
}
impl ComplexityValue {
    pub fn values(&self) -> &[f64] {
        match self {
            ComplexityValue::Scalar(v) => std::slice::from_ref(v),
            ComplexityValue::PerChannel(values) => values,
        }
    }
}
impl fmt::Display for ComplexityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplexityValue::Scalar(v) => write!(f, "{v}"),
            ComplexityValue::PerChannel(values) => write!(f, "{values:?}"),
        }
    }
}
/// Result bundle written by the complexity analysis step. Read-only here.
///
/// Only per-channel blobs may carry array entries; any other method must hold one value per
/// entry (a one-element array is accepted as that value).
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "RawComplexityBlob")]
pub struct ComplexityBlob {
    pub method: ComplexityMethod,
    pub complexity: Vec<ComplexityValue>,
    pub files: Vec<String>,
    pub channels: Vec<Vec<usize>>,
    pub nsamples: u64,
    pub compression: String,
}
#[derive(Deserialize)]
struct RawComplexityBlob {
    method: ComplexityMethod,
    complexity: Vec<ComplexityValue>,
    files: Vec<String>,
    channels: Vec<Vec<usize>>,
    nsamples: u64,
    compression: String,
}
impl TryFrom<RawComplexityBlob> for ComplexityBlob {
    type Error = StatsError;
    fn try_from(raw: RawComplexityBlob) -> Result<Self, Self::Error> {
        if raw.method != ComplexityMethod::PerChannel {
            if let Some(entry) = raw.complexity.iter().find(|c| c.values().len() != 1) {
                return Err(StatsError::ShapeMismatch {
                    expected: 1,
                    actual: entry.values().len(),
                });
            }
        }
        Ok(Self {
            method: raw.method,
            complexity: raw.complexity,
            files: raw.files,
            channels: raw.channels,
            nsamples: raw.nsamples,
            compression: raw.compression,
        })
    }
}
impl ComplexityBlob {
    pub fn load(path: &Path) -> Result<Self, StatsError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
    pub fn is_per_channel(&self) -> bool {
        self.method == ComplexityMethod::PerChannel
    }
    /// Average number of channels per entry (NaN when there are no entries).
    pub fn mean_channel_count(&self) -> f64 {
        let total: usize = self.channels.iter().map(Vec::len).sum();
        total as f64 / self.channels.len() as f64
    }
    /// The channel list shared by every entry, or `None` when entries differ.
    pub fn common_channels(&self) -> Option<&[usize]> {
        let first = self.channels.first()?;
        self.channels
            .iter()
            .all(|chs| chs == first)
            .then_some(first.as_slice())
    }
    /// Reduces every entry to the values the plot draws.
    pub fn summarize(&self, use_max: bool) -> Vec<EntrySummary> {
        self.complexity
            .iter()
            .map(|value| {
                let values = value.values();
                if !self.is_per_channel() {
                    return EntrySummary::Scalar(values.first().copied().unwrap_or(f64::NAN));
                }
                if use_max {
                    EntrySummary::Max(max(values))
                } else {
                    let (mean, std) = moments(values);
                    EntrySummary::MeanStd { mean, std }
                }
            })
            .collect()
    }
    /// Header and per-entry lines printed before plotting.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "  {} results, {:.2} channels each",
                self.complexity.len(),
                self.mean_channel_count()
            ),
            match self.common_channels() {
                Some(channels) => format!("  Channels: {channels:?}"),
                None => "  Channels: mixed".to_owned(),
            },
            format!("  Method: {}", self.method),
            format!("  #samples: {}", self.nsamples),
            format!("  Compression: {}", self.compression),
            String::new(),
        ];
        for (i, value) in self.complexity.iter().enumerate() {
            if self.is_per_channel() {
                let (mean, std) = moments(value.values());
                lines.push(format!("  {i}: mean={mean} std={std}"));
            } else {
                lines.push(format!("  {i}: {value}"));
            }
        }
        lines
    }
}
/// What the plot shows for one entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntrySummary {
    MeanStd { mean: f64, std: f64 },
    Max(f64),
    Scalar(f64),
}
impl EntrySummary {
    /// Central value of the entry (the plotted line).
    pub fn center(&self) -> f64 {
        match *self {
            EntrySummary::MeanStd { mean, .. } => mean,
            EntrySummary::Max(v) | EntrySummary::Scalar(v) => v,
        }
    }
    /// Band drawn around the line, if any.
    pub fn band(&self) -> Option<(f64, f64)> {
        match *self {
            EntrySummary::MeanStd { mean, std } => Some((mean - std, mean + std)),
            _ => None,
        }
    }
}
fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NAN, f64::max)
}
/// Population mean and std of one entry; both NaN for an entry without channels.
fn moments(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        (f64::NAN, f64::NAN)
    } else {
        mean_std(values)
    }
}
