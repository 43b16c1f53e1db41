use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Error, ErrorKind};
use std::path::{Path, PathBuf};
use ndarray::Array2;
use serde::Deserialize;
use crate::error::StatsError;
/// Continuous sampled signal for every channel of one recording.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "RawAnalogStream")]
pub struct AnalogStream {
    sample_rate_hz: f64,
    channel_ids: Vec<usize>, // row -> channel id
    channel_data: Array2<f64>, // channels x samples
}
#[derive(Deserialize)]
struct RawAnalogStream {
    sample_rate_hz: f64,
    #[serde(default)]
    channel_ids: Option<Vec<usize>>,
    channel_data: Vec<Vec<f64>>,
}
impl TryFrom<RawAnalogStream> for AnalogStream {
    type Error = StatsError;
    fn try_from(raw: RawAnalogStream) -> Result<Self, Self::Error> {
        let channel_ids = raw
            .channel_ids
            .unwrap_or_else(|| (0..raw.channel_data.len()).collect());
        Self::from_rows(raw.sample_rate_hz, channel_ids, raw.channel_data)
    }
}
impl AnalogStream {
    pub fn new(
        sample_rate_hz: f64,
        channel_ids: Vec<usize>,
        channel_data: Array2<f64>,
    ) -> Result<Self, StatsError> {
        if !(sample_rate_hz.is_finite() && sample_rate_hz > 0.0) {
            return Err(StatsError::InvalidSampleRate);
        }
        if channel_ids.len() != channel_data.nrows() {
            return Err(StatsError::ShapeMismatch {
                expected: channel_data.nrows(),
                actual: channel_ids.len(),
            });
        }
        // Rows must be contiguous so channels can be handed out as slices.
        let channel_data = if channel_data.is_standard_layout() {
            channel_data
        } else {
            channel_data.as_standard_layout().into_owned()
        };
        Ok(Self {
            sample_rate_hz,
            channel_ids,
            channel_data,
        })
    }
    /// Builds a stream from one sample vector per channel; all rows must have the same length.
    pub fn from_rows(
        sample_rate_hz: f64,
        channel_ids: Vec<usize>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, StatsError> {
        let n_rows = rows.len();
        let n_samples = rows.first().map(|r| r.len()).unwrap_or(0);
        if let Some(bad) = rows.iter().find(|r| r.len() != n_samples) {
            return Err(StatsError::ShapeMismatch {
                expected: n_samples,
                actual: bad.len(),
            });
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let channel_data = Array2::from_shape_vec((n_rows, n_samples), flat).map_err(|_| {
            StatsError::ShapeMismatch {
                expected: n_rows * n_samples,
                actual: n_rows,
            }
        })?;
        Self::new(sample_rate_hz, channel_ids, channel_data)
    }
    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }
    pub fn channel_ids(&self) -> &[usize] {
        &self.channel_ids
    }
    pub fn sample_count(&self) -> usize {
        self.channel_data.ncols()
    }
    /// Samples of one channel, or `None` when the stream does not carry it.
    pub fn channel(&self, channel: usize) -> Option<&[f64]> {
        let row = self.channel_ids.iter().position(|&id| id == channel)?;
        self.channel_data.row(row).to_slice()
    }
}
/// Pre-detected event times (seconds) per channel.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TimestampStream {
    timestamps: BTreeMap<usize, Vec<f64>>,
}
impl TimestampStream {
    pub fn new(timestamps: BTreeMap<usize, Vec<f64>>) -> Self {
        Self { timestamps }
    }
    pub fn channel(&self, channel: usize) -> Option<&[f64]> {
        self.timestamps.get(&channel).map(Vec::as_slice)
    }
}
/// One loaded input file. Only the two stream accessors are part of the contract.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Recording {
    #[serde(default)]
    analog_streams: Vec<AnalogStream>,
    #[serde(default)]
    timestamp_streams: Vec<TimestampStream>,
}
impl Recording {
    pub fn new(analog_streams: Vec<AnalogStream>, timestamp_streams: Vec<TimestampStream>) -> Self {
        Self {
            analog_streams,
            timestamp_streams,
        }
    }
    pub fn analog_stream(&self, index: usize) -> Result<&AnalogStream, StatsError> {
        self.analog_streams
            .get(index)
            .ok_or(StatsError::MissingStream {
                kind: "analog",
                index,
            })
    }
    pub fn timestamp_stream(&self, index: usize) -> Result<&TimestampStream, StatsError> {
        self.timestamp_streams
            .get(index)
            .ok_or(StatsError::MissingStream {
                kind: "timestamp",
                index,
            })
    }
}
/// Anything that can turn a file path into a [`Recording`].
pub trait RecordingLoader {
    fn load(&self, path: &Path) -> Result<Recording, StatsError>;
}
/// Reads the JSON export of a recording.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonRecordingLoader;
impl RecordingLoader for JsonRecordingLoader {
    fn load(&self, path: &Path) -> Result<Recording, StatsError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
/// In-memory loader useful for tests and deterministic playback.
#[derive(Clone, Debug, Default)]
pub struct ManualLoader {
    recordings: HashMap<PathBuf, Recording>,
}
impl ManualLoader {
    pub fn new(recordings: impl IntoIterator<Item = (PathBuf, Recording)>) -> Self {
        Self {
            recordings: recordings.into_iter().collect(),
        }
    }
}
impl RecordingLoader for ManualLoader {
    fn load(&self, path: &Path) -> Result<Recording, StatsError> {
        self.recordings.get(path).cloned().ok_or_else(|| {
            StatsError::Io(Error::new(
                ErrorKind::NotFound,
                format!("no recording registered for {}", path.display()),
            ))
        })
    }
}
