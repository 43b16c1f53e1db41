//! Channel-wise statistics over one recording.
//!
//! Every per-channel function returns one value per channel of the requested set, in set order.
//! Channels the recording does not carry stay at zero.
use std::fmt;
use std::str::FromStr;
use ndarray::Array1;
use crate::analysis::digitize::{digitize, split_where};
use crate::analysis::range::{stream_data_in_range, timestamp_data_in_range};
use crate::config::{ChannelSet, TimeRange};
use crate::error::StatsError;
use crate::recording::Recording;
/// Thresholds for bit counting sit this many standard deviations from the channel mean.
pub const BIT_THRESHOLD_SIGMA: f64 = 5.0;
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Statistic {
    SampleCount,
    SpikeCount,
    BitCount,
    Mean,
    Std,
}
impl Statistic {
    pub const ALL: [Statistic; 5] = [
        Statistic::SampleCount,
        Statistic::SpikeCount,
        Statistic::BitCount,
        Statistic::Mean,
        Statistic::Std,
    ];
    pub fn name(self) -> &'static str {
        match self {
            Statistic::SampleCount => "sample_count",
            Statistic::SpikeCount => "spike_count",
            Statistic::BitCount => "bit_count",
            Statistic::Mean => "mean",
            Statistic::Std => "std",
        }
    }
    /// Whether the statistic is a count that becomes a rate when divided by the sample count.
    pub fn is_normalizable(self) -> bool {
        matches!(self, Statistic::SpikeCount | Statistic::BitCount)
    }
}
impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for Statistic {
    type Err = StatsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Statistic::ALL
            .into_iter()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| StatsError::UnknownStatistic(s.to_owned()))
    }
}
/// Axis/legend label for a statistic.
pub fn display_label(stat: Statistic, normalized: bool) -> String {
    if normalized {
        format!("{stat} (normalized)")
    } else {
        stat.to_string()
    }
}
/// Total number of samples in the first analog stream, regardless of channel selection.
pub fn sample_count(recording: &Recording) -> Result<usize, StatsError> {
    Ok(recording.analog_stream(0)?.sample_count())
}
/// Number of recorded events per channel within `range`.
pub fn spike_count(
    recording: &Recording,
    channels: &ChannelSet,
    range: TimeRange,
) -> Result<Array1<f64>, StatsError> {
    let timestamps = timestamp_data_in_range(recording.timestamp_stream(0)?, channels, range);
    Ok(channels
        .iter()
        .map(|ch| timestamps.get(&ch).map_or(0.0, |events| events.len() as f64))
        .collect())
}
/// Number of threshold-crossing state changes per channel within `range`.
///
/// The signal is digitized against `mean -/+ 5 * std` of the in-range slice and the run
/// boundaries of the resulting state sequence are counted. This is a cheap event-rate proxy,
/// not spike detection: a pulse that leaves and re-enters the band counts as two bits.
pub fn bit_count(
    recording: &Recording,
    channels: &ChannelSet,
    range: TimeRange,
) -> Result<Array1<f64>, StatsError> {
    per_channel(recording, channels, range, |data| {
        let (mean, std) = mean_std(data);
        let low = mean - BIT_THRESHOLD_SIGMA * std;
        let high = mean + BIT_THRESHOLD_SIGMA * std;
        split_where(&digitize(data, low, high)).len() as f64
    })
}
/// Mean sample value per channel within `range`.
pub fn channel_mean(
    recording: &Recording,
    channels: &ChannelSet,
    range: TimeRange,
) -> Result<Array1<f64>, StatsError> {
    per_channel(recording, channels, range, |data| mean_std(data).0)
}
/// Population standard deviation per channel within `range`.
pub fn channel_std(
    recording: &Recording,
    channels: &ChannelSet,
    range: TimeRange,
) -> Result<Array1<f64>, StatsError> {
    per_channel(recording, channels, range, |data| mean_std(data).1)
}
fn per_channel(
    recording: &Recording,
    channels: &ChannelSet,
    range: TimeRange,
    reduce: impl Fn(&[f64]) -> f64,
) -> Result<Array1<f64>, StatsError> {
    let stream_data = stream_data_in_range(recording.analog_stream(0)?, channels, range);
    Ok(channels
        .iter()
        .map(|ch| match stream_data.get(&ch) {
            Some(data) if !data.is_empty() => reduce(data),
            _ => 0.0,
        })
        .collect())
}
/// Mean and population standard deviation; `(0, 0)` for an empty slice.
pub fn mean_std(data: &[f64]) -> (f64, f64) {
    if data.is_empty() {
        return (0.0, 0.0);
    }
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let variance = data
        .iter()
        .map(|v| {
            let delta = v - mean;
            delta * delta
        })
        .sum::<f64>()
        / n;
    (mean, variance.sqrt())
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use crate::recording::{AnalogStream, TimestampStream};
    fn recording(rows: Vec<Vec<f64>>, timestamps: BTreeMap<usize, Vec<f64>>) -> Recording {
        let ids = (0..rows.len()).collect();
        Recording::new(
            vec![AnalogStream::from_rows(1000.0, ids, rows).unwrap()],
            vec![TimestampStream::new(timestamps)],
        )
    }
    /// Flat baseline with `pulses` one-sample spikes of height 1, evenly spaced.
    fn pulse_train(len: usize, pulses: usize) -> Vec<f64> {
        let mut data = vec![0.0; len];
        let spacing = len / (pulses + 1);
        for k in 1..=pulses {
            data[k * spacing] = 1.0;
        }
        data
    }
    #[test]
    fn statistic_names_round_trip() {
        for stat in Statistic::ALL {
            assert_eq!(stat.name().parse::<Statistic>().unwrap(), stat);
        }
        assert!(matches!(
            "median".parse::<Statistic>(),
            Err(StatsError::UnknownStatistic(_))
        ));
    }
    #[test]
    fn labels_mark_normalization() {
        assert_eq!(display_label(Statistic::BitCount, false), "bit_count");
        assert_eq!(
            display_label(Statistic::SpikeCount, true),
            "spike_count (normalized)"
        );
    }
    #[test]
    fn sample_count_ignores_channel_selection() {
        let rec = recording(vec![vec![0.0; 42]; 3], BTreeMap::new());
        assert_eq!(sample_count(&rec).unwrap(), 42);
    }
    #[test]
    fn spike_count_defaults_missing_channels_to_zero() {
        let rec = recording(
            vec![vec![0.0; 4]],
            BTreeMap::from([(0, vec![1.0, 2.0, 3.0]), (1, vec![]), (2, vec![5.0])]),
        );
        let counts = spike_count(&rec, &ChannelSet::new([0, 1, 2]), TimeRange::default()).unwrap();
        assert_eq!(counts.to_vec(), vec![3.0, 0.0, 1.0]);
        let counts = spike_count(&rec, &ChannelSet::new([2, 9]), TimeRange::default()).unwrap();
        assert_eq!(counts.to_vec(), vec![1.0, 0.0]);
    }
    #[test]
    fn spike_count_respects_time_range() {
        let rec = recording(
            vec![vec![0.0; 4]],
            BTreeMap::from([(0, vec![1.0, 2.0, 3.0])]),
        );
        let range = TimeRange::new(1.5, 3.0).unwrap();
        let counts = spike_count(&rec, &ChannelSet::new([0]), range).unwrap();
        assert_eq!(counts.to_vec(), vec![1.0]);
    }
    #[test]
    fn bit_count_counts_pulse_edges() {
        let rec = recording(vec![vec![0.0; 1000], pulse_train(1000, 5)], BTreeMap::new());
        let bits = bit_count(&rec, &ChannelSet::new([0, 1]), TimeRange::default()).unwrap();
        assert_eq!(bits.to_vec(), vec![0.0, 10.0]);
    }
    #[test]
    fn bit_count_is_zero_for_noise_floor() {
        // uniform noise never leaves the +/- 5 sigma band (max |x - mean| is sqrt(3) sigma)
        let mut rng = StdRng::seed_from_u64(7);
        let noise: Vec<f64> = (0..500).map(|_| rng.gen_range(-1e-9..1e-9)).collect();
        let rec = recording(vec![noise], BTreeMap::new());
        let bits = bit_count(&rec, &ChannelSet::new([0]), TimeRange::default()).unwrap();
        assert_eq!(bits.to_vec(), vec![0.0]);
    }
    #[test]
    fn bit_count_leaves_empty_windows_at_zero() {
        let rec = recording(vec![pulse_train(1000, 5)], BTreeMap::new());
        // 1000 Hz: the recording lasts one second
        let range = TimeRange::new(5.0, f64::INFINITY).unwrap();
        let bits = bit_count(&rec, &ChannelSet::new([0, 3]), range).unwrap();
        assert_eq!(bits.to_vec(), vec![0.0, 0.0]);
    }
    #[test]
    fn mean_and_std_are_population_moments() {
        let rec = recording(vec![vec![0.0, 2.0, -2.0, 0.0]], BTreeMap::new());
        let channels = ChannelSet::new([0]);
        let mean = channel_mean(&rec, &channels, TimeRange::default()).unwrap();
        let std = channel_std(&rec, &channels, TimeRange::default()).unwrap();
        assert_eq!(mean.to_vec(), vec![0.0]);
        assert!((std[0] - 2.0_f64.sqrt()).abs() < 1e-12);
    }
    #[test]
    fn missing_streams_propagate() {
        let rec = Recording::default();
        assert!(matches!(
            sample_count(&rec),
            Err(StatsError::MissingStream { kind: "analog", .. })
        ));
        assert!(matches!(
            spike_count(&rec, &ChannelSet::all(), TimeRange::default()),
            Err(StatsError::MissingStream { kind: "timestamp", .. })
        ));
    }
}
