use std::collections::BTreeMap;
use std::ops::Range;
use crate::config::{ChannelSet, TimeRange};
use crate::recording::{AnalogStream, TimestampStream};
/// Sample indices of a stream whose time `i / sample_rate_hz` falls in `range`.
pub fn sample_index_range(n_samples: usize, sample_rate_hz: f64, range: TimeRange) -> Range<usize> {
    let start = first_index_at_or_after(range.t0, sample_rate_hz, n_samples);
    let end = if range.t1.is_finite() {
        first_index_at_or_after(range.t1, sample_rate_hz, n_samples)
    } else {
        n_samples
    };
    start.min(end)..end
}
/// First index `i` with `i / rate >= t`, clamped to `n_samples`.
///
/// `ceil(t * rate)` is only a guess: the product can round across an integer, so the guess is
/// corrected with the same division the timestamp filter compares against.
fn first_index_at_or_after(t: f64, sample_rate_hz: f64, n_samples: usize) -> usize {
    let guess = (t * sample_rate_hz).ceil();
    let mut index = if guess >= n_samples as f64 {
        n_samples
    } else {
        guess.max(0.0) as usize
    };
    while index > 0 && (index - 1) as f64 / sample_rate_hz >= t {
        index -= 1;
    }
    while index < n_samples && (index as f64) / sample_rate_hz < t {
        index += 1;
    }
    index
}
/// In-range sample slice per requested channel. Channels the stream lacks are absent.
pub fn stream_data_in_range<'a>(
    stream: &'a AnalogStream,
    channels: &ChannelSet,
    range: TimeRange,
) -> BTreeMap<usize, &'a [f64]> {
    let window = sample_index_range(stream.sample_count(), stream.sample_rate_hz(), range);
    channels
        .iter()
        .filter_map(|ch| {
            stream
                .channel(ch)
                .map(|samples| (ch, &samples[window.clone()]))
        })
        .collect()
}
/// In-range event times per requested channel. Channels without an entry are absent.
pub fn timestamp_data_in_range(
    stream: &TimestampStream,
    channels: &ChannelSet,
    range: TimeRange,
) -> BTreeMap<usize, Vec<f64>> {
    channels
        .iter()
        .filter_map(|ch| {
            stream.channel(ch).map(|events| {
                let in_range = events.iter().copied().filter(|&t| range.contains(t)).collect();
                (ch, in_range)
            })
        })
        .collect()
}
#[cfg(test)]
mod tests {
    use super::*;
    fn ramp_stream() -> AnalogStream {
        let rows = vec![(0..10).map(f64::from).collect(), vec![0.0; 10]];
        AnalogStream::from_rows(2.0, vec![0, 4], rows).unwrap()
    }
    #[test]
    fn stream_slice_is_half_open() {
        let stream = ramp_stream();
        let data = stream_data_in_range(
            &stream,
            &ChannelSet::new([0]),
            TimeRange::new(1.0, 3.0).unwrap(),
        );
        // 2 Hz: samples 2..6 sit at 1.0s, 1.5s, 2.0s, 2.5s
        assert_eq!(data[&0], &[2.0, 3.0, 4.0, 5.0][..]);
    }
    #[test]
    fn unbounded_range_keeps_everything_and_skips_missing_channels() {
        let stream = ramp_stream();
        let data = stream_data_in_range(&stream, &ChannelSet::new([0, 1, 4]), TimeRange::default());
        assert_eq!(data.keys().copied().collect::<Vec<_>>(), vec![0, 4]);
        assert_eq!(data[&0].len(), 10);
    }
    #[test]
    fn range_past_the_end_is_empty_not_an_error() {
        let stream = ramp_stream();
        let data = stream_data_in_range(
            &stream,
            &ChannelSet::new([0]),
            TimeRange::new(100.0, f64::INFINITY).unwrap(),
        );
        assert!(data[&0].is_empty());
        assert_eq!(sample_index_range(10, 2.0, TimeRange::new(2.2, 2.3).unwrap()), 5..5);
    }
    #[test]
    fn window_matches_sample_times_at_inexact_rates() {
        let range = TimeRange::new(0.017, 0.034).unwrap();
        // 0.017 * 25000 rounds to 425.00000000000006; sample 425 still sits at t0
        assert_eq!(sample_index_range(2000, 25_000.0, range), 425..850);
        let range = TimeRange::new(1.9, 2.5).unwrap();
        assert_eq!(sample_index_range(100, 10.0, range), 19..25);
        for rate in [3.0, 7.0, 10.0, 30.0, 1000.0, 20_000.0, 25_000.0] {
            for k in 0..200 {
                let range = TimeRange::new(k as f64 * 0.001, (k + 7) as f64 * 0.001).unwrap();
                let n = 10_000;
                let window = sample_index_range(n, rate, range);
                let expected_start = (0..n)
                    .position(|i| i as f64 / rate >= range.t0)
                    .unwrap_or(n);
                let expected_end = (0..n)
                    .position(|i| i as f64 / rate >= range.t1)
                    .unwrap_or(n);
                assert_eq!(window, expected_start..expected_end, "rate={rate} k={k}");
                assert!(window.clone().all(|i| range.contains(i as f64 / rate)));
            }
        }
    }
    #[test]
    fn timestamps_are_filtered_per_channel() {
        let stream = TimestampStream::new(BTreeMap::from([
            (0, vec![0.5, 1.0, 1.5, 2.0]),
            (1, vec![5.0]),
        ]));
        let range = TimeRange::new(1.0, 2.0).unwrap();
        let data = timestamp_data_in_range(&stream, &ChannelSet::new([0, 1, 2]), range);
        assert_eq!(data[&0], vec![1.0, 1.5]);
        assert!(data[&1].is_empty());
        assert!(!data.contains_key(&2));
    }
}
