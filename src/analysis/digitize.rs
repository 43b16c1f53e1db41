/// Three-level state of a sample relative to a low/high threshold pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Low,
    Mid,
    High,
}
/// Maps each value to `Low` (below `low`), `High` (above `high`) or `Mid`.
pub fn digitize(values: &[f64], low: f64, high: f64) -> Vec<Level> {
    values
        .iter()
        .map(|&v| {
            if v < low {
                Level::Low
            } else if v > high {
                Level::High
            } else {
                Level::Mid
            }
        })
        .collect()
}
/// Indices `i` where `states[i] != states[i - 1]`, i.e. the start of every run after the first.
pub fn split_where<T: PartialEq>(states: &[T]) -> Vec<usize> {
    states
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0] != pair[1])
        .map(|(i, _)| i + 1)
        .collect()
}
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    #[test]
    fn digitize_uses_strict_thresholds() {
        let levels = digitize(&[-2.0, -1.0, 0.0, 1.0, 2.0], -1.0, 1.0);
        assert_eq!(
            levels,
            vec![Level::Low, Level::Mid, Level::Mid, Level::Mid, Level::High]
        );
        assert!(digitize(&[], 0.0, 0.0).is_empty());
    }
    #[test]
    fn split_where_marks_run_starts() {
        assert_eq!(split_where(&[1, 1, 2, 2, 2, 1]), vec![2, 5]);
        assert_eq!(split_where::<u8>(&[]), Vec::<usize>::new());
        assert_eq!(split_where(&[Level::High]), Vec::<usize>::new());
        assert_eq!(split_where(&[1, 0, 1, 2, 0]), vec![1, 2, 3, 4]);
    }
    fn non_mid(levels: &[Level]) -> usize {
        levels.iter().filter(|l| **l != Level::Mid).count()
    }
    proptest! {
        #[test]
        fn prop_short_inputs_have_no_boundaries(states in prop::collection::vec(0u8..3, 0..=1)) {
            prop_assert!(split_where(&states).is_empty());
        }
        #[test]
        fn prop_alternating_inputs_split_everywhere(raw in prop::collection::vec(0u8..4, 0..200)) {
            let mut states = raw;
            states.dedup();
            prop_assert_eq!(split_where(&states).len(), states.len().saturating_sub(1));
        }
        #[test]
        fn prop_constant_inputs_never_split(value in any::<i32>(), len in 0usize..200) {
            prop_assert!(split_where(&vec![value; len]).is_empty());
        }
        #[test]
        fn prop_boundaries_are_sorted_and_in_bounds(states in prop::collection::vec(0u8..3, 0..200)) {
            let idx = split_where(&states);
            prop_assert!(idx.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(idx.iter().all(|&i| i >= 1 && i < states.len()));
        }
        #[test]
        fn prop_widening_thresholds_never_adds_events(
            values in prop::collection::vec(-100.0f64..100.0, 0..200),
            low in -50.0f64..0.0,
            high in 0.0f64..50.0,
            widen_low in 0.0f64..50.0,
            widen_high in 0.0f64..50.0,
        ) {
            let narrow = digitize(&values, low, high);
            let wide = digitize(&values, low - widen_low, high + widen_high);
            prop_assert_eq!(narrow.len(), values.len());
            prop_assert!(non_mid(&wide) <= non_mid(&narrow));
        }
    }
}
