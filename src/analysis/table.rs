use ndarray::{Array1, Array2, ArrayView1, Axis};
use crate::error::StatsError;
/// Files x channels table for one statistic, rows in file-list order.
#[derive(Clone, Debug, PartialEq)]
pub enum StatisticTable {
    /// One value per file (whole-recording statistics).
    Totals(Array1<f64>),
    /// One row per file, one column per channel.
    PerChannel(Array2<f64>),
}
impl StatisticTable {
    pub fn n_files(&self) -> usize {
        match self {
            StatisticTable::Totals(values) => values.len(),
            StatisticTable::PerChannel(table) => table.nrows(),
        }
    }
    /// One value per file; per-channel rows are summed.
    pub fn totals(&self) -> Array1<f64> {
        match self {
            StatisticTable::Totals(values) => values.clone(),
            StatisticTable::PerChannel(table) => table.sum_axis(Axis(1)),
        }
    }
}
/// Append-only collector for one statistic, finalized once every file has been processed.
#[derive(Clone, Debug)]
pub enum StatisticSeries {
    Totals(Vec<f64>),
    PerChannel(Vec<Array1<f64>>),
}
impl StatisticSeries {
    pub fn totals() -> Self {
        StatisticSeries::Totals(Vec::new())
    }
    pub fn per_channel() -> Self {
        StatisticSeries::PerChannel(Vec::new())
    }
    pub fn len(&self) -> usize {
        match self {
            StatisticSeries::Totals(values) => values.len(),
            StatisticSeries::PerChannel(rows) => rows.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn push_total(&mut self, value: f64) -> Result<(), StatsError> {
        match self {
            StatisticSeries::Totals(values) => {
                values.push(value);
                Ok(())
            }
            StatisticSeries::PerChannel(_) => Err(StatsError::ShapeMismatch {
                expected: 0,
                actual: 1,
            }),
        }
    }
    pub fn push_row(&mut self, row: Array1<f64>) -> Result<(), StatsError> {
        match self {
            StatisticSeries::PerChannel(rows) => {
                rows.push(row);
                Ok(())
            }
            StatisticSeries::Totals(_) => Err(StatsError::ShapeMismatch {
                expected: 1,
                actual: row.len(),
            }),
        }
    }
    pub fn finish(self) -> Result<StatisticTable, StatsError> {
        match self {
            StatisticSeries::Totals(values) => Ok(StatisticTable::Totals(Array1::from(values))),
            StatisticSeries::PerChannel(rows) => Ok(StatisticTable::PerChannel(aggregate(&rows)?)),
        }
    }
}
/// Stacks per-file vectors row-wise. All rows must have the same length.
pub fn aggregate(rows: &[Array1<f64>]) -> Result<Array2<f64>, StatsError> {
    let Some(first) = rows.first() else {
        return Ok(Array2::zeros((0, 0)));
    };
    let n_channels = first.len();
    if let Some(bad) = rows.iter().find(|row| row.len() != n_channels) {
        return Err(StatsError::ShapeMismatch {
            expected: n_channels,
            actual: bad.len(),
        });
    }
    let views: Vec<ArrayView1<'_, f64>> = rows.iter().map(|row| row.view()).collect();
    ndarray::stack(Axis(0), &views).map_err(|_| StatsError::ShapeMismatch {
        expected: n_channels,
        actual: rows.len(),
    })
}
/// Divides each file's values by `divisor[file]`, broadcasting across channels.
///
/// A zero divisor produces inf/NaN at that position; callers treat those as undefined rates.
pub fn normalize(table: &StatisticTable, divisor: &Array1<f64>) -> Result<StatisticTable, StatsError> {
    if divisor.len() != table.n_files() {
        return Err(StatsError::ShapeMismatch {
            expected: table.n_files(),
            actual: divisor.len(),
        });
    }
    Ok(match table {
        StatisticTable::Totals(values) => StatisticTable::Totals(values / divisor),
        StatisticTable::PerChannel(values) => {
            let column = divisor.view().insert_axis(Axis(1));
            StatisticTable::PerChannel(values / &column)
        }
    })
}
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    #[test]
    fn aggregate_stacks_in_order() {
        let rows = vec![
            array![1.0, 2.0, 3.0, 4.0],
            array![5.0, 6.0, 7.0, 8.0],
            array![9.0, 10.0, 11.0, 12.0],
        ];
        let table = aggregate(&rows).unwrap();
        assert_eq!(table.dim(), (3, 4));
        assert_eq!(table.row(1).to_vec(), vec![5.0, 6.0, 7.0, 8.0]);
    }
    #[test]
    fn aggregate_rejects_ragged_rows() {
        let rows = vec![array![1.0, 2.0, 3.0, 4.0], array![1.0, 2.0, 3.0]];
        assert!(matches!(
            aggregate(&rows),
            Err(StatsError::ShapeMismatch { expected: 4, actual: 3 })
        ));
    }
    #[test]
    fn aggregate_of_nothing_is_empty() {
        assert_eq!(aggregate(&[]).unwrap().dim(), (0, 0));
    }
    #[test]
    fn normalize_broadcasts_per_file() {
        let table = StatisticTable::PerChannel(array![[10.0, 20.0], [5.0, 5.0]]);
        let normalized = normalize(&table, &array![10.0, 5.0]).unwrap();
        assert_eq!(
            normalized,
            StatisticTable::PerChannel(array![[1.0, 2.0], [1.0, 1.0]])
        );
        let totals = StatisticTable::Totals(array![10.0, 20.0]);
        assert_eq!(
            normalize(&totals, &array![10.0, 5.0]).unwrap(),
            StatisticTable::Totals(array![1.0, 4.0])
        );
    }
    #[test]
    fn zero_divisor_is_not_an_error() {
        let table = StatisticTable::PerChannel(array![[10.0, 0.0], [5.0, 5.0]]);
        let StatisticTable::PerChannel(values) = normalize(&table, &array![0.0, 5.0]).unwrap()
        else {
            panic!("normalizing a per-channel table must keep its shape");
        };
        assert!(values[[0, 0]].is_infinite());
        assert!(values[[0, 1]].is_nan());
        assert_eq!(values[[1, 0]], 1.0);
    }
    #[test]
    fn normalize_checks_divisor_length() {
        let table = StatisticTable::Totals(array![1.0, 2.0, 3.0]);
        assert!(normalize(&table, &array![1.0]).is_err());
    }
    #[test]
    fn series_finish_into_tables() {
        let mut series = StatisticSeries::per_channel();
        series.push_row(array![0.0, 10.0]).unwrap();
        series.push_row(array![0.0, 10.0]).unwrap();
        assert!(series.push_total(1.0).is_err());
        let table = series.finish().unwrap();
        assert_eq!(table, StatisticTable::PerChannel(array![[0.0, 10.0], [0.0, 10.0]]));
        assert_eq!(table.totals().to_vec(), vec![10.0, 10.0]);
        let mut counts = StatisticSeries::totals();
        counts.push_total(100.0).unwrap();
        assert_eq!(counts.finish().unwrap(), StatisticTable::Totals(array![100.0]));
    }
}
