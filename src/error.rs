use thiserror::Error;
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("unknown statistic '{0}' (available: sample_count, spike_count, bit_count, mean, std)")]
    UnknownStatistic(String),
    #[error("no statistics selected")]
    NoStatistics,
    #[error("aggregation mode '{0}' is not implemented")]
    UnsupportedMode(String),
    #[error("invalid channel id '{0}'")]
    InvalidChannel(String),
    #[error("invalid time range: t0={t0}, t1={t1}")]
    InvalidTimeRange { t0: f64, t1: f64 },
    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,
    #[error("recording has no {kind} stream at index {index}")]
    MissingStream { kind: &'static str, index: usize },
    #[error("shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for StatsError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        StatsError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for StatsError {
    fn from(value: image::ImageError) -> Self {
        StatsError::Plot(value.to_string())
    }
}
