use thiserror::Error;
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,
    #[error("file argument `{0}` is missing a `:label` suffix")]
    MissingLabel(String),
    #[error("{path}:{line}: malformed data row `{row}`")]
    MalformedRow {
        path: String,
        line: usize,
        row: String,
    },
    #[error("{path}:{line}: raw sample index went backwards")]
    NonMonotonicIndex { path: String, line: usize },
    #[error("{path}: no data rows after the header")]
    EmptyTrace { path: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("window {start}..{stop} out of bounds for trace of {len} samples")]
    WindowOutOfBounds {
        start: usize,
        stop: usize,
        len: usize,
    },
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for AnalysisError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        AnalysisError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for AnalysisError {
    fn from(value: image::ImageError) -> Self {
        AnalysisError::Plot(value.to_string())
    }
}
