use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use crate::analysis::error::AnalysisError;
/// Metadata lines at the top of every capture file, skipped unconditionally.
pub const HEADER_LINES: usize = 8;
/// Default capture rate of the power analyzer (samples per second).
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 1000;
/// A `path:label` command line argument: the capture file plus its display label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSpec {
    pub path: String,
    pub label: String,
}
impl FileSpec {
    pub fn parse(arg: &str) -> Result<Self, AnalysisError> {
        let (path, label) = arg
            .split_once(':')
            .ok_or_else(|| AnalysisError::MissingLabel(arg.to_owned()))?;
        Ok(Self {
            path: path.to_owned(),
            label: label.to_owned(),
        })
    }
    /// Reference captures carry no radio traffic, so burst charge is defined
    /// as zero for them. The marker lives in the file path by convention.
    pub fn is_reference(&self) -> bool {
        self.path.contains("wifi")
    }
}
/// Half-open index range into a trace. Indices are the shared addressing
/// scheme between samples, activation windows and burst windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub stop: usize,
}
impl Window {
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }
    pub fn len(&self) -> usize {
        self.stop.saturating_sub(self.start)
    }
    pub fn is_empty(&self) -> bool {
        self.stop <= self.start
    }
    pub fn contains(&self, other: &Window) -> bool {
        other.start >= self.start && other.stop <= self.stop
    }
}
impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.stop)
    }
}
/// One capture: parallel timestamp/value vectors addressed by sample index.
/// Timestamps are seconds, strictly increasing; values are amperes.
#[derive(Clone, Debug)]
pub struct CurrentTrace {
    pub timestamps: Vec<f64>,
    pub values: Vec<f64>,
}
impl CurrentTrace {
    /// Read a capture file: skip the header, then parse `rawIndex,value[,...]`
    /// rows into parallel vectors with `timestamp = raw_index / sample_rate`.
    pub fn load(path: &str, sample_rate_hz: u32) -> Result<Self, AnalysisError> {
        log::info!("parsing capture {path}");
        let file = File::open(path).map_err(|source| AnalysisError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), sample_rate_hz, path)
    }
    /// Same as [`CurrentTrace::load`] but from any buffered reader; `origin`
    /// names the source in diagnostics.
    pub fn from_reader(
        reader: impl BufRead,
        sample_rate_hz: u32,
        origin: &str,
    ) -> Result<Self, AnalysisError> {
        if sample_rate_hz == 0 {
            return Err(AnalysisError::InvalidSampleRate);
        }
        let mut timestamps = Vec::new();
        let mut values = Vec::new();
        let mut last_index: Option<u64> = None;
        for (line_number, line) in reader.lines().enumerate() {
            let line_number = line_number + 1;
            let line = line.map_err(|source| AnalysisError::Io {
                path: origin.to_owned(),
                source,
            })?;
            if line_number <= HEADER_LINES {
                continue;
            }
            let row = line.trim();
            let malformed = || AnalysisError::MalformedRow {
                path: origin.to_owned(),
                line: line_number,
                row: row.to_owned(),
            };
            // Only the first two comma-separated fields matter; extra fields
            // from the analyzer export are ignored.
            let mut fields = row.split(',');
            let raw_index: u64 = fields
                .next()
                .and_then(|f| f.trim().parse().ok())
                .ok_or_else(malformed)?;
            let value: f64 = fields
                .next()
                .and_then(|f| f.trim().parse().ok())
                .ok_or_else(malformed)?;
            if last_index.is_some_and(|last| raw_index <= last) {
                return Err(AnalysisError::NonMonotonicIndex {
                    path: origin.to_owned(),
                    line: line_number,
                });
            }
            last_index = Some(raw_index);
            timestamps.push(raw_index as f64 / sample_rate_hz as f64);
            values.push(value);
        }
        if timestamps.is_empty() {
            return Err(AnalysisError::EmptyTrace {
                path: origin.to_owned(),
            });
        }
        log::info!(
            "{origin}: {} data points from timestamp {}s to {}s",
            timestamps.len(),
            timestamps[0],
            timestamps[timestamps.len() - 1]
        );
        Ok(Self { timestamps, values })
    }
    /// Synthetic trace with timestamps generated from the sample rate.
    pub fn from_values(values: Vec<f64>, sample_rate_hz: u32) -> Self {
        let timestamps = (0..values.len())
            .map(|i| i as f64 / sample_rate_hz as f64)
            .collect();
        Self { timestamps, values }
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn duration_seconds(&self) -> f64 {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}
