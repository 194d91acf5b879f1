use crate::analysis::error::AnalysisError;
use crate::analysis::trace::{CurrentTrace, Window};
/// Ampere-seconds to milliampere-hours.
pub const AS_TO_MAH: f64 = 1000.0 / 3600.0;
/// Integrate current over the given windows and report milliampere-hours.
/// An empty window set yields exactly zero.
pub fn charge_milliamp_hours(
    trace: &CurrentTrace,
    windows: &[Window],
) -> Result<f64, AnalysisError> {
    Ok(integrate_ampere_seconds(trace, windows)? * AS_TO_MAH)
}
/// Area under the current-vs-time curve summed across windows
/// (ampere-seconds), independent of the gaps between windows.
pub fn integrate_ampere_seconds(
    trace: &CurrentTrace,
    windows: &[Window],
) -> Result<f64, AnalysisError> {
    let mut total = 0.0;
    for window in windows {
        if window.is_empty() || window.stop > trace.len() {
            return Err(AnalysisError::WindowOutOfBounds {
                start: window.start,
                stop: window.stop,
                len: trace.len(),
            });
        }
        let x = &trace.timestamps[window.start..window.stop];
        let y = &trace.values[window.start..window.stop];
        let area = simpson(x, y);
        log::debug!(
            "window {window}: {:.3}s of activity, {area:.6} A*s",
            x[x.len() - 1] - x[0]
        );
        total += area;
    }
    Ok(total)
}
/// Composite Simpson rule over possibly non-uniform spacing. A trailing odd
/// interval falls back to the trapezoid rule.
fn simpson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 {
        return 0.0;
    }
    let mut area = 0.0;
    let mut i = 0;
    while i + 2 < n {
        let h0 = x[i + 1] - x[i];
        let h1 = x[i + 2] - x[i + 1];
        area += (h0 + h1) / 6.0
            * ((2.0 - h1 / h0) * y[i]
                + (h0 + h1).powi(2) / (h0 * h1) * y[i + 1]
                + (2.0 - h0 / h1) * y[i + 2]);
        i += 2;
    }
    if i + 1 < n {
        area += (x[i + 1] - x[i]) * (y[i] + y[i + 1]) / 2.0;
    }
    area
}
