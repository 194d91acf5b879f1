use crate::analysis::trace::{CurrentTrace, Window};
/// Tuning for activation detection. Defaults match the capture rig
/// (1 kHz sampling, milliamp-scale sleep current).
#[derive(Clone, Copy, Debug)]
pub struct ActivationConfig {
    /// Current above which the device counts as active (amperes).
    pub threshold: f64,
    /// Samples kept before the rising crossing to capture the ramp.
    pub lookback: usize,
    /// Samples kept after the falling crossing.
    pub lookahead: usize,
    /// Minimum span between opening index and falling crossing for a real
    /// activation (samples); anything shorter is boundary noise.
    pub min_span: usize,
}
impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            threshold: 0.004,
            lookback: 10,
            lookahead: 10,
            min_span: 100,
        }
    }
}
/// Scan the trace for threshold crossings and emit padded activation windows,
/// in encounter order. Windows are disjoint and strictly increasing.
///
/// An activation still open at the end of the trace is dropped, never
/// auto-closed. Crossing anomalies (a second rising crossing while one is
/// open, a falling crossing with none open) are logged and skipped.
pub fn detect_activations(trace: &CurrentTrace, config: &ActivationConfig) -> Vec<Window> {
    let values = &trace.values;
    let mut windows = Vec::new();
    let mut open_at: Option<usize> = None;
    log::info!(
        "detecting activation intervals with threshold {} A",
        config.threshold
    );
    for i in 1..values.len() {
        let value = values[i];
        let previous = values[i - 1];
        if value > config.threshold && previous < config.threshold {
            if open_at.is_some() {
                log::warn!("rising crossing at index {i} while an activation is open; ignoring");
            } else {
                log::debug!("activation opens at index {i} (value {value} A)");
                open_at = Some(i.saturating_sub(config.lookback));
            }
        }
        if value < config.threshold && previous > config.threshold {
            match open_at.take() {
                None => {
                    log::warn!("falling crossing at index {i} with no open activation");
                }
                Some(start) => {
                    if i - start > config.min_span {
                        let stop = (i + config.lookahead).min(values.len());
                        log::debug!("activation accepted: {start}..{stop}");
                        windows.push(Window::new(start, stop));
                    } else {
                        log::debug!(
                            "span {} ending at index {i} too short, discarding",
                            i - start
                        );
                    }
                }
            }
        }
    }
    if open_at.is_some() {
        log::warn!("activation still open at end of trace; dropping");
    }
    log::info!("found {} activation intervals", windows.len());
    windows
}
#[cfg(test)]
mod tests {
    use super::*;
    fn trace_of(values: Vec<f64>) -> CurrentTrace {
        CurrentTrace::from_values(values, 1000)
    }
    fn pulse(before: usize, active: usize, after: usize) -> Vec<f64> {
        let mut values = vec![0.0; before];
        values.extend(std::iter::repeat(0.006).take(active));
        values.extend(std::iter::repeat(0.0).take(after));
        values
    }
    #[test]
    fn single_pulse_yields_one_padded_window() {
        // Rise at index 30, fall at index 150: raw span 130 > 100.
        let trace = trace_of(pulse(30, 120, 50));
        let windows = detect_activations(&trace, &ActivationConfig::default());
        assert_eq!(windows, vec![Window::new(20, 160)]);
    }
    #[test]
    fn short_episode_is_discarded_as_noise() {
        let trace = trace_of(pulse(30, 50, 30));
        let windows = detect_activations(&trace, &ActivationConfig::default());
        assert!(windows.is_empty());
    }
    #[test]
    fn lone_falling_crossing_yields_nothing() {
        // Trace starts already above the threshold, so the drop at index 5
        // is a falling crossing with no open activation.
        let mut values = vec![0.006; 5];
        values.extend(std::iter::repeat(0.0).take(20));
        let windows = detect_activations(&trace_of(values), &ActivationConfig::default());
        assert!(windows.is_empty());
    }
    #[test]
    fn activation_open_at_end_of_trace_is_dropped() {
        let trace = trace_of(pulse(30, 200, 0));
        let windows = detect_activations(&trace, &ActivationConfig::default());
        assert!(windows.is_empty());
    }
    #[test]
    fn lookback_is_clamped_at_the_start_of_the_trace() {
        // Rise at index 2: the 10-sample look-back would underflow.
        let trace = trace_of(pulse(2, 150, 30));
        let windows = detect_activations(&trace, &ActivationConfig::default());
        assert_eq!(windows, vec![Window::new(0, 162)]);
    }
    #[test]
    fn lookahead_is_clamped_at_the_end_of_the_trace() {
        // Fall at index 150, only 5 samples left after it.
        let trace = trace_of(pulse(30, 120, 5));
        let windows = detect_activations(&trace, &ActivationConfig::default());
        assert_eq!(windows, vec![Window::new(20, 155)]);
    }
    #[test]
    fn multiple_episodes_stay_disjoint_and_ordered() {
        let mut values = pulse(30, 120, 50);
        values.extend(pulse(30, 150, 50));
        let windows = detect_activations(&trace_of(values), &ActivationConfig::default());
        assert_eq!(windows.len(), 2);
        for pair in windows.windows(2) {
            assert!(pair[0].stop <= pair[1].start);
            assert!(pair[0].start < pair[1].start);
        }
    }
}
