use crate::analysis::trace::{CurrentTrace, Window};
/// Tuning for transmit-burst detection inside activation windows.
#[derive(Clone, Copy, Debug)]
pub struct BurstConfig {
    /// Jump (amperes) against any of the recent samples that marks a
    /// transmit edge.
    pub delta: f64,
    /// How many preceding samples each index is compared against.
    pub horizon: usize,
    /// Samples kept before the detected rising edge.
    pub lookback: usize,
    /// Minimum span between opening index and falling edge for a real
    /// burst (samples).
    pub min_span: usize,
}
impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            delta: 0.07,
            horizon: 4,
            lookback: 3,
            min_span: 5,
        }
    }
}
/// Scan each activation window for short-horizon current jumps and emit the
/// burst windows nested inside it. A burst still open at the end of its
/// activation window is dropped.
pub fn detect_bursts(
    trace: &CurrentTrace,
    activations: &[Window],
    config: &BurstConfig,
) -> Vec<Window> {
    let values = &trace.values;
    let mut bursts = Vec::new();
    log::info!("detecting transmit bursts with delta {} A", config.delta);
    for window in activations {
        log::debug!("scanning activation {window}");
        let mut open_at: Option<usize> = None;
        for i in window.start..window.stop.min(values.len()) {
            if i < config.horizon {
                // Not enough history this close to the start of the trace.
                log::debug!("skipping index {i}: fewer than {} preceding samples", config.horizon);
                continue;
            }
            let value = values[i];
            let recent = &values[i - config.horizon..i];
            let rising = recent.iter().any(|&p| value - p > config.delta);
            let falling = recent.iter().any(|&p| p - value > config.delta);
            if open_at.is_none() && rising {
                log::debug!("burst opens at index {i} (value {value} A)");
                open_at = Some(i.saturating_sub(config.lookback).max(window.start));
            } else if rising {
                log::debug!("rising delta at index {i} while a burst is open");
            }
            if let Some(start) = open_at {
                if falling {
                    if i - start > config.min_span {
                        log::debug!("burst accepted: {start}..{}", i + 1);
                        bursts.push(Window::new(start, i + 1));
                    } else {
                        log::debug!("burst span {} ending at index {i} too short, discarding", i - start);
                    }
                    open_at = None;
                }
            } else if falling {
                log::debug!("falling delta at index {i} with no open burst");
            }
        }
        if open_at.is_some() {
            log::warn!("burst still open at end of activation {window}; dropping");
        }
    }
    log::info!("found {} transmit bursts", bursts.len());
    bursts
}
#[cfg(test)]
mod tests {
    use super::*;
    fn trace_with_plateau(len: usize, plateau: std::ops::Range<usize>) -> CurrentTrace {
        let mut values = vec![0.006; len];
        for v in &mut values[plateau] {
            *v = 0.2;
        }
        CurrentTrace::from_values(values, 1000)
    }
    #[test]
    fn plateau_inside_activation_becomes_a_burst() {
        let trace = trace_with_plateau(200, 100..110);
        let activation = Window::new(0, 200);
        let bursts = detect_bursts(&trace, &[activation], &BurstConfig::default());
        // Edge detected at 100, padded back 3; falling edge at 110 closes at 111.
        assert_eq!(bursts, vec![Window::new(97, 111)]);
        assert!(activation.contains(&bursts[0]));
    }
    #[test]
    fn burst_is_confined_to_its_activation_window() {
        let trace = trace_with_plateau(200, 100..110);
        let bursts = detect_bursts(&trace, &[Window::new(99, 120)], &BurstConfig::default());
        assert_eq!(bursts, vec![Window::new(99, 111)]);
    }
    #[test]
    fn too_short_spike_is_discarded() {
        // Edge at 100 opens at 97; falling edge at 102 gives span 5, not > 5.
        let trace = trace_with_plateau(200, 100..102);
        let bursts = detect_bursts(&trace, &[Window::new(0, 200)], &BurstConfig::default());
        assert!(bursts.is_empty());
    }
    #[test]
    fn burst_open_at_end_of_activation_is_dropped() {
        let trace = trace_with_plateau(200, 100..200);
        let bursts = detect_bursts(&trace, &[Window::new(0, 150)], &BurstConfig::default());
        assert!(bursts.is_empty());
    }
    #[test]
    fn indices_without_history_are_skipped() {
        // The activation starts at index 0; the first horizon samples cannot
        // be compared and must not panic or open a burst.
        let trace = CurrentTrace::from_values(vec![0.2; 20], 1000);
        let bursts = detect_bursts(&trace, &[Window::new(0, 20)], &BurstConfig::default());
        assert!(bursts.is_empty());
    }
    #[test]
    fn no_bursts_without_activations() {
        let trace = trace_with_plateau(200, 100..110);
        let bursts = detect_bursts(&trace, &[], &BurstConfig::default());
        assert!(bursts.is_empty());
    }
}
