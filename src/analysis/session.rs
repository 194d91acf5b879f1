use once_cell::unsync::OnceCell;
use serde::Serialize;
use crate::analysis::activation::{detect_activations, ActivationConfig};
use crate::analysis::burst::{detect_bursts, BurstConfig};
use crate::analysis::charge::charge_milliamp_hours;
use crate::analysis::error::AnalysisError;
use crate::analysis::trace::{CurrentTrace, FileSpec, Window, DEFAULT_SAMPLE_RATE_HZ};
/// All tuning for one analysis run.
#[derive(Clone, Copy, Debug)]
pub struct AnalysisConfig {
    pub sample_rate_hz: u32,
    pub activation: ActivationConfig,
    pub burst: BurstConfig,
}
impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            activation: ActivationConfig::default(),
            burst: BurstConfig::default(),
        }
    }
}
/// Write-once result cache: each field is filled on first request and the
/// same value is handed out on every later request.
#[derive(Default)]
struct ResultCache {
    activations: OnceCell<Vec<Window>>,
    bursts: OnceCell<Vec<Window>>,
    activation_charge: OnceCell<f64>,
    burst_charge: OnceCell<f64>,
}
/// One capture analyzed end to end. The session owns its trace; activation
/// windows, burst windows and charges are derived lazily and never
/// recomputed.
pub struct AnalysisSession {
    spec: FileSpec,
    config: AnalysisConfig,
    trace: CurrentTrace,
    cache: ResultCache,
}
impl AnalysisSession {
    /// Load the capture named by `spec` and wrap it in a fresh session.
    pub fn open(spec: FileSpec, config: AnalysisConfig) -> Result<Self, AnalysisError> {
        let trace = CurrentTrace::load(&spec.path, config.sample_rate_hz)?;
        Ok(Self::from_trace(spec, config, trace))
    }
    /// Session over an already-loaded trace.
    pub fn from_trace(spec: FileSpec, config: AnalysisConfig, trace: CurrentTrace) -> Self {
        Self {
            spec,
            config,
            trace,
            cache: ResultCache::default(),
        }
    }
    pub fn spec(&self) -> &FileSpec {
        &self.spec
    }
    pub fn trace(&self) -> &CurrentTrace {
        &self.trace
    }
    pub fn activations(&self) -> &[Window] {
        self.cache
            .activations
            .get_or_init(|| detect_activations(&self.trace, &self.config.activation))
    }
    pub fn bursts(&self) -> &[Window] {
        self.cache
            .bursts
            .get_or_init(|| detect_bursts(&self.trace, self.activations(), &self.config.burst))
    }
    /// Charge of the most recent activation episode (mA·h).
    ///
    /// Only the last window feeds the summary metric; earlier episodes are
    /// warm-up runs on the capture rig. Intentional, do not sum all windows.
    pub fn activation_charge(&self) -> Result<f64, AnalysisError> {
        self.cache
            .activation_charge
            .get_or_try_init(|| match self.activations().last().copied() {
                None => Ok(0.0),
                Some(last) => charge_milliamp_hours(&self.trace, &[last]),
            })
            .copied()
    }
    /// Charge of the most recent transmit burst (mA·h). Defined as zero for
    /// reference captures, which carry no radio traffic.
    pub fn burst_charge(&self) -> Result<f64, AnalysisError> {
        self.cache
            .burst_charge
            .get_or_try_init(|| {
                if self.spec.is_reference() {
                    return Ok(0.0);
                }
                match self.bursts().last().copied() {
                    None => Ok(0.0),
                    Some(last) => charge_milliamp_hours(&self.trace, &[last]),
                }
            })
            .copied()
    }
    /// Legend text for the comparison plot: the display label plus the
    /// summary charge rounded to four decimals.
    pub fn legend_label(&self) -> Result<String, AnalysisError> {
        Ok(format!(
            "{}\nElectric charge: {:.4}mAh",
            self.spec.label,
            self.activation_charge()?
        ))
    }
    /// Values of the last activation window scaled to milliamps, ready to be
    /// rendered as a waveform. `None` when no activation was found.
    pub fn last_activation_milliamps(&self) -> Option<Vec<f64>> {
        let window = self.activations().last().copied()?;
        Some(
            self.trace.values[window.start..window.stop]
                .iter()
                .map(|v| v * 1000.0)
                .collect(),
        )
    }
    pub fn summary(&self) -> Result<SessionSummary, AnalysisError> {
        Ok(SessionSummary {
            path: self.spec.path.clone(),
            label: self.spec.label.clone(),
            samples: self.trace.len(),
            duration_seconds: self.trace.duration_seconds(),
            activation_count: self.activations().len(),
            burst_count: self.bursts().len(),
            activation_charge_mah: self.activation_charge()?,
            burst_charge_mah: self.burst_charge()?,
        })
    }
}
/// Flat, serializable view of a finished session.
#[derive(Clone, Debug, Serialize)]
pub struct SessionSummary {
    pub path: String,
    pub label: String,
    pub samples: usize,
    pub duration_seconds: f64,
    pub activation_count: usize,
    pub burst_count: usize,
    pub activation_charge_mah: f64,
    pub burst_charge_mah: f64,
}
