pub mod activation;
pub mod burst;
pub mod charge;
pub mod error;
pub mod plot;
pub mod session;
pub mod trace;
pub use activation::{detect_activations, ActivationConfig};
pub use burst::{detect_bursts, BurstConfig};
pub use charge::{charge_milliamp_hours, integrate_ampere_seconds};
pub use error::AnalysisError;
pub use plot::{render_comparison_png, PlotStyle};
pub use session::{AnalysisConfig, AnalysisSession, SessionSummary};
pub use trace::{CurrentTrace, FileSpec, Window, DEFAULT_SAMPLE_RATE_HZ, HEADER_LINES};
