//! Current-draw waveform analysis for embedded device power captures.
//!
//! A capture is a comma-delimited export from a power analyzer: eight
//! metadata lines, then `rawIndex,value` rows sampled at a fixed rate.
//! An [`analysis::AnalysisSession`] loads one capture, locates the device's
//! activation intervals and the radio transmit bursts nested inside them,
//! and integrates current over time to electric charge (mA·h) for the
//! reporting and plotting layer.
pub mod analysis;
