use std::fs;
use std::process;
use anyhow::{Context, Result};
use clap::Parser;
use powertrace::analysis::{
    render_comparison_png, AnalysisConfig, AnalysisSession, FileSpec, PlotStyle, SessionSummary,
};
#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Analyze current-draw captures: activation intervals, transmit bursts, electric charge.")]
struct Cli {
    /// Capture files as `path:label`, e.g. `measurements/lora/sf7.csv:LoRa SF7`.
    #[arg(required = true)]
    files: Vec<String>,
    /// Capture sample rate in samples per second.
    #[arg(long, default_value_t = 1000)]
    rate: u32,
    /// Activation threshold in amperes.
    #[arg(long)]
    threshold: Option<f64>,
    /// Transmit-burst delta in amperes.
    #[arg(long)]
    delta: Option<f64>,
    /// Where to write the comparison plot.
    #[arg(long, default_value = "activations.png")]
    out: String,
    /// Skip rendering the comparison plot.
    #[arg(long)]
    no_plot: bool,
    /// Print session summaries as JSON instead of plain text.
    #[arg(long)]
    json: bool,
}
fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("Error: {e:#}");
        process::exit(1);
    }
}
fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AnalysisConfig::default();
    config.sample_rate_hz = cli.rate;
    if let Some(threshold) = cli.threshold {
        config.activation.threshold = threshold;
    }
    if let Some(delta) = cli.delta {
        config.burst.delta = delta;
    }
    let mut series = Vec::new();
    let mut summaries = Vec::new();
    let mut failures = 0usize;
    // Each capture is an independent session; one bad file must not stop
    // the others.
    for arg in &cli.files {
        if let Err(e) = analyze_capture(arg, config, &mut series, &mut summaries) {
            log::error!("{arg}: {e:#}");
            failures += 1;
        }
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for summary in &summaries {
            println!(
                "{}: {} activations, {} bursts, {:.4}mAh",
                summary.label,
                summary.activation_count,
                summary.burst_count,
                summary.activation_charge_mah
            );
        }
    }
    if !cli.no_plot && !series.is_empty() {
        let png = render_comparison_png(&series, PlotStyle::default())?;
        fs::write(&cli.out, png).with_context(|| format!("failed to write {}", cli.out))?;
        log::info!("wrote comparison plot to {}", cli.out);
    }
    if failures > 0 {
        anyhow::bail!("{failures} of {} captures failed", cli.files.len());
    }
    Ok(())
}
fn analyze_capture(
    arg: &str,
    config: AnalysisConfig,
    series: &mut Vec<(String, Vec<f64>)>,
    summaries: &mut Vec<SessionSummary>,
) -> Result<()> {
    let spec = FileSpec::parse(arg)?;
    let session = AnalysisSession::open(spec, config)
        .with_context(|| format!("failed to analyze {arg}"))?;
    summaries.push(session.summary()?);
    match session.last_activation_milliamps() {
        Some(values) => series.push((session.legend_label()?, values)),
        None => log::warn!("{}: no activation found, nothing to plot", session.spec().path),
    }
    Ok(())
}
