use tracing::{debug, info};

use crate::config::{AnalysisConfig, HISTOGRAM_BINS, HISTOGRAM_FIGURE};
use crate::services::{chart_service, parse_service, stats_service};
use crate::utils::AnalysisError;

pub fn execute(config: &AnalysisConfig, args: &[String]) -> Result<(), AnalysisError> {
    if let Some(arg) = args.first() {
        return Err(AnalysisError::Usage(format!(
            "❌ Unexpected argument for latency: '{}'",
            arg
        )));
    }

    info!("Reading latencies from {}...", config.latency_input);
    let samples = {
        let reader = parse_service::open_input(&config.latency_input)?;
        parse_service::parse_latencies(reader)?
    };
    info!("Read {} latency measurements.", samples.len());

    if let Some(summary) = stats_service::summarize(&samples) {
        info!(
            "Average {:.2} ns, P50 {} ns, P99 {} ns, max {} ns",
            summary.mean, summary.p50, summary.p99, summary.max
        );
        println!("{}", stats_service::summary_table(&summary));
    }

    let total = samples.len();
    let samples = parse_service::truncate_samples(samples, config.sample_limit);
    if samples.len() < total {
        info!("Keeping the first {} of {} samples for plotting", samples.len(), total);
    }

    info!("Plotting latency distribution...");
    debug!("{} bins, {:?}", HISTOGRAM_BINS, HISTOGRAM_FIGURE);
    chart_service::render_latency_histogram(
        &samples,
        HISTOGRAM_BINS,
        HISTOGRAM_FIGURE,
        &config.latency_output,
    )?;

    info!("Latency distribution saved as {}", config.latency_output);
    Ok(())
}
