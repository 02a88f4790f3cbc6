use crate::models::LatencySummary;
use crate::utils::Table;

/// Summary statistics in the same form the benchmark prints them
///
/// Percentile Pq is the sorted sample at index `floor(q * (n - 1))`.
/// Returns `None` for an empty input.
pub fn summarize(samples: &[u64]) -> Option<LatencySummary> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_unstable();

    let percentile = |q: f64| sorted[(q * (sorted.len() - 1) as f64) as usize];
    let total: f64 = sorted.iter().map(|&v| v as f64).sum();

    Some(LatencySummary {
        count: sorted.len(),
        mean: total / sorted.len() as f64,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        p50: percentile(0.50),
        p90: percentile(0.90),
        p99: percentile(0.99),
        p999: percentile(0.999),
    })
}

pub fn summary_table(summary: &LatencySummary) -> String {
    let mut table = Table::new(&["Metric", "Latency"]);
    table.add_row(vec!["Samples".to_string(), summary.count.to_string()]);
    table.add_row(vec!["Average".to_string(), format!("{:.2} ns", summary.mean)]);
    for (name, value) in [
        ("Min", summary.min),
        ("Max", summary.max),
        ("P50", summary.p50),
        ("P90", summary.p90),
        ("P99", summary.p99),
        ("P99.9", summary.p999),
    ] {
        table.add_row(vec![name.to_string(), format!("{} ns", value)]);
    }
    table.render()
}
