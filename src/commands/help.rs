/// Usage text for the binary
pub fn usage() -> String {
    [
        "📖 tickplot - charts for matching-engine benchmark logs",
        "",
        "Commands:",
        "  latency | latencies | lat          Histogram of latencies.txt -> latencies_hist.png",
        "  price | ticks | price_movement     Price line with limit orders -> price_movement.png",
        "        [--policy explicit|price-relative]",
        "  help                               Show this help message",
        "",
        "Input formats:",
        "  latencies.txt        one integer (ns) per line",
        "  price_movement.txt   <base_price> [<limit_price> [<order_type: 0=buy, 1=sell>]]",
        "",
        "Environment (or .env):",
        "  LATENCY_INPUT, LATENCY_OUTPUT, PRICE_INPUT, PRICE_OUTPUT",
        "  LATENCY_SAMPLE_LIMIT   samples kept for the histogram (default 3000000, 'none' keeps all)",
        "  RUST_LOG               log filter",
    ]
    .join("\n")
}

pub fn execute() {
    println!("{}", usage());
}
