use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod models;
mod services;
mod utils;

use config::AnalysisConfig;

fn main() {
    dotenv::dotenv().ok();

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "tickplot=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📈 Starting tickplot v{}", env!("CARGO_PKG_VERSION"));

    let config = match AnalysisConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(commands::EXIT_FAILURE);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(commands::handle_command(&args, &config));
}
