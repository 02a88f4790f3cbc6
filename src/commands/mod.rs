pub mod help;
pub mod latency;
pub mod price;

use tracing::error;

use crate::config::AnalysisConfig;
use crate::utils::{extract_clean_error, AnalysisError};

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// Dispatch one command line and return the process exit code
pub fn handle_command(args: &[String], config: &AnalysisConfig) -> i32 {
    let Some(command) = args.first() else {
        help::execute();
        return EXIT_USAGE;
    };
    let rest = &args[1..];

    let result = match command.as_str() {
        "latency" | "latencies" | "lat" => latency::execute(config, rest),
        "price" | "ticks" | "price_movement" => price::execute(config, rest),
        "help" | "--help" | "-h" => {
            help::execute();
            return EXIT_OK;
        }
        other => Err(AnalysisError::Usage(format!("❌ Unknown command: '{}'", other))),
    };

    match result {
        Ok(()) => EXIT_OK,
        Err(AnalysisError::Usage(message)) => {
            error!("{}", message);
            help::execute();
            EXIT_USAGE
        }
        Err(e) => {
            error!(
                "❌ Error executing command {}: {}",
                command,
                extract_clean_error(&e.to_string())
            );
            EXIT_FAILURE
        }
    }
}
