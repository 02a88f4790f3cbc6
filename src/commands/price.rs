use tracing::{info, warn};

use crate::config::{AnalysisConfig, PRICE_FIGURE};
use crate::services::chart_service;
use crate::services::classify_service::ClassificationPolicy;
use crate::services::parse_service;
use crate::utils::AnalysisError;

/// Parse `[--policy <name>]`
fn parse_args(args: &[String]) -> Result<Option<ClassificationPolicy>, AnalysisError> {
    match args {
        [] => Ok(None),
        [flag, name] if flag == "--policy" => name
            .parse::<ClassificationPolicy>()
            .map(Some)
            .map_err(AnalysisError::Usage),
        _ => Err(AnalysisError::Usage(
            "❌ Usage: price [--policy explicit|price-relative]".to_string(),
        )),
    }
}

pub fn execute(config: &AnalysisConfig, args: &[String]) -> Result<(), AnalysisError> {
    let forced_policy = parse_args(args)?;

    info!("Reading ticks from {}...", config.price_input);
    let records = {
        let reader = parse_service::open_input(&config.price_input)?;
        parse_service::parse_ticks(reader)?
    };
    let orders = records.iter().filter(|r| r.limit_order.is_some()).count();
    info!("Read {} ticks ({} with limit orders).", records.len(), orders);

    let policy = match forced_policy {
        Some(policy) => policy,
        None => ClassificationPolicy::detect(&records),
    };
    info!("Classifying limit orders with the {} policy", policy);

    let series = policy.classify(&records)?;
    info!(
        "{}: {}, {}: {}",
        series.first.label,
        series.first.len(),
        series.second.label,
        series.second.len()
    );
    if records.is_empty() {
        warn!("No ticks in {}, the chart will be empty", config.price_input);
    }

    info!("Plotting price movement...");
    chart_service::render_price_movement(&records, &series, PRICE_FIGURE, &config.price_output)?;

    info!("Price movement saved as {}", config.price_output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "tickplot_price_{}_{}",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default(),
            name
        ))
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(&[]).unwrap(), None);
        assert_eq!(
            parse_args(&args(&["--policy", "legacy"])).unwrap(),
            Some(ClassificationPolicy::PriceRelative)
        );
        assert!(matches!(parse_args(&args(&["--policy"])), Err(AnalysisError::Usage(_))));
        assert!(matches!(
            parse_args(&args(&["--policy", "random"])),
            Err(AnalysisError::Usage(_))
        ));
    }

    #[test]
    fn test_forced_explicit_policy_on_legacy_file_fails_before_render() {
        let input = temp_path("legacy.txt");
        let output = temp_path("legacy.png");
        std::fs::write(&input, "10.0 10.5\n10.2\n").unwrap();

        let config = AnalysisConfig {
            price_input: input.to_string_lossy().into_owned(),
            price_output: output.to_string_lossy().into_owned(),
            ..AnalysisConfig::default()
        };
        let result = execute(&config, &args(&["--policy", "explicit"]));
        assert!(matches!(result, Err(AnalysisError::MissingOrderSide { tick_index: 0 })));
        assert!(!output.exists());
        let _ = std::fs::remove_file(&input);
    }

    #[test]
    fn test_price_chart_replaces_previous_image() {
        let dir = temp_path("ok");
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("price_movement.txt");
        let output = dir.join("price_movement.png");
        std::fs::write(&input, "10.0 10.5 0\n10.2\n10.3 10.1 1\n").unwrap();
        std::fs::write(&output, b"stale").unwrap();

        let config = AnalysisConfig {
            price_input: input.to_string_lossy().into_owned(),
            price_output: output.to_string_lossy().into_owned(),
            ..AnalysisConfig::default()
        };
        let result = execute(&config, &[]);
        assert!(result.is_ok(), "{:?}", result);

        let image = std::fs::read(&output).unwrap();
        assert!(image.starts_with(b"\x89PNG"));

        // Only the input and the final image remain, no temporary sibling
        let mut entries: Vec<String> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        entries.sort();
        assert_eq!(entries, vec!["price_movement.png", "price_movement.txt"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_tick_writes_no_image() {
        let input = temp_path("bad.txt");
        let output = temp_path("bad.png");
        std::fs::write(&input, "10.0 10.5 0\n10.2 10.1 1 7\n").unwrap();

        let config = AnalysisConfig {
            price_input: input.to_string_lossy().into_owned(),
            price_output: output.to_string_lossy().into_owned(),
            ..AnalysisConfig::default()
        };
        let result = execute(&config, &[]);
        assert!(matches!(result, Err(AnalysisError::MalformedLine { line: 2, .. })));
        assert!(!output.exists());
        let _ = std::fs::remove_file(&input);
    }
}
