use crate::models::Figure;
use crate::utils::AnalysisError;

pub const DEFAULT_LATENCY_INPUT: &str = "latencies.txt";
pub const DEFAULT_LATENCY_OUTPUT: &str = "latencies_hist.png";
pub const DEFAULT_PRICE_INPUT: &str = "price_movement.txt";
pub const DEFAULT_PRICE_OUTPUT: &str = "price_movement.png";

/// Samples kept before rendering the histogram
pub const DEFAULT_SAMPLE_LIMIT: usize = 3_000_000;

pub const HISTOGRAM_BINS: usize = 50;
pub const OUTPUT_DPI: u32 = 300;
pub const HISTOGRAM_FIGURE: Figure = Figure::new(10.0, 5.0, OUTPUT_DPI);
pub const PRICE_FIGURE: Figure = Figure::new(12.0, 6.0, OUTPUT_DPI);

/// File locations and the truncation cutoff
///
/// Everything here has a fixed default; the environment (or a `.env` file)
/// may relocate the files or change the cutoff.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub latency_input: String,
    pub latency_output: String,
    pub price_input: String,
    pub price_output: String,
    /// `None` disables truncation
    pub sample_limit: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            latency_input: DEFAULT_LATENCY_INPUT.to_string(),
            latency_output: DEFAULT_LATENCY_OUTPUT.to_string(),
            price_input: DEFAULT_PRICE_INPUT.to_string(),
            price_output: DEFAULT_PRICE_OUTPUT.to_string(),
            sample_limit: Some(DEFAULT_SAMPLE_LIMIT),
        }
    }
}

impl AnalysisConfig {
    pub fn from_env() -> Result<Self, AnalysisError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, so tests need not touch the process env
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AnalysisConfig::default();

        let sample_limit = match lookup("LATENCY_SAMPLE_LIMIT") {
            None => defaults.sample_limit,
            Some(raw) => parse_sample_limit(&raw)?,
        };

        Ok(AnalysisConfig {
            latency_input: lookup("LATENCY_INPUT").unwrap_or(defaults.latency_input),
            latency_output: lookup("LATENCY_OUTPUT").unwrap_or(defaults.latency_output),
            price_input: lookup("PRICE_INPUT").unwrap_or(defaults.price_input),
            price_output: lookup("PRICE_OUTPUT").unwrap_or(defaults.price_output),
            sample_limit,
        })
    }
}

fn parse_sample_limit(raw: &str) -> Result<Option<usize>, AnalysisError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match raw.parse::<usize>() {
        Ok(0) => Err(AnalysisError::Config(
            "LATENCY_SAMPLE_LIMIT must be positive (use 'none' to disable)".to_string(),
        )),
        Ok(n) => Ok(Some(n)),
        Err(e) => Err(AnalysisError::Config(format!(
            "LATENCY_SAMPLE_LIMIT '{}': {}",
            raw, e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.sample_limit, Some(3_000_000));
        assert_eq!(config.latency_output, "latencies_hist.png");
    }

    #[test]
    fn test_overrides() {
        let config = AnalysisConfig::from_lookup(lookup_from(&[
            ("PRICE_INPUT", "/data/ticks.txt"),
            ("LATENCY_SAMPLE_LIMIT", "1000"),
        ]))
        .unwrap();
        assert_eq!(config.price_input, "/data/ticks.txt");
        assert_eq!(config.sample_limit, Some(1000));

        let config =
            AnalysisConfig::from_lookup(lookup_from(&[("LATENCY_SAMPLE_LIMIT", "None")])).unwrap();
        assert_eq!(config.sample_limit, None);
    }

    #[test]
    fn test_bad_limit() {
        for raw in ["0", "-5", "lots"] {
            let result = AnalysisConfig::from_lookup(lookup_from(&[("LATENCY_SAMPLE_LIMIT", raw)]));
            assert!(matches!(result, Err(AnalysisError::Config(_))), "{}", raw);
        }
    }

    #[test]
    fn test_figure_pixels() {
        assert_eq!(HISTOGRAM_FIGURE.pixels(), (3000, 1500));
        assert_eq!(PRICE_FIGURE.pixels(), (3600, 1800));
    }
}
