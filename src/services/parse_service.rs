use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use tracing::debug;

use crate::models::{LimitOrder, OrderSide, TickRecord};
use crate::utils::AnalysisError;

/// Open an input file for line-by-line reading
///
/// The handle lives inside the returned reader and is closed when the
/// reader is dropped, whether parsing finished or failed.
pub fn open_input(path: &str) -> Result<BufReader<File>, AnalysisError> {
    let file = File::open(Path::new(path)).map_err(|e| {
        debug!("Failed to open {}: {}", path, e);
        AnalysisError::InputNotFound {
            path: path.to_string(),
        }
    })?;
    Ok(BufReader::new(file))
}

/// Iterate over the non-blank lines of a reader as (1-based line number, line)
fn non_blank_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<(usize, String), AnalysisError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| match line {
            Ok(l) if l.trim().is_empty() => None,
            Ok(l) => Some(Ok((idx + 1, l))),
            Err(e) if e.kind() == ErrorKind::InvalidData => Some(Err(AnalysisError::malformed(
                idx + 1,
                "<invalid UTF-8>",
                e.to_string(),
            ))),
            Err(e) => Some(Err(AnalysisError::Io(e))),
        })
}

/// Parse latency samples: one non-negative integer per non-blank line
///
/// Only the first token of each line is read, trailing tokens are ignored.
pub fn parse_latencies<R: BufRead>(reader: R) -> Result<Vec<u64>, AnalysisError> {
    let mut samples = Vec::new();

    for line in non_blank_lines(reader) {
        let (line_no, content) = line?;
        // non_blank_lines guarantees at least one token
        let token = content.split_whitespace().next().unwrap_or_default();
        let value = token
            .parse::<u64>()
            .map_err(|e| AnalysisError::malformed(line_no, &content, format!("latency: {}", e)))?;
        samples.push(value);
    }

    Ok(samples)
}

/// Parse tick records: `base_price [limit_price [order_type]]` per non-blank line
pub fn parse_ticks<R: BufRead>(reader: R) -> Result<Vec<TickRecord>, AnalysisError> {
    let mut records = Vec::new();

    for line in non_blank_lines(reader) {
        let (line_no, content) = line?;
        let record = parse_tick_line(records.len(), line_no, &content)?;
        records.push(record);
    }

    Ok(records)
}

fn parse_tick_line(
    tick_index: usize,
    line_no: usize,
    content: &str,
) -> Result<TickRecord, AnalysisError> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.len() > 3 {
        return Err(AnalysisError::malformed(
            line_no,
            content,
            format!("expected at most 3 tokens, found {}", tokens.len()),
        ));
    }

    let parse_price = |token: &str, field: &str| {
        token
            .parse::<f64>()
            .map_err(|e| AnalysisError::malformed(line_no, content, format!("{}: {}", field, e)))
    };

    let base_price = parse_price(tokens[0], "base price")?;

    let limit_order = match tokens.get(1) {
        None => None,
        Some(token) => {
            let limit_price = parse_price(token, "limit price")?;
            let side = match tokens.get(2) {
                None => None,
                Some(code) => Some(parse_order_side(code).map_err(|reason| {
                    AnalysisError::malformed(line_no, content, reason)
                })?),
            };
            Some(LimitOrder { limit_price, side })
        }
    };

    Ok(TickRecord {
        tick_index,
        base_price,
        limit_order,
    })
}

fn parse_order_side(token: &str) -> Result<OrderSide, String> {
    let code = token
        .parse::<u8>()
        .map_err(|e| format!("order type '{}': {}", token, e))?;
    OrderSide::from_code(code).ok_or_else(|| format!("order type must be 0 or 1, got {}", code))
}

/// Keep only the first `limit` samples, preserving order
pub fn truncate_samples<T>(mut samples: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        samples.truncate(limit);
    }
    samples
}
