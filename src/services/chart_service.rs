use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use plotters::prelude::*;
use tracing::debug;

use crate::models::{ClassifiedSeries, Figure, TickRecord};
use crate::services::classify_service::base_price_series;
use crate::utils::AnalysisError;

/// One histogram bar, covering `[start, end)` (the last bar is closed)
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

/// Split samples into `bins` equal-width bins over their min..max range
///
/// A degenerate range `v..v` is widened to `v-0.5..v+0.5` (wider once 0.5 is
/// below f64 resolution); an empty input gives zero-count bins over `0..1`.
pub fn histogram_bins(samples: &[u64], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    // Distinct u64 values can collapse to one f64, so compare after conversion.
    let (lo, hi) = match (samples.iter().min(), samples.iter().max()) {
        (Some(&min), Some(&max)) => {
            let (lo, hi) = (min as f64, max as f64);
            if lo == hi {
                // Half a unit is below f64 resolution for very large samples
                let pad = (lo.abs() * f64::EPSILON).max(0.5);
                (lo - pad, hi + pad)
            } else {
                (lo, hi)
            }
        }
        _ => (0.0, 1.0),
    };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0u64; bins];
    for &sample in samples {
        let idx = (((sample as f64 - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + width * i as f64,
            end: lo + width * (i + 1) as f64,
            count,
        })
        .collect()
}

/// Padded axis range over the finite values, never zero-width
pub fn axis_range<I: IntoIterator<Item = f64>>(values: I, padding_ratio: f64) -> (f64, f64) {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if min > max {
        return (0.0, 1.0);
    }

    let range = (max - min).max(1e-8);
    let padding = range * padding_ratio;
    (min - padding, max + padding)
}

/// Temporary sibling of `output`, keeping its extension so the backend
/// picks the same image encoder
fn temp_sibling(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("chart");
    let ext = output.extension().and_then(|s| s.to_str()).unwrap_or("png");
    output.with_file_name(format!(
        ".{}.{}.{}",
        stem,
        Utc::now().timestamp_millis(),
        ext
    ))
}

/// Run `draw` against a temporary file, then move it over `output`
///
/// On any failure the temporary file is removed and `output` is untouched.
fn render_to_file<F>(output: &str, draw: F) -> Result<(), AnalysisError>
where
    F: FnOnce(&Path) -> Result<(), AnalysisError>,
{
    let output = Path::new(output);
    let temp_file = temp_sibling(output);
    debug!("Rendering to temporary file {}", temp_file.display());

    if let Err(e) = draw(&temp_file) {
        let _ = fs::remove_file(&temp_file);
        return Err(e);
    }

    fs::rename(&temp_file, output).map_err(|e| {
        let _ = fs::remove_file(&temp_file);
        AnalysisError::Render(format!("Failed to move chart to {}: {}", output.display(), e))
    })
}

fn render_err<E: std::fmt::Display>(what: &'static str) -> impl Fn(E) -> AnalysisError {
    move |e| AnalysisError::Render(format!("Failed to {}: {}", what, e))
}

/// Render the latency histogram with a log-scale frequency axis
pub fn render_latency_histogram(
    samples: &[u64],
    bins: usize,
    figure: Figure,
    output: &str,
) -> Result<(), AnalysisError> {
    let bars = histogram_bins(samples, bins);
    let x_min = bars.first().map(|b| b.start).unwrap_or(0.0);
    let x_max = bars.last().map(|b| b.end).unwrap_or(1.0);
    let max_count = bars.iter().map(|b| b.count).max().unwrap_or(0);

    // Log axis needs a positive floor; bars start just under a count of 1.
    let y_floor = 0.8;
    let y_ceil = (max_count as f64 * 1.5).max(10.0);

    render_to_file(output, |path| {
        let root = BitMapBackend::new(path, figure.pixels()).into_drawing_area();
        root.fill(&WHITE).map_err(render_err("fill canvas"))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Order Processing Latency Distribution",
                ("sans-serif", figure.scale(12.0)).into_font(),
            )
            .margin(figure.scale(8.0) as u32)
            .x_label_area_size(figure.scale(30.0) as u32)
            .y_label_area_size(figure.scale(45.0) as u32)
            .build_cartesian_2d(x_min..x_max, (y_floor..y_ceil).log_scale())
            .map_err(render_err("build chart"))?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Latency (ns)")
            .y_desc("Frequency (Log Scale)")
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .axis_desc_style(("sans-serif", figure.scale(10.0)).into_font())
            .label_style(("sans-serif", figure.scale(9.0)).into_font())
            .draw()
            .map_err(render_err("draw mesh"))?;

        let filled = bars.iter().filter(|b| b.count > 0);
        chart
            .draw_series(filled.clone().map(|b| {
                Rectangle::new([(b.start, y_floor), (b.end, b.count as f64)], BLUE.mix(0.7).filled())
            }))
            .map_err(render_err("draw bars"))?;
        chart
            .draw_series(filled.map(|b| {
                Rectangle::new(
                    [(b.start, y_floor), (b.end, b.count as f64)],
                    BLACK.stroke_width(figure.scale(0.5).max(1.0) as u32),
                )
            }))
            .map_err(render_err("draw bar edges"))?;

        root.present().map_err(render_err("render chart"))?;
        Ok(())
    })
}

/// Render the base-price line with the two limit-order scatter overlays
pub fn render_price_movement(
    records: &[TickRecord],
    series: &ClassifiedSeries,
    figure: Figure,
    output: &str,
) -> Result<(), AnalysisError> {
    let x_max = records.len().saturating_sub(1).max(1) as f64;
    let (y_min, y_max) = axis_range(
        records.iter().map(|r| r.base_price).chain(
            series
                .first
                .points
                .iter()
                .chain(&series.second.points)
                .map(|&(_, price)| price),
        ),
        0.05,
    );

    render_to_file(output, |path| {
        let root = BitMapBackend::new(path, figure.pixels()).into_drawing_area();
        root.fill(&WHITE).map_err(render_err("fill canvas"))?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Price Movement Over Time", ("sans-serif", figure.scale(12.0)).into_font())
            .margin(figure.scale(8.0) as u32)
            .x_label_area_size(figure.scale(30.0) as u32)
            .y_label_area_size(figure.scale(45.0) as u32)
            .build_cartesian_2d(0f64..x_max, y_min..y_max)
            .map_err(render_err("build chart"))?;

        chart
            .configure_mesh()
            .x_desc("Time")
            .y_desc("Price")
            .bold_line_style(BLACK.mix(0.3))
            .light_line_style(BLACK.mix(0.05))
            .axis_desc_style(("sans-serif", figure.scale(10.0)).into_font())
            .label_style(("sans-serif", figure.scale(9.0)).into_font())
            .draw()
            .map_err(render_err("draw mesh"))?;

        let line_width = figure.scale(2.0) as u32;
        let legend_len = figure.scale(20.0) as i32;
        chart
            .draw_series(LineSeries::new(
                base_price_series(records)
                    .into_iter()
                    .map(|(idx, price)| (idx as f64, price)),
                BLUE.stroke_width(line_width),
            ))
            .map_err(render_err("draw price line"))?
            .label("Price")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + legend_len, y)], BLUE.stroke_width(line_width))
            });

        let marker = figure.scale(3.0) as u32;
        for (scatter, color) in [(&series.first, GREEN), (&series.second, RED)] {
            if scatter.is_empty() {
                continue;
            }
            chart
                .draw_series(
                    scatter
                        .points
                        .iter()
                        .map(|&(idx, price)| Circle::new((idx as f64, price), marker, color.mix(0.8).filled())),
                )
                .map_err(render_err("draw limit orders"))?
                .label(scatter.label)
                .legend(move |(x, y)| Circle::new((x + legend_len / 2, y), marker, color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(("sans-serif", figure.scale(9.0)).into_font())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err("draw legend"))?;

        root.present().map_err(render_err("render chart"))?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_three_samples() {
        let bars = histogram_bins(&[100, 200, 300], 50);
        assert_eq!(bars.len(), 50);
        assert_eq!(bars.iter().map(|b| b.count).sum::<u64>(), 3);
        assert_eq!(bars[0].count, 1);
        assert_eq!(bars[25].count, 1);
        assert_eq!(bars[49].count, 1);
        assert!((bars[0].start - 100.0).abs() < 1e-9);
        assert!((bars[49].end - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_degenerate_and_empty() {
        let bars = histogram_bins(&[7, 7, 7], 4);
        assert!((bars[0].start - 6.5).abs() < 1e-9);
        assert!((bars[3].end - 7.5).abs() < 1e-9);
        assert_eq!(bars.iter().map(|b| b.count).sum::<u64>(), 3);

        let bars = histogram_bins(&[], 10);
        assert_eq!(bars.len(), 10);
        assert!(bars.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_histogram_range_collapsed_by_float_conversion() {
        let bars = histogram_bins(&[u64::MAX, u64::MAX - 1], 50);
        assert_eq!(bars.len(), 50);
        assert!(bars[49].end > bars[0].start);
        assert_eq!(bars.iter().map(|b| b.count).sum::<u64>(), 2);
        assert_eq!(bars.iter().filter(|b| b.count > 0).count(), 1);
    }

    #[test]
    fn test_axis_range() {
        assert_eq!(axis_range(Vec::<f64>::new(), 0.1), (0.0, 1.0));
        let (lo, hi) = axis_range(vec![10.0, 20.0, f64::INFINITY, f64::NAN], 0.1);
        assert!((lo - 9.0).abs() < 1e-9);
        assert!((hi - 21.0).abs() < 1e-9);
        let (lo, hi) = axis_range(vec![5.0], 0.05);
        assert!(lo < 5.0 && hi > 5.0);
    }

    #[test]
    fn test_temp_sibling_keeps_extension() {
        let temp = temp_sibling(Path::new("/data/out/price_movement.png"));
        assert_eq!(temp.parent(), Some(Path::new("/data/out")));
        assert_eq!(temp.extension().and_then(|e| e.to_str()), Some("png"));
        assert!(temp
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap()
            .starts_with(".price_movement."));
    }

    #[test]
    fn test_failed_draw_leaves_output_untouched() {
        let output = std::env::temp_dir().join(format!(
            "tickplot_untouched_{}.png",
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        fs::write(&output, b"previous").unwrap();

        let result = render_to_file(output.to_str().unwrap(), |path| {
            fs::write(path, b"partial").unwrap();
            Err(AnalysisError::Render("boom".to_string()))
        });

        assert!(matches!(result, Err(AnalysisError::Render(_))));
        assert_eq!(fs::read(&output).unwrap(), b"previous");
        let _ = fs::remove_file(&output);
    }
}
