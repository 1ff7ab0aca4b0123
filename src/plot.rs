use crate::sim::ensemble::PathEnsemble;
use plotters::prelude::*;
use std::path::Path;

/// Individually drawn paths are capped; beyond this the chart is an
/// unreadable smear and only the envelope matters.
const MAX_DRAWN_PATHS: usize = 50;

const CHART_SIZE: (u32, u32) = (1024, 768);

/// Render the simulated paths and the average trajectory to a PNG.
///
/// Plotting is strictly optional: any failure here is reported to the
/// caller, which logs it and carries on with the metrics-only report.
pub fn render_png(
    out: &Path,
    ensemble: &PathEnsemble,
    average: &[f64],
    ticker: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if ensemble.is_empty() || average.is_empty() {
        return Err("nothing to plot".into());
    }
    let drawn: Vec<&Vec<f64>> = ensemble.paths().iter().take(MAX_DRAWN_PATHS).collect();

    let horizon = average.len().saturating_sub(1);

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for p in drawn.iter().map(|p| p.iter()).chain(std::iter::once(average.iter())) {
        for &v in p {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
    }
    if y_min >= y_max {
        // Flat (zero-volatility) chart still needs a non-empty range
        y_min -= 1.0;
        y_max += 1.0;
    }
    let pad = (y_max - y_min) * 0.05;

    let root = BitMapBackend::new(out, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{ticker} simulated price paths"),
            ("sans-serif", 40).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..horizon as f64, (y_min - pad)..(y_max + pad))?;

    chart
        .configure_mesh()
        .x_desc("Days")
        .y_desc("Price")
        .draw()?;

    for path in &drawn {
        chart.draw_series(LineSeries::new(
            path.iter().enumerate().map(|(t, &p)| (t as f64, p)),
            &BLUE.mix(0.2),
        ))?;
    }

    chart
        .draw_series(LineSeries::new(
            average.iter().enumerate().map(|(t, &p)| (t as f64, p)),
            RED.stroke_width(2),
        ))?
        .label("Average path")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
