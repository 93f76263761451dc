use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::Local;
use plotters::prelude::*;

use crate::core::angles::unit_at;
use crate::core::window::ViewWindow;
use crate::core::{INCLINE_LENGTH, Vector2};

const PLOT_SIZE: (u32, u32) = (1280, 720);

/// One projectile's curves as they should appear on the chart.
pub struct PlotSeries<'a> {
    pub label: &'a str,
    pub color: [u8; 3],
    pub predicted: &'a [Vector2],
    /// Decimated tick path, when the state machine was run.
    pub flown: Option<&'a [Vector2]>,
}

/// `incline_prediction_<timestamp>.png` in the working directory.
pub fn default_plot_path() -> PathBuf {
    PathBuf::from(format!(
        "incline_prediction_{}.png",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

pub fn render_prediction_png(
    path: &Path,
    incline_deg: f64,
    series: &[PlotSeries<'_>],
) -> Result<(), Box<dyn Error>> {
    let window = ViewWindow::fit(
        series
            .iter()
            .flat_map(|s| s.predicted.iter().chain(s.flown.unwrap_or(&[])).copied()),
        incline_deg,
    );

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Launch from a {incline_deg:.1} deg incline"),
            ("sans-serif", 28),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(window.min.x..window.max.x, window.min.y..window.max.y)?;

    chart
        .configure_mesh()
        .x_desc("Distance (m)")
        .y_desc("Height (m)")
        .draw()?;

    let top = Vector2::from(unit_at(incline_deg)) * INCLINE_LENGTH;
    chart
        .draw_series(LineSeries::new(
            [(0.0, 0.0), (top.x, top.y)],
            RGBColor(242, 159, 5).stroke_width(4),
        ))?
        .label("incline")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RGBColor(242, 159, 5)));

    for s in series {
        let color = RGBColor(s.color[0], s.color[1], s.color[2]);
        chart
            .draw_series(LineSeries::new(
                s.predicted.iter().map(|p| (p.x, p.y)),
                color.mix(0.55).stroke_width(2),
            ))?
            .label(format!("{} (predicted)", s.label))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        if let Some(flown) = s.flown {
            chart.draw_series(
                flown
                    .iter()
                    .map(|p| Circle::new((p.x, p.y), 3, color.filled())),
            )?;
        }
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
