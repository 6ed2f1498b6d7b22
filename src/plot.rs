use std::ops::Range;
use std::path::Path;

use log::warn;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::sampler::{Error, SeriesBuffer};

const SIZE: (u32, u32) = (1024, 768);
const MIN_CPU_CEILING: f64 = 10.0;
const HEADROOM: f64 = 1.2;

/// Axis ranges for a plot of `series`.
#[derive(Debug, PartialEq)]
pub struct PlotRanges {
    pub time: Range<f64>,
    pub cpu: Range<f64>,
    pub memory: Range<f64>,
}

impl PlotRanges {
    pub fn for_series(series: &SeriesBuffer) -> Self {
        let last_time = series.last_time();
        let max_memory = series.max_memory();

        Self {
            time: 0.0..if last_time > 0.0 { last_time } else { 1.0 },
            cpu: 0.0..(series.max_cpu() * HEADROOM).max(MIN_CPU_CEILING),
            memory: 0.0..if max_memory > 0.0 { max_memory * HEADROOM } else { 1.0 },
        }
    }
}

/// Render CPU on the left axis and both memory series on a shared right
/// axis. The image format follows the extension of `path`.
pub fn render(path: &Path, title: &str, series: &SeriesBuffer) -> Result<(), Error> {
    let render_failed = |reason: String| Error::RenderFailed {
        path: path.to_path_buf(),
        reason,
    };

    if series.is_empty() {
        warn!("no samples collected, skipping plot {}", path.display());
        return Ok(());
    }

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if !dir.is_dir() {
            return Err(render_failed(format!("{} is not a directory", dir.display())));
        }
    }

    let is_svg = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("svg"));
    let drawn = if is_svg {
        draw(SVGBackend::new(path, SIZE).into_drawing_area(), title, series)
    } else {
        draw(BitMapBackend::new(path, SIZE).into_drawing_area(), title, series)
    };

    drawn.map_err(|err| render_failed(err.to_string()))
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    title: &str,
    series: &SeriesBuffer,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    let ranges = PlotRanges::for_series(series);

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(ranges.time.clone(), ranges.cpu)?
        .set_secondary_coord(ranges.time, ranges.memory);

    chart
        .configure_mesh()
        .x_desc("time (s)")
        .y_desc("CPU (%) (100% = 1 Core Usage)")
        .draw()?;
    chart.configure_secondary_axes().y_desc("Memory (MB)").draw()?;

    chart.draw_series(LineSeries::new(
        points(&series.times, &series.cpu),
        RED.stroke_width(2),
    ))?;
    chart
        .draw_secondary_series(LineSeries::new(
            points(&series.times, &series.mem_real),
            BLUE.stroke_width(2),
        ))?
        .label("Real Memory (MB)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));
    chart
        .draw_secondary_series(LineSeries::new(
            points(&series.times, &series.mem_virtual),
            CYAN.stroke_width(2),
        ))?
        .label("Virtual Memory (MB)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CYAN.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn points<'a>(times: &'a [f64], values: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
    times.iter().copied().zip(values.iter().copied())
}
