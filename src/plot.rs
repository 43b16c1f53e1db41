use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::complexity::{ComplexityBlob, EntrySummary};
use crate::error::StatsError;
use crate::pipeline::{file_label, StatsReport};
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub palette: Vec<RGBColor>,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1100,
            height: 800,
            background: RGBColor(10, 10, 10),
            palette: vec![BLUE, RED, GREEN, CYAN, MAGENTA, YELLOW, WHITE],
        }
    }
}
/// One stacked panel per statistic; per-channel tables are summed per file.
pub fn render_stats_png(report: &StatsReport, style: &PlotStyle) -> Result<Vec<u8>, StatsError> {
    if report.results.is_empty() || report.files.is_empty() {
        return Err(StatsError::Plot("no statistics to plot".into()));
    }
    let labels = report.file_labels();
    let n_files = labels.len();
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let panels = root.split_evenly((report.results.len(), 1));
        let last = panels.len() - 1;
        for (idx, (panel, result)) in panels.iter().zip(&report.results).enumerate() {
            let color = style.palette[idx % style.palette.len()];
            let y = result.table.totals();
            let (y_min, y_max) = y_bounds(y.iter().copied());
            let bottom_area = if idx == last { 120 } else { 10 };
            let tick_label = |x: &f64| category_label(*x, &labels);
            let mut chart = ChartBuilder::on(panel)
                .margin(10)
                .caption(&result.label, ("sans-serif", 18).into_font().color(&color))
                .set_label_area_size(LabelAreaPosition::Left, 60)
                .set_label_area_size(LabelAreaPosition::Bottom, bottom_area)
                .build_cartesian_2d(-1f64..n_files as f64, y_min..y_max)?;
            chart
                .configure_mesh()
                .light_line_style(&WHITE.mix(0.1))
                .x_labels(n_files + 2)
                .x_label_formatter(&tick_label)
                .x_label_style(
                    ("sans-serif", 12)
                        .into_font()
                        .transform(FontTransform::Rotate90)
                        .color(&WHITE),
                )
                .y_label_style(("sans-serif", 12).into_font().color(&WHITE))
                .y_desc(result.label.as_str())
                .axis_desc_style(("sans-serif", 14).into_font().color(&color))
                .draw()?;
            let points: Vec<(f64, f64)> = finite_points(y.iter().copied());
            chart.draw_series(LineSeries::new(points.iter().copied(), &color))?;
            chart.draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// Complexity per entry: mean line with a +/- std band (or the max line) over a per-channel
/// scatter for per-channel blobs, a plain line otherwise.
pub fn render_complexity_png(
    blob: &ComplexityBlob,
    summaries: &[EntrySummary],
    title: &str,
    style: &PlotStyle,
) -> Result<Vec<u8>, StatsError> {
    if summaries.is_empty() {
        return Err(StatsError::Plot("complexity blob has no entries".into()));
    }
    let labels: Vec<String> = blob
        .files
        .iter()
        .map(|f| file_label(std::path::Path::new(f)))
        .collect();
    let n_entries = summaries.len();
    let all_values = summaries
        .iter()
        .flat_map(|s| {
            let band = s.band().map(|(lo, hi)| [lo, hi]);
            std::iter::once(s.center()).chain(band.into_iter().flatten())
        })
        .chain(
            blob.is_per_channel()
                .then(|| blob.complexity.iter().flat_map(|c| c.values().iter().copied()))
                .into_iter()
                .flatten(),
        );
    let (y_min, y_max) = y_bounds(all_values);
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let line_color = style.palette[0];
        let tick_label = |x: &f64| category_label(*x, &labels);
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(title, ("sans-serif", 20).into_font().color(&WHITE))
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 200)
            .build_cartesian_2d(-1f64..n_entries as f64, y_min..y_max)?;
        chart
            .configure_mesh()
            .light_line_style(&WHITE.mix(0.1))
            .x_labels(n_entries + 2)
            .x_label_formatter(&tick_label)
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90)
                    .color(&WHITE),
            )
            .y_label_style(("sans-serif", 12).into_font().color(&WHITE))
            .y_desc("Complexity")
            .axis_desc_style(("sans-serif", 14).into_font().color(&WHITE))
            .draw()?;
        let bands: Vec<(f64, (f64, f64))> = summaries
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.band().map(|b| (i as f64, b)))
            .filter(|(_, (lo, hi))| lo.is_finite() && hi.is_finite())
            .collect();
        if bands.len() > 1 {
            let outline: Vec<(f64, f64)> = bands
                .iter()
                .map(|&(x, (_, hi))| (x, hi))
                .chain(bands.iter().rev().map(|&(x, (lo, _))| (x, lo)))
                .collect();
            chart.draw_series(std::iter::once(Polygon::new(
                outline,
                line_color.mix(0.25).filled(),
            )))?;
        }
        let centers = finite_points(summaries.iter().map(EntrySummary::center));
        chart.draw_series(LineSeries::new(centers, &line_color))?;
        if blob.is_per_channel() {
            let scatter_color = style.palette[1 % style.palette.len()];
            for (i, value) in blob.complexity.iter().enumerate() {
                chart.draw_series(
                    value
                        .values()
                        .iter()
                        .filter(|v| v.is_finite())
                        .map(|&v| Circle::new((i as f64, v), 2, scatter_color.filled())),
                )?;
            }
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// File label for integer x positions, blank elsewhere.
fn category_label(x: f64, labels: &[String]) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}
fn finite_points(values: impl Iterator<Item = f64>) -> Vec<(f64, f64)> {
    values
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, v)| (i as f64, v))
        .collect()
}
/// Y axis range over the finite values, starting at zero when nothing is negative.
fn y_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    let low = if min >= 0.0 { 0.0 } else { min };
    let span = max - low;
    if span.abs() < f64::EPSILON {
        let floor = if low == 0.0 { 0.0 } else { low - 1.0 };
        return (floor, max + 1.0);
    }
    let pad = span * 0.05;
    (if low == 0.0 { 0.0 } else { low - pad }, max + pad)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, StatsError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| StatsError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
