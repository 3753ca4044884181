//! Plotting infrastructure for frame time bar charts
//!
//! Charts are first described by a [`BarChart`], which holds everything needed to
//! draw them (bars, ticks, labels). A [`ChartRenderer`] then turns the description
//! into an image; [`PlottersRenderer`] does so with the [`plotters`] crate at a
//! fixed 1200x800 resolution.

use super::data_structures::FrameTimeAggregates;
use crate::analysis::TickScale;
use crate::config::ChartLabels;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Output resolution of rendered charts
pub const CHART_SIZE: (u32, u32) = (1200, 800);

/// Bar colours of the two series
const HIGHEST_COLOR: RGBColor = RGBColor(31, 119, 180);
const AVERAGE_COLOR: RGBColor = RGBColor(255, 127, 14);

/// One named set of bars
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// Legend label
    pub label: String,
    /// `(key, height)` pairs in key order
    pub bars: Vec<(u32, f64)>,
}

/// Complete description of a highest/average frame time bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub labels: ChartLabels,
    /// Series in drawing order; later series are drawn over earlier ones
    pub series: Vec<BarSeries>,
    /// Width of every bar, in key units
    pub bar_width: f64,
    /// Key axis ticks, one per observed key
    pub x_ticks: Vec<u32>,
    /// Value axis ticks
    pub y_ticks: Vec<f64>,
}

impl BarChart {
    /// Builds the chart description from aggregated frame times
    ///
    /// The `Highest` series is drawn first and `Average` over it; since the average
    /// never exceeds the maximum, both remain visible.
    pub fn from_aggregates(
        aggregates: &FrameTimeAggregates,
        labels: &ChartLabels,
        scale: &TickScale,
        bar_width: f64,
    ) -> Self {
        Self {
            labels: labels.clone(),
            series: vec![
                BarSeries {
                    label: "Highest".to_string(),
                    bars: aggregates.highest.iter().map(|(&k, &v)| (k, v)).collect(),
                },
                BarSeries {
                    label: "Average".to_string(),
                    bars: aggregates.average.iter().map(|(&k, &v)| (k, v)).collect(),
                },
            ],
            bar_width,
            x_ticks: aggregates.keys().collect(),
            y_ticks: scale.ticks(aggregates.highest_max().unwrap_or_default()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.bars.is_empty())
    }

    /// Key axis range, padded by one bar width on each side
    pub fn x_range(&self) -> (f64, f64) {
        let min = self.x_ticks.iter().copied().min().unwrap_or_default() as f64;
        let max = self.x_ticks.iter().copied().max().unwrap_or_default() as f64;
        (min - self.bar_width, max + self.bar_width)
    }

    /// Value axis range, from 0 to 5% above the tallest bar or top tick
    pub fn y_range(&self) -> (f64, f64) {
        let tallest = self
            .series
            .iter()
            .flat_map(|s| s.bars.iter().map(|&(_, value)| value))
            .chain(self.y_ticks.iter().copied())
            .fold(0.0, f64::max);

        let top = if tallest > 0.0 { tallest * 1.05 } else { 1.0 };
        (0.0, top)
    }
}

/// Linear `f64` axis whose grid lines and labels sit exactly on the given ticks
#[derive(Clone)]
struct TickAxis {
    linear: RangedCoordf64,
    ticks: Vec<f64>,
}

impl TickAxis {
    fn new((start, end): (f64, f64), ticks: Vec<f64>) -> Self {
        Self {
            linear: (start..end).into(),
            ticks,
        }
    }
}

impl Ranged for TickAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.linear.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        // No light grid lines between ticks
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.ticks.clone()
        }
    }

    fn range(&self) -> Range<f64> {
        self.linear.range()
    }
}

/// Draws a [`BarChart`] somewhere
pub trait ChartRenderer {
    fn render(&self, chart: &BarChart) -> Result<()>;
}

/// Renders charts to an image file with [`plotters`]
///
/// The backend is picked from the file extension: `.svg` uses the SVG backend,
/// everything else the bitmap backend (PNG).
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    pub output_path: PathBuf,
    pub size: (u32, u32),
}

impl PlottersRenderer {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            size: CHART_SIZE,
        }
    }

    fn is_svg(&self) -> bool {
        self.output_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, chart: &BarChart) -> Result<()> {
        validate_chart(chart)?;

        debug!(path = %self.output_path.display(), svg = self.is_svg(), "rendering chart");
        if self.is_svg() {
            let root = SVGBackend::new(&self.output_path, self.size).into_drawing_area();
            draw_bar_chart(&root, chart)
        } else {
            let root = BitMapBackend::new(&self.output_path, self.size).into_drawing_area();
            draw_bar_chart(&root, chart)
        }
    }
}

/// Rejects charts that cannot be drawn
fn validate_chart(chart: &BarChart) -> Result<()> {
    if chart.is_empty() {
        return Err(PlotError::InvalidData("Data cannot be empty".to_string()));
    }

    if !(chart.bar_width.is_finite() && chart.bar_width > 0.0) {
        return Err(PlotError::InvalidData(format!(
            "Bar width {} must be a positive number",
            chart.bar_width
        )));
    }

    if let Some((key, value)) = chart
        .series
        .iter()
        .flat_map(|s| s.bars.iter())
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
    {
        return Err(PlotError::InvalidData(format!(
            "Frame time {} for key {} is not a non-negative number",
            value, key
        )));
    }

    Ok(())
}

/// Draws the chart onto any plotters drawing area
///
/// Bars are rectangles centred on their key. The x axis is ticked exactly at the
/// observed keys and the y axis at the chart's tick scale; bold mesh lines at those
/// ticks form the background grid.
fn draw_bar_chart<DB: DrawingBackend>(
    drawing_area: &DrawingArea<DB, Shift>,
    chart: &BarChart,
) -> Result<()> {
    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let x_axis = TickAxis::new(
        chart.x_range(),
        chart.x_ticks.iter().map(|&key| key as f64).collect(),
    );
    let y_axis = TickAxis::new(chart.y_range(), chart.y_ticks.clone());

    let mut chart_context = ChartBuilder::on(drawing_area)
        .caption(&chart.labels.title, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(x_axis, y_axis)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart_context
        .configure_mesh()
        .x_desc(chart.labels.x_label.as_str())
        .y_desc(chart.labels.y_label.as_str())
        .x_labels(chart.x_ticks.len())
        .y_labels(chart.y_ticks.len())
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .axis_desc_style(("sans-serif", 25))
        .label_style(("sans-serif", 18))
        .bold_line_style(BLACK.mix(0.15))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let half_width = chart.bar_width / 2.0;
    let colors = [HIGHEST_COLOR, AVERAGE_COLOR];
    for (series, color) in chart.series.iter().zip(colors.iter().cycle()) {
        let style = color.filled();
        chart_context
            .draw_series(series.bars.iter().map(|&(key, value)| {
                let center = key as f64;
                Rectangle::new(
                    [(center - half_width, 0.0), (center + half_width, value)],
                    style,
                )
            }))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(series.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 16, y + 6)], style));
    }

    chart_context
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 20))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // Ensure everything is properly rendered and saved
    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate;
    use crate::common::{Dataset, Measurement};
    use crate::config::Preset;
    use plotters_backend::{
        BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingErrorKind,
    };
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::fs;
    use std::rc::Rc;

    fn aggregates(rows: &[(u32, f64)]) -> FrameTimeAggregates {
        aggregate(&Dataset::new(
            None,
            rows.iter()
                .map(|&(key, value)| Measurement::new(key, value))
                .collect(),
        ))
    }

    fn chart(rows: &[(u32, f64)]) -> BarChart {
        BarChart::from_aggregates(
            &aggregates(rows),
            &Preset::Cubes.labels(),
            &TickScale::default(),
            4.0,
        )
    }

    #[test]
    fn bar_chart_from_aggregates() {
        let chart = chart(&[(10, 5.0), (10, 7.0), (20, 260.0)]);

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].label, "Highest");
        assert_eq!(chart.series[0].bars, vec![(10, 7.0), (20, 260.0)]);
        assert_eq!(chart.series[1].label, "Average");
        assert_eq!(chart.series[1].bars, vec![(10, 6.0), (20, 260.0)]);
        assert_eq!(chart.x_ticks, vec![10, 20]);
        assert_eq!(
            chart.y_ticks,
            vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0, 140.0, 200.0, 250.0]
        );
        assert_eq!(chart.labels.x_label, "Number of cubes");
    }

    #[test]
    fn bar_chart_ranges() {
        let chart = chart(&[(10, 5.0), (50, 100.0)]);
        assert_eq!(chart.x_range(), (6.0, 54.0));

        // Top tick (140) is above the tallest bar
        let (y_min, y_max) = chart.y_range();
        assert_eq!(y_min, 0.0);
        assert!((y_max - 147.0).abs() < 1e-9);
    }

    #[test]
    fn bar_chart_empty() {
        let chart = chart(&[]);
        assert!(chart.is_empty());
        assert!(chart.x_ticks.is_empty());
        assert_eq!(chart.x_range(), (-4.0, 4.0));
        assert!((chart.y_range().1 - 147.0).abs() < 1e-9);
    }

    #[test]
    fn render_validation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let renderer = PlottersRenderer::new(temp_dir.path().join("test_plot.png"));

        // Test empty data
        let result = renderer.render(&chart(&[]));
        assert!(matches!(result, Err(PlotError::InvalidData(_))));

        // Test negative frame time
        let result = renderer.render(&chart(&[(1, -10.0)]));
        assert!(matches!(result, Err(PlotError::InvalidData(_))));

        // Test non-finite frame time
        let result = renderer.render(&chart(&[(1, f64::INFINITY)]));
        assert!(matches!(result, Err(PlotError::InvalidData(_))));

        // Test invalid bar width
        let mut zero_width = chart(&[(1, 1.0)]);
        zero_width.bar_width = 0.0;
        let result = renderer.render(&zero_width);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));

        assert!(!temp_dir.path().join("test_plot.png").exists());
    }

    #[test]
    fn renderer_picks_backend_from_extension() {
        assert!(PlottersRenderer::new("chart.svg").is_svg());
        assert!(PlottersRenderer::new("chart.SVG").is_svg());
        assert!(!PlottersRenderer::new("chart.png").is_svg());
        assert!(!PlottersRenderer::new("chart").is_svg());
        assert_eq!(PlottersRenderer::new("chart.png").size, CHART_SIZE);
    }

    /// Text and filled rectangles seen by [`RecordingBackend`]
    #[derive(Default)]
    struct Recording {
        texts: Vec<String>,
        filled_rects: Vec<(BackendCoord, BackendCoord, (u8, u8, u8))>,
        presented: bool,
    }

    /// Backend that records what is drawn instead of rasterizing it, with a fixed
    /// size estimate for text so no system font is needed for layout
    struct RecordingBackend(Rc<RefCell<Recording>>);

    type BackendResult<T> = core::result::Result<T, DrawingErrorKind<Infallible>>;

    impl DrawingBackend for RecordingBackend {
        type ErrorType = Infallible;

        fn get_size(&self) -> (u32, u32) {
            CHART_SIZE
        }

        fn ensure_prepared(&mut self) -> BackendResult<()> {
            Ok(())
        }

        fn present(&mut self) -> BackendResult<()> {
            self.0.borrow_mut().presented = true;
            Ok(())
        }

        fn draw_pixel(&mut self, _point: BackendCoord, _color: BackendColor) -> BackendResult<()> {
            Ok(())
        }

        fn draw_rect<S: BackendStyle>(
            &mut self,
            upper_left: BackendCoord,
            bottom_right: BackendCoord,
            style: &S,
            fill: bool,
        ) -> BackendResult<()> {
            if fill {
                let rgb = style.color().rgb;
                self.0
                    .borrow_mut()
                    .filled_rects
                    .push((upper_left, bottom_right, rgb));
            }
            Ok(())
        }

        fn draw_text<TStyle: BackendTextStyle>(
            &mut self,
            text: &str,
            _style: &TStyle,
            _pos: BackendCoord,
        ) -> BackendResult<()> {
            self.0.borrow_mut().texts.push(text.to_string());
            Ok(())
        }

        fn estimate_text_size<TStyle: BackendTextStyle>(
            &self,
            text: &str,
            _style: &TStyle,
        ) -> BackendResult<(u32, u32)> {
            Ok((text.len() as u32 * 8, 16))
        }
    }

    #[test]
    fn draw_bar_chart_uses_exact_ticks() {
        let recording = Rc::new(RefCell::new(Recording::default()));
        let root = RecordingBackend(Rc::clone(&recording)).into_drawing_area();
        let chart = chart(&[(10, 5.0), (10, 7.0), (20, 9.0)]);

        let result = draw_bar_chart(&root, &chart);
        let recording = recording.borrow();
        match result {
            Ok(()) => assert!(recording.presented),
            // The legend is laid out with the system font, which may be absent
            Err(PlotError::Drawing(message)) => assert!(message.contains("Font")),
            Err(other) => panic!("unexpected error: {other}"),
        }

        assert!(recording.texts.contains(&chart.labels.title));
        assert!(recording.texts.contains(&"Number of cubes".to_string()));

        // Every numeric label is one of the chart's ticks: keys 10 and 20 on x,
        // the fine segment 0..=140 on y
        let mut tick_labels: Vec<u32> = recording
            .texts
            .iter()
            .filter_map(|text| text.parse().ok())
            .collect();
        tick_labels.sort_unstable();
        assert_eq!(tick_labels, vec![0, 10, 20, 20, 40, 60, 80, 100, 120, 140]);

        // Bars are far wider than the 16px legend swatches
        let bars = |color: RGBColor| -> Vec<(BackendCoord, BackendCoord)> {
            recording
                .filled_rects
                .iter()
                .filter(|(ul, br, rgb)| {
                    *rgb == (color.0, color.1, color.2) && br.0 - ul.0 > 50
                })
                .map(|&(ul, br, _)| (ul, br))
                .collect()
        };
        let highest = bars(HIGHEST_COLOR);
        let average = bars(AVERAGE_COLOR);
        assert_eq!(highest.len(), 2);
        assert_eq!(average.len(), 2);

        // Same x position per key; key 10 has highest 7 over average 6, key 20 a
        // single value
        assert_eq!(highest[0].0 .0, average[0].0 .0);
        assert!(highest[0].0 .1 < average[0].0 .1);
        assert_eq!(highest[1], average[1]);
        assert!(highest[0].0 .0 < highest[1].0 .0);
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_render_frame_time_plot_success() {
        let temp_dir = tempfile::tempdir().unwrap();
        let chart = chart(&[(1, 12.0), (1, 16.5), (5, 40.0), (10, 90.0), (10, 310.0)]);

        for name in ["frametime.png", "frametime.svg"] {
            let output_path = temp_dir.path().join(name);
            let result = PlottersRenderer::new(&output_path).render(&chart);

            assert!(result.is_ok());
            assert!(fs::metadata(&output_path).unwrap().len() > 0);
        }
    }
}
