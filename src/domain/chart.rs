//! Projection of the vitals history onto a fixed-size canvas.
//!
//! The projector does no drawing. It turns a non-empty, chronological
//! sequence of [`VitalReading`]s into pixel coordinates for two line series
//! (heart rate and systolic blood pressure) together with the axes and legend
//! a renderer needs.
//!
//! Readings are spaced evenly along the x axis by position. Each series is
//! scaled on its own: the y axis maps `[min - 5, max + 5]` of that series'
//! observed values onto the plot height, so the two waveforms are visually
//! comparable even though their magnitudes differ. The padding also keeps the
//! denominator non-zero when every value in a series is equal.

use nonempty::NonEmpty;
use serde::Serialize;

use crate::domain::patient::VitalReading;

/// Padding applied below the minimum and above the maximum of each series.
pub const VALUE_PADDING: f64 = 5.0;

/// A point in canvas pixel space. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal offset from the left edge.
    pub x: f64,
    /// Vertical offset from the top edge.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// Canvas size and the margins around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartLayout {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Space left of the plot (and the y axis position).
    pub margin_left: f64,
    /// Space right of the plot.
    pub margin_right: f64,
    /// Space above the plot.
    pub margin_top: f64,
    /// Space below the plot (and the x axis position).
    pub margin_bottom: f64,
    /// Where the y axis line starts; above `margin_top` to leave room for the
    /// legend beside it.
    pub axis_top: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::with_size(640.0, 260.0)
    }
}

impl ChartLayout {
    /// The default margins on a canvas of the given size.
    #[must_use]
    pub const fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin_left: 40.0,
            margin_right: 20.0,
            margin_top: 30.0,
            margin_bottom: 30.0,
            axis_top: 20.0,
        }
    }

    /// Horizontal span available to the series.
    #[must_use]
    pub const fn plot_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    /// The y coordinate of the x axis.
    #[must_use]
    pub const fn bottom(&self) -> f64 {
        self.height - self.margin_bottom
    }

    /// The y coordinate of the highest plotted value.
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.margin_top
    }

    /// Whether the margins leave a plot area with positive width and height.
    #[must_use]
    pub const fn has_plot_area(&self) -> bool {
        self.plot_width() > 0.0 && self.bottom() > self.top()
    }
}

/// The vital sign a series tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// Heart rate in bpm.
    HeartRate,
    /// Systolic blood pressure in mmHg.
    SystolicBp,
}

impl SeriesKind {
    /// Legend label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HeartRate => "Heart Rate",
            Self::SystolicBp => "Systolic BP",
        }
    }

    /// Stroke colour as a CSS hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::HeartRate => "#4f7df3",
            Self::SystolicBp => "#2ad1b8",
        }
    }

    const fn legend_x(self) -> (f64, f64) {
        // (swatch x, label x)
        match self {
            Self::HeartRate => (40.0, 52.0),
            Self::SystolicBp => (126.0, 140.0),
        }
    }

    fn value(self, reading: &VitalReading) -> f64 {
        match self {
            Self::HeartRate => f64::from(reading.hr),
            Self::SystolicBp => f64::from(reading.bp),
        }
    }
}

/// A legend entry: a coloured swatch followed by a text label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    /// The filled swatch.
    pub swatch: Rect,
    /// Baseline position of the label text.
    pub label_at: Point,
    /// Label text.
    pub label: &'static str,
}

/// One projected series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Which vital sign this is.
    pub kind: SeriesKind,
    /// Stroke colour.
    pub color: &'static str,
    /// Stroke width in pixels.
    pub line_width: f64,
    /// Value mapped to the bottom of the plot.
    pub min: f64,
    /// Value mapped to the top of the plot.
    pub max: f64,
    /// One point per reading, in reading order.
    pub points: Vec<Point>,
    /// Legend metadata.
    pub legend: LegendEntry,
}

impl Series {
    /// Whether the series has enough points to be drawn as a line.
    ///
    /// A single reading is drawn as a lone point.
    #[must_use]
    pub fn is_line(&self) -> bool {
        self.points.len() > 1
    }
}

/// Everything needed to draw the vitals chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartProjection {
    /// The layout the projection was computed for.
    pub layout: ChartLayout,
    /// The axes polyline: top of the y axis, origin, end of the x axis.
    pub axes: [Point; 3],
    /// The time label of each reading, aligned with the series points.
    pub labels: Vec<String>,
    /// Heart rate, then systolic blood pressure.
    pub series: [Series; 2],
}

/// Projects `vitals` onto a canvas described by `layout`.
#[must_use]
pub fn project(vitals: &NonEmpty<VitalReading>, layout: &ChartLayout) -> ChartProjection {
    let xs = x_positions(vitals.len(), layout);

    ChartProjection {
        layout: *layout,
        axes: [
            Point::new(layout.margin_left, layout.axis_top),
            Point::new(layout.margin_left, layout.bottom()),
            Point::new(layout.width - layout.margin_right, layout.bottom()),
        ],
        labels: vitals.iter().map(|reading| reading.t.clone()).collect(),
        series: [
            project_series(SeriesKind::HeartRate, vitals, &xs, layout),
            project_series(SeriesKind::SystolicBp, vitals, &xs, layout),
        ],
    }
}

#[allow(clippy::cast_precision_loss)]
fn x_positions(count: usize, layout: &ChartLayout) -> Vec<f64> {
    if count == 1 {
        return vec![layout.margin_left];
    }

    let step = layout.plot_width() / (count - 1) as f64;

    (0..count)
        .map(|i| (i as f64).mul_add(step, layout.margin_left))
        .collect()
}

fn project_series(
    kind: SeriesKind,
    vitals: &NonEmpty<VitalReading>,
    xs: &[f64],
    layout: &ChartLayout,
) -> Series {
    let first = kind.value(vitals.first());
    let (lowest, highest) = vitals
        .iter()
        .map(|reading| kind.value(reading))
        .fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let min = lowest - VALUE_PADDING;
    let max = highest + VALUE_PADDING;

    let points = vitals
        .iter()
        .zip(xs)
        .map(|(reading, &x)| Point::new(x, scale_y(kind.value(reading), min, max, layout)))
        .collect();

    let (swatch_x, label_x) = kind.legend_x();

    Series {
        kind,
        color: kind.color(),
        line_width: 2.0,
        min,
        max,
        points,
        legend: LegendEntry {
            swatch: Rect {
                origin: Point::new(swatch_x, 12.0),
                width: 8.0,
                height: 8.0,
            },
            label_at: Point::new(label_x, 20.0),
            label: kind.label(),
        },
    }
}

fn scale_y(value: f64, min: f64, max: f64, layout: &ChartLayout) -> f64 {
    let ratio = (value - min) / (max - min);
    (-ratio).mul_add(layout.bottom() - layout.top(), layout.bottom())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(t: &str, hr: i32, bp: i32) -> VitalReading {
        VitalReading {
            t: t.to_string(),
            hr,
            bp,
            spo2: 98,
        }
    }

    fn vitals(readings: Vec<VitalReading>) -> NonEmpty<VitalReading> {
        NonEmpty::from_vec(readings).expect("at least one reading")
    }

    #[test]
    fn plot_area_needs_room_inside_the_margins() {
        assert!(ChartLayout::default().has_plot_area());
        assert!(ChartLayout::with_size(61.0, 61.0).has_plot_area());
        assert!(!ChartLayout::with_size(60.0, 260.0).has_plot_area());
        assert!(!ChartLayout::with_size(640.0, 60.0).has_plot_area());
        assert!(!ChartLayout::with_size(0.0, 0.0).has_plot_area());
    }

    #[test]
    fn two_readings_span_the_plot_width() {
        let layout = ChartLayout::default();
        let projection = project(
            &vitals(vec![reading("09:00", 78, 120), reading("12:00", 82, 118)]),
            &layout,
        );

        for series in &projection.series {
            let xs: Vec<f64> = series.points.iter().map(|p| p.x).collect();
            assert_eq!(xs, [layout.margin_left, layout.margin_left + layout.plot_width()]);
        }
    }

    #[test]
    fn equal_values_share_a_y_coordinate() {
        let layout = ChartLayout::default();
        let projection = project(
            &vitals(vec![reading("09:00", 78, 120), reading("12:00", 78, 130)]),
            &layout,
        );

        let hr = &projection.series[0];
        assert_eq!(hr.points[0].y, hr.points[1].y);
        assert_eq!(hr.min, 73.0);
        assert_eq!(hr.max, 83.0);
        // Midway between the padded bounds.
        assert_eq!(hr.points[0].y, (layout.bottom() + layout.top()) / 2.0);
    }

    #[test]
    fn extremes_sit_inside_the_plot_by_the_padding() {
        let layout = ChartLayout::with_size(200.0, 130.0);
        let projection = project(
            &vitals(vec![reading("a", 70, 100), reading("b", 90, 140)]),
            &layout,
        );

        let hr = &projection.series[0];
        // range [65, 95], plot from y=100 (bottom) to y=30 (top)
        let span = layout.bottom() - layout.top();
        assert!((hr.points[0].y - (100.0 - span * 5.0 / 30.0)).abs() < 1e-9);
        assert!((hr.points[1].y - (100.0 - span * 25.0 / 30.0)).abs() < 1e-9);
        assert!(hr.points[1].y < hr.points[0].y, "higher values plot higher");
    }

    #[test]
    fn series_are_scaled_independently() {
        let layout = ChartLayout::default();
        let projection = project(
            &vitals(vec![reading("a", 60, 100), reading("b", 80, 120)]),
            &layout,
        );

        // Same relative shape, different magnitudes: identical pixels.
        let [hr, bp] = &projection.series;
        assert_eq!(hr.points[0].y, bp.points[0].y);
        assert_eq!(hr.points[1].y, bp.points[1].y);
        assert_eq!((hr.min, hr.max), (55.0, 85.0));
        assert_eq!((bp.min, bp.max), (95.0, 125.0));
    }

    #[test]
    fn single_reading_is_a_point_at_the_left_margin() {
        let layout = ChartLayout::default();
        let projection = project(&NonEmpty::new(reading("09:00", 78, 120)), &layout);

        for series in &projection.series {
            assert!(!series.is_line());
            assert_eq!(series.points.len(), 1);
            assert_eq!(series.points[0].x, layout.margin_left);
            assert!(series.points[0].y.is_finite());
        }
    }

    #[test]
    fn evenly_spaced_positions() {
        let layout = ChartLayout::with_size(460.0, 260.0);
        let readings = (0..5).map(|i| reading("t", 70 + i, 110)).collect();
        let projection = project(&vitals(readings), &layout);

        let xs: Vec<f64> = projection.series[0].points.iter().map(|p| p.x).collect();
        assert_eq!(xs, [40.0, 140.0, 240.0, 340.0, 440.0]);
    }

    #[test]
    fn axes_and_legend_metadata() {
        let layout = ChartLayout::with_size(300.0, 200.0);
        let projection = project(&NonEmpty::new(reading("09:00", 78, 120)), &layout);

        assert_eq!(
            projection.axes,
            [
                Point::new(40.0, 20.0),
                Point::new(40.0, 170.0),
                Point::new(280.0, 170.0)
            ]
        );

        let [hr, bp] = &projection.series;
        assert_eq!(hr.legend.label, "Heart Rate");
        assert_eq!(hr.legend.swatch.origin, Point::new(40.0, 12.0));
        assert_eq!(hr.legend.label_at, Point::new(52.0, 20.0));
        assert_eq!(bp.legend.label, "Systolic BP");
        assert_eq!(bp.legend.swatch.origin, Point::new(126.0, 12.0));
        assert_eq!(bp.color, "#2ad1b8");
        assert_eq!(projection.labels, ["09:00"]);
    }

    #[test]
    fn projection_is_deterministic() {
        let layout = ChartLayout::default();
        let input = vitals(vec![reading("a", 78, 120), reading("b", 82, 118), reading("c", 76, 115)]);
        assert_eq!(project(&input, &layout), project(&input, &layout));
    }
}
