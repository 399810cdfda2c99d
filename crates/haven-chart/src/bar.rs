use std::fmt;

use haven_core::analytics::SalesPoint;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::ChartError;

pub const DEFAULT_HEIGHT: u32 = 300;
pub const MIN_WIDTH: u32 = 160;
/// Widest chart drawn; pixel coordinates must stay well inside `i32`.
pub const MAX_WIDTH: u32 = 4096;

/// Fraction of each column left empty on either side of its bar.
const BAR_GAP: f64 = 0.15;

const BAR_COLOR: RGBColor = RGBColor(136, 132, 216);
const GRID_COLOR: RGBColor = RGBColor(224, 224, 224);
const AXIS_COLOR: RGBColor = RGBColor(102, 102, 102);
const TEXT_COLOR: RGBColor = RGBColor(68, 68, 68);

/// The `(month, sales)` pair shown for the column under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub month: String,
    pub sales: f64,
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.month, self.sales)
    }
}

/// Pixel placement of one bar and of the column it sits in.
///
/// `sales` is the value as given by the caller; `top` reflects the clamped
/// value actually drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub month: String,
    pub sales: f64,
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
    pub column_left: i32,
    pub column_right: i32,
    pub column_top: i32,
}

impl BarGeometry {
    fn column_contains(&self, x: i32, y: i32) -> bool {
        x >= self.column_left && x < self.column_right && y >= self.column_top && y <= self.bottom
    }

    pub fn tooltip(&self) -> Tooltip {
        Tooltip {
            month: self.month.clone(),
            sales: self.sales,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub svg: String,
    pub bars: Vec<BarGeometry>,
    pub width: u32,
    pub height: u32,
}

impl RenderedChart {
    /// Tooltip for the column under pixel `(x, y)`, if any.
    pub fn tooltip_at(&self, x: i32, y: i32) -> Option<Tooltip> {
        self.bars
            .iter()
            .find(|bar| bar.column_contains(x, y))
            .map(BarGeometry::tooltip)
    }
}

/// Bar chart of a sales time series: one bar per point, in input order.
#[derive(Debug, Clone, Copy)]
pub struct SalesBarChart {
    height: u32,
}

impl Default for SalesBarChart {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
        }
    }
}

impl SalesBarChart {
    pub fn with_height(height: u32) -> Self {
        Self { height }
    }

    /// Draw `data` into an SVG as wide as the container, clamped to
    /// [`MIN_WIDTH`]..=[`MAX_WIDTH`]. Negative or non-finite sales are drawn as
    /// empty bars.
    pub fn render(
        &self,
        data: &[SalesPoint],
        container_width: u32,
    ) -> Result<RenderedChart, ChartError> {
        let width = container_width.clamp(MIN_WIDTH, MAX_WIDTH);
        let height = self.height;
        let values: Vec<f64> = data.iter().map(|p| clamp_sales(p.sales)).collect();
        let slots = data.len().max(1) as f64;
        let y_max = nice_ceiling(values.iter().copied().fold(0.0, f64::max));

        let mut svg = String::new();
        let bars = {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .margin(16)
                .x_label_area_size(32)
                .y_label_area_size(56)
                .build_cartesian_2d(0f64..slots, 0f64..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .y_labels(6)
                .axis_style(ShapeStyle::from(&AXIS_COLOR).stroke_width(1))
                .light_line_style(ShapeStyle::from(&GRID_COLOR).stroke_width(1))
                .bold_line_style(ShapeStyle::from(&GRID_COLOR).stroke_width(1))
                .x_label_formatter(&|_| String::new())
                .y_label_formatter(&|y| format_tick(*y))
                .y_label_style(("sans-serif", 12).into_font().color(&TEXT_COLOR))
                .draw()?;

            chart.draw_series(values.iter().enumerate().map(|(i, &sales)| {
                let i = i as f64;
                Rectangle::new(
                    [(i + BAR_GAP, 0.0), (i + 1.0 - BAR_GAP, sales)],
                    BAR_COLOR.filled(),
                )
            }))?;

            let label_style = ("sans-serif", 12)
                .into_font()
                .color(&TEXT_COLOR)
                .pos(Pos::new(HPos::Center, VPos::Top));

            let mut bars = Vec::with_capacity(data.len());
            for (i, (point, &sales)) in data.iter().zip(&values).enumerate() {
                let i = i as f64;
                let (left, top) = chart.backend_coord(&(i + BAR_GAP, sales));
                let (right, bottom) = chart.backend_coord(&(i + 1.0 - BAR_GAP, 0.0));
                let (column_left, column_top) = chart.backend_coord(&(i, y_max));
                let (column_right, _) = chart.backend_coord(&(i + 1.0, 0.0));

                let (label_x, _) = chart.backend_coord(&(i + 0.5, 0.0));
                root.draw(&Text::new(
                    point.month.clone(),
                    (label_x, bottom + 6),
                    label_style.clone(),
                ))?;

                bars.push(BarGeometry {
                    month: point.month.clone(),
                    sales: point.sales,
                    left,
                    right,
                    top,
                    bottom,
                    column_left,
                    column_right,
                    column_top,
                });
            }

            root.present()?;
            bars
        };

        debug!(bars = bars.len(), width, height, "Rendered sales chart");

        Ok(RenderedChart {
            svg,
            bars,
            width,
            height,
        })
    }
}

fn clamp_sales(sales: f64) -> f64 {
    if sales.is_finite() && sales > 0.0 {
        sales
    } else {
        0.0
    }
}

/// Smallest 1/2/5 × 10ⁿ value at or above `max`, so grid lines land on round
/// numbers. An all-zero series still gets a unit axis. The result is always
/// finite: near `f64::MAX` the axis ends at `max` itself.
fn nice_ceiling(max: f64) -> f64 {
    if max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(max.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate >= max && candidate.is_finite())
        .unwrap_or(max)
}

/// Tick labels: integers with thousands separators, fractions to one place.
fn format_tick(value: f64) -> String {
    if value.fract().abs() > f64::EPSILON {
        return format!("{value:.1}");
    }
    let digits = (value as i64).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
