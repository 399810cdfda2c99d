//! Sales-over-time bar chart, drawn to SVG with plotters.

mod bar;

pub use bar::{BarGeometry, RenderedChart, SalesBarChart, Tooltip, DEFAULT_HEIGHT, MAX_WIDTH, MIN_WIDTH};

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart drawing failed: {0}")]
    Drawing(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(e.to_string())
    }
}
