//! # chart-kit
//!
//! D3.js-style SVG chart components built with Leptos.
//! Each chart family turns a JSON data string plus typed options into SVG.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Scale computation (linear, band)
//! - Path generation (line, monotone curve)
//!
//! Every chart splits into a pure scene builder (`build_*_scene`) that does
//! all the geometry, and a thin component that renders the scene.
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: scales, paths, shapes
//! - `common` - Grid, axes, legend, tooltip and empty state
//! - `bar` - Column and stacked bar charts
//! - `horizontal_bar` - Three-bar horizontal comparison chart
//! - `line` - Line and area charts
//! - `pie` - Pie and donut charts
//! - `scatter` - Scatter and bubble charts

pub mod bar;
pub mod chartkit;
pub mod common;
pub mod horizontal_bar;
pub mod line;
pub mod pie;
pub mod scatter;

pub use bar::*;
pub use chartkit::*;
pub use common::*;
pub use horizontal_bar::*;
pub use line::*;
pub use pie::*;
pub use scatter::*;

pub use chart_core::colors;

/// Width of every chart's viewBox; the SVG scales to its container
pub const VIEWBOX_WIDTH: f64 = 800.0;

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Room for a left value axis and a bottom category axis
    pub fn cartesian(y_axis_width: f64, show_x_axis: bool, x_axis_label: bool) -> Self {
        let axis = if show_x_axis { 30.0 } else { 10.0 };
        let label = if x_axis_label { 20.0 } else { 0.0 };
        let bottom = axis + label;
        Self::new(10.0, 16.0, bottom, y_axis_width)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner height (excluding margins)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// SVG transform for inner chart area
    pub fn inner_transform(&self) -> String {
        format!("translate({}, {})", self.margin.left, self.margin.top)
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(VIEWBOX_WIDTH, 400.0)
    }
}

/// Height of the HTML legend row under cartesian charts
pub const LEGEND_HEIGHT: f64 = 28.0;

/// SVG height left for the plot once the legend row is reserved
pub fn plot_height(height: f64, show_legend: bool) -> f64 {
    if show_legend {
        (height - LEGEND_HEIGHT).max(0.0)
    } else {
        height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_size() {
        let dims = ChartDimensions::new(800.0, 400.0).with_margin(ChartMargin::new(10.0, 16.0, 30.0, 60.0));
        assert_eq!(dims.inner_width(), 724.0);
        assert_eq!(dims.inner_height(), 360.0);
        assert_eq!(dims.inner_transform(), "translate(60, 10)");
        assert_eq!(dims.viewbox(), "0 0 800 400");
    }

    #[test]
    fn test_inner_size_never_negative() {
        let dims = ChartDimensions::new(40.0, 20.0).with_margin(ChartMargin::uniform(30.0));
        assert_eq!(dims.inner_width(), 0.0);
        assert_eq!(dims.inner_height(), 0.0);
    }

    #[test]
    fn test_cartesian_margin() {
        assert_eq!(ChartMargin::cartesian(60.0, true, false).bottom, 30.0);
        assert_eq!(ChartMargin::cartesian(60.0, true, true).bottom, 50.0);
        assert_eq!(ChartMargin::cartesian(60.0, false, false).left, 60.0);
    }

    #[test]
    fn test_plot_height() {
        assert_eq!(plot_height(400.0, true), 372.0);
        assert_eq!(plot_height(400.0, false), 400.0);
    }
}
