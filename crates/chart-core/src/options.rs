//! Typed option surfaces for each chart family.
//!
//! Hosts hand components a camelCase prop bag. Each family deserialises it
//! into its own options struct; missing props take the defaults below and
//! unknown enumerated values are rejected.

use crate::domain::DomainBounds;
use crate::format::{ValueFormat, ValueFormatter};
use crate::ramp::{ColorDirection, ColorMode, RampSpec};
use crate::{colors, ChartError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Deserialise a host prop bag into an options struct
pub fn parse_props<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(ChartError::InvalidOptions)
}

// ============================================================================
// CHOICES
// ============================================================================

choice_enum! {
    /// Bar chart layout
    pub enum BarLayout ("bar chart type") {
        /// Series side by side; emphasis varies per row
        Column => "column",
        /// Series stacked; emphasis varies per series
        Stacked => "stacked",
    }
    default = Column;
}

choice_enum! {
    pub enum LineKind ("line chart type") {
        Line => "line",
        Area => "area",
    }
    default = Line;
}

choice_enum! {
    pub enum ScatterKind ("scatter chart type") {
        Scatter => "scatter",
        /// Point area follows the size key
        Bubble => "bubble",
    }
    default = Scatter;
}

choice_enum! {
    pub enum PointShape ("point shape") {
        Circle => "circle",
        Square => "square",
        Triangle => "triangle",
        Diamond => "diamond",
    }
    default = Circle;
}

// ============================================================================
// LENIENT NUMBERS
// ============================================================================

/// Optional numeric props may arrive unset as `""` or `null`
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn optional_number<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok().filter(|v: &f64| v.is_finite()),
            _ => None,
        })
    }
}

// ============================================================================
// TOOLTIP STYLE
// ============================================================================

/// Custom tooltip styling shared by the line and scatter families
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipStyle {
    pub tooltip_background_color: String,
    pub tooltip_border_radius: f64,
    pub tooltip_title_font_size: f64,
    pub tooltip_value_font_size: f64,
    pub tooltip_show_series_name: bool,
    pub tooltip_title_font_weight: f64,
    pub tooltip_value_font_weight: f64,
    pub tooltip_title_font_family: String,
    pub tooltip_value_font_family: String,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            tooltip_background_color: colors::TOOLTIP_BG.to_string(),
            tooltip_border_radius: 8.0,
            tooltip_title_font_size: 14.0,
            tooltip_value_font_size: 20.0,
            tooltip_show_series_name: true,
            tooltip_title_font_weight: 700.0,
            tooltip_value_font_weight: 700.0,
            tooltip_title_font_family: "inherit".to_string(),
            tooltip_value_font_family: "inherit".to_string(),
        }
    }
}

impl TooltipStyle {
    /// Compact style for the bar and pie families, which have no tooltip props
    pub fn plain() -> Self {
        Self {
            tooltip_border_radius: 4.0,
            tooltip_title_font_size: 12.0,
            tooltip_value_font_size: 14.0,
            tooltip_show_series_name: true,
            tooltip_title_font_weight: 400.0,
            tooltip_value_font_weight: 400.0,
            ..Self::default()
        }
    }
}

// ============================================================================
// BAR CHART
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarChartOptions {
    pub x_axis_key: String,
    pub chart_type: BarLayout,
    pub base_color: String,
    pub bar_radius: f64,
    pub show_cartesian_grid: bool,
    pub show_x_axis: bool,
    pub show_y_axis: bool,
    pub show_tooltip: bool,
    pub show_legend: bool,
    pub enable_animation: bool,
    pub value_format: ValueFormat,
    pub currency_symbol: String,
    pub grid_stroke_dasharray: String,
    pub height: f64,
    pub y_axis_width: f64,
}

impl Default for BarChartOptions {
    fn default() -> Self {
        Self {
            x_axis_key: "name".to_string(),
            chart_type: BarLayout::Column,
            base_color: colors::BAR_BASE.to_string(),
            bar_radius: 10.0,
            show_cartesian_grid: true,
            show_x_axis: true,
            show_y_axis: true,
            show_tooltip: true,
            show_legend: true,
            enable_animation: true,
            value_format: ValueFormat::Number,
            currency_symbol: "$".to_string(),
            grid_stroke_dasharray: "3 3".to_string(),
            height: 400.0,
            y_axis_width: 60.0,
        }
    }
}

impl BarChartOptions {
    pub fn formatter(&self) -> ValueFormatter {
        ValueFormatter::new(self.value_format, self.currency_symbol.clone())
    }
}

// ============================================================================
// HORIZONTAL BAR CHART
// ============================================================================

/// Number of bars the horizontal bar chart always shows
pub const HORIZONTAL_BAR_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HorizontalBarChartOptions {
    pub label_key: String,
    pub value_key: String,
    pub base_color: String,
    pub show_grid: bool,
    pub show_x_axis: bool,
    pub show_y_axis: bool,
    pub show_labels: bool,
    pub show_tooltip: bool,
    pub enable_animation: bool,
    pub grid_stroke_color: String,
    pub value_format: ValueFormat,
    pub currency_symbol: String,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub min_value: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub max_value: Option<f64>,
    pub height: f64,
    pub bar_category_gap: f64,
    pub bar_radius: f64,
    pub y_axis_width: f64,
    pub label_font_weight: f64,
    pub label_color: String,
}

impl Default for HorizontalBarChartOptions {
    fn default() -> Self {
        Self {
            label_key: "label".to_string(),
            value_key: "value".to_string(),
            base_color: colors::HORIZONTAL_BAR_BASE.to_string(),
            show_grid: true,
            show_x_axis: true,
            show_y_axis: true,
            show_labels: true,
            show_tooltip: true,
            enable_animation: true,
            grid_stroke_color: colors::GRID_LIGHT.to_string(),
            value_format: ValueFormat::Number,
            currency_symbol: "£".to_string(),
            min_value: None,
            max_value: None,
            height: 160.0,
            bar_category_gap: 4.0,
            bar_radius: 8.0,
            y_axis_width: 50.0,
            label_font_weight: 600.0,
            label_color: "currentColor".to_string(),
        }
    }
}

impl HorizontalBarChartOptions {
    pub fn formatter(&self) -> ValueFormatter {
        ValueFormatter::new(self.value_format, self.currency_symbol.clone())
    }

    pub fn bounds(&self) -> DomainBounds {
        DomainBounds::new(self.min_value, self.max_value)
    }
}

// ============================================================================
// LINE CHART
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineChartOptions {
    pub x_axis_key: String,
    pub chart_type: LineKind,
    pub base_color: String,
    pub color_mode: ColorMode,
    pub color_increment: f64,
    pub color_direction: ColorDirection,
    pub stroke_width: f64,
    pub show_dots: bool,
    pub dot_size: f64,
    pub show_cartesian_grid: bool,
    pub show_x_axis: bool,
    pub show_y_axis: bool,
    pub show_tooltip: bool,
    pub show_legend: bool,
    pub enable_animation: bool,
    pub value_format: ValueFormat,
    pub currency_symbol: String,
    pub grid_stroke_dasharray: String,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub max_value: Option<f64>,
    pub height: f64,
    pub y_axis_width: f64,
    pub x_axis_label: String,
    pub y_axis_label: String,
    #[serde(flatten)]
    pub tooltip: TooltipStyle,
    pub axis_line_color: String,
    pub grid_color: String,
    pub id: Option<String>,
}

impl Default for LineChartOptions {
    fn default() -> Self {
        Self {
            x_axis_key: "name".to_string(),
            chart_type: LineKind::Line,
            base_color: colors::BAR_BASE.to_string(),
            color_mode: ColorMode::Opacity,
            color_increment: 25.0,
            color_direction: ColorDirection::FirstToLast,
            stroke_width: 2.0,
            show_dots: true,
            dot_size: 4.0,
            show_cartesian_grid: true,
            show_x_axis: true,
            show_y_axis: true,
            show_tooltip: true,
            show_legend: true,
            enable_animation: true,
            value_format: ValueFormat::Number,
            currency_symbol: "£".to_string(),
            grid_stroke_dasharray: "3 3".to_string(),
            max_value: None,
            height: 400.0,
            y_axis_width: 60.0,
            x_axis_label: String::new(),
            y_axis_label: String::new(),
            tooltip: TooltipStyle::default(),
            axis_line_color: colors::AXIS_LINE.to_string(),
            grid_color: colors::GRID.to_string(),
            id: None,
        }
    }
}

impl LineChartOptions {
    pub fn formatter(&self) -> ValueFormatter {
        ValueFormatter::new(self.value_format, self.currency_symbol.clone())
    }

    pub fn ramp(&self) -> RampSpec {
        RampSpec {
            mode: self.color_mode,
            increment: self.color_increment,
            direction: self.color_direction,
        }
    }
}

// ============================================================================
// PIE CHART
// ============================================================================

/// Maximum number of slices the pie chart draws
pub const PIE_MAX_SLICES: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PieChartOptions {
    pub name_key: String,
    pub value_key: String,
    pub color1: String,
    pub color2: String,
    pub color3: String,
    pub color4: String,
    pub show_tooltip: bool,
    pub show_legend: bool,
    pub enable_animation: bool,
    pub value_format: ValueFormat,
    pub currency_symbol: String,
    /// Percentage of the maximum radius
    pub inner_radius: f64,
    /// Degrees between slices
    pub padding_angle: f64,
    pub height: f64,
}

impl Default for PieChartOptions {
    fn default() -> Self {
        Self {
            name_key: "name".to_string(),
            value_key: "value".to_string(),
            color1: colors::PIE[0].to_string(),
            color2: colors::PIE[1].to_string(),
            color3: colors::PIE[2].to_string(),
            color4: colors::PIE[3].to_string(),
            show_tooltip: true,
            show_legend: true,
            enable_animation: true,
            value_format: ValueFormat::Number,
            currency_symbol: "$".to_string(),
            inner_radius: 60.0,
            padding_angle: 2.0,
            height: 400.0,
        }
    }
}

impl PieChartOptions {
    pub fn formatter(&self) -> ValueFormatter {
        ValueFormatter::new(self.value_format, self.currency_symbol.clone())
    }

    pub fn palette(&self) -> [&str; PIE_MAX_SLICES] {
        [&self.color1, &self.color2, &self.color3, &self.color4]
    }
}

// ============================================================================
// SCATTER CHART
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScatterChartOptions {
    pub x_axis_key: String,
    pub y_axis_key: String,
    /// Groups rows into one series per distinct value; empty means one series
    pub category_key: String,
    pub chart_type: ScatterKind,
    pub size_key: String,
    pub base_color: String,
    pub color_mode: ColorMode,
    pub color_increment: f64,
    pub color_direction: ColorDirection,
    /// Symbol area in square pixels
    pub point_size: f64,
    pub point_shape: PointShape,
    pub show_cartesian_grid: bool,
    pub show_x_axis: bool,
    pub show_y_axis: bool,
    pub show_tooltip: bool,
    pub show_legend: bool,
    pub enable_animation: bool,
    pub value_format: ValueFormat,
    pub currency_symbol: String,
    pub grid_stroke_dasharray: String,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub min_x_value: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub max_x_value: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub min_y_value: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub max_y_value: Option<f64>,
    pub height: f64,
    pub y_axis_width: f64,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub axis_line_color: String,
    pub grid_color: String,
    #[serde(flatten)]
    pub tooltip: TooltipStyle,
    pub id: Option<String>,
}

impl Default for ScatterChartOptions {
    fn default() -> Self {
        Self {
            x_axis_key: "x".to_string(),
            y_axis_key: "y".to_string(),
            category_key: String::new(),
            chart_type: ScatterKind::Scatter,
            size_key: "z".to_string(),
            base_color: colors::BAR_BASE.to_string(),
            color_mode: ColorMode::Opacity,
            color_increment: 25.0,
            color_direction: ColorDirection::FirstToLast,
            point_size: 60.0,
            point_shape: PointShape::Circle,
            show_cartesian_grid: true,
            show_x_axis: true,
            show_y_axis: true,
            show_tooltip: true,
            show_legend: true,
            enable_animation: true,
            value_format: ValueFormat::Number,
            currency_symbol: "£".to_string(),
            grid_stroke_dasharray: "3 3".to_string(),
            min_x_value: None,
            max_x_value: None,
            min_y_value: None,
            max_y_value: None,
            height: 400.0,
            y_axis_width: 60.0,
            x_axis_label: String::new(),
            y_axis_label: String::new(),
            axis_line_color: colors::AXIS_LINE.to_string(),
            grid_color: colors::GRID.to_string(),
            tooltip: TooltipStyle::default(),
            id: None,
        }
    }
}

impl ScatterChartOptions {
    pub fn formatter(&self) -> ValueFormatter {
        ValueFormatter::new(self.value_format, self.currency_symbol.clone())
    }

    pub fn ramp(&self) -> RampSpec {
        RampSpec {
            mode: self.color_mode,
            increment: self.color_increment,
            direction: self.color_direction,
        }
    }

    pub fn x_bounds(&self) -> DomainBounds {
        DomainBounds::new(self.min_x_value, self.max_x_value)
    }

    pub fn y_bounds(&self) -> DomainBounds {
        DomainBounds::new(self.min_y_value, self.max_y_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bag_uses_defaults() {
        let opts: BarChartOptions = parse_props("{}").unwrap();
        assert_eq!(opts, BarChartOptions::default());
    }

    #[test]
    fn test_camel_case_props() {
        let opts: BarChartOptions =
            parse_props(r#"{"xAxisKey":"month","chartType":"stacked","barRadius":4}"#).unwrap();
        assert_eq!(opts.x_axis_key, "month");
        assert_eq!(opts.chart_type, BarLayout::Stacked);
        assert_eq!(opts.bar_radius, 4.0);
        assert_eq!(opts.height, 400.0);
    }

    #[test]
    fn test_unknown_choice_rejected() {
        let err = parse_props::<LineChartOptions>(r#"{"colorMode":"sepia"}"#).unwrap_err();
        assert!(matches!(err, ChartError::InvalidOptions(_)));
        assert!(err.to_string().contains("sepia"));
    }

    #[test]
    fn test_blank_numbers_are_unset() {
        let opts: LineChartOptions = parse_props(r#"{"maxValue":""}"#).unwrap();
        assert_eq!(opts.max_value, None);

        let opts: LineChartOptions = parse_props(r#"{"maxValue":"120"}"#).unwrap();
        assert_eq!(opts.max_value, Some(120.0));

        let opts: ScatterChartOptions =
            parse_props(r#"{"minXValue":null,"maxXValue":50}"#).unwrap();
        assert_eq!(opts.x_bounds(), DomainBounds::new(None, Some(50.0)));
    }

    #[test]
    fn test_flattened_tooltip_style() {
        let opts: ScatterChartOptions =
            parse_props(r##"{"tooltipBackgroundColor":"#222","tooltipShowSeriesName":false}"##)
                .unwrap();
        assert_eq!(opts.tooltip.tooltip_background_color, "#222");
        assert!(!opts.tooltip.tooltip_show_series_name);
        assert_eq!(opts.tooltip.tooltip_value_font_size, 20.0);
    }

    #[test]
    fn test_ramp_from_options() {
        let opts: LineChartOptions = parse_props(
            r#"{"colorMode":"hue-rotate","colorIncrement":40,"colorDirection":"last-to-first"}"#,
        )
        .unwrap();
        assert_eq!(
            opts.ramp(),
            RampSpec {
                mode: ColorMode::HueRotate,
                increment: 40.0,
                direction: ColorDirection::LastToFirst,
            }
        );
    }

    #[test]
    fn test_pie_palette() {
        let opts = PieChartOptions::default();
        assert_eq!(opts.palette(), colors::PIE);
    }
}
