//! Property-panel declarations.
//!
//! Describes each chart component's props as the visual controls a page
//! builder shows for them. Defaults come from the option structs so the
//! panel and the component always agree.

use crate::choice::Choice;
use crate::format::ValueFormat;
use crate::options::*;
use crate::ramp::{ColorDirection, ColorMode};
use crate::samples;
use serde::Serialize;

/// Panel widget for one prop
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PropControl {
    Text {
        default: String,
    },
    Boolean {
        default: bool,
    },
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        decimals: u8,
    },
    Variant {
        default: &'static str,
        options: Vec<&'static str>,
    },
    /// Element id attribute; has no default
    Id,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropDecl {
    pub key: &'static str,
    pub name: &'static str,
    pub group: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<&'static str>,
    pub control: PropControl,
}

impl PropDecl {
    fn new(key: &'static str, name: &'static str, group: &'static str, control: PropControl) -> Self {
        Self {
            key,
            name,
            group,
            tooltip: None,
            control,
        }
    }

    pub fn text(
        key: &'static str,
        name: &'static str,
        group: &'static str,
        default: impl Into<String>,
    ) -> Self {
        Self::new(key, name, group, PropControl::Text { default: default.into() })
    }

    pub fn boolean(key: &'static str, name: &'static str, group: &'static str, default: bool) -> Self {
        Self::new(key, name, group, PropControl::Boolean { default })
    }

    /// Whole-number input with no bounds; narrow it with [`PropDecl::range`]
    pub fn number(
        key: &'static str,
        name: &'static str,
        group: &'static str,
        default: Option<f64>,
    ) -> Self {
        Self::new(
            key,
            name,
            group,
            PropControl::Number {
                default,
                min: None,
                max: None,
                decimals: 0,
            },
        )
    }

    /// Picker offering every value of the choice enum
    pub fn variant<T: Choice>(
        key: &'static str,
        name: &'static str,
        group: &'static str,
        default: T,
    ) -> Self {
        Self::variant_subset(key, name, group, default, T::all())
    }

    /// Picker offering only `options`
    pub fn variant_subset<T: Choice>(
        key: &'static str,
        name: &'static str,
        group: &'static str,
        default: T,
        options: &[T],
    ) -> Self {
        Self::new(
            key,
            name,
            group,
            PropControl::Variant {
                default: default.as_str(),
                options: options.iter().map(|o| o.as_str()).collect(),
            },
        )
    }

    pub fn id(key: &'static str, name: &'static str, group: &'static str) -> Self {
        Self::new(key, name, group, PropControl::Id)
    }

    pub fn tooltip(mut self, text: &'static str) -> Self {
        self.tooltip = Some(text);
        self
    }

    pub fn range(mut self, lower: f64, upper: f64) -> Self {
        if let PropControl::Number { min, max, .. } = &mut self.control {
            *min = Some(lower);
            *max = Some(upper);
        }
        self
    }

    pub fn at_least(mut self, lower: f64) -> Self {
        if let PropControl::Number { min, .. } = &mut self.control {
            *min = Some(lower);
        }
        self
    }
}

/// One component as the page builder registers it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDeclaration {
    pub name: &'static str,
    pub description: &'static str,
    pub group: &'static str,
    pub props: Vec<PropDecl>,
    /// Charts measure the DOM, so server rendering is always off
    pub ssr: bool,
}

impl ComponentDeclaration {
    fn chart(name: &'static str, description: &'static str, props: Vec<PropDecl>) -> Self {
        Self {
            name,
            description,
            group: "Charts",
            props,
            ssr: false,
        }
    }

    pub fn prop(&self, key: &str) -> Option<&PropDecl> {
        self.props.iter().find(|p| p.key == key)
    }
}

// ============================================================================
// SHARED PROP GROUPS
// ============================================================================

const DATA: &str = "Data";
const CHART: &str = "Chart Configuration";
const COLOR: &str = "Color";
const FEATURES: &str = "Chart Features";
const FORMATTING: &str = "Value Formatting";
const DIMENSIONS: &str = "Dimensions";
const TOOLTIP: &str = "Tooltip";

fn data_prop(default: String, tooltip: &'static str) -> PropDecl {
    PropDecl::text("data", "Chart Data (JSON)", DATA, default).tooltip(tooltip)
}

fn height_prop(default: f64, lower: f64, upper: f64) -> PropDecl {
    PropDecl::number("height", "Chart Height", DIMENSIONS, Some(default))
        .range(lower, upper)
        .tooltip("Height of the chart in pixels")
}

fn format_props(
    format: ValueFormat,
    options: &[ValueFormat],
    symbol: &str,
    group: &'static str,
) -> [PropDecl; 2] {
    [
        PropDecl::variant_subset("valueFormat", "Value Format", group, format, options).tooltip(
            "Numbers get K/M suffixes, percent appends %, currency prefixes the symbol, multiplier appends x",
        ),
        PropDecl::text("currencySymbol", "Currency Symbol", group, symbol)
            .tooltip("Used when Value Format is currency"),
    ]
}

fn ramp_props(
    base_color: &str,
    mode: ColorMode,
    increment: f64,
    direction: ColorDirection,
) -> [PropDecl; 4] {
    [
        PropDecl::text("baseColor", "Base Color", COLOR, base_color).tooltip(
            "Base color for every series, or comma-separated colors assigned to series in order",
        ),
        PropDecl::variant("colorMode", "Color Mode", COLOR, mode)
            .tooltip("How series sharing the base color are told apart"),
        PropDecl::number("colorIncrement", "Color Increment", COLOR, Some(increment))
            .range(0.0, 100.0)
            .tooltip("Percent change per series, compounding; degrees per series for hue-rotate"),
        PropDecl::variant("colorDirection", "Color Direction", COLOR, direction),
    ]
}

fn axis_style_props(axis_line_color: &str, grid_color: &str) -> [PropDecl; 2] {
    [
        PropDecl::text("gridColor", "Grid Color", FEATURES, grid_color),
        PropDecl::text("axisLineColor", "Axis Line Color", FEATURES, axis_line_color),
    ]
}

fn axis_label_props(x: &str, y: &str) -> [PropDecl; 2] {
    [
        PropDecl::text("xAxisLabel", "X-Axis Label", FEATURES, x)
            .tooltip("Shown below the X axis. Leave empty to hide."),
        PropDecl::text("yAxisLabel", "Y-Axis Label", FEATURES, y)
            .tooltip("Shown along the Y axis. Leave empty to hide."),
    ]
}

fn tooltip_style_props(style: &TooltipStyle) -> [PropDecl; 9] {
    [
        PropDecl::text("tooltipBackgroundColor", "Tooltip Background", TOOLTIP, &style.tooltip_background_color),
        PropDecl::number("tooltipBorderRadius", "Tooltip Border Radius", TOOLTIP, Some(style.tooltip_border_radius))
            .range(0.0, 24.0),
        PropDecl::number("tooltipTitleFontSize", "Tooltip Title Font Size", TOOLTIP, Some(style.tooltip_title_font_size))
            .range(8.0, 32.0),
        PropDecl::number("tooltipValueFontSize", "Tooltip Value Font Size", TOOLTIP, Some(style.tooltip_value_font_size))
            .range(8.0, 48.0),
        PropDecl::boolean("tooltipShowSeriesName", "Show Series Name", TOOLTIP, style.tooltip_show_series_name),
        PropDecl::number("tooltipTitleFontWeight", "Title Font Weight", TOOLTIP, Some(style.tooltip_title_font_weight))
            .range(100.0, 900.0),
        PropDecl::number("tooltipValueFontWeight", "Value Font Weight", TOOLTIP, Some(style.tooltip_value_font_weight))
            .range(100.0, 900.0),
        PropDecl::text("tooltipTitleFontFamily", "Title Font Family", TOOLTIP, &style.tooltip_title_font_family)
            .tooltip("Use \"inherit\" to match the page font"),
        PropDecl::text("tooltipValueFontFamily", "Value Font Family", TOOLTIP, &style.tooltip_value_font_family),
    ]
}

fn id_prop() -> PropDecl {
    PropDecl::id("id", "Element ID", "Accessibility")
}

// ============================================================================
// COMPONENTS
// ============================================================================

pub fn bar_chart() -> ComponentDeclaration {
    let d = BarChartOptions::default();
    let mut props = vec![
        data_prop(
            samples::bar_chart_data(),
            "JSON array of objects. Every numeric field other than the X-axis key becomes a bar series.",
        ),
        PropDecl::text("xAxisKey", "X-Axis Key", DATA, &d.x_axis_key),
        PropDecl::variant("chartType", "Chart Type", CHART, d.chart_type)
            .tooltip("Column places series side by side, stacked piles them up"),
        PropDecl::text("baseColor", "Base Color", COLOR, &d.base_color),
        PropDecl::boolean("showCartesianGrid", "Show Grid", FEATURES, d.show_cartesian_grid),
        PropDecl::boolean("showXAxis", "Show X-Axis", FEATURES, d.show_x_axis),
        PropDecl::boolean("showYAxis", "Show Y-Axis", FEATURES, d.show_y_axis),
        PropDecl::boolean("showTooltip", "Show Tooltip", FEATURES, d.show_tooltip),
        PropDecl::boolean("showLegend", "Show Legend", FEATURES, d.show_legend),
        PropDecl::boolean("enableAnimation", "Enable Animation", FEATURES, d.enable_animation),
        PropDecl::text("gridStrokeDasharray", "Grid Pattern", FEATURES, &d.grid_stroke_dasharray)
            .tooltip("CSS stroke-dasharray for grid lines"),
        PropDecl::number("yAxisWidth", "Y-Axis Width", FEATURES, Some(d.y_axis_width)).range(30.0, 150.0),
    ];
    props.extend(format_props(
        d.value_format,
        &[ValueFormat::Number, ValueFormat::Percent, ValueFormat::Currency],
        &d.currency_symbol,
        FORMATTING,
    ));
    props.push(
        PropDecl::number("barRadius", "Bar Corner Radius", "Bar Styling", Some(d.bar_radius))
            .range(0.0, 50.0)
            .tooltip("Radius of the top corners of each bar"),
    );
    props.push(height_prop(d.height, 200.0, 1000.0));

    ComponentDeclaration::chart(
        "Bar Chart",
        "Column or stacked bar chart with auto-detected series and opacity steps",
        props,
    )
}

pub fn horizontal_bar_chart() -> ComponentDeclaration {
    let d = HorizontalBarChartOptions::default();
    let mut props = vec![
        data_prop(
            samples::horizontal_bar_chart_data(),
            "JSON array with 3 items, each with a label and a value",
        ),
        PropDecl::text("labelKey", "Label Key", DATA, &d.label_key),
        PropDecl::text("valueKey", "Value Key", DATA, &d.value_key),
        PropDecl::text("baseColor", "Base Color", COLOR, &d.base_color)
            .tooltip("Top bar at 50% opacity, middle at 75%, bottom at 100%"),
        PropDecl::boolean("showGrid", "Show Grid", FEATURES, d.show_grid),
        PropDecl::text("gridStrokeColor", "Grid Stroke Color", FEATURES, &d.grid_stroke_color),
        PropDecl::boolean("showXAxis", "Show Top Axis", FEATURES, d.show_x_axis),
        PropDecl::boolean("showYAxis", "Show Left Labels", FEATURES, d.show_y_axis),
        PropDecl::boolean("showLabels", "Show Value Labels", FEATURES, d.show_labels)
            .tooltip("Value labels at the end of each bar"),
        PropDecl::boolean("showTooltip", "Show Tooltip", FEATURES, d.show_tooltip),
        PropDecl::boolean("enableAnimation", "Enable Animation", FEATURES, d.enable_animation),
        PropDecl::number("yAxisWidth", "Left Label Width", FEATURES, Some(d.y_axis_width)).range(30.0, 150.0),
        PropDecl::number("minValue", "Min Value", "Value Range", d.min_value)
            .tooltip("Lower end of the value axis. Leave empty to derive it from the data."),
        PropDecl::number("maxValue", "Max Value", "Value Range", d.max_value)
            .tooltip("Upper end of the value axis. Leave empty to derive it from the data."),
    ];
    props.extend(format_props(
        d.value_format,
        &[ValueFormat::Percent, ValueFormat::Number, ValueFormat::Currency],
        &d.currency_symbol,
        "Value Range",
    ));
    props.extend([
        height_prop(d.height, 100.0, 500.0),
        PropDecl::number("barCategoryGap", "Bar Spacing", DIMENSIONS, Some(d.bar_category_gap))
            .range(0.0, 50.0),
        PropDecl::number("barRadius", "Bar Corner Radius", "Bar Styling", Some(d.bar_radius))
            .range(0.0, 50.0),
        PropDecl::number("labelFontWeight", "Label Font Weight", "Label Styling", Some(d.label_font_weight))
            .range(100.0, 900.0),
        PropDecl::text("labelColor", "Label Color", "Label Styling", &d.label_color),
    ]);

    ComponentDeclaration::chart(
        "Horizontal Bar Chart",
        "Three-bar horizontal chart with stepped opacity for year-over-year comparisons",
        props,
    )
}

pub fn line_chart() -> ComponentDeclaration {
    let d = LineChartOptions::default();
    let mut props = vec![
        data_prop(
            samples::line_chart_data(),
            "Every numeric key other than the X-axis key becomes a separate line",
        ),
        PropDecl::text("xAxisKey", "X-Axis Key", DATA, &d.x_axis_key),
        PropDecl::variant("chartType", "Chart Type", CHART, d.chart_type)
            .tooltip("Area fills under each line at 0.15 opacity"),
    ];
    props.extend(ramp_props(&d.base_color, d.color_mode, d.color_increment, d.color_direction));
    props.extend([
        PropDecl::number("strokeWidth", "Line Thickness", "Line Styling", Some(d.stroke_width)).range(1.0, 8.0),
        PropDecl::boolean("showDots", "Show Data Points", "Line Styling", d.show_dots),
        PropDecl::number("dotSize", "Dot Size", "Line Styling", Some(d.dot_size))
            .range(1.0, 8.0)
            .tooltip("Marker radius in pixels"),
        PropDecl::boolean("showCartesianGrid", "Show Grid", FEATURES, d.show_cartesian_grid),
        PropDecl::boolean("showXAxis", "Show X-Axis Ticks", FEATURES, d.show_x_axis),
        PropDecl::boolean("showYAxis", "Show Y-Axis Ticks", FEATURES, d.show_y_axis),
        PropDecl::boolean("showTooltip", "Show Tooltip", FEATURES, d.show_tooltip),
        PropDecl::boolean("showLegend", "Show Legend", FEATURES, d.show_legend),
        PropDecl::boolean("enableAnimation", "Enable Animation", FEATURES, d.enable_animation),
        PropDecl::text("gridStrokeDasharray", "Grid Pattern", FEATURES, &d.grid_stroke_dasharray),
    ]);
    props.extend(axis_style_props(&d.axis_line_color, &d.grid_color));
    props.extend(format_props(d.value_format, ValueFormat::ALL, &d.currency_symbol, FORMATTING));
    props.extend([
        PropDecl::number("maxValue", "Max Value", FEATURES, d.max_value)
            .at_least(0.0)
            .tooltip("Fixed top of the Y axis. Leave empty to auto-scale."),
        height_prop(d.height, 200.0, 1000.0),
        PropDecl::number("yAxisWidth", "Y-Axis Width", FEATURES, Some(d.y_axis_width)).range(30.0, 150.0),
    ]);
    props.extend(axis_label_props(&d.x_axis_label, &d.y_axis_label));
    props.extend(tooltip_style_props(&d.tooltip));
    props.push(id_prop());

    ComponentDeclaration::chart(
        "Line Chart",
        "Line or area chart with auto-detected series and color differentiation",
        props,
    )
}

pub fn pie_chart() -> ComponentDeclaration {
    let d = PieChartOptions::default();
    let mut props = vec![
        data_prop(samples::pie_chart_data(), "Up to 4 objects, each with a name and a value"),
        PropDecl::text("nameKey", "Name Key", DATA, &d.name_key),
        PropDecl::text("valueKey", "Value Key", DATA, &d.value_key),
        PropDecl::text("color1", "Color 1", "Colors", &d.color1),
        PropDecl::text("color2", "Color 2", "Colors", &d.color2),
        PropDecl::text("color3", "Color 3", "Colors", &d.color3),
        PropDecl::text("color4", "Color 4", "Colors", &d.color4),
        PropDecl::boolean("showTooltip", "Show Tooltip", FEATURES, d.show_tooltip),
        PropDecl::boolean("showLegend", "Show Legend", FEATURES, d.show_legend),
        PropDecl::boolean("enableAnimation", "Enable Animation", FEATURES, d.enable_animation),
    ];
    props.extend(format_props(
        d.value_format,
        &[ValueFormat::Number, ValueFormat::Percent, ValueFormat::Currency],
        &d.currency_symbol,
        FORMATTING,
    ));
    props.extend([
        PropDecl::number("innerRadius", "Inner Radius", "Pie Styling", Some(d.inner_radius))
            .range(0.0, 90.0)
            .tooltip("Percent of the available radius; 0 draws a full pie"),
        PropDecl::number("paddingAngle", "Padding Angle", "Pie Styling", Some(d.padding_angle))
            .range(0.0, 10.0),
        height_prop(d.height, 200.0, 800.0),
    ]);

    ComponentDeclaration::chart(
        "Pie Chart",
        "Pie or donut chart with up to 4 segments",
        props,
    )
}

pub fn scatter_chart() -> ComponentDeclaration {
    let d = ScatterChartOptions::default();
    let mut props = vec![
        data_prop(
            samples::scatter_chart_data(),
            "Objects with X and Y coordinates. Add a category field to split points into series.",
        ),
        PropDecl::text("xAxisKey", "X-Axis Key", DATA, &d.x_axis_key),
        PropDecl::text("yAxisKey", "Y-Axis Key", DATA, &d.y_axis_key),
        PropDecl::text("categoryKey", "Category Key (Optional)", DATA, &d.category_key)
            .tooltip("Groups points into one series per distinct value"),
        PropDecl::variant("chartType", "Chart Type", CHART, d.chart_type),
        PropDecl::text("sizeKey", "Size Key (Bubble)", CHART, &d.size_key)
            .tooltip("Field controlling point size in bubble mode"),
    ];
    props.extend(ramp_props(&d.base_color, d.color_mode, d.color_increment, d.color_direction));
    props.extend([
        PropDecl::number("pointSize", "Point Size", "Point Styling", Some(d.point_size))
            .range(10.0, 200.0)
            .tooltip("Symbol area in square pixels"),
        PropDecl::variant("pointShape", "Point Shape", "Point Styling", d.point_shape),
        PropDecl::boolean("showCartesianGrid", "Show Grid", FEATURES, d.show_cartesian_grid),
        PropDecl::boolean("showXAxis", "Show X-Axis Ticks", FEATURES, d.show_x_axis),
        PropDecl::boolean("showYAxis", "Show Y-Axis Ticks", FEATURES, d.show_y_axis),
        PropDecl::boolean("showTooltip", "Show Tooltip", FEATURES, d.show_tooltip),
        PropDecl::boolean("showLegend", "Show Legend", FEATURES, d.show_legend),
        PropDecl::boolean("enableAnimation", "Enable Animation", FEATURES, d.enable_animation),
        PropDecl::text("gridStrokeDasharray", "Grid Pattern", FEATURES, &d.grid_stroke_dasharray),
    ]);
    props.extend(axis_style_props(&d.axis_line_color, &d.grid_color));
    props.extend(format_props(d.value_format, ValueFormat::ALL, &d.currency_symbol, FORMATTING));
    props.extend([
        PropDecl::number("minXValue", "Min X Value", FEATURES, d.min_x_value),
        PropDecl::number("maxXValue", "Max X Value", FEATURES, d.max_x_value),
        PropDecl::number("minYValue", "Min Y Value", FEATURES, d.min_y_value),
        PropDecl::number("maxYValue", "Max Y Value", FEATURES, d.max_y_value),
        height_prop(d.height, 200.0, 1000.0),
        PropDecl::number("yAxisWidth", "Y-Axis Width", FEATURES, Some(d.y_axis_width)).range(30.0, 150.0),
    ]);
    props.extend(axis_label_props(&d.x_axis_label, &d.y_axis_label));
    props.extend(tooltip_style_props(&d.tooltip));
    props.push(id_prop());

    ComponentDeclaration::chart(
        "Scatter Chart",
        "Scatter or bubble chart with optional category series and configurable point shapes",
        props,
    )
}

pub fn all_declarations() -> Vec<ComponentDeclaration> {
    vec![
        bar_chart(),
        horizontal_bar_chart(),
        line_chart(),
        pie_chart(),
        scatter_chart(),
    ]
}

/// Every declaration as a pretty-printed JSON manifest
pub fn manifest_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_declarations())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};
    use std::collections::HashSet;

    /// Prop bag holding every declared default
    fn default_bag(decl: &ComponentDeclaration) -> String {
        let mut bag = Map::new();
        for prop in &decl.props {
            let value = match &prop.control {
                PropControl::Text { default } => json!(default),
                PropControl::Boolean { default } => json!(default),
                PropControl::Number { default: Some(v), .. } => json!(v),
                PropControl::Variant { default, .. } => json!(default),
                PropControl::Number { default: None, .. } | PropControl::Id => continue,
            };
            bag.insert(prop.key.to_string(), value);
        }
        Value::Object(bag).to_string()
    }

    #[test]
    fn test_declared_defaults_match_options() {
        let bar: BarChartOptions = parse_props(&default_bag(&bar_chart())).unwrap();
        assert_eq!(bar, BarChartOptions::default());

        let hbar: HorizontalBarChartOptions =
            parse_props(&default_bag(&horizontal_bar_chart())).unwrap();
        assert_eq!(hbar, HorizontalBarChartOptions::default());

        let line: LineChartOptions = parse_props(&default_bag(&line_chart())).unwrap();
        assert_eq!(line, LineChartOptions::default());

        let pie: PieChartOptions = parse_props(&default_bag(&pie_chart())).unwrap();
        assert_eq!(pie, PieChartOptions::default());

        let scatter: ScatterChartOptions = parse_props(&default_bag(&scatter_chart())).unwrap();
        assert_eq!(scatter, ScatterChartOptions::default());
    }

    #[test]
    fn test_keys_unique() {
        for decl in all_declarations() {
            let mut seen = HashSet::new();
            for prop in &decl.props {
                assert!(seen.insert(prop.key), "{} declares {} twice", decl.name, prop.key);
            }
        }
    }

    #[test]
    fn test_variant_defaults_are_offered() {
        for decl in all_declarations() {
            for prop in &decl.props {
                if let PropControl::Variant { default, options } = &prop.control {
                    assert!(options.contains(default), "{}.{}", decl.name, prop.key);
                }
            }
        }
    }

    #[test]
    fn test_color_mode_offers_every_mode() {
        let line = line_chart();
        let Some(PropControl::Variant { options, .. }) = line.prop("colorMode").map(|p| &p.control)
        else {
            panic!("colorMode is not a variant");
        };
        assert_eq!(
            options,
            &vec!["opacity", "brightness", "contrast", "saturation", "hue-rotate", "none"]
        );
    }

    #[test]
    fn test_optional_numbers_have_no_default() {
        let scatter = scatter_chart();
        assert_eq!(
            scatter.prop("minXValue").map(|p| &p.control),
            Some(&PropControl::Number {
                default: None,
                min: None,
                max: None,
                decimals: 0,
            })
        );
    }

    #[test]
    fn test_manifest_json() {
        let manifest = manifest_json().unwrap();
        let parsed: Value = serde_json::from_str(&manifest).unwrap();
        let charts = parsed.as_array().unwrap();
        assert_eq!(charts.len(), 5);
        assert_eq!(charts[0]["name"], "Bar Chart");
        assert_eq!(charts[0]["ssr"], false);
        assert_eq!(charts[2]["props"][0]["control"]["type"], "Text");
    }
}
