//! Three-bar horizontal comparison chart
//!
//! Always draws exactly [`HORIZONTAL_BAR_ROWS`] bars: extra rows are dropped
//! and missing ones are padded with blank zero bars. The bars get lighter
//! from bottom to top.

use crate::{
    chartkit::{rounded_rect_path, value_ticks, LinearScale, Scale, Tick},
    common::*,
    ChartDimensions, ChartMargin, VIEWBOX_WIDTH,
};
use chart_core::{
    calculate_domain, coerce_number, label_of, samples, step_ladder, try_load_records, Domain,
    HorizontalBarChartOptions, NumberFormatter, Record, TooltipStyle, HORIZONTAL_BAR_ROWS,
};
use leptos::prelude::*;

const X_TICK_COUNT: usize = 5;

pub const NO_ROWS_MESSAGE: &str = "No data available. Please provide valid JSON data with 3 items.";
/// Space between a bar's end and its value label
const LABEL_OFFSET: f64 = 5.0;
/// Room on the right for value labels
const LABEL_ROOM: f64 = 50.0;

/// One bar with its label and tooltip
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalBarRow {
    pub label: String,
    pub value: f64,
    pub path: String,
    pub opacity: f64,
    /// Top of the row's band
    pub band_y: f64,
    pub band_height: f64,
    pub value_label: String,
    pub label_x: f64,
    pub label_y: f64,
    pub label_anchor: &'static str,
    pub tooltip: TooltipContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalBarScene {
    pub dims: ChartDimensions,
    pub domain: Domain,
    pub rows: Vec<HorizontalBarRow>,
    pub x_ticks: Vec<Tick>,
    pub category_ticks: Vec<Tick>,
    /// x position of the zero reference line, when the domain crosses zero
    pub zero_line: Option<f64>,
}

/// Label and numeric value of each of the three rows
fn normalise_rows(records: &[Record], options: &HorizontalBarChartOptions) -> Vec<(String, f64)> {
    let mut rows: Vec<(String, f64)> = records
        .iter()
        .take(HORIZONTAL_BAR_ROWS)
        .map(|record| {
            let value = coerce_number(record.get(&options.value_key));
            (
                label_of(record.get(&options.label_key)),
                if value.is_finite() { value } else { 0.0 },
            )
        })
        .collect();
    rows.resize(HORIZONTAL_BAR_ROWS, (String::new(), 0.0));
    rows
}

/// Lay out the chart. An empty record list still yields three blank bars.
pub fn build_horizontal_bar_scene(
    records: &[Record],
    options: &HorizontalBarChartOptions,
) -> HorizontalBarScene {
    let rows = normalise_rows(records, options);
    let values: Vec<f64> = rows.iter().map(|(_, v)| *v).collect();
    let domain = calculate_domain(&values, options.bounds());

    let margin = ChartMargin::new(
        if options.show_x_axis { 24.0 } else { 5.0 },
        LABEL_ROOM,
        5.0,
        if options.show_y_axis { options.y_axis_width } else { 5.0 },
    );
    let dims = ChartDimensions::new(VIEWBOX_WIDTH, options.height).with_margin(margin);
    let (width, height) = (dims.inner_width(), dims.inner_height());

    let x = LinearScale::new().domain(domain.min, domain.max).range(0.0, width);
    let baseline = x.scale(domain.baseline());

    let step = height / HORIZONTAL_BAR_ROWS as f64;
    let gap = options.bar_category_gap.max(0.0).min(step / 2.0);
    let thickness = (step - gap * 2.0).max(1.0);
    let radius = options.bar_radius.max(0.0);
    let ladder = step_ladder(HORIZONTAL_BAR_ROWS);
    let formatter = options.formatter();

    let rows: Vec<HorizontalBarRow> = rows
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let band_y = i as f64 * step;
            let top = band_y + gap;
            let end = x.scale(value);
            let positive = value >= 0.0;
            // Round the end away from the baseline
            let corners = if positive {
                [0.0, radius, radius, 0.0]
            } else {
                [radius, 0.0, 0.0, radius]
            };
            let value_label = formatter.format(value);

            HorizontalBarRow {
                path: rounded_rect_path(baseline.min(end), top, (end - baseline).abs(), thickness, corners),
                opacity: ladder[i],
                band_y,
                band_height: step,
                label_x: if positive { end + LABEL_OFFSET } else { end - LABEL_OFFSET },
                label_y: top + thickness / 2.0,
                label_anchor: if positive { "start" } else { "end" },
                tooltip: TooltipContent {
                    title: label.clone(),
                    rows: vec![TooltipRow {
                        name: String::new(),
                        value: value_label.clone(),
                        color: options.base_color.clone(),
                    }],
                },
                value_label,
                label,
                value,
            }
        })
        .collect();

    let category_ticks = rows
        .iter()
        .map(|row| Tick {
            position: row.label_y,
            label: row.label.clone(),
        })
        .collect();

    HorizontalBarScene {
        dims,
        domain,
        x_ticks: value_ticks(&x, X_TICK_COUNT, |v| formatter.format(v)),
        category_ticks,
        zero_line: domain.straddles_zero().then(|| x.scale(0.0)),
        rows,
    }
}

// ============================================================================
// COMPONENT
// ============================================================================

/// Horizontal bar chart component
#[component]
pub fn HorizontalBarChart(
    /// JSON array of `{label, value}` records
    #[prop(into)]
    data: Signal<String>,
    #[prop(optional)] options: Option<HorizontalBarChartOptions>,
) -> impl IntoView {
    let options = options.unwrap_or_default();
    let records = Memo::new(move |_| try_load_records(&data.get()));
    let scene = {
        let options = options.clone();
        Memo::new(move |_| {
            records.with(|records| {
                records
                    .as_ref()
                    .map(|records| build_horizontal_bar_scene(records, &options))
            })
        })
    };

    let hover = HoverState::new();
    let tooltip = Signal::derive(move || {
        let row = hover.active.get()?;
        scene.with(|scene| {
            scene
                .as_ref()
                .and_then(|s| s.rows.get(row))
                .map(|r| r.tooltip.clone())
        })
    });

    let container_style = format!("position: relative; width: 100%; height: {}px;", options.height);
    let show_tooltip = options.show_tooltip;

    view! {
        <div
            class="horizontal-bar-chart-container"
            style=container_style
            on:mousemove=move |ev| hover.track(&ev)
            on:mouseleave=move |_| hover.leave()
        >
            {move || match scene.get() {
                Some(scene) => horizontal_bar_scene_view(scene, &options, hover).into_any(),
                None => view! {
                    <EmptyState
                        class="horizontal-bar-chart-error"
                        message=NO_ROWS_MESSAGE
                        example=samples::horizontal_bar_chart_data()
                    />
                }.into_any(),
            }}
            {show_tooltip.then(|| view! {
                <ChartTooltip hover=hover content=tooltip style=TooltipStyle::plain() bordered=true />
            })}
        </div>
    }
}

fn horizontal_bar_scene_view(
    scene: HorizontalBarScene,
    options: &HorizontalBarChartOptions,
    hover: HoverState,
) -> impl IntoView + use<> {
    let dims = scene.dims;
    let (width, height) = (dims.inner_width(), dims.inner_height());
    let base_color = options.base_color.clone();
    let label_color = options.label_color.clone();
    let label_weight = options.label_font_weight;
    let show_labels = options.show_labels;

    let grid = options.show_grid.then(|| view! {
        <CartesianGrid
            width=width
            height=height
            horizontal=Vec::new()
            vertical=tick_positions(&scene.x_ticks)
            stroke=options.grid_stroke_color.clone()
            dasharray=""
        />
    });

    let bars = scene
        .rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            view! {
                <g class="horizontal-bar">
                    <path
                        d=row.path
                        fill=base_color.clone()
                        fill-opacity=row.opacity
                        style=move || hover.is_active(i).then_some(ACTIVE_FILTER)
                    />
                    {show_labels.then(|| view! {
                        <text
                            x=row.label_x
                            y=row.label_y
                            dy="0.35em"
                            text-anchor=row.label_anchor
                            fill=label_color.clone()
                            font-size="12"
                            font-weight=label_weight
                            font-family="inherit"
                        >
                            {row.value_label}
                        </text>
                    })}
                    <rect
                        x="0"
                        y=row.band_y
                        width=width
                        height=row.band_height
                        fill="transparent"
                        on:mouseenter=move |_| hover.enter(i)
                    />
                </g>
            }
        })
        .collect_view();

    view! {
        <svg
            class="horizontal-bar-chart"
            viewBox=dims.viewbox()
            preserveAspectRatio="none"
            style=format!("width: 100%; height: {}px;", dims.height)
        >
            <g transform=dims.inner_transform()>
                {grid}
                {bars}
                {scene.zero_line.map(|x| view! { <ZeroLine x1=x y1=0.0 x2=x y2=height /> })}
                {options.show_x_axis.then(|| view! {
                    <HorizontalAxis
                        ticks=scene.x_ticks
                        width=width
                        y=0.0
                        stroke=options.grid_stroke_color.clone()
                        show_line=false
                        show_labels=true
                        above=true
                    />
                })}
                {options.show_y_axis.then(|| view! {
                    <VerticalAxis
                        ticks=scene.category_ticks
                        height=height
                        stroke=options.grid_stroke_color.clone()
                        show_line=false
                        show_labels=true
                    />
                })}
            </g>
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::{parse_records, DomainBounds};

    fn records(json: &str) -> Vec<Record> {
        parse_records(json).unwrap()
    }

    #[test]
    fn test_no_rows_message_names_row_count() {
        assert!(NO_ROWS_MESSAGE.starts_with(NO_DATA_MESSAGE.trim_end_matches('.')));
        assert!(NO_ROWS_MESSAGE.ends_with(&format!("with {} items.", HORIZONTAL_BAR_ROWS)));
    }

    #[test]
    fn test_always_three_rows() {
        let opts = HorizontalBarChartOptions::default();

        let long = records(r#"[{"label":"a","value":1},{"label":"b","value":2},{"label":"c","value":3},{"label":"d","value":4}]"#);
        let scene = build_horizontal_bar_scene(&long, &opts);
        assert_eq!(scene.rows.len(), 3);
        assert_eq!(scene.rows[2].label, "c");

        let short = records(r#"[{"label":"a","value":5}]"#);
        let scene = build_horizontal_bar_scene(&short, &opts);
        assert_eq!(scene.rows.len(), 3);
        assert_eq!(scene.rows[1].label, "");
        assert_eq!(scene.rows[1].value, 0.0);

        let scene = build_horizontal_bar_scene(&[], &opts);
        assert_eq!(scene.rows.len(), 3);
    }

    #[test]
    fn test_values_coerce_like_number() {
        let data = records(r#"[{"label":"a","value":"12"},{"label":"b","value":"abc"},{"label":"c"}]"#);
        let scene = build_horizontal_bar_scene(&data, &HorizontalBarChartOptions::default());
        let values: Vec<f64> = scene.rows.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![12.0, 0.0, 0.0]);
    }

    #[test]
    fn test_row_emphasis_ladder() {
        let scene = build_horizontal_bar_scene(&[], &HorizontalBarChartOptions::default());
        let opacities: Vec<f64> = scene.rows.iter().map(|r| r.opacity).collect();
        assert_eq!(opacities, vec![0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_zero_line_when_straddling() {
        let data = records(r#"[{"label":"a","value":-22},{"label":"b","value":6},{"label":"c","value":18}]"#);
        let scene = build_horizontal_bar_scene(&data, &HorizontalBarChartOptions::default());
        assert!(scene.domain.straddles_zero());
        assert!(scene.zero_line.is_some());
        assert_eq!(scene.rows[0].label_anchor, "end");
        assert_eq!(scene.rows[1].label_anchor, "start");

        let data = records(r#"[{"label":"a","value":2},{"label":"b","value":6}]"#);
        let scene = build_horizontal_bar_scene(&data, &HorizontalBarChartOptions::default());
        assert!(scene.zero_line.is_none());
    }

    #[test]
    fn test_explicit_bounds_used_verbatim() {
        let opts = HorizontalBarChartOptions {
            min_value: Some(-10.0),
            max_value: Some(10.0),
            ..Default::default()
        };
        let scene = build_horizontal_bar_scene(&[], &opts);
        assert_eq!(scene.domain, calculate_domain(&[], DomainBounds::new(Some(-10.0), Some(10.0))));
        assert_eq!(scene.domain.min, -10.0);
    }

    #[test]
    fn test_value_labels_use_currency() {
        let data = records(r#"[{"label":"a","value":2500}]"#);
        let opts = HorizontalBarChartOptions {
            value_format: chart_core::ValueFormat::Currency,
            ..Default::default()
        };
        let scene = build_horizontal_bar_scene(&data, &opts);
        assert_eq!(scene.rows[0].value_label, "£2.5K");
        assert_eq!(scene.rows[0].tooltip.title, "a");
    }
}
