//! Column and stacked bar chart
//!
//! Series come from the numeric fields of the first record. In column mode
//! bars of one category sit side by side and emphasis steps per row; in
//! stacked mode series pile up and emphasis steps per series.

use crate::{
    chartkit::{rounded_rect_path, value_ticks, BandScale, LinearScale, Scale, Tick},
    colors,
    common::*,
    plot_height, ChartDimensions, ChartMargin, VIEWBOX_WIDTH,
};
use chart_core::{
    detect_value_keys, label_of, load_records, numeric_field, step_ladder, zero_based_domain,
    BarChartOptions, BarLayout, Emphasis, NumberFormatter, Record, TooltipStyle,
};
use leptos::prelude::*;
use serde_json::json;

/// Horizontal gap between bars of one category
const BAR_GAP: f64 = 4.0;
const Y_TICK_COUNT: usize = 5;

/// One drawn bar (or stack segment)
#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub row: usize,
    pub series: usize,
    pub value: f64,
    /// Value-space extent, from the baseline (or stack total) to the bar end
    pub start: f64,
    pub end: f64,
    pub path: String,
    pub opacity: f64,
}

/// Hover target covering one category band
#[derive(Debug, Clone, PartialEq)]
pub struct BarCategory {
    pub x: f64,
    pub width: f64,
    pub tooltip: TooltipContent,
}

/// Fully laid out bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct BarScene {
    pub dims: ChartDimensions,
    pub series: Vec<String>,
    pub bars: Vec<BarRect>,
    pub categories: Vec<BarCategory>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub legend: Vec<LegendItem>,
}

/// Lay out a bar chart. `None` when there is nothing to draw.
pub fn build_bar_scene(records: &[Record], options: &BarChartOptions) -> Option<BarScene> {
    if records.is_empty() {
        return None;
    }

    let series = detect_value_keys(records, &options.x_axis_key);
    tracing::debug!(?series, layout = %options.chart_type, "Detected bar series");

    let left = if options.show_y_axis { options.y_axis_width } else { 10.0 };
    let margin = ChartMargin::cartesian(left, options.show_x_axis, false);
    let dims = ChartDimensions::new(VIEWBOX_WIDTH, plot_height(options.height, options.show_legend))
        .with_margin(margin);
    let (width, height) = (dims.inner_width(), dims.inner_height());

    let values: Vec<Vec<Option<f64>>> = records
        .iter()
        .map(|record| {
            series
                .iter()
                .map(|key| numeric_field(record, key).filter(|v| v.is_finite()))
                .collect()
        })
        .collect();

    let extent: Vec<f64> = match options.chart_type {
        BarLayout::Column => values.iter().flatten().flatten().copied().collect(),
        BarLayout::Stacked => values.iter().flat_map(|row| running_totals(row)).collect(),
    };
    let domain = zero_based_domain(&extent, None);
    let y = LinearScale::new()
        .domain(domain.min, domain.max)
        .nice(Y_TICK_COUNT)
        .range(height, 0.0);
    let x = BandScale::new(records.len())
        .range(0.0, width)
        .padding(0.2, 0.1);

    let radius = options.bar_radius.max(0.0);
    let mut bars = Vec::new();

    match options.chart_type {
        BarLayout::Column => {
            let ladder = step_ladder(records.len());
            let count = series.len().max(1) as f64;
            let bar_width = ((x.bandwidth() - BAR_GAP * (count - 1.0)) / count).max(1.0);

            for (row, row_values) in values.iter().enumerate() {
                for (s, value) in row_values.iter().enumerate() {
                    let Some(value) = *value else { continue };
                    let left = x.scale(row) + s as f64 * (bar_width + BAR_GAP);
                    let corners = rounded_corners(value, radius);
                    bars.push(BarRect {
                        row,
                        series: s,
                        value,
                        start: 0.0,
                        end: value,
                        path: bar_path(left, bar_width, y.scale(0.0), y.scale(value), corners),
                        opacity: ladder[row],
                    });
                }
            }
        }
        BarLayout::Stacked => {
            let ladder = step_ladder(series.len());
            let last = series.len().saturating_sub(1);

            for (row, row_values) in values.iter().enumerate() {
                let mut total = 0.0;
                for (s, value) in row_values.iter().enumerate() {
                    let Some(value) = *value else { continue };
                    let (from, to) = (total, total + value);
                    total = to;
                    // Only the top segment gets rounded corners
                    let corners = if s == last {
                        rounded_corners(value, radius)
                    } else {
                        [0.0; 4]
                    };
                    bars.push(BarRect {
                        row,
                        series: s,
                        value,
                        start: from,
                        end: to,
                        path: bar_path(x.scale(row), x.bandwidth(), y.scale(from), y.scale(to), corners),
                        opacity: ladder[s],
                    });
                }
            }
        }
    }

    let formatter = options.formatter();
    let outer = (x.step() - x.bandwidth()) / 2.0;
    let categories = records
        .iter()
        .enumerate()
        .map(|(row, record)| BarCategory {
            x: x.scale(row) - outer,
            width: x.step(),
            tooltip: TooltipContent {
                title: label_of(record.get(&options.x_axis_key)),
                rows: series
                    .iter()
                    .zip(&values[row])
                    .filter_map(|(key, value)| {
                        value.map(|v| TooltipRow {
                            name: key.clone(),
                            value: formatter.format(v),
                            color: options.base_color.clone(),
                        })
                    })
                    .collect(),
            },
        })
        .collect();

    let x_ticks = records
        .iter()
        .enumerate()
        .map(|(row, record)| Tick {
            position: x.scale_center(row),
            label: label_of(record.get(&options.x_axis_key)),
        })
        .collect();
    let y_ticks = value_ticks(&y, Y_TICK_COUNT, |v| formatter.format(v));

    let legend_ladder = step_ladder(series.len());
    let legend = series
        .iter()
        .enumerate()
        .map(|(s, key)| LegendItem {
            label: key.clone(),
            color: options.base_color.clone(),
            emphasis: match options.chart_type {
                BarLayout::Stacked => Emphasis::with_opacity(legend_ladder[s]),
                BarLayout::Column => Emphasis::full(),
            },
        })
        .collect();

    Some(BarScene {
        dims,
        series,
        bars,
        categories,
        x_ticks,
        y_ticks,
        legend,
    })
}

/// Cumulative totals of one stacked row, in series order regardless of sign
fn running_totals(row: &[Option<f64>]) -> Vec<f64> {
    row.iter()
        .flatten()
        .scan(0.0, |total, value| {
            *total += value;
            Some(*total)
        })
        .collect()
}

/// Round the end of a bar facing away from zero
fn rounded_corners(value: f64, radius: f64) -> [f64; 4] {
    if value >= 0.0 {
        [radius, radius, 0.0, 0.0]
    } else {
        [0.0, 0.0, radius, radius]
    }
}

fn bar_path(x: f64, width: f64, y0: f64, y1: f64, corners: [f64; 4]) -> String {
    rounded_rect_path(x, y0.min(y1), width, (y1 - y0).abs(), corners)
}

fn example_data() -> String {
    let example = json!([
        { "name": "2022", "value": 10 },
        { "name": "2023", "value": 25 },
        { "name": "2024", "value": 40 },
    ]);
    serde_json::to_string_pretty(&example).unwrap_or_default()
}

// ============================================================================
// COMPONENT
// ============================================================================

/// Bar chart component
#[component]
pub fn BarChart(
    /// JSON array of records
    #[prop(into)]
    data: Signal<String>,
    #[prop(optional)] options: Option<BarChartOptions>,
) -> impl IntoView {
    let options = options.unwrap_or_default();
    let records = Memo::new(move |_| load_records(&data.get()));
    let scene = {
        let options = options.clone();
        Memo::new(move |_| records.with(|records| build_bar_scene(records, &options)))
    };

    let hover = HoverState::new();
    let tooltip = Signal::derive(move || {
        let row = hover.active.get()?;
        scene.with(|scene| {
            scene
                .as_ref()
                .and_then(|s| s.categories.get(row))
                .map(|c| c.tooltip.clone())
        })
    });

    let container_style = format!("position: relative; width: 100%; height: {}px;", options.height);
    let show_tooltip = options.show_tooltip;

    view! {
        <div
            class="bar-chart-container"
            style=container_style
            on:mousemove=move |ev| hover.track(&ev)
            on:mouseleave=move |_| hover.leave()
        >
            {move || match scene.get() {
                Some(scene) => bar_scene_view(scene, &options, hover).into_any(),
                None => view! {
                    <EmptyState
                        class="bar-chart-error"
                        message=NO_DATA_MESSAGE
                        example=example_data()
                    />
                }.into_any(),
            }}
            {show_tooltip.then(|| view! {
                <ChartTooltip hover=hover content=tooltip style=TooltipStyle::plain() bordered=true />
            })}
        </div>
    }
}

fn bar_scene_view(scene: BarScene, options: &BarChartOptions, hover: HoverState) -> impl IntoView + use<> {
    let dims = scene.dims;
    let (width, height) = (dims.inner_width(), dims.inner_height());
    let base_color = options.base_color.clone();
    let show_tooltip = options.show_tooltip;

    let grid = options.show_cartesian_grid.then(|| view! {
        <CartesianGrid
            width=width
            height=height
            horizontal=tick_positions(&scene.y_ticks)
            vertical=tick_positions(&scene.x_ticks)
            stroke=colors::GRID
            dasharray=options.grid_stroke_dasharray.clone()
        />
    });

    let cursor = {
        let bands: Vec<(f64, f64)> = scene.categories.iter().map(|c| (c.x, c.width)).collect();
        move || {
            let row = hover.active.get().filter(|_| show_tooltip)?;
            let (x, w) = *bands.get(row)?;
            Some(view! { <rect x=x y="0" width=w height=height fill=colors::cursor_alpha(0.1) /> })
        }
    };

    let bars = scene
        .bars
        .into_iter()
        .map(|bar| {
            let row = bar.row;
            view! {
                <path
                    class="bar"
                    d=bar.path
                    fill=base_color.clone()
                    fill-opacity=bar.opacity
                    style=move || hover.is_active(row).then_some(ACTIVE_FILTER)
                />
            }
        })
        .collect_view();

    let targets = scene
        .categories
        .iter()
        .enumerate()
        .map(|(row, category)| {
            view! {
                <rect
                    x=category.x
                    y="0"
                    width=category.width
                    height=height
                    fill="transparent"
                    on:mouseenter=move |_| hover.enter(row)
                />
            }
        })
        .collect_view();

    view! {
        <svg
            class="bar-chart"
            viewBox=dims.viewbox()
            preserveAspectRatio="none"
            style=format!("width: 100%; height: {}px;", dims.height)
        >
            <g transform=dims.inner_transform()>
                {grid}
                {cursor}
                {bars}
                {options.show_x_axis.then(|| view! {
                    <HorizontalAxis
                        ticks=scene.x_ticks
                        width=width
                        y=height
                        stroke=colors::AXIS_LINE
                        show_line=true
                        show_labels=true
                    />
                })}
                {options.show_y_axis.then(|| view! {
                    <VerticalAxis
                        ticks=scene.y_ticks
                        height=height
                        stroke=colors::AXIS_LINE
                        show_line=true
                        show_labels=true
                    />
                })}
                {targets}
            </g>
        </svg>
        {options.show_legend.then(|| view! { <ChartLegend items=scene.legend /> })}
    }
}
