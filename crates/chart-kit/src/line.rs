//! Line and area chart
//!
//! One monotone curve per numeric field of the first record. Series are told
//! apart by an emphasis ramp over a single base colour, or by an explicit
//! comma-separated colour list.

use crate::{
    chartkit::{curve_path, monotone_area_path, value_ticks, LinearScale, Scale, Tick},
    colors,
    common::*,
    plot_height, ChartDimensions, ChartMargin, VIEWBOX_WIDTH,
};
use chart_core::{
    detect_value_keys, label_of, load_records, numeric_field, paint_series, zero_based_domain,
    Emphasis, LineChartOptions, LineKind, NumberFormatter, Record,
};
use leptos::prelude::*;

const Y_TICK_COUNT: usize = 5;
/// Fill opacity of the area under each curve
pub const AREA_FILL_OPACITY: f64 = 0.15;

/// One plotted series
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub key: String,
    pub color: String,
    pub emphasis: Emphasis,
    /// One curve per unbroken run of values
    pub lines: Vec<String>,
    /// Filled areas, area mode only
    pub areas: Vec<String>,
    /// `(row, x, y)` of every present value
    pub dots: Vec<(usize, f64, f64)>,
}

/// Hover column around one x position
#[derive(Debug, Clone, PartialEq)]
pub struct LineColumn {
    pub x: f64,
    pub hit_x: f64,
    pub hit_width: f64,
    pub tooltip: TooltipContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineScene {
    pub dims: ChartDimensions,
    pub series: Vec<LineSeries>,
    pub columns: Vec<LineColumn>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
}

impl LineScene {
    pub fn legend(&self) -> Vec<LegendItem> {
        self.series
            .iter()
            .map(|s| LegendItem {
                label: s.key.clone(),
                color: s.color.clone(),
                emphasis: s.emphasis.clone(),
            })
            .collect()
    }
}

/// x position of row `i` of `n` across `width`
fn column_x(i: usize, n: usize, width: f64) -> f64 {
    if n <= 1 {
        width / 2.0
    } else {
        i as f64 * width / (n - 1) as f64
    }
}

/// Split a series into runs of consecutive present points
fn runs(points: &[Option<(f64, f64)>]) -> Vec<Vec<(f64, f64)>> {
    points
        .split(Option::is_none)
        .filter(|run| !run.is_empty())
        .map(|run| run.iter().flatten().copied().collect())
        .collect()
}

/// Lay out a line chart. `None` when there is nothing to draw.
pub fn build_line_scene(records: &[Record], options: &LineChartOptions) -> Option<LineScene> {
    if records.is_empty() {
        return None;
    }

    let keys = detect_value_keys(records, &options.x_axis_key);
    tracing::debug!(series = ?keys, kind = %options.chart_type, "Detected line series");

    let y_label_room = if options.y_axis_label.is_empty() { 0.0 } else { 20.0 };
    let left = if options.show_y_axis {
        options.y_axis_width + y_label_room
    } else {
        10.0
    };
    let margin = ChartMargin::cartesian(left, options.show_x_axis, !options.x_axis_label.is_empty());
    let dims = ChartDimensions::new(VIEWBOX_WIDTH, plot_height(options.height, options.show_legend))
        .with_margin(margin);
    let (width, height) = (dims.inner_width(), dims.inner_height());

    let values: Vec<Vec<Option<f64>>> = keys
        .iter()
        .map(|key| {
            records
                .iter()
                .map(|record| numeric_field(record, key).filter(|v| v.is_finite()))
                .collect()
        })
        .collect();

    let all: Vec<f64> = values.iter().flatten().flatten().copied().collect();
    let domain = zero_based_domain(&all, options.max_value);
    let mut y = LinearScale::new().domain(domain.min, domain.max);
    if options.max_value.is_none() {
        y = y.nice(Y_TICK_COUNT);
    }
    let y = y.range(height, 0.0);
    let baseline_y = y.scale(domain.baseline());

    let n = records.len();
    let paints = paint_series(&options.base_color, keys.len(), &options.ramp());

    let series: Vec<LineSeries> = keys
        .iter()
        .zip(&values)
        .zip(paints)
        .map(|((key, column), paint)| {
            let points: Vec<Option<(f64, f64)>> = column
                .iter()
                .enumerate()
                .map(|(i, v)| v.map(|v| (column_x(i, n, width), y.scale(v))))
                .collect();
            let runs = runs(&points);

            LineSeries {
                key: key.clone(),
                color: paint.color,
                emphasis: paint.emphasis,
                lines: runs.iter().map(|run| curve_path(run)).collect(),
                areas: match options.chart_type {
                    LineKind::Area => runs
                        .iter()
                        .map(|run| monotone_area_path(run, baseline_y))
                        .collect(),
                    LineKind::Line => Vec::new(),
                },
                dots: points
                    .iter()
                    .enumerate()
                    .filter_map(|(i, p)| p.map(|(x, y)| (i, x, y)))
                    .collect(),
            }
        })
        .collect();

    let formatter = options.formatter();
    let slot = if n > 1 { width / (n - 1) as f64 } else { width };
    let columns = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let x = column_x(i, n, width);
            let hit_x = (x - slot / 2.0).max(0.0);
            let hit_end = (x + slot / 2.0).min(width);
            LineColumn {
                x,
                hit_x,
                hit_width: hit_end - hit_x,
                tooltip: TooltipContent {
                    title: label_of(record.get(&options.x_axis_key)),
                    rows: series
                        .iter()
                        .zip(&values)
                        .filter_map(|(s, column)| {
                            column[i].map(|v| TooltipRow {
                                name: s.key.clone(),
                                value: formatter.format(v),
                                color: s.color.clone(),
                            })
                        })
                        .collect(),
                },
            }
        })
        .collect();

    let x_ticks = records
        .iter()
        .enumerate()
        .map(|(i, record)| Tick {
            position: column_x(i, n, width),
            label: label_of(record.get(&options.x_axis_key)),
        })
        .collect();

    Some(LineScene {
        dims,
        series,
        columns,
        x_ticks,
        y_ticks: value_ticks(&y, Y_TICK_COUNT, |v| formatter.format(v)),
    })
}

// ============================================================================
// COMPONENT
// ============================================================================

/// Line / area chart component
#[component]
pub fn LineChart(
    /// JSON array of records
    #[prop(into)]
    data: Signal<String>,
    #[prop(optional)] options: Option<LineChartOptions>,
) -> impl IntoView {
    let options = options.unwrap_or_default();
    let records = Memo::new(move |_| load_records(&data.get()));
    let scene = {
        let options = options.clone();
        Memo::new(move |_| records.with(|records| build_line_scene(records, &options)))
    };

    let hover = HoverState::new();
    let tooltip = Signal::derive(move || {
        let column = hover.active.get()?;
        scene.with(|scene| {
            scene
                .as_ref()
                .and_then(|s| s.columns.get(column))
                .map(|c| c.tooltip.clone())
        })
    });

    let container_style = format!("position: relative; width: 100%; height: {}px;", options.height);
    let id = options.id.clone().filter(|id| !id.is_empty());
    let tooltip_style = options.show_tooltip.then(|| options.tooltip.clone());

    view! {
        <div
            class="line-chart-container"
            id=id
            style=container_style
            on:mousemove=move |ev| hover.track(&ev)
            on:mouseleave=move |_| hover.leave()
        >
            {move || match scene.get() {
                Some(scene) => line_scene_view(scene, &options, hover).into_any(),
                None => view! {
                    <EmptyState class="line-chart-error" message=NO_DATA_MESSAGE />
                }.into_any(),
            }}
            {tooltip_style.map(|style| view! {
                <ChartTooltip hover=hover content=tooltip style=style />
            })}
        </div>
    }
}

fn line_scene_view(scene: LineScene, options: &LineChartOptions, hover: HoverState) -> impl IntoView + use<> {
    let dims = scene.dims;
    let (width, height) = (dims.inner_width(), dims.inner_height());
    let legend = scene.legend();
    let stroke_width = options.stroke_width;
    let dot_size = options.dot_size;
    let show_dots = options.show_dots;
    let show_tooltip = options.show_tooltip;

    let grid = options.show_cartesian_grid.then(|| view! {
        <CartesianGrid
            width=width
            height=height
            horizontal=tick_positions(&scene.y_ticks)
            vertical=tick_positions(&scene.x_ticks)
            stroke=options.grid_color.clone()
            dasharray=options.grid_stroke_dasharray.clone()
        />
    });

    let cursor = {
        let xs: Vec<f64> = scene.columns.iter().map(|c| c.x).collect();
        move || {
            let column = hover.active.get().filter(|_| show_tooltip)?;
            let x = *xs.get(column)?;
            Some(view! {
                <line x1=x y1="0" x2=x y2=height stroke=colors::GRID stroke-width="1" />
            })
        }
    };

    let series = scene
        .series
        .into_iter()
        .map(|s| {
            let color = s.color;
            let filter = s.emphasis.filter_style();
            let areas = s
                .areas
                .into_iter()
                .map(|d| view! { <path d=d fill=color.clone() fill-opacity=AREA_FILL_OPACITY stroke="none" /> })
                .collect_view();
            let lines = s
                .lines
                .into_iter()
                .map(|d| view! {
                    <path d=d fill="none" stroke=color.clone() stroke-width=stroke_width />
                })
                .collect_view();
            let dots = s
                .dots
                .into_iter()
                .map(|(row, cx, cy)| {
                    let r = move || {
                        if hover.is_active(row) && show_tooltip {
                            dot_size + 2.0
                        } else {
                            dot_size
                        }
                    };
                    view! {
                        <circle
                            cx=cx
                            cy=cy
                            r=r
                            fill=color.clone()
                            stroke=colors::DOT_STROKE
                            stroke-width="2"
                        />
                    }
                })
                .collect_view();

            view! {
                <g class="line-series" opacity=s.emphasis.opacity style=filter>
                    {areas}
                    {lines}
                    {show_dots.then_some(dots)}
                </g>
            }
        })
        .collect_view();

    let targets = scene
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| view! {
            <rect
                x=column.hit_x
                y="0"
                width=column.hit_width
                height=height
                fill="transparent"
                on:mouseenter=move |_| hover.enter(i)
            />
        })
        .collect_view();

    view! {
        <svg
            class="line-chart"
            viewBox=dims.viewbox()
            preserveAspectRatio="none"
            style=format!("width: 100%; height: {}px;", dims.height)
        >
            <g transform=dims.inner_transform()>
                {grid}
                {cursor}
                {series}
                {options.show_x_axis.then(|| view! {
                    <HorizontalAxis
                        ticks=scene.x_ticks
                        width=width
                        y=height
                        stroke=options.axis_line_color.clone()
                        show_line=true
                        show_labels=true
                        title=options.x_axis_label.clone()
                    />
                })}
                {options.show_y_axis.then(|| view! {
                    <VerticalAxis
                        ticks=scene.y_ticks
                        height=height
                        stroke=options.axis_line_color.clone()
                        show_line=true
                        show_labels=true
                        title=options.y_axis_label.clone()
                        title_offset=dims.margin.left
                    />
                })}
                {targets}
            </g>
        </svg>
        {options.show_legend.then(|| view! { <ChartLegend items=legend /> })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::{parse_records, ColorMode};

    fn records(json: &str) -> Vec<Record> {
        parse_records(json).unwrap()
    }

    #[test]
    fn test_series_follow_ramp() {
        let data = records(r#"[{"name":"A","a":1,"b":2,"c":3},{"name":"B","a":2,"b":3,"c":4}]"#);
        let scene = build_line_scene(&data, &LineChartOptions::default()).unwrap();
        let opacities: Vec<f64> = scene.series.iter().map(|s| s.emphasis.opacity).collect();
        assert_eq!(opacities, vec![1.0, 0.75, 0.5625]);
        assert_eq!(scene.legend().len(), 3);
    }

    #[test]
    fn test_color_list_bypasses_ramp() {
        let data = records(r#"[{"name":"A","a":1,"b":2,"c":3}]"#);
        let options = LineChartOptions {
            base_color: "#f00, #0f0".to_string(),
            color_mode: ColorMode::Brightness,
            ..Default::default()
        };
        let scene = build_line_scene(&data, &options).unwrap();
        let colors: Vec<&str> = scene.series.iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors, vec!["#f00", "#0f0", "#f00"]);
        assert!(scene.series.iter().all(|s| s.emphasis == Emphasis::full()));
    }

    #[test]
    fn test_missing_values_break_the_line() {
        let data = records(
            r#"[{"name":"A","a":1},{"name":"B"},{"name":"C","a":3},{"name":"D","a":4}]"#,
        );
        let scene = build_line_scene(&data, &LineChartOptions::default()).unwrap();
        assert_eq!(scene.series[0].lines.len(), 2);
        assert_eq!(scene.series[0].dots.len(), 3);
        assert!(scene.columns[1].tooltip.rows.is_empty());
    }

    #[test]
    fn test_area_mode_fills() {
        let data = records(r#"[{"name":"A","a":1},{"name":"B","a":2}]"#);
        let line = build_line_scene(&data, &LineChartOptions::default()).unwrap();
        assert!(line.series[0].areas.is_empty());

        let options = LineChartOptions {
            chart_type: LineKind::Area,
            ..Default::default()
        };
        let area = build_line_scene(&data, &options).unwrap();
        assert_eq!(area.series[0].areas.len(), 1);
        assert!(area.series[0].areas[0].ends_with('Z'));
    }

    #[test]
    fn test_max_value_pins_domain() {
        let data = records(r#"[{"name":"A","a":37},{"name":"B","a":12}]"#);
        let options = LineChartOptions {
            max_value: Some(50.0),
            ..Default::default()
        };
        let scene = build_line_scene(&data, &options).unwrap();
        let top = scene.y_ticks.last().unwrap();
        assert_eq!(top.label, "50");
        assert_eq!(top.position, 0.0);
    }

    #[test]
    fn test_single_row_is_centred() {
        let data = records(r#"[{"name":"A","a":1}]"#);
        let scene = build_line_scene(&data, &LineChartOptions::default()).unwrap();
        let width = scene.dims.inner_width();
        assert_eq!(scene.columns[0].x, width / 2.0);
    }

    #[test]
    fn test_tooltip_rows_carry_series_colour() {
        let data = records(r#"[{"name":"Jan","sales":1200}]"#);
        let scene = build_line_scene(&data, &LineChartOptions::default()).unwrap();
        let tooltip = &scene.columns[0].tooltip;
        assert_eq!(tooltip.title, "Jan");
        assert_eq!(tooltip.rows[0].value, "1.2K");
        assert_eq!(tooltip.rows[0].color, chart_core::colors::BAR_BASE);
    }

    #[test]
    fn test_runs() {
        let points = vec![Some((0.0, 1.0)), None, None, Some((2.0, 3.0)), Some((3.0, 4.0))];
        assert_eq!(runs(&points), vec![vec![(0.0, 1.0)], vec![(2.0, 3.0), (3.0, 4.0)]]);
    }
}
