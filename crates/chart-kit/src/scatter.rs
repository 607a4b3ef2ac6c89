//! Scatter and bubble chart
//!
//! Rows are grouped into series by an optional category field, in order of
//! first appearance. In bubble mode the symbol area follows the size field.

use crate::{
    chartkit::{symbol_path, value_ticks, LinearScale, Scale, Tick},
    common::*,
    plot_height, ChartDimensions, ChartMargin, VIEWBOX_WIDTH,
};
use chart_core::{
    calculate_domain, category_of, coerce_number, load_records, paint_series, Domain, Emphasis,
    NumberFormatter, Record, ScatterChartOptions, ScatterKind,
};
use leptos::prelude::*;

const TICK_COUNT: usize = 5;
/// Category assigned to rows with a blank category field
pub const DEFAULT_CATEGORY: &str = "default";

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Symbol area in square pixels
    pub area: f64,
    /// Symbol outline centred on the origin
    pub symbol: String,
    pub tooltip: TooltipContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub name: String,
    pub color: String,
    pub emphasis: Emphasis,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterScene {
    pub dims: ChartDimensions,
    pub x_domain: Domain,
    pub y_domain: Domain,
    pub series: Vec<ScatterSeries>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    /// x position of the vertical zero line
    pub zero_x: Option<f64>,
    /// y position of the horizontal zero line
    pub zero_y: Option<f64>,
}

impl ScatterScene {
    /// Point by its position across all series
    pub fn point(&self, index: usize) -> Option<&ScatterPoint> {
        self.series.iter().flat_map(|s| &s.points).nth(index)
    }

    pub fn legend(&self) -> Vec<LegendItem> {
        self.series
            .iter()
            .map(|s| LegendItem {
                label: s.name.clone(),
                color: s.color.clone(),
                emphasis: s.emphasis.clone(),
            })
            .collect()
    }
}

/// A data row that survived coercion
struct Datum {
    x: f64,
    y: f64,
    z: Option<f64>,
}

/// Rows grouped by category in first-appearance order
fn group_rows(records: &[Record], options: &ScatterChartOptions) -> Vec<(String, Vec<Datum>)> {
    let mut groups: Vec<(String, Vec<Datum>)> = Vec::new();

    for record in records {
        let x = coerce_number(record.get(&options.x_axis_key));
        let y = coerce_number(record.get(&options.y_axis_key));
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        let z = Some(coerce_number(record.get(&options.size_key))).filter(|z| z.is_finite());

        let name = if options.category_key.is_empty() {
            options.y_axis_key.clone()
        } else {
            category_of(record.get(&options.category_key), DEFAULT_CATEGORY)
        };

        let datum = Datum { x, y, z };
        match groups.iter_mut().find(|(n, _)| *n == name) {
            Some((_, data)) => data.push(datum),
            None => groups.push((name, vec![datum])),
        }
    }

    groups
}

/// Maps size values linearly onto `[point_size / 2, point_size * 2]`
struct BubbleSizer {
    extent: Option<(f64, f64)>,
    point_size: f64,
}

impl BubbleSizer {
    fn new(zs: impl Iterator<Item = f64>, point_size: f64) -> Self {
        let extent = zs.fold(None, |acc: Option<(f64, f64)>, z| match acc {
            None => Some((z, z)),
            Some((lo, hi)) => Some((lo.min(z), hi.max(z))),
        });
        Self { extent, point_size }
    }

    fn area(&self, z: Option<f64>) -> f64 {
        let (lo, hi) = (self.point_size / 2.0, self.point_size * 2.0);
        match (z, self.extent) {
            (Some(z), Some((min, max))) if max > min => lo + (z - min) / (max - min) * (hi - lo),
            (Some(_), Some(_)) => (lo + hi) / 2.0,
            _ => self.point_size,
        }
    }
}

/// Lay out a scatter chart. `None` when there is nothing to draw.
pub fn build_scatter_scene(records: &[Record], options: &ScatterChartOptions) -> Option<ScatterScene> {
    if records.is_empty() {
        return None;
    }

    let groups = group_rows(records, options);
    tracing::debug!(
        series = groups.len(),
        kind = %options.chart_type,
        "Grouped scatter rows"
    );

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

    let data = || groups.iter().flat_map(|(_, data)| data);
    let xs: Vec<f64> = data().map(|d| d.x).collect();
    let ys: Vec<f64> = data().map(|d| d.y).collect();
    let x_domain = calculate_domain(&xs, options.x_bounds());
    let y_domain = calculate_domain(&ys, options.y_bounds());

    let x = LinearScale::new().domain(x_domain.min, x_domain.max).range(0.0, width);
    let y = LinearScale::new().domain(y_domain.min, y_domain.max).range(height, 0.0);

    let bubble = options.chart_type == ScatterKind::Bubble;
    let sizer = BubbleSizer::new(data().filter_map(|d| d.z), options.point_size);
    let formatter = options.formatter();
    let paints = paint_series(&options.base_color, groups.len(), &options.ramp());

    let series = groups
        .into_iter()
        .zip(paints)
        .map(|((name, data), paint)| {
            let points = data
                .into_iter()
                .map(|d| {
                    let area = if bubble { sizer.area(d.z) } else { options.point_size };
                    let mut rows = vec![
                        TooltipRow {
                            name: options.x_axis_key.clone(),
                            value: formatter.format(d.x),
                            color: paint.color.clone(),
                        },
                        TooltipRow {
                            name: options.y_axis_key.clone(),
                            value: formatter.format(d.y),
                            color: paint.color.clone(),
                        },
                    ];
                    if let (true, Some(z)) = (bubble, d.z) {
                        rows.push(TooltipRow {
                            name: options.size_key.clone(),
                            value: formatter.format(z),
                            color: paint.color.clone(),
                        });
                    }

                    ScatterPoint {
                        x: x.scale(d.x),
                        y: y.scale(d.y),
                        area,
                        symbol: symbol_path(options.point_shape, area),
                        tooltip: TooltipContent {
                            title: name.clone(),
                            rows,
                        },
                    }
                })
                .collect();

            ScatterSeries {
                name,
                color: paint.color,
                emphasis: paint.emphasis,
                points,
            }
        })
        .collect();

    Some(ScatterScene {
        dims,
        zero_x: x_domain.straddles_zero().then(|| x.scale(0.0)),
        zero_y: y_domain.straddles_zero().then(|| y.scale(0.0)),
        x_ticks: value_ticks(&x, TICK_COUNT, |v| formatter.format(v)),
        y_ticks: value_ticks(&y, TICK_COUNT, |v| formatter.format(v)),
        x_domain,
        y_domain,
        series,
    })
}

// ============================================================================
// COMPONENT
// ============================================================================

/// Scatter / bubble chart component
#[component]
pub fn ScatterChart(
    /// JSON array of records
    #[prop(into)]
    data: Signal<String>,
    #[prop(optional)] options: Option<ScatterChartOptions>,
) -> impl IntoView {
    let options = options.unwrap_or_default();
    let records = Memo::new(move |_| load_records(&data.get()));
    let scene = {
        let options = options.clone();
        Memo::new(move |_| records.with(|records| build_scatter_scene(records, &options)))
    };

    let hover = HoverState::new();
    let tooltip = Signal::derive(move || {
        let index = hover.active.get()?;
        scene.with(|scene| {
            scene
                .as_ref()
                .and_then(|s| s.point(index))
                .map(|p| p.tooltip.clone())
        })
    });

    let container_style = format!("position: relative; width: 100%; height: {}px;", options.height);
    let id = options.id.clone().filter(|id| !id.is_empty());
    let tooltip_style = options.show_tooltip.then(|| options.tooltip.clone());

    view! {
        <div
            class="scatter-chart-container"
            id=id
            style=container_style
            on:mousemove=move |ev| hover.track(&ev)
            on:mouseleave=move |_| hover.leave()
        >
            {move || match scene.get() {
                Some(scene) => scatter_scene_view(scene, &options, hover).into_any(),
                None => view! {
                    <EmptyState class="scatter-chart-error" message=NO_DATA_MESSAGE />
                }.into_any(),
            }}
            {tooltip_style.map(|style| view! {
                <ChartTooltip hover=hover content=tooltip style=style />
            })}
        </div>
    }
}

fn scatter_scene_view(
    scene: ScatterScene,
    options: &ScatterChartOptions,
    hover: HoverState,
) -> impl IntoView + use<> {
    let dims = scene.dims;
    let (width, height) = (dims.inner_width(), dims.inner_height());
    let legend = scene.legend();

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

    let mut index = 0;
    let series = scene
        .series
        .into_iter()
        .map(|s| {
            let color = s.color;
            let points = s
                .points
                .into_iter()
                .map(|point| {
                    let i = index;
                    index += 1;
                    view! {
                        <path
                            class="scatter-point"
                            d=point.symbol
                            transform=format!("translate({}, {})", point.x, point.y)
                            fill=color.clone()
                            style=move || hover.is_active(i).then_some(ACTIVE_FILTER)
                            on:mouseenter=move |_| hover.enter(i)
                            on:mouseleave=move |_| hover.leave()
                        />
                    }
                })
                .collect_view();

            view! {
                <g class="scatter-series" opacity=s.emphasis.opacity style=s.emphasis.filter_style()>
                    {points}
                </g>
            }
        })
        .collect_view();

    view! {
        <svg
            class="scatter-chart"
            viewBox=dims.viewbox()
            preserveAspectRatio="none"
            style=format!("width: 100%; height: {}px;", dims.height)
        >
            <g transform=dims.inner_transform()>
                {grid}
                {scene.zero_x.map(|x| view! { <ZeroLine x1=x y1=0.0 x2=x y2=height /> })}
                {scene.zero_y.map(|y| view! { <ZeroLine x1=0.0 y1=y x2=width y2=y /> })}
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
                {series}
            </g>
        </svg>
        {options.show_legend.then(|| view! { <ChartLegend items=legend /> })}
    }
}
