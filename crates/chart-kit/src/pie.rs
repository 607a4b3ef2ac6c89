//! Pie and donut chart (at most four slices)

use crate::{
    chartkit::sector_path,
    common::*,
    ChartDimensions, ChartMargin, VIEWBOX_WIDTH,
};
use chart_core::{
    coerce_number, label_of, load_records, samples, Emphasis, NumberFormatter, PieChartOptions,
    Record, TooltipStyle, PIE_MAX_SLICES,
};
use leptos::prelude::*;

/// Outer radius as a fraction of the largest radius that fits
const OUTER_RADIUS: f64 = 0.8;
/// Horizontal room reserved for the legend column
const LEGEND_WIDTH: f64 = 160.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
    /// Degrees, 0 at three o'clock, counter-clockwise
    pub start_angle: f64,
    pub end_angle: f64,
    pub path: String,
    pub tooltip: TooltipContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieScene {
    pub dims: ChartDimensions,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub slices: Vec<PieSlice>,
    pub legend: Vec<LegendItem>,
}

/// Start and end angle of each slice over a full turn.
///
/// Every non-zero slice is preceded by `padding` degrees, except the
/// first; zero slices collapse to a point and take no padding.
pub fn slice_angles(values: &[f64], padding: f64) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().sum();
    let non_zero = values.iter().filter(|v| **v != 0.0).count();
    let available = (360.0 - non_zero as f64 * padding).max(0.0);

    let mut angles: Vec<(f64, f64)> = Vec::with_capacity(values.len());
    for &value in values {
        let share = if total > 0.0 { value / total } else { 0.0 };
        let start = match angles.last() {
            None => 0.0,
            Some(&(_, previous_end)) if value != 0.0 => previous_end + padding,
            Some(&(_, previous_end)) => previous_end,
        };
        angles.push((start, start + share * available));
    }
    angles
}

/// Lay out a pie chart. `None` when there is nothing to draw.
pub fn build_pie_scene(records: &[Record], options: &PieChartOptions) -> Option<PieScene> {
    if records.is_empty() {
        return None;
    }

    let entries: Vec<(String, f64)> = records
        .iter()
        .take(PIE_MAX_SLICES)
        .map(|record| {
            let value = coerce_number(record.get(&options.value_key));
            (
                label_of(record.get(&options.name_key)),
                if value.is_finite() { value.max(0.0) } else { 0.0 },
            )
        })
        .collect();

    let margin = ChartMargin::new(
        5.0,
        if options.show_legend { LEGEND_WIDTH } else { 5.0 },
        5.0,
        5.0,
    );
    let dims = ChartDimensions::new(VIEWBOX_WIDTH, options.height).with_margin(margin);
    let (cx, cy) = (dims.inner_width() / 2.0, dims.inner_height() / 2.0);
    let max_radius = cx.min(cy);
    let outer_radius = max_radius * OUTER_RADIUS;
    let inner_radius = (max_radius * options.inner_radius / 100.0).clamp(0.0, outer_radius);

    let values: Vec<f64> = entries.iter().map(|(_, v)| *v).collect();
    let angles = slice_angles(&values, options.padding_angle.max(0.0));
    let palette = options.palette();
    let formatter = options.formatter();

    let slices: Vec<PieSlice> = entries
        .into_iter()
        .zip(angles)
        .enumerate()
        .map(|(i, ((label, value), (start, end)))| {
            let color = palette[i % PIE_MAX_SLICES].to_string();
            PieSlice {
                path: sector_path(cx, cy, inner_radius, outer_radius, start, end),
                tooltip: TooltipContent {
                    title: label.clone(),
                    rows: vec![TooltipRow {
                        name: String::new(),
                        value: formatter.format(value),
                        color: color.clone(),
                    }],
                },
                start_angle: start,
                end_angle: end,
                label,
                value,
                color,
            }
        })
        .collect();

    let legend = slices
        .iter()
        .map(|slice| LegendItem {
            label: slice.label.clone(),
            color: slice.color.clone(),
            emphasis: Emphasis::full(),
        })
        .collect();

    Some(PieScene {
        dims,
        inner_radius,
        outer_radius,
        slices,
        legend,
    })
}

// ============================================================================
// COMPONENT
// ============================================================================

/// Pie / donut chart component
#[component]
pub fn PieChart(
    /// JSON array of `{name, value}` records
    #[prop(into)]
    data: Signal<String>,
    #[prop(optional)] options: Option<PieChartOptions>,
) -> impl IntoView {
    let options = options.unwrap_or_default();
    let records = Memo::new(move |_| load_records(&data.get()));
    let scene = {
        let options = options.clone();
        Memo::new(move |_| records.with(|records| build_pie_scene(records, &options)))
    };

    let hover = HoverState::new();
    let tooltip = Signal::derive(move || {
        let slice = hover.active.get()?;
        scene.with(|scene| {
            scene
                .as_ref()
                .and_then(|s| s.slices.get(slice))
                .map(|s| s.tooltip.clone())
        })
    });

    let container_style = format!("position: relative; width: 100%; height: {}px;", options.height);
    let show_tooltip = options.show_tooltip;
    let show_legend = options.show_legend;

    view! {
        <div
            class="pie-chart-container"
            style=container_style
            on:mousemove=move |ev| hover.track(&ev)
            on:mouseleave=move |_| hover.leave()
        >
            {move || match scene.get() {
                Some(scene) => pie_scene_view(scene, show_legend, hover).into_any(),
                None => view! {
                    <EmptyState
                        class="pie-chart-error"
                        message=NO_DATA_MESSAGE
                        example=samples::pie_chart_data()
                    />
                }.into_any(),
            }}
            {show_tooltip.then(|| view! {
                <ChartTooltip hover=hover content=tooltip style=TooltipStyle::plain() bordered=true />
            })}
        </div>
    }
}

fn pie_scene_view(scene: PieScene, show_legend: bool, hover: HoverState) -> impl IntoView {
    let dims = scene.dims;

    let sectors = scene
        .slices
        .into_iter()
        .enumerate()
        .map(|(i, slice)| view! {
            <path
                class="pie-sector"
                d=slice.path
                fill=slice.color
                stroke="#fff"
                style=move || hover.is_active(i).then_some(ACTIVE_FILTER)
                on:mouseenter=move |_| hover.enter(i)
                on:mouseleave=move |_| hover.leave()
            />
        })
        .collect_view();

    view! {
        <svg
            class="pie-chart"
            viewBox=dims.viewbox()
            style=format!("width: 100%; height: {}px;", dims.height)
        >
            <g transform=dims.inner_transform()>{sectors}</g>
        </svg>
        {show_legend.then(|| view! {
            <div style="position: absolute; right: 8px; top: 50%; transform: translateY(-50%);">
                <ChartLegend items=scene.legend vertical=true />
            </div>
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::parse_records;

    fn records(json: &str) -> Vec<Record> {
        parse_records(json).unwrap()
    }

    #[test]
    fn test_angles_cover_full_turn() {
        let angles = slice_angles(&[1.0, 1.0, 2.0], 2.0);
        assert_eq!(angles[0].0, 0.0);
        // 354 degrees shared 1:1:2
        assert!((angles[0].1 - 88.5).abs() < 1e-9);
        assert!((angles[1].0 - 90.5).abs() < 1e-9);
        let (_, last_end) = angles[2];
        assert!((last_end + 2.0 - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_slices_take_no_padding() {
        let angles = slice_angles(&[1.0, 0.0, 1.0], 10.0);
        assert_eq!(angles[1].0, angles[1].1);
        assert_eq!(angles[1].0, angles[0].1);
        assert_eq!(angles[2].0, angles[1].1 + 10.0);
    }

    #[test]
    fn test_all_zero_values() {
        let angles = slice_angles(&[0.0, 0.0], 2.0);
        assert!(angles.iter().all(|(s, e)| s == e));
    }

    #[test]
    fn test_at_most_four_slices() {
        let data = records(
            r#"[{"name":"A","value":1},{"name":"B","value":2},{"name":"C","value":3},{"name":"D","value":4},{"name":"E","value":5}]"#,
        );
        let scene = build_pie_scene(&data, &PieChartOptions::default()).unwrap();
        assert_eq!(scene.slices.len(), 4);
        assert_eq!(scene.legend.len(), 4);
        let colors: Vec<&str> = scene.slices.iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors, chart_core::colors::PIE.to_vec());
    }

    #[test]
    fn test_donut_radii() {
        let data = records(r#"[{"name":"A","value":1}]"#);
        let scene = build_pie_scene(&data, &PieChartOptions::default()).unwrap();
        let max_radius = scene.outer_radius / OUTER_RADIUS;
        assert!((scene.inner_radius - max_radius * 0.6).abs() < 1e-9);

        let pie = PieChartOptions {
            inner_radius: 0.0,
            ..Default::default()
        };
        assert_eq!(build_pie_scene(&data, &pie).unwrap().inner_radius, 0.0);
    }

    #[test]
    fn test_invalid_values_become_zero() {
        let data = records(r#"[{"name":"A","value":-5},{"name":"B","value":"x"},{"name":"C","value":"3"}]"#);
        let scene = build_pie_scene(&data, &PieChartOptions::default()).unwrap();
        let values: Vec<f64> = scene.slices.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![0.0, 0.0, 3.0]);
        assert_eq!(scene.slices[2].tooltip.rows[0].value, "3");
    }

    #[test]
    fn test_empty_data_has_no_scene() {
        assert!(build_pie_scene(&[], &PieChartOptions::default()).is_none());
    }
}
