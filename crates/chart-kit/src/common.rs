//! Pieces shared by every chart family: grid, axes, legend, tooltip and
//! the empty-data placeholder.

use crate::{chartkit::Tick, colors};
use chart_core::{Emphasis, TooltipStyle};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

// ============================================================================
// HOVER TRACKING
// ============================================================================

/// Which element is hovered and where the pointer is inside the container
#[derive(Debug, Clone, Copy)]
pub struct HoverState {
    pub active: RwSignal<Option<usize>>,
    /// Pixel offset from the container's top-left corner
    pub pointer: RwSignal<(f64, f64)>,
}

impl HoverState {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(None),
            pointer: RwSignal::new((0.0, 0.0)),
        }
    }

    /// Record the pointer position; bind to the container's `mousemove`
    pub fn track(&self, ev: &MouseEvent) {
        if let Some(offset) = pointer_offset(ev) {
            self.pointer.set(offset);
        }
    }

    pub fn enter(&self, index: usize) {
        self.active.set(Some(index));
    }

    pub fn leave(&self) {
        self.active.set(None);
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.get() == Some(index)
    }
}

impl Default for HoverState {
    fn default() -> Self {
        Self::new()
    }
}

/// Pointer position relative to the element the handler is bound to
fn pointer_offset(ev: &MouseEvent) -> Option<(f64, f64)> {
    let target = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = target.get_bounding_client_rect();
    Some((
        ev.client_x() as f64 - rect.left(),
        ev.client_y() as f64 - rect.top(),
    ))
}

/// Inline filter style applied to the hovered element
pub const ACTIVE_FILTER: &str = "filter: brightness(0.97);";

// ============================================================================
// GRID
// ============================================================================

/// Dashed background grid
#[component]
pub fn CartesianGrid(
    width: f64,
    height: f64,
    /// y positions of horizontal lines
    horizontal: Vec<f64>,
    /// x positions of vertical lines
    vertical: Vec<f64>,
    #[prop(into)] stroke: String,
    #[prop(into)] dasharray: String,
) -> impl IntoView {
    view! {
        <g class="chart-grid">
            // Horizontal lines
            {horizontal.into_iter().map(|y| {
                view! {
                    <line
                        x1="0" y1=y
                        x2=width y2=y
                        stroke=stroke.clone()
                        stroke-width="1"
                        stroke-dasharray=dasharray.clone()
                    />
                }
            }).collect_view()}

            // Vertical lines
            {vertical.into_iter().map(|x| {
                view! {
                    <line
                        x1=x y1="0"
                        x2=x y2=height
                        stroke=stroke.clone()
                        stroke-width="1"
                        stroke-dasharray=dasharray.clone()
                    />
                }
            }).collect_view()}
        </g>
    }
}

/// Positions of a tick list, for grid lines
pub fn tick_positions(ticks: &[Tick]) -> Vec<f64> {
    ticks.iter().map(|t| t.position).collect()
}

// ============================================================================
// AXES
// ============================================================================

/// Axis running left to right at `y`. Labels sit below it, or above when
/// `above` is set.
#[component]
pub fn HorizontalAxis(
    ticks: Vec<Tick>,
    width: f64,
    y: f64,
    #[prop(into)] stroke: String,
    show_line: bool,
    show_labels: bool,
    #[prop(optional)] above: bool,
    #[prop(optional, into)] title: String,
) -> impl IntoView {
    let label_y = if above { -8.0 } else { 16.0 };

    view! {
        <g class="axis axis-x" transform=format!("translate(0, {})", y)>
            {show_line.then(|| view! {
                <line x1="0" y1="0" x2=width y2="0" stroke=stroke.clone() stroke-width="1" />
            })}
            {show_labels.then(|| {
                ticks.into_iter().map(|tick| {
                    view! {
                        <g transform=format!("translate({}, 0)", tick.position)>
                            {show_line.then(|| view! {
                                <line y1="0" y2={if above { -6.0 } else { 6.0 }} stroke=stroke.clone() />
                            })}
                            <text
                                y=label_y
                                dy={if above { "0" } else { "0.71em" }}
                                text-anchor="middle"
                                fill="currentColor"
                                font-size="12"
                                font-family="inherit"
                            >
                                {tick.label}
                            </text>
                        </g>
                    }
                }).collect_view()
            })}
            {(!title.is_empty()).then(|| view! {
                <text
                    x={width / 2.0}
                    y="40"
                    text-anchor="middle"
                    fill="currentColor"
                    font-size="12"
                    font-family="inherit"
                >
                    {title}
                </text>
            })}
        </g>
    }
}

/// Axis running top to bottom at x = 0, labels on its left
#[component]
pub fn VerticalAxis(
    ticks: Vec<Tick>,
    height: f64,
    #[prop(into)] stroke: String,
    show_line: bool,
    show_labels: bool,
    #[prop(optional, into)] title: String,
    #[prop(optional)] title_offset: f64,
) -> impl IntoView {
    view! {
        <g class="axis axis-y">
            {show_line.then(|| view! {
                <line x1="0" y1="0" x2="0" y2=height stroke=stroke.clone() stroke-width="1" />
            })}
            {show_labels.then(|| {
                ticks.into_iter().map(|tick| {
                    view! {
                        <g transform=format!("translate(0, {})", tick.position)>
                            {show_line.then(|| view! {
                                <line x1="-6" x2="0" stroke=stroke.clone() />
                            })}
                            <text
                                x="-9"
                                dy="0.32em"
                                text-anchor="end"
                                fill="currentColor"
                                font-size="12"
                                font-family="inherit"
                            >
                                {tick.label}
                            </text>
                        </g>
                    }
                }).collect_view()
            })}
            {(!title.is_empty()).then(|| {
                let x = -title_offset + 16.0;
                view! {
                    <text
                        transform=format!("translate({}, {}) rotate(-90)", x, height / 2.0)
                        text-anchor="middle"
                        fill="currentColor"
                        font-size="12"
                        font-family="inherit"
                    >
                        {title}
                    </text>
                }
            })}
        </g>
    }
}

/// Thin reference line drawn through zero when a domain crosses it
#[component]
pub fn ZeroLine(x1: f64, y1: f64, x2: f64, y2: f64) -> impl IntoView {
    view! {
        <line
            class="zero-line"
            x1=x1 y1=y1
            x2=x2 y2=y2
            stroke=colors::ZERO_LINE
            stroke-width="1.5"
            stroke-opacity="0.3"
        />
    }
}

// ============================================================================
// LEGEND
// ============================================================================

/// One legend entry
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub color: String,
    pub emphasis: Emphasis,
}

/// Legend row (or column) of colour swatches
#[component]
pub fn ChartLegend(items: Vec<LegendItem>, #[prop(optional)] vertical: bool) -> impl IntoView {
    let layout = if vertical {
        "display: flex; flex-direction: column; gap: 8px;"
    } else {
        "display: flex; justify-content: center; gap: 20px; padding-top: 8px;"
    };

    view! {
        <div
            class="chart-legend"
            style=format!("{} font-family: inherit; font-size: 0.75rem; color: inherit;", layout)
        >
            {items.into_iter().map(|item| {
                let swatch = format!(
                    "width: 10px; height: 10px; border-radius: 2px; background-color: {}; opacity: {}; {}",
                    item.color,
                    item.emphasis.opacity,
                    item.emphasis.filter_style().unwrap_or_default(),
                );
                view! {
                    <div style="display: flex; align-items: center; gap: 6px;">
                        <div style=swatch></div>
                        <span style="color: inherit;">{item.label}</span>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

// ============================================================================
// TOOLTIP
// ============================================================================

/// One value line in a tooltip
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRow {
    /// Series name; empty hides it
    pub name: String,
    pub value: String,
    pub color: String,
}

/// What the tooltip shows for a hovered element
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub title: String,
    pub rows: Vec<TooltipRow>,
}

/// Floating tooltip following the pointer
#[component]
pub fn ChartTooltip(
    hover: HoverState,
    #[prop(into)] content: Signal<Option<TooltipContent>>,
    style: TooltipStyle,
    /// Thin border, used by the compact style
    #[prop(optional)]
    bordered: bool,
) -> impl IntoView {
    move || {
        content.get().map(|content| {
            let (x, y) = hover.pointer.get();
            let border = if bordered {
                format!("border: 1px solid {};", colors::TOOLTIP_BORDER)
            } else {
                "box-shadow: 0 2px 8px rgba(0,0,0,0.08);".to_string()
            };
            let container = format!(
                "position: absolute; left: {}px; top: {}px; pointer-events: none; z-index: 1000; \
                 background-color: {}; border-radius: {}px; {} padding: 12px; min-width: 160px; \
                 font-family: inherit;",
                x + 12.0,
                y + 12.0,
                style.tooltip_background_color,
                style.tooltip_border_radius,
                border,
            );
            let title = format!(
                "font-size: {}px; font-weight: {}; font-family: {}; color: inherit; margin-bottom: {}px;",
                style.tooltip_title_font_size,
                style.tooltip_title_font_weight,
                style.tooltip_title_font_family,
                if bordered { 4 } else { 16 },
            );
            let value_font = format!(
                "font-size: {}px; font-weight: {}; font-family: {};",
                style.tooltip_value_font_size,
                style.tooltip_value_font_weight,
                style.tooltip_value_font_family,
            );
            let show_names = style.tooltip_show_series_name;

            view! {
                <div class="chart-tooltip" style=container>
                    {(!content.title.is_empty()).then(|| view! { <div style=title>{content.title}</div> })}
                    {content.rows.into_iter().enumerate().map(|(i, row)| {
                        let row_style = format!(
                            "display: flex; align-items: baseline; gap: 6px; margin-top: {}px;",
                            if i > 0 { 4 } else { 0 },
                        );
                        let value_style = format!("{} color: {};", value_font, row.color);
                        let name = (show_names && !row.name.is_empty()).then(|| view! {
                            <span style=format!("font-size: 12px; color: {};", colors::TEXT_MUTED)>
                                {row.name}
                            </span>
                        });
                        view! {
                            <div style=row_style>
                                <span style=value_style>{row.value}</span>
                                {name}
                            </div>
                        }
                    }).collect_view()}
                </div>
            }
        })
    }
}

// ============================================================================
// EMPTY STATE
// ============================================================================

pub const NO_DATA_MESSAGE: &str = "No data available. Please provide valid JSON data.";

/// Placeholder shown when the data string yields no records
#[component]
pub fn EmptyState(
    #[prop(into)] class: String,
    #[prop(into)] message: String,
    /// Example data shown in a collapsible block
    #[prop(optional)]
    example: Option<String>,
) -> impl IntoView {
    view! {
        <div class=class>
            <p>{message}</p>
            {example.map(|example| view! {
                <details>
                    <summary>"Example format"</summary>
                    <pre>{example}</pre>
                </details>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_positions() {
        let ticks = vec![
            Tick {
                position: 10.0,
                label: "a".to_string(),
            },
            Tick {
                position: 20.0,
                label: "b".to_string(),
            },
        ];
        assert_eq!(tick_positions(&ticks), vec![10.0, 20.0]);
    }

    #[test]
    fn test_no_data_message_asks_for_json() {
        assert_eq!(NO_DATA_MESSAGE, "No data available. Please provide valid JSON data.");
    }
}
