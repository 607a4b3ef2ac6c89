//! Builder Charts - WASM gallery
//!
//! Mounts every chart family with sample data. The bar chart's data is
//! editable so malformed input and the empty state can be tried live.

use chart_core::{
    declare, parse_props, samples, BarChartOptions, HorizontalBarChartOptions, LineChartOptions,
    PieChartOptions, ScatterChartOptions,
};
use chart_kit::{BarChart, HorizontalBarChart, LineChart, PieChart, ScatterChart};
use leptos::prelude::*;
use prop_bags::*;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    match declare::manifest_json() {
        Ok(manifest) => tracing::debug!(bytes = manifest.len(), "Built property manifest"),
        Err(e) => tracing::error!(error = %e, "Failed to serialise property manifest"),
    }

    tracing::info!("Starting chart gallery");
    leptos::mount::mount_to_body(Gallery);
}

/// Prop bags as a page builder would send them
mod prop_bags {
    pub const STACKED_BAR: &str = r#"{"chartType":"stacked","barRadius":6,"valueFormat":"currency"}"#;
    pub const AREA: &str =
        r#"{"chartType":"area","colorMode":"brightness","colorIncrement":20,"yAxisLabel":"Visits"}"#;
    pub const BUBBLE: &str =
        r#"{"chartType":"bubble","categoryKey":"category","pointShape":"diamond","maxYValue":""}"#;
    pub const DONUT: &str = r#"{"innerRadius":45,"paddingAngle":4,"valueFormat":"percent"}"#;
    pub const HORIZONTAL: &str = r#"{"valueFormat":"currency","maxValue":"30"}"#;
}

/// Options from a prop bag, falling back to defaults on a bad bag
fn props<T: serde::de::DeserializeOwned + Default>(json: &str) -> T {
    parse_props(json).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring invalid prop bag");
        T::default()
    })
}

#[component]
fn Gallery() -> impl IntoView {
    let bar_data = RwSignal::new(samples::bar_chart_data());

    view! {
        <div class="gallery">
            <Panel title="Bar chart">
                <BarChart data=bar_data />
                <textarea
                    prop:value=move || bar_data.get()
                    on:input=move |ev| bar_data.set(event_target_value(&ev))
                />
            </Panel>

            <Panel title="Stacked bar chart">
                <BarChart
                    data=samples::bar_chart_data()
                    options={props::<BarChartOptions>(STACKED_BAR)}
                />
            </Panel>

            <Panel title="Horizontal bar chart">
                <HorizontalBarChart
                    data=samples::horizontal_bar_chart_data()
                    options={props::<HorizontalBarChartOptions>(HORIZONTAL)}
                />
            </Panel>

            <Panel title="Line chart">
                <LineChart data=samples::line_chart_data() />
            </Panel>

            <Panel title="Area chart">
                <LineChart
                    data=samples::line_chart_data()
                    options={props::<LineChartOptions>(AREA)}
                />
            </Panel>

            <Panel title="Pie chart">
                <PieChart data=samples::pie_chart_data() />
            </Panel>

            <Panel title="Donut chart">
                <PieChart
                    data=samples::pie_chart_data()
                    options={props::<PieChartOptions>(DONUT)}
                />
            </Panel>

            <Panel title="Scatter chart">
                <ScatterChart data=samples::scatter_chart_data() />
            </Panel>

            <Panel title="Bubble chart">
                <ScatterChart
                    data=samples::scatter_chart_data()
                    options={props::<ScatterChartOptions>(BUBBLE)}
                />
            </Panel>
        </div>
    }
}

#[component]
fn Panel(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <section class="gallery-card">
            <h2>{title}</h2>
            {children()}
        </section>
    }
}
