//! Example datasets.
//!
//! Used as the default `data` of each declaration, as the gallery's demo
//! input, and as the format hint shown by the empty state.

use serde_json::{json, Value};

fn pretty(value: Value) -> String {
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

pub fn bar_chart_data() -> String {
    pretty(json!([
        { "name": "Page A", "value1": 4000, "value2": 2400 },
        { "name": "Page B", "value1": 3000, "value2": 1398 },
        { "name": "Page C", "value1": 2000, "value2": 9800 },
        { "name": "Page D", "value1": 2780, "value2": 3908 },
        { "name": "Page E", "value1": 1890, "value2": 4800 },
        { "name": "Page F", "value1": 2390, "value2": 3800 },
        { "name": "Page G", "value1": 3490, "value2": 4300 },
    ]))
}

pub fn horizontal_bar_chart_data() -> String {
    pretty(json!([
        { "label": "2022", "value": 14.8 },
        { "label": "2023", "value": 16.5 },
        { "label": "2024", "value": 17.5 },
    ]))
}

pub fn line_chart_data() -> String {
    pretty(json!([
        { "name": "Jan", "revenue": 4000, "costs": 2400 },
        { "name": "Feb", "revenue": 3000, "costs": 1398 },
        { "name": "Mar", "revenue": 2000, "costs": 5800 },
        { "name": "Apr", "revenue": 2780, "costs": 3908 },
        { "name": "May", "revenue": 1890, "costs": 4800 },
        { "name": "Jun", "revenue": 2390, "costs": 3800 },
    ]))
}

pub fn pie_chart_data() -> String {
    pretty(json!([
        { "name": "Combustibles", "value": 9094 },
        { "name": "Traditional Oral", "value": 1058 },
        { "name": "New Categories", "value": 1078 },
        { "name": "Other", "value": 48 },
    ]))
}

pub fn scatter_chart_data() -> String {
    pretty(json!([
        { "x": 10, "y": 120, "z": 200, "category": "Product A" },
        { "x": 20, "y": 180, "z": 260, "category": "Product A" },
        { "x": 30, "y": 150, "z": 400, "category": "Product A" },
        { "x": 15, "y": 90, "z": 280, "category": "Product B" },
        { "x": 25, "y": 140, "z": 500, "category": "Product B" },
        { "x": 35, "y": 110, "z": 200, "category": "Product B" },
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{detect_value_keys, parse_records};

    #[test]
    fn test_samples_parse() {
        for data in [
            bar_chart_data(),
            horizontal_bar_chart_data(),
            line_chart_data(),
            pie_chart_data(),
            scatter_chart_data(),
        ] {
            assert!(!parse_records(&data).unwrap().is_empty());
        }
    }

    #[test]
    fn test_sample_series_keys() {
        let records = parse_records(&bar_chart_data()).unwrap();
        assert_eq!(detect_value_keys(&records, "name"), vec!["value1", "value2"]);

        let records = parse_records(&line_chart_data()).unwrap();
        assert_eq!(detect_value_keys(&records, "name"), vec!["revenue", "costs"]);
    }
}
