pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Split a result object into its scalar fields and its per-period
/// schedules (`yearly_schedule`, `flow_values`, ...).
pub(crate) fn split_result(result: &Map<String, Value>) -> (Vec<(&str, &Value)>, Vec<(&str, &[Value])>) {
    let mut scalars = Vec::new();
    let mut schedules = Vec::new();
    for (key, val) in result {
        match val {
            Value::Array(rows) if rows.iter().all(Value::is_object) && !rows.is_empty() => {
                schedules.push((key.as_str(), rows.as_slice()));
            }
            _ => scalars.push((key.as_str(), val)),
        }
    }
    (scalars, schedules)
}

/// Render a JSON leaf the way every formatter shows it.
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Object(map) if map.contains_key("status") => {
            // Tagged outcomes: "depleted (month 87)"
            let status = map.get("status").map(format_value).unwrap_or_default();
            let details: Vec<String> = map
                .iter()
                .filter(|(k, _)| k.as_str() != "status")
                .map(|(k, v)| format!("{} {}", k, format_value(v)))
                .collect();
            if details.is_empty() {
                status
            } else {
                format!("{} ({})", status, details.join(", "))
            }
        }
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
