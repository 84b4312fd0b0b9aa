use serde_json::Value;

use super::format_value;

/// Headline fields, first match wins.
const PRIORITY_KEYS: [&str; 9] = [
    "required_corpus",
    "target_amount",
    "required_monthly_contribution",
    "delay_cost",
    "full_instalments",
    "weighted_return_rate",
    "future_value",
    "total_value",
    "result",
];

/// Print just the headline number of a calculation.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        return format_value(result_obj);
    };

    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return format_value(val);
        }
    }

    map.iter()
        .next()
        .map(|(key, val)| format!("{}: {}", key, format_value(val)))
        .unwrap_or_default()
}
