use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_value, split_result};

/// Print the result as a field/value table, each schedule as its own
/// table, then warnings and methodology.
pub fn print_table(value: &Value) {
    let Some(envelope) = value.as_object() else {
        println!("{}", format_value(value));
        return;
    };

    match envelope.get("result") {
        Some(Value::Object(result)) => print_result(result),
        _ => println!("{}", field_table(envelope.iter().map(|(k, v)| (k.as_str(), v)))),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_result(result: &Map<String, Value>) {
    let (scalars, schedules) = split_result(result);
    println!("{}", field_table(scalars.into_iter()));

    for (name, rows) in schedules {
        println!("\n{}:", name);
        println!("{}", rows_table(rows));
    }
}

fn field_table<'a>(fields: impl Iterator<Item = (&'a str, &'a Value)>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.to_string(), format_value(val)]);
    }
    builder.build()
}

fn rows_table(rows: &[Value]) -> Table {
    let headers: Vec<String> = rows
        .first()
        .and_then(Value::as_object)
        .map(|first| first.keys().cloned().collect())
        .unwrap_or_default();

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows.iter().filter_map(Value::as_object) {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(h).map(format_value).unwrap_or_default())
            .collect();
        builder.push_record(cells);
    }
    builder.build()
}
