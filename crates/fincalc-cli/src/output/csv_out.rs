use serde_json::Value;
use std::io::{self, Write};

use super::{format_value, split_result};

/// Write the result as CSV to stdout.
///
/// Results carrying a schedule are written as one row per period (the first
/// schedule only); everything else as two-column `field,value` records.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_csv<W: Write>(out: W, value: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .and_then(Value::as_object);

    match result {
        Some(result) => {
            let (scalars, schedules) = split_result(result);
            if let Some((_, rows)) = schedules.first() {
                write_rows(&mut wtr, rows)?;
            } else {
                wtr.write_record(["field", "value"])?;
                for (key, val) in scalars {
                    wtr.write_record([key, format_value(val).as_str()])?;
                }
            }
        }
        None => {
            wtr.write_record([format_value(value)])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> Result<(), csv::Error> {
    let Some(first) = rows.first().and_then(Value::as_object) else {
        return Ok(());
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for row in rows.iter().filter_map(Value::as_object) {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(format_value).unwrap_or_default())
            .collect();
        wtr.write_record(&cells)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_scalar_result_is_two_column() {
        let out = render(&json!({"result": {"result": "1210", "mode": "future_value"}}));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "field,value");
        assert!(lines.contains(&"result,1210"));
        assert!(lines.contains(&"mode,future_value"));
    }

    #[test]
    fn test_schedule_result_is_one_row_per_period() {
        let out = render(&json!({
            "result": {
                "future_value": "2",
                "yearly_breakdown": [
                    {"year": 1, "value_at_year_end": "1"},
                    {"year": 2, "value_at_year_end": "2"}
                ]
            }
        }));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        let mut headers: Vec<&str> = lines[0].split(',').collect();
        headers.sort_unstable();
        assert_eq!(headers, ["value_at_year_end", "year"]);
        assert_eq!(lines[2], "2,2");
    }
}
