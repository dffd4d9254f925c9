use serde_json::Value;
use tabled::{builder::Builder, Table};

use crate::output::{period_rows, result_payload};

/// Render the analysis as tables: the period rows (when the payload has
/// them) followed by the aggregate fields, warnings and methodology.
pub fn print_table(value: &Value) {
    let payload = result_payload(value);

    if let Some(rows) = period_rows(payload) {
        print_period_table(rows);
        println!();
    }

    print_aggregate_table(payload);

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = value.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

/// One table row per schedule period, headers taken from the first record.
fn print_period_table(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty schedule)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }

    println!("{}", Table::from(builder));
}

/// Field/value table of the payload's scalar fields (totals, dates, terms).
fn print_aggregate_table(payload: &Value) {
    let Value::Object(map) = payload else {
        println!("{}", payload);
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if val.is_array() {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
