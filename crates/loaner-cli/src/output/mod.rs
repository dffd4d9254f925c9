pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pull the analysis payload out of the computation envelope. `result` holds
/// an externally-tagged enum (`Schedule` / `Summary` / `PresentValue`), so
/// descend through the single variant key to the payload object.
pub(crate) fn result_payload(value: &Value) -> &Value {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result {
        if map.len() == 1 {
            if let Some(inner) = map.values().next() {
                if inner.is_object() {
                    return inner;
                }
            }
        }
    }
    result
}

/// The per-period row array of a schedule or present-value payload, if any.
pub(crate) fn period_rows(payload: &Value) -> Option<&Vec<Value>> {
    for key in ["periods", "rows"] {
        if let Some(Value::Array(rows)) = payload.get(key) {
            return Some(rows);
        }
    }
    None
}
