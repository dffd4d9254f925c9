use serde_json::Value;

use crate::output::result_payload;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known aggregate fields in order of priority,
/// then fall back to the first scalar field in the payload.
pub fn print_minimal(value: &Value) {
    let payload = result_payload(value);

    // Priority list of key output fields
    let priority_keys = [
        "total_interest",
        "pv_interest_total",
        "total_paid",
        "pv_contribution_total",
        "periods",
        "end_date",
    ];

    if let Value::Object(map) = payload {
        // Try priority keys first (skip nulls and compound values — the
        // schedule payload names its row array "periods" too)
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() && !val.is_array() && !val.is_object() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to first scalar field
        for (key, val) in map {
            if !val.is_null() && !val.is_array() && !val.is_object() {
                println!("{}: {}", key, format_minimal(val));
                return;
            }
        }
    }

    println!("{}", format_minimal(payload));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
