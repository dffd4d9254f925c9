use serde_json::Value;

/// Pretty-print the full analysis envelope as JSON.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Could not serialize analysis output: {}", e),
    }
}
