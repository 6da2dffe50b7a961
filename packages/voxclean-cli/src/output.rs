use std::io::Write;

/// Write JSON string to stdout.
pub fn write_stdout(json: &str) -> Result<(), String> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(json.as_bytes())
        .and_then(|_| handle.write_all(b"\n"))
        .map_err(|e| format!("Failed to write to stdout: {}", e))
}

/// Serialize a value to JSON (pretty or compact).
pub fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String, String> {
    if compact {
        serde_json::to_string(value).map_err(|e| format!("JSON serialization failed: {}", e))
    } else {
        serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization failed: {}", e))
    }
}

/// Serialize a value and print it on stdout.
pub fn print_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<(), String> {
    to_json(value, compact).and_then(|json| write_stdout(&json))
}
