//! Human-readable response text for tool results.
//!
//! Pure string building over listener response bodies. The validation
//! section keys off the `validated` boolean alone, independent of the
//! call's top-level `success` flag.

use serde_json::Value;

/// Render the post-condition validation section, if the listener reported
/// one. Returns `None` when the response carries no `validated` field.
pub fn validation_section(result: &Value) -> Option<String> {
    let validated = result.get("validated")?.as_bool()?;
    let mut out = String::new();
    if validated {
        out.push_str("Validation: ✓ Passed");
    } else {
        out.push_str("Validation: ✗ Failed");
    }
    if let Some(errors) = result.get("validation_errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            out.push_str("\nValidation errors:");
            for error in errors {
                if let Some(text) = error.as_str() {
                    out.push_str(&format!("\n  - {text}"));
                }
            }
        }
    }
    if let Some(warnings) = result.get("validation_warnings").and_then(Value::as_array) {
        if !warnings.is_empty() {
            out.push_str("\nValidation warnings:");
            for warning in warnings {
                if let Some(text) = warning.as_str() {
                    out.push_str(&format!("\n  - {text}"));
                }
            }
        }
    }
    Some(out)
}

/// Append the validation section to a summary line, when present.
pub fn with_validation(summary: String, result: &Value) -> String {
    match validation_section(result) {
        Some(section) => format!("{summary}\n{section}"),
        None => summary,
    }
}

/// Summary line for a spawn-style result (`actorName` + `location`).
pub fn spawn_summary(result: &Value) -> String {
    let name = result
        .get("actorName")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>");
    match result.get("location").and_then(Value::as_array) {
        Some(location) => format!("Spawned {name} at {}", vector_text(location)),
        None => format!("Spawned {name}"),
    }
}

/// Summary line for a modify result, echoing the live transform.
pub fn modify_summary(result: &Value) -> String {
    let name = result
        .get("actorName")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>");
    let mut line = format!("Modified {name}");
    if let Some(location) = result.get("location").and_then(Value::as_array) {
        line.push_str(&format!(", location {}", vector_text(location)));
    }
    if let Some(rotation) = result.get("rotation").and_then(Value::as_array) {
        line.push_str(&format!(", rotation {}", vector_text(rotation)));
    }
    line
}

fn vector_text(values: &[Value]) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| match v.as_f64() {
            Some(n) => trim_float(n),
            None => v.to_string(),
        })
        .collect();
    format!("[{}]", parts.join(", "))
}

fn trim_float(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n:.2}")
    }
}

/// Pretty-print a JSON body for query-style tools (lists, info dumps).
pub fn json_block(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failed_validation_lists_each_error_as_a_bullet() {
        // The section keys off `validated` alone, even on success: true.
        let result = json!({
            "success": true,
            "validated": false,
            "validation_errors": ["location mismatch", "wrong mesh"],
        });
        let section = validation_section(&result).unwrap();
        assert!(section.contains("✗ Failed"));
        assert!(section.contains("\n  - location mismatch"));
        assert!(section.contains("\n  - wrong mesh"));
    }

    #[test]
    fn failed_validation_renders_regardless_of_top_level_success() {
        let result = json!({
            "success": false,
            "validated": false,
            "validation_errors": ["a", "b"],
        });
        let section = validation_section(&result).unwrap();
        assert!(section.contains("✗ Failed"));
        assert!(section.contains("  - a"));
        assert!(section.contains("  - b"));
    }

    #[test]
    fn passed_validation_shows_check_mark() {
        let result = json!({"validated": true});
        assert_eq!(validation_section(&result).unwrap(), "Validation: ✓ Passed");
    }

    #[test]
    fn warnings_render_under_their_own_heading() {
        let result = json!({
            "validated": true,
            "validation_warnings": ["actor outside grid"],
        });
        let section = validation_section(&result).unwrap();
        assert!(section.contains("✓ Passed"));
        assert!(section.contains("Validation warnings:\n  - actor outside grid"));
    }

    #[test]
    fn responses_without_validated_have_no_section() {
        assert!(validation_section(&json!({"success": true})).is_none());
        let summary = with_validation("Spawned Wall_1".into(), &json!({"success": true}));
        assert_eq!(summary, "Spawned Wall_1");
    }

    #[test]
    fn spawn_summary_reads_name_and_location() {
        let result = json!({
            "actorName": "Wall_1",
            "location": [100.0, 0.0, 50.5],
        });
        assert_eq!(spawn_summary(&result), "Spawned Wall_1 at [100, 0, 50.50]");
    }

    #[test]
    fn modify_summary_includes_present_fields_only() {
        let result = json!({
            "actorName": "Wall_1",
            "location": [0.0, 0.0, 0.0],
        });
        let text = modify_summary(&result);
        assert!(text.starts_with("Modified Wall_1"));
        assert!(text.contains("location [0, 0, 0]"));
        assert!(!text.contains("rotation"));
    }
}
