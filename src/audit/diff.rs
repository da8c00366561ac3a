//! Change summaries for audit entries

use serde_json::Value;

/// Bookkeeping fields left out of change summaries
const IGNORED_FIELDS: &[&str] = &["updated_at", "created_at"];

/// One-line summary of the top-level fields that differ between two
/// serialized records, or `None` when nothing but bookkeeping changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after)
            .then(|| format!("{} -> {}", format_value(before), format_value(after)));
    };

    let mut changes = Vec::new();

    for (key, before_val) in before_obj {
        if IGNORED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        match after_obj.get(key) {
            Some(after_val) if after_val == before_val => {}
            Some(after_val) => changes.push(format!(
                "{}: {} -> {}",
                key,
                format_value(before_val),
                format_value(after_val)
            )),
            None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
        }
    }

    for (key, after_val) in after_obj {
        if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
            changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
        }
    }

    (!changes.is_empty()).then(|| changes.join(", "))
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_only() {
        let before = json!({"category": "Food", "amount": 30000, "updated_at": "a"});
        let after = json!({"category": "Travel", "amount": 30000, "updated_at": "b"});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "category: \"Food\" -> \"Travel\"");
    }

    #[test]
    fn test_bookkeeping_only_is_no_change() {
        let before = json!({"amount": 1, "updated_at": "a"});
        let after = json!({"amount": 1, "updated_at": "b"});
        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"family_member": "Mummy"});
        let after = json!({"description": "rent"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("family_member: \"Mummy\" -> (removed)"));
        assert!(diff.contains("description: (added) -> \"rent\""));
    }

    #[test]
    fn test_plan_entry_lists_are_counted() {
        let before = json!({"expected_expenses": [{}]});
        let after = json!({"expected_expenses": [{}, {}]});
        assert_eq!(
            generate_diff(&before, &after).unwrap(),
            "expected_expenses: [1 items] -> [2 items]"
        );
    }

    #[test]
    fn test_long_strings_are_truncated() {
        let before = json!({"notes": "x".repeat(100)});
        let after = json!({"notes": ""});
        assert!(generate_diff(&before, &after).unwrap().contains("...\""));
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(generate_diff(&json!(1), &json!(2)).unwrap(), "1 -> 2");
        assert!(generate_diff(&json!(null), &json!(null)).is_none());
    }
}
