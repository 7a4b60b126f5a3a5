//! Plain-text rendering of problem data for the terminal.
use serde_json::Value;

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::from("null"),
        Value::Array(items) => list(items),
        v => v.to_string(),
    }
}
fn list(items: &[Value]) -> String {
    format!(
        "[{}]",
        items.iter().map(scalar).collect::<Vec<_>>().join(", ")
    )
}

fn parsed(value: &Value) -> String {
    match value {
        Value::Object(map) if map.is_empty() => String::from("{}"),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| match v {
                Value::Object(_) => format!("{} = {}", k, v),
                v => format!("{} = {}", k, scalar(v)),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        v => scalar(v),
    }
}

/// Example input or output as shown under a problem statement. JSON text is
/// unpacked; objects print one `name = value` line per field.
pub fn test_case_data(value: &Value) -> String {
    match value {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(v) => parsed(&v),
            Err(_) => s.clone(),
        },
        v => parsed(v),
    }
}

pub fn difficulty_label(difficulty: &str) -> String {
    match difficulty.to_ascii_lowercase().as_str() {
        "easy" => String::from("Easy"),
        "medium" => String::from("Medium"),
        "hard" => String::from("Hard"),
        _ => difficulty.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_print_as_assignments() {
        assert_eq!(
            test_case_data(&json!({"nums": [2, 7, 11], "target": 9})),
            "nums = [2, 7, 11]\ntarget = 9"
        );
        assert_eq!(
            test_case_data(&json!({"tree": {"val": 1}})),
            r#"tree = {"val":1}"#
        );
        assert_eq!(test_case_data(&json!({})), "{}");
    }

    #[test]
    fn json_strings_are_unpacked() {
        assert_eq!(test_case_data(&json!("[1,2,3]")), "[1, 2, 3]");
        assert_eq!(test_case_data(&json!("{\"s\": \"abc\"}")), "s = abc");
        assert_eq!(test_case_data(&json!("hello world")), "hello world");
        assert_eq!(test_case_data(&Value::Null), "null");
    }

    #[test]
    fn difficulty_is_normalised() {
        assert_eq!(difficulty_label("EASY"), "Easy");
        assert_eq!(difficulty_label("expert"), "expert");
    }
}
