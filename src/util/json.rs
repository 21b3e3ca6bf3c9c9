//! JSON output to stdout.

use serde_json::Value;

use crate::error::Result;

/// Renders a value as compact JSON lines: the members of an array are
/// rendered one by one, anything else as a single line.
pub fn to_lines(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| Ok(serde_json::to_string(item)?))
            .collect(),
        other => Ok(vec![serde_json::to_string(other)?]),
    }
}

/// Prints a value as compact JSON to stdout, one line per array member.
pub fn print_json(value: &Value) -> Result<()> {
    for line in to_lines(value)? {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arrays_become_one_line_per_member() {
        let lines = to_lines(&json!([{"id": "1"}, {"id": "2"}])).unwrap();
        assert_eq!(lines, vec![r#"{"id":"1"}"#, r#"{"id":"2"}"#]);
    }

    #[test]
    fn scalars_and_objects_are_single_lines() {
        assert_eq!(
            to_lines(&json!({"data": {"id": "1"}})).unwrap(),
            vec![r#"{"data":{"id":"1"}}"#]
        );
        assert_eq!(to_lines(&json!(null)).unwrap(), vec!["null"]);
    }
}
