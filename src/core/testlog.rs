//! Test log interpreter.
//!
//! The test runner emits a tree-shaped JSON report: suites nest
//! arbitrarily, and a failing case carries a `"failure"` record with a
//! `"message"` field. Every failure at any depth is selected, in document
//! order (serde_json is built with `preserve_order`).

use serde_json::Value;

/// Diagnostic used when a failure record has no usable message.
pub const MISSING_MESSAGE: &str = "test failure without message";

/// Extract failure messages from a parsed test report, in document order.
pub fn read_failures(root: &Value) -> Vec<String> {
    let mut messages = Vec::new();
    walk(root, &mut messages);
    messages
}

fn walk(node: &Value, messages: &mut Vec<String>) {
    match node {
        Value::Object(fields) => {
            for (key, value) in fields {
                if key == "failure" {
                    collect_failure(value, messages);
                } else {
                    walk(value, messages);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, messages);
            }
        }
        _ => {}
    }
}

fn collect_failure(record: &Value, messages: &mut Vec<String>) {
    match record {
        // a list under "failure" is a list of failure records
        Value::Array(items) => {
            for item in items {
                collect_failure(item, messages);
            }
        }
        _ => {
            match record.get("message") {
                Some(Value::String(text)) => messages.push(text.clone()),
                _ => messages.push(MISSING_MESSAGE.to_string()),
            }
            // failure records may themselves nest further failures
            walk(record, messages);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_report() {
        let report = json!({
            "suite": "week3-stack",
            "cases": [
                {"name": "push_pop", "failure": {"message": "expected 4, got 3"}},
                {"name": "peek", "passed": true},
                {"name": "null_guard", "failure": {"message": "NullReference"}}
            ]
        });
        assert_eq!(
            read_failures(&report),
            vec!["expected 4, got 3", "NullReference"]
        );
    }

    #[test]
    fn test_nested_suites_document_order() {
        let report = json!({
            "suites": [
                {
                    "name": "outer",
                    "cases": [{"failure": {"message": "first"}}],
                    "suites": [
                        {"cases": [{"failure": {"message": "second"}}]}
                    ]
                },
                {"cases": [{"failure": {"message": "third"}}]}
            ]
        });
        assert_eq!(read_failures(&report), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_all_passing() {
        let report = json!({
            "cases": [{"name": "a", "passed": true}, {"name": "b", "passed": true}]
        });
        assert!(read_failures(&report).is_empty());
    }

    #[test]
    fn test_failure_without_message() {
        let report = json!({
            "cases": [
                {"failure": {"kind": "assertion"}},
                {"failure": {"message": "after the malformed one"}}
            ]
        });
        assert_eq!(
            read_failures(&report),
            vec![MISSING_MESSAGE, "after the malformed one"]
        );
    }

    #[test]
    fn test_failure_list() {
        let report = json!({
            "failure": [
                {"message": "one"},
                {"message": "two"}
            ]
        });
        assert_eq!(read_failures(&report), vec!["one", "two"]);
    }

    #[test]
    fn test_non_string_message_is_malformed() {
        let report = json!({"failure": {"message": 42}});
        assert_eq!(read_failures(&report), vec![MISSING_MESSAGE]);
    }

    #[test]
    fn test_empty_report() {
        assert!(read_failures(&json!({})).is_empty());
        assert!(read_failures(&json!(null)).is_empty());
    }
}
