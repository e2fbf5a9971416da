//! Build log interpreter.
//!
//! The log format is owned by the external build tool; the only contract
//! here is "return zero or more error lines, order preserved". The line
//! pattern covers the common compiler shapes: `error:`, `error[E0308]:`,
//! `error CS1002:`, case-insensitive.

use regex::Regex;
use std::sync::OnceLock;

fn error_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\berror\b(\[[a-z0-9]+\])?(\s+[a-z]{1,3}[0-9]{2,5})?\s*:")
            .expect("error pattern must compile")
    })
}

/// Extract error lines from a build log, in log order.
pub fn read_errors(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| error_pattern().is_match(line))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcc_style() {
        let log = "main.c:12:3: error: expected ';' before 'return'\n\
                   main.c:20:1: warning: unused variable 'x'\n";
        let errors = read_errors(log);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("expected ';'"));
    }

    #[test]
    fn test_rustc_style() {
        let log = "error[E0308]: mismatched types\n --> src/main.rs:4:9\n";
        let errors = read_errors(log);
        assert_eq!(errors, vec!["error[E0308]: mismatched types"]);
    }

    #[test]
    fn test_csc_style() {
        let log = "Program.cs(12,3): error CS1002: ; expected\n\
                   Program.cs(15,1): error CS0103: name 'foo' does not exist\n";
        let errors = read_errors(log);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("CS1002"));
        assert!(errors[1].contains("CS0103"));
    }

    #[test]
    fn test_javac_style() {
        let log = "Foo.java:8: error: cannot find symbol\n\
                   1 error\n";
        let errors = read_errors(log);
        assert_eq!(errors.len(), 1, "summary line has no colon, not an error");
    }

    #[test]
    fn test_order_preserved() {
        let log = "error: first\nsome context\nerror: second\nerror: third\n";
        let errors = read_errors(log);
        assert_eq!(errors, vec!["error: first", "error: second", "error: third"]);
    }

    #[test]
    fn test_clean_log_has_no_errors() {
        let log = "compiling 4 files\nall good, no errors reported\ndone\n";
        assert!(read_errors(log).is_empty());
    }

    #[test]
    fn test_empty_log() {
        assert!(read_errors("").is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let errors = read_errors("ERROR: out of memory\n");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_plural_not_matched() {
        // "errors:" is a summary header, not a diagnostic
        assert!(read_errors("errors: 0\n").is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_panics(content in ".*") {
                let _ = read_errors(&content);
            }

            #[test]
            fn selected_lines_appear_in_order(lines in prop::collection::vec("[a-z :!\\[\\]0-9]{0,30}", 0..20)) {
                let content = lines.join("\n");
                let errors = read_errors(&content);
                // every selected line occurs in the input, and selection
                // preserves relative order
                let mut cursor = 0;
                let input: Vec<&str> = content.lines().collect();
                for err in &errors {
                    let pos = input[cursor..]
                        .iter()
                        .position(|l| l == err)
                        .expect("selected line must come from the input");
                    cursor += pos + 1;
                }
            }
        }
    }
}
