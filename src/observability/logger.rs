//! Structured JSON logger
//!
//! - One log line = one event
//! - Event first, severity second, remaining fields sorted by key
//! - Synchronous, no buffering
//! - Written to stderr; stdout belongs to command output
//!
//! `Logger::capture` redirects the current thread's log lines into memory,
//! which is how callers observe diagnostics such as deprecation notices.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};

thread_local! {
    static CAPTURE: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Non-fatal notices the caller should act on
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = Self::format_line(severity, event, fields);
        let captured = CAPTURE.with(|c| match c.borrow_mut().as_mut() {
            Some(lines) => {
                lines.push(line.trim_end().to_string());
                true
            }
            None => false,
        });
        if !captured {
            Self::write_line(&line, &mut io::stderr());
        }
    }

    /// Runs `f` with this thread's log lines captured instead of written.
    ///
    /// Captures nest: an inner capture sees only its own lines and the
    /// outer capture resumes afterwards.
    pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
        let previous = CAPTURE.with(|c| c.borrow_mut().replace(Vec::new()));
        let result = f();
        let lines = CAPTURE
            .with(|c| std::mem::replace(&mut *c.borrow_mut(), previous))
            .unwrap_or_default();
        (result, lines)
    }

    fn write_line<W: Write>(line: &str, writer: &mut W) {
        // One write per line
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut output = String::with_capacity(256);

        output.push('{');

        output.push_str("\"event\":\"");
        Self::escape_json_string(&mut output, event);
        output.push('"');

        output.push_str(",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push_str(",\"");
            Self::escape_json_string(&mut output, key);
            output.push_str("\":\"");
            Self::escape_json_string(&mut output, value);
            output.push('"');
        }

        output.push('}');
        output.push('\n');
        output
    }

    fn escape_json_string(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }

    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture_one(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let ((), mut lines) = Logger::capture(|| Logger::log(severity, event, fields));
        assert_eq!(lines.len(), 1);
        lines.remove(0)
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_log_json_format() {
        let output = capture_one(Severity::Warn, "TEST_EVENT", &[]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "TEST_EVENT");
        assert_eq!(parsed["severity"], "WARN");
    }

    #[test]
    fn test_log_deterministic_ordering() {
        let output1 = capture_one(
            Severity::Info,
            "TEST",
            &[("zebra", "1"), ("apple", "2"), ("mango", "3")],
        );
        let output2 = capture_one(
            Severity::Info,
            "TEST",
            &[("apple", "2"), ("mango", "3"), ("zebra", "1")],
        );

        assert_eq!(output1, output2);

        let apple_pos = output1.find("apple").unwrap();
        let mango_pos = output1.find("mango").unwrap();
        let zebra_pos = output1.find("zebra").unwrap();
        assert!(apple_pos < mango_pos);
        assert!(mango_pos < zebra_pos);
    }

    #[test]
    fn test_log_escapes_special_chars() {
        let output = capture_one(
            Severity::Info,
            "TEST",
            &[("message", "use `scan_dataset` \"instead\"\nplease")],
        );

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["message"], "use `scan_dataset` \"instead\"\nplease");
    }

    #[test]
    fn test_format_is_one_line() {
        let line = Logger::format_line(Severity::Info, "TEST", &[("a", "1"), ("b", "2")]);
        assert_eq!(line.chars().filter(|c| *c == '\n').count(), 1);
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_capture_nests() {
        let (inner, outer) = Logger::capture(|| {
            Logger::info("OUTER_1", &[]);
            let ((), inner) = Logger::capture(|| Logger::info("INNER", &[]));
            Logger::info("OUTER_2", &[]);
            inner
        });
        assert_eq!(inner.len(), 1);
        assert!(inner[0].contains("INNER"));
        assert_eq!(outer.len(), 2);
        assert!(outer.iter().all(|l| !l.contains("INNER")));
    }

    #[test]
    fn test_capture_ends_after_closure() {
        let ((), lines) = Logger::capture(|| {});
        assert!(lines.is_empty());
        // Not captured, goes to stderr; must not panic
        Logger::trace("AFTER_CAPTURE", &[]);
    }
}
