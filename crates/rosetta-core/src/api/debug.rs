//! Raw response inspection for troubleshooting.
//!
//! When enabled, JSON responses are buffered in full, shown (optionally
//! truncated) and then handed unchanged to the deserializer.

use std::fmt::Write;

use crate::config::DebugLimit;
use crate::utils::take_chars;

/// A buffered response as seen before deserialization.
#[derive(Debug, Clone)]
pub struct ResponseSnapshot {
    pub method: String,
    pub path_and_query: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl ResponseSnapshot {
    /// Human-readable dump, or `None` when debug output is disabled.
    pub fn render(&self, limit: DebugLimit) -> Option<String> {
        let body_chars = self.body.chars().count();
        let body = match limit {
            DebugLimit::Disabled => return None,
            DebugLimit::Chars(max) if body_chars > max => format!(
                "{}... (truncated, showing {} of {} chars)",
                take_chars(&self.body, max),
                max,
                body_chars
            ),
            _ => self.body.clone(),
        };

        let mut out = String::new();
        let _ = writeln!(out, "=== DEBUG: API Response ===");
        let _ = writeln!(out, "Request: {} {}", self.method, self.path_and_query);
        let _ = writeln!(out, "Status: {}", self.status_line());
        let _ = writeln!(out, "Content-Type: {}", self.content_type.as_deref().unwrap_or(""));
        let _ = writeln!(out, "Body Length: {} characters", body_chars);
        let _ = writeln!(out, "Body:");
        let _ = writeln!(out, "{}", body);
        let _ = writeln!(out, "=========================");
        Some(out)
    }

    fn status_line(&self) -> String {
        match reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
        {
            Some(reason) => format!("{} {}", self.status, reason),
            None => self.status.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(body: &str) -> ResponseSnapshot {
        ResponseSnapshot {
            method: "GET".to_string(),
            path_and_query: "/api/v1/groups?limit=2".to_string(),
            status: 200,
            content_type: Some("application/json".to_string()),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_disabled_renders_nothing() {
        assert!(snapshot("[]").render(DebugLimit::Disabled).is_none());
    }

    #[test]
    fn test_full_body() {
        let out = snapshot(r#"[{"id":"g1"}]"#)
            .render(DebugLimit::Unlimited)
            .unwrap();
        assert!(out.contains("Request: GET /api/v1/groups?limit=2"));
        assert!(out.contains("Status: 200 OK"));
        assert!(out.contains("Body Length: 13 characters"));
        assert!(out.contains(r#"[{"id":"g1"}]"#));
        assert!(!out.contains("truncated"));
    }

    #[test]
    fn test_truncated_body() {
        let out = snapshot("abcdefghij").render(DebugLimit::Chars(4)).unwrap();
        assert!(out.contains("abcd... (truncated, showing 4 of 10 chars)"));

        // Under the limit prints in full
        let out = snapshot("abc").render(DebugLimit::Chars(4)).unwrap();
        assert!(out.contains("\nabc\n"));
    }
}
