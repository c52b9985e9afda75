//! Pure shaping helpers that turn API payloads into display strings.

use serde_json::Value;

/// Sidebar labels longer than this are truncated for display.
pub const LABEL_LIMIT: usize = 30;

const DATE_FIELDS: [(&str, &str); 4] = [("reign", ""), ("year", "년"), ("month", "월"), ("day", "일")];

/// Render a JSON scalar the way it should appear in a table cell.
/// Arrays collapse to a `", "`-joined string; objects fall back to compact JSON.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// Loose truthiness used for optional payload fields such as `error`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Format a structured `{reign, year, month, day}` date.
///
/// Present fields are joined by spaces in that order, with the unit suffixes
/// 년/월/일 on year, month and day. Absent, empty or zero fields are left out.
pub fn format_date(date: Option<&Value>) -> String {
    let Some(Value::Object(fields)) = date else {
        return String::new();
    };

    DATE_FIELDS
        .iter()
        .filter_map(|(key, suffix)| {
            fields
                .get(*key)
                .filter(|v| is_truthy(v))
                .map(|v| format!("{}{}", scalar_text(v), suffix))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flatten a nested metadata mapping into `(dotted.path, value)` rows.
///
/// Objects recurse, arrays become a single comma-joined cell, and rows whose
/// value is null or empty are dropped. Key order follows the payload.
pub fn flatten_metadata(metadata: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into(metadata, "", &mut rows);
    rows
}

fn flatten_into(value: &Value, prefix: &str, rows: &mut Vec<(String, String)>) {
    let Value::Object(fields) = value else {
        return;
    };

    for (key, value) in fields {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Object(_) => flatten_into(value, &path, rows),
            Value::Null => {}
            other => {
                let text = scalar_text(other);
                if !text.is_empty() {
                    rows.push((path, text));
                }
            }
        }
    }
}

/// Paragraphs worth rendering: empty and whitespace-only entries are skipped.
pub fn visible_paragraphs(paragraphs: &[String]) -> impl Iterator<Item = &str> {
    paragraphs
        .iter()
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
}

/// CSS suffix for a commentary type badge.
pub fn commentary_class(commentary_type: Option<&str>) -> &'static str {
    match commentary_type {
        Some("注") => "zhu",
        Some("疏") => "shu",
        Some("集注") => "jizhu",
        Some("大全") => "daquan",
        _ => "other",
    }
}

/// Truncate a label to `limit` characters, appending an ellipsis when cut.
pub fn truncate_label(label: &str, limit: usize) -> String {
    if label.chars().count() > limit {
        let mut cut: String = label.chars().take(limit).collect();
        cut.push('…');
        cut
    } else {
        label.to_string()
    }
}

/// `1234567` → `"1,234,567"`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
