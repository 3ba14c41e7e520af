//! CLI output formatting.
//!
//! - JSON syntax highlighting
//! - Cell formatting helpers for `tabled` rows

use std::fmt::Write as _;

use colored::Colorize;

/// Prints JSON with syntax highlighting.
///
/// Colors:
/// - Keys: Cyan
/// - Strings: Green
/// - Numbers: Yellow
/// - Booleans/Null: Magenta
/// - Brackets/Braces: White (bold)
pub fn print_highlighted_json(value: &serde_json::Value) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    println!("{}", highlight_json(&json));
}

/// Returns a pretty JSON string with ANSI colors applied.
#[must_use]
pub fn highlight_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    let mut in_string = false;
    let mut is_key = false;
    let mut escape_next = false;
    let mut after_colon = false;
    let mut token = String::new();

    for ch in json.chars() {
        if escape_next {
            token.push(ch);
            escape_next = false;
            continue;
        }
        if ch == '\\' && in_string {
            token.push(ch);
            escape_next = true;
            continue;
        }

        match ch {
            '"' if in_string => {
                token.push(ch);
                let colored = if is_key { token.cyan() } else { token.green() };
                let _ = write!(out, "{colored}");
                token.clear();
                in_string = false;
                is_key = false;
            }
            '"' => {
                flush_token(&mut out, &mut token, after_colon);
                token.push(ch);
                in_string = true;
                // a string not preceded by a colon is an object key
                is_key = !after_colon;
                after_colon = false;
            }
            ':' if !in_string => {
                flush_token(&mut out, &mut token, false);
                let _ = write!(out, "{}", ":".white());
                after_colon = true;
            }
            ',' if !in_string => {
                flush_token(&mut out, &mut token, after_colon);
                let _ = write!(out, "{}", ",".white());
                after_colon = false;
            }
            '{' | '}' | '[' | ']' if !in_string => {
                flush_token(&mut out, &mut token, after_colon);
                let _ = write!(out, "{}", ch.to_string().white().bold());
                after_colon = false;
            }
            _ => token.push(ch),
        }
    }

    flush_token(&mut out, &mut token, after_colon);
    out
}

/// Writes a pending non-string token, coloring literal values.
fn flush_token(out: &mut String, token: &mut String, is_value: bool) {
    if token.is_empty() {
        return;
    }

    let start = token.find(|c: char| !c.is_whitespace());
    match start {
        Some(start) if is_value => {
            let end = token.rfind(|c: char| !c.is_whitespace()).map_or(token.len(), |i| i + 1);
            let (prefix, value, suffix) = (&token[..start], &token[start..end], &token[end..]);

            if matches!(value, "true" | "false" | "null") {
                let _ = write!(out, "{prefix}{}{suffix}", value.magenta());
            } else if value.parse::<f64>().is_ok() {
                let _ = write!(out, "{prefix}{}{suffix}", value.yellow());
            } else {
                out.push_str(token);
            }
        }
        _ => out.push_str(token),
    }

    token.clear();
}

/// Formats an optional number for a table cell, `-` when unset.
#[must_use]
pub fn format_number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".dimmed().to_string(), |v| format!("{v}"))
}

/// Formats an optional boolean as a colored mark, `-` when unset.
#[must_use]
pub fn format_flag(value: Option<bool>) -> String {
    match value {
        Some(true) => "✓".green().to_string(),
        Some(false) => "✗".red().to_string(),
        None => "-".dimmed().to_string(),
    }
}

/// Truncates to `max_chars` characters, ending with an ellipsis when cut.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 1 {
        return "…".to_string();
    }
    let cut = s.char_indices().nth(max_chars - 1).map_or(s.len(), |(idx, _)| idx);
    format!("{}…", &s[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> String {
        colored::control::set_override(false);
        highlight_json(s)
    }

    #[test]
    fn test_highlight_preserves_text() {
        let json = "{\n  \"x\": 1.5,\n  \"ok\": true,\n  \"name\": \"a\\\"b\"\n}";
        assert_eq!(plain(json), json);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("settings", 10), "settings");
        assert_eq!(truncate("notification", 6), "notif…");
        assert_eq!(truncate("panel", 1), "…");
        assert_eq!(truncate("fenêtre flottante", 8), "fenêtre…");
    }

    #[test]
    fn test_format_flag() {
        assert!(format_flag(Some(true)).contains('✓'));
        assert!(format_flag(Some(false)).contains('✗'));
        assert!(format_flag(None).contains('-'));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(Some(300.0)), "300");
        assert!(format_number(None).contains('-'));
    }
}
