//! CLI output formatting utilities.
//!
//! - JSON syntax highlighting
//! - Short cell values for tables

use colored::Colorize;

/// Prints JSON with syntax highlighting.
///
/// Keys are cyan, strings green, numbers yellow, and literals magenta.
pub fn print_highlighted_json(value: &serde_json::Value) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    println!("{}", highlight_json(&json));
}

/// Scanner state while walking a JSON document.
#[derive(Default)]
struct Highlighter {
    out: String,
    token: String,
    in_string: bool,
    escaped: bool,
    expecting_value: bool,
    containers: Vec<char>,
}

impl Highlighter {
    fn push(&mut self, ch: char) {
        if self.in_string {
            self.push_in_string(ch);
            return;
        }
        match ch {
            '"' => {
                self.flush();
                self.token.push(ch);
                self.in_string = true;
            }
            ':' => {
                self.flush();
                self.out.push_str(&":".white().to_string());
                self.expecting_value = true;
            }
            ',' => {
                self.flush();
                self.out.push_str(&",".white().to_string());
                // Array items are values too
                self.expecting_value = self.containers.last() == Some(&'[');
            }
            '{' | '[' => {
                self.flush();
                self.out.push_str(&ch.to_string().white().bold().to_string());
                self.containers.push(ch);
                self.expecting_value = ch == '[';
            }
            '}' | ']' => {
                self.flush();
                self.out.push_str(&ch.to_string().white().bold().to_string());
                self.containers.pop();
            }
            _ => self.token.push(ch),
        }
    }

    fn push_in_string(&mut self, ch: char) {
        self.token.push(ch);
        if self.escaped {
            self.escaped = false;
        } else if ch == '\\' {
            self.escaped = true;
        } else if ch == '"' {
            let colored = if self.expecting_value { self.token.green() } else { self.token.cyan() };
            self.out.push_str(&colored.to_string());
            self.token.clear();
            self.in_string = false;
        }
    }

    /// Writes a pending bare token (whitespace, number, or literal).
    fn flush(&mut self) {
        if self.token.is_empty() {
            return;
        }
        let start = self.token.len() - self.token.trim_start().len();
        let end = self.token.trim_end().len();
        if start >= end {
            self.out.push_str(&self.token);
        } else {
            let (prefix, rest) = self.token.split_at(start);
            let (value, suffix) = rest.split_at(end - start);
            let value = match value {
                "true" | "false" | "null" => value.magenta().to_string(),
                _ if value.parse::<f64>().is_ok() => value.yellow().to_string(),
                _ => value.to_string(),
            };
            self.out.push_str(prefix);
            self.out.push_str(&value);
            self.out.push_str(suffix);
        }
        self.token.clear();
    }
}

/// Returns the JSON text with ANSI colors applied.
#[must_use]
pub fn highlight_json(json: &str) -> String {
    let mut highlighter = Highlighter::default();
    for ch in json.chars() {
        highlighter.push(ch);
    }
    highlighter.flush();
    highlighter.out
}

/// Shortens a value to `max_chars` characters, ending with an ellipsis when cut.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Formats a boolean as a colored mark.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value { "✓".green().to_string() } else { "✗".red().to_string() }
}

/// Formats an optional value, dimming the placeholder.
#[must_use]
pub fn format_optional(value: Option<&str>) -> String {
    value.map_or_else(|| "-".dimmed().to_string(), ToString::to_string)
}
