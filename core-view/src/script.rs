//! Page Script Helpers
//!
//! Scripts pushed into the page are built from fixed templates. Any value
//! that originates outside the shell (tokens, theme names, URIs) goes through
//! [`js_string_literal`] so it can never break out of its string.

use std::fmt;

/// A script ready for `WebPage::evaluate_script`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script(String);

impl Script {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Wraps the script in an IIFE with a `try/catch` that reports failures
    /// to the page console under `label`.
    pub fn guarded(self, label: &str) -> Self {
        Self(format!(
            "(function () {{\n  try {{\n{}\n  }} catch (e) {{ console.log({}, e); }}\n}})();",
            indent(&self.0, 4),
            js_string_literal(label)
        ))
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Script {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encodes `value` as a double-quoted JavaScript string literal.
pub fn js_string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_owned()).to_string()
}

/// `if (window.<hook>) { window.<hook>(<args>); }`
///
/// `hook` must be a plain identifier chosen by the shell; `args` must already
/// be encoded script expressions.
pub fn guarded_hook_call(hook: &str, args: &[String]) -> Script {
    Script(format!(
        "if (window.{hook}) {{ window.{hook}({}); }}",
        args.join(", ")
    ))
}

fn indent(body: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    body.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
