//! Markup sanitizer.
//!
//! Strips `<script>` regions and inline `on*=` event-handler attributes
//! from model-returned markup before it is rendered or stored. Best-effort
//! denylisting on the expected markup shape, not a security boundary; no
//! attempt is made to repair malformed nesting.

use regex::Regex;
use std::sync::OnceLock;

fn script_re() -> &'static Regex {
    static SCRIPT_RE: OnceLock<Regex> = OnceLock::new();
    SCRIPT_RE.get_or_init(|| Regex::new(r"(?is)<script.*?>.*?</script>").unwrap())
}

fn event_attr_re() -> &'static Regex {
    static EVENT_ATTR_RE: OnceLock<Regex> = OnceLock::new();
    // Two quote alternations instead of a backreference; `\b` keeps the
    // match off the tail of words like `font=`.
    EVENT_ATTR_RE
        .get_or_init(|| Regex::new(r#"(?is)\bon\w+\s*=\s*("[^"]*"|'[^']*')"#).unwrap())
}

/// Remove `<script>...</script>` regions and `on<event>="..."` attributes.
///
/// Case-insensitive, spans newlines, idempotent. Returns the input
/// unchanged when nothing matches. Whitespace around a removed attribute
/// is left in place.
pub fn sanitize(html: &str) -> String {
    let html = script_re().replace_all(html, "");
    event_attr_re().replace_all(&html, "").into_owned()
}
