//! Content patchers for the first heading and the lead paragraph.
//!
//! Both patchers locate a single well-known element (the first `<h1>`, and
//! the first `<p>`/`<div>` whose class is exactly `sub` or `lead`) and
//! read or replace its inner text while keeping the tag's attributes.
//! Replacement text is inserted literally; callers escape beforehand if
//! the text may contain markup.

use crate::Patch;
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn heading_re() -> &'static Regex {
    static HEADING_RE: OnceLock<Regex> = OnceLock::new();
    HEADING_RE.get_or_init(|| Regex::new(r"(?is)(<h1[^>]*>)(.*?)(</h1>)").unwrap())
}

fn sub_p_re() -> &'static Regex {
    static SUB_P_RE: OnceLock<Regex> = OnceLock::new();
    SUB_P_RE.get_or_init(|| {
        Regex::new(r#"(?is)(<p\s+class=["'](?:sub|lead)["'][^>]*>)(.*?)(</p>)"#).unwrap()
    })
}

fn sub_div_re() -> &'static Regex {
    static SUB_DIV_RE: OnceLock<Regex> = OnceLock::new();
    SUB_DIV_RE.get_or_init(|| {
        Regex::new(r#"(?is)(<div\s+class=["'](?:sub|lead)["'][^>]*>)(.*?)(</div>)"#).unwrap()
    })
}

/// First `<p class="sub|lead">` or `<div class="sub|lead">`, whichever
/// starts earlier. The closing tag is paired per tag kind, so a `<div>`
/// closer never terminates a `<p>` match.
fn subtext_captures(html: &str) -> Option<Captures<'_>> {
    let p = sub_p_re().captures(html);
    let d = sub_div_re().captures(html);
    match (p, d) {
        (Some(p), Some(d)) => {
            if p.get(0).unwrap().start() <= d.get(0).unwrap().start() {
                Some(p)
            } else {
                Some(d)
            }
        }
        (p, d) => p.or(d),
    }
}

/// Splice `text` between the opening and closing tag of a three-group match.
fn splice(html: &str, caps: &Captures<'_>, text: &str) -> String {
    let m = caps.get(0).unwrap();
    format!(
        "{}{}{}{}{}",
        &html[..m.start()],
        &caps[1],
        text,
        &caps[3],
        &html[m.end()..]
    )
}

/// Inner text of the first `<h1>`, trimmed. `None` when the page has none.
pub fn first_heading(html: &str) -> Option<String> {
    heading_re()
        .captures(html)
        .map(|caps| caps[2].trim().to_string())
}

/// Replace the inner text of the first `<h1>`, keeping its attributes.
pub fn replace_first_heading(html: &str, text: &str) -> Patch {
    match heading_re().captures(html) {
        Some(caps) => Patch::applied(splice(html, &caps, text)),
        None => Patch::unchanged(html),
    }
}

/// Inner text of the first `sub`/`lead` block, trimmed.
pub fn subtext(html: &str) -> Option<String> {
    subtext_captures(html).map(|caps| caps[2].trim().to_string())
}

/// Replace the inner text of the first `sub`/`lead` block, keeping its
/// attributes.
pub fn replace_subtext(html: &str, text: &str) -> Patch {
    match subtext_captures(html) {
        Some(caps) => Patch::applied(splice(html, &caps, text)),
        None => Patch::unchanged(html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // first_heading / replace_first_heading
    // =========================================================================

    #[test]
    fn test_extract_heading() {
        assert_eq!(
            first_heading("<h1>Yamada Studio</h1>"),
            Some("Yamada Studio".to_string())
        );
    }

    #[test]
    fn test_extract_heading_trims_and_spans_lines() {
        assert_eq!(
            first_heading("<h1 class=\"hero\">\n  Design that ships.\n</h1>"),
            Some("Design that ships.".to_string())
        );
    }

    #[test]
    fn test_extract_heading_absent() {
        assert_eq!(first_heading("<h2>not a hero</h2>"), None);
    }

    #[test]
    fn test_replace_heading() {
        let patch = replace_first_heading("<h1>Old</h1>", "New");
        assert!(patch.applied);
        assert_eq!(patch.output, "<h1>New</h1>");
    }

    #[test]
    fn test_replace_heading_preserves_attributes() {
        let patch = replace_first_heading("<h1 class=\"hero\" id=\"top\">Old</h1>", "New");
        assert_eq!(patch.output, "<h1 class=\"hero\" id=\"top\">New</h1>");
    }

    #[test]
    fn test_replace_heading_first_only() {
        let patch = replace_first_heading("<h1>A</h1><h1>B</h1>", "X");
        assert_eq!(patch.output, "<h1>X</h1><h1>B</h1>");
    }

    #[test]
    fn test_replace_heading_literal_text() {
        // Replacement is spliced, not regex-expanded
        let patch = replace_first_heading("<h1>Old</h1>", "Price: $1 & more");
        assert_eq!(patch.output, "<h1>Price: $1 & more</h1>");
    }

    #[test]
    fn test_replace_heading_absent_is_noop() {
        let patch = replace_first_heading("<p>no heading</p>", "New");
        assert!(!patch.applied);
        assert_eq!(patch.output, "<p>no heading</p>");
    }

    // =========================================================================
    // subtext / replace_subtext
    // =========================================================================

    #[test]
    fn test_extract_subtext_p_sub() {
        assert_eq!(
            subtext("<h1>T</h1><p class=\"sub\">tagline here</p>"),
            Some("tagline here".to_string())
        );
    }

    #[test]
    fn test_extract_subtext_div_lead() {
        assert_eq!(
            subtext("<div class=\"lead\">lead copy</div>"),
            Some("lead copy".to_string())
        );
    }

    #[test]
    fn test_extract_subtext_single_quotes() {
        assert_eq!(subtext("<p class='lead'>quoted</p>"), Some("quoted".to_string()));
    }

    #[test]
    fn test_extract_subtext_requires_exact_class() {
        assert_eq!(subtext("<p class=\"subtitle\">no</p>"), None);
    }

    #[test]
    fn test_subtext_earliest_of_both_tags() {
        let html = "<div class=\"lead\">first</div><p class=\"sub\">second</p>";
        assert_eq!(subtext(html), Some("first".to_string()));
    }

    #[test]
    fn test_subtext_pairs_closing_tag_per_kind() {
        // The <p> match must end at </p>, not at the outer div's closer
        let html = "<div class=\"wrap\"><p class=\"sub\">inner</p></div>";
        assert_eq!(subtext(html), Some("inner".to_string()));
    }

    #[test]
    fn test_replace_subtext() {
        let patch = replace_subtext("<p class=\"sub\">old</p>", "new tagline");
        assert!(patch.applied);
        assert_eq!(patch.output, "<p class=\"sub\">new tagline</p>");
    }

    #[test]
    fn test_replace_subtext_first_only() {
        let html = "<p class=\"sub\">a</p><p class=\"sub\">b</p>";
        let patch = replace_subtext(html, "x");
        assert_eq!(patch.output, "<p class=\"sub\">x</p><p class=\"sub\">b</p>");
    }

    #[test]
    fn test_replace_subtext_absent_is_noop() {
        let patch = replace_subtext("<p class=\"body\">text</p>", "x");
        assert!(!patch.applied);
        assert_eq!(patch.output, "<p class=\"body\">text</p>");
    }
}
