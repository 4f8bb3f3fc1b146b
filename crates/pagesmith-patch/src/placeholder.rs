//! Image-placeholder location and substitution.
//!
//! Generated pages carry dummy image slots as `<div aria-label="image">`
//! or `<div class="img ...">` elements. The locator re-scans the full body
//! on every call: slot identity is positional, offsets shift as soon as
//! the body changes, and replacing one slot invalidates the rest. Callers
//! re-locate after each structural edit rather than diffing.

use crate::Patch;
use regex::Regex;
use std::sync::OnceLock;

/// A located image slot: byte offset of the match plus its original markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub offset: usize,
    pub markup: String,
}

fn placeholder_re() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    // Generated markup quotes attributes either way, so both styles match.
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(
            r#"(?is)<div[^>]*?(aria-label\s*=\s*(?:"image"|'image')|class\s*=\s*(?:"[^"]*img[^"]*"|'[^']*img[^']*'))[^>]*>.*?</div>"#,
        )
        .unwrap()
    })
}

fn class_attr_re() -> &'static Regex {
    static CLASS_ATTR_RE: OnceLock<Regex> = OnceLock::new();
    CLASS_ATTR_RE
        .get_or_init(|| Regex::new(r#"(?i)class\s*=\s*(?:"([^"]+)"|'([^']+)')"#).unwrap())
}

fn aria_label_re() -> &'static Regex {
    static ARIA_LABEL_RE: OnceLock<Regex> = OnceLock::new();
    ARIA_LABEL_RE
        .get_or_init(|| Regex::new(r#"(?i)aria-label\s*=\s*(?:"([^"]+)"|'([^']+)')"#).unwrap())
}

/// First non-empty capture of a two-branch quoted-attribute match.
fn quoted_value(re: &Regex, markup: &str) -> Option<String> {
    re.captures(markup).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    })
}

/// Scan the HTML for image placeholders, in document order.
///
/// Matches `<div>` elements whose opening tag carries `aria-label="image"`
/// or a `class` value containing `img`, with non-greedy inner content.
pub fn find_placeholders(html: &str) -> Vec<Placeholder> {
    placeholder_re()
        .find_iter(html)
        .map(|m| Placeholder {
            offset: m.start(),
            markup: m.as_str().to_string(),
        })
        .collect()
}

/// Replace the first verbatim occurrence of `markup` with an `<img>` tag.
///
/// The image tag keeps the placeholder's `class` and `aria-label` (as
/// `alt`, defaulting to `image`) and points `src` at `data_uri`. When the
/// markup no longer occurs verbatim (a prior edit rewrote the region) the
/// input is returned with `applied == false`.
pub fn replace_placeholder(html: &str, markup: &str, data_uri: &str) -> Patch {
    if markup.is_empty() || !html.contains(markup) {
        return Patch::unchanged(html);
    }

    let class = quoted_value(class_attr_re(), markup).unwrap_or_default();
    let alt = quoted_value(aria_label_re(), markup).unwrap_or_else(|| "image".to_string());

    let img = format!("<img src=\"{data_uri}\" alt=\"{alt}\" class=\"{class}\"/>");
    Patch::applied(html.replacen(markup, &img, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SLOTS: &str = concat!(
        "<section>\n",
        "  <div class=\"img img--hero\"></div>\n",
        "  <p>copy</p>\n",
        "  <div aria-label=\"image\" class=\"thumb\">alt text</div>\n",
        "</section>"
    );

    // =========================================================================
    // find_placeholders
    // =========================================================================

    #[test]
    fn test_no_placeholders() {
        assert!(find_placeholders("<div class=\"card\"><p>text</p></div>").is_empty());
    }

    #[test]
    fn test_finds_in_document_order() {
        let slots = find_placeholders(TWO_SLOTS);
        assert_eq!(slots.len(), 2);
        assert!(slots[0].offset < slots[1].offset);
        assert_eq!(slots[0].markup, "<div class=\"img img--hero\"></div>");
        assert_eq!(
            slots[1].markup,
            "<div aria-label=\"image\" class=\"thumb\">alt text</div>"
        );
    }

    #[test]
    fn test_matches_aria_label_without_img_class() {
        let slots = find_placeholders("<div aria-label=\"image\"></div>");
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn test_matches_class_substring() {
        let slots = find_placeholders("<div class=\"gallery-img rounded\"></div>");
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn test_matches_single_quoted_class() {
        let slots = find_placeholders("<div class='img'></div>");
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].markup, "<div class='img'></div>");
    }

    #[test]
    fn test_replace_single_quoted_attributes() {
        let html = "<div class='img img--2' aria-label='image'></div>";
        let patch = replace_placeholder(html, html, "data:image/png;base64,DD");
        assert!(patch.applied);
        assert_eq!(
            patch.output,
            "<img src=\"data:image/png;base64,DD\" alt=\"image\" class=\"img img--2\"/>"
        );
    }

    #[test]
    fn test_non_greedy_inner_content() {
        let html = "<div class=\"img\">a</div><div class=\"img\">b</div>";
        let slots = find_placeholders(html);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].markup, "<div class=\"img\">a</div>");
    }

    #[test]
    fn test_multiline_placeholder() {
        let html = "<div\n  class=\"img\"\n>\n</div>";
        assert_eq!(find_placeholders(html).len(), 1);
    }

    #[test]
    fn test_offsets_recomputed_per_scan() {
        let slots = find_placeholders(TWO_SLOTS);
        let patched = replace_placeholder(TWO_SLOTS, &slots[0].markup, "data:image/png;base64,AA");
        let rescanned = find_placeholders(&patched.output);
        assert_eq!(rescanned.len(), 1);
        assert_ne!(rescanned[0].offset, slots[1].offset);
    }

    // =========================================================================
    // replace_placeholder
    // =========================================================================

    #[test]
    fn test_replace_preserves_class_and_aria_label() {
        let slots = find_placeholders(TWO_SLOTS);
        let patch = replace_placeholder(
            TWO_SLOTS,
            &slots[1].markup,
            "data:image/png;base64,AAAA",
        );
        assert!(patch.applied);
        assert!(patch.output.contains(
            "<img src=\"data:image/png;base64,AAAA\" alt=\"image\" class=\"thumb\"/>"
        ));
        assert!(!patch.output.contains("aria-label=\"image\" class=\"thumb\""));
    }

    #[test]
    fn test_replace_without_aria_label_defaults_alt() {
        let html = "<div class=\"img img--hero\"></div>";
        let patch = replace_placeholder(html, html, "data:image/webp;base64,BB");
        assert_eq!(
            patch.output,
            "<img src=\"data:image/webp;base64,BB\" alt=\"image\" class=\"img img--hero\"/>"
        );
    }

    #[test]
    fn test_replace_first_occurrence_only() {
        let slot = "<div class=\"img\"></div>";
        let html = format!("{slot}{slot}");
        let patch = replace_placeholder(&html, slot, "data:image/png;base64,CC");
        assert!(patch.applied);
        assert_eq!(patch.output.matches(slot).count(), 1);
        assert_eq!(patch.output.matches("<img ").count(), 1);
    }

    #[test]
    fn test_replace_missing_markup_is_noop() {
        let patch = replace_placeholder("<p>nothing here</p>", "<div class=\"img\"></div>", "x");
        assert!(!patch.applied);
        assert_eq!(patch.output, "<p>nothing here</p>");
    }
}
