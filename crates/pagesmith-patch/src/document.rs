//! The design document and editing session.
//!
//! A [`DesignDocument`] is the HTML + CSS pair being worked on: the HTML
//! is a full page whose single `<body>` region holds the generated
//! content, the CSS is the stylesheet served next to it. A [`Session`]
//! owns one document plus the current image-slot list and funnels every
//! local edit through it, so nothing lives in ambient process state and
//! independent sessions never share fixtures.

use crate::placeholder::{find_placeholders, replace_placeholder, Placeholder};
use crate::tokens::{apply_tokens, TokenSet};
use crate::{content, Patch};

/// The generated/edited HTML + CSS pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignDocument {
    pub html: String,
    pub css: String,
}

impl DesignDocument {
    /// Wrap a generated body in the standard page shell: charset and
    /// viewport metas, title, meta description, and a `./styles.css` link.
    pub fn from_generated(title: &str, meta_description: &str, body: &str, css: &str) -> Self {
        let html = format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             \x20 <meta charset=\"utf-8\" />\n\
             \x20 <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
             \x20 <title>{title} – Landing</title>\n\
             \x20 <meta name=\"description\" content=\"{meta_description}\">\n\
             \x20 <link rel=\"stylesheet\" href=\"./styles.css\" />\n\
             </head>\n\
             <body>\n\
             {body}\n\
             </body>\n\
             </html>"
        );
        Self {
            html,
            css: css.to_string(),
        }
    }

    /// The editable content between the first `<body>` and the last
    /// `</body>`. `None` when the shell is malformed.
    pub fn body(&self) -> Option<&str> {
        let start = self.html.find("<body>")? + "<body>".len();
        let end = self.html.rfind("</body>")?;
        self.html.get(start..end)
    }

    /// Swap the `<body>` region wholesale. No-op on a malformed shell.
    pub fn replace_body(&mut self, body: &str) -> bool {
        let Some(start) = self.html.find("<body>") else {
            return false;
        };
        let start = start + "<body>".len();
        let Some(end) = self.html.rfind("</body>") else {
            return false;
        };
        if end < start {
            return false;
        }
        self.html.replace_range(start..end, body);
        true
    }
}

/// One editing session: the current document plus its image-slot list.
///
/// The slot list is recomputed from the current body after every body
/// mutation; slots are positional, so it is never patched incrementally.
#[derive(Debug, Clone)]
pub struct Session {
    doc: DesignDocument,
    slots: Vec<Placeholder>,
}

impl Session {
    pub fn new(doc: DesignDocument) -> Self {
        let mut session = Self {
            doc,
            slots: Vec::new(),
        };
        session.refresh_slots();
        session
    }

    pub fn document(&self) -> &DesignDocument {
        &self.doc
    }

    pub fn slots(&self) -> &[Placeholder] {
        &self.slots
    }

    /// Replace the whole document (after a generation or a remote edit)
    /// and rediscover the slots.
    pub fn set_document(&mut self, doc: DesignDocument) {
        self.doc = doc;
        self.refresh_slots();
    }

    /// Re-scan the current body for image placeholders.
    pub fn refresh_slots(&mut self) {
        self.slots = find_placeholders(self.doc.body().unwrap_or_default());
    }

    /// Rewrite the stylesheet's `:root` token block.
    pub fn apply_tokens(&mut self, updates: &TokenSet) {
        self.doc.css = apply_tokens(&self.doc.css, updates);
    }

    /// Extracted token set of the current stylesheet.
    pub fn tokens(&self) -> TokenSet {
        crate::tokens::extract_tokens(&self.doc.css)
    }

    /// Replace the first heading's text. Returns whether a heading existed.
    pub fn set_heading(&mut self, text: &str) -> bool {
        self.patch_body(|body| content::replace_first_heading(body, text))
    }

    /// Replace the lead/sub text. Returns whether the block existed.
    pub fn set_subtext(&mut self, text: &str) -> bool {
        self.patch_body(|body| content::replace_subtext(body, text))
    }

    /// Swap slot `index` (0-based) for an inline image. Returns `false`
    /// when the slot is gone or its markup no longer matches verbatim.
    pub fn replace_image(&mut self, index: usize, data_uri: &str) -> bool {
        let Some(slot) = self.slots.get(index) else {
            return false;
        };
        let markup = slot.markup.clone();
        self.patch_body(|body| replace_placeholder(body, &markup, data_uri))
    }

    /// Single-file preview: current body with the stylesheet inlined.
    pub fn preview(&self) -> String {
        format!(
            "<!DOCTYPE html><html><head><meta charset='utf-8'>\n\
             <meta name='viewport' content='width=device-width, initial-scale=1'>\n\
             <style>{}</style></head><body>{}</body></html>",
            self.doc.css,
            self.doc.body().unwrap_or_default()
        )
    }

    fn patch_body(&mut self, patch: impl FnOnce(&str) -> Patch) -> bool {
        let Some(body) = self.doc.body() else {
            return false;
        };
        let result = patch(body);
        if result.applied {
            self.doc.replace_body(&result.output);
            self.refresh_slots();
        }
        result.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> DesignDocument {
        DesignDocument::from_generated(
            "Yamada Studio",
            "Ship small, polish continuously.",
            "<h1>Hi</h1>\n<p class=\"sub\">tagline</p>\n<div class=\"img\"></div>",
            ":root{--c: #111}",
        )
    }

    // =========================================================================
    // DesignDocument
    // =========================================================================

    #[test]
    fn test_shell_contains_head_fields() {
        let d = doc();
        assert!(d.html.starts_with("<!DOCTYPE html>"));
        assert!(d.html.contains("<title>Yamada Studio – Landing</title>"));
        assert!(d
            .html
            .contains("<meta name=\"description\" content=\"Ship small, polish continuously.\">"));
        assert!(d.html.contains("<link rel=\"stylesheet\" href=\"./styles.css\" />"));
    }

    #[test]
    fn test_body_round_trip() {
        let d = doc();
        assert_eq!(
            d.body(),
            Some("\n<h1>Hi</h1>\n<p class=\"sub\">tagline</p>\n<div class=\"img\"></div>\n")
        );
    }

    #[test]
    fn test_body_malformed_shell() {
        let d = DesignDocument {
            html: "<h1>no body tags</h1>".to_string(),
            css: String::new(),
        };
        assert_eq!(d.body(), None);
    }

    #[test]
    fn test_replace_body() {
        let mut d = doc();
        assert!(d.replace_body("<h1>New</h1>"));
        assert_eq!(d.body(), Some("<h1>New</h1>"));
        assert!(d.html.ends_with("</body>\n</html>"));
    }

    #[test]
    fn test_replace_body_malformed_shell() {
        let mut d = DesignDocument {
            html: "plain".to_string(),
            css: String::new(),
        };
        assert!(!d.replace_body("<p>x</p>"));
        assert_eq!(d.html, "plain");
    }

    // =========================================================================
    // Session
    // =========================================================================

    #[test]
    fn test_session_discovers_slots() {
        let session = Session::new(doc());
        assert_eq!(session.slots().len(), 1);
    }

    #[test]
    fn test_session_tokens() {
        let session = Session::new(doc());
        assert_eq!(session.tokens().get("--c"), Some("#111"));
    }

    #[test]
    fn test_session_apply_tokens() {
        let mut session = Session::new(doc());
        let mut updates = TokenSet::new();
        updates.insert("--c", "#0af");
        session.apply_tokens(&updates);
        assert_eq!(session.tokens().get("--c"), Some("#0af"));
    }

    #[test]
    fn test_session_set_heading() {
        let mut session = Session::new(doc());
        assert!(session.set_heading("Hello"));
        assert!(session.document().html.contains("<h1>Hello</h1>"));
    }

    #[test]
    fn test_session_set_heading_absent() {
        let mut session = Session::new(DesignDocument::from_generated(
            "t",
            "d",
            "<p>no heading</p>",
            "",
        ));
        assert!(!session.set_heading("Hello"));
    }

    #[test]
    fn test_session_replace_image_consumes_slot() {
        let mut session = Session::new(doc());
        assert!(session.replace_image(0, "data:image/png;base64,AAAA"));
        assert!(session
            .document()
            .html
            .contains("src=\"data:image/png;base64,AAAA\""));
        assert!(session.slots().is_empty());
    }

    #[test]
    fn test_session_replace_image_out_of_range() {
        let mut session = Session::new(doc());
        assert!(!session.replace_image(3, "data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_session_set_document_rescans() {
        let mut session = Session::new(doc());
        session.set_document(DesignDocument::from_generated(
            "t",
            "d",
            "<div class=\"img\">a</div><div aria-label=\"image\"></div>",
            "",
        ));
        assert_eq!(session.slots().len(), 2);
    }

    #[test]
    fn test_preview_inlines_css_and_body() {
        let session = Session::new(doc());
        let preview = session.preview();
        assert!(preview.contains("<style>:root{--c: #111}</style>"));
        assert!(preview.contains("<h1>Hi</h1>"));
        assert!(!preview.contains("styles.css"));
    }
}
