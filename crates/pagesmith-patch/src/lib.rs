//! Pagesmith Patch Engine
//!
//! Local editing operations over a generated landing page: markup
//! sanitization, `:root` style-token extraction and rewriting, image
//! placeholder location/substitution, and first-heading / lead-text
//! patching.
//!
//! Everything here works on plain text with compiled regular expressions
//! against the markup shapes the generation prompt asks for (quoted
//! attributes, a single `:root` block, `<div>` image placeholders). It is
//! deliberately not a general HTML/CSS parser: input that strays from the
//! expected shape is left alone rather than repaired.
//!
//! ```text
//! generated body ─ sanitize() ─▶ DesignDocument ─ tokens/content/placeholder ─▶ edited page
//! ```

pub mod content;
pub mod document;
pub mod placeholder;
pub mod sanitize;
pub mod tokens;

pub use content::{first_heading, replace_first_heading, replace_subtext, subtext};
pub use document::{DesignDocument, Session};
pub use placeholder::{find_placeholders, replace_placeholder, Placeholder};
pub use sanitize::sanitize;
pub use tokens::{apply_tokens, extract_tokens, TokenSet};

/// Result of a locate-and-replace operation.
///
/// Absence of the target pattern is an expected outcome with free-form
/// generated markup, so it is reported as `applied == false` with the
/// input passed through unchanged, never as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// The (possibly rewritten) text.
    pub output: String,
    /// Whether the target pattern was found and replaced.
    pub applied: bool,
}

impl Patch {
    /// A patch that found and rewrote its target.
    pub fn applied(output: String) -> Self {
        Self {
            output,
            applied: true,
        }
    }

    /// A no-op patch: the target pattern was absent.
    pub fn unchanged(input: &str) -> Self {
        Self {
            output: input.to_string(),
            applied: false,
        }
    }
}
