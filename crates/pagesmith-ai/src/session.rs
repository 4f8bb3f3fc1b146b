//! Session-level orchestration.
//!
//! Glue between the remote calls and the local editing session: a
//! generation replaces the document wholesale, an edit applies only the
//! non-blank response fields, and both re-discover the image slots from
//! the new body. On any remote error the caller's session is untouched.

use crate::client::{EditPatch, GenerationClient};
use crate::prompt::DEFAULT_EDIT_INSTRUCTION;
use crate::{brief::SiteBrief, AiError};
use pagesmith_patch::{DesignDocument, Session};

/// Generate a fresh page from the brief and open a session on it.
///
/// The page shell (title, meta description) comes from the brief; the
/// response's own `title`/`meta` are discarded.
pub fn generate_session(
    client: &GenerationClient,
    brief: &SiteBrief,
) -> Result<Session, AiError> {
    let page = client.generate(brief)?;
    let doc = DesignDocument::from_generated(
        &brief.title,
        &brief.meta_description,
        &page.body_html,
        &page.css,
    );
    Ok(Session::new(doc))
}

/// Run a differential edit over the session's current document.
///
/// An empty instruction falls back to [`DEFAULT_EDIT_INSTRUCTION`].
/// Returns whether the document changed.
pub fn edit_session(
    session: &mut Session,
    client: &GenerationClient,
    instruction: &str,
) -> Result<bool, AiError> {
    let instruction = match instruction.trim() {
        "" => DEFAULT_EDIT_INSTRUCTION,
        other => other,
    };

    let body = session.document().body().unwrap_or_default().to_string();
    let patch = client.edit(&session.document().css, &body, instruction)?;
    Ok(apply_patch(session, patch))
}

/// Apply a differential edit to the session: non-blank `css` replaces the
/// stylesheet, a non-blank `body_html` replaces the `<body>` region, and
/// the slot list is rediscovered. Returns whether anything changed.
pub fn apply_patch(session: &mut Session, patch: EditPatch) -> bool {
    let css_changed = !patch.css.trim().is_empty();
    let body_changed = !patch.body_html.trim().is_empty();
    if !css_changed && !body_changed {
        return false;
    }

    let mut doc = session.document().clone();
    if css_changed {
        doc.css = patch.css;
    }
    if body_changed {
        doc.replace_body(&patch.body_html);
    }
    session.set_document(doc);
    true
}
