//! WASM bindings for the pagesmith patch engine.
//!
//! Exposes the local editing operations to JavaScript hosts: sanitizing,
//! token extraction/rewriting, placeholder scanning/substitution, and the
//! heading/subtext patchers. Token sets travel as plain JS objects,
//! placeholders as an array of `{ offset, markup }`.

use pagesmith_patch::{content, placeholder, tokens, TokenSet};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[derive(Serialize)]
struct SlotEntry {
    offset: usize,
    markup: String,
}

/// Strip `<script>` blocks and inline event-handler attributes.
#[wasm_bindgen]
pub fn sanitize(html: &str) -> String {
    pagesmith_patch::sanitize(html)
}

/// Extract the `:root` token block as a plain `{ "--name": "value" }` object.
#[wasm_bindgen(js_name = extractTokens)]
pub fn extract_tokens(css: &str) -> Result<JsValue, JsError> {
    let set = tokens::extract_tokens(css);
    let obj = js_sys::Object::new();
    for (name, value) in set.iter() {
        js_sys::Reflect::set(&obj, &name.into(), &value.into())
            .map_err(|_| JsError::new("Failed to set token property"))?;
    }
    Ok(obj.into())
}

/// Rewrite the `:root` block with updates given as a `{ name: value }` object.
#[wasm_bindgen(js_name = applyTokens)]
pub fn apply_tokens(css: &str, updates: JsValue) -> Result<String, JsError> {
    let obj: js_sys::Object = updates
        .dyn_into()
        .map_err(|_| JsError::new("applyTokens expects an object of token updates"))?;
    // Object.entries keeps JS insertion order, so appends stay deterministic.
    let pairs: Vec<(String, String)> =
        serde_wasm_bindgen::from_value(js_sys::Object::entries(&obj).into())
            .map_err(|e| JsError::new(&e.to_string()))?;
    let set: TokenSet = pairs.into_iter().collect();
    Ok(tokens::apply_tokens(css, &set))
}

/// Scan for image placeholders; returns `[{ offset, markup }, ...]`.
#[wasm_bindgen(js_name = findPlaceholders)]
pub fn find_placeholders(html: &str) -> Result<JsValue, JsError> {
    let slots: Vec<SlotEntry> = placeholder::find_placeholders(html)
        .into_iter()
        .map(|slot| SlotEntry {
            offset: slot.offset,
            markup: slot.markup,
        })
        .collect();
    serde_wasm_bindgen::to_value(&slots).map_err(|e| JsError::new(&e.to_string()))
}

/// Swap a located placeholder for an inline image. Returns the input
/// unchanged when the markup no longer matches.
#[wasm_bindgen(js_name = replacePlaceholder)]
pub fn replace_placeholder(html: &str, markup: &str, data_uri: &str) -> String {
    placeholder::replace_placeholder(html, markup, data_uri).output
}

/// Inner text of the first `<h1>`, or an empty string.
#[wasm_bindgen(js_name = firstHeading)]
pub fn first_heading(html: &str) -> String {
    content::first_heading(html).unwrap_or_default()
}

/// Replace the first `<h1>`'s text, keeping attributes.
#[wasm_bindgen(js_name = replaceFirstHeading)]
pub fn replace_first_heading(html: &str, text: &str) -> String {
    content::replace_first_heading(html, text).output
}

/// Inner text of the first `sub`/`lead` block, or an empty string.
#[wasm_bindgen]
pub fn subtext(html: &str) -> String {
    content::subtext(html).unwrap_or_default()
}

/// Replace the first `sub`/`lead` block's text, keeping attributes.
#[wasm_bindgen(js_name = replaceSubtext)]
pub fn replace_subtext(html: &str, text: &str) -> String {
    content::replace_subtext(html, text).output
}

/// Get the patch-engine version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
