//! Inline-image handling.
//!
//! Uploaded images travel inside the document as `data:` URIs and only
//! become discrete files at export time. This module covers both
//! directions: building a data URI from raw bytes, and sweeping a final
//! HTML document for `src="data:..."` references to extract into
//! sequentially numbered asset files.

use crate::BundleError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// One extracted asset: archive-relative path plus decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    pub path: String,
    pub bytes: Vec<u8>,
}

fn data_src_re() -> &'static Regex {
    static DATA_SRC_RE: OnceLock<Regex> = OnceLock::new();
    DATA_SRC_RE.get_or_init(|| Regex::new(r#"src="data:[^"]+""#).unwrap())
}

/// File extension for a declared image MIME type. Unknown types fall back
/// to `png`.
pub fn extension_for_mime(mime: &str) -> &'static str {
    if mime.contains("image/webp") {
        "webp"
    } else if mime.contains("image/jpeg") || mime.contains("image/jpg") {
        "jpg"
    } else {
        "png"
    }
}

/// MIME type for an upload, judged by file extension. Only the accepted
/// upload types (png, jpg, jpeg, webp) map; anything else is `None`.
pub fn mime_for_upload(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Encode raw bytes as an inline `data:` URI.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64.encode(bytes))
}

/// Extract every inline image into an `assets/img_<n>.<ext>` file and
/// rewrite its reference to the relative path.
///
/// Scans `src="data:..."` occurrences in document order; `n` starts at 1
/// and increments per extracted image. Each hit rewrites the first
/// remaining textual occurrence of its data URI, so duplicate identical
/// URIs converge left to right across the pass (one asset per hit).
/// `data:` references without a base64 payload are left alone. The input
/// is never mutated; the rewritten copy is returned.
pub fn extract_inline_images(html: &str) -> Result<(String, Vec<AssetFile>), BundleError> {
    let mut rewritten = html.to_string();
    let mut assets: Vec<AssetFile> = Vec::new();
    let mut index = 1;

    for m in data_src_re().find_iter(html) {
        // src="data:<mime>;base64,<payload>" → data:<mime>;base64,<payload>
        let uri = &m.as_str()["src=\"".len()..m.as_str().len() - 1];
        let Some((head, payload)) = uri.split_once(";base64,") else {
            continue;
        };

        let bytes = BASE64
            .decode(payload)
            .map_err(|source| BundleError::InvalidImage { index, source })?;
        let path = format!("assets/img_{index}.{}", extension_for_mime(head));
        rewritten = rewritten.replacen(uri, &format!("./{path}"), 1);
        assets.push(AssetFile { path, bytes });
        index += 1;
    }

    Ok((rewritten, assets))
}
