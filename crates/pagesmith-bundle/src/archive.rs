//! Deployable archive assembly.
//!
//! Packs the final site into one deflated zip: extracted image assets,
//! `index.html` with rewritten references, `styles.css`, and an
//! always-empty `script.js` stub (the generated pages are pure HTML+CSS).

use crate::assets::extract_inline_images;
use crate::BundleError;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Package the site as zip archive bytes.
///
/// Deterministic for a given input and never mutates the caller's
/// strings. With zero inline images the archive still holds the three
/// text entries.
pub fn package(html: &str, css: &str) -> Result<Vec<u8>, BundleError> {
    let (index_html, assets) = extract_inline_images(html)?;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for asset in &assets {
        writer.start_file(asset.path.as_str(), options)?;
        writer.write_all(&asset.bytes)?;
    }

    writer.start_file("index.html", options)?;
    writer.write_all(index_html.as_bytes())?;
    writer.start_file("styles.css", options)?;
    writer.write_all(css.as_bytes())?;
    writer.start_file("script.js", options)?;

    Ok(writer.finish()?.into_inner())
}
