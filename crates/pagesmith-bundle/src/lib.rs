//! Pagesmith Bundler
//!
//! Turns an edited design document into a deployable static site: inline
//! `data:` images are extracted to discrete `assets/img_<n>.<ext>` files,
//! their references rewritten to relative paths, and the whole site
//! (HTML, CSS, empty script stub, assets) packed into one zip archive.
//!
//! ```text
//! (html, css) → package() → lp_site.zip { index.html, styles.css, script.js, assets/ }
//! ```

pub mod archive;
pub mod assets;

pub use archive::package;
pub use assets::{data_uri, extension_for_mime, extract_inline_images, mime_for_upload, AssetFile};

/// Packaging error.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// An inline image's base64 payload did not decode.
    #[error("asset {index}: invalid base64 image payload: {source}")]
    InvalidImage {
        index: usize,
        source: base64::DecodeError,
    },

    #[error("archive write failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("archive write failed: {0}")]
    Io(#[from] std::io::Error),
}
