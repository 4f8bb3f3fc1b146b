//! Pagesmith AI Orchestrator
//!
//! The boundary to the remote text-generation service: renders the
//! generation and differential-edit prompts, performs the JSON
//! chat-completion call (bounded by a timeout and a short retry/backoff
//! policy), and threads responses through the sanitizer into an editing
//! session.
//!
//! ```text
//! SiteBrief → generation_prompt() → GenerationClient → sanitize() → Session
//! ```
//!
//! Everything interactive is strictly sequential; the remote call is the
//! only suspension point and a failed call always leaves the prior
//! document untouched.

pub mod brief;
pub mod client;
pub mod prompt;
pub mod session;

pub use brief::{parse_testimonials, split_list, SiteBrief, Testimonial, THEMES};
pub use client::{EditPatch, GeneratedPage, GenerationClient, DEFAULT_MODEL};
pub use session::{apply_patch, edit_session, generate_session};

/// Remote-orchestration error.
///
/// Local patch no-ops are not errors; they surface as `applied` flags in
/// `pagesmith-patch`. These cover the credential, the transport, and the
/// response contract.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("missing OPENAI_API_KEY; set it in the environment or a .env file")]
    MissingApiKey,

    #[error("request to the generation service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rate limited by the generation service (HTTP 429)")]
    RateLimited,

    #[error("generation service returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed generation response: {reason}")]
    MalformedResponse { reason: String },
}
