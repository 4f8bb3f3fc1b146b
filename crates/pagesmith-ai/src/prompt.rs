//! Prompt templates for generation and differential editing.
//!
//! The generation prompt asks for one strict JSON object so the service
//! can be called with `response_format: json_object`; the random style
//! seed perturbs layout variety between runs with an otherwise identical
//! brief.

use crate::brief::SiteBrief;

/// Style seeds are drawn from `1..=SEED_MAX`.
pub const SEED_MAX: u32 = 10_000_000;

/// System line for the differential-edit call.
pub const EDIT_SYSTEM_PROMPT: &str =
    "You are a front-end and design expert. You edit pages using safe, pure HTML+CSS only.";

/// Fallback instruction when the user submits an empty edit box.
pub const DEFAULT_EDIT_INSTRUCTION: &str =
    "Polish the whole page. Tighten the spacing and the contrast of the visual hierarchy.";

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items.join(", ")
}

/// Render the full-page generation prompt.
pub fn generation_prompt(brief: &SiteBrief, seed: u32) -> String {
    let testimonials = if brief.testimonials.is_empty() {
        "(none)".to_string()
    } else {
        brief
            .testimonials
            .iter()
            .map(|t| format!("  - {} | {} | {}", t.name, t.role, t.text))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are a landing-page designer and front-end developer. Generate a complete \
         HTML/CSS page from scratch for the requirements below.\n\
         \n\
         # Goal\n\
         - Build a landing page in the \"{theme}\" style that is visibly distinct at first glance\n\
         - Vary the HTML structure, decoration, typography, spacing, and motion\n\
         - No external CDNs or JS (pure HTML+CSS). Images may be dummy rectangles.\n\
         \n\
         # Input data\n\
         - title: {title}\n\
         - tagline: {tagline}\n\
         - meta_description: {meta_description}\n\
         - email: {email}\n\
         - about: {about}\n\
         - features: {features}\n\
         - works: {works}\n\
         - testimonials:\n{testimonials}\n\
         - style_seed: {seed}\n\
         \n\
         # Strict output\n\
         - Respond with exactly one JSON object. Schema:\n\
         \x20 {{\n\
         \x20   \"title\": \"string\",\n\
         \x20   \"meta\": {{\"description\": \"string\"}},\n\
         \x20   \"css\": \"string\",\n\
         \x20   \"body_html\": \"string\"\n\
         \x20 }}\n\
         \n\
         # Design rules\n\
         - The same \"{theme}\" theme must still differ in placement, shape, and decoration every run\n\
         - Vary section count, order, grid, and decoration every run\n\
         - Declare color/radius/shadow/border/background tokens in :root\n\
         - Use <div aria-label=\"image\" class=\"img img--X\"> dummies for images\n\
         - At least one mailto: call to action\n\
         \n\
         # Forbidden\n\
         - <script>, external URLs, @import, loading real image files\n",
        theme = brief.theme,
        title = brief.title,
        tagline = brief.tagline,
        meta_description = brief.meta_description,
        email = brief.email,
        about = brief.about,
        features = bullet_list(&brief.features),
        works = bullet_list(&brief.works),
        testimonials = testimonials,
        seed = seed,
    )
}

/// Render the differential-edit prompt around the current document.
pub fn edit_prompt(css: &str, body_html: &str, instruction: &str) -> String {
    format!(
        "Rewrite the 'css' and 'body_html' below directly, following the instruction.\n\
         - Respond with exactly one JSON object: {{ \"css\": \"...\", \"body_html\": \"...\" }}\n\
         - Leave a field blank to signal \"no change\"\n\
         - No script tags, external CDNs, or @import\n\
         - No on* attributes (onClick etc.)\n\
         - Keep images as the existing dummy divs/imgs (no new loads)\n\
         \n\
         [CURRENT CSS]\n\
         {css}\n\
         \n\
         [CURRENT BODY]\n\
         {body_html}\n\
         \n\
         [INSTRUCTION]\n\
         {instruction}\n"
    )
}
