//! The site brief: everything the user tells us about the business.
//!
//! A brief is deserialized from a TOML file by the CLI, but the delimited
//! testimonial lines and comma-separated lists also parse from plain text
//! so hosts with form-style input can reuse the same grammar.

use serde::{Deserialize, Serialize};

/// Curated style themes offered to the generator.
pub const THEMES: &[&str] = &[
    "simple",
    "business",
    "cute",
    "stylish",
    "fairytale",
    "comic",
    "japanese",
    "japanese modern",
    "minimal",
    "cyber",
    "retro pop",
    "elegant",
    "natural",
    "dark mode",
    "magazine",
    "cool",
];

/// Input data for one landing page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SiteBrief {
    /// Site title / business name.
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub works: Vec<String>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "simple".to_string()
}

/// One customer voice, parsed from a `name|role|text` line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub text: String,
}

/// Parse `name|role|text` lines. Lines with fewer than three fields are
/// skipped; extra `|` separators stay inside the text field.
pub fn parse_testimonials(raw: &str) -> Vec<Testimonial> {
    raw.lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('|').map(str::trim).collect();
            if parts.len() >= 3 {
                Some(Testimonial {
                    name: parts[0].to_string(),
                    role: parts[1].to_string(),
                    text: parts[2..].join("|"),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Split a comma-separated list, trimming entries and dropping empties.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_testimonials() {
        let rows = parse_testimonials(
            "Hanako Sato|PM|Decisions got dramatically faster.\n\
             Jiro Suzuki|BizDev|Great balance of speed and quality.",
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Hanako Sato");
        assert_eq!(rows[0].role, "PM");
        assert_eq!(rows[1].text, "Great balance of speed and quality.");
    }

    #[test]
    fn test_parse_testimonials_keeps_extra_separators_in_text() {
        let rows = parse_testimonials("A|B|left|right");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "left|right");
    }

    #[test]
    fn test_parse_testimonials_skips_short_lines() {
        let rows = parse_testimonials("only|two\n\nA|B|C");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "A");
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("fast iteration, clear UI , , scalable design"),
            vec!["fast iteration", "clear UI", "scalable design"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_brief_from_toml() {
        let brief: SiteBrief = toml::from_str(
            r#"
            title = "Yamada Studio"
            tagline = "Design that ships."
            meta_description = "Design and build, shipped small and fast."
            email = "hello@example.com"
            about = "Osaka-based design and engineering."
            features = ["fast iteration", "clear UI"]
            works = ["SaaS dashboard", "EC feature pages"]
            theme = "minimal"

            [[testimonials]]
            name = "Hanako Sato"
            role = "PM"
            text = "Decisions got dramatically faster."
            "#,
        )
        .unwrap();

        assert_eq!(brief.title, "Yamada Studio");
        assert_eq!(brief.features.len(), 2);
        assert_eq!(brief.testimonials[0].role, "PM");
        assert_eq!(brief.theme, "minimal");
    }

    #[test]
    fn test_brief_defaults() {
        let brief: SiteBrief = toml::from_str("title = \"X\"").unwrap();
        assert_eq!(brief.theme, "simple");
        assert!(brief.features.is_empty());
        assert!(brief.tagline.is_empty());
    }

    #[test]
    fn test_theme_list_is_nonempty() {
        assert!(THEMES.contains(&"minimal"));
        assert!(THEMES.len() >= 10);
    }
}
