//! Style-token extraction and rewriting.
//!
//! Design tokens live in a single reserved `:root{...}` block as CSS custom
//! properties (`--name: value`). Extraction parses that block into an
//! ordered [`TokenSet`]; rewriting replaces values in place, preserving
//! declaration order and appending tokens the block did not yet have.
//!
//! Only the first `:root` block is ever read or rewritten; later blocks
//! (malformed input) and all rules outside the block pass through
//! untouched.

use regex::Regex;
use std::sync::OnceLock;

/// Reserved prefix for design-token names.
pub const TOKEN_PREFIX: &str = "--";

fn root_block_re() -> &'static Regex {
    static ROOT_BLOCK_RE: OnceLock<Regex> = OnceLock::new();
    ROOT_BLOCK_RE.get_or_init(|| Regex::new(r"(?s):root\s*\{([^}]*)\}").unwrap())
}

/// An ordered name → value mapping of design tokens.
///
/// Insertion order is preserved so rewrites and appends stay deterministic;
/// inserting an existing name overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    entries: Vec<(String, String)>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a token, keeping first-insertion order.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for TokenSet {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut set = TokenSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

/// Parse the first `:root{...}` block into a token set.
///
/// Declarations are semicolon-separated `name: value` pairs. Names without
/// the `--` prefix and declarations with an empty value are skipped.
/// Returns an empty set when the CSS has no `:root` block.
pub fn extract_tokens(css: &str) -> TokenSet {
    let mut set = TokenSet::new();
    let Some(caps) = root_block_re().captures(css) else {
        return set;
    };

    for decl in caps[1].split(';') {
        if let Some((name, value)) = decl.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.starts_with(TOKEN_PREFIX) && !value.is_empty() {
                set.insert(name, value);
            }
        }
    }
    set
}

/// Rewrite the first `:root{...}` block with the given token updates.
///
/// Declarations whose name appears in `updates` get the new value;
/// the rest pass through in their original order and spelling. Update
/// names absent from the block are appended at its end. With no `:root`
/// block at all, a synthesized block holding exactly `updates` is
/// prepended to the CSS.
pub fn apply_tokens(css: &str, updates: &TokenSet) -> String {
    let Some(caps) = root_block_re().captures(css) else {
        let decls: Vec<String> = updates
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();
        return format!(":root{{{}}}\n{css}", decls.join(";"));
    };

    let m = caps.get(0).unwrap();
    let mut decls: Vec<String> = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for decl in caps[1].split(';') {
        if let Some((name, value)) = decl.split_once(':') {
            let name = name.trim();
            if let Some(new_value) = updates.get(name) {
                decls.push(format!("{name}: {new_value}"));
                seen.push(name);
            } else {
                decls.push(format!("{name}:{value}"));
            }
        }
    }
    for (name, value) in updates.iter() {
        if !seen.contains(&name) {
            decls.push(format!("{name}: {value}"));
        }
    }

    let block = format!(":root{{{}}}", decls.join(";"));
    format!("{}{}{}", &css[..m.start()], block, &css[m.end()..])
}

// =========================================================================
// Editor classification helpers
// =========================================================================

/// Whether a token value looks like a color (`#hex`, `rgb(...)`, `hsl(...)`).
pub fn is_color_value(value: &str) -> bool {
    value.contains('#') || value.contains("rgb") || value.contains("hsl")
}

/// Whether a token name is a corner-radius token.
pub fn is_radius_token(name: &str) -> bool {
    name.contains("radius") || name == "--r"
}

/// First integer run in a value, for seeding a pixel slider.
pub fn leading_px(value: &str) -> Option<u32> {
    let digits: String = value
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
