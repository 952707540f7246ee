//! Keyword vocabularies used to recognize dark backgrounds by name.
//!
//! Numeric luminance only works when an element reports a solid color. Hero
//! sections, gradients and utility-class driven layouts frequently don't, so
//! the classifier falls back to recognizing *names*: dark shade tokens inside a
//! gradient value, thematic words in a background image URL, and dark utility
//! classes in an element's class list.
//!
//! These names belong to whatever design system the page is built with, so
//! they are data rather than logic. The built-in [`Vocabulary::default`]
//! covers Tailwind-style neutral palettes (`gray`, `slate`, `zinc`, `neutral`,
//! `stone` at shades 700 to 950) plus two brand tokens; projects with their
//! own naming load a replacement from YAML:
//!
//! ```rust
//! use navtone::Vocabulary;
//!
//! let vocab = Vocabulary::from_yaml(r##"
//! gradient_tokens: ["ink-900", "#0b1020"]
//! class_tokens: ["bg-ink-900", "from-ink-900"]
//! "##).unwrap();
//!
//! assert!(vocab.matches_class("hero bg-ink-900"));
//! // Omitted lists keep the built-in entries.
//! assert!(vocab.matches_image("url(/img/midnight-skyline.jpg)"));
//! ```
//!
//! Matching is case-insensitive substring matching, the same way a
//! `className.includes(token)` check behaves in the browser.

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Neutral palette families treated as dark at the shades below.
const DARK_FAMILIES: &[&str] = &["gray", "slate", "zinc", "neutral", "stone"];
const DARK_SHADES: &[&str] = &["700", "800", "900", "950"];

/// Brand colors from the site's design system.
const BRAND_TOKENS: &[&str] = &["primary-dark", "brand-navy"];

/// Utility prefixes that paint a background or a gradient stop.
const CLASS_PREFIXES: &[&str] = &["bg", "from", "via", "to"];

/// Near-black literal values that show up inside gradient definitions.
const DARK_HEX_VALUES: &[&str] = &[
    "#000", "#0a0a0a", "#111", "#111827", "#1f2937", "#0f172a", "#1e293b", "#18181b", "#27272a",
    "#171717", "#262626", "#1c1917", "#292524", "#030712", "#020617", "#09090b",
];

const IMAGE_KEYWORDS: &[&str] = &[
    "dark", "black", "night", "shadow", "midnight", "charcoal", "obsidian",
];

static DEFAULT_VOCABULARY: Lazy<Vocabulary> = Lazy::new(Vocabulary::builtin);

/// Named tokens that mark a background as dark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Vocabulary {
    /// Substrings of a gradient value (`linear-gradient(...)`) that mark it dark.
    pub gradient_tokens: Vec<String>,
    /// Substrings of a non-gradient background image reference.
    pub image_keywords: Vec<String>,
    /// Substrings of an element's class list.
    pub class_tokens: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        DEFAULT_VOCABULARY.clone()
    }
}

impl Vocabulary {
    /// An empty vocabulary: only numeric luminance can classify anything dark.
    pub fn empty() -> Self {
        Self {
            gradient_tokens: Vec::new(),
            image_keywords: Vec::new(),
            class_tokens: Vec::new(),
        }
    }

    fn builtin() -> Self {
        let mut shade_names: Vec<String> = DARK_FAMILIES
            .iter()
            .flat_map(|family| DARK_SHADES.iter().map(move |shade| format!("{family}-{shade}")))
            .collect();
        shade_names.extend(BRAND_TOKENS.iter().map(|t| t.to_string()));

        let mut gradient_tokens: Vec<String> =
            DARK_HEX_VALUES.iter().map(|v| v.to_string()).collect();
        gradient_tokens.extend(shade_names.iter().cloned());

        let mut class_tokens: Vec<String> = CLASS_PREFIXES
            .iter()
            .flat_map(|prefix| {
                shade_names
                    .iter()
                    .map(move |shade| format!("{prefix}-{shade}"))
            })
            .collect();
        class_tokens.extend(["bg-black", "from-black", "via-black", "to-black"].map(String::from));

        Self {
            gradient_tokens,
            image_keywords: IMAGE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            class_tokens,
        }
    }

    /// Parses a vocabulary from YAML. Lists that are omitted keep their
    /// built-in entries; an explicit empty list disables that signal.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let vocab: Vocabulary =
            serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
                what: "vocabulary",
                source,
            })?;
        vocab.validated()
    }

    /// Loads a vocabulary from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Adds gradient tokens.
    pub fn with_gradient_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gradient_tokens
            .extend(tokens.into_iter().map(|t| t.into().to_lowercase()));
        self
    }

    /// Adds image keywords.
    pub fn with_image_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_keywords
            .extend(keywords.into_iter().map(|k| k.into().to_lowercase()));
        self
    }

    /// Adds class tokens.
    pub fn with_class_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_tokens
            .extend(tokens.into_iter().map(|t| t.into().to_lowercase()));
        self
    }

    /// True if a gradient value mentions any dark gradient token.
    pub fn matches_gradient(&self, gradient: &str) -> bool {
        contains_any(gradient, &self.gradient_tokens)
    }

    /// True if an image reference mentions any thematic keyword.
    pub fn matches_image(&self, image: &str) -> bool {
        contains_any(image, &self.image_keywords)
    }

    /// True if a class list mentions any dark utility class token.
    pub fn matches_class(&self, class_name: &str) -> bool {
        contains_any(class_name, &self.class_tokens)
    }

    fn validated(mut self) -> Result<Self> {
        for (field, list) in [
            ("gradient_tokens", &mut self.gradient_tokens),
            ("image_keywords", &mut self.image_keywords),
            ("class_tokens", &mut self.class_tokens),
        ] {
            if list.iter().any(|t| t.trim().is_empty()) {
                // An empty needle matches every haystack.
                return Err(ConfigError::Invalid {
                    field,
                    message: "tokens must not be empty".to_string(),
                });
            }
            for token in list.iter_mut() {
                *token = token.trim().to_lowercase();
            }
        }
        Ok(self)
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    if haystack.is_empty() || needles.is_empty() {
        return false;
    }
    let haystack = haystack.to_lowercase();
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_covers_neutral_palettes() {
        let vocab = Vocabulary::default();
        for class in [
            "bg-gray-900",
            "bg-slate-800",
            "from-zinc-950",
            "via-neutral-700",
            "to-stone-900",
            "bg-black",
            "bg-primary-dark",
            "from-brand-navy",
        ] {
            assert!(vocab.matches_class(class), "expected {class} to match");
        }
    }

    #[test]
    fn test_default_ignores_light_shades() {
        let vocab = Vocabulary::default();
        assert!(!vocab.matches_class("bg-gray-100 text-gray-900"));
        assert!(!vocab.matches_class("bg-white"));
        assert!(!vocab.matches_class(""));
    }

    #[test]
    fn test_gradient_tokens() {
        let vocab = Vocabulary::default();
        assert!(vocab.matches_gradient("linear-gradient(to right, #111827, #1f2937)"));
        assert!(vocab.matches_gradient("linear-gradient(var(--tw-slate-900), transparent)"));
        assert!(!vocab.matches_gradient("linear-gradient(to right, #ffffff, #f3f4f6)"));
    }

    #[test]
    fn test_image_keywords_case_insensitive() {
        let vocab = Vocabulary::default();
        assert!(vocab.matches_image("url(\"/assets/Hero-NIGHT.webp\")"));
        assert!(vocab.matches_image("url(/img/obsidian.png)"));
        assert!(!vocab.matches_image("url(/img/meadow.png)"));
    }

    #[test]
    fn test_empty_vocabulary_matches_nothing() {
        let vocab = Vocabulary::empty();
        assert!(!vocab.matches_class("bg-black"));
        assert!(!vocab.matches_gradient("linear-gradient(#000, #000)"));
        assert!(!vocab.matches_image("url(dark.png)"));
    }

    #[test]
    fn test_builder_extends_and_lowercases() {
        let vocab = Vocabulary::empty()
            .with_class_tokens(["BG-Ink-900"])
            .with_gradient_tokens(["ink-900"])
            .with_image_keywords(["Dusk"]);
        assert!(vocab.matches_class("bg-ink-900"));
        assert!(vocab.matches_gradient("linear-gradient(ink-900, white)"));
        assert!(vocab.matches_image("url(dusk.jpg)"));
    }

    #[test]
    fn test_from_yaml_partial_keeps_defaults() {
        let vocab = Vocabulary::from_yaml("class_tokens: [\"bg-Ink-900\"]").unwrap();
        assert_eq!(vocab.class_tokens, vec!["bg-ink-900".to_string()]);
        assert_eq!(
            vocab.image_keywords,
            Vocabulary::default().image_keywords
        );
    }

    #[test]
    fn test_from_yaml_explicit_empty_disables_signal() {
        let vocab = Vocabulary::from_yaml("image_keywords: []").unwrap();
        assert!(!vocab.matches_image("url(dark.png)"));
    }

    #[test]
    fn test_from_yaml_rejects_unknown_fields() {
        let err = Vocabulary::from_yaml("colour_tokens: [x]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_yaml_rejects_blank_token() {
        let err = Vocabulary::from_yaml("class_tokens: [\"  \"]").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "class_tokens",
                ..
            }
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gradient_tokens: [\"#0b1020\"]").unwrap();

        let vocab = Vocabulary::from_path(file.path()).unwrap();
        assert!(vocab.matches_gradient("linear-gradient(#0B1020, #fff)"));
    }

    #[test]
    fn test_from_yaml_hex_gradient_tokens() {
        let vocab = Vocabulary::from_yaml(
            r##"
gradient_tokens: ["ink-900", "#0b1020"]
class_tokens: ["bg-ink-900"]
"##,
        )
        .unwrap();

        assert!(vocab.matches_gradient("linear-gradient(180deg, #0b1020, #ffffff)"));
        assert!(vocab.matches_gradient("radial-gradient(var(--ink-900), transparent)"));
        assert!(vocab.matches_class("hero bg-ink-900"));
        assert!(!vocab.matches_class("bg-slate-900"));
        assert!(vocab.matches_image("url(/img/midnight-skyline.jpg)"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Vocabulary::from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
