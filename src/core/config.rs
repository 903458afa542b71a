use crate::encoders::algorithms::canvas::Sizing;
use serde::Deserialize;
use std::collections::HashMap;

/// Symbols per packed chunk when nothing else is configured.
pub const DEFAULT_CHARS_PER_DOT: usize = 5;

/// Configuration for a single alphabet loaded from TOML.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AlphabetConfig {
    /// The symbols comprising the alphabet (explicit list)
    #[serde(default)]
    pub chars: String,
    /// Starting character for range-based alphabet definition
    #[serde(default)]
    pub start: Option<String>,
    /// Number of characters in range-based alphabet
    #[serde(default)]
    pub length: Option<usize>,
}

impl AlphabetConfig {
    /// Returns the effective symbol set, generating from range if needed.
    ///
    /// Explicit `chars` take priority over `start` + `length`.
    pub fn effective_chars(&self) -> Result<String, String> {
        if !self.chars.is_empty() {
            return Ok(self.chars.clone());
        }

        if let (Some(start_str), Some(length)) = (&self.start, self.length) {
            let start_char = start_str
                .chars()
                .next()
                .ok_or("start must contain at least one character")?;

            return Self::generate_range(start_char as u32, length);
        }

        Err("alphabet needs either chars or start + length".to_string())
    }

    /// Generate a string of sequential Unicode characters from a range.
    fn generate_range(start: u32, length: usize) -> Result<String, String> {
        const MAX_UNICODE: u32 = 0x10FFFF;
        const SURROGATE_START: u32 = 0xD800;
        const SURROGATE_END: u32 = 0xDFFF;

        if length == 0 {
            return Err("length must be greater than 0".to_string());
        }

        let end = u32::try_from(length - 1)
            .ok()
            .and_then(|offset| start.checked_add(offset))
            .ok_or("range exceeds maximum Unicode codepoint")?;

        if end > MAX_UNICODE {
            return Err(format!(
                "range end U+{:X} exceeds maximum Unicode codepoint U+{:X}",
                end, MAX_UNICODE
            ));
        }

        if start <= SURROGATE_END && end >= SURROGATE_START {
            return Err(format!(
                "range U+{:X}..U+{:X} crosses surrogate gap (U+D800..U+DFFF)",
                start, end
            ));
        }

        (start..=end)
            .map(|cp| char::from_u32(cp).ok_or(format!("invalid codepoint U+{:X}", cp)))
            .collect()
    }
}

/// Global settings. Unset fields fall back to the built-in defaults.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Alphabet used when none is named on the command line
    #[serde(default)]
    pub default_alphabet: Option<String>,
    /// Symbols per code point group and per pixel
    #[serde(default)]
    pub chars_per_dot: Option<usize>,
    /// Square side formula
    #[serde(default)]
    pub sizing: Option<Sizing>,
    /// RGB fill for unused trailing cells. Unset picks one per alphabet and width.
    #[serde(default)]
    pub background: Option<[u8; 3]>,
    /// Requested output size in pixels. Recorded only; the layout ignores it.
    #[serde(default)]
    pub img_size: Option<u32>,
}

impl Settings {
    pub fn chars_per_dot(&self) -> usize {
        self.chars_per_dot.unwrap_or(DEFAULT_CHARS_PER_DOT)
    }

    pub fn sizing(&self) -> Sizing {
        self.sizing.unwrap_or_default()
    }

    pub fn background(&self) -> Option<[u8; 3]> {
        self.background
    }

    pub fn default_alphabet(&self) -> &str {
        self.default_alphabet.as_deref().unwrap_or("full")
    }

    /// Overwrites every field that `other` sets.
    pub fn merge(&mut self, other: Settings) {
        if other.default_alphabet.is_some() {
            self.default_alphabet = other.default_alphabet;
        }
        if other.chars_per_dot.is_some() {
            self.chars_per_dot = other.chars_per_dot;
        }
        if other.sizing.is_some() {
            self.sizing = other.sizing;
        }
        if other.background.is_some() {
            self.background = other.background;
        }
        if other.img_size.is_some() {
            self.img_size = other.img_size;
        }
    }
}

/// Collection of alphabet configurations loaded from TOML files.
#[derive(Debug, Deserialize, Default)]
pub struct AlphabetRegistry {
    /// Map of alphabet names to their configurations
    #[serde(default)]
    pub alphabets: HashMap<String, AlphabetConfig>,
    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

impl AlphabetRegistry {
    /// Parses alphabet configurations from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the bundled alphabets and settings.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        let content = include_str!("../../alphabets.toml");
        Ok(Self::from_toml(content)?)
    }

    /// Loads configuration from a custom file path.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Loads configuration with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Bundled alphabets (from library)
    /// 2. `~/.config/chroma-qr/alphabets.toml` (user overrides)
    /// 3. `./alphabets.toml` (project-local overrides)
    ///
    /// Later configurations override earlier ones for matching names and for
    /// every setting they define. Unreadable override files are skipped with a
    /// warning.
    pub fn load_with_overrides() -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("chroma-qr").join("alphabets.toml");
            config.merge_optional(&user_config_path);
        }

        config.merge_optional(std::path::Path::new("alphabets.toml"));

        Ok(config)
    }

    fn merge_optional(&mut self, path: &std::path::Path) {
        if !path.exists() {
            return;
        }
        match Self::load_from_file(path) {
            Ok(overrides) => {
                tracing::debug!(path = %path.display(), "merged alphabet overrides");
                self.merge(overrides);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load config");
            }
        }
    }

    /// Merges another configuration into this one.
    pub fn merge(&mut self, other: AlphabetRegistry) {
        for (name, alphabet) in other.alphabets {
            self.alphabets.insert(name, alphabet);
        }
        self.settings.merge(other.settings);
    }

    /// Retrieves an alphabet configuration by name.
    pub fn get_alphabet(&self, name: &str) -> Option<&AlphabetConfig> {
        self.alphabets.get(name)
    }

    /// Sorted alphabet names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.alphabets.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alphabet::{Alphabet, FULL_SYMBOLS};

    #[test]
    fn test_load_default_config() {
        let config = AlphabetRegistry::load_default().unwrap();
        assert!(config.alphabets.contains_key("full"));
        assert_eq!(config.settings.chars_per_dot(), 5);
        assert_eq!(config.settings.sizing(), Sizing::Ceil);
        assert_eq!(config.settings.background(), None);
        assert_eq!(config.settings.default_alphabet(), "full");
    }

    #[test]
    fn test_bundled_full_matches_builtin() {
        let config = AlphabetRegistry::load_default().unwrap();
        let full = config.get_alphabet("full").unwrap();
        assert_eq!(full.effective_chars().unwrap(), FULL_SYMBOLS);
    }

    #[test]
    fn test_every_bundled_alphabet_is_valid() {
        let config = AlphabetRegistry::load_default().unwrap();
        for name in config.names() {
            let chars = config.get_alphabet(&name).unwrap().effective_chars().unwrap();
            assert!(Alphabet::from_str(&chars).is_ok(), "{} is invalid", name);
        }
    }

    #[test]
    fn test_range_alphabet() {
        let config = AlphabetRegistry::load_default().unwrap();
        let decimal = config.get_alphabet("decimal").unwrap();
        assert_eq!(decimal.effective_chars().unwrap(), "0123456789");
    }

    #[test]
    fn test_effective_chars_explicit_takes_priority() {
        let config = AlphabetConfig {
            chars: "XYZ".to_string(),
            start: Some("A".to_string()),
            length: Some(4),
        };
        assert_eq!(config.effective_chars().unwrap(), "XYZ");
    }

    #[test]
    fn test_effective_chars_unicode_range() {
        let config = AlphabetConfig {
            chars: String::new(),
            start: Some("가".to_string()),
            length: Some(4),
        };
        assert_eq!(config.effective_chars().unwrap(), "가각갂갃");
    }

    #[test]
    fn test_effective_chars_surrogate_gap_error() {
        let config = AlphabetConfig {
            chars: String::new(),
            start: Some("\u{D700}".to_string()),
            length: Some(512),
        };
        assert!(config.effective_chars().is_err());
    }

    #[test]
    fn test_effective_chars_exceeds_unicode_max() {
        let config = AlphabetConfig {
            chars: String::new(),
            start: Some("\u{10FFFE}".to_string()),
            length: Some(10),
        };
        assert!(config.effective_chars().is_err());
    }

    #[test]
    fn test_empty_definition_error() {
        assert!(AlphabetConfig::default().effective_chars().is_err());
    }

    #[test]
    fn test_merge_overrides_alphabets_and_settings() {
        let mut config = AlphabetRegistry::load_default().unwrap();
        let overrides = AlphabetRegistry::from_toml(
            r#"
[settings]
chars_per_dot = 7
sizing = "floor"
background = [0, 0, 255]

[alphabets.full]
chars = "01"

[alphabets.dna]
chars = "ACGT"
"#,
        )
        .unwrap();

        config.merge(overrides);

        assert_eq!(config.get_alphabet("full").unwrap().chars, "01");
        assert_eq!(config.get_alphabet("dna").unwrap().chars, "ACGT");
        assert_eq!(config.settings.chars_per_dot(), 7);
        assert_eq!(config.settings.sizing(), Sizing::Floor);
        assert_eq!(config.settings.background(), Some([0, 0, 255]));
        // untouched settings survive the merge
        assert_eq!(config.settings.default_alphabet(), "full");
    }

    #[test]
    fn test_img_size_is_parsed() {
        let config = AlphabetRegistry::from_toml("[settings]\nimg_size = 300\n").unwrap();
        assert_eq!(config.settings.img_size, Some(300));
        assert!(config.alphabets.is_empty());
    }
}
