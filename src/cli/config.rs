use crate::cli::{args::CodecArgs, global::GlobalArgs};
use chroma_qr::{Alphabet, AlphabetNotFoundError, AlphabetRegistry, ChromaCodec, Rgb};
use std::path::PathBuf;

/// Loads the registry from the standard locations, then `--config` if given.
pub fn load_registry(global: &GlobalArgs) -> Result<AlphabetRegistry, Box<dyn std::error::Error>> {
    let mut registry = AlphabetRegistry::load_with_overrides()?;

    if let Some(path) = &global.config {
        let expanded = PathBuf::from(shellexpand::tilde(path).as_ref());
        let extra = AlphabetRegistry::load_from_file(&expanded)
            .map_err(|e| format!("Cannot load config '{}': {}", expanded.display(), e))?;
        tracing::debug!(path = %expanded.display(), "merged --config file");
        registry.merge(extra);
    }

    Ok(registry)
}

/// Helper function to create an alphabet from config
pub fn create_alphabet(
    registry: &AlphabetRegistry,
    name: &str,
) -> Result<Alphabet, Box<dyn std::error::Error>> {
    let alphabet_config = registry.get_alphabet(name).ok_or_else(|| {
        let suggestion = chroma_qr::find_closest_alphabet(name, &registry.names());
        AlphabetNotFoundError::new(name, suggestion)
    })?;

    let chars = alphabet_config
        .effective_chars()
        .map_err(|e| format!("Invalid alphabet config '{}': {}", name, e))?;

    Alphabet::from_str(&chars)
        .map_err(|e| format!("Invalid alphabet '{}': {}", name, e).into())
}

/// Builds a codec from command line values, falling back to configured settings.
pub fn create_codec(
    registry: &AlphabetRegistry,
    args: &CodecArgs,
) -> Result<ChromaCodec, Box<dyn std::error::Error>> {
    let settings = &registry.settings;
    let name = args
        .alphabet
        .as_deref()
        .unwrap_or_else(|| settings.default_alphabet());
    let alphabet = create_alphabet(registry, name)?;
    let chars_per_dot = args.chars_per_dot.unwrap_or_else(|| settings.chars_per_dot());

    if chars_per_dot == 0 {
        return Err("--chars-per-dot must be at least 1".into());
    }

    tracing::debug!(alphabet = name, base = alphabet.base(), chars_per_dot, "codec ready");

    let mut codec = ChromaCodec::new(alphabet, chars_per_dot).sizing(settings.sizing());
    if let Some(background) = settings.background() {
        codec = codec.background(Rgb(background));
    }
    Ok(codec)
}

/// Parses `RRGGBB` (an optional leading `#` is accepted).
pub fn parse_background(value: &str) -> Result<Rgb, Box<dyn std::error::Error>> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Invalid background '{}': expected RRGGBB hex", value).into());
    }

    let rgb = u32::from_str_radix(hex, 16)?;
    Ok(Rgb::from_value(rgb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_background() {
        assert_eq!(parse_background("FFFFFF").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_background("#10a0Ff").unwrap(), Rgb([0x10, 0xA0, 0xFF]));
        assert!(parse_background("FFF").is_err());
        assert!(parse_background("GGGGGG").is_err());
        assert!(parse_background("+FFFFF").is_err());
    }

    #[test]
    fn test_create_alphabet_suggests_close_name() {
        let registry = AlphabetRegistry::load_default().unwrap();
        let err = create_alphabet(&registry, "base63").unwrap_err();
        let not_found = err.downcast_ref::<AlphabetNotFoundError>().unwrap();
        assert_eq!(not_found.suggestion.as_deref(), Some("base62"));
    }

    #[test]
    fn test_create_codec_uses_settings() {
        let registry = AlphabetRegistry::load_default().unwrap();
        let args = CodecArgs {
            alphabet: None,
            chars_per_dot: None,
        };
        let codec = create_codec(&registry, &args).unwrap();
        assert_eq!(codec.alphabet().base(), 94);
        assert_eq!(codec.chars_per_dot(), 5);
        assert_eq!(codec.background_color(), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_create_codec_picks_background_for_width() {
        let registry = AlphabetRegistry::load_default().unwrap();
        let args = CodecArgs {
            alphabet: Some("hex".to_string()),
            chars_per_dot: Some(5),
        };
        let codec = create_codec(&registry, &args).unwrap();
        assert_eq!(codec.background_color(), Rgb::from_value(0xD800));
    }

    #[test]
    fn test_create_codec_honors_configured_background() {
        let mut registry = AlphabetRegistry::load_default().unwrap();
        registry.settings.background = Some([0, 0, 255]);
        let args = CodecArgs {
            alphabet: None,
            chars_per_dot: None,
        };
        let codec = create_codec(&registry, &args).unwrap();
        assert_eq!(codec.background_color(), Rgb([0, 0, 255]));
    }

    #[test]
    fn test_create_codec_rejects_zero_width() {
        let registry = AlphabetRegistry::load_default().unwrap();
        let args = CodecArgs {
            alphabet: Some("hex".to_string()),
            chars_per_dot: Some(0),
        };
        assert!(create_codec(&registry, &args).is_err());
    }
}
