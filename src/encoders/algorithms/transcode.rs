//! Text to fixed-width symbol groups, one group per code point, and back.
//!
//! The fixed width is the only framing: groups are concatenated with no
//! delimiter. Out-of-range code points are dropped in both directions rather
//! than reported as errors; the counts below make those drops observable.

use super::radix;
use crate::core::alphabet::Alphabet;

pub use super::errors::CodecError;

/// Exclusive upper bound for code points accepted on encode. U+10FFFF itself is dropped.
pub const ENCODE_LIMIT: u32 = 0x10FFFF;

/// Exclusive upper bound for values accepted on decode.
pub const DECODE_LIMIT: u32 = 0x110000;

/// Result of [`text_to_symbols`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcoded {
    /// Concatenated symbol groups
    pub symbols: String,
    /// Characters that produced a group
    pub encoded: usize,
    /// Characters dropped for being out of range
    pub skipped: usize,
    /// Groups wider than the requested width (emitted unpadded)
    pub overflowed: usize,
}

/// Result of [`symbols_to_text`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Untranscoded {
    /// Recovered text
    pub text: String,
    /// Groups that produced a character
    pub decoded: usize,
    /// Full groups whose value is not a valid code point
    pub skipped: usize,
    /// Symbols in a trailing partial group, discarded undecoded
    pub trailing: usize,
}

/// Maps each in-range character to a `width`-symbol group.
pub fn text_to_symbols(
    text: &str,
    width: usize,
    alphabet: &Alphabet,
) -> Result<Transcoded, CodecError> {
    if width == 0 {
        return Err(CodecError::InvalidWidth { width });
    }

    let mut out = Transcoded {
        symbols: String::with_capacity(text.len() * width),
        ..Transcoded::default()
    };

    for c in text.chars() {
        let code_point = c as u32;
        if code_point >= ENCODE_LIMIT {
            out.skipped += 1;
            continue;
        }

        let group = radix::pad_left(&radix::encode_u64(code_point.into(), alphabet), width, alphabet);
        if group.chars().count() > width {
            tracing::warn!(
                width,
                "U+{:04X} does not fit the group width; stream framing is lost",
                code_point
            );
            out.overflowed += 1;
        }

        out.symbols.push_str(&group);
        out.encoded += 1;
    }

    if out.skipped > 0 {
        tracing::debug!(skipped = out.skipped, "dropped out-of-range characters");
    }

    Ok(out)
}

/// Splits `symbols` into `width`-symbol groups and decodes each to a character.
///
/// # Errors
///
/// [`CodecError::InvalidSymbol`] if a full group holds a symbol outside the
/// alphabet. Symbols in a trailing partial group are not inspected.
pub fn symbols_to_text(
    symbols: &str,
    width: usize,
    alphabet: &Alphabet,
) -> Result<Untranscoded, CodecError> {
    if width == 0 {
        return Err(CodecError::InvalidWidth { width });
    }

    let chars: Vec<char> = symbols.chars().collect();
    let groups = chars.chunks_exact(width);
    let mut out = Untranscoded {
        trailing: groups.remainder().len(),
        ..Untranscoded::default()
    };

    for group in groups {
        let group: String = group.iter().collect();
        let value = radix::decode_u64(&group, alphabet)?;

        match value
            .filter(|&v| v < DECODE_LIMIT as u64)
            .and_then(|v| char::from_u32(v as u32))
        {
            Some(c) => {
                out.text.push(c);
                out.decoded += 1;
            }
            // out of range, or a surrogate
            None => out.skipped += 1,
        }
    }

    if out.skipped > 0 || out.trailing > 0 {
        tracing::debug!(
            skipped = out.skipped,
            trailing = out.trailing,
            "discarded undecodable symbol groups"
        );
    }

    Ok(out)
}
