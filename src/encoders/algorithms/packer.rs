//! Packing of symbol chunks into 24-bit RGB pixels, and back.
//!
//! Each chunk of `chunk_width` symbols is read as one base-N integer and stored
//! as `R*65536 + G*256 + B`. Chunk values at or above 2^24 keep only their low
//! 24 bits, so encode/decode is lossless only while every chunk value stays
//! below 2^24. Text streams satisfy this whenever the chunk width equals the
//! group width, because each chunk is then exactly one code point.

use super::radix;
use super::transcode::DECODE_LIMIT;
use crate::core::alphabet::Alphabet;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

pub use super::errors::CodecError;

/// Largest value a pixel can hold.
pub const MAX_PIXEL_VALUE: u32 = 0xFF_FFFF;

const SURROGATE_START: u32 = 0xD800;

/// One pixel as three 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Splits the low 24 bits of `value` into R, G and B.
    pub fn from_value(value: u32) -> Self {
        Rgb([
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        ])
    }

    pub fn value(self) -> u32 {
        let [r, g, b] = self.0;
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }
}

/// Result of [`pack`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Packed {
    pub pixels: Vec<Rgb>,
    /// Chunks whose value did not fit in 24 bits
    pub lossy_chunks: usize,
}

/// Number of distinct `chunk_width`-symbol values, or `None` past `u64`.
fn capacity(alphabet: &Alphabet, chunk_width: usize) -> Option<u64> {
    u32::try_from(chunk_width)
        .ok()
        .and_then(|w| (alphabet.base() as u64).checked_pow(w))
}

/// Whether every `chunk_width`-symbol value fits in one pixel (`base^width <= 2^24`).
pub fn is_lossless(alphabet: &Alphabet, chunk_width: usize) -> bool {
    capacity(alphabet, chunk_width).is_some_and(|c| c <= u64::from(MAX_PIXEL_VALUE) + 1)
}

/// Whether `pixel` unpacks to a single `chunk_width`-symbol group that decodes
/// to no character. Such a pixel can fill unused canvas cells without
/// shifting group boundaries or adding text.
pub fn is_inert(pixel: Rgb, alphabet: &Alphabet, chunk_width: usize) -> bool {
    let value = pixel.value();
    let fits = capacity(alphabet, chunk_width).is_none_or(|c| u64::from(value) < c);
    fits && (value >= DECODE_LIMIT || char::from_u32(value).is_none())
}

/// Fill color for canvas cells past the last data pixel.
///
/// Takes the largest value that still unpacks to `chunk_width` symbols (white
/// once a chunk spans 24 bits), falling back to the first surrogate. `None`
/// when every value of that width decodes to a character.
pub fn filler(alphabet: &Alphabet, chunk_width: usize) -> Option<Rgb> {
    let largest = match capacity(alphabet, chunk_width) {
        Some(c) if c <= u64::from(MAX_PIXEL_VALUE) => {
            u32::try_from(c - 1).unwrap_or(MAX_PIXEL_VALUE)
        }
        _ => MAX_PIXEL_VALUE,
    };

    [largest, SURROGATE_START]
        .into_iter()
        .map(Rgb::from_value)
        .find(|&pixel| is_inert(pixel, alphabet, chunk_width))
}

/// Packs `symbols` into pixels, `chunk_width` symbols per pixel.
///
/// The final chunk, if short, is right-padded with the zero-symbol.
///
/// # Errors
///
/// [`CodecError::InvalidSymbol`] if `symbols` contains a symbol outside the alphabet.
pub fn pack(symbols: &str, chunk_width: usize, alphabet: &Alphabet) -> Result<Packed, CodecError> {
    if chunk_width == 0 {
        return Err(CodecError::InvalidWidth { width: chunk_width });
    }

    let chars: Vec<char> = symbols.chars().collect();
    let mask = BigUint::from(MAX_PIXEL_VALUE);
    let mut packed = Packed {
        pixels: Vec::with_capacity(chars.len().div_ceil(chunk_width)),
        lossy_chunks: 0,
    };

    for chunk in chars.chunks(chunk_width) {
        let chunk: String = chunk.iter().collect();
        let chunk = radix::pad_right(&chunk, chunk_width, alphabet);
        let value = radix::decode(&chunk, alphabet)?;

        if value > mask {
            packed.lossy_chunks += 1;
        }
        let low = (&value & &mask).to_u32().unwrap_or_default();
        packed.pixels.push(Rgb::from_value(low));
    }

    if packed.lossy_chunks > 0 {
        tracing::warn!(
            lossy_chunks = packed.lossy_chunks,
            chunk_width,
            base = alphabet.base(),
            "chunk values exceed 24 bits; the image will not decode back to the same symbols"
        );
    }

    Ok(packed)
}

/// Expands each pixel back into a `chunk_width`-symbol chunk.
///
/// Values needing more than `chunk_width` symbols are emitted unpadded.
pub fn unpack(pixels: &[Rgb], chunk_width: usize, alphabet: &Alphabet) -> Result<String, CodecError> {
    if chunk_width == 0 {
        return Err(CodecError::InvalidWidth { width: chunk_width });
    }

    let mut symbols = String::with_capacity(pixels.len() * chunk_width);
    let mut overflowed = 0usize;

    for pixel in pixels {
        let chunk = radix::pad_left(
            &radix::encode_u64(pixel.value().into(), alphabet),
            chunk_width,
            alphabet,
        );
        if chunk.chars().count() > chunk_width {
            overflowed += 1;
        }
        symbols.push_str(&chunk);
    }

    if overflowed > 0 {
        tracing::warn!(overflowed, chunk_width, "pixel values wider than the chunk width");
    }

    Ok(symbols)
}
