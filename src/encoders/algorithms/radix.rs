//! Base-N conversion between non-negative integers and alphabet symbols.
//!
//! Values are arbitrary precision. Width normalization is left to callers via
//! [`pad_left`]; a value whose natural encoding is wider than the requested
//! width is returned unpadded and untruncated.

use crate::core::alphabet::Alphabet;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

pub use super::errors::CodecError;

/// Encodes `value` most-significant symbol first. Zero encodes as the single
/// zero-symbol.
pub fn encode(value: &BigUint, alphabet: &Alphabet) -> String {
    if value.is_zero() {
        return alphabet.zero_symbol().to_string();
    }

    let base_big = BigUint::from(alphabet.base());
    let mut num = value.clone();
    let mut result = Vec::new();

    while !num.is_zero() {
        let (quotient, remainder) = num.div_rem(&base_big);
        // remainder < base, which always fits usize
        let digit = remainder.to_usize().unwrap_or_default();
        result.push(alphabet.encode_digit(digit).unwrap_or(alphabet.zero_symbol()));
        num = quotient;
    }

    result.iter().rev().collect()
}

/// Fast path of [`encode`] for values that fit a machine word.
pub fn encode_u64(value: u64, alphabet: &Alphabet) -> String {
    if value == 0 {
        return alphabet.zero_symbol().to_string();
    }

    let base = alphabet.base() as u64;
    let mut num = value;
    let mut result = Vec::with_capacity(8);

    while num > 0 {
        let digit = (num % base) as usize;
        result.push(alphabet.encode_digit(digit).unwrap_or(alphabet.zero_symbol()));
        num /= base;
    }

    result.iter().rev().collect()
}

/// Decodes symbols left to right as `acc = acc * base + digit`.
///
/// An empty string decodes to zero.
///
/// # Errors
///
/// [`CodecError::InvalidSymbol`] for the first symbol absent from the alphabet.
pub fn decode(symbols: &str, alphabet: &Alphabet) -> Result<BigUint, CodecError> {
    let base_big = BigUint::from(alphabet.base());
    let mut num = BigUint::zero();

    for (position, c) in symbols.char_indices() {
        let digit = digit_at(c, position, symbols, alphabet)?;
        num *= &base_big;
        num += BigUint::from(digit);
    }

    Ok(num)
}

/// Decodes into a `u64`, or `None` when the value does not fit.
pub fn decode_u64(symbols: &str, alphabet: &Alphabet) -> Result<Option<u64>, CodecError> {
    let base = alphabet.base() as u64;
    let mut acc: Option<u64> = Some(0);

    for (position, c) in symbols.char_indices() {
        let digit = digit_at(c, position, symbols, alphabet)? as u64;
        // keep validating symbols after overflow
        acc = acc
            .and_then(|v| v.checked_mul(base))
            .and_then(|v| v.checked_add(digit));
    }

    Ok(acc)
}

/// Left-pads `symbols` with the zero-symbol to `width`. Longer input is returned as-is.
pub fn pad_left(symbols: &str, width: usize, alphabet: &Alphabet) -> String {
    let len = symbols.chars().count();
    if len >= width {
        return symbols.to_string();
    }

    let mut padded = String::with_capacity(width);
    padded.extend(std::iter::repeat_n(alphabet.zero_symbol(), width - len));
    padded.push_str(symbols);
    padded
}

/// Right-pads `symbols` with the zero-symbol to `width`.
pub fn pad_right(symbols: &str, width: usize, alphabet: &Alphabet) -> String {
    let len = symbols.chars().count();
    let mut padded = symbols.to_string();
    if len < width {
        padded.extend(std::iter::repeat_n(alphabet.zero_symbol(), width - len));
    }
    padded
}

fn digit_at(
    c: char,
    position: usize,
    input: &str,
    alphabet: &Alphabet,
) -> Result<usize, CodecError> {
    alphabet
        .decode_char(c)
        .ok_or_else(|| CodecError::invalid_symbol(c, position, input, &valid_symbols(alphabet)))
}

fn valid_symbols(alphabet: &Alphabet) -> String {
    if alphabet.base() <= 96 {
        alphabet.symbols()
    } else {
        format!("{} symbols in alphabet", alphabet.base())
    }
}
