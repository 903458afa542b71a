use std::collections::HashMap;

/// Digits, then uppercase and lowercase Latin letters, then ASCII punctuation.
pub const FULL_SYMBOLS: &str = concat!(
    "0123456789",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "abcdefghijklmnopqrstuvwxyz",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
);

/// An ordered set of unique symbols used as the digit set for base-N arithmetic.
///
/// The index of a symbol is its digit value. Encoder and decoder must share an
/// identical alphabet: it is never stored in the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
    char_to_index: HashMap<char, usize>,
}

impl Alphabet {
    /// Creates a new alphabet from an ordered list of symbols.
    ///
    /// # Errors
    ///
    /// Returns an error if the alphabet has fewer than two symbols or contains
    /// duplicates.
    pub fn new(chars: Vec<char>) -> Result<Self, String> {
        if chars.is_empty() {
            return Err("Alphabet cannot be empty".to_string());
        }
        if chars.len() < 2 {
            return Err(format!(
                "Alphabet needs at least 2 symbols, got {}",
                chars.len()
            ));
        }

        let mut char_to_index = HashMap::with_capacity(chars.len());
        for (i, &c) in chars.iter().enumerate() {
            if char_to_index.insert(c, i).is_some() {
                return Err(format!("Duplicate character in alphabet: {}", c));
            }
        }

        Ok(Alphabet {
            chars,
            char_to_index,
        })
    }

    /// Creates an alphabet from a string of symbols.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, String> {
        Self::new(s.chars().collect())
    }

    /// The 94-symbol default alphabet.
    pub fn full() -> Self {
        let chars: Vec<char> = FULL_SYMBOLS.chars().collect();
        let char_to_index = chars.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet {
            chars,
            char_to_index,
        }
    }

    /// Returns the alphabet made of the first `base` symbols.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is below 2 or exceeds this alphabet's size.
    pub fn with_base(&self, base: usize) -> Result<Self, String> {
        if base > self.chars.len() {
            return Err(format!(
                "Base {} exceeds alphabet size {}",
                base,
                self.chars.len()
            ));
        }
        Self::new(self.chars[..base].to_vec())
    }

    /// Returns the base (radix) of the alphabet.
    pub fn base(&self) -> usize {
        self.chars.len()
    }

    /// The symbol for digit 0, used for all padding.
    pub fn zero_symbol(&self) -> char {
        self.chars[0]
    }

    /// Encodes a digit (0 to base-1) as a symbol.
    ///
    /// Returns `None` if the digit is out of range.
    pub fn encode_digit(&self, digit: usize) -> Option<char> {
        self.chars.get(digit).copied()
    }

    /// Decodes a symbol back to its digit value.
    ///
    /// Returns `None` if the symbol is not in the alphabet.
    pub fn decode_char(&self, c: char) -> Option<usize> {
        self.char_to_index.get(&c).copied()
    }

    /// All symbols in digit order.
    pub fn symbols(&self) -> String {
        self.chars.iter().collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::full()
    }
}
