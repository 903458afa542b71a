//! Text ⇄ image, wiring the transcoder, packer and canvas together.

use crate::core::alphabet::Alphabet;
use crate::core::config::DEFAULT_CHARS_PER_DOT;
use crate::encoders::algorithms::canvas::{self, Sizing};
use crate::encoders::algorithms::errors::Error;
use crate::encoders::algorithms::packer::{self, MAX_PIXEL_VALUE, Rgb};
use crate::encoders::algorithms::transcode;
use image::RgbImage;
use std::path::Path;

/// Encoder/decoder for colored square codes.
///
/// `chars_per_dot` is both the symbol width of one code point and the number
/// of symbols packed into one pixel. Neither it nor the alphabet is stored in
/// the image, so decoding must use the same values as encoding.
///
/// Unused canvas cells are filled with [`packer::filler`] for the alphabet and
/// width unless a background is set explicitly.
#[derive(Debug, Clone)]
pub struct ChromaCodec {
    alphabet: Alphabet,
    chars_per_dot: usize,
    sizing: Sizing,
    background: Option<Rgb>,
}

/// Output of [`ChromaCodec::encode_text`].
#[derive(Debug, Clone)]
pub struct Encoded {
    pub image: RgbImage,
    pub side_length: u32,
    /// The symbol stream that was packed
    pub symbols: String,
    /// Data pixels, excluding background fill
    pub pixel_count: usize,
    /// Characters dropped for being out of range
    pub skipped: usize,
    /// Chunks that lost bits above 2^24
    pub lossy_chunks: usize,
}

/// Output of [`ChromaCodec::decode_image`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Groups that decoded to no valid character, background cells included
    pub skipped: usize,
}

impl Default for ChromaCodec {
    fn default() -> Self {
        Self::new(Alphabet::full(), DEFAULT_CHARS_PER_DOT)
    }
}

impl ChromaCodec {
    pub fn new(alphabet: Alphabet, chars_per_dot: usize) -> Self {
        ChromaCodec {
            alphabet,
            chars_per_dot,
            sizing: Sizing::default(),
            background: None,
        }
    }

    pub fn sizing(mut self, sizing: Sizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn background(mut self, background: Rgb) -> Self {
        self.background = Some(background);
        self
    }

    /// Color of the cells past the last data pixel.
    pub fn background_color(&self) -> Rgb {
        self.background
            .or_else(|| packer::filler(&self.alphabet, self.chars_per_dot))
            .unwrap_or(Rgb::from_value(MAX_PIXEL_VALUE))
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn chars_per_dot(&self) -> usize {
        self.chars_per_dot
    }

    /// Encodes `text` into a square image.
    pub fn encode_text(&self, text: &str) -> Result<Encoded, Error> {
        let transcoded = transcode::text_to_symbols(text, self.chars_per_dot, &self.alphabet)?;
        let packed = packer::pack(&transcoded.symbols, self.chars_per_dot, &self.alphabet)?;
        let background = self.background_color();
        let image: RgbImage = canvas::assemble(&packed.pixels, self.sizing, background);
        let side_length = image.width();

        let cells = side_length as usize * side_length as usize;
        if cells > packed.pixels.len()
            && !packer::is_inert(background, &self.alphabet, self.chars_per_dot)
        {
            tracing::warn!(
                background = background.value(),
                chars_per_dot = self.chars_per_dot,
                empty_cells = cells - packed.pixels.len(),
                "background cells will decode as text"
            );
        }

        tracing::debug!(
            chars = transcoded.encoded,
            symbols = transcoded.symbols.len(),
            pixels = packed.pixels.len(),
            side_length,
            "encoded text"
        );

        Ok(Encoded {
            image,
            side_length,
            pixel_count: packed.pixels.len(),
            symbols: transcoded.symbols,
            skipped: transcoded.skipped,
            lossy_chunks: packed.lossy_chunks,
        })
    }

    /// Decodes a row-major pixel sequence.
    pub fn decode_pixels(&self, pixels: &[Rgb]) -> Result<Decoded, Error> {
        let symbols = packer::unpack(pixels, self.chars_per_dot, &self.alphabet)?;
        let text = transcode::symbols_to_text(&symbols, self.chars_per_dot, &self.alphabet)?;

        tracing::debug!(
            pixels = pixels.len(),
            chars = text.decoded,
            skipped = text.skipped,
            "decoded pixels"
        );

        Ok(Decoded {
            text: text.text,
            skipped: text.skipped,
        })
    }

    /// Decodes every cell of `image`, background included.
    pub fn decode_image(&self, image: &RgbImage) -> Result<Decoded, Error> {
        self.decode_pixels(&canvas::disassemble(image))
    }

    /// Encodes `text` and writes the image to `path`.
    pub fn encode_to_file(&self, text: &str, path: &Path) -> Result<Encoded, Error> {
        let encoded = self.encode_text(text)?;
        canvas::save(&encoded.image, path)?;
        tracing::info!(path = %path.display(), side = encoded.side_length, "wrote image");
        Ok(encoded)
    }

    /// Reads the image at `path` and decodes it.
    pub fn decode_file(&self, path: &Path) -> Result<Decoded, Error> {
        let image = canvas::load(path)?;
        tracing::info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "read image"
        );
        self.decode_image(&image)
    }
}
