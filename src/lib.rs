//! Colored square codes for Unicode text.
//!
//! Each code point becomes a fixed-width group of base-N symbols, each group
//! is packed into one 24-bit RGB pixel, and the pixels are laid out row-major
//! on a square image. Decoding runs the same stages in reverse.
//!
//! ```
//! use chroma_qr::ChromaCodec;
//!
//! let codec = ChromaCodec::default();
//! let encoded = codec.encode_text("Hello, 世界").unwrap();
//! assert_eq!(encoded.side_length, 3);
//!
//! let decoded = codec.decode_image(&encoded.image).unwrap();
//! assert_eq!(decoded.text, "Hello, 世界");
//! ```
//!
//! There is no error correction: a single altered pixel changes the decoded
//! text. Images must be stored in a lossless format.

mod core;
mod encoders;
pub mod prelude;

pub use crate::core::alphabet::{Alphabet, FULL_SYMBOLS};
pub use crate::core::config::{
    AlphabetConfig, AlphabetRegistry, DEFAULT_CHARS_PER_DOT, Settings,
};
pub use crate::encoders::algorithms::canvas::{PixelBuffer, Sizing, side_length};
pub use crate::encoders::algorithms::errors::{
    AlphabetNotFoundError, CodecError, Error, find_closest_alphabet,
};
pub use crate::encoders::algorithms::packer::{
    MAX_PIXEL_VALUE, Packed, Rgb, filler, is_inert, is_lossless,
};
pub use crate::encoders::algorithms::transcode::{Transcoded, Untranscoded};
pub use crate::encoders::pipeline::{ChromaCodec, Decoded, Encoded};

/// Base-N conversion between integers and symbol strings.
pub mod radix {
    pub use crate::encoders::algorithms::radix::{
        decode, decode_u64, encode, encode_u64, pad_left, pad_right,
    };
}

/// Text to symbol-group stream and back.
pub mod transcode {
    pub use crate::encoders::algorithms::transcode::{
        DECODE_LIMIT, ENCODE_LIMIT, symbols_to_text, text_to_symbols,
    };
}

/// Symbol chunks to RGB pixels and back.
pub mod packer {
    pub use crate::encoders::algorithms::packer::{pack, unpack};
}

/// Square layout and image file access.
pub mod canvas {
    pub use crate::encoders::algorithms::canvas::{assemble, disassemble, load, save};
}
