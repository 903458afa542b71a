//! Convenient re-exports for common usage.
//!
//! ```
//! use chroma_qr::prelude::*;
//!
//! let registry = AlphabetRegistry::load_default().unwrap();
//! let codec = ChromaCodec::new(Alphabet::full(), registry.settings.chars_per_dot());
//! assert_eq!(codec.encode_text("hi").unwrap().pixel_count, 2);
//! ```

pub use crate::{
    Alphabet, AlphabetRegistry, ChromaCodec, CodecError, Decoded, Encoded, Error, Rgb, Sizing,
};
