use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Arguments for encoding text into an image
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Text to encode (reads --file or stdin if not provided)
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from this file
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Output image path (PNG unless the extension names another lossless format)
    #[arg(short = 'o', long, default_value = "colored_qr_code_square.png")]
    pub output: PathBuf,

    #[command(flatten)]
    pub codec: CodecArgs,

    /// Canvas side formula
    #[arg(long, value_enum)]
    pub sizing: Option<SizingCli>,

    /// Fill color for unused cells, as RRGGBB hex
    #[arg(long, value_name = "RRGGBB")]
    pub background: Option<String>,

    /// Requested image size in pixels (recorded, does not change the layout)
    #[arg(long, value_name = "PIXELS")]
    pub img_size: Option<u32>,

    /// Print the symbol stream that was packed
    #[arg(long)]
    pub show_symbols: bool,

    /// Decode the written image and print the recovered text
    #[arg(long)]
    pub verify: bool,

    /// Output a JSON report instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for decoding an image back into text
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Image to decode
    pub image: PathBuf,

    #[command(flatten)]
    pub codec: CodecArgs,

    /// Output file (writes to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Output a JSON report instead of raw text
    #[arg(long)]
    pub json: bool,
}

/// Parameters encoder and decoder must agree on
#[derive(Args, Debug)]
pub struct CodecArgs {
    /// Alphabet to use (see `config list`)
    #[arg(short = 'a', long)]
    pub alphabet: Option<String>,

    /// Symbols per code point and per pixel
    #[arg(short = 'w', long, value_name = "N")]
    pub chars_per_dot: Option<usize>,
}

/// Canvas side formulas (CLI enum)
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SizingCli {
    /// ceil(sqrt(n)), every pixel fits
    Ceil,
    /// floor(sqrt(n)), legacy layout that drops trailing pixels
    Floor,
}

impl From<SizingCli> for chroma_qr::Sizing {
    fn from(cli: SizingCli) -> Self {
        match cli {
            SizingCli::Ceil => chroma_qr::Sizing::Ceil,
            SizingCli::Floor => chroma_qr::Sizing::Floor,
        }
    }
}

/// Config subcommand actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// List available alphabets and effective settings
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details for a specific alphabet
    Show {
        /// Alphabet name
        alphabet: String,
    },
}
