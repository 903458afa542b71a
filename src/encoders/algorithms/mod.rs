pub mod canvas;
pub mod errors;
pub mod packer;
pub mod radix;
pub mod transcode;
