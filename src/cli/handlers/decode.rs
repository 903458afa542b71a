use crate::cli::{args::DecodeArgs, config::create_codec, global::GlobalArgs};
use chroma_qr::AlphabetRegistry;
use std::fs;
use std::io::{self, Write};

pub fn handle(
    args: DecodeArgs,
    _global: &GlobalArgs,
    config: &AlphabetRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    let codec = create_codec(config, &args.codec)?;
    let decoded = codec.decode_file(&args.image)?;

    if args.json {
        let report = serde_json::json!({
            "text": decoded.text,
            "skipped": decoded.skipped,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(output_path) = &args.output {
        fs::write(output_path, decoded.text.as_bytes())?;
    } else {
        io::stdout().write_all(decoded.text.as_bytes())?;
    }

    Ok(())
}
