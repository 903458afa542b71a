use crate::cli::{
    args::EncodeArgs,
    config::{create_codec, parse_background},
    global::GlobalArgs,
};
use chroma_qr::AlphabetRegistry;
use std::fs;
use std::io::{self, Read};

pub fn handle(
    args: EncodeArgs,
    global: &GlobalArgs,
    config: &AlphabetRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut codec = create_codec(config, &args.codec)?;
    if let Some(sizing) = args.sizing {
        codec = codec.sizing(sizing.into());
    }
    if let Some(background) = &args.background {
        codec = codec.background(parse_background(background)?);
    }

    if let Some(img_size) = args.img_size.or(config.settings.img_size) {
        tracing::debug!(img_size, "img_size is recorded only; the canvas side follows the pixel count");
    }

    let text = if let Some(text) = args.text {
        text
    } else if let Some(file_path) = &args.file {
        fs::read_to_string(file_path)
            .map_err(|e| format!("Cannot read '{}': {}", file_path.display(), e))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let encoded = codec.encode_to_file(&text, &args.output)?;
    let verified = if args.verify {
        Some(codec.decode_file(&args.output)?)
    } else {
        None
    };

    if args.json {
        let mut report = serde_json::json!({
            "output": args.output.display().to_string(),
            "side_length": encoded.side_length,
            "pixels": encoded.pixel_count,
            "chars_per_dot": codec.chars_per_dot(),
            "base": codec.alphabet().base(),
            "skipped": encoded.skipped,
            "lossy_chunks": encoded.lossy_chunks,
        });
        if args.show_symbols {
            report["symbols"] = serde_json::Value::String(encoded.symbols);
        }
        if let Some(decoded) = &verified {
            report["decoded"] = serde_json::Value::String(decoded.text.clone());
            report["verified"] = serde_json::Value::Bool(decoded.text == text);
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !global.quiet {
        println!("Saved code to {}", args.output.display());
        println!(
            "Size: {} x {} dots ({} data pixels)",
            encoded.side_length, encoded.side_length, encoded.pixel_count
        );
        if encoded.skipped > 0 {
            eprintln!(
                "Warning: skipped {} character(s) outside the encodable range",
                encoded.skipped
            );
        }
    }

    if args.show_symbols {
        println!("Encoded symbols: {}", encoded.symbols);
    }

    if let Some(decoded) = verified {
        println!("Decoded text: {}", decoded.text);
        if decoded.text != text {
            eprintln!("Warning: decoded text differs from the input");
        }
    }

    Ok(())
}
