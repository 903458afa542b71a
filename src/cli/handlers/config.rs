use crate::cli::{args::ConfigAction, config::create_alphabet, global::GlobalArgs};
use chroma_qr::{AlphabetRegistry, Rgb, filler, is_inert, is_lossless};

pub fn handle(
    action: ConfigAction,
    _global: &GlobalArgs,
    config: &AlphabetRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::List { json } => handle_list(json, config),
        ConfigAction::Show { alphabet } => handle_show(&alphabet, config),
    }
}

fn handle_list(json: bool, config: &AlphabetRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let names = config.names();
    let settings = &config.settings;

    if json {
        let output = serde_json::json!({
            "alphabets": names,
            "settings": {
                "default_alphabet": settings.default_alphabet(),
                "chars_per_dot": settings.chars_per_dot(),
                "sizing": settings.sizing().as_str(),
                "background": settings.background(),
                "img_size": settings.img_size,
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Available alphabets:\n");
    for name in &names {
        let chars = config
            .get_alphabet(name)
            .map(|c| c.effective_chars())
            .transpose()?
            .unwrap_or_default();
        let count = chars.chars().count();
        let preview: String = chars.chars().take(20).collect();
        let suffix = if count > 20 { "..." } else { "" };
        println!("  {:<12} base-{:<3}  {}{}", name, count, preview, suffix);
    }

    println!();
    println!("Default alphabet: {}", settings.default_alphabet());
    println!("Chars per dot: {}", settings.chars_per_dot());
    println!("Sizing: {}", settings.sizing().as_str());
    match settings.background() {
        Some(background) => println!("Background: {:06X}", Rgb(background).value()),
        None => println!("Background: auto"),
    }

    Ok(())
}

fn handle_show(name: &str, config: &AlphabetRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let alphabet = create_alphabet(config, name)?;
    let width = config.settings.chars_per_dot();

    println!("Alphabet: {}", name);
    println!("  Base: {}", alphabet.base());
    println!("  Zero symbol: {}", alphabet.zero_symbol());
    println!("  Symbols: {}", alphabet.symbols());
    println!(
        "  Chunk of {} fits a pixel: {}",
        width,
        if is_lossless(&alphabet, width) {
            "always"
        } else {
            "only for values below 2^24"
        }
    );

    let background = config
        .settings
        .background()
        .map(Rgb)
        .or_else(|| filler(&alphabet, width));
    match background {
        Some(pixel) if is_inert(pixel, &alphabet, width) => {
            println!("  Background: {:06X} (skipped on decode)", pixel.value());
        }
        Some(pixel) => {
            println!("  Background: {:06X} (decodes as text)", pixel.value());
        }
        None => {
            println!("  Background: none; every chunk of {} decodes as text", width);
        }
    }

    Ok(())
}
