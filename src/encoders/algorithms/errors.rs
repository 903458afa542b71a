use std::fmt;
use std::path::PathBuf;

/// Errors raised by the symbol, group and chunk stages in either direction.
#[derive(Debug, PartialEq, Eq)]
pub enum CodecError {
    /// The input contains a symbol not in the alphabet
    InvalidSymbol {
        symbol: char,
        position: usize,
        input: String,
        valid_symbols: String,
    },
    /// A chunk or group width of zero was requested
    InvalidWidth { width: usize },
}

impl CodecError {
    /// Create an InvalidSymbol error with context
    pub fn invalid_symbol(symbol: char, position: usize, input: &str, valid_symbols: &str) -> Self {
        let display_input = if input.chars().count() > 60 {
            format!("{}...", input.chars().take(60).collect::<String>())
        } else {
            input.to_string()
        };

        CodecError::InvalidSymbol {
            symbol,
            position,
            input: display_input,
            valid_symbols: valid_symbols.to_string(),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        match self {
            CodecError::InvalidSymbol {
                symbol,
                position,
                input,
                valid_symbols,
            } => {
                write_error(
                    f,
                    use_color,
                    &format!("invalid symbol '{}' at position {}", symbol, position),
                )?;
                writeln!(f)?;
                writeln!(f)?;

                // position is a byte offset; the caret needs a char offset
                let caret = input
                    .char_indices()
                    .take_while(|(i, _)| i < position)
                    .count();
                writeln!(f, "  {}", input)?;
                write!(f, "  {}", " ".repeat(caret))?;
                if use_color {
                    writeln!(f, "\x1b[1;31m^\x1b[0m")?;
                } else {
                    writeln!(f, "^")?;
                }
                writeln!(f)?;

                let hint_symbols = if valid_symbols.chars().count() > 80 {
                    format!("{}...", valid_symbols.chars().take(80).collect::<String>())
                } else {
                    valid_symbols.clone()
                };
                write_hint(f, use_color, &format!("valid symbols: {}", hint_symbols))
            }
            CodecError::InvalidWidth { width } => {
                write_error(f, use_color, &format!("invalid chunk width {}", width))?;
                write!(f, "\n\n")?;
                write_hint(f, use_color, "chars per dot must be at least 1")
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Errors surfaced by the full text/image pipeline.
#[derive(Debug)]
pub enum Error {
    /// Symbol stream or width was rejected
    Codec(CodecError),
    /// Source image missing/unreadable, or output path unwritable
    FileAccess {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Codec(e) => write!(f, "{}", e),
            Error::FileAccess { path, source } => {
                let use_color = should_use_color();
                write_error(
                    f,
                    use_color,
                    &format!("cannot access image '{}'", path.display()),
                )?;
                write!(f, "\n\n  {}", source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Codec(e) => Some(e),
            Error::FileAccess { source, .. } => Some(source),
        }
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        Error::Codec(e)
    }
}

fn write_error(f: &mut fmt::Formatter<'_>, use_color: bool, message: &str) -> fmt::Result {
    if use_color {
        write!(f, "\x1b[1;31merror:\x1b[0m {}", message)
    } else {
        write!(f, "error: {}", message)
    }
}

fn write_hint(f: &mut fmt::Formatter<'_>, use_color: bool, message: &str) -> fmt::Result {
    if use_color {
        write!(f, "\x1b[1;36mhint:\x1b[0m {}", message)
    } else {
        write!(f, "hint: {}", message)
    }
}

/// Check if colored output should be used
fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

/// Error when an alphabet is not found in the registry
#[derive(Debug)]
pub struct AlphabetNotFoundError {
    pub name: String,
    pub suggestion: Option<String>,
}

impl AlphabetNotFoundError {
    pub fn new(name: impl Into<String>, suggestion: Option<String>) -> Self {
        Self {
            name: name.into(),
            suggestion,
        }
    }
}

impl fmt::Display for AlphabetNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        write_error(f, use_color, &format!("alphabet '{}' not found", self.name))?;
        write!(f, "\n\n")?;

        if let Some(suggestion) = &self.suggestion {
            write_hint(f, use_color, &format!("did you mean '{}'?", suggestion))?;
            writeln!(f)?;
        }

        if use_color {
            write!(
                f,
                "      run \x1b[1m`chroma-qr config list`\x1b[0m to see all alphabets"
            )
        } else {
            write!(f, "      run `chroma-qr config list` to see all alphabets")
        }
    }
}

impl std::error::Error for AlphabetNotFoundError {}

/// Edit distance between two names, counted in chars, keeping a single row.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(diagonal + 1).min(row[j] + 1);
        }
    }

    row[b.len()]
}

/// Closest alphabet name to `name`, ignoring case.
///
/// Short names tolerate two edits, longer ones three. Ties go to the name
/// that sorts first.
pub fn find_closest_alphabet(name: &str, available: &[String]) -> Option<String> {
    let name = name.to_lowercase();
    let allowed = if name.chars().count() < 5 { 2 } else { 3 };

    available
        .iter()
        .map(|candidate| (edit_distance(&name, &candidate.to_lowercase()), candidate))
        .filter(|&(distance, _)| distance <= allowed)
        .min()
        .map(|(_, candidate)| candidate.clone())
}
