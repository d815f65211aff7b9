//! Pattern printer
//!
//! Prompts for a size and prints a `size` x `size` square of marker
//! characters. A size of zero or less prints nothing.

use std::io::{self, BufRead, BufWriter, Write};

use anyhow::Result;
use clap::Parser;

/// Prompt written before reading the size
pub const PROMPT: &str = "Enter the size of the pattern: ";

/// Arguments for the pattern command
#[derive(Parser, Debug)]
pub struct PatternArgs {
    /// Pattern size; prompts on stdin when omitted
    #[arg(long, short = 's', allow_negative_numbers = true)]
    pub size: Option<i64>,

    /// Character used to draw the pattern
    #[arg(long, short = 'm', default_value_t = '*')]
    pub marker: char,
}

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("failed to read pattern size: {0}")]
    Io(#[from] io::Error),

    #[error("no pattern size given")]
    NoInput,

    #[error("invalid pattern size '{0}': expected an integer")]
    NotAnInteger(String),
}

/// Write the prompt to `out`, then read and parse one line from `input`.
pub fn read_size<R, W>(input: &mut R, out: &mut W) -> Result<i64, PatternError>
where
    R: BufRead,
    W: Write,
{
    out.write_all(PROMPT.as_bytes())?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PatternError::NoInput);
    }

    let trimmed = line.trim();
    trimmed
        .parse()
        .map_err(|_| PatternError::NotAnInteger(trimmed.to_owned()))
}

/// Write `size` rows of `size` markers.
pub fn draw<W: Write>(size: i64, marker: char, out: &mut W) -> io::Result<()> {
    let Ok(size) = usize::try_from(size) else {
        return Ok(());
    };

    let mut buf = [0u8; 4];
    let marker = marker.encode_utf8(&mut buf).as_bytes();

    for _ in 0..size {
        for _ in 0..size {
            out.write_all(marker)?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Run the pattern command against stdin/stdout
pub fn run_pattern(args: PatternArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let size = match args.size {
        Some(size) => size,
        None => read_size(&mut io::stdin().lock(), &mut out)?,
    };

    tracing::debug!(size, marker = %args.marker, "drawing pattern");
    draw(size, args.marker, &mut out)?;
    out.flush()?;
    Ok(())
}
