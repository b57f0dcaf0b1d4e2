/*!
Prints the tokens of a JSON document, one per line, or a summary of them.
*/

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use clap_verbosity_flag::Verbosity;
use json_tokenizer::{
    tokenize_with, Cursor, SliceCursor, Spanned, StreamCursor, Token, Tokenizer, TokenizerOptions,
};
use memmap2::Mmap;

use reader::IoReadIterator;
use stats::TokenStats;

mod reader;
mod stats;

/// Tokenize a JSON document and print its tokens.
#[derive(Parser)]
#[command(name = "json-token-dump", version, about, long_about = None)]
struct Args {
    #[arg(value_name = "FILE")]
    /// Optional path to a JSON file. If omitted, reads from STDIN
    input: Option<PathBuf>,
    /// Read FILE as a stream instead of memory-mapping it
    #[arg(long)]
    stream: bool,
    /// Output format for tokens
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Print per-kind token statistics instead of the tokens
    #[arg(long)]
    stats: bool,
    /// How many of the most frequent strings to list with --stats
    #[arg(long, default_value_t = 10)]
    top: usize,
    /// Accept numbers with a leading '+', which RFC 8259 does not allow
    #[arg(long)]
    allow_leading_plus: bool,
    #[command(flatten)]
    verbose: Verbosity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `line:col<TAB>kind<TAB>token`
    Text,
    /// One JSON object per token
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let options = TokenizerOptions::default().allow_leading_plus(args.allow_leading_plus);
    let mut out = BufWriter::new(io::stdout().lock());

    let reader: Box<dyn Read> = match &args.input {
        Some(path) if !args.stream => {
            let file =
                File::open(path).with_context(|| format!("Failed to open file {path:?}"))?;
            // SAFETY: the mapping is only read, and we don't guard against the file
            // being modified by another process while we tokenize it.
            let mmap = unsafe { Mmap::map(&file) }
                .with_context(|| format!("Failed to map file {path:?}"))?;
            log::debug!("tokenizing {} mapped bytes", mmap.len());
            run(SliceCursor::new(&mmap[..]), &args, options, &mut out)?;
            return Ok(out.flush()?);
        }
        Some(path) => {
            Box::new(File::open(path).with_context(|| format!("Failed to open file {path:?}"))?)
        }
        None => {
            if io::stdin().is_terminal() {
                // No piped input and no file specified
                let mut cmd = Args::command();
                return Ok(cmd.print_help()?);
            }
            Box::new(io::stdin().lock())
        }
    };

    log::debug!("tokenizing streamed input");
    let mut bytes = IoReadIterator::new(reader);
    let result = run(StreamCursor::new(&mut bytes), &args, options, &mut out);
    if let Some(err) = bytes.take_error() {
        return Err(err).context("Failed to read input");
    }
    result?;
    Ok(out.flush()?)
}

fn run<'a, K>(
    cursor: K,
    args: &Args,
    options: TokenizerOptions,
    out: &mut impl Write,
) -> Result<()>
where
    K: Cursor<'a, Char = u8>,
{
    if args.stats {
        let mut stats = TokenStats::new();
        tokenize_with(cursor, options, &mut stats).context("Failed to tokenize input")?;
        stats.write_report(out, args.top)?;
        return Ok(());
    }

    let mut tokenizer = Tokenizer::with_options(cursor, options);
    while let Some(spanned) = tokenizer
        .next_spanned()
        .context("Failed to tokenize input")?
    {
        write_token(out, args.format, &spanned, K::BORROWS)?;
    }
    Ok(())
}

fn write_token(
    out: &mut impl Write,
    format: Format,
    spanned: &Spanned<Token<'_, u8>>,
    borrowed: bool,
) -> io::Result<()> {
    let token = &spanned.value;
    let start = spanned.start;
    match format {
        Format::Text => writeln!(
            out,
            "{}:{}\t{}\t{}",
            start.line + 1,
            start.col + 1,
            token.kind_name(),
            token
        ),
        Format::Json => {
            let record = serde_json::json!({
                "kind": token.kind_name(),
                "text": token.text().map(|text| text.to_string_lossy()),
                "offset": start.offset,
                "len": spanned.end.offset - start.offset,
                "borrowed": (borrowed && token.text().is_some()),
                "line": start.line + 1,
                "col": start.col + 1,
            });
            writeln!(out, "{record}")
        }
    }
}
