//! URL sanitizer command-line entry point.
//!
//! Each subcommand reads its input from the argument, or from stdin when the
//! argument is omitted, and prints the result to stdout. Diagnostics,
//! including SQL injection warnings, go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url_sanitizer::constants::DEFAULT_LOG_FILTER;
use url_sanitizer::{Config, UrlCodec};

/// Percent-encode and SQL-sanitize URL components and query strings.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Do not log warnings for SQL-looking input.
    #[arg(long, global = true)]
    no_injection_warnings: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Percent-encode text for use in a URL component.
    Encode { text: Option<String> },
    /// Percent-decode text and escape SQL metacharacters.
    Decode { text: Option<String> },
    /// Escape SQL metacharacters without decoding.
    Sanitize { text: Option<String> },
    /// Build a query string from a JSON object.
    EncodeQuery { json: Option<String> },
    /// Parse a query string and print it as a JSON object.
    DecodeQuery { query: Option<String> },
}

fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is reserved for output)
    init_logging();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if cli.no_injection_warnings {
        config.sanitizer.warn_on_injection = false;
    }
    let codec = UrlCodec::new(config.sanitizer);

    let output = match cli.command {
        Command::Encode { text } => codec.encode(&read_input(text, &config)?),
        Command::Decode { text } => codec.decode(&read_input(text, &config)?)?,
        Command::Sanitize { text } => codec.sanitize(&read_input(text, &config)?),
        Command::EncodeQuery { json } => {
            let raw = read_input(json, &config)?;
            let value: serde_json::Value =
                serde_json::from_str(&raw).context("input is not valid JSON")?;
            codec.encode_query_params_json(&value)?
        }
        Command::DecodeQuery { query } => {
            let params = codec.decode_query_params(&read_input(query, &config)?)?;
            info!(keys = params.len(), "Decoded query string");
            serde_json::to_string_pretty(&params)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Use the argument if given, otherwise stdin without its trailing newline.
fn read_input(arg: Option<String>, config: &Config) -> Result<String> {
    let input = match arg {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            let trimmed = buf.trim_end_matches(['\n', '\r']).len();
            buf.truncate(trimmed);
            buf
        }
    };
    config.check_input_len(&input)?;
    Ok(input)
}

/// Initialize tracing subscriber with stderr output.
fn init_logging() {
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
