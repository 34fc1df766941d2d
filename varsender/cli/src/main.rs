//! Varsender CLI - prepares templated chat messages from spreadsheet rows
//!
//! ## Usage
//!
//! ```bash
//! # Trim a formatted text document
//! varsender trim message.json
//!
//! # Remove hashtags, reading from stdin
//! cat message.json | varsender cleanup
//!
//! # Fill {{name}} placeholders
//! varsender interpolate message.json --vars '{"name": "Ivan"}'
//!
//! # Prepare every letter of a sheet
//! varsender letters --sheet rows.json --templates templates.json --pretty
//! ```

use std::collections::HashMap;
use std::convert::Infallible;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use varsender_lib::{FormattedText, TemplateSource, Variables, prepare_letters, read_letters};

#[derive(Parser)]
#[command(name = "varsender", about = "Templated chat messages from spreadsheet rows", version)]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Increase verbosity (-v INFO, -vv DEBUG, -vvv TRACE, -vvvv TRACE with file/line)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip leading and trailing whitespace, clipping spans
    Trim(InputArgs),

    /// Remove hashtags and the text they cover
    Cleanup(InputArgs),

    /// Replace {{name}} placeholders and rewrite matching link targets
    Interpolate {
        #[command(flatten)]
        input: InputArgs,

        /// Variables as a JSON object (keys are applied in document order)
        #[arg(long, value_name = "JSON", conflicts_with = "vars_file")]
        vars: Option<String>,

        /// Read variables from a JSON file
        #[arg(long, value_name = "PATH")]
        vars_file: Option<PathBuf>,
    },

    /// Prepare the text of every letter in a sheet
    Letters {
        /// Sheet rows as a JSON array of string arrays; the first row is the header
        #[arg(long, value_name = "PATH")]
        sheet: PathBuf,

        /// Stored templates as a JSON object mapping hashtag to formatted text
        #[arg(long, value_name = "PATH")]
        templates: PathBuf,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Formatted text JSON file (reads from stdin if not provided, use "-" for explicit stdin)
    input: Option<PathBuf>,
}

/// Stored templates loaded from a JSON file.
///
/// Template cells that are not hashtags are taken as plain text.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
struct JsonTemplates(HashMap<String, FormattedText>);

impl TemplateSource for JsonTemplates {
    type Error = Infallible;

    fn parse_markup(&self, raw: &str) -> Result<FormattedText, Infallible> {
        Ok(FormattedText::plain(raw))
    }

    fn lookup_by_hashtag(&self, tag: &str) -> Result<Option<FormattedText>, Infallible> {
        Ok(self.0.get(tag).cloned())
    }
}

/// Initialize tracing subscriber based on verbosity level.
///
/// Nothing is installed without `-v`; `RUST_LOG` overrides the level
/// derived from the flag count.
fn init_tracing(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => "warn,varsender=info,varsender_lib=info".to_string(),
            2 => "info,varsender=debug,varsender_lib=debug".to_string(),
            _ => "debug,varsender=trace,varsender_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Trim(args) => {
            let text = load_text(args.input.as_deref())?;
            print_json(&text.trim(), cli.pretty)
        }
        Commands::Cleanup(args) => {
            let text = load_text(args.input.as_deref())?;
            print_json(&text.cleanup_hashtags(), cli.pretty)
        }
        Commands::Interpolate {
            input,
            vars,
            vars_file,
        } => {
            let variables = load_variables(vars.as_deref(), vars_file.as_deref())?;
            let text = load_text(input.input.as_deref())?;
            print_json(&text.interpolate(&variables), cli.pretty)
        }
        Commands::Letters { sheet, templates } => {
            run_letters(&sheet, &templates, cli.pretty)
        }
    }
}

fn run_letters(sheet: &Path, templates: &Path, pretty: bool) -> Result<()> {
    let rows: Vec<Vec<String>> = read_json(sheet)?;
    let templates: JsonTemplates = read_json(templates)?;

    let letters = read_letters(&rows).wrap_err_with(|| format!("Invalid sheet: {:?}", sheet))?;
    info!(letters = letters.len(), "read sheet");

    let (prepared, failures) = prepare_letters(&templates, &letters);
    for (index, error) in &failures {
        warn!(letter = index, error = %error, "skipped letter");
    }

    if prepared.is_empty() {
        return Err(eyre!(
            "No letters prepared ({} failed out of {})",
            failures.len(),
            letters.len()
        ));
    }

    print_json(&prepared, pretty)
}

/// Loads a formatted text document from a file path or stdin.
fn load_text(path: Option<&Path>) -> Result<FormattedText> {
    let raw = match path {
        Some(p) if p.as_os_str() == "-" => read_stdin()?,
        Some(p) => fs::read_to_string(p).wrap_err_with(|| format!("Failed to read file: {:?}", p))?,
        None if io::stdin().is_terminal() => {
            return Err(eyre!("No input file provided. Use `varsender --help` for usage."));
        }
        None => read_stdin()?,
    };

    serde_json::from_str(&raw).wrap_err("Input is not a formatted text document")
}

fn load_variables(inline: Option<&str>, file: Option<&Path>) -> Result<Variables> {
    match (inline, file) {
        (Some(json), _) => serde_json::from_str(json).wrap_err("Invalid JSON in --vars argument"),
        (None, Some(path)) => read_json(path),
        (None, None) => Err(eyre!("Provide variables with --vars or --vars-file")),
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let raw =
        fs::read_to_string(path).wrap_err_with(|| format!("Failed to read file: {:?}", path))?;
    serde_json::from_str(&raw).wrap_err_with(|| format!("Invalid JSON in {:?}", path))
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .wrap_err("Failed to read from stdin")?;
    Ok(buffer)
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .wrap_err("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
