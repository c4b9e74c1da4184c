//! rusty-fxpath CLI - Best conversion rates from a table of direct rates
//!
//! Reads the conversion table and the queries from a file or stdin and prints
//! one answer per query.
//!
//! ## Example Usage
//!
//! ```bash
//! # Answer queries from stdin
//! printf '2\nUSD EUR 2\nEUR GBP 3\n1\nUSD GBP\n' | rusty-fxpath
//!
//! # Read from a file, reduce fractions, emit JSON
//! rusty-fxpath --input rates.txt --reduce --format json
//! ```

use clap::{Parser, ValueEnum};
use colored::Colorize;
use rusty_fxpath::error::{FxPathError, Result as FxResult};
use rusty_fxpath::input::{read_input, ParsedInput};
use rusty_fxpath::query::{answer_queries, render_report, OutputFormat};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

/// rusty-fxpath: best currency conversion rates as exact fractions
#[derive(Parser)]
#[command(name = "rusty-fxpath")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Robert Fall")]
#[command(about = "Best currency conversion rates as exact fractions", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input file (reads stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Print rates in lowest terms
    #[arg(short, long)]
    reduce: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Config {
    #[serde(default)]
    reduce_fractions: bool,
    #[serde(default)]
    format: OutputFormat,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".rusty-fxpath").join("config.toml"))
}

impl Config {
    fn load(path: Option<&Path>) -> FxResult<Self> {
        if let Some(config_path) = path {
            if !config_path.exists() {
                return Err(FxPathError::ConfigError(format!(
                    "{} does not exist",
                    config_path.display()
                )));
            }
            return Self::parse_file(config_path);
        }

        // Try default location
        match default_config_path() {
            Some(default_config) if default_config.exists() => {
                match Self::parse_file(&default_config) {
                    Ok(config) => Ok(config),
                    Err(e) => {
                        eprintln!("{} {}", "Warning:".yellow(), e);
                        Ok(Config::default())
                    }
                }
            }
            _ => Ok(Config::default()),
        }
    }

    fn parse_file(path: &Path) -> FxResult<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            FxPathError::ConfigError(format!("failed to parse {}: {}", path.display(), e))
        })
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> FxResult<()> {
    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.map(OutputFormat::from).unwrap_or(config.format);
    let reduce = cli.reduce || config.reduce_fractions;

    let parsed = match &cli.input {
        Some(path) => read_input(File::open(path)?)?,
        None => read_input(io::stdin().lock())?,
    };
    let graph = parsed.build_graph()?;
    log::info!(
        "Answering {} queries over {} currencies",
        parsed.queries.len(),
        graph.len()
    );

    if cli.verbose {
        print_summary(&parsed, graph.len(), graph.edge_count());
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for report in answer_queries(&graph, &parsed.queries) {
        log::debug!("{} -> {}: {}", report.from, report.to, report.outcome);
        writeln!(out, "{}", render_report(&report, format, reduce)?)?;
    }
    out.flush()?;

    Ok(())
}

fn print_summary(parsed: &ParsedInput, currencies: usize, edges: usize) {
    eprintln!(
        "{} v{}",
        "rusty-fxpath".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    eprintln!(
        "{}",
        format!(
            "{} conversions, {} currencies, {} edges, {} queries",
            parsed.conversions.len(),
            currencies,
            edges,
            parsed.queries.len()
        )
        .dimmed()
    );
}
