use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn, LevelFilter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tabconv::{render_grid, ConvertError, Converter, ConverterConfig};

/// Convert data between CSV, JSON, and YAML formats
#[derive(Parser)]
#[command(name = "tabconv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file
    #[arg(value_name = "INPUT_FILE")]
    input: PathBuf,

    /// Output file path; prints a table when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Specify input file format (csv, json, yaml)
    #[arg(long, value_enum, ignore_case = true)]
    input_format: Option<Format>,

    /// Specify output file format (csv, json, yaml)
    #[arg(long, value_enum, ignore_case = true)]
    output_format: Option<Format>,

    /// Configuration file path (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Supported input/output formats
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// CSV (semicolon-separated on write)
    Csv,
    /// JSON (array of objects)
    Json,
    /// YAML (sequence of mappings)
    Yaml,
}

impl Format {
    fn as_str(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(config_path) => load_config(config_path)?,
        None => ConverterConfig::default(),
    };
    let converter = Converter::with_config(config).context("Invalid configuration")?;

    run(&cli, &converter)
}

/// Set up logging based on verbosity flags
fn setup_logging(verbose: bool, quiet: bool) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if quiet {
        builder.filter_level(LevelFilter::Error);
    }
    builder.format_timestamp(None).init();
}

/// Load configuration from a JSON file
fn load_config(path: &Path) -> Result<ConverterConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: ConverterConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// Load the input and either save it or print it as a table
fn run(cli: &Cli, converter: &Converter) -> Result<()> {
    let input_format = cli.input_format.map(|f| f.as_str());
    let records = converter
        .load(&cli.input, input_format)
        .map_err(|e| map_convert_error(e, "Load", &cli.input))?;

    match &cli.output {
        Some(output) => {
            let output_format = cli.output_format.map(|f| f.as_str());
            converter
                .save(&records, output, output_format)
                .map_err(|e| map_convert_error(e, "Save", output))?;
            info!(
                "Wrote {} records to {}",
                records.len(),
                output.display()
            );
        }
        None => {
            if cli.output_format.is_some() {
                warn!("--output-format has no effect without --output");
            }
            write_table(&render_grid(&records))?;
        }
    }

    Ok(())
}

/// Print the rendered table to stdout
fn write_table(table: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", table).context("Failed to write to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}

/// Map ConvertError to anyhow::Error with context
fn map_convert_error(error: ConvertError, action: &str, path: &Path) -> anyhow::Error {
    match error {
        ConvertError::IoError(e) => {
            anyhow::anyhow!("{} failed for {}: IO error: {}", action, path.display(), e)
        }
        other => anyhow::Error::new(other)
            .context(format!("{} failed for {}", action, path.display())),
    }
}
