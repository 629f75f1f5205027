use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use docx_blocks::config::Config;

#[derive(Parser)]
#[command(name = "docx-blocks")]
#[command(version)]
#[command(about = "Parse a .docx file into an ordered JSON block list", long_about = None)]
struct Cli {
    /// Input .docx file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output JSON file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Convert page/section breaks to break blocks instead of dropping them
    #[arg(long)]
    preserve_breaks: bool,

    /// Write single-line JSON
    #[arg(long)]
    compact: bool,

    /// Config file (default: <config dir>/docx-blocks/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let verbose = cli.verbose || config.verbose;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "info" } else { "warn" }),
    )
    .init();

    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }

    let mut options = config.parse_options();
    options.verbose = verbose;
    options.preserve_breaks |= cli.preserve_breaks;

    let result = docx_blocks::parse_with_options(&cli.input, &options);

    let json = if config.pretty && !cli.compact {
        result.to_json_pretty()?
    } else {
        result.to_json()?
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if verbose {
                eprintln!("Written to {}", path.display());
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}
