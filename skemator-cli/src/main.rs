use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use skemator_core::{
    debug, load_source, skematize_document, DebugVerbosity, InputSource, SkemaConfig, SourceRole,
};

/// Take JSON data and generate a skeleton for the JSON schema which represents it
#[derive(Debug, Parser)]
#[command(name = "skemator-cli", version)]
struct Cli {
    /// Input JSON file (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// Read prior schema from FILE, seeding descriptions and flags
    #[arg(short, long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Generate a node per element even for arrays of plain scalars
    #[arg(long)]
    expand_scalar_lists: bool,

    /// Reject inputs nested deeper than N containers
    #[arg(long, value_name = "N", default_value_t = skemator_core::schema::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print the schema on a single line
    #[arg(long)]
    compact: bool,

    /// Print debug information to stderr
    #[arg(long)]
    debug: bool,

    /// Print debug information for every node (implies --debug)
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> SkemaConfig {
        SkemaConfig {
            skip_scalar_lists: !self.expand_scalar_lists,
            max_depth: Some(self.max_depth),
            debug: self.debug || self.verbose,
            verbosity: if self.verbose {
                DebugVerbosity::Verbose
            } else {
                DebugVerbosity::Normal
            },
        }
    }
}

fn main() -> ExitCode {
    #[cfg(feature = "trace")]
    init_tracing();

    match run_cli(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            anstream::eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// Extract the main logic into a separate function so we can call it from tests
fn run_cli(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.config();
    let output = render(&cli, &config)?;
    println!("{}", output);
    Ok(())
}

fn render(cli: &Cli, config: &SkemaConfig) -> Result<String, Box<dyn std::error::Error>> {
    let input_source = InputSource::from_arg(cli.file.clone());
    let value = load_source(&input_source, SourceRole::Input)?;

    let prior = cli
        .schema
        .clone()
        .map(|path| load_source(&InputSource::Path(path), SourceRole::Schema))
        .transpose()?;

    let result = skematize_document(&value, prior.as_ref(), config)?;
    debug!(
        config,
        "Skematized {} into {} node(s)", input_source, result.node_count
    );

    let text = if cli.compact {
        serde_json::to_string(&result.schema)?
    } else {
        serde_json::to_string_pretty(&result.schema)?
    };
    Ok(text)
}

#[cfg(feature = "trace")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
