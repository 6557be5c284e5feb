use clap::Parser;
use prisma_to_python::{ConverterOptions, convert_schema_with_options};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prisma-to-python", version)]
#[command(about = "Convert a Prisma DMMF document to Python type definitions", long_about = None)]
struct Cli {
    /// Input Prisma DMMF JSON file (use '-' for stdin)
    #[arg(short, long, value_name = "PATH")]
    input: String,

    /// Output Python file path
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,

    /// Output indentation size
    #[arg(
        short = 'n',
        long,
        value_name = "NUMBER",
        default_value_t = 4,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    indentation: u16,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Read input
    let input_content = if cli.input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(&cli.input)?
    };
    debug!(input = %cli.input, bytes = input_content.len(), "read input");

    // Convert schema
    let options = ConverterOptions::with_indentation(usize::from(cli.indentation));
    let python = convert_schema_with_options(&input_content, options)?;

    // Write output
    fs::write(&cli.output, python)?;
    info!(output = %cli.output.display(), "wrote python types");

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
