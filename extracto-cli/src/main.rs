mod config;
mod convert;
mod extractors;
mod state;

use anyhow::Result;
use clap::{Parser, Subcommand};
use extracto_ingest::Dialect;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::convert::{ConvertArgs, convert};

#[derive(Parser, Debug)]
#[command(name = "extracto")]
#[command(about = "Convert bank statements into transaction tables", long_about = None)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a statement (PDF or extracted text) and write a CSV table
    Convert {
        input: PathBuf,

        /// provincia | galicia | galicia-tabla | generico
        #[arg(short, long)]
        dialect: Dialect,

        /// Page table exported as CSV, one per page, in page order
        #[arg(long = "table")]
        tables: Vec<PathBuf>,

        /// Defaults to <input>_<dialect>_procesado.csv next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (defaults to ~/.extracto/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the extracted text before parsing
        #[arg(long)]
        print_text: bool,
    },

    /// Write a default config to ~/.extracto/config.toml
    InitConfig,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            dialect,
            tables,
            output,
            config: config_path,
            print_text,
        } => {
            let cfg = config::load_config(config_path.as_deref())?;
            let args = ConvertArgs {
                input,
                dialect,
                tables,
                output,
                print_text,
            };
            let report = convert(&args, &cfg)?;

            println!(
                "Wrote {} transactions to {}",
                report.transactions,
                report.output.display()
            );
            if !report.warnings.is_empty() {
                println!("{} warnings:", report.warnings.len());
                for warning in &report.warnings {
                    println!("  {warning}");
                }
            }
        }
        Commands::InitConfig => config::init_config()?,
    }

    Ok(())
}
