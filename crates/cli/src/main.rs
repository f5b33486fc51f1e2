mod commands;
mod logging;
mod serve;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::parse::cmd_parse;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// FUNC definition parser.
#[derive(Parser)]
#[command(name = "funcdef", version, about = "FUNC definition parser")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a FUNC definition and print the result
    Parse {
        /// Path to the script; reads stdin when omitted or `-`
        file: Option<PathBuf>,
        /// Grammar rule to start from
        #[arg(long)]
        start_rule: Option<String>,
    },

    /// Start the HTTP parsing service
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,
        /// Largest accepted script, in bytes
        #[arg(long, default_value_t = serve::MAX_SOURCE_SIZE)]
        max_source_size: usize,
        /// Per-request parse time limit, in milliseconds
        #[arg(long, default_value = "2000")]
        timeout_ms: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file, start_rule } => {
            logging::init_tracing("warn");
            cmd_parse(file.as_deref(), start_rule, cli.output, cli.quiet);
        }
        Commands::Serve {
            port,
            max_source_size,
            timeout_ms,
        } => {
            logging::init_tracing("info");
            let config = serve::ServeConfig {
                port,
                max_source_size,
                timeout: std::time::Duration::from_millis(timeout_ms),
            };
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    report_error(&format!("failed to create tokio runtime: {}", e), cli.output, false);
                    process::exit(1);
                }
            };
            if let Err(e) = rt.block_on(serve::start_server(config)) {
                tracing::error!(error = %e, "server error");
                report_error(&format!("Server error: {}", e), cli.output, cli.quiet);
                process::exit(1);
            }
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
