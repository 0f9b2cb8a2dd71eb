//! standoff - HTML standoff annotation filter

use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use html_standoff::Limits;
use html_standoff::record::{Options, process_stream};

#[derive(Parser)]
#[command(name = "standoff")]
#[command(
    version,
    about = "Generate word standoff annotations for base64-encoded HTML records",
    long_about = None
)]
#[command(after_help = "INPUT (stdin, one record per line):
    base64(html) <TAB> metadata...

OUTPUT (stdout):
    base64(plain text) <TAB> metadata... <TAB> annotation;annotation;...

EXAMPLES:
    standoff < crawl.tsv > standoff.tsv
    standoff --skip-invalid -v < crawl.tsv > standoff.tsv")]
struct Cli {
    /// Log and drop records that fail instead of stopping
    #[arg(long)]
    skip_invalid: bool,

    /// Maximum element nesting depth per document
    #[arg(long, value_name = "N", default_value_t = Limits::default().max_depth)]
    max_depth: usize,

    /// Maximum number of rendered elements per document
    #[arg(long, value_name = "N", default_value_t = Limits::default().max_nodes)]
    max_nodes: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries records
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(cli.log_level().into()))
        .with_writer(io::stderr)
        .init();

    let options = Options {
        limits: Limits {
            max_depth: cli.max_depth,
            max_nodes: cli.max_nodes,
        },
        skip_invalid: cli.skip_invalid,
    };

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    match process_stream(stdin, stdout, &options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
