mod config;
mod emitter;
mod error;
mod fixture;
mod generator;
mod ident;
mod scanner;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use config::{DirectoryTable, Options, DEFAULT_FIXTURES_DIR, DEFAULT_OUTPUT_FILE};

/// Generates a Rust test module from a directory of annotated .lox fixtures.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory holding the fixtures
    #[arg(long, default_value = DEFAULT_FIXTURES_DIR)]
    fixtures: PathBuf,

    /// File to (re)write with the generated tests
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Only generate modules for these directories
    #[arg(long, value_name = "DIR")]
    include: Vec<String>,

    /// Generate modules for every directory except these
    #[arg(long, value_name = "DIR", conflicts_with = "include")]
    exclude: Vec<String>,

    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn options(self) -> Options {
        let directories = if !self.include.is_empty() {
            DirectoryTable::allow_list(self.include)
        } else if !self.exclude.is_empty() {
            DirectoryTable::deny_list(self.exclude)
        } else {
            DirectoryTable::default()
        };

        Options {
            fixtures_dir: self.fixtures,
            output_file: self.output,
            directories,
            ..Options::default()
        }
    }

    fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Warn
        } else {
            log::LevelFilter::Info
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let summary = generator::run(&args.options())?;
    log::info!(
        "wrote {} tests in {} modules ({} directories skipped)",
        summary.tests,
        summary.modules,
        summary.skipped
    );
    Ok(())
}
