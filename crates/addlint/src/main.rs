//! addlint CLI
//!
//! Reports additions of two integer literals in Rust source files.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use addlint::driver::{analyze_files, collect_files, Finding};
use addlint::{AddCheck, Analyzer, CheckContext};
use anyhow::Context;
use clap::Parser;

/// Exit code when at least one diagnostic was reported
const EXIT_FINDINGS: u8 = 3;

#[derive(Parser)]
#[command(
    name = "addlint",
    version,
    about = "reports integer additions",
    long_about = "Reports additions whose operands are both integer literals, such as `3 + 4`."
)]
struct Cli {
    /// Files or directories to check
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Print findings as a JSON array
    #[arg(long)]
    json: bool,

    /// Enable verbose output, including a trace of every binary expression
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "trace" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("addlint: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let analyzer = AddCheck::new();
    let ctx = CheckContext::for_verbosity(cli.verbose);

    let files = collect_files(&cli.paths).context("collecting input files")?;
    log::debug!("{}: checking {} file(s)", analyzer.name(), files.len());

    let mut findings: Vec<Finding> = Vec::new();
    let mut failed = false;
    for result in analyze_files(&files, &analyzer, &ctx) {
        match result {
            Ok(report) => findings.extend(report.findings()),
            Err(err) => {
                eprintln!("addlint: {}", err);
                failed = true;
            }
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &findings).context("writing JSON output")?;
        writeln!(out)?;
    } else {
        for finding in &findings {
            writeln!(out, "{}", finding)?;
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else if findings.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FINDINGS)
    })
}
