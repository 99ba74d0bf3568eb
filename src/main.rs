use clap::{Parser, ValueEnum};
use colored::Colorize;
use jsdetect::report::Summary;
use jsdetect::{Config, FileFinder, FileReport, Linter, ReportFormat, Reporter};
use miette::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, info, warn};

/// jsdetect - Fast anti-pattern detection for JavaScript
#[derive(Parser, Debug)]
#[command(name = "jsdetect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files or directories to lint
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only run these rules (can be specified multiple times)
    #[arg(short, long = "rule", value_name = "ID")]
    rules: Vec<String>,

    /// Also lint files excluded by .gitignore and .ignore
    #[arg(long)]
    no_ignore: bool,

    /// Lint files in parallel (enabled by default)
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Terminal,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("jsdetect v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let linter = Linter::new(&config)?;

    let has_errors = run_analysis(&linter, &cli)?;
    Ok(if has_errors {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries the report
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        // Try to load from default locations
        Config::from_default_locations(config_dir(&cli.paths))?
    };

    // Override with CLI arguments
    if !cli.rules.is_empty() {
        config.enable_only(&cli.rules)?;
    }

    Ok(config)
}

/// Directory searched for a config file: the first directory argument
fn config_dir(paths: &[PathBuf]) -> &Path {
    paths
        .iter()
        .find(|p| p.is_dir())
        .map(PathBuf::as_path)
        .unwrap_or_else(|| Path::new("."))
}

/// Lint and report; true when any error-severity diagnostic was found
fn run_analysis(linter: &Linter, cli: &Cli) -> Result<bool> {
    let start_time = Instant::now();

    // Discover files
    let finder = FileFinder::new().with_ignore_files(!cli.no_ignore);
    let files = finder.find_files(&cli.paths)?;

    if files.is_empty() && matches!(cli.format, OutputFormat::Terminal) {
        if !cli.quiet {
            println!("{}", "No JavaScript files found.".yellow());
        }
        return Ok(false);
    }

    let lint = |path: &PathBuf| match linter.lint_file(path) {
        Ok(report) => Some(report),
        Err(e) => {
            warn!("{}", e);
            None
        }
    };
    let reports: Vec<FileReport> = if cli.parallel {
        files.par_iter().filter_map(lint).collect()
    } else {
        files.iter().filter_map(lint).collect()
    };
    debug!("linted {} of {} files", reports.len(), files.len());

    // Report results
    let report_format = match cli.format {
        OutputFormat::Terminal => ReportFormat::Terminal,
        OutputFormat::Json => ReportFormat::Json,
    };
    let reporter = Reporter::new(report_format, cli.output.clone());
    reporter.report(linter, &reports)?;

    // Print timing
    let elapsed = start_time.elapsed();
    if !cli.quiet && matches!(cli.format, OutputFormat::Terminal) {
        println!(
            "{}",
            format!(
                "⏱  Linted {} files in {:.2}s",
                files.len(),
                elapsed.as_secs_f64()
            )
            .dimmed()
        );
    }

    Ok(Summary::from_reports(&reports).errors > 0)
}
