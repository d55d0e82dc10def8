//! CLI entry point for the lab completion checker.
//!
//! Reads a student roster, a lab catalog and a completion report, and prints
//! each student's best completion percentage for every checked lab.

use clap::Parser;
use lab_completion::report::{DEFAULT_COMPLETE_THRESHOLD, OutputFormat, ReportOptions};
use lab_completion::{Inputs, run};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Exit status for any fatal error.
const FAILURE: u8 = 255;

#[derive(Debug, Parser)]
#[command(name = "lab_completion")]
#[command(about = "Easily determine lab completions for your students", long_about = None)]
struct Cli {
    /// A CSV file containing a list of students
    #[arg(long, value_name = "FILE")]
    students: PathBuf,

    /// A CSV file containing the lab completion report
    #[arg(long, value_name = "FILE")]
    report: PathBuf,

    /// A CSV file containing a list of labs
    #[arg(long, value_name = "FILE")]
    labs: PathBuf,

    /// Check completion for a specific named lab (accepted, not applied)
    #[arg(long)]
    lab: Option<String>,

    /// Indicate CSV files contain no header rows
    #[arg(long = "noHeaders", default_value_t = false)]
    no_headers: bool,

    /// Just show lab results for incomplete labs
    #[arg(long = "justIncomplete", default_value_t = false)]
    just_incomplete: bool,

    /// Set the threshold for a lab to be considered complete
    #[arg(long = "completeThreshold", default_value_t = DEFAULT_COMPLETE_THRESHOLD)]
    complete_threshold: i64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Cli {
    fn inputs(&self) -> Inputs {
        Inputs {
            students: self.students.clone(),
            report: self.report.clone(),
            labs: self.labs.clone(),
            no_headers: self.no_headers,
        }
    }

    fn options(&self) -> ReportOptions {
        ReportOptions {
            just_incomplete: self.just_incomplete,
            complete_threshold: self.complete_threshold,
            format: self.format,
        }
    }
}

fn init_logging() {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        );

    tracing_subscriber::registry().with(stderr_layer).init();
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // Load .env file
    init_logging();

    let cli = Cli::parse();
    debug!(?cli, "Parsed arguments");

    if let Some(lab) = &cli.lab {
        warn!(lab = %lab, "--lab is accepted but does not narrow the report");
    }

    let stdout = std::io::stdout();
    match run(&cli.inputs(), &cli.options(), &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(FAILURE)
        }
    }
}
