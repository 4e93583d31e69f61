use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use listwire::ControllerConfig;
use listwire::reorder::ReorderRequest;

mod scenario;

use scenario::{Scenario, mismatches};

#[derive(Parser)]
#[command(name = "listwire")]
#[command(about = "Replay list interactions without a browser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print the resulting snapshot as JSON
    Run {
        /// Path to a scenario .json file
        file: PathBuf,
    },
    /// Run scenarios and compare against their `expect` section
    Test {
        /// Scenario file(s)
        files: Vec<PathBuf>,
        /// Write the actual snapshot into `expect` instead of verifying
        #[arg(long)]
        update: bool,
    },
    /// Print the default controller config
    Config,
    /// Decode a reorder form body into its ids
    Decode {
        /// e.g. `todo-ids=3,1,2`
        body: String,
        /// Form field holding the ids
        #[arg(long, default_value = "todo-ids")]
        field: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file } => run_scenario(&file),
        Commands::Test { files, update } => run_tests(&files, update),
        Commands::Config => print_json(&ControllerConfig::default()),
        Commands::Decode { body, field } => match ReorderRequest::from_form_body(&field, &body) {
            Ok(request) => print_json(&request),
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn print_json(value: &impl serde::Serialize) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load(file: &Path) -> Result<Scenario, String> {
    let content = fs::read_to_string(file).map_err(|e| format!("Error reading {}: {}", file.display(), e))?;
    Scenario::parse(&content).map_err(|e| format!("{}: {}", file.display(), e))
}

fn run_scenario(file: &Path) -> ExitCode {
    let scenario = match load(file) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    eprintln!("Running: {}", file.display());
    match scenario.run() {
        Ok(snapshot) => print_json(&snapshot),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs every scenario file; each file is one test.
fn run_tests(files: &[PathBuf], update: bool) -> ExitCode {
    let mut passed = 0;
    let mut failed = 0;

    for file in files {
        if run_single_test(file, update) {
            passed += 1;
        } else {
            failed += 1;
        }
    }

    eprintln!("\n{} tests: {} passed, {} failed", files.len(), passed, failed);
    if failed > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn run_single_test(file: &Path, update: bool) -> bool {
    let mut scenario = match load(file) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("{}", e);
            return false;
        }
    };
    let name = scenario.name.clone().unwrap_or_else(|| file.display().to_string());
    eprint!("  {} ... ", name);

    let actual = match scenario.run().map(serde_json::to_value) {
        Ok(Ok(actual)) => actual,
        Ok(Err(e)) => {
            eprintln!("FAILED (snapshot not serializable: {})", e);
            return false;
        }
        Err(e) => {
            eprintln!("FAILED: {}", e);
            return false;
        }
    };

    if update {
        scenario.expect = Some(actual);
        return match serde_json::to_string_pretty(&scenario) {
            Ok(json) => match fs::write(file, json + "\n") {
                Ok(()) => {
                    eprintln!("updated");
                    true
                }
                Err(e) => {
                    eprintln!("FAILED (writing {}: {})", file.display(), e);
                    false
                }
            },
            Err(e) => {
                eprintln!("FAILED ({})", e);
                false
            }
        };
    }

    let Some(expected) = &scenario.expect else {
        // No expectation - just check it runs
        eprintln!("ok ({})", actual);
        return true;
    };
    let diff = mismatches(expected, &actual);
    if diff.is_empty() {
        eprintln!("ok");
        true
    } else {
        eprintln!("FAILED");
        for (field, expected, actual) in diff {
            eprintln!("    {}:", field);
            eprintln!("      expected: {}", expected);
            eprintln!("      actual:   {}", actual);
        }
        false
    }
}
