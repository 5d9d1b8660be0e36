use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use defaultgen::core::model::EmissionMode;
use defaultgen::driver::{self, DiagnosticsFormat, DriverOptions};

#[derive(ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Program facts snapshot (JSON)
    facts: PathBuf,

    /// JSON file with generation defaults
    #[clap(long)]
    config: Option<PathBuf>,

    /// Emission mode when no annotation sets one: overloads or builder
    #[clap(long)]
    mode: Option<EmissionMode>,

    /// Factory name for constructors when no annotation sets one
    #[clap(long)]
    factory_name: Option<String>,

    /// How diagnostics are written to stderr
    #[clap(long, value_enum, default_value = "human")]
    diagnostics: DiagnosticsFormat,

    /// Annotated source, used to show snippets in human diagnostics
    #[clap(long)]
    source: Option<PathBuf>,
}

fn init_logging() {
    if let Ok(filter) = EnvFilter::try_from_env("DEFAULTGEN_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    let opts = DriverOptions {
        facts_path: args.facts,
        config_path: args.config,
        mode: args.mode,
        factory_name: args.factory_name,
        source_path: args.source,
        diagnostics: args.diagnostics,
    };

    let result = driver::run(&opts).and_then(|output| {
        output.write_to(&mut io::stdout().lock(), &mut io::stderr().lock())?;
        Ok(output.has_errors())
    });
    match result {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            ExitCode::FAILURE
        }
    }
}
