use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};

use defaultgen::core::api::{GenerationOutput, generate};
use defaultgen::core::facts::ProgramFacts;
use defaultgen::core::options::GenerateOptions;

static TEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn generate_json(facts: &str) -> GenerationOutput {
    let facts = ProgramFacts::from_json(facts).expect("facts should deserialize");
    generate(&facts, &GenerateOptions::default())
}

/// Source of the single unit named `qualified`.
pub(crate) fn unit_source<'a>(output: &'a GenerationOutput, qualified: &str) -> &'a str {
    output
        .units
        .iter()
        .find(|unit| unit.qualified_name() == qualified)
        .map(|unit| unit.source.as_str())
        .unwrap_or_else(|| panic!("no unit named {qualified}"))
}

/// Runs the `defaultgen` binary on a facts file written to a temp dir.
pub(crate) fn run_cli(name: &str, facts: &str, args: &[&str]) -> Output {
    let run_id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_dir = std::env::temp_dir().join(format!(
        "defaultgen_cli_test_{}_{}_{}",
        name,
        std::process::id(),
        run_id
    ));
    std::fs::create_dir_all(&temp_dir).expect("failed to create temp dir");
    let facts_path: PathBuf = temp_dir.join(format!("{name}.json"));
    std::fs::write(&facts_path, facts).expect("failed to write facts");

    let output = Command::new(env!("CARGO_BIN_EXE_defaultgen"))
        .arg(&facts_path)
        .args(args)
        .output()
        .expect("failed to run defaultgen");
    let _ = std::fs::remove_dir_all(&temp_dir);
    output
}
