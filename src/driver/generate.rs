use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::api::{GenerationOutput, generate};
use crate::core::codegen::GeneratedUnit;
use crate::core::facts::ProgramFacts;
use crate::core::model::EmissionMode;
use crate::core::options::GenerateOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DiagnosticsFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct DriverOptions {
    pub facts_path: PathBuf,
    pub config_path: Option<PathBuf>,
    /// Overrides `default_mode` from the config file.
    pub mode: Option<EmissionMode>,
    /// Overrides `default_factory_name` from the config file.
    pub factory_name: Option<String>,
    /// Source text used to show diagnostic snippets.
    pub source_path: Option<PathBuf>,
    pub diagnostics: DiagnosticsFormat,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read {path}: {err}", path = .0.display(), err = .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid facts in {path}: {err}", path = .0.display(), err = .1)]
    Facts(PathBuf, #[source] serde_json::Error),

    #[error("invalid config in {path}: {err}", path = .0.display(), err = .1)]
    Config(PathBuf, #[source] serde_json::Error),

    #[error("failed to encode diagnostics: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),
}

#[derive(Debug)]
pub struct DriverOutput {
    pub generation: GenerationOutput,
    /// Diagnostics, already formatted as requested.
    pub diagnostics: String,
    /// Generated units concatenated with a header per unit.
    pub units: String,
}

impl DriverOutput {
    pub fn has_errors(&self) -> bool {
        self.generation.has_errors()
    }

    /// Diagnostics are written before units so they survive a closed output.
    pub fn write_to(
        &self,
        units: &mut impl Write,
        diagnostics: &mut impl Write,
    ) -> Result<(), DriverError> {
        diagnostics
            .write_all(self.diagnostics.as_bytes())
            .and_then(|()| diagnostics.flush())
            .map_err(DriverError::Write)?;
        units
            .write_all(self.units.as_bytes())
            .and_then(|()| units.flush())
            .map_err(DriverError::Write)
    }
}

pub fn run(opts: &DriverOptions) -> Result<DriverOutput, DriverError> {
    let options = load_options(opts)?;
    let facts_text = read(&opts.facts_path)?;
    let facts = ProgramFacts::from_json(&facts_text)
        .map_err(|e| DriverError::Facts(opts.facts_path.clone(), e))?;
    debug!(types = facts.types.len(), ?options, "loaded facts");

    let source = opts.source_path.as_deref().map(read).transpose()?;
    let generation = generate(&facts, &options);
    let diagnostics = format_diagnostics(&generation, opts.diagnostics, source.as_deref())?;
    let units = format_units(&generation.units);
    Ok(DriverOutput {
        generation,
        diagnostics,
        units,
    })
}

/// Config file first, then per-field command-line overrides.
pub fn load_options(opts: &DriverOptions) -> Result<GenerateOptions, DriverError> {
    let mut options = match &opts.config_path {
        Some(path) => GenerateOptions::from_json(&read(path)?)
            .map_err(|e| DriverError::Config(path.clone(), e))?,
        None => GenerateOptions::default(),
    };
    if let Some(mode) = opts.mode {
        options.default_mode = mode;
    }
    if let Some(name) = &opts.factory_name {
        options.default_factory_name = name.clone();
    }
    Ok(options)
}

pub fn format_diagnostics(
    generation: &GenerationOutput,
    format: DiagnosticsFormat,
    source: Option<&str>,
) -> Result<String, DriverError> {
    match format {
        DiagnosticsFormat::Human => Ok(generation
            .diagnostics
            .iter()
            .map(|diagnostic| diagnostic.render(source))
            .collect()),
        DiagnosticsFormat::Json => {
            let wire = generation
                .diagnostics
                .iter()
                .map(|diagnostic| diagnostic.to_wire())
                .collect::<Vec<_>>();
            Ok(serde_json::to_string_pretty(&wire)?)
        }
    }
}

pub fn format_units(units: &[GeneratedUnit]) -> String {
    let mut out = String::new();
    for unit in units {
        out.push_str(&format!("// {}\n", unit.qualified_name()));
        out.push_str(&unit.source);
        out.push('\n');
    }
    out
}

fn read(path: &Path) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|e| DriverError::Io(path.to_path_buf(), e))
}

#[cfg(test)]
#[path = "../tests/driver/t_driver.rs"]
mod tests;
