use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use indoc::indoc;

use super::*;

static DRIVER_TMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_dir(label: &str) -> PathBuf {
    let run_id = DRIVER_TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "defaultgen_driver_{label}_{}_{}",
        std::process::id(),
        run_id
    ));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

const GREETER: &str = indoc! {r#"
    {
      "types": [
        { "package": "app", "name": "Greeter",
          "constructors": [{ "visibility": "public", "params": [
            { "name": "greeting", "ty": "String",
              "annotations": [{ "annotation": "default", "value": "hello" }] }
          ] }] }
      ]
    }
"#};

#[test]
fn test_load_options_cli_overrides_config() {
    let dir = temp_dir("options");
    let config = dir.join("config.json");
    fs::write(&config, r#"{ "default_factory_name": "of", "holder_suffix": "Factory" }"#)
        .expect("failed to write config");

    let opts = DriverOptions {
        config_path: Some(config.clone()),
        ..DriverOptions::default()
    };
    let options = load_options(&opts).unwrap();
    assert_eq!(options.default_factory_name, "of");
    assert_eq!(options.holder_suffix, "Factory");
    assert_eq!(options.builder_suffix, "Builder");
    assert_eq!(options.default_mode, EmissionMode::Overloads);

    let opts = DriverOptions {
        config_path: Some(config),
        mode: Some(EmissionMode::Builder),
        factory_name: Some("make".to_string()),
        ..DriverOptions::default()
    };
    let options = load_options(&opts).unwrap();
    assert_eq!(options.default_factory_name, "make");
    assert_eq!(options.default_mode, EmissionMode::Builder);
    assert_eq!(options.holder_suffix, "Factory");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_run_writes_units_with_headers() {
    let dir = temp_dir("run");
    let facts = dir.join("facts.json");
    fs::write(&facts, GREETER).expect("failed to write facts");

    let output = run(&DriverOptions {
        facts_path: facts,
        factory_name: Some("of".to_string()),
        ..DriverOptions::default()
    })
    .unwrap();
    assert!(!output.has_errors());
    assert!(output.diagnostics.is_empty());
    assert!(output.units.starts_with("// app.GreeterDefaults\npackage app;\n"));
    assert!(output.units.contains("public static Greeter of() {"));
    assert!(output.units.ends_with("}\n\n"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_run_reports_io_and_facts_errors() {
    let dir = temp_dir("errors");
    let missing = dir.join("missing.json");
    match run(&DriverOptions {
        facts_path: missing.clone(),
        ..DriverOptions::default()
    }) {
        Err(error @ DriverError::Io(..)) => {
            let expected = format!("failed to read {}: ", missing.display());
            assert!(error.to_string().starts_with(&expected), "{error}");
            assert!(matches!(&error, DriverError::Io(path, _) if *path == missing));
        }
        other => panic!("Expected Io error, got {other:?}"),
    }

    let broken = dir.join("broken.json");
    fs::write(&broken, "{ \"types\": [").expect("failed to write facts");
    match run(&DriverOptions {
        facts_path: broken,
        ..DriverOptions::default()
    }) {
        Err(error @ DriverError::Facts(..)) => {
            let message = error.to_string();
            assert!(message.starts_with("invalid facts in "), "{message}");
            assert!(message.contains("broken.json: "), "{message}");
        }
        other => panic!("Expected Facts error, got {other:?}"),
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_json_diagnostics_format() {
    let facts = ProgramFacts::from_json(indoc! {r#"
        {
          "types": [
            { "package": "app", "name": "Svc",
              "methods": [{ "name": "run", "is_static": true, "visibility": "public",
                "params": [{ "name": "n", "ty": "int",
                  "annotations": [{ "annotation": "default", "value": "many" }] }] }] }
          ]
        }
    "#})
    .unwrap();
    let generation = generate(&facts, &GenerateOptions::default());
    assert!(generation.has_errors());

    let text = format_diagnostics(&generation, DiagnosticsFormat::Json, None).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["code"], "DG-LITERAL-UNPARSEABLE");
    assert_eq!(entries[0]["category"], "parse");
    assert_eq!(entries[0]["subject"], "app.Svc.run(int n)");

    let human = format_diagnostics(&generation, DiagnosticsFormat::Human, None).unwrap();
    assert!(human.contains("error[DG-LITERAL-UNPARSEABLE]: Cannot parse `many` as `int`"));
    assert!(human.contains("  = in: app.Svc.run(int n)\n"));
}

#[test]
fn test_format_units_empty() {
    assert_eq!(format_units(&[]), "");
}

/// A stream whose reader has gone away.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_to_reports_closed_output() {
    let dir = temp_dir("write");
    let facts = dir.join("facts.json");
    fs::write(&facts, GREETER).expect("failed to write facts");
    let output = run(&DriverOptions {
        facts_path: facts,
        ..DriverOptions::default()
    })
    .unwrap();

    let mut units = Vec::new();
    let mut diagnostics = Vec::new();
    output.write_to(&mut units, &mut diagnostics).unwrap();
    assert_eq!(String::from_utf8(units).unwrap(), output.units);

    let mut diagnostics = Vec::new();
    match output.write_to(&mut ClosedPipe, &mut diagnostics) {
        Err(error @ DriverError::Write(_)) => {
            assert!(error.to_string().starts_with("failed to write output: "));
        }
        other => panic!("Expected Write error, got {other:?}"),
    }
    assert_eq!(String::from_utf8(diagnostics).unwrap(), output.diagnostics);

    let _ = fs::remove_dir_all(&dir);
}
