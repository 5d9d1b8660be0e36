use super::*;
use crate::core::codegen::DerivedName;
use crate::core::diag::Span;
use crate::core::facts::TypeId;
use crate::core::model::{CallableKind, DeclKind, DefaultSource, Parameter, TypeRef};
use crate::core::types::Type;

fn param(name: &str, ty: &str, sources: &[&str]) -> Parameter {
    Parameter {
        name: name.to_string(),
        declared_type: Type::parse(ty).unwrap(),
        sources: sources
            .iter()
            .map(|text| DefaultSource::Literal(text.to_string()))
            .collect(),
        declares_default: !sources.is_empty(),
        span: Span::at_line(2, 10),
    }
}

fn callable(parameters: Vec<Parameter>) -> DefaultableCallable {
    DefaultableCallable {
        kind: CallableKind::StaticMethod,
        declaring_type: TypeRef::new("app", "Svc"),
        declaring_id: TypeId(0),
        enclosing: TypeId(0),
        package: "app".to_string(),
        name: "run".to_string(),
        parameters,
        return_type: Type::Void,
        visibility: Visibility::Public,
        emission: EmissionMode::Overloads,
        factory_name: "create".to_string(),
        explicit_name: None,
        misplaced: Vec::new(),
        origin: CallableOrigin::Annotated,
        span: Span::at_line(1, 5),
    }
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.code.as_str()).collect()
}

#[test]
fn test_valid_callable_has_no_diagnostics() {
    let run = callable(vec![param("a", "String", &[]), param("b", "int", &["1"])]);
    assert!(validate_callable(&run).is_empty());
}

#[test]
fn test_private_target() {
    let mut run = callable(vec![param("b", "int", &["1"])]);
    run.visibility = Visibility::Private;
    let diagnostics = validate_callable(&run);
    assert_eq!(codes(&diagnostics), vec!["DG-VALIDATE-PRIVATE-TARGET"]);
    assert_eq!(diagnostics[0].span, run.span);
    assert_eq!(diagnostics[0].subject.as_deref(), Some("app.Svc.run(int b)"));
}

#[test]
fn test_conflicting_sources() {
    let run = callable(vec![param("b", "int", &["1", "2"])]);
    let diagnostics = validate_callable(&run);
    assert_eq!(codes(&diagnostics), vec!["DG-VALIDATE-CONFLICTING-SOURCES"]);
    assert!(diagnostics[0].message.contains("value \"1\", value \"2\""));
    assert!(diagnostics[0].suggestion.is_some());
}

#[test]
fn test_non_consecutive_defaults_only_in_overloads_mode() {
    let params = vec![
        param("a", "int", &["1"]),
        param("b", "String", &[]),
        param("c", "int", &["2"]),
    ];
    let mut run = callable(params);
    let diagnostics = validate_callable(&run);
    assert_eq!(codes(&diagnostics), vec!["DG-VALIDATE-NON-CONSECUTIVE-DEFAULTS"]);
    assert!(diagnostics[0].message.contains("`b` follows defaulted parameter `a`"));
    assert_eq!(
        diagnostics[0].suggestion.as_deref(),
        Some("move defaulted parameters to the end or use builder mode")
    );

    run.emission = EmissionMode::Builder;
    assert!(validate_callable(&run).is_empty());
}

#[test]
fn test_no_defaults_declared_is_a_warning() {
    let run = callable(vec![param("a", "int", &[])]);
    let diagnostics = validate_callable(&run);
    assert_eq!(codes(&diagnostics), vec!["DG-VALIDATE-NO-DEFAULTS-DECLARED"]);
    assert!(!diagnostics[0].is_error());

    let mut included = callable(vec![param("a", "int", &[])]);
    included.origin = CallableOrigin::Included {
        convention_source: TypeRef::new("app", "Conventions"),
    };
    assert!(validate_callable(&included).is_empty());
}

#[test]
fn test_misplaced_annotations() {
    let misplaced = MisplacedAnnotation {
        annotation: "@IncludeDefaults",
        decl_kind: DeclKind::Method,
        decl_name: "run".to_string(),
        span: Span::at_line(1, 1),
    };
    let mut run = callable(vec![param("b", "int", &["1"])]);
    run.misplaced.push(misplaced.clone());
    let diagnostics = validate_callable(&run);
    assert_eq!(codes(&diagnostics), vec!["DG-VALIDATE-UNSUPPORTED-TARGET"]);
    assert_eq!(
        diagnostics[0].message,
        "@IncludeDefaults is not supported on a function (`run`)"
    );

    let standalone = check_misplaced(&[misplaced]);
    assert_eq!(standalone.len(), 1);
    assert_eq!(standalone[0].subject, None);
}

#[test]
fn test_registry_first_claim_wins() {
    let name = || DerivedName::OverloadSet {
        holder: TypeRef::new("app", "SvcDefaults"),
        name: "run".to_string(),
    };
    let mut registry = ConflictRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.claim(name(), 0, "first"), Ok(()));
    assert_eq!(
        registry.claim(DerivedName::Builder(TypeRef::new("app", "RunBuilder")), 1, "other"),
        Ok(())
    );

    assert_eq!(
        registry.claim(name(), 2, "second"),
        Err(NameClash {
            first: 0,
            first_subject: "first".to_string(),
            first_newly_clashed: true,
        })
    );
    match registry.claim(name(), 3, "third") {
        Err(clash) => {
            assert_eq!(clash.first, 0);
            assert!(!clash.first_newly_clashed);
        }
        other => panic!("Expected NameClash, got {other:?}"),
    }
    assert_eq!(registry.len(), 2);
}
