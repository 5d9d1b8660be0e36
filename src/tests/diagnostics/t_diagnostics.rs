use indoc::indoc;
use serde_json::json;

use super::*;
use crate::core::diag::Position;
use crate::core::literal::LiteralErrorKind;
use crate::core::resolve::ResolveErrorKind;
use crate::core::types::Type;
use crate::core::validate::ValidateErrorKind;

fn field_not_static(span: Span) -> Diagnostic {
    Diagnostic::from_resolve_error(
        &ResolveErrorKind::FieldNotStatic {
            owner: "app.Defaults".to_string(),
            name: "PORT".to_string(),
        }
        .at(span),
    )
}

#[test]
fn test_resolve_error_normalization() {
    let diagnostic = field_not_static(Span::at_line(3, 7));
    assert_eq!(diagnostic.category, DiagnosticCategory::Resolution);
    assert_eq!(diagnostic.code, "DG-RESOLVE-FIELD-NOT-STATIC");
    assert_eq!(diagnostic.severity, DiagnosticSeverity::Error);
    assert_eq!(diagnostic.message, "Field `app.Defaults.PORT` is not static");
    assert_eq!(
        diagnostic.metadata.get("owner"),
        Some(&DiagnosticValue::String("app.Defaults".to_string()))
    );
    assert_eq!(diagnostic.suggestion, None);
}

#[test]
fn test_literal_null_for_primitive_suggests_box() {
    let diagnostic = Diagnostic::from_literal_error(
        &LiteralErrorKind::NullForPrimitive(Type::parse("int").unwrap()).at(Span::default()),
    );
    assert_eq!(diagnostic.category, DiagnosticCategory::Parse);
    assert_eq!(diagnostic.code, "DG-LITERAL-NULL-FOR-PRIMITIVE");
    assert_eq!(
        diagnostic.suggestion.as_deref(),
        Some("declare the parameter as `Integer` to allow null")
    );
}

#[test]
fn test_warning_kinds_are_convention_category() {
    let diagnostic = Diagnostic::from_validate_error(
        &ValidateErrorKind::NoDefaultsDeclared("app.Svc.run()".to_string()).at(Span::default()),
    );
    assert_eq!(diagnostic.category, DiagnosticCategory::Convention);
    assert_eq!(diagnostic.severity, DiagnosticSeverity::Warning);
    assert!(!diagnostic.is_error());
    assert_eq!(
        diagnostic.to_string(),
        "warning[DG-VALIDATE-NO-DEFAULTS-DECLARED]: @GenerateDefaults on `app.Svc.run()` has no parameters with defaults"
    );
}

#[test]
fn test_with_subject_keeps_first() {
    let diagnostic = field_not_static(Span::default())
        .with_subject("app.Svc.run(int port)")
        .with_subject("ignored");
    assert_eq!(diagnostic.subject.as_deref(), Some("app.Svc.run(int port)"));
}

#[test]
fn test_render_without_source() {
    let diagnostic = Diagnostic::from_resolve_error(
        &ResolveErrorKind::TypeNotFound {
            name: "Defualts".to_string(),
            suggestion: Some("Defaults".to_string()),
        }
        .at(Span::at_line(3, 7)),
    )
    .with_subject("app.Svc.run(int port)");

    let expected = indoc! {"
        (3:7) error[DG-RESOLVE-TYPE-NOT-FOUND]: Unknown type `Defualts`
          = in: app.Svc.run(int port)
          = help: did you mean `Defaults`?
    "};
    assert_eq!(diagnostic.render(None), expected);
}

#[test]
fn test_render_with_source_snippet() {
    let source = indoc! {"
        class Svc {
          run(@Default(field = \"PORT\") int port) {}
        }
    "};
    let start = Position {
        offset: 0,
        line: 2,
        column: 7,
    };
    let end = Position {
        offset: 0,
        line: 2,
        column: 30,
    };
    let rendered = field_not_static(Span::new(start, end)).render(Some(source));
    let lines = rendered.lines().collect::<Vec<_>>();
    assert_eq!(
        lines[0],
        "(2:7) error[DG-RESOLVE-FIELD-NOT-STATIC]: Field `app.Defaults.PORT` is not static"
    );
    assert_eq!(lines[1], "│ 1 │ class Svc {");
    assert_eq!(lines[2], "│ 2 │   run(@Default(field = \"PORT\") int port) {}");
    assert_eq!(lines[3], format!("│   │       {}", "-".repeat(23)));
    assert_eq!(lines[4], "│ 3 │ }");
}

#[test]
fn test_wire_form_skips_absent_fields() {
    let diagnostic = field_not_static(Span::at_line(3, 7));
    let value = serde_json::to_value(diagnostic.to_wire()).unwrap();
    assert_eq!(value["category"], json!("resolution"));
    assert_eq!(value["severity"], json!("error"));
    assert_eq!(value["code"], json!("DG-RESOLVE-FIELD-NOT-STATIC"));
    assert_eq!(value["span"]["start"]["line"], json!(3));
    assert_eq!(
        value["metadata"],
        json!({ "owner": "app.Defaults", "name": "PORT" })
    );
    assert!(value.get("suggestion").is_none());
    assert!(value.get("subject").is_none());

    let with_subject = diagnostic.with_subject("app.Svc.run(int port)");
    let value = serde_json::to_value(with_subject.to_wire()).unwrap();
    assert_eq!(value["subject"], json!("app.Svc.run(int port)"));
}

#[test]
fn test_factory_not_found_hints() {
    let not_found = |suggestion: Option<&str>, candidates: &[&str]| {
        Diagnostic::from_resolve_error(
            &ResolveErrorKind::FactoryNotFound {
                owner: "app.Defaults".to_string(),
                name: "mk".to_string(),
                suggestion: suggestion.map(str::to_string),
                candidates: candidates.iter().map(|c| c.to_string()).collect(),
            }
            .at(Span::default()),
        )
        .suggestion
    };
    assert_eq!(
        not_found(Some("make"), &["make"]).as_deref(),
        Some("did you mean `make`?")
    );
    assert_eq!(
        not_found(None, &["build", "create"]).as_deref(),
        Some("available: `build`, `create`")
    );
    assert_eq!(
        not_found(None, &[]).as_deref(),
        Some("`app.Defaults` declares no static zero-argument functions")
    );
}
