use indoc::indoc;

use super::*;
use crate::core::diag::Span;
use crate::core::facts::{TypeId, Visibility};
use crate::core::model::{
    CallableOrigin, DefaultSource, EmissionMode, EvalTiming, Parameter,
};

fn ty(text: &str) -> Type {
    Type::parse(text).unwrap()
}

fn param(name: &str, declared: &str, defaulted: bool) -> Parameter {
    Parameter {
        name: name.to_string(),
        declared_type: ty(declared),
        sources: if defaulted {
            vec![DefaultSource::Literal(String::new())]
        } else {
            Vec::new()
        },
        declares_default: defaulted,
        span: Span::default(),
    }
}

fn callable(kind: CallableKind, name: &str, parameters: Vec<Parameter>, ret: &str) -> DefaultableCallable {
    DefaultableCallable {
        kind,
        declaring_type: TypeRef::new("app", "Server"),
        declaring_id: TypeId(0),
        enclosing: TypeId(0),
        package: "app".to_string(),
        name: name.to_string(),
        parameters,
        return_type: ty(ret),
        visibility: Visibility::Public,
        emission: EmissionMode::Overloads,
        factory_name: "create".to_string(),
        explicit_name: None,
        misplaced: Vec::new(),
        origin: CallableOrigin::Annotated,
        span: Span::default(),
    }
}

fn resolved(expr: DefaultExpr, value_type: &str) -> Option<ResolvedDefault> {
    Some(ResolvedDefault {
        timing: EvalTiming::Constant,
        value_type: ty(value_type),
        expr,
    })
}

fn literal(text: &str, value_type: &str) -> Option<ResolvedDefault> {
    resolved(DefaultExpr::Literal(text.to_string()), value_type)
}

fn server_port() -> DefaultExpr {
    DefaultExpr::StaticField {
        owner: TypeRef::new("app", "Server"),
        name: "DEFAULT_PORT".to_string(),
    }
}

fn server_constructor() -> DefaultableCallable {
    callable(
        CallableKind::Constructor,
        "Server",
        vec![param("host", "String", true), param("port", "int", true)],
        "Server",
    )
}

fn overload_set(decl: Option<DerivedDecl>) -> OverloadSet {
    match decl {
        Some(DerivedDecl::OverloadSet(set)) => set,
        other => panic!("Expected OverloadSet, got {other:?}"),
    }
}

fn builder_type(decl: Option<DerivedDecl>) -> BuilderType {
    match decl {
        Some(DerivedDecl::Builder(builder)) => builder,
        other => panic!("Expected Builder, got {other:?}"),
    }
}

#[test]
fn test_derived_names() {
    let options = GenerateOptions::default();
    let mut ctor = server_constructor();
    assert_eq!(derived_name(&ctor, &options).to_string(), "app.ServerDefaults.create");

    ctor.emission = EmissionMode::Builder;
    assert_eq!(derived_name(&ctor, &options).to_string(), "app.ServerBuilder");

    let mut greet = callable(CallableKind::InstanceMethod, "greet", Vec::new(), "void");
    greet.emission = EmissionMode::Builder;
    assert_eq!(
        derived_name(&greet, &options),
        DerivedName::Builder(TypeRef::new("app", "ServerGreetBuilder"))
    );

    greet.explicit_name = Some("Hello".to_string());
    assert_eq!(derived_name(&greet, &options).to_string(), "app.Hello");
    assert_eq!(capitalize("x"), "X");
    assert_eq!(capitalize(""), "");
}

#[test]
fn test_function_overloads_skip_full_arity() {
    let f = callable(
        CallableKind::StaticMethod,
        "f",
        vec![param("a", "String", true), param("b", "int", true)],
        "void",
    );
    let defaults = [literal("\"x\"", "String"), literal("2", "int")];
    let set = overload_set(lower_callable(&f, &defaults, &GenerateOptions::default()));

    assert_eq!(set.holder, TypeRef::new("app", "ServerDefaults"));
    assert_eq!(set.name, "f");
    let arities = set
        .overloads
        .iter()
        .map(|overload| overload.params.len())
        .collect::<Vec<_>>();
    assert_eq!(arities, vec![0, 1]);
    assert_eq!(
        set.overloads[1].args,
        vec![
            Arg::Param("a".to_string()),
            Arg::Default {
                expr: DefaultExpr::Literal("2".to_string()),
                ty: ty("int"),
            },
        ]
    );
}

#[test]
fn test_function_without_defaults_emits_nothing() {
    let f = callable(
        CallableKind::StaticMethod,
        "f",
        vec![param("a", "String", false)],
        "void",
    );
    assert_eq!(lower_callable(&f, &[None], &GenerateOptions::default()), None);

    let empty = callable(CallableKind::StaticMethod, "g", Vec::new(), "void");
    assert_eq!(lower_callable(&empty, &[], &GenerateOptions::default()), None);
}

#[test]
fn test_constructor_holder_rendering() {
    let ctor = server_constructor();
    let defaults = [literal("\"localhost\"", "String"), resolved(server_port(), "int")];
    let decl = lower_callable(&ctor, &defaults, &GenerateOptions::default());
    let set = overload_set(decl.clone());
    assert_eq!(set.overloads.len(), 3);

    let units = render_units(&[decl.unwrap()]);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].qualified_name(), "app.ServerDefaults");
    let expected = indoc! {r#"
        package app;

        public final class ServerDefaults {
            private ServerDefaults() {}

            public static Server create() {
                return new Server("localhost", Server.DEFAULT_PORT);
            }

            public static Server create(String host) {
                return new Server(host, Server.DEFAULT_PORT);
            }

            public static Server create(String host, int port) {
                return new Server(host, port);
            }
        }
    "#};
    assert_eq!(units[0].source, expected);
}

#[test]
fn test_instance_receiver_is_renamed_away_from_parameters() {
    let send = callable(
        CallableKind::InstanceMethod,
        "send",
        vec![param("receiver", "String", false), param("body", "String", true)],
        "boolean",
    );
    let set = overload_set(lower_callable(
        &send,
        &[None, resolved(DefaultExpr::Null, "String")],
        &GenerateOptions::default(),
    ));
    assert_eq!(set.overloads.len(), 1);
    let overload = &set.overloads[0];
    assert_eq!(
        overload.params[0],
        GenParam {
            name: "receiver1".to_string(),
            ty: ty("Server"),
        }
    );
    assert_eq!(
        overload.call,
        CallTarget::Instance {
            receiver: "receiver1".to_string(),
            name: "send".to_string(),
        }
    );

    let source = &render_units(&[DerivedDecl::OverloadSet(set)])[0].source;
    assert!(source.contains("public static boolean send(Server receiver1, String receiver) {"));
    assert!(source.contains("return receiver1.send(receiver, (String) null);"));
}

#[test]
fn test_builder_rendering() {
    let mut ctor = callable(
        CallableKind::Constructor,
        "Server",
        vec![param("host", "String", false), param("port", "int", true)],
        "Server",
    );
    ctor.emission = EmissionMode::Builder;
    let decl = lower_callable(&ctor, &[None, resolved(server_port(), "int")], &GenerateOptions::default());
    let builder = builder_type(decl.clone());
    assert_eq!(builder.terminal, "create");
    assert_eq!(builder.receiver, None);
    assert!(builder.fields[0].required);
    assert!(!builder.fields[1].required);

    let units = render_units(&[decl.unwrap()]);
    let expected = indoc! {r#"
        package app;

        public final class ServerBuilder {
            private String host;
            private boolean hostSet;
            private int port = Server.DEFAULT_PORT;

            public ServerBuilder() {}

            public ServerBuilder host(String host) {
                this.host = host;
                this.hostSet = true;
                return this;
            }

            public ServerBuilder port(int port) {
                this.port = port;
                return this;
            }

            public Server create() {
                if (!hostSet) {
                    throw new IllegalStateException("host is required");
                }
                return new Server(host, port);
            }
        }
    "#};
    assert_eq!(units[0].source, expected);
}

#[test]
fn test_instance_builder_holds_receiver() {
    let mut greet = callable(
        CallableKind::InstanceMethod,
        "greet",
        vec![param("name", "String", true)],
        "void",
    );
    greet.emission = EmissionMode::Builder;
    let builder = builder_type(lower_callable(
        &greet,
        &[literal("\"world\"", "String")],
        &GenerateOptions::default(),
    ));
    assert_eq!(builder.terminal, "call");
    let source = &render_units(&[DerivedDecl::Builder(builder)])[0].source;
    assert!(source.contains("private final Server receiver;"));
    assert!(source.contains("public ServerGreetBuilder(Server receiver) {"));
    assert!(source.contains("public void call() {"));
    assert!(source.contains("        receiver.greet(name);"));
}

#[test]
fn test_holders_group_overload_sets() {
    let options = GenerateOptions::default();
    let ctor = server_constructor();
    let defaults = [literal("\"localhost\"", "String"), resolved(server_port(), "int")];
    let f = callable(
        CallableKind::StaticMethod,
        "f",
        vec![param("a", "int", true)],
        "int",
    );
    let decls = [
        lower_callable(&ctor, &defaults, &options).unwrap(),
        lower_callable(&f, &[literal("1", "int")], &options).unwrap(),
    ];
    let units = render_units(&decls);
    assert_eq!(units.len(), 1);
    assert!(units[0].source.contains("public static int f() {"));
    assert!(units[0].source.contains("return Server.f(1);"));
}

#[test]
fn test_cross_package_references_are_qualified() {
    let mut ctor = server_constructor();
    ctor.package = "gen".to_string();
    let defaults = [literal("\"h\"", "String"), resolved(server_port(), "int")];
    let decl = lower_callable(&ctor, &defaults, &GenerateOptions::default()).unwrap();
    let source = &render_units(&[decl])[0].source;
    assert!(source.starts_with("package gen;\n"));
    assert!(source.contains("return new app.Server(\"h\", app.Server.DEFAULT_PORT);"));
}
