use super::*;

struct Hierarchy(&'static [(&'static str, &'static str)]);

impl TypeHierarchy for Hierarchy {
    fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        self.0.iter().any(|(s, p)| *s == sub && *p == sup)
    }
}

const NONE: Hierarchy = Hierarchy(&[]);

fn ty(text: &str) -> Type {
    Type::parse(text).unwrap()
}

fn assignable(from: &str, to: &str) -> TypeAssignability {
    type_assignable(&ty(from), &ty(to), &NONE)
}

#[test]
fn test_parse_primitives_and_boxes() {
    assert_eq!(ty("int"), Type::Primitive(PrimitiveKind::Int));
    assert_eq!(ty("Integer"), Type::Boxed(PrimitiveKind::Int));
    assert_eq!(ty("java.lang.Character"), Type::Boxed(PrimitiveKind::Char));
    assert_eq!(ty("void"), Type::Void);
}

#[test]
fn test_parse_lang_types() {
    assert_eq!(ty("String"), Type::String);
    assert_eq!(ty("java.lang.String"), Type::String);
    assert_eq!(ty("Object"), Type::Object);
}

#[test]
fn test_parse_generics_and_arrays() {
    assert_eq!(
        ty("Map<String, List<Integer>>"),
        Type::Named {
            name: "Map".to_string(),
            args: vec![
                Type::String,
                Type::Named {
                    name: "List".to_string(),
                    args: vec![Type::Boxed(PrimitiveKind::Int)],
                },
            ],
        }
    );
    assert_eq!(
        ty("byte[][]"),
        Type::Array(Box::new(Type::Array(Box::new(Type::Primitive(
            PrimitiveKind::Byte
        )))))
    );
    assert_eq!(ty("List<? extends Number>").to_string(), "List<? extends Number>");
}

#[test]
fn test_parse_errors() {
    assert_eq!(Type::parse("  "), Err(TypeParseError::Empty));
    assert_eq!(
        Type::parse("List<String"),
        Err(TypeParseError::UnbalancedArgs("List<String".to_string()))
    );
    assert_eq!(
        Type::parse("Map<String,>"),
        Err(TypeParseError::UnbalancedArgs("Map<String,>".to_string()))
    );
    assert_eq!(
        Type::parse("9Lives"),
        Err(TypeParseError::Malformed("9Lives".to_string()))
    );
}

#[test]
fn test_render_round_trips_written_form() {
    for text in ["int", "Integer", "String", "List<String>", "int[]", "Map<K, V>"] {
        assert_eq!(ty(text).to_string(), text);
    }
}

#[test]
fn test_nullability_and_string_like() {
    assert!(!ty("int").is_nullable());
    assert!(ty("Integer").is_nullable());
    assert!(ty("String").is_nullable());
    assert!(ty("String").is_string_like());
    assert!(ty("java.lang.CharSequence").is_string_like());
    assert!(ty("Object").is_string_like());
    assert!(!ty("Integer").is_string_like());
}

#[test]
fn test_primitive_widening() {
    assert_eq!(assignable("int", "int"), TypeAssignability::Exact);
    assert_eq!(assignable("int", "long"), TypeAssignability::Widening);
    assert_eq!(assignable("char", "int"), TypeAssignability::Widening);
    assert_eq!(assignable("long", "float"), TypeAssignability::Widening);
    assert_eq!(assignable("long", "int"), TypeAssignability::Incompatible);
    assert_eq!(assignable("byte", "char"), TypeAssignability::Incompatible);
    assert_eq!(assignable("boolean", "int"), TypeAssignability::Incompatible);
}

#[test]
fn test_boxing_and_unboxing() {
    assert_eq!(assignable("int", "Integer"), TypeAssignability::Boxing);
    assert_eq!(assignable("int", "Long"), TypeAssignability::Incompatible);
    assert_eq!(assignable("int", "Object"), TypeAssignability::Boxing);
    assert_eq!(assignable("int", "Number"), TypeAssignability::Boxing);
    assert_eq!(assignable("Integer", "int"), TypeAssignability::Unboxing);
    assert_eq!(assignable("Integer", "long"), TypeAssignability::Unboxing);
    assert_eq!(assignable("Character", "Number"), TypeAssignability::Incompatible);
}

#[test]
fn test_reference_assignability() {
    assert_eq!(assignable("String", "Object"), TypeAssignability::Reference);
    assert_eq!(assignable("String", "CharSequence"), TypeAssignability::Reference);
    assert_eq!(assignable("String", "Integer"), TypeAssignability::Incompatible);
    assert_eq!(assignable("List", "List<String>"), TypeAssignability::Exact);
    assert_eq!(
        assignable("List<Integer>", "List<String>"),
        TypeAssignability::Incompatible
    );
    assert_eq!(assignable("app.Cfg", "Cfg"), TypeAssignability::Exact);
    assert_eq!(assignable("String[]", "Object[]"), TypeAssignability::Reference);
    assert_eq!(assignable("int[]", "long[]"), TypeAssignability::Incompatible);
}

#[test]
fn test_declared_supertypes() {
    let hierarchy = Hierarchy(&[("ArrayList", "List")]);
    assert_eq!(
        type_assignable(&ty("ArrayList<String>"), &ty("List<String>"), &hierarchy),
        TypeAssignability::Reference
    );
    assert_eq!(
        type_assignable(&ty("List"), &ty("ArrayList"), &hierarchy),
        TypeAssignability::Incompatible
    );
}
