use super::*;

#[test]
fn test_parse_member_only() {
    let locator = Locator::parse("DEFAULT_PORT").unwrap();
    assert_eq!(locator.type_path, TypePath::Enclosing);
    assert_eq!(locator.member, "DEFAULT_PORT");
    assert_eq!(locator.to_string(), "DEFAULT_PORT");
}

#[test]
fn test_parse_simple_type() {
    let locator = Locator::parse("Defaults.port").unwrap();
    assert_eq!(locator.type_path, TypePath::Simple("Defaults".to_string()));
    assert_eq!(locator.member, "port");
    assert_eq!(locator.to_string(), "Defaults.port");
}

#[test]
fn test_parse_qualified_type() {
    let locator = Locator::parse("com.acme.Defaults.port").unwrap();
    assert_eq!(
        locator.type_path,
        TypePath::Qualified(vec![
            "com".to_string(),
            "acme".to_string(),
            "Defaults".to_string()
        ])
    );
    assert_eq!(locator.to_string(), "com.acme.Defaults.port");
}

#[test]
fn test_parse_trims_whitespace() {
    let locator = Locator::parse("  Defaults . port ").unwrap();
    assert_eq!(locator.type_path, TypePath::Simple("Defaults".to_string()));
    assert_eq!(locator.member, "port");
}

#[test]
fn test_parse_errors() {
    assert_eq!(Locator::parse(""), Err(ReferenceError::Empty));
    assert_eq!(Locator::parse("   "), Err(ReferenceError::Empty));
    assert_eq!(
        Locator::parse("Defaults..port"),
        Err(ReferenceError::EmptySegment("Defaults..port".to_string()))
    );
    assert_eq!(
        Locator::parse("Defaults.9port"),
        Err(ReferenceError::InvalidIdentifier(
            "Defaults.9port".to_string(),
            "9port".to_string()
        ))
    );
}

#[test]
fn test_type_path_parse() {
    assert_eq!(
        TypePath::parse("Cfg").unwrap(),
        TypePath::Simple("Cfg".to_string())
    );
    assert_eq!(
        TypePath::parse("lib.Cfg").unwrap(),
        TypePath::Qualified(vec!["lib".to_string(), "Cfg".to_string()])
    );
}
