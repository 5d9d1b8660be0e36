use super::*;

#[test]
fn test_normalize_folds_default_conventions() {
    assert_eq!(normalize("DEFAULT_HOST"), "host");
    assert_eq!(normalize("defaultHost"), "host");
    assert_eq!(normalize("host"), "host");
    assert_eq!(normalize("DEFAULT_HOST"), normalize("defaultHost"));
}

#[test]
fn test_normalize_ignores_case_and_underscores() {
    assert_eq!(normalize("MAX_RETRY_COUNT"), "maxretrycount");
    assert_eq!(normalize("maxRetryCount"), "maxretrycount");
    assert_eq!(normalize("default_max_retries"), "maxretries");
}

#[test]
fn test_normalize_keeps_default_without_capitalized_rest() {
    // `defaults` is a word, not a prefix.
    assert_eq!(normalize("defaults"), "defaults");
    assert_eq!(normalize("default"), "default");
    assert!(!has_default_prefix("defaults"));
    assert!(!has_default_prefix("DEFAULT_"));
}

#[test]
fn test_has_default_prefix() {
    assert!(has_default_prefix("DEFAULT_PORT"));
    assert!(has_default_prefix("defaultPort"));
    assert!(!has_default_prefix("port"));
}

#[test]
fn test_edit_distance() {
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("abc", ""), 3);
    assert_eq!(edit_distance("kitten", "sitting"), 3);
    assert_eq!(edit_distance("port", "port"), 0);
    assert_eq!(edit_distance("prot", "port"), 2);
}

#[test]
fn test_suggest_picks_closest_within_threshold() {
    let candidates = ["defaultTimeout", "defaultRetries", "newSession"];
    assert_eq!(
        suggest("defaultTimout", candidates),
        Some("defaultTimeout".to_string())
    );
}

#[test]
fn test_suggest_none_when_too_far() {
    assert_eq!(suggest("host", ["completelyDifferent", "other"]), None);
}

#[test]
fn test_suggest_skips_exact_match() {
    assert_eq!(suggest("port", ["port"]), None);
}

#[test]
fn test_suggest_tie_keeps_first_candidate() {
    assert_eq!(suggest("cat", ["bat", "hat"]), Some("bat".to_string()));
}
