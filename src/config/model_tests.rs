use super::*;

#[test]
fn default_config_has_standard_keywords() {
    let config = Config::default();
    let names: Vec<&str> = config.keywords.iter().map(|k| k.keyword.as_str()).collect();

    assert_eq!(names, vec!["TODO", "FIXME", "BUG", "HACK", "XXX", "NOTE"]);
    assert!(config.scan.enabled);
    assert!(config.scan.case_sensitive);
}

#[test]
fn empty_toml_uses_defaults() {
    let config: Config = toml::from_str("").unwrap();

    assert_eq!(config.keywords.len(), 6);
    assert_eq!(config.scan.pattern, DEFAULT_PATTERN);
    assert!(config.scope.include.is_empty());
    assert!(config.scope.exclude.contains(&"**/node_modules/**".to_string()));
}

#[test]
fn explicit_keywords_replace_defaults() {
    let config: Config = toml::from_str(
        r#"
[[keywords]]
keyword = "REVIEW"
severity = "hint"
"#,
    )
    .unwrap();

    assert_eq!(config.keywords.len(), 1);
    assert_eq!(config.keywords[0].keyword, "REVIEW");
    assert_eq!(config.keywords[0].severity, "hint");
}

#[test]
fn keyword_without_severity_defaults_to_warning() {
    let config: Config = toml::from_str(
        r#"
[[keywords]]
keyword = "OPTIMIZE"
"#,
    )
    .unwrap();

    assert_eq!(config.keywords[0].severity, "warning");
}

#[test]
fn unknown_severity_string_still_parses() {
    let config: Config = toml::from_str(
        r#"
[[keywords]]
keyword = "TODO"
severity = "urgent"
"#,
    )
    .unwrap();

    assert_eq!(config.keywords[0].severity, "urgent");
}

#[test]
fn to_scan_config_copies_every_setting() {
    let config: Config = toml::from_str(
        r#"
[scan]
enabled = false
case_sensitive = false
pattern = '({keywords}):(.*)'
source = "markers"

[scope]
include = ["src/**"]
exclude = ["**/gen/**"]
disabled = ["docs/**"]
"#,
    )
    .unwrap();

    let scan = config.to_scan_config();
    assert!(!scan.enabled);
    assert!(!scan.case_sensitive);
    assert_eq!(scan.pattern_template, "({keywords}):(.*)");
    assert_eq!(scan.source_label, "markers");
    assert_eq!(scan.include, vec!["src/**"]);
    assert_eq!(scan.exclude, vec!["**/gen/**"]);
    assert_eq!(scan.disabled, vec!["docs/**"]);
    assert_eq!(scan.rules.len(), 6);
}

#[test]
fn default_scan_config_matches_default_file_config() {
    assert_eq!(Config::default().to_scan_config(), ScanConfig::default());
}

#[test]
fn config_round_trips_through_toml() {
    let config = Config::default();
    let text = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();

    assert_eq!(parsed, config);
}
