use tempfile::TempDir;

use super::*;

fn write(temp_dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn validate_nonexistent_file_returns_error() {
    let result = run_config_validate_impl(Path::new("nonexistent_config.toml"));
    assert!(result.unwrap_err().to_string().contains("not found"));
}

#[test]
fn validate_invalid_toml_returns_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(&temp_dir, "invalid.toml", "this is not valid { toml }");

    assert!(matches!(
        run_config_validate_impl(&path),
        Err(TodoGuardError::TomlParse(_))
    ));
}

#[test]
fn validate_minimal_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(&temp_dir, "minimal.toml", "# defaults only\n");

    assert!(run_config_validate_impl(&path).is_ok());
}

#[test]
fn validate_rejects_template_without_second_group() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(
        &temp_dir,
        "bad.toml",
        "[scan]\npattern = '\\b({keywords})\\b'\n",
    );

    assert!(matches!(
        run_config_validate_impl(&path),
        Err(TodoGuardError::InvalidTemplate { .. })
    ));
}

#[test]
fn validate_rejects_unknown_severity() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(
        &temp_dir,
        "bad.toml",
        "[[keywords]]\nkeyword = \"TODO\"\nseverity = \"fatal\"\n",
    );

    let err = run_config_validate_impl(&path).unwrap_err();
    assert!(err.to_string().contains("keywords[0].severity"));
}

#[test]
fn show_toml_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(
        &temp_dir,
        "custom.toml",
        "[scan]\ncase_sensitive = false\n\n[[keywords]]\nkeyword = \"TODO\"\nseverity = \"hint\"\n",
    );

    let text = run_config_show_impl(Some(&path), ConfigOutputFormat::Toml, false).unwrap();
    let config: Config = toml::from_str(&text).unwrap();

    assert!(!config.scan.case_sensitive);
    assert_eq!(config.keywords.len(), 1);
    assert_eq!(config.keywords[0].severity, "hint");
}

#[test]
fn show_json_with_no_config_uses_defaults() {
    let text = run_config_show_impl(None, ConfigOutputFormat::Json, true).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed["scan"]["source"], "todo-guard");
    assert_eq!(parsed["keywords"].as_array().unwrap().len(), 6);
}
