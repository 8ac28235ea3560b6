use super::*;

#[test]
fn severity_parses_known_names() {
    assert_eq!("error".parse::<Severity>().unwrap(), Severity::Error);
    assert_eq!("Warning".parse::<Severity>().unwrap(), Severity::Warning);
    assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
    assert_eq!("INFO".parse::<Severity>().unwrap(), Severity::Info);
    assert_eq!("hint".parse::<Severity>().unwrap(), Severity::Hint);
}

#[test]
fn severity_rejects_unknown_name() {
    assert!("critical".parse::<Severity>().is_err());
}

#[test]
fn severity_lossy_parse_falls_back_to_warning() {
    assert_eq!(Severity::parse_lossy("critical"), Severity::Warning);
    assert_eq!(Severity::parse_lossy(""), Severity::Warning);
    assert_eq!(Severity::parse_lossy("error"), Severity::Error);
}

#[test]
fn severity_orders_by_seriousness() {
    assert!(Severity::Error > Severity::Warning);
    assert!(Severity::Warning > Severity::Info);
    assert!(Severity::Info > Severity::Hint);
}

#[test]
fn severity_default_is_warning() {
    assert_eq!(Severity::default(), Severity::Warning);
}

#[test]
fn severity_serializes_lowercase() {
    let json = serde_json::to_string(&Severity::Error).unwrap();
    assert_eq!(json, "\"error\"");
}
