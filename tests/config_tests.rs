use std::io::Write;

use codecloak::config::load_config;

#[test]
fn defaults_without_a_config_file() {
    let cfg = load_config(None, None).unwrap();
    assert_eq!(cfg.go_binary, "go");
    assert_eq!(cfg.extensions, vec!["go".to_string()]);
    assert!(cfg.excluded_kinds.contains(&"struct_type".to_string()));
}

#[test]
fn cli_flag_overrides_file_value() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{\"go_binary\": \"/opt/go/bin/go\"}}").unwrap();
    let cfg = load_config(file.path().to_str(), Some("/usr/local/bin/go")).unwrap();
    assert_eq!(cfg.go_binary, "/usr/local/bin/go");
}

#[test]
fn file_values_are_used_when_no_flag_is_given() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "{{\"go_binary\": \"/opt/go/bin/go\", \"extensions\": [\"go\", \"gox\"]}}"
    )
    .unwrap();
    let cfg = load_config(file.path().to_str(), None).unwrap();
    assert_eq!(cfg.go_binary, "/opt/go/bin/go");
    assert_eq!(cfg.extensions, vec!["go".to_string(), "gox".to_string()]);
}

#[test]
fn malformed_config_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(load_config(file.path().to_str(), None).is_err());
}
