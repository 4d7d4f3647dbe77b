//! Tests for loading `DashboardConfig` from YAML files

use dashboard::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn yaml_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_full_yaml_file() {
    let file = yaml_file(
        r#"
database_url: postgres://dash:secret@db:5432/dashboard
bind_addr: 0.0.0.0:8080
ssl_mode: disable
max_connections: 12
"#,
    );

    let config = DashboardConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(
        config.require_database_url().unwrap(),
        "postgres://dash:secret@db:5432/dashboard"
    );
    assert_eq!(config.bind_addr, "0.0.0.0:8080");
    assert_eq!(config.ssl_mode, SslMode::Disable);
    assert_eq!(config.max_connections, 12);
}

#[test]
fn test_yaml_file_without_database_url() {
    let file = yaml_file("bind_addr: 127.0.0.1:4000\n");

    let config = DashboardConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.ssl_mode, SslMode::Require);
    let err = config.require_database_url().unwrap_err();
    assert!(matches!(err, ConfigError::MissingEnv("POSTGRES_URL")));
}

#[test]
fn test_malformed_yaml_file_names_the_file() {
    let file = yaml_file("ssl_mode: sometimes\n");
    let path = file.path().to_str().unwrap().to_string();

    let err = DashboardConfig::from_yaml_file(&path).unwrap_err();

    match err {
        ConfigError::ParseError { file, .. } => assert_eq!(file.as_deref(), Some(path.as_str())),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let err = DashboardConfig::from_yaml_file("/definitely/not/here/dashboard.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
