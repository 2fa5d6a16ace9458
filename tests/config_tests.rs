//! Tests for loading the service configuration from YAML files

use order_desk::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(yaml.as_bytes()).expect("Failed to write config");
    file
}

#[test]
fn test_load_full_config_from_file() {
    let file = write_config(
        r#"
server:
  host: 0.0.0.0
  port: 9090
orders:
  update_cooldown_secs: 30
clients:
  delete_policy: cascade
"#,
    );

    let config = ServiceConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:9090");
    assert_eq!(config.update_cooldown(), Duration::seconds(30));
    assert_eq!(config.clients.delete_policy, ClientDeletePolicy::Cascade);
}

#[test]
fn test_empty_file_gives_defaults() {
    let file = write_config("{}\n");

    let config = ServiceConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config, ServiceConfig::default());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    assert!(ServiceConfig::from_yaml_file(path.to_str().unwrap()).is_err());
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let file = write_config("server:\n  port: 0\n");

    let err = ServiceConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_builder_serves_configured_cooldown() {
    let file = write_config("orders:\n  update_cooldown_secs: 2\n");
    let config = ServiceConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    let host = ServerBuilder::new()
        .with_config(config)
        .with_store(InMemoryStore::new())
        .build_host()
        .unwrap();

    assert_eq!(host.update_cooldown(), Duration::seconds(2));
}
