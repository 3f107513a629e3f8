use smart_display::config::Config;
use std::path::PathBuf;

#[test]
fn empty_document_uses_defaults() {
    let cfg: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(cfg.bind_address, "0.0.0.0");
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.playlist_path, PathBuf::from("smart-display.json"));
    assert_eq!(cfg.default_duration_secs, 10);
    assert!(cfg.validate().is_ok());
}

#[test]
fn parse_kebab_case_overrides() {
    let yaml = r#"
bind-address: "127.0.0.1"
port: 8080
playlist-path: "/var/lib/smart-display/playlist.json"
default-duration-secs: 30
"#;
    let cfg: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.bind_address, "127.0.0.1");
    assert_eq!(cfg.port, 8080);
    assert_eq!(
        cfg.playlist_path,
        PathBuf::from("/var/lib/smart-display/playlist.json")
    );
    assert_eq!(cfg.default_duration_secs, 30);
}

#[test]
fn zero_default_duration_fails_validation() {
    let cfg: Config = serde_yaml::from_str("default-duration-secs: 0").unwrap();
    assert!(cfg.validate().is_err());
}

#[test]
fn socket_addr_combines_bind_address_and_port() {
    let cfg: Config = serde_yaml::from_str("{}").unwrap();
    let addr = cfg.socket_addr().unwrap();
    assert_eq!(addr.to_string(), "0.0.0.0:3000");
}

#[test]
fn bogus_bind_address_is_reported() {
    let cfg: Config = serde_yaml::from_str("bind-address: \"not-an-ip\"").unwrap();
    assert!(cfg.socket_addr().is_err());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let cfg = Config::load(std::path::Path::new("/does/not/exist.yaml")).unwrap();
    assert_eq!(cfg.port, 3000);
}
