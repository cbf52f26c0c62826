// Config loading and validation tests

use vram_watcher::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 8188
host = "127.0.0.1"

[accelerator]
device_index = 1
nvidia_smi = "/usr/bin/nvidia-smi"
drm_root = "/sys/class/drm"

[client]
status_url = "http://127.0.0.1:8188/vram_watcher/status"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8188);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.accelerator.device_index, 1);
    assert_eq!(config.accelerator.nvidia_smi, "/usr/bin/nvidia-smi");
    assert_eq!(
        config.client.status_url,
        "http://127.0.0.1:8188/vram_watcher/status"
    );
}

#[test]
fn test_optional_sections_default() {
    let config = AppConfig::load_from_str("[server]\nport = 9000\nhost = \"0.0.0.0\"\n")
        .expect("load_from_str");
    assert_eq!(config.accelerator.device_index, 0);
    assert_eq!(config.accelerator.nvidia_smi, "nvidia-smi");
    assert_eq!(config.accelerator.drm_root, "/sys/class/drm");
    assert!(config.client.status_url.ends_with("/vram_watcher/status"));
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8188", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_host() {
    let bad = VALID_CONFIG.replace("host = \"127.0.0.1\"", "host = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.host"));
}

#[test]
fn test_config_validation_rejects_empty_nvidia_smi() {
    let bad = VALID_CONFIG.replace("nvidia_smi = \"/usr/bin/nvidia-smi\"", "nvidia_smi = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("accelerator.nvidia_smi"));
}

#[test]
fn test_config_validation_rejects_non_http_status_url() {
    let bad = VALID_CONFIG.replace("http://127.0.0.1:8188", "ftp://127.0.0.1:8188");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("client.status_url"));
}

#[test]
fn test_config_validation_rejects_missing_server() {
    let err = AppConfig::load_from_str("[client]\n").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}
