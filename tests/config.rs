use std::env;
use std::fs;
use taskpager::config::{Config, DEFAULT_BASE_URL};

// One test owns TASKPAGER_CONFIG_DIR: the env var is process-wide and
// parallel tests in this binary would race on it.
#[test]
fn test_config_isolation_defaults_and_page_size_floor() {
    let dir = env::temp_dir().join(format!("taskpager_config_test_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    unsafe { env::set_var("TASKPAGER_CONFIG_DIR", &dir) };

    // The env var redirects the config path into the temp dir.
    let path = Config::get_path().unwrap();
    assert!(path.starts_with(&dir));
    assert!(path.ends_with("config.toml"));

    // No file yet: load() errs and the caller falls back to defaults.
    assert!(Config::load().is_err());
    let config = Config::load().unwrap_or_default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.page_size, 1);
    assert!(!config.allow_insecure_certs);

    // A page_size of 0 round-trips but is floored when used.
    fs::write(
        &path,
        "base_url = \"http://localhost:9999\"\npage_size = 0\n",
    )
    .unwrap();
    let config = Config::load().unwrap();
    assert_eq!(config.base_url, "http://localhost:9999");
    assert_eq!(config.page_size, 0);
    assert_eq!(config.effective_page_size(), 1);

    // Partial files fill the missing fields with defaults.
    fs::write(&path, "allow_insecure_certs = true\n").unwrap();
    let config = Config::load().unwrap();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.page_size, 1);
    assert!(config.allow_insecure_certs);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_effective_page_size_passes_real_values_through() {
    let config = Config {
        page_size: 25,
        ..Config::default()
    };
    assert_eq!(config.effective_page_size(), 25);
}
