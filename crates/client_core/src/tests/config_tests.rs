use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("storefront_config_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("storefront.toml");
    fs::write(&path, contents).expect("write settings");
    path
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_point_at_public_menu_api() {
    let settings = ClientSettings::default();
    assert_eq!(settings.base_url.as_str(), "http://coffeeport.herokuapp.com/");
    assert_eq!(settings.probe_interval, Duration::from_secs(5));
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        r#"
base_url = "http://127.0.0.1:9000"
probe_interval_secs = 30
log_filter = "client_core=debug"
"#,
    );

    let settings = load_settings_with(Some(&path), no_env).expect("load");

    assert_eq!(settings.base_url.as_str(), "http://127.0.0.1:9000/");
    assert_eq!(settings.probe_interval, Duration::from_secs(30));
    assert_eq!(settings.log_filter, "client_core=debug");
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn environment_overrides_file() {
    let path = temp_settings_file("base_url = \"http://file.test\"\n");
    let env_vars: HashMap<&str, &str> = [
        ("STOREFRONT_BASE_URL", "http://legacy.test"),
        ("APP__BASE_URL", "https://env.test"),
        ("APP__PROBE_INTERVAL_SECS", "0"),
    ]
    .into_iter()
    .collect();

    let settings = load_settings_with(Some(&path), |name| {
        env_vars.get(name).map(|value| value.to_string())
    })
    .expect("load");

    assert_eq!(settings.base_url.as_str(), "https://env.test/");
    assert_eq!(settings.probe_interval, Duration::from_secs(1));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn explicit_missing_file_is_an_error() {
    let path = env::temp_dir().join("storefront_config_test_missing/none.toml");
    let err = load_settings_with(Some(&path), no_env).expect_err("must fail");
    assert!(err.to_string().contains("failed to read settings file"));
}

#[test]
fn rejects_non_http_base_url() {
    assert!(parse_base_url("ftp://menu.test").is_err());
    assert!(parse_base_url("not a url").is_err());
    assert_eq!(
        parse_base_url(" http://menu.test ").expect("parse").as_str(),
        "http://menu.test/"
    );
}

#[test]
fn unparseable_probe_interval_is_an_error() {
    let err = load_settings_with(None::<&Path>, |name| {
        (name == "APP__PROBE_INTERVAL_SECS").then(|| "soon".to_string())
    })
    .expect_err("must fail");
    assert!(err.to_string().contains("APP__PROBE_INTERVAL_SECS"));
}

#[test]
fn base_url_with_query_or_fragment_is_rejected() {
    assert!(parse_base_url("http://menu.test/?x=1").is_err());
    assert!(parse_base_url("http://menu.test/#top").is_err());
    assert!(parse_base_url("http://menu.test/api/").is_ok());
}
