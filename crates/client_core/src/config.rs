use std::{fs, io::ErrorKind, path::Path, time::Duration};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://coffeeport.herokuapp.com";
pub const DEFAULT_CONFIG_FILE: &str = "storefront.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: Url,
    pub probe_interval: Duration,
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            probe_interval: Duration::from_secs(5),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_url: Option<String>,
    probe_interval_secs: Option<u64>,
    log_filter: Option<String>,
}

/// Defaults, then `config_path` (or `./storefront.toml` when it exists), then
/// environment variables.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    load_settings_with(config_path, |name| std::env::var(name).ok())
}

pub fn load_settings_with(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let file = match config_path {
        Some(path) => Some(read_file_settings(path)?),
        None => match read_file_settings(Path::new(DEFAULT_CONFIG_FILE)) {
            Ok(file) => Some(file),
            Err(err) if is_not_found(&err) => None,
            Err(err) => return Err(err),
        },
    };

    if let Some(file) = file {
        if let Some(v) = file.base_url {
            settings.base_url = parse_base_url(&v)?;
        }
        if let Some(v) = file.probe_interval_secs {
            settings.probe_interval = Duration::from_secs(v.max(1));
        }
        if let Some(v) = file.log_filter {
            settings.log_filter = v;
        }
    }

    if let Some(v) = env("STOREFRONT_BASE_URL") {
        settings.base_url = parse_base_url(&v)?;
    }
    if let Some(v) = env("APP__BASE_URL") {
        settings.base_url = parse_base_url(&v)?;
    }
    if let Some(v) = env("APP__PROBE_INTERVAL_SECS") {
        let secs = v
            .trim()
            .parse::<u64>()
            .with_context(|| format!("invalid APP__PROBE_INTERVAL_SECS '{v}'"))?;
        settings.probe_interval = Duration::from_secs(secs.max(1));
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    Ok(settings)
}

pub fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid base url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!(
            "base url '{raw}' must use http or https, got '{}'",
            url.scheme()
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(anyhow!("base url '{raw}' must not carry a query or fragment"));
    }
    Ok(url)
}

fn read_file_settings(path: &Path) -> anyhow::Result<FileSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == ErrorKind::NotFound)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
