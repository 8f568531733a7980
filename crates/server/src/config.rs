use std::fs;

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_UPSTREAM_URL: &str = "https://eventquery.km0lab.com/api/v1/query";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub relay_bind: String,
    pub upstream_url: String,
    pub upstream_token: Option<String>,
    pub upstream_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            relay_bind: "127.0.0.1:8787".into(),
            upstream_url: DEFAULT_UPSTREAM_URL.into(),
            upstream_token: None,
            upstream_timeout_seconds: 30,
        }
    }
}

impl Settings {
    /// Parsed upstream endpoint; only http and https are accepted.
    pub fn upstream_endpoint(&self) -> anyhow::Result<Url> {
        let url = Url::parse(self.upstream_url.trim())
            .with_context(|| format!("invalid upstream url '{}'", self.upstream_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "upstream url '{}' must use http or https, got '{}'",
                self.upstream_url,
                url.scheme()
            );
        }
        Ok(url)
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("relay.toml") {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

/// Keys accepted in `relay.toml`.
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    upstream_url: Option<String>,
    upstream_token: Option<String>,
    upstream_timeout_seconds: Option<u64>,
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(error) => {
            warn!(%error, "ignoring unparseable relay.toml");
            return;
        }
    };
    if let Some(v) = file_cfg.bind_addr {
        settings.relay_bind = v;
    }
    if let Some(v) = file_cfg.upstream_url {
        settings.upstream_url = v;
    }
    if let Some(v) = file_cfg.upstream_token {
        settings.upstream_token = Some(v);
    }
    if let Some(v) = file_cfg.upstream_timeout_seconds {
        settings.upstream_timeout_seconds = v;
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("RELAY_BIND") {
        settings.relay_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.relay_bind = v;
    }

    if let Some(v) = var("EVENT_QUERY_URL") {
        settings.upstream_url = v;
    }
    if let Some(v) = var("APP__UPSTREAM_URL") {
        settings.upstream_url = v;
    }

    if let Some(v) = var("EVENT_QUERY_TOKEN") {
        settings.upstream_token = Some(v);
    }
    if let Some(v) = var("APP__UPSTREAM_TOKEN") {
        settings.upstream_token = Some(v);
    }

    if let Some(v) = var("APP__UPSTREAM_TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.upstream_timeout_seconds = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
