//! Runtime configuration.
//!
//! Built once in `main`: defaults, then the optional TOML file, then the API
//! keys from the environment, then command-line overrides. Services receive
//! the finished `Config`; nothing reads the environment after startup.

use crate::cli::Cli;
use crate::domain::constants::{
    CONFIG_PATH_VAR, DEFAULT_FRITZ_URL, DEFAULT_MMT_URL, DEFAULT_OUTPUT_DIR, FRITZ_API_KEY_VAR,
    MMT_API_KEY_VAR,
};
use crate::error::AppError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub fritz_url: Option<String>,
    #[serde(default)]
    pub mmt_url: Option<String>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub fritz_url: String,
    pub mmt_url: String,
    pub output_dir: PathBuf,
    pub timeout_secs: Option<u64>,
    fritz_token: Option<String>,
    mmt_token: Option<String>,
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let file = match config_path(cli.config.as_deref())? {
            Some(path) => load_file(&path)?,
            None => ConfigFile::default(),
        };
        let mut cfg = Self::from_file(file);
        cfg.fritz_token = env_token(FRITZ_API_KEY_VAR);
        cfg.mmt_token = env_token(MMT_API_KEY_VAR);
        if let Some(url) = &cli.fritz_url {
            cfg.fritz_url = url.clone();
        }
        if let Some(url) = &cli.mmt_url {
            cfg.mmt_url = url.clone();
        }
        if let Some(dir) = &cli.output_dir {
            cfg.output_dir = dir.clone();
        }
        cfg.fritz_url = cfg.fritz_url.trim_end_matches('/').to_string();
        cfg.mmt_url = cfg.mmt_url.trim_end_matches('/').to_string();
        Ok(cfg)
    }

    pub fn from_file(file: ConfigFile) -> Self {
        Self {
            fritz_url: file
                .fritz_url
                .unwrap_or_else(|| DEFAULT_FRITZ_URL.to_string()),
            mmt_url: file.mmt_url.unwrap_or_else(|| DEFAULT_MMT_URL.to_string()),
            output_dir: file
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            timeout_secs: file.timeout_secs,
            fritz_token: None,
            mmt_token: None,
        }
    }

    #[cfg(test)]
    pub fn with_tokens(mut self, fritz: Option<&str>, mmt: Option<&str>) -> Self {
        self.fritz_token = fritz.map(str::to_string).filter(|t| !t.trim().is_empty());
        self.mmt_token = mmt.map(str::to_string).filter(|t| !t.trim().is_empty());
        self
    }

    pub fn fritz_token(&self) -> Result<&str, AppError> {
        self.fritz_token
            .as_deref()
            .ok_or(AppError::MissingCredentials(FRITZ_API_KEY_VAR))
    }

    pub fn mmt_token(&self) -> Result<&str, AppError> {
        self.mmt_token
            .as_deref()
            .ok_or(AppError::MissingCredentials(MMT_API_KEY_VAR))
    }
}

fn env_token(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Explicit `--config` must exist; the implicit locations are optional.
fn config_path(explicit: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    if let Some(p) = explicit {
        if !p.exists() {
            anyhow::bail!("config file not found: {}", p.display());
        }
        return Ok(Some(p.to_path_buf()));
    }
    if let Ok(p) = std::env::var(CONFIG_PATH_VAR) {
        let p = PathBuf::from(p);
        return Ok(p.exists().then_some(p));
    }
    let Ok(home) = std::env::var("HOME") else {
        return Ok(None);
    };
    let p = PathBuf::from(home).join(".config/ztf2mmt/config.toml");
    Ok(p.exists().then_some(p))
}

fn load_file(path: &Path) -> anyhow::Result<ConfigFile> {
    log::debug!("loading config from {}", path.display());
    let raw = std::fs::read_to_string(path)?;
    toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid config file {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigFile};
    use crate::error::AppError;
    use std::path::PathBuf;

    #[test]
    fn defaults_point_at_production_services() {
        let cfg = Config::from_file(ConfigFile::default());
        assert_eq!(cfg.fritz_url, "https://fritz.science");
        assert_eq!(cfg.mmt_url, "https://scheduler.mmto.arizona.edu/APIv2");
        assert_eq!(cfg.output_dir, PathBuf::from("finders"));
        assert!(cfg.timeout_secs.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let file: ConfigFile = toml::from_str(
            r#"
fritz_url = "http://localhost:5000"
output_dir = "/tmp/charts"
timeout_secs = 30
"#,
        )
        .expect("parse config");
        let cfg = Config::from_file(file);
        assert_eq!(cfg.fritz_url, "http://localhost:5000");
        assert_eq!(cfg.mmt_url, "https://scheduler.mmto.arizona.edu/APIv2");
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/charts"));
        assert_eq!(cfg.timeout_secs, Some(30));
    }

    #[test]
    fn missing_or_blank_tokens_are_reported_by_name() {
        let cfg = Config::from_file(ConfigFile::default()).with_tokens(Some("  "), None);
        match cfg.fritz_token() {
            Err(AppError::MissingCredentials(var)) => assert_eq!(var, "FRITZAPIKEY"),
            other => panic!("unexpected: {:?}", other),
        }
        match cfg.mmt_token() {
            Err(AppError::MissingCredentials(var)) => assert_eq!(var, "MMTAPIKEY"),
            other => panic!("unexpected: {:?}", other),
        }

        let cfg = cfg.with_tokens(Some("abc"), Some("def"));
        assert_eq!(cfg.fritz_token().ok(), Some("abc"));
        assert_eq!(cfg.mmt_token().ok(), Some("def"));
    }
}
