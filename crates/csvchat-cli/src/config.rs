// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use csvchat_app::DEFAULT_VISIBLE_COLUMNS;
use csvchat_data::{APP_NAME, DEFAULT_MAX_ROWS, DEFAULT_SOURCE, DataLocation};
use csvchat_llm::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LLM_TIMEOUT: &str = "30s";
const DEFAULT_FETCH_TIMEOUT: &str = "10s";
const DEFAULT_LOG_FILTER: &str = "info";
const API_KEY_ENV: &str = "CSVCHAT_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub llm: Llm,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            llm: Llm::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub default_source: Option<String>,
    pub visible_columns: Option<Vec<String>>,
    pub max_rows: Option<i64>,
    pub fetch_timeout: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Llm {
    pub enabled: Option<bool>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Option<String>,
    pub extra_context: Option<String>,
}

impl Default for Llm {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            base_url: Some(DEFAULT_BASE_URL.to_owned()),
            model: Some(DEFAULT_MODEL.to_owned()),
            api_key: None,
            timeout: Some(DEFAULT_LLM_TIMEOUT.to_owned()),
            extra_context: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub path: Option<String>,
    pub filter: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("CSVCHAT_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set CSVCHAT_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [data], [llm], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(source) = &self.data.default_source {
            DataLocation::parse(source)
                .with_context(|| format!("data.default_source in {}", path.display()))?;
        }

        if let Some(columns) = &self.data.visible_columns {
            if columns.is_empty() {
                bail!(
                    "data.visible_columns in {} must name at least one column",
                    path.display()
                );
            }
            if columns.iter().any(|column| column.trim().is_empty()) {
                bail!(
                    "data.visible_columns in {} contains a blank column name",
                    path.display()
                );
            }
        }

        if let Some(max_rows) = self.data.max_rows
            && max_rows <= 0
        {
            bail!(
                "data.max_rows in {} must be positive, got {}",
                path.display(),
                max_rows
            );
        }

        for (key, value) in [
            ("data.fetch_timeout", &self.data.fetch_timeout),
            ("llm.timeout", &self.llm.timeout),
        ] {
            if let Some(raw) = value {
                let parsed = parse_duration(raw)?;
                if parsed <= Duration::ZERO {
                    bail!("{key} in {} must be positive, got {raw}", path.display());
                }
            }
        }

        if let Some(filter) = &self.log.filter {
            EnvFilter::try_new(filter).with_context(|| {
                format!("log.filter {filter:?} in {} is not a valid filter", path.display())
            })?;
        }

        Ok(())
    }

    pub fn default_source(&self) -> &str {
        self.data.default_source.as_deref().unwrap_or(DEFAULT_SOURCE)
    }

    pub fn visible_columns(&self) -> Vec<String> {
        match &self.data.visible_columns {
            Some(columns) => columns.clone(),
            None => DEFAULT_VISIBLE_COLUMNS
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
        }
    }

    pub fn max_rows(&self) -> usize {
        self.data
            .max_rows
            .and_then(|rows| usize::try_from(rows).ok())
            .unwrap_or(DEFAULT_MAX_ROWS)
    }

    pub fn fetch_timeout(&self) -> Result<Duration> {
        parse_duration(
            self.data
                .fetch_timeout
                .as_deref()
                .unwrap_or(DEFAULT_FETCH_TIMEOUT),
        )
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.enabled.unwrap_or(true)
    }

    pub fn llm_base_url(&self) -> &str {
        self.llm
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn llm_model(&self) -> &str {
        self.llm.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// `CSVCHAT_API_KEY` wins over `[llm].api_key`. Blank values count as
    /// unset.
    pub fn llm_api_key(&self) -> Option<String> {
        env::var(API_KEY_ENV)
            .ok()
            .or_else(|| self.llm.api_key.clone())
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty())
    }

    pub fn llm_timeout(&self) -> Result<Duration> {
        parse_duration(self.llm.timeout.as_deref().unwrap_or(DEFAULT_LLM_TIMEOUT))
    }

    pub fn llm_extra_context(&self) -> Option<String> {
        self.llm
            .extra_context
            .as_deref()
            .map(str::trim)
            .filter(|context| !context.is_empty())
            .map(str::to_owned)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log.path {
            Some(path) => Ok(PathBuf::from(path)),
            None => csvchat_data::default_log_path(),
        }
    }

    pub fn log_filter(&self) -> &str {
        self.log.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# csvchat config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# Path or http(s) URL loaded at startup.\ndefault_source = \"{}\"\nvisible_columns = [\"Ementa\", \"Data\"]\nmax_rows = {}\nfetch_timeout = \"{}\"\n\n[llm]\nenabled = true\nbase_url = \"{}\"\nmodel = \"{}\"\n# Prefer the {} environment variable over storing the key here.\n# api_key = \"\"\ntimeout = \"{}\"\nextra_context = \"\"\n\n[log]\n# Optional. Default is platform data dir (for example ~/.local/share/csvchat/csvchat.log)\n# path = \"/absolute/path/to/csvchat.log\"\n# Targets are crate names, for example \"csvchat_app=debug,csvchat_llm=debug\".\nfilter = \"{}\"\n",
            path.display(),
            DEFAULT_SOURCE,
            DEFAULT_MAX_ROWS,
            DEFAULT_FETCH_TIMEOUT,
            DEFAULT_BASE_URL,
            DEFAULT_MODEL,
            API_KEY_ENV,
            DEFAULT_LLM_TIMEOUT,
            DEFAULT_LOG_FILTER,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 30s)")
}
