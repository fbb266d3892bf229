// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod parse;

pub use parse::{decode_bytes, parse_text};

use anyhow::{Context, Result, anyhow, bail};
use csvchat_app::{LoadFailure, Table};
use reqwest::blocking::Client as HttpClient;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const APP_NAME: &str = "csvchat";
pub const DEFAULT_SOURCE: &str = "ementa_data.csv";
pub const DEFAULT_MAX_ROWS: usize = 100_000;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    Remote(Url),
    Local(PathBuf),
}

impl DataLocation {
    /// `http(s)` URLs are fetched; `file:` URLs and everything else are
    /// filesystem paths. Other URI schemes are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            bail!("data source must not be empty");
        }

        if let Some(index) = raw.find("://")
            && index > 1
            && raw[..index].chars().all(|ch| ch.is_ascii_alphabetic())
        {
            let url = Url::parse(raw).with_context(|| format!("parse data source URL {raw:?}"))?;
            return match url.scheme() {
                "http" | "https" => Ok(Self::Remote(url)),
                "file" => url
                    .to_file_path()
                    .map(Self::Local)
                    .map_err(|()| anyhow!("data source {raw:?} is not a usable file path")),
                scheme => bail!(
                    "data source {raw:?} uses unsupported scheme {scheme}://; use http(s) or a filesystem path"
                ),
            };
        }

        Ok(Self::Local(PathBuf::from(raw)))
    }
}

#[derive(Debug, Clone)]
pub struct Ingestor {
    max_rows: usize,
    http: HttpClient,
}

impl Ingestor {
    pub fn new(max_rows: usize, fetch_timeout: Duration) -> Result<Self> {
        if max_rows == 0 {
            bail!("max_rows must be positive");
        }
        let http = HttpClient::builder()
            .timeout(fetch_timeout)
            .build()
            .context("build HTTP client")?;
        Ok(Self { max_rows, http })
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Loads a file the user picked. Only `.csv` files are accepted.
    pub fn load_file(&self, path: &Path) -> Result<Table, LoadFailure> {
        self.read_file(path)
            .and_then(|table| self.bounded(table))
            .map_err(|error| LoadFailure::UserFileUnreadable {
                path: path.to_path_buf(),
                reason: format!("{error:#}"),
            })
    }

    /// Loads the startup resource once. No retry.
    pub fn load_default(&self, location: &str) -> Result<Table, LoadFailure> {
        self.read_default(location)
            .and_then(|table| self.bounded(table))
            .map_err(|error| LoadFailure::DefaultUnavailable {
                location: location.to_owned(),
                reason: format!("{error:#}"),
            })
    }

    fn read_file(&self, path: &Path) -> Result<Table> {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            bail!("only .csv files can be loaded");
        }

        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        parse_text(&decode_bytes(bytes))
    }

    fn read_default(&self, location: &str) -> Result<Table> {
        match DataLocation::parse(location)? {
            DataLocation::Local(path) => {
                let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
                parse_text(&decode_bytes(bytes))
            }
            DataLocation::Remote(url) => {
                tracing::debug!(%url, "fetching default data");
                let response = self
                    .http
                    .get(url.clone())
                    .send()
                    .with_context(|| format!("fetch {url}"))?;
                let status = response.status();
                if !status.is_success() {
                    bail!("fetch {url}: server returned {}", status.as_u16());
                }
                let bytes = response
                    .bytes()
                    .with_context(|| format!("read body of {url}"))?;
                parse_text(&decode_bytes(bytes.to_vec()))
            }
        }
    }

    fn bounded(&self, table: Table) -> Result<Table> {
        if table.row_count() > self.max_rows {
            bail!(
                "{} rows exceeds the limit of {}; raise [data].max_rows to load it",
                table.row_count(),
                self.max_rows
            );
        }
        Ok(table)
    }
}

pub fn default_log_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("CSVCHAT_LOG_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set CSVCHAT_LOG_PATH to a writable log file")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join("csvchat.log"))
}
