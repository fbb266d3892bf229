// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Routes tracing output to `path`. The terminal belongs to the UI, so
/// nothing is written to stdout or stderr. Keep the guard alive until exit
/// or buffered lines are lost.
pub fn init(path: &Path, configured_filter: &str) -> Result<WorkerGuard> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("log path {} has no file name", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(resolve_filter(
            std::env::var("RUST_LOG").ok().as_deref(),
            configured_filter,
        )?)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;

    Ok(guard)
}

/// `RUST_LOG` wins when set and non-blank.
fn resolve_filter(env_filter: Option<&str>, configured: &str) -> Result<EnvFilter> {
    let directives = env_filter
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(configured);
    EnvFilter::try_new(directives).with_context(|| format!("invalid log filter {directives:?}"))
}
