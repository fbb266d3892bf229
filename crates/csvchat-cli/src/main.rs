// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use csvchat_app::AppState;
use csvchat_data::{DataLocation, Ingestor};
use csvchat_llm::{AnswerService, Client};
use runtime::CliRuntime;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `csvchat --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let source = options
        .data
        .clone()
        .unwrap_or_else(|| config.default_source().to_owned());
    DataLocation::parse(&source).with_context(|| {
        format!("invalid data source {source:?}; pass --data or set [data].default_source")
    })?;

    let ingestor = Ingestor::new(config.max_rows(), config.fetch_timeout()?)?;

    let client = match (config.llm_enabled(), config.llm_api_key()) {
        (true, Some(api_key)) => Some(
            Client::new(
                config.llm_base_url(),
                config.llm_model(),
                Some(&api_key),
                config.llm_timeout()?,
            )
            .with_context(|| {
                format!(
                    "invalid [llm] config in {}; fix base_url/model/timeout values",
                    options.config_path.display()
                )
            })?,
        ),
        _ => None,
    };
    if options.check_only {
        for line in run_checks(&ingestor, &source, client.as_ref())? {
            println!("{line}");
        }
        return Ok(());
    }
    let answers = client.map(|client| AnswerService::new(client, config.llm_extra_context()));

    let log_path = config.log_path()?;
    let _log_guard = logging::init(&log_path, config.log_filter())
        .with_context(|| format!("start logging to {}", log_path.display()))?;
    tracing::info!(
        source = %source,
        answers = answers.is_some(),
        "csvchat starting"
    );
    if answers.is_none() && config.llm_enabled() {
        tracing::warn!("no API key configured; chat replies will echo questions");
    }

    let mut state = AppState::with_visible_columns(config.visible_columns());
    let mut runtime = CliRuntime::new(ingestor, source, answers);
    let result = csvchat_tui::run_app(&mut state, &mut runtime);
    if let Err(error) = &result {
        tracing::error!(error = %format!("{error:#}"), "csvchat exited with an error");
    }
    result
}

/// Loads the data source and pings the model endpoint the way a real start
/// would, returning one report line per dependency.
fn run_checks(ingestor: &Ingestor, source: &str, client: Option<&Client>) -> Result<Vec<String>> {
    let table = ingestor.load_default(source).with_context(|| {
        format!("check data source {source:?}; pass --data or fix [data].default_source")
    })?;
    let mut report = vec![format!(
        "data: {} rows, {} columns from {source}",
        table.row_count(),
        table.headers().len()
    )];

    match client {
        Some(client) => {
            client.ping().with_context(|| {
                format!(
                    "check LLM endpoint {}; fix [llm].base_url, [llm].model or the API key",
                    client.base_url()
                )
            })?;
            report.push(format!("llm: {} at {}", client.model(), client.base_url()));
        }
        None => report.push("llm: disabled (no API key or [llm].enabled = false)".to_owned()),
    }
    Ok(report)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    data: Option<String>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        data: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--data" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--data requires a path or URL"))?;
                options.data = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("csvchat");
    println!("  --config <path>          Use a specific config path");
    println!("  --data <path|url>        Load this CSV at startup instead of [data].default_source");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Load the data source, ping the LLM endpoint, then exit");
    println!("  --help                   Show this help");
}
