// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use csvchat_app::{LoadFailure, RequestId, Table, TableSummary};
use csvchat_data::Ingestor;
use csvchat_llm::{AnswerService, CompletionBackend};
use csvchat_tui::InternalEvent;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

pub struct CliRuntime<B> {
    ingestor: Ingestor,
    default_source: String,
    answers: Option<Arc<AnswerService<B>>>,
}

impl<B> CliRuntime<B> {
    pub fn new(
        ingestor: Ingestor,
        default_source: impl Into<String>,
        answers: Option<AnswerService<B>>,
    ) -> Self {
        Self {
            ingestor,
            default_source: default_source.into(),
            answers: answers.map(Arc::new),
        }
    }
}

impl<B> csvchat_tui::AppRuntime for CliRuntime<B>
where
    B: CompletionBackend + Send + Sync + 'static,
{
    fn default_location(&self) -> String {
        self.default_source.clone()
    }

    fn load_default(&mut self) -> Result<Table, LoadFailure> {
        let result = self.ingestor.load_default(&self.default_source);
        match &result {
            Ok(table) => tracing::info!(
                source = %self.default_source,
                rows = table.row_count(),
                "loaded default data"
            ),
            Err(failure) => tracing::warn!(%failure, "default data unavailable"),
        }
        result
    }

    fn load_file(&mut self, path: &Path) -> Result<Table, LoadFailure> {
        let result = self.ingestor.load_file(path);
        match &result {
            Ok(table) => tracing::info!(
                path = %path.display(),
                rows = table.row_count(),
                "loaded user file"
            ),
            Err(failure) => tracing::warn!(%failure, "user file rejected"),
        }
        result
    }

    fn answers_enabled(&self) -> bool {
        self.answers.is_some()
    }

    /// Runs the request on a named worker thread so the UI keeps drawing.
    fn spawn_answer(
        &mut self,
        request: RequestId,
        question: &str,
        summary: &TableSummary,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let service = self
            .answers
            .clone()
            .ok_or_else(|| anyhow!("answers are disabled"))?;
        let question = question.to_owned();
        let summary = summary.clone();

        thread::Builder::new()
            .name(format!("answer-{}", request.get()))
            .spawn(move || {
                tracing::debug!(request = request.get(), "answer request started");
                let text = service.answer(&question, &summary);
                if tx.send(InternalEvent::Answer { request, text }).is_err() {
                    tracing::debug!(request = request.get(), "answer dropped; UI has exited");
                }
            })
            .context("spawn answer thread")?;
        Ok(())
    }
}
