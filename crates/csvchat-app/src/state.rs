// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::chat::{ChatRejection, ChatSession, canned_echo};
use crate::ids::RequestId;
use crate::model::{
    DEFAULT_VISIBLE_COLUMNS, LoadFailure, LoadSource, Table, TableLoadEvent, TableSummary,
};
use crate::table::TableStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Chat,
    Table,
    Preview,
}

impl Pane {
    pub const ALL: [Self; 3] = [Self::Chat, Self::Table, Self::Preview];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Table => "table",
            Self::Preview => "preview",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub focus: Pane,
    pub visible_columns: Vec<String>,
    pub store: TableStore,
    pub chat: ChatSession,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            focus: Pane::Table,
            visible_columns: DEFAULT_VISIBLE_COLUMNS
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
            store: TableStore::default(),
            chat: ChatSession::with_welcome(),
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    TableLoaded { table: Table, source: LoadSource },
    LoadFailed(LoadFailure),
    SelectRow(usize),
    ClearSelection,
    SubmitQuestion { text: String, wants_answer: bool },
    AnswerReady { request: RequestId, text: String },
    FocusNext,
    FocusPrev,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TableLoad(TableLoadEvent),
    SelectionChanged(Option<usize>),
    QuestionRejected(ChatRejection),
    AnswerRequested {
        request: RequestId,
        question: String,
        summary: TableSummary,
    },
    BotReplied,
    FocusChanged(Pane),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn with_visible_columns(columns: Vec<String>) -> Self {
        Self {
            visible_columns: columns,
            ..Self::default()
        }
    }

    /// Applies one command. Load outcomes are published as
    /// `AppEvent::TableLoad`, which the chat session observes to seed its
    /// greeting.
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        let events = self.apply(command);
        for event in &events {
            if let AppEvent::TableLoad(load) = event {
                self.chat.seed_greeting(load);
            }
        }
        events
    }

    pub fn summary(&self) -> Option<TableSummary> {
        self.store.table().map(Table::summary)
    }

    fn apply(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::TableLoaded { table, source } => {
                let summary = table.summary();
                tracing::info!(
                    source = %source.label(),
                    rows = summary.row_count,
                    columns = summary.column_count(),
                    "table loaded"
                );
                self.store.load(table);
                let status = format!("loaded {}", source.label());
                vec![
                    AppEvent::TableLoad(TableLoadEvent::Loaded { summary, source }),
                    AppEvent::SelectionChanged(None),
                    self.set_status(status),
                ]
            }
            AppCommand::LoadFailed(failure) => {
                tracing::warn!(%failure, "table load failed");
                let status = format!("load failed: {}", failure.reason());
                vec![
                    AppEvent::TableLoad(TableLoadEvent::Failed(failure)),
                    self.set_status(status),
                ]
            }
            AppCommand::SelectRow(index) => match self.store.select(index) {
                Ok(selection) => {
                    let index = selection.index;
                    vec![AppEvent::SelectionChanged(Some(index))]
                }
                Err(error) => {
                    tracing::debug!(%error, "ignoring row selection");
                    Vec::new()
                }
            },
            AppCommand::ClearSelection => {
                if self.store.selection().is_none() {
                    return Vec::new();
                }
                self.store.clear_selection();
                vec![AppEvent::SelectionChanged(None)]
            }
            AppCommand::SubmitQuestion { text, wants_answer } => {
                self.submit_question(&text, wants_answer)
            }
            AppCommand::AnswerReady { request, text } => {
                if self.chat.settle(request, text) {
                    vec![AppEvent::BotReplied]
                } else {
                    Vec::new()
                }
            }
            AppCommand::FocusNext => self.rotate_focus(1),
            AppCommand::FocusPrev => self.rotate_focus(-1),
            AppCommand::SetStatus(message) => vec![self.set_status(message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn submit_question(&mut self, text: &str, wants_answer: bool) -> Vec<AppEvent> {
        match self.chat.append_user(text, wants_answer) {
            Ok(Some(request)) => {
                tracing::info!(%request, "question submitted");
                vec![AppEvent::AnswerRequested {
                    request,
                    question: text.to_owned(),
                    summary: self.summary().unwrap_or_default(),
                }]
            }
            Ok(None) => {
                self.chat.append_bot(canned_echo(text));
                vec![AppEvent::BotReplied]
            }
            Err(rejection) => {
                let mut events = vec![AppEvent::QuestionRejected(rejection)];
                if rejection == ChatRejection::AnswerPending {
                    events.push(self.set_status("answer pending"));
                }
                events
            }
        }
    }

    fn rotate_focus(&mut self, delta: isize) -> Vec<AppEvent> {
        let panes = Pane::ALL;
        let current = panes
            .iter()
            .position(|pane| *pane == self.focus)
            .unwrap_or(0) as isize;
        let len = panes.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.focus = panes[next];
        vec![AppEvent::FocusChanged(self.focus)]
    }

    fn set_status(&mut self, message: impl Into<String>) -> AppEvent {
        let message = message.into();
        self.status_line = Some(message.clone());
        AppEvent::StatusUpdated(message)
    }
}
