// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ids::{MessageId, RequestId, Sequence};
use crate::model::{ChatMessage, ChatRole, LoadFailure, LoadSource, TableLoadEvent};

pub const WELCOME_MESSAGE: &str =
    "Please upload a CSV file to get started. I can help you analyze the data.";
pub const DEFAULT_LOAD_FAILED_MESSAGE: &str =
    "Failed to load the default CSV file. You can upload a file manually using the upload button.";
pub const APOLOGY: &str = "Sorry, I couldn't get an answer right now. Please try asking again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    AwaitingAnswer { request: RequestId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRejection {
    Blank,
    AnswerPending,
}

impl std::fmt::Display for ChatRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => f.write_str("message is blank"),
            Self::AnswerPending => f.write_str("still waiting for the previous answer"),
        }
    }
}

impl std::error::Error for ChatRejection {}

/// Append-only transcript plus the single-flight answer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    phase: ChatPhase,
    message_ids: Sequence,
    request_ids: Sequence,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::empty()
    }
}

impl ChatSession {
    pub fn empty() -> Self {
        Self {
            transcript: Vec::new(),
            phase: ChatPhase::Idle,
            message_ids: Sequence::default(),
            request_ids: Sequence::default(),
        }
    }

    pub fn with_welcome() -> Self {
        let mut session = Self::empty();
        session.push(ChatRole::Bot, WELCOME_MESSAGE.to_owned());
        session
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.phase, ChatPhase::AwaitingAnswer { .. })
    }

    /// Whether a submit of `input` would be accepted right now.
    pub fn can_submit(&self, input: &str) -> bool {
        !input.trim().is_empty() && !self.is_awaiting()
    }

    pub fn append_user(
        &mut self,
        text: &str,
        wants_answer: bool,
    ) -> Result<Option<RequestId>, ChatRejection> {
        if text.trim().is_empty() {
            return Err(ChatRejection::Blank);
        }
        if self.is_awaiting() {
            return Err(ChatRejection::AnswerPending);
        }

        self.push(ChatRole::User, text.to_owned());
        if !wants_answer {
            return Ok(None);
        }

        let request = RequestId::new(self.request_ids.next_raw());
        self.phase = ChatPhase::AwaitingAnswer { request };
        Ok(Some(request))
    }

    pub fn append_bot(&mut self, text: impl Into<String>) -> MessageId {
        self.phase = ChatPhase::Idle;
        self.push(ChatRole::Bot, text.into())
    }

    /// Appends the reply for the outstanding request. Replies for any other
    /// request are dropped and leave the phase untouched.
    pub fn settle(&mut self, request: RequestId, text: impl Into<String>) -> bool {
        match self.phase {
            ChatPhase::AwaitingAnswer { request: pending } if pending == request => {
                self.append_bot(text);
                true
            }
            _ => {
                tracing::debug!(%request, "dropping reply for stale request");
                false
            }
        }
    }

    pub fn seed_greeting(&mut self, event: &TableLoadEvent) -> MessageId {
        let text = greeting_for(event);
        self.push(ChatRole::Bot, text)
    }

    fn push(&mut self, role: ChatRole, text: String) -> MessageId {
        let id = MessageId::new(self.message_ids.next_raw());
        self.transcript.push(ChatMessage { id, role, text });
        id
    }
}

pub fn greeting_for(event: &TableLoadEvent) -> String {
    match event {
        TableLoadEvent::Loaded { summary, source } => {
            let which = match source {
                LoadSource::Default { .. } => "the default",
                LoadSource::UserFile { .. } => "your",
            };
            format!(
                "I've loaded {which} CSV file with {} rows and {} columns. What would you like to know about the data?",
                summary.row_count,
                summary.column_count()
            )
        }
        TableLoadEvent::Failed(LoadFailure::DefaultUnavailable { .. }) => {
            DEFAULT_LOAD_FAILED_MESSAGE.to_owned()
        }
        TableLoadEvent::Failed(LoadFailure::UserFileUnreadable { path, reason }) => format!(
            "Failed to read {}: {reason}. Choose another .csv file to try again.",
            path.display()
        ),
    }
}

pub fn canned_echo(question: &str) -> String {
    format!(
        "I see you're asking about \"{question}\". What specific information would you like to know about the data?"
    )
}
