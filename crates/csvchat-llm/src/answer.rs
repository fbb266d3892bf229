// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
pub use csvchat_app::APOLOGY;
use csvchat_app::TableSummary;
use time::OffsetDateTime;

/// Anything that turns a prompt into model text.
pub trait CompletionBackend {
    fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct AnswerService<B> {
    backend: B,
    extra_context: Option<String>,
}

impl<B: CompletionBackend> AnswerService<B> {
    pub fn new(backend: B, extra_context: Option<String>) -> Self {
        Self {
            backend,
            extra_context: extra_context.filter(|context| !context.trim().is_empty()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Makes a single attempt and never fails: errors and empty output both
    /// become `APOLOGY`.
    pub fn answer(&self, question: &str, summary: &TableSummary) -> String {
        self.answer_at(question, summary, OffsetDateTime::now_utc())
    }

    pub fn answer_at(&self, question: &str, summary: &TableSummary, now: OffsetDateTime) -> String {
        let prompt = build_answer_prompt(question, summary, now, self.extra_context.as_deref());
        match self.backend.complete(&prompt) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_owned(),
            Ok(_) => {
                tracing::warn!("model returned an empty answer");
                APOLOGY.to_owned()
            }
            Err(error) => {
                tracing::warn!(error = %format!("{error:#}"), "answer request failed");
                APOLOGY.to_owned()
            }
        }
    }
}

pub fn build_answer_prompt(
    question: &str,
    summary: &TableSummary,
    now: OffsetDateTime,
    extra_context: Option<&str>,
) -> String {
    let mut out = String::new();
    out.push_str(
        "You are a research assistant for a table of regulatory documents loaded from a CSV file. \
         Answer using only what the table description and your general knowledge of such documents support.\n",
    );
    out.push_str(&format!("Current date: {}\n\n", format_human_date(now)));

    out.push_str("## Table\n\n");
    out.push_str(&format!("Rows: {}\n", summary.row_count));
    if summary.headers.is_empty() {
        out.push_str("Columns: (none)\n");
    } else {
        out.push_str(&format!("Columns: {}\n", summary.headers.join(", ")));
    }

    out.push_str("\n## Question\n\n");
    out.push_str(question);
    out.push('\n');

    out.push_str(ANSWER_FORMAT);

    if let Some(context) = extra_context
        && !context.is_empty()
    {
        out.push_str("\n## Additional context\n\n");
        out.push_str(context);
        out.push('\n');
    }
    out
}

fn format_human_date(now: OffsetDateTime) -> String {
    now.date()
        .format(&time::macros::format_description!(
            "[weekday repr:long], [month repr:long] [day], [year]"
        ))
        .unwrap_or_else(|_| now.date().to_string())
}

const ANSWER_FORMAT: &str = r#"
## Answer format

Reply with these labeled sections, in this order, and write "Not found" for
any section the data cannot support:

Type: the kind of document (law, decree, ordinance, resolution, ...)
Number: the document number
Date: the publication date
Related sections: articles or paragraphs that bear on the question
Summary: two or three sentences on what the document establishes
Answer: a direct answer to the question
"#;

#[cfg(test)]
mod tests {
    use super::{APOLOGY, AnswerService, CompletionBackend, build_answer_prompt};
    use anyhow::{Result, bail};
    use csvchat_app::TableSummary;
    use std::cell::RefCell;
    use time::macros::datetime;

    struct Scripted {
        reply: Result<String, String>,
        prompts: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_owned()),
                prompts: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_owned()),
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl CompletionBackend for Scripted {
        fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.borrow_mut().push(prompt.to_owned());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => bail!("{message}"),
            }
        }
    }

    fn summary() -> TableSummary {
        TableSummary {
            headers: vec!["Ementa".to_owned(), "Data".to_owned()],
            row_count: 42,
        }
    }

    #[test]
    fn prompt_embeds_table_question_date_and_sections() {
        let prompt = build_answer_prompt(
            "Qual portaria trata de saneamento?",
            &summary(),
            datetime!(2026-02-13 12:00 UTC),
            None,
        );
        assert!(prompt.contains("Rows: 42"));
        assert!(prompt.contains("Columns: Ementa, Data"));
        assert!(prompt.contains("Qual portaria trata de saneamento?"));
        assert!(prompt.contains("Friday, February 13, 2026"));
        for section in ["Type:", "Number:", "Date:", "Related sections:", "Summary:", "Answer:"] {
            assert!(prompt.contains(section), "missing {section}");
        }
        assert!(!prompt.contains("## Additional context"));
    }

    #[test]
    fn prompt_appends_extra_context_when_present() {
        let prompt = build_answer_prompt(
            "q",
            &TableSummary::default(),
            datetime!(2026-02-13 12:00 UTC),
            Some("Documents are from the state of São Paulo."),
        );
        assert!(prompt.contains("Columns: (none)"));
        assert!(prompt.contains("## Additional context\n\nDocuments are from the state of São Paulo."));
    }

    #[test]
    fn answer_returns_trimmed_backend_text() {
        let service = AnswerService::new(Scripted::ok("  Type: Lei\n"), None);
        assert_eq!(service.answer("q", &summary()), "Type: Lei");
        assert_eq!(service.backend().prompts.borrow().len(), 1);
    }

    #[test]
    fn answer_error_maps_to_apology_after_one_attempt() {
        let service = AnswerService::new(Scripted::failing("connection refused"), None);
        assert_eq!(service.answer("q", &summary()), APOLOGY);
        assert_eq!(service.backend().prompts.borrow().len(), 1);
    }

    #[test]
    fn blank_answer_maps_to_apology() {
        let service = AnswerService::new(Scripted::ok(" \n "), None);
        assert_eq!(service.answer("q", &summary()), APOLOGY);
    }

    #[test]
    fn blank_extra_context_is_dropped() {
        let service = AnswerService::new(Scripted::ok("a"), Some("   ".to_owned()));
        service.answer_at("q", &summary(), datetime!(2026-02-13 12:00 UTC));
        let prompts = service.backend().prompts.borrow();
        assert!(!prompts[0].contains("## Additional context"));
    }
}
