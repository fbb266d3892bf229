// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use csvchat_app::{
    APOLOGY, AppCommand, AppEvent, AppState, ChatRole, DetailFields, EMPTY_DETAIL_MESSAGE,
    LoadFailure, LoadSource, Pane, RequestId, Table, TableLoadEvent, TableSummary, project_row,
    visible_columns,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table as TableWidget, Wrap};
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const MAX_RENDERED_MESSAGES: usize = 200;
const CELL_CHARS: usize = 120;
const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);

/// Side effects the UI needs from the outside world.
pub trait AppRuntime {
    fn default_location(&self) -> String;
    fn load_default(&mut self) -> Result<Table, LoadFailure>;
    fn load_file(&mut self, path: &Path) -> Result<Table, LoadFailure>;
    fn answers_enabled(&self) -> bool;
    /// Starts answering `question` and must not block the UI thread. The
    /// reply arrives later as `InternalEvent::Answer` on `tx`.
    fn spawn_answer(
        &mut self,
        request: RequestId,
        question: &str,
        summary: &TableSummary,
        tx: Sender<InternalEvent>,
    ) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    Answer { request: RequestId, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct UploadPrompt {
    input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    cursor: usize,
    preview_scroll: u16,
    /// Rows scrolled up from the newest chat line.
    chat_scroll: u16,
    /// Frame area of the last draw; scroll limits are measured against it.
    viewport: Rect,
    chat_input: String,
    upload: Option<UploadPrompt>,
    help_visible: bool,
    status_token: u64,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    state.status_line = Some(format!("loading {}", runtime.default_location()));
    let mut result = draw(&mut terminal, state, &mut view_data);
    if result.is_ok() {
        load_default_table(state, runtime, &mut view_data, &internal_tx);
    }

    while result.is_ok() {
        process_internal_events(state, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = draw(&mut terminal, state, &mut view_data) {
            result = Err(error);
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn draw<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &AppState,
    view_data: &mut ViewData,
) -> Result<()> {
    let mut viewport = view_data.viewport;
    terminal
        .draw(|frame| {
            viewport = frame.area();
            render(frame, state, view_data);
        })
        .context("draw frame")?;
    view_data.viewport = viewport;
    Ok(())
}

fn load_default_table<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let location = runtime.default_location();
    let command = match runtime.load_default() {
        Ok(table) => AppCommand::TableLoaded {
            table,
            source: LoadSource::Default { location },
        },
        Err(failure) => AppCommand::LoadFailed(failure),
    };
    dispatch(state, view_data, internal_tx, command);
}

fn load_user_file<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    path: PathBuf,
) {
    let command = match runtime.load_file(&path) {
        Ok(table) => AppCommand::TableLoaded {
            table,
            source: LoadSource::UserFile { path },
        },
        Err(failure) => AppCommand::LoadFailed(failure),
    };
    dispatch(state, view_data, internal_tx, command);
}

/// Dispatches a command and keeps view-only state in step with the
/// resulting events.
fn dispatch(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) -> Vec<AppEvent> {
    let transcript_len = state.chat.transcript().len();
    let events = state.dispatch(command);
    if state.chat.transcript().len() != transcript_len {
        view_data.chat_scroll = 0;
    }
    for event in &events {
        match event {
            AppEvent::StatusUpdated(_) => {
                view_data.status_token = view_data.status_token.saturating_add(1);
                schedule_status_clear(internal_tx, view_data.status_token);
            }
            AppEvent::TableLoad(TableLoadEvent::Loaded { .. }) => {
                view_data.cursor = 0;
                view_data.preview_scroll = 0;
            }
            AppEvent::SelectionChanged(selected) => {
                if let Some(index) = selected {
                    view_data.cursor = *index;
                }
                view_data.preview_scroll = 0;
            }
            _ => {}
        }
    }
    events
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::Answer { request, text } => {
                dispatch(state, view_data, tx, AppCommand::AnswerReady { request, text });
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    dispatch(
        state,
        view_data,
        internal_tx,
        AppCommand::SetStatus(message.into()),
    );
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    if view_data.upload.is_some() {
        handle_upload_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if key.code == KeyCode::Char('o') && key.modifiers.contains(KeyModifiers::CONTROL) {
        view_data.upload = Some(UploadPrompt::default());
        return false;
    }

    match key.code {
        KeyCode::Tab => {
            dispatch(state, view_data, internal_tx, AppCommand::FocusNext);
            return false;
        }
        KeyCode::BackTab => {
            dispatch(state, view_data, internal_tx, AppCommand::FocusPrev);
            return false;
        }
        _ => {}
    }

    match state.focus {
        Pane::Chat => handle_chat_key(state, runtime, view_data, internal_tx, key),
        Pane::Table => handle_table_key(state, view_data, internal_tx, key),
        Pane::Preview => handle_preview_key(state, view_data, internal_tx, key),
    }
    false
}

fn handle_upload_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(prompt) = view_data.upload.as_mut() else {
        return;
    };

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => view_data.upload = None,
        (KeyCode::Enter, _) => {
            let raw = prompt.input.trim().to_owned();
            if raw.is_empty() {
                emit_status(state, view_data, internal_tx, "enter a path to a .csv file");
                return;
            }
            view_data.upload = None;
            load_user_file(state, runtime, view_data, internal_tx, PathBuf::from(raw));
        }
        (KeyCode::Backspace, _) => {
            prompt.input.pop();
        }
        (KeyCode::Char(ch), modifiers) => {
            if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT {
                prompt.input.push(ch);
            }
        }
        _ => {}
    }
}

fn handle_chat_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => submit_chat_input(state, runtime, view_data, internal_tx),
        (KeyCode::Backspace, _) => {
            view_data.chat_input.pop();
        }
        (KeyCode::PageUp, _) => {
            let page = page_rows(pane_areas(view_data.viewport).transcript);
            view_data.chat_scroll = view_data
                .chat_scroll
                .saturating_add(page)
                .min(chat_max_scroll(state, view_data.viewport));
        }
        (KeyCode::PageDown, _) => {
            let page = page_rows(pane_areas(view_data.viewport).transcript);
            view_data.chat_scroll = view_data.chat_scroll.saturating_sub(page);
        }
        (KeyCode::Char(ch), modifiers) => {
            if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT {
                view_data.chat_input.push(ch);
            }
        }
        _ => {}
    }
}

fn submit_chat_input<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let input = view_data.chat_input.trim().to_owned();
    let events = dispatch(
        state,
        view_data,
        internal_tx,
        AppCommand::SubmitQuestion {
            text: input,
            wants_answer: runtime.answers_enabled(),
        },
    );

    for event in events {
        match event {
            AppEvent::AnswerRequested {
                request,
                question,
                summary,
            } => {
                view_data.chat_input.clear();
                if let Err(error) =
                    runtime.spawn_answer(request, &question, &summary, internal_tx.clone())
                {
                    tracing::warn!(%request, error = %format!("{error:#}"), "answer worker failed to start");
                    dispatch(
                        state,
                        view_data,
                        internal_tx,
                        AppCommand::AnswerReady {
                            request,
                            text: APOLOGY.to_owned(),
                        },
                    );
                }
            }
            AppEvent::BotReplied => view_data.chat_input.clear(),
            _ => {}
        }
    }
}

fn handle_table_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let row_count = state.store.table().map_or(0, Table::row_count);
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
            move_cursor(view_data, row_count, 1);
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
            move_cursor(view_data, row_count, -1);
        }
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => view_data.cursor = 0,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
            view_data.cursor = row_count.saturating_sub(1);
        }
        (KeyCode::PageDown, _) => move_cursor(view_data, row_count, 20),
        (KeyCode::PageUp, _) => move_cursor(view_data, row_count, -20),
        (KeyCode::Enter, _) => {
            if row_count > 0 {
                dispatch(
                    state,
                    view_data,
                    internal_tx,
                    AppCommand::SelectRow(view_data.cursor),
                );
            }
        }
        (KeyCode::Esc, _) => {
            dispatch(state, view_data, internal_tx, AppCommand::ClearSelection);
        }
        (KeyCode::Char('?'), _) => view_data.help_visible = true,
        _ => {}
    }
}

fn handle_preview_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let max = preview_max_scroll(state, view_data.viewport);
    let page = page_rows(pane_areas(view_data.viewport).preview);
    // A resize can leave the stored offset past the end.
    let current = view_data.preview_scroll.min(max);
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
            view_data.preview_scroll = current.saturating_add(1).min(max);
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
            view_data.preview_scroll = current.saturating_sub(1);
        }
        (KeyCode::PageDown, _) => {
            view_data.preview_scroll = current.saturating_add(page).min(max);
        }
        (KeyCode::PageUp, _) => {
            view_data.preview_scroll = current.saturating_sub(page);
        }
        (KeyCode::Char('g'), KeyModifiers::NONE) => view_data.preview_scroll = 0,
        (KeyCode::Char('G'), _) => view_data.preview_scroll = max,
        (KeyCode::Esc, _) => {
            dispatch(state, view_data, internal_tx, AppCommand::ClearSelection);
        }
        (KeyCode::Char('?'), _) => view_data.help_visible = true,
        _ => {}
    }
}

fn move_cursor(view_data: &mut ViewData, row_count: usize, delta: isize) {
    if row_count == 0 {
        view_data.cursor = 0;
        return;
    }
    let last = row_count - 1;
    view_data.cursor = view_data.cursor.saturating_add_signed(delta).min(last);
}

/// Rows to draw so that `cursor` stays on screen.
fn row_window(cursor: usize, row_count: usize, height: usize) -> Range<usize> {
    if height == 0 || row_count == 0 {
        return 0..0;
    }
    let start = if cursor >= height {
        cursor + 1 - height
    } else {
        0
    };
    start..(start + height).min(row_count)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PaneAreas {
    transcript: Rect,
    input: Rect,
    table: Rect,
    preview: Rect,
    status: Rect,
}

fn pane_areas(area: Rect) -> PaneAreas {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(layout[0]);

    let chat = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(panes[0]);

    PaneAreas {
        transcript: chat[0],
        input: chat[1],
        table: panes[1],
        preview: panes[2],
        status: layout[1],
    }
}

/// How far `text` can scroll once wrapped inside a bordered pane at `area`.
fn max_scroll(text: &str, area: Rect) -> u16 {
    let inner_width = area.width.saturating_sub(2);
    if inner_width == 0 {
        return 0;
    }
    let rows = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .line_count(inner_width);
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_sub(area.height.saturating_sub(2))
}

fn page_rows(area: Rect) -> u16 {
    area.height.saturating_sub(2).max(1)
}

fn chat_max_scroll(state: &AppState, viewport: Rect) -> u16 {
    max_scroll(&render_chat_text(state), pane_areas(viewport).transcript)
}

fn preview_max_scroll(state: &AppState, viewport: Rect) -> u16 {
    max_scroll(&render_preview_text(state), pane_areas(viewport).preview)
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let areas = pane_areas(frame.area());

    render_chat(frame, &areas, state, view_data);
    render_table(frame, areas.table, state, view_data);
    render_preview(frame, areas.preview, state, view_data);

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, areas.status);

    if let Some(prompt) = &view_data.upload {
        let area = centered_rect(60, 20, frame.area());
        frame.render_widget(Clear, area);
        let upload = Paragraph::new(render_upload_text(prompt))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("open csv")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(upload, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style)
}

fn render_chat(
    frame: &mut ratatui::Frame<'_>,
    areas: &PaneAreas,
    state: &AppState,
    view_data: &ViewData,
) {
    let focused = state.focus == Pane::Chat;
    let text = render_chat_text(state);
    // Offsets count wrapped rows, so the newest line sits on the bottom edge.
    let offset = max_scroll(&text, areas.transcript).saturating_sub(view_data.chat_scroll);
    let title = if view_data.chat_scroll > 0 {
        "chat (scrolled)".to_owned()
    } else {
        "chat".to_owned()
    };
    let transcript = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0))
        .block(pane_block(title, focused));
    frame.render_widget(transcript, areas.transcript);

    let input = Paragraph::new(render_chat_input_text(state, view_data)).block(
        Block::default()
            .title("ask")
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(input, areas.input);
}

fn render_chat_text(state: &AppState) -> String {
    let transcript = state.chat.transcript();
    let skip = transcript.len().saturating_sub(MAX_RENDERED_MESSAGES);
    let mut out = transcript[skip..]
        .iter()
        .map(|message| {
            let label = match message.role {
                ChatRole::User => "you",
                ChatRole::Bot => "bot",
            };
            format!("{label}: {}", message.text)
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    if state.chat.is_awaiting() {
        out.push_str("\n\nbot: thinking...");
    }
    out
}

fn render_chat_input_text(state: &AppState, view_data: &ViewData) -> String {
    if state.chat.is_awaiting() && view_data.chat_input.is_empty() {
        return "waiting for the answer...".to_owned();
    }
    if state.focus == Pane::Chat {
        format!("{}_", view_data.chat_input)
    } else {
        view_data.chat_input.clone()
    }
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, view_data: &ViewData) {
    let focused = state.focus == Pane::Table;
    let Some(table) = state.store.table() else {
        let empty = Paragraph::new("no table loaded; press ctrl+o to open a .csv file")
            .wrap(Wrap { trim: false })
            .block(pane_block("table".to_owned(), focused));
        frame.render_widget(empty, area);
        return;
    };

    let title = format!(
        "table {}/{}",
        (view_data.cursor + 1).min(table.row_count()),
        table.row_count()
    );
    let columns = visible_columns(table, &state.visible_columns);
    if columns.is_empty() {
        let message = format!(
            "none of the visible columns ({}) are in this file",
            state.visible_columns.join(", ")
        );
        let empty = Paragraph::new(message)
            .wrap(Wrap { trim: false })
            .block(pane_block(title, focused));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(columns.iter().map(|column| {
        Cell::from(table.headers()[*column].clone()).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    // Borders plus the header row.
    let height = usize::from(area.height.saturating_sub(3));
    let selected = state.store.selected_index();
    let rows = row_window(view_data.cursor, table.row_count(), height).map(|row_index| {
        let mut style = Style::default();
        if selected == Some(row_index) {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        if focused && row_index == view_data.cursor {
            style = style.bg(Color::DarkGray);
        }
        let cells = project_row(table, row_index, &columns)
            .into_iter()
            .map(|value| Cell::from(single_line(&value, CELL_CHARS)));
        Row::new(cells).style(style)
    });

    let widths = vec![Constraint::Min(8); columns.len()];
    let widget = TableWidget::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(pane_block(title, focused));
    frame.render_widget(widget, area);
}

fn single_line(value: &str, max_chars: usize) -> String {
    let flat = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut out = flat.chars().take(max_chars.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

fn render_preview(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let title = match state.store.selection() {
        Some(selection) => format!("row {}", selection.index + 1),
        None => "preview".to_owned(),
    };
    let text = render_preview_text(state);
    let offset = view_data.preview_scroll.min(max_scroll(&text, area));
    let preview = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0))
        .block(pane_block(title, state.focus == Pane::Preview));
    frame.render_widget(preview, area);
}

fn render_preview_text(state: &AppState) -> String {
    let Some(selection) = state.store.selection() else {
        return "select a row with enter to preview it".to_owned();
    };

    let details = DetailFields::discover(&selection.row);
    let mut out = String::new();
    if details.is_empty() {
        out.push_str(EMPTY_DETAIL_MESSAGE);
        out.push('\n');
    } else {
        if let Some(date) = &details.date {
            out.push_str(&format!("Date: {date}\n\n"));
        }
        if let Some(content) = &details.content {
            out.push_str(content);
            out.push('\n');
        }
    }

    out.push_str("\nfields\n");
    for cell in selection.row.entries() {
        out.push_str(&format!("{}: {}\n", cell.header, cell.value));
    }
    out
}

fn render_upload_text(prompt: &UploadPrompt) -> String {
    format!(
        "path to a .csv file:\n\n{}_\n\nenter load | esc cancel",
        prompt.input
    )
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible || view_data.upload.is_some() {
        return state.status_line.clone().unwrap_or_default();
    }

    let hints = match state.focus {
        Pane::Chat => "enter send | pgup/pgdn scroll | tab focus | ctrl+o open | ctrl+q quit",
        Pane::Table => {
            "j/k g/G move | enter select | esc clear | tab focus | ctrl+o open | ? help | ctrl+q quit"
        }
        Pane::Preview => {
            "j/k pgup/pgdn scroll | esc clear | tab focus | ctrl+o open | ? help | ctrl+q quit"
        }
    };
    let focus = state.focus.label().to_ascii_uppercase();
    match &state.status_line {
        Some(status) => format!("{focus} | {status} | {hints}"),
        None => format!("{focus} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ctrl+o open csv | tab/shift+tab focus\n\
table: j/k up/down move | g/G first/last | pgup/pgdn page | enter select | esc clear | ? help\n\
preview: j/k line | pgup/pgdn page | g/G top/bottom | esc clear | ? help\n\
chat: type to ask | enter send | backspace delete | pgup/pgdn scroll\n\
open csv: type a path | enter load | esc cancel\n\
help: esc or ? close"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
