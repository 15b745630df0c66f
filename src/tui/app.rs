use std::io;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use indexmap::IndexSet;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::io::store_io::{DocumentStore, load_or_default};
use crate::model::config::AppConfig;
use crate::model::document::Document;
use crate::model::task::{Task, TaskId};
use crate::ops::search::{self, CompletionStats};
use crate::ops::store::{Direction, ErrorKind, StoreError, TaskStore};

use super::command::Command;
use super::cursor::Cursor;
use super::input;
use super::keymap::{self, Input};
use super::render;
use super::text_field::{EditKey, TextField};
use super::theme::Theme;
use super::undo::UndoHistory;

/// Failures of a command that the store itself cannot detect
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("No tags to remove")]
    NoTags,
    #[error("No tasks matching '{0}'")]
    NoMatches(String),
    #[error("Search query cannot be empty")]
    EmptyQuery,
    #[error("Cannot move task further {0}")]
    MoveBoundary(Direction),
}

impl ActionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::Store(e) => e.kind(),
            ActionError::NothingToUndo
            | ActionError::NoTags
            | ActionError::NoMatches(_)
            | ActionError::EmptyQuery => ErrorKind::PreconditionUnmet,
            ActionError::MoveBoundary(_) => ErrorKind::ValidationRejected,
        }
    }
}

/// Transient status line content, cleared by the next input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Info(String),
    Error { kind: ErrorKind, text: String },
}

impl Message {
    pub fn text(&self) -> &str {
        match self {
            Message::Info(text) | Message::Error { text, .. } => text,
        }
    }
}

/// Context and selection to come back to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPoint {
    pub context: String,
    pub cursor: usize,
}

/// An active search: the query and where the user was before it started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    pub query: String,
    pub restore: ViewPoint,
}

/// What a confirmed text prompt does with its text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPurpose {
    AddTask,
    EditTask(TaskId),
    AddContext,
    /// Rename the named context
    RenameContext(String),
    AddTag(TaskId),
    SearchQuery,
    /// Delete the named context on a `y` answer
    DeleteConfirm(String),
}

/// Free-text modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrompt {
    pub purpose: InputPurpose,
    pub prompt: String,
    pub field: TextField,
    /// Search the modal was opened from, if any
    pub origin: Option<SearchSession>,
}

pub const DATE_FIELD_LABELS: [&str; 3] = ["Day", "Month", "Year"];

/// Three-field day/month/year modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateForm {
    pub target: TaskId,
    /// Day, month, year
    pub fields: [TextField; 3],
    pub focus: usize,
    pub origin: Option<SearchSession>,
}

impl DateForm {
    /// Form pre-filled with `today`, day field focused
    pub fn new(target: TaskId, today: NaiveDate, origin: Option<SearchSession>) -> Self {
        DateForm {
            target,
            fields: [
                TextField::numeric(&format!("{:02}", today.day()), 2),
                TextField::numeric(&format!("{:02}", today.month()), 2),
                TextField::numeric(&format!("{:04}", today.year()), 4),
            ],
            focus: 0,
            origin,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }
}

/// Checklist over the target task's tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChecklist {
    pub target: TaskId,
    pub tags: Vec<String>,
    pub checked: Vec<bool>,
    pub cursor: usize,
    pub origin: Option<SearchSession>,
}

impl TagChecklist {
    pub fn new(target: TaskId, tags: Vec<String>, origin: Option<SearchSession>) -> Self {
        let checked = vec![false; tags.len()];
        TagChecklist {
            target,
            tags,
            checked,
            cursor: 0,
            origin,
        }
    }

    /// Positions of the checked tags
    pub fn checked_indices(&self) -> Vec<usize> {
        self.checked
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
            .collect()
    }
}

/// Current interaction mode. Each variant carries exactly the state it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search(SearchSession),
    Kanban,
    Stats,
    TextInput(TextPrompt),
    DateInput(DateForm),
    RemoveTagSelect(TagChecklist),
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Search(_) => "search",
            Mode::Kanban => "kanban",
            Mode::Stats => "stats",
            Mode::TextInput(_) => "text-input",
            Mode::DateInput(_) => "date-input",
            Mode::RemoveTagSelect(_) => "remove-tags",
        }
    }

    /// Modal states collect input on top of the list view
    pub fn is_modal(&self) -> bool {
        matches!(
            self,
            Mode::TextInput(_) | Mode::DateInput(_) | Mode::RemoveTagSelect(_)
        )
    }
}

/// A manual reorder in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSession {
    pub task: TaskId,
    /// Task sequence when the move started
    pub before: Vec<Task>,
}

/// Main application state
pub struct App {
    pub(crate) store: TaskStore,
    pub(crate) history: UndoHistory,
    pub(crate) mode: Mode,
    pub(crate) cursor: Cursor,
    pub(crate) moving: Option<MoveSession>,
    pub(crate) message: Option<Message>,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
}

impl App {
    pub fn new(doc: Document) -> Self {
        Self::with_config(doc, &AppConfig::default())
    }

    pub fn with_config(doc: Document, config: &AppConfig) -> Self {
        App {
            store: TaskStore::from_document(doc),
            history: UndoHistory::new(config.history_depth()),
            mode: Mode::Normal,
            cursor: Cursor::default(),
            moving: None,
            message: None,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
        }
    }

    // -----------------------------------------------------------------------
    // Render queries
    // -----------------------------------------------------------------------

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Tasks shown in the list: search hits while a search is active,
    /// otherwise the current context's tasks
    pub fn visible_tasks(&self) -> Vec<&Task> {
        match self.search_session() {
            Some(session) => search::search_tasks(self.store.tasks(), &session.query),
            None => search::tasks_in_context(self.store.tasks(), self.store.current_context()),
        }
    }

    pub fn selected_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.cursor.index()).copied()
    }

    pub fn current_context(&self) -> &str {
        self.store.current_context()
    }

    pub fn contexts(&self) -> &IndexSet<String> {
        self.store.contexts()
    }

    pub fn stats(&self) -> CompletionStats {
        search::completion_stats(
            self.store.tasks(),
            self.store.contexts().iter().map(String::as_str),
        )
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn is_moving(&self) -> bool {
        self.moving.is_some()
    }

    /// ID of the task being moved, if move mode is on
    pub fn moving_task(&self) -> Option<TaskId> {
        self.moving.as_ref().map(|m| m.task)
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search_session().map(|s| s.query.as_str())
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn to_document(&self) -> Document {
        self.store.to_document()
    }

    // -----------------------------------------------------------------------
    // Command entry points
    // -----------------------------------------------------------------------

    /// Process one command to completion: mutate, re-project, clamp.
    /// Failures become the status message and leave state unchanged.
    pub fn handle(&mut self, cmd: Command) {
        self.message = None;
        debug!(?cmd, mode = self.mode.name(), moving = self.moving.is_some(), "command");

        let result = if self.moving.is_some() {
            input::handle_move(self, cmd)
        } else {
            input::dispatch(self, cmd)
        };
        if let Err(e) = result {
            self.fail(e);
        }
        self.clamp_cursor();
    }

    /// Feed one editing keystroke to the focused text field, if any
    pub fn handle_edit(&mut self, key: EditKey) {
        self.message = None;
        match &mut self.mode {
            Mode::TextInput(prompt) => {
                prompt.field.apply(key);
            }
            Mode::DateInput(form) => {
                let focus = form.focus;
                form.fields[focus].apply(key);
            }
            _ => {}
        }
    }

    pub fn handle_input(&mut self, input: Input) {
        match input {
            Input::Command(cmd) => self.handle(cmd),
            Input::Edit(key) => self.handle_edit(key),
        }
    }

    // -----------------------------------------------------------------------
    // Helpers for the mode handlers
    // -----------------------------------------------------------------------

    /// The search in effect: the Search mode itself or the one a modal was
    /// opened from
    pub(crate) fn search_session(&self) -> Option<&SearchSession> {
        match &self.mode {
            Mode::Search(session) => Some(session),
            Mode::TextInput(TextPrompt { origin, .. })
            | Mode::DateInput(DateForm { origin, .. })
            | Mode::RemoveTagSelect(TagChecklist { origin, .. }) => origin.as_ref(),
            Mode::Normal | Mode::Kanban | Mode::Stats => None,
        }
    }

    pub(crate) fn visible_len(&self) -> usize {
        self.visible_tasks().len()
    }

    pub(crate) fn selected_id(&self) -> Option<TaskId> {
        self.selected_task().map(|t| t.id)
    }

    pub(crate) fn view_point(&self) -> ViewPoint {
        ViewPoint {
            context: self.store.current_context().to_string(),
            cursor: self.cursor.index(),
        }
    }

    /// Go back to a saved context and selection. A context that no longer
    /// exists leaves the current one in place.
    pub(crate) fn restore_view(&mut self, point: ViewPoint) {
        if self.store.set_current_context(&point.context).is_err() {
            debug!(context = %point.context, "restore point context is gone");
        }
        let len = self.visible_len();
        self.cursor.set(point.cursor, len);
    }

    /// Close a modal: back to Normal, restoring the pre-search view when the
    /// modal was opened from a search
    pub(crate) fn leave_modal(&mut self, origin: Option<SearchSession>) {
        self.mode = Mode::Normal;
        if let Some(session) = origin {
            self.restore_view(session.restore);
        }
    }

    /// Point the cursor at `id` if it is visible
    pub(crate) fn select_task(&mut self, id: TaskId) {
        let visible = self.visible_tasks();
        if let Some(pos) = visible.iter().position(|t| t.id == id) {
            let len = visible.len();
            self.cursor.set(pos, len);
        }
    }

    /// Run a store mutation, pushing the pre-mutation snapshot if it succeeds
    pub(crate) fn record<T>(
        &mut self,
        mutate: impl FnOnce(&mut TaskStore) -> Result<T, StoreError>,
    ) -> Result<T, ActionError> {
        let before = self.store.snapshot();
        let out = mutate(&mut self.store)?;
        self.history.push(before);
        Ok(out)
    }

    /// Like [`App::record`] for mutations that report whether they changed
    /// anything; unchanged results push nothing
    pub(crate) fn record_if_changed(
        &mut self,
        mutate: impl FnOnce(&mut TaskStore) -> Result<bool, StoreError>,
    ) -> Result<bool, ActionError> {
        let before = self.store.snapshot();
        let changed = mutate(&mut self.store)?;
        if changed {
            self.history.push(before);
        }
        Ok(changed)
    }

    pub(crate) fn undo(&mut self) -> Result<(), ActionError> {
        let snapshot = self.history.pop().ok_or(ActionError::NothingToUndo)?;
        self.store.restore(snapshot);
        self.cursor.reset();
        info!(remaining = self.history.len(), "undo");
        Ok(())
    }

    pub(crate) fn info(&mut self, text: impl Into<String>) {
        self.message = Some(Message::Info(text.into()));
    }

    fn fail(&mut self, error: ActionError) {
        debug!(%error, mode = self.mode.name(), "command rejected");
        self.message = Some(Message::Error {
            kind: error.kind(),
            text: error.to_string(),
        });
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        self.cursor.clamp(len);
    }
}

/// Run the TUI against `store`: load (falling back to the seed document),
/// drive the event loop, save on quit.
pub fn run(store: &impl DocumentStore, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_or_default(store);
    let mut app = App::with_config(doc, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if app.should_quit {
        store.save(&app.to_document())?;
    }
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(input) = keymap::map_key(key, app.mode())
        {
            app.handle_input(input);
        }

        if app.should_quit {
            info!("quit requested");
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use pretty_assertions::assert_eq;

    fn app() -> App {
        App::new(Document::seed())
    }

    fn texts(app: &App) -> Vec<String> {
        app.visible_tasks().iter().map(|t| t.text.clone()).collect()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_edit(EditKey::Char(c));
        }
    }

    fn error_kind(app: &App) -> Option<ErrorKind> {
        match app.message() {
            Some(Message::Error { kind, .. }) => Some(*kind),
            _ => None,
        }
    }

    #[test]
    fn starts_in_normal_on_first_context() {
        let app = app();
        assert_eq!(app.mode(), &Mode::Normal);
        assert_eq!(app.current_context(), "Personal");
        assert_eq!(
            texts(&app),
            vec!["Press space to toggle completion", "Use arrow keys to navigate"]
        );
    }

    #[test]
    fn up_down_wrap() {
        let mut app = app();
        app.handle(Command::Up);
        assert_eq!(app.selected_index(), 1);
        app.handle(Command::Down);
        assert_eq!(app.selected_index(), 0);
    }

    #[test]
    fn left_right_switch_context_and_reset_cursor() {
        let mut app = app();
        app.handle(Command::Down);
        app.handle(Command::Right);
        assert_eq!(app.current_context(), "Work");
        assert_eq!(app.selected_index(), 0);
        app.handle(Command::Left);
        assert_eq!(app.current_context(), "Personal");
    }

    #[test]
    fn add_task_through_prompt_selects_it() {
        let mut app = app();
        app.handle(Command::Add);
        assert!(matches!(
            app.mode(),
            Mode::TextInput(TextPrompt { purpose: InputPurpose::AddTask, .. })
        ));
        type_text(&mut app, "  Buy milk  ");
        app.handle(Command::Confirm);
        assert_eq!(app.mode(), &Mode::Normal);
        assert_eq!(app.selected_task().map(|t| t.text.as_str()), Some("Buy milk"));
        assert_eq!(app.selected_index(), 2);
        assert_eq!(app.history().len(), 1);
    }

    #[test]
    fn empty_add_is_rejected_without_snapshot() {
        let mut app = app();
        app.handle(Command::Add);
        type_text(&mut app, "   ");
        app.handle(Command::Confirm);
        assert_eq!(app.mode(), &Mode::Normal);
        assert_eq!(error_kind(&app), Some(ErrorKind::ValidationRejected));
        assert!(app.history().is_empty());
        assert_eq!(app.store().tasks().len(), 4);
    }

    #[test]
    fn cancel_discards_draft() {
        let mut app = app();
        app.handle(Command::Add);
        type_text(&mut app, "never");
        app.handle(Command::Cancel);
        assert_eq!(app.mode(), &Mode::Normal);
        assert_eq!(app.store().tasks().len(), 4);
    }

    #[test]
    fn edit_prefills_and_replaces_text() {
        let mut app = app();
        app.handle(Command::Edit);
        match app.mode() {
            Mode::TextInput(prompt) => {
                assert_eq!(prompt.field.value(), "Press space to toggle completion")
            }
            other => panic!("unexpected mode {other:?}"),
        }
        app.handle_edit(EditKey::DeleteToStart);
        type_text(&mut app, "Rewritten");
        app.handle(Command::Confirm);
        assert_eq!(app.store().task(TaskId(3)).unwrap().text, "Rewritten");
    }

    #[test]
    fn message_cleared_by_next_command() {
        let mut app = app();
        app.handle(Command::Undo);
        assert_eq!(app.message().map(Message::text), Some("Nothing to undo"));
        assert_eq!(error_kind(&app), Some(ErrorKind::PreconditionUnmet));
        app.handle(Command::Down);
        assert_eq!(app.message(), None);
    }

    #[test]
    fn toggle_priority_and_undo() {
        let mut app = app();
        app.handle(Command::TogglePriority);
        assert_eq!(app.selected_task().unwrap().priority, Priority::Low);
        app.handle(Command::Undo);
        assert_eq!(app.selected_task().unwrap().priority, Priority::None);
    }

    #[test]
    fn kanban_and_stats_are_pure_view_switches() {
        let mut app = app();
        app.handle(Command::ShowKanban);
        assert_eq!(app.mode(), &Mode::Kanban);
        app.handle(Command::Delete);
        assert_eq!(app.store().tasks().len(), 4);
        app.handle(Command::ShowKanban);
        assert_eq!(app.mode(), &Mode::Normal);

        app.handle(Command::ShowStats);
        assert_eq!(app.mode(), &Mode::Stats);
        app.handle(Command::Quit);
        assert_eq!(app.mode(), &Mode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn quit_from_normal() {
        let mut app = app();
        app.handle(Command::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn quit_ignored_in_modal() {
        let mut app = app();
        app.handle(Command::Add);
        app.handle(Command::Quit);
        assert!(!app.should_quit);
        assert!(app.mode().is_modal());
    }

    #[test]
    fn delete_context_prompt_requires_y() {
        let mut app = app();
        app.handle(Command::DeleteContext);
        match app.mode() {
            Mode::TextInput(prompt) => {
                assert_eq!(prompt.prompt, "Delete context 'Personal'? (y/n):")
            }
            other => panic!("unexpected mode {other:?}"),
        }
        type_text(&mut app, "n");
        app.handle(Command::Confirm);
        assert!(app.contexts().contains("Personal"));

        app.handle(Command::DeleteContext);
        type_text(&mut app, "Y");
        app.handle(Command::Confirm);
        assert!(!app.contexts().contains("Personal"));
        assert_eq!(app.current_context(), "Work");
        assert_eq!(app.store().tasks().len(), 2);
    }

    #[test]
    fn delete_only_context_fails_before_prompt() {
        let mut app = App::new(Document::default());
        app.handle(Command::DeleteContext);
        assert_eq!(app.mode(), &Mode::Normal);
        assert_eq!(app.message().map(Message::text), Some("Cannot delete the only context"));
    }

    #[test]
    fn add_and_rename_context() {
        let mut app = app();
        app.handle(Command::AddContext);
        type_text(&mut app, "Errands");
        app.handle(Command::Confirm);
        assert_eq!(app.current_context(), "Errands");
        assert!(app.visible_tasks().is_empty());
        assert!(app.history().is_empty());

        app.handle(Command::AddContext);
        type_text(&mut app, "Work");
        app.handle(Command::Confirm);
        assert_eq!(error_kind(&app), Some(ErrorKind::NameConflict));

        app.handle(Command::RenameContext);
        app.handle_edit(EditKey::DeleteToStart);
        type_text(&mut app, "Shopping");
        app.handle(Command::Confirm);
        assert_eq!(app.current_context(), "Shopping");
        assert!(!app.contexts().contains("Errands"));
    }

    #[test]
    fn date_modal_prefills_today_and_cycles_focus() {
        let mut app = app();
        app.handle(Command::SetDueDate);
        let Mode::DateInput(form) = app.mode() else {
            panic!("expected date input");
        };
        assert_eq!(form.focus, 0);
        assert_eq!(form.fields[2].value().len(), 4);
        app.handle(Command::Up);
        let Mode::DateInput(form) = app.mode() else {
            panic!("expected date input");
        };
        assert_eq!(form.focus, 2);
    }

    #[test]
    fn date_modal_sets_normalized_date() {
        let mut app = app();
        app.handle(Command::SetDueDate);
        for _ in 0..3 {
            app.handle_edit(EditKey::DeleteToStart);
            app.handle(Command::Down);
        }
        type_text(&mut app, "5");
        app.handle(Command::Down);
        type_text(&mut app, "3");
        app.handle(Command::Down);
        type_text(&mut app, "2030");
        app.handle(Command::Confirm);
        assert_eq!(app.mode(), &Mode::Normal);
        let due = app.selected_task().unwrap().due_date.clone().unwrap();
        assert_eq!(due.as_str(), "2030-03-05");
    }

    #[test]
    fn invalid_date_returns_to_normal_with_error() {
        let mut app = app();
        app.handle(Command::SetDueDate);
        app.handle(Command::Down);
        app.handle_edit(EditKey::DeleteToStart);
        type_text(&mut app, "13");
        app.handle(Command::Confirm);
        assert_eq!(app.mode(), &Mode::Normal);
        assert_eq!(error_kind(&app), Some(ErrorKind::ValidationRejected));
        assert!(app.selected_task().unwrap().due_date.is_none());
        assert!(app.history().is_empty());
    }

    #[test]
    fn remove_tag_requires_tags() {
        let mut app = app();
        app.handle(Command::RemoveTag);
        assert_eq!(app.mode(), &Mode::Normal);
        assert_eq!(app.message().map(Message::text), Some("No tags to remove"));
    }

    #[test]
    fn remove_tag_checklist() {
        let mut app = app();
        for tag in ["a", "b", "c"] {
            app.handle(Command::AddTag);
            type_text(&mut app, tag);
            app.handle(Command::Confirm);
        }
        assert_eq!(app.history().len(), 3);

        app.handle(Command::RemoveTag);
        app.handle(Command::Down);
        app.handle(Command::Toggle);
        app.handle(Command::Down);
        app.handle(Command::Down);
        app.handle(Command::Toggle);
        let Mode::RemoveTagSelect(list) = app.mode() else {
            panic!("expected checklist");
        };
        assert_eq!(list.cursor, 2);
        assert_eq!(list.checked_indices(), vec![1, 2]);
        app.handle(Command::Confirm);
        assert_eq!(app.selected_task().unwrap().tag_line(), "a");
        assert_eq!(app.history().len(), 4);
    }

    #[test]
    fn duplicate_tag_pushes_no_snapshot() {
        let mut app = app();
        for _ in 0..2 {
            app.handle(Command::AddTag);
            type_text(&mut app, "x");
            app.handle(Command::Confirm);
        }
        assert_eq!(app.history().len(), 1);
    }

    #[test]
    fn clear_due_date() {
        let mut app = app();
        app.store
            .set_due_date(TaskId(3), Some(crate::model::DueDate::parse("2030-01-01").unwrap()))
            .unwrap();
        app.handle(Command::ClearDueDate);
        assert!(app.selected_task().unwrap().due_date.is_none());
    }

    #[test]
    fn commands_on_empty_list_are_silent() {
        let mut app = app();
        app.handle(Command::AddContext);
        type_text(&mut app, "Empty");
        app.handle(Command::Confirm);
        for cmd in [
            Command::Toggle,
            Command::Delete,
            Command::Edit,
            Command::TogglePriority,
            Command::ToggleMove,
            Command::SetDueDate,
        ] {
            app.handle(cmd);
            assert_eq!(app.mode(), &Mode::Normal);
            assert_eq!(app.message(), None);
        }
        assert!(!app.is_moving());
    }

    #[test]
    fn action_error_kinds() {
        assert_eq!(ActionError::NothingToUndo.kind(), ErrorKind::PreconditionUnmet);
        assert_eq!(
            ActionError::MoveBoundary(Direction::Up).kind(),
            ErrorKind::ValidationRejected
        );
        assert_eq!(
            ActionError::from(StoreError::ContextExists("x".into())).kind(),
            ErrorKind::NameConflict
        );
        assert_eq!(
            ActionError::NoMatches("xyz".into()).to_string(),
            "No tasks matching 'xyz'"
        );
    }
}
