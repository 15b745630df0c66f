use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::Mode;
use super::command::Command;
use super::text_field::EditKey;

/// What a key press means in the current mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Edit(EditKey),
}

/// Key hints for the list view footer, in display order
pub const LIST_HINTS: &[(&str, Command)] = &[
    ("↑/k", Command::Up),
    ("↓/j", Command::Down),
    ("←/h", Command::Left),
    ("→/l", Command::Right),
    ("space", Command::Toggle),
    ("a", Command::Add),
    ("e", Command::Edit),
    ("d", Command::Delete),
    ("/", Command::Search),
    ("n", Command::AddContext),
    ("r", Command::RenameContext),
    ("D", Command::DeleteContext),
    ("p", Command::TogglePriority),
    ("t", Command::AddTag),
    ("T", Command::RemoveTag),
    ("u", Command::SetDueDate),
    ("U", Command::ClearDueDate),
    ("v", Command::ShowKanban),
    ("s", Command::ShowStats),
    ("z", Command::Undo),
    ("m", Command::ToggleMove),
    ("esc", Command::Cancel),
    ("q", Command::Quit),
];

/// Map a key event to an input based on the current mode.
/// Keys with no meaning in the mode map to `None`.
pub fn map_key(key: KeyEvent, mode: &Mode) -> Option<Input> {
    match mode {
        Mode::Normal | Mode::Search(_) => map_list(key).map(Input::Command),
        Mode::Kanban | Mode::Stats => map_board(key).map(Input::Command),
        Mode::TextInput(_) => map_text(key),
        Mode::DateInput(_) => map_date(key),
        Mode::RemoveTagSelect(_) => map_checklist(key).map(Input::Command),
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

fn map_list(key: KeyEvent) -> Option<Command> {
    if is_ctrl(&key, 'c') {
        return Some(Command::Quit);
    }
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    let cmd = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Command::Up,
        KeyCode::Down | KeyCode::Char('j') => Command::Down,
        KeyCode::Left | KeyCode::Char('h') => Command::Left,
        KeyCode::Right | KeyCode::Char('l') => Command::Right,
        KeyCode::Char(' ') => Command::Toggle,
        KeyCode::Char('a') => Command::Add,
        KeyCode::Char('e') => Command::Edit,
        KeyCode::Char('d') => Command::Delete,
        KeyCode::Char('/') => Command::Search,
        KeyCode::Char('n') => Command::AddContext,
        KeyCode::Char('r') => Command::RenameContext,
        KeyCode::Char('D') => Command::DeleteContext,
        KeyCode::Char('p') => Command::TogglePriority,
        KeyCode::Char('t') => Command::AddTag,
        KeyCode::Char('T') => Command::RemoveTag,
        KeyCode::Char('u') => Command::SetDueDate,
        KeyCode::Char('U') => Command::ClearDueDate,
        KeyCode::Char('v') => Command::ShowKanban,
        KeyCode::Char('s') => Command::ShowStats,
        KeyCode::Char('z') => Command::Undo,
        KeyCode::Char('m') => Command::ToggleMove,
        KeyCode::Enter => Command::Confirm,
        KeyCode::Esc => Command::Cancel,
        KeyCode::Char('q') => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

fn map_board(key: KeyEvent) -> Option<Command> {
    if is_ctrl(&key, 'c') {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Esc => Some(Command::Cancel),
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char('v') => Some(Command::ShowKanban),
        KeyCode::Char('s') => Some(Command::ShowStats),
        _ => None,
    }
}

/// Shared editing keys for text and date fields
fn map_edit(key: KeyEvent) -> Option<EditKey> {
    if is_ctrl(&key, 'w') {
        return Some(EditKey::DeleteWord);
    }
    if is_ctrl(&key, 'u') {
        return Some(EditKey::DeleteToStart);
    }
    match key.code {
        KeyCode::Backspace if key.modifiers.contains(KeyModifiers::ALT) => {
            Some(EditKey::DeleteWord)
        }
        KeyCode::Backspace => Some(EditKey::Backspace),
        KeyCode::Delete => Some(EditKey::Delete),
        KeyCode::Left => Some(EditKey::Left),
        KeyCode::Right => Some(EditKey::Right),
        KeyCode::Home => Some(EditKey::Home),
        KeyCode::End => Some(EditKey::End),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(EditKey::Char(c))
        }
        _ => None,
    }
}

fn map_text(key: KeyEvent) -> Option<Input> {
    if is_ctrl(&key, 'c') {
        return Some(Input::Command(Command::Cancel));
    }
    match key.code {
        KeyCode::Enter => Some(Input::Command(Command::Confirm)),
        KeyCode::Esc => Some(Input::Command(Command::Cancel)),
        _ => map_edit(key).map(Input::Edit),
    }
}

fn map_date(key: KeyEvent) -> Option<Input> {
    if is_ctrl(&key, 'c') {
        return Some(Input::Command(Command::Cancel));
    }
    match key.code {
        KeyCode::Enter => Some(Input::Command(Command::Confirm)),
        KeyCode::Esc => Some(Input::Command(Command::Cancel)),
        KeyCode::Up | KeyCode::BackTab => Some(Input::Command(Command::Up)),
        KeyCode::Down | KeyCode::Tab => Some(Input::Command(Command::Down)),
        _ => map_edit(key).map(Input::Edit),
    }
}

fn map_checklist(key: KeyEvent) -> Option<Command> {
    if is_ctrl(&key, 'c') {
        return Some(Command::Cancel);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Down),
        KeyCode::Char(' ') => Some(Command::Toggle),
        KeyCode::Enter => Some(Command::Confirm),
        KeyCode::Esc => Some(Command::Cancel),
        _ => None,
    }
}
