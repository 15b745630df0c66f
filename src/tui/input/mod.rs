mod board;
mod date;
mod move_mode;
mod navigate;
mod prompt;
mod search;
mod tags;

use super::app::{ActionError, App, Mode};
use super::command::Command;

pub(crate) use move_mode::handle_move;

/// Route a command to the handler for the current mode
pub(crate) fn dispatch(app: &mut App, cmd: Command) -> Result<(), ActionError> {
    match app.mode {
        Mode::Normal => navigate::handle_normal(app, cmd),
        Mode::Search(_) => search::handle_search(app, cmd),
        Mode::Kanban | Mode::Stats => board::handle_board(app, cmd),
        Mode::TextInput(_) => prompt::handle_prompt(app, cmd),
        Mode::DateInput(_) => date::handle_date(app, cmd),
        Mode::RemoveTagSelect(_) => tags::handle_tags(app, cmd),
    }
}

/// Swap the current mode for Normal and hand back what was there
fn take_mode(app: &mut App) -> Mode {
    std::mem::replace(&mut app.mode, Mode::Normal)
}
