use crate::tui::app::{ActionError, App, Mode};
use crate::tui::command::Command;

/// Kanban and Stats are read-only: back, quit or the view's own key
/// return to Normal, everything else is ignored
pub(super) fn handle_board(app: &mut App, cmd: Command) -> Result<(), ActionError> {
    let leave = match (&app.mode, cmd) {
        (_, Command::Cancel | Command::Quit) => true,
        (Mode::Kanban, Command::ShowKanban) => true,
        (Mode::Stats, Command::ShowStats) => true,
        _ => false,
    };
    if leave {
        app.mode = Mode::Normal;
    }
    Ok(())
}
