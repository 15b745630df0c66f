use tracing::debug;

use crate::ops::search;
use crate::tui::app::{ActionError, App, Mode, SearchSession};
use crate::tui::command::Command;

use super::navigate;

/// Commands in Search mode. Context switching, context management and the
/// board views are not available here.
pub(super) fn handle_search(app: &mut App, cmd: Command) -> Result<(), ActionError> {
    match cmd {
        Command::Cancel => {
            exit_search(app);
            Ok(())
        }
        Command::Left
        | Command::Right
        | Command::ShowKanban
        | Command::ShowStats
        | Command::AddContext
        | Command::RenameContext
        | Command::DeleteContext
        | Command::Confirm => Ok(()),
        other => navigate::handle_list(app, other),
    }
}

/// Enter Search with `query`. `origin` is the search the query prompt was
/// opened from; its restore point is kept so leaving the new search still
/// returns to where the user was before searching at all.
///
/// An empty query or one with no hits does not enter Search.
pub(super) fn start_search(
    app: &mut App,
    query: &str,
    origin: Option<SearchSession>,
) -> Result<(), ActionError> {
    if query.is_empty() {
        app.leave_modal(origin);
        return Err(ActionError::EmptyQuery);
    }
    if search::search_tasks(app.store.tasks(), query).is_empty() {
        app.leave_modal(origin);
        return Err(ActionError::NoMatches(query.to_string()));
    }

    let restore = match origin {
        Some(session) => session.restore,
        None => app.view_point(),
    };
    debug!(query, "search started");
    app.mode = Mode::Search(SearchSession {
        query: query.to_string(),
        restore,
    });
    app.cursor.reset();
    Ok(())
}

/// Leave Search, restoring the pre-search context and selection
fn exit_search(app: &mut App) {
    if let Mode::Search(session) = super::take_mode(app) {
        debug!(query = %session.query, "search closed");
        app.restore_view(session.restore);
    }
}
