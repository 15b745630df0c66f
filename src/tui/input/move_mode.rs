use tracing::debug;

use crate::model::task::TaskId;
use crate::ops::store::{Direction, StoreError};
use crate::tui::app::{ActionError, App, MoveSession};
use crate::tui::command::Command;

/// Start moving `task`, remembering the order before the first swap
pub(super) fn enter(app: &mut App, task: TaskId) {
    debug!(%task, "move mode on");
    app.moving = Some(MoveSession {
        task,
        before: app.store.snapshot(),
    });
    app.info("Moving task: up/down to reorder, m or enter to drop");
}

/// Commands while move mode is on. Only reordering, dropping and quitting
/// are accepted.
pub(crate) fn handle_move(app: &mut App, cmd: Command) -> Result<(), ActionError> {
    match cmd {
        Command::Up => shift(app, Direction::Up),
        Command::Down => shift(app, Direction::Down),
        Command::ToggleMove | Command::Confirm | Command::Cancel => {
            finish(app);
            Ok(())
        }
        Command::Quit => {
            finish(app);
            app.should_quit = true;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Swap the moving task with its visible neighbour. In a search the
/// neighbour is the adjacent hit, otherwise the adjacent task of the same
/// context.
fn shift(app: &mut App, direction: Direction) -> Result<(), ActionError> {
    let Some(id) = app.moving_task() else {
        return Ok(());
    };

    if app.search_session().is_some() {
        let visible: Vec<TaskId> = app.visible_tasks().iter().map(|t| t.id).collect();
        let pos = visible
            .iter()
            .position(|&t| t == id)
            .ok_or(StoreError::TaskNotFound(id))?;
        let partner = match direction {
            Direction::Up => pos.checked_sub(1),
            Direction::Down => Some(pos + 1).filter(|&p| p < visible.len()),
        }
        .map(|p| visible[p])
        .ok_or(ActionError::MoveBoundary(direction))?;
        app.store.swap_tasks(id, partner)?;
    } else {
        app.store.move_task(id, direction).map_err(|e| match e {
            StoreError::AtBoundary(d) => ActionError::MoveBoundary(d),
            other => other.into(),
        })?;
    }

    app.select_task(id);
    Ok(())
}

/// Leave move mode. The whole reorder becomes one undo step, and only if
/// the order actually changed.
fn finish(app: &mut App) {
    let Some(session) = app.moving.take() else {
        return;
    };
    if app.store.tasks() != session.before.as_slice() {
        debug!(task = %session.task, "move committed");
        app.history.push(session.before);
    }
}
