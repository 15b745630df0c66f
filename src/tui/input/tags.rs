use crate::model::task::TaskId;
use crate::ops::store::StoreError;
use crate::tui::app::{ActionError, App, Mode, TagChecklist};
use crate::tui::command::Command;

/// Open the tag checklist for `target`; fails when it has no tags
pub(super) fn open(app: &mut App, target: TaskId) -> Result<(), ActionError> {
    let task = app.store.task(target).ok_or(StoreError::TaskNotFound(target))?;
    if task.tags.is_empty() {
        return Err(ActionError::NoTags);
    }
    let tags: Vec<String> = task.tags.iter().cloned().collect();
    let origin = app.search_session().cloned();
    app.mode = Mode::RemoveTagSelect(TagChecklist::new(target, tags, origin));
    Ok(())
}

pub(super) fn handle_tags(app: &mut App, cmd: Command) -> Result<(), ActionError> {
    match cmd {
        Command::Confirm => return confirm(app),
        Command::Cancel => {
            if let Mode::RemoveTagSelect(list) = super::take_mode(app) {
                app.leave_modal(list.origin);
            }
            return Ok(());
        }
        _ => {}
    }

    let Mode::RemoveTagSelect(list) = &mut app.mode else {
        return Ok(());
    };
    match cmd {
        Command::Up => list.cursor = list.cursor.saturating_sub(1),
        Command::Down => {
            if list.cursor + 1 < list.tags.len() {
                list.cursor += 1;
            }
        }
        Command::Toggle => {
            if let Some(flag) = list.checked.get_mut(list.cursor) {
                *flag = !*flag;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Remove the checked tags as one undoable step. Nothing checked is a no-op.
fn confirm(app: &mut App) -> Result<(), ActionError> {
    let Mode::RemoveTagSelect(list) = super::take_mode(app) else {
        return Ok(());
    };
    let indices = list.checked_indices();
    let target = list.target;
    app.leave_modal(list.origin);

    if indices.is_empty() {
        return Ok(());
    }
    app.record(|s| s.remove_tags(target, &indices))
}
