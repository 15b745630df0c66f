use crate::ops::store::StoreError;
use crate::tui::app::{ActionError, App, InputPurpose, Mode};
use crate::tui::command::Command;

use super::{date, move_mode, prompt, tags};

/// Commands in Normal mode: everything the list accepts plus context
/// management and the board views
pub(super) fn handle_normal(app: &mut App, cmd: Command) -> Result<(), ActionError> {
    match cmd {
        Command::Left => {
            app.store.cycle_context(-1);
            app.cursor.reset();
        }
        Command::Right => {
            app.store.cycle_context(1);
            app.cursor.reset();
        }
        Command::AddContext => {
            prompt::open(app, InputPurpose::AddContext, "New context name:", "");
        }
        Command::RenameContext => {
            let name = app.store.current_context().to_string();
            prompt::open(
                app,
                InputPurpose::RenameContext(name.clone()),
                "Rename context to:",
                &name,
            );
        }
        Command::DeleteContext => {
            if app.store.contexts().len() <= 1 {
                return Err(StoreError::LastContext.into());
            }
            let name = app.store.current_context().to_string();
            let question = format!("Delete context '{}'? (y/n):", name);
            prompt::open(app, InputPurpose::DeleteConfirm(name), question, "");
        }
        Command::ShowKanban => app.mode = Mode::Kanban,
        Command::ShowStats => app.mode = Mode::Stats,
        Command::Confirm | Command::Cancel => {}
        other => return handle_list(app, other),
    }
    Ok(())
}

/// Commands shared by Normal and Search. Task commands act on the selected
/// visible task and are silent no-ops on an empty list.
pub(super) fn handle_list(app: &mut App, cmd: Command) -> Result<(), ActionError> {
    let len = app.visible_len();
    let selected = app.selected_id();

    match cmd {
        Command::Up => app.cursor.up(len),
        Command::Down => app.cursor.down(len),
        Command::Add => prompt::open(app, InputPurpose::AddTask, "Add new task:", ""),
        Command::Search => prompt::open(app, InputPurpose::SearchQuery, "Search tasks:", ""),
        Command::Undo => app.undo()?,
        Command::Quit => app.should_quit = true,
        _ => {
            let Some(id) = selected else {
                return Ok(());
            };
            match cmd {
                Command::Toggle => {
                    app.record(|s| s.toggle_checked(id))?;
                }
                Command::Edit => {
                    let text = app.selected_task().map(|t| t.text.clone()).unwrap_or_default();
                    prompt::open(app, InputPurpose::EditTask(id), "Edit task:", &text);
                }
                Command::Delete => {
                    app.record(|s| s.delete_task(id))?;
                }
                Command::TogglePriority => {
                    app.record(|s| s.cycle_priority(id))?;
                }
                Command::AddTag => prompt::open(app, InputPurpose::AddTag(id), "Add tag:", ""),
                Command::RemoveTag => tags::open(app, id)?,
                Command::SetDueDate => date::open(app, id),
                Command::ClearDueDate => app.record(|s| s.set_due_date(id, None))?,
                Command::ToggleMove => move_mode::enter(app, id),
                _ => {}
            }
        }
    }
    Ok(())
}
