use tracing::debug;

use crate::tui::app::{ActionError, App, InputPurpose, Mode, TextPrompt};
use crate::tui::command::Command;
use crate::tui::text_field::TextField;

use super::search;

/// Open a free-text modal. The draft starts as `initial`.
pub(super) fn open(app: &mut App, purpose: InputPurpose, prompt: impl Into<String>, initial: &str) {
    debug!(?purpose, "text prompt opened");
    let origin = app.search_session().cloned();
    app.mode = Mode::TextInput(TextPrompt {
        purpose,
        prompt: prompt.into(),
        field: TextField::with_value(initial),
        origin,
    });
}

/// Commands while a text prompt is open. Editing keys arrive separately
/// through [`App::handle_edit`].
pub(super) fn handle_prompt(app: &mut App, cmd: Command) -> Result<(), ActionError> {
    match cmd {
        Command::Confirm => confirm(app),
        Command::Cancel => {
            if let Mode::TextInput(prompt) = super::take_mode(app) {
                app.leave_modal(prompt.origin);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Dispatch the trimmed draft by purpose. The machine is back in Normal
/// whether or not the action succeeds.
fn confirm(app: &mut App) -> Result<(), ActionError> {
    let Mode::TextInput(TextPrompt {
        purpose,
        field,
        origin,
        ..
    }) = super::take_mode(app)
    else {
        return Ok(());
    };
    let text = field.value().trim();

    if purpose == InputPurpose::SearchQuery {
        return search::start_search(app, text, origin);
    }
    app.leave_modal(origin);

    match purpose {
        InputPurpose::AddTask => {
            let context = app.store.current_context().to_string();
            let id = app.record(|s| s.add_task(text, &context))?;
            app.select_task(id);
        }
        InputPurpose::EditTask(id) => app.record(|s| s.edit_task_text(id, text))?,
        InputPurpose::AddContext => {
            app.store.add_context(text)?;
            app.cursor.reset();
        }
        InputPurpose::RenameContext(old) => app.store.rename_context(&old, text)?,
        InputPurpose::AddTag(id) => {
            app.record_if_changed(|s| s.add_tag(id, text))?;
        }
        InputPurpose::DeleteConfirm(name) => {
            if text.eq_ignore_ascii_case("y") {
                let removed = app.record(|s| s.delete_context(&name))?;
                app.cursor.reset();
                app.info(format!("Deleted context '{}' and {} task(s)", name, removed));
            }
        }
        InputPurpose::SearchQuery => {}
    }
    Ok(())
}
