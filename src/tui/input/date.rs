use chrono::Local;

use crate::model::task::{DueDate, TaskId};
use crate::ops::store::StoreError;
use crate::tui::app::{ActionError, App, DateForm, Mode};
use crate::tui::command::Command;

/// Open the due date form for `target`, pre-filled with today's date
pub(super) fn open(app: &mut App, target: TaskId) {
    let today = Local::now().date_naive();
    let origin = app.search_session().cloned();
    app.mode = Mode::DateInput(DateForm::new(target, today, origin));
}

pub(super) fn handle_date(app: &mut App, cmd: Command) -> Result<(), ActionError> {
    match cmd {
        Command::Up => {
            if let Mode::DateInput(form) = &mut app.mode {
                form.focus_prev();
            }
            Ok(())
        }
        Command::Down => {
            if let Mode::DateInput(form) = &mut app.mode {
                form.focus_next();
            }
            Ok(())
        }
        Command::Confirm => confirm(app),
        Command::Cancel => {
            if let Mode::DateInput(form) = super::take_mode(app) {
                app.leave_modal(form.origin);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Validate the three fields and set the date. An invalid date is reported
/// after the form has closed.
fn confirm(app: &mut App) -> Result<(), ActionError> {
    let Mode::DateInput(form) = super::take_mode(app) else {
        return Ok(());
    };
    let DateForm {
        target,
        fields: [day, month, year],
        origin,
        ..
    } = form;
    app.leave_modal(origin);

    let date = DueDate::from_fields(day.value(), month.value(), year.value())
        .map_err(StoreError::from)?;
    app.record(|s| s.set_due_date(target, Some(date)))
}
