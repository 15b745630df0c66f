use std::fmt;

/// The closed set of logical commands the state machine accepts.
/// Physical keys are mapped onto these by [`super::keymap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Toggle,
    Add,
    Edit,
    Delete,
    Search,
    AddContext,
    RenameContext,
    DeleteContext,
    TogglePriority,
    AddTag,
    RemoveTag,
    SetDueDate,
    ClearDueDate,
    ShowKanban,
    ShowStats,
    Undo,
    ToggleMove,
    Confirm,
    Cancel,
    Quit,
}

impl Command {
    /// Every command, in key-hint order
    pub const ALL: [Command; 24] = [
        Command::Up,
        Command::Down,
        Command::Left,
        Command::Right,
        Command::Toggle,
        Command::Add,
        Command::Edit,
        Command::Delete,
        Command::Search,
        Command::AddContext,
        Command::RenameContext,
        Command::DeleteContext,
        Command::TogglePriority,
        Command::AddTag,
        Command::RemoveTag,
        Command::SetDueDate,
        Command::ClearDueDate,
        Command::ShowKanban,
        Command::ShowStats,
        Command::Undo,
        Command::ToggleMove,
        Command::Confirm,
        Command::Cancel,
        Command::Quit,
    ];

    /// Short description used in the key-hint footer
    pub fn describe(self) -> &'static str {
        match self {
            Command::Up => "up",
            Command::Down => "down",
            Command::Left => "prev context",
            Command::Right => "next context",
            Command::Toggle => "toggle",
            Command::Add => "add",
            Command::Edit => "edit",
            Command::Delete => "delete",
            Command::Search => "search",
            Command::AddContext => "new context",
            Command::RenameContext => "rename context",
            Command::DeleteContext => "delete context",
            Command::TogglePriority => "priority",
            Command::AddTag => "add tag",
            Command::RemoveTag => "remove tag",
            Command::SetDueDate => "due date",
            Command::ClearDueDate => "clear due",
            Command::ShowKanban => "kanban",
            Command::ShowStats => "stats",
            Command::Undo => "undo",
            Command::ToggleMove => "move",
            Command::Confirm => "confirm",
            Command::Cancel => "back",
            Command::Quit => "quit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
