pub mod app;
pub mod command;
pub mod cursor;
pub mod input;
pub mod keymap;
pub mod render;
pub mod text_field;
pub mod theme;
pub mod undo;

pub use app::run;
