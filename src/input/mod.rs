pub mod events;
pub mod handler;
pub mod keymap;

pub use events::{AppInputEvent, InputHookResult};
