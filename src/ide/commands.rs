//! Commands offered through `workspace/executeCommand`.

pub mod add_message;

/// Identifiers of every command the server executes.
#[must_use]
pub const fn all() -> &'static [&'static str] {
    &[add_message::COMMAND]
}
