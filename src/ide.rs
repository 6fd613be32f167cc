//! IDE features module.

pub mod backend;
pub mod commands;
mod handlers;
pub mod protocol;
pub mod selection;
pub mod state;
pub mod ui;
