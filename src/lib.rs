//! translation-manager-language-server
//!
//! Language server that adds a localized message to every per-locale JSON
//! translation file of a project, prompting for each translation.

pub mod config;
pub mod ide;
pub mod locale;
pub mod translation;

mod test_utils;

pub use ide::backend::Backend;
