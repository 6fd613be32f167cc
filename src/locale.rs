//! Locale folders and locale discovery.

mod discovery;
mod folder;

pub use discovery::{
    Locale,
    LocaleError,
    discover_locales,
};
pub use folder::LocaleFolder;
