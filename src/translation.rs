//! Translation files: message keys, nested value updates, and persistence.

mod json_path;
mod key;
mod store;

pub use json_path::set_at_path;
pub use key::{
    KEY_SEPARATOR,
    MessageKey,
};
pub use store::{
    TranslationError,
    locale_file_path,
    persist_translation,
    read_translation_file,
    write_translation_file,
};
