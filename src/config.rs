//! Settings: types, file loading, layering, and writing back.
mod loader;
mod manager;
mod types;

pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    ConfigScope,
    SETTINGS_SECTION,
    ServerSettings,
    TranslationManagerSettings,
    ValidationError,
};
