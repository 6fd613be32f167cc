//! Reading and writing per-locale translation files.

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

use super::{
    MessageKey,
    set_at_path,
};

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize translations: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Path of the translation file for `locale` inside `folder`.
#[must_use]
pub fn locale_file_path(folder: &Path, locale: &str) -> PathBuf {
    folder.join(format!("{locale}.json"))
}

/// Loads a translation file as a JSON object.
///
/// A missing, unreadable, or unparseable file, as well as a document whose
/// root is not an object, yields an empty object. Only the latter cases are
/// logged as warnings; a missing file is the normal state for a new locale.
pub async fn read_translation_file(path: &Path) -> Value {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Translation file does not exist yet");
            return empty_object();
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "Failed to read translation file");
            return empty_object();
        }
    };

    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    match serde_json::from_str::<Value>(content) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            tracing::warn!(path = %path.display(), "Translation file root is not an object");
            empty_object()
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "Failed to parse translation file");
            empty_object()
        }
    }
}

/// Writes `document` as pretty-printed JSON with 2-space indentation.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub async fn write_translation_file(path: &Path, document: &Value) -> Result<(), TranslationError> {
    let mut content = serde_json::to_string_pretty(document)?;
    content.push('\n');

    tokio::fs::write(path, content)
        .await
        .map_err(|source| TranslationError::Write { path: path.to_path_buf(), source })
}

/// Stores `translation` under `key` in the file of `locale`, merging with existing content.
///
/// Returns the path of the written file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub async fn persist_translation(
    folder: &Path,
    locale: &str,
    key: &MessageKey,
    translation: &str,
) -> Result<PathBuf, TranslationError> {
    let path = locale_file_path(folder, locale);

    let mut document = read_translation_file(&path).await;
    set_at_path(&mut document, key, Value::String(translation.to_string()));
    write_translation_file(&path, &document).await?;

    tracing::debug!(path = %path.display(), %key, locale, "Stored translation");
    Ok(path)
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}
