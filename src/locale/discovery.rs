//! Locale discovery: which locales exist in a locale folder.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    GlobBuilder,
    GlobMatcher,
};
use ignore::WalkBuilder;
use thiserror::Error;

use super::LocaleFolder;
use super::folder::has_glob_syntax;

/// Extension of translation files.
const JSON_EXTENSION: &str = ".json";

/// Repository metadata directory, never searched for locales.
const GIT_DIR: &str = ".git";

/// Shortest accepted locale identifier; language subtags have at least two letters.
const MIN_LOCALE_ID_LEN: usize = 2;

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("Failed to read locale folder '{}': {source}", path.display())]
    ReadFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Locale folder '{folder}' is relative, but no workspace is open")]
    NoWorkspace { folder: String },

    #[error("Invalid locale folder pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// A locale and the translation file that holds its messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// File name without `.json`, e.g. `en` or `pt-BR`.
    pub id: String,
    pub file_path: PathBuf,
}

impl Locale {
    /// Directory containing the translation file.
    #[must_use]
    pub fn folder(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Lists the locales available in `folder`, sorted by identifier.
///
/// An absolute folder is listed directly. A workspace-relative folder is
/// searched for `<folder>/*.json` under `workspace_root`, honoring ignore
/// files; both branches yield bare locale identifiers.
///
/// # Errors
/// - The absolute folder cannot be read
/// - The folder is relative and there is no workspace
/// - The relative folder is not a valid glob
pub fn discover_locales(
    folder: &LocaleFolder,
    workspace_root: Option<&Path>,
) -> Result<Vec<Locale>, LocaleError> {
    let mut locales = match folder {
        LocaleFolder::Absolute(path) => list_folder(path)?,
        LocaleFolder::WorkspaceRelative(relative) => {
            let Some(root) = workspace_root else {
                return Err(LocaleError::NoWorkspace { folder: relative.clone() });
            };
            search_workspace(root, relative)?
        }
    };

    locales.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.file_path.cmp(&b.file_path)));
    tracing::debug!(%folder, count = locales.len(), "Discovered locales");
    Ok(locales)
}

/// Derives the locale identifier from a file name such as `en.json`.
///
/// Names not ending in `.json`, or whose base name is too short to be a
/// locale (`a.json`), yield `None`.
fn locale_id(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(JSON_EXTENSION).filter(|id| id.chars().count() >= MIN_LOCALE_ID_LEN)
}

fn list_folder(path: &Path) -> Result<Vec<Locale>, LocaleError> {
    let entries = std::fs::read_dir(path)
        .map_err(|source| LocaleError::ReadFolder { path: path.to_path_buf(), source })?;

    let mut locales = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                tracing::debug!(%error, "Failed to read directory entry");
                continue;
            }
        };

        if entry.file_type().is_ok_and(|ft| ft.is_dir()) {
            continue;
        }

        let file_name = entry.file_name();
        let Some(id) = file_name.to_str().and_then(locale_id) else {
            continue;
        };

        locales.push(Locale { id: id.to_string(), file_path: entry.path() });
    }

    Ok(locales)
}

fn search_workspace(workspace_root: &Path, relative: &str) -> Result<Vec<Locale>, LocaleError> {
    let pattern = if relative.is_empty() {
        format!("*{JSON_EXTENSION}")
    } else {
        format!("{relative}/*{JSON_EXTENSION}")
    };
    let matcher = build_matcher(&pattern)?;

    let mut walker = WalkBuilder::new(workspace_root);
    walker
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .filter_entry(|entry| entry.file_name() != GIT_DIR);
    if !has_glob_syntax(relative) {
        let depth = if relative.is_empty() { 1 } else { relative.split('/').count() + 1 };
        walker.max_depth(Some(depth));
    }

    let mut locales = Vec::new();
    for result in walker.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(workspace_root) else {
            continue;
        };
        if !matcher.is_match(relative_path) {
            continue;
        }

        let Some(id) = path.file_name().and_then(|name| name.to_str()).and_then(locale_id) else {
            continue;
        };

        locales.push(Locale { id: id.to_string(), file_path: path.to_path_buf() });
    }

    Ok(locales)
}

fn build_matcher(pattern: &str) -> Result<GlobMatcher, LocaleError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| LocaleError::InvalidPattern { pattern: pattern.to_string(), source })
}
