//! The configured location of the translation files.

use std::fmt;
use std::path::{
    Component,
    Path,
    PathBuf,
};

/// Where the per-locale JSON files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleFolder {
    /// An absolute directory, listed directly.
    Absolute(PathBuf),
    /// A path (or glob base) relative to the workspace root, always `/`-separated.
    WorkspaceRelative(String),
}

impl LocaleFolder {
    /// Interprets a `localeFolder` setting value.
    ///
    /// Relative values are normalized to `/`-separated segments without
    /// `.` or empty segments, so `./locales/` becomes `locales`. A value
    /// naming the workspace root itself (`.`) becomes the empty path.
    #[must_use]
    pub fn parse(setting: &str) -> Self {
        let path = Path::new(setting);
        if path.is_absolute() {
            Self::Absolute(path.to_path_buf())
        } else {
            let relative = setting.replace('\\', "/");
            let segments: Vec<&str> =
                relative.split('/').filter(|segment| !matches!(*segment, "" | ".")).collect();
            Self::WorkspaceRelative(segments.join("/"))
        }
    }

    /// Builds the folder to remember for a directory picked in a dialog.
    ///
    /// Directories strictly inside the workspace are stored relative to it,
    /// everything else (including the workspace root itself) as an absolute path.
    #[must_use]
    pub fn from_picked(picked: &Path, workspace_root: Option<&Path>) -> Self {
        let relative = workspace_root
            .and_then(|root| picked.strip_prefix(root).ok())
            .and_then(to_slash_path);

        relative.map_or_else(|| Self::Absolute(picked.to_path_buf()), Self::WorkspaceRelative)
    }

    /// The directory this folder denotes, if it can be determined without a search.
    ///
    /// A relative folder containing glob syntax has no single directory.
    #[must_use]
    pub fn resolve(&self, workspace_root: Option<&Path>) -> Option<PathBuf> {
        match self {
            Self::Absolute(path) => Some(path.clone()),
            Self::WorkspaceRelative(relative) if !has_glob_syntax(relative) => {
                workspace_root.map(|root| root.join(relative))
            }
            Self::WorkspaceRelative(_) => None,
        }
    }

    /// The value written back to the `localeFolder` setting.
    #[must_use]
    pub fn to_setting(&self) -> String {
        match self {
            Self::Absolute(path) => path.to_string_lossy().into_owned(),
            Self::WorkspaceRelative(relative) => relative.clone(),
        }
    }
}

impl fmt::Display for LocaleFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_setting())
    }
}

/// Returns true if `pattern` contains characters with a meaning in glob syntax.
pub(super) fn has_glob_syntax(pattern: &str) -> bool {
    pattern.contains(&['*', '?', '[', ']', '{', '}'])
}

/// Joins normal path components with `/`; `None` if the path is empty or leaves its base.
fn to_slash_path(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.to_string()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() { None } else { Some(parts.join("/")) }
}
