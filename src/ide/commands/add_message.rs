//! `translationManager.addLocalizedMessage`: add one message to every locale.
//!
//! The flow resolves the locale folder (asking for one when the configured
//! folder has no locales), asks for the message key, then asks for and
//! stores one translation per locale. Cancelling the folder or key prompt
//! aborts without touching any file; cancelling a locale prompt skips that
//! locale only.

use std::path::{
    Path,
    PathBuf,
};

use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::ConfigManager;
use crate::ide::ui::EditorUi;
use crate::locale::{
    Locale,
    LocaleFolder,
    discover_locales,
};
use crate::translation::{
    MessageKey,
    persist_translation,
};

/// Command identifier advertised in `executeCommandProvider`.
pub const COMMAND: &str = "translationManager.addLocalizedMessage";

const SELECT_FOLDER_MESSAGE: &str = "Please select your locale folder";
const BROWSE_ACTION: &str = "Browse";
const NO_FOLDER_MESSAGE: &str = "Translation Manager doesn't work without a valid locale folder.";
const KEY_PROMPT: &str = "Enter the message identifier";

/// How long the success message stays visible.
const STATUS_TIMEOUT_MS: u32 = 4000;

/// What a completed run did, returned to the client as the command result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMessageReport {
    pub key: String,
    pub locale_folder: String,
    /// Locales whose translation was written.
    ///
    /// Locales sharing an id are followed by their folder, as in `en (app/locales)`.
    pub stored: Vec<String>,
    /// Locales whose prompt was cancelled.
    pub skipped: Vec<String>,
    /// Locales whose file could not be written.
    pub failed: Vec<String>,
}

/// Runs the whole command.
///
/// `default_key` pre-fills the key prompt, usually with the editor selection.
/// Returns `None` when the run was aborted before any locale was processed.
pub async fn add_localized_message<U>(
    ui: &U,
    config: &Mutex<ConfigManager>,
    default_key: Option<String>,
) -> Option<AddMessageReport>
where
    U: EditorUi + ?Sized,
{
    let (folder, locales) = resolve_locale_folder(ui, config).await?;
    if locales.is_empty() {
        ui.show_warning_message(&format!("No locale files (*.json) were found in '{folder}'."))
            .await;
        return None;
    }

    let input = ui.show_input_box(KEY_PROMPT, default_key.as_deref()).await;
    let Some(key) = input.as_deref().and_then(MessageKey::parse) else {
        tracing::debug!("No message key entered, aborting");
        return None;
    };

    tracing::info!(%key, %folder, locales = locales.len(), "Adding localized message");

    let mut report = AddMessageReport {
        key: key.to_string(),
        locale_folder: folder.to_setting(),
        stored: Vec::new(),
        skipped: Vec::new(),
        failed: Vec::new(),
    };

    let workspace_root = config.lock().await.workspace_root().cloned();
    let labels = locale_labels(&locales, workspace_root.as_deref());

    for (locale, label) in locales.iter().zip(labels) {
        let prompt = format!("Enter the localized message for the locale '{label}'");
        let Some(translation) = ui.show_input_box(&prompt, None).await else {
            tracing::debug!(locale = %label, "Translation prompt cancelled");
            report.skipped.push(label);
            continue;
        };

        match persist_translation(locale.folder(), &locale.id, &key, &translation).await {
            Ok(_) => {
                ui.set_status_message(
                    &format!("Successfully stored the '{label}' translation of '{key}'."),
                    STATUS_TIMEOUT_MS,
                )
                .await;
                report.stored.push(label);
            }
            Err(error) => {
                ui.show_error_message(&format!("Storing the translation failed: {error}")).await;
                report.failed.push(label);
            }
        }
    }

    Some(report)
}

/// Returns the locale folder to use together with its locales.
///
/// The configured folder is used when it has at least one locale. Otherwise
/// the user is asked to browse for a folder, which is then saved to the
/// workspace settings (or the user settings when no workspace is open).
/// Returns `None` when the user declines or cancels.
pub async fn resolve_locale_folder<U>(
    ui: &U,
    config: &Mutex<ConfigManager>,
) -> Option<(LocaleFolder, Vec<Locale>)>
where
    U: EditorUi + ?Sized,
{
    let (configured, workspace_root) = {
        let mut config = config.lock().await;
        if let Err(error) = config.reload() {
            tracing::warn!(%error, "Failed to reload configuration, using previous settings");
        }
        (config.get_settings().locale_folder(), config.workspace_root().cloned())
    };

    if let Some(folder) = configured {
        match discover_locales(&folder, workspace_root.as_deref()) {
            Ok(locales) if !locales.is_empty() => return Some((folder, locales)),
            Ok(_) => tracing::debug!(%folder, "Configured locale folder has no locales"),
            Err(error) => tracing::warn!(%error, "Configured locale folder is not usable"),
        }
    }

    ui.show_information_message(SELECT_FOLDER_MESSAGE, &[BROWSE_ACTION]).await?;

    let Some(picked) = ui.show_open_folder_dialog(workspace_root.as_deref()).await else {
        ui.show_error_message(NO_FOLDER_MESSAGE).await;
        return None;
    };

    let folder = LocaleFolder::from_picked(&picked, workspace_root.as_deref());
    if let Err(error) = save_locale_folder(config, &folder).await {
        ui.show_error_message(&format!("Saving the locale folder failed: {error}")).await;
    }

    match discover_locales(&folder, workspace_root.as_deref()) {
        Ok(locales) => Some((folder, locales)),
        Err(error) => {
            ui.show_error_message(&error.to_string()).await;
            Some((folder, Vec::new()))
        }
    }
}

/// Names shown for each locale: the id, followed by the locale's folder when
/// another locale shares the id (`en (app/locales)`).
///
/// Folders inside the workspace are shown relative to its root.
fn locale_labels(locales: &[Locale], workspace_root: Option<&Path>) -> Vec<String> {
    locales
        .iter()
        .map(|locale| {
            let shared = locales.iter().filter(|other| other.id == locale.id).count() > 1;
            if !shared {
                return locale.id.clone();
            }
            let folder = locale.folder();
            let shown = workspace_root
                .and_then(|root| folder.strip_prefix(root).ok())
                .filter(|relative| !relative.as_os_str().is_empty())
                .unwrap_or(folder);
            format!("{} ({})", locale.id, shown.display())
        })
        .collect()
}

/// Writes `folder` to the settings scope matching the current workspace state.
async fn save_locale_folder(
    config: &Mutex<ConfigManager>,
    folder: &LocaleFolder,
) -> Result<PathBuf, crate::config::ConfigError> {
    let mut config = config.lock().await;
    let scope = config.write_scope();
    let path = config.update_locale_folder(folder, scope)?;
    drop(config);

    tracing::info!(%folder, ?scope, path = %path.display(), "Locale folder saved");
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::{
        Value,
        json,
    };
    use tempfile::TempDir;

    use super::*;
    use crate::test_utils::{
        ScriptedUi,
        UiEvent,
    };

    /// A workspace with a `locales` folder and its own user settings directory.
    struct Fixture {
        workspace: TempDir,
        user_dir: TempDir,
    }

    impl Fixture {
        fn new(locale_files: &[&str]) -> Self {
            let workspace = TempDir::new().unwrap();
            let locales = workspace.path().join("locales");
            fs::create_dir_all(&locales).unwrap();
            for name in locale_files {
                fs::write(locales.join(name), "{}").unwrap();
            }
            Self { workspace, user_dir: TempDir::new().unwrap() }
        }

        fn locales_dir(&self) -> PathBuf {
            self.workspace.path().join("locales")
        }

        fn config(&self, locale_folder: Option<&str>) -> Mutex<ConfigManager> {
            if let Some(folder) = locale_folder {
                fs::write(
                    self.workspace.path().join(".translation-manager.json"),
                    json!({ "localeFolder": folder }).to_string(),
                )
                .unwrap();
            }
            let mut manager = ConfigManager::with_user_config_path(Some(
                self.user_dir.path().join("settings.json"),
            ));
            manager.load_settings(Some(self.workspace.path().to_path_buf())).unwrap();
            Mutex::new(manager)
        }

        fn read_locale(&self, locale: &str) -> Value {
            let content = fs::read_to_string(self.locales_dir().join(format!("{locale}.json")));
            serde_json::from_str(&content.unwrap()).unwrap()
        }
    }

    fn input(text: &str) -> Option<String> {
        Some(text.to_string())
    }

    #[rstest]
    #[tokio::test]
    async fn stores_translation_for_every_locale() {
        let fixture = Fixture::new(&["fr.json", "en.json"]);
        let config = fixture.config(Some("locales"));
        let ui = ScriptedUi::new(vec![input("common.save"), input("Save"), input("Enregistrer")]);

        let report = add_localized_message(&ui, &config, None).await.unwrap();

        assert_that!(report.key, eq("common.save"));
        assert_that!(report.locale_folder, eq("locales"));
        assert_that!(report.stored, elements_are![eq("en"), eq("fr")]);
        assert_that!(report.skipped, is_empty());
        assert_that!(report.failed, is_empty());
        assert_that!(fixture.read_locale("en"), eq(&json!({ "common": { "save": "Save" } })));
        assert_that!(
            fixture.read_locale("fr"),
            eq(&json!({ "common": { "save": "Enregistrer" } }))
        );
        assert_that!(
            ui.events(),
            contains(eq(&UiEvent::Status(
                "Successfully stored the 'en' translation of 'common.save'.".to_string()
            )))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn prompts_in_locale_order_with_selection_as_default_key() {
        let fixture = Fixture::new(&["en.json", "de.json"]);
        let config = fixture.config(Some("locales"));
        let ui = ScriptedUi::new(vec![input("greeting"), input("Hallo"), input("Hello")]);

        add_localized_message(&ui, &config, Some("greeting".to_string())).await.unwrap();

        assert_that!(
            ui.input_prompts(),
            elements_are![
                eq(&("Enter the message identifier".to_string(), Some("greeting".to_string()))),
                eq(&("Enter the localized message for the locale 'de'".to_string(), None)),
                eq(&("Enter the localized message for the locale 'en'".to_string(), None)),
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn locales_sharing_an_id_are_told_apart_by_folder() {
        let fixture = Fixture::new(&[]);
        for dir in ["app/locales", "lib/locales"] {
            let path = fixture.workspace.path().join(dir);
            fs::create_dir_all(&path).unwrap();
            fs::write(path.join("en.json"), "{}").unwrap();
        }
        let config = fixture.config(Some("**/locales"));
        let ui = ScriptedUi::new(vec![input("hello"), input("Hello app"), input("Hello lib")]);

        let report = add_localized_message(&ui, &config, None).await.unwrap();

        let prompts: Vec<String> = ui.input_prompts().into_iter().map(|(prompt, _)| prompt).collect();
        assert_that!(
            prompts,
            elements_are![
                eq("Enter the message identifier"),
                eq("Enter the localized message for the locale 'en (app/locales)'"),
                eq("Enter the localized message for the locale 'en (lib/locales)'"),
            ]
        );
        assert_that!(report.stored, elements_are![eq("en (app/locales)"), eq("en (lib/locales)")]);
        let lib: Value = serde_json::from_str(
            &fs::read_to_string(fixture.workspace.path().join("lib/locales/en.json")).unwrap(),
        )
        .unwrap();
        assert_that!(lib, eq(&json!({ "hello": "Hello lib" })));
    }

    #[rstest]
    #[tokio::test]
    async fn merges_into_existing_translations() {
        let fixture = Fixture::new(&["en.json"]);
        fs::write(
            fixture.locales_dir().join("en.json"),
            r#"{"title": "Title", "common": {"cancel": "Cancel"}}"#,
        )
        .unwrap();
        let config = fixture.config(Some("locales"));
        let ui = ScriptedUi::new(vec![input("common.save"), input("Save")]);

        add_localized_message(&ui, &config, None).await.unwrap();

        assert_that!(
            fixture.read_locale("en"),
            eq(&json!({ "title": "Title", "common": { "cancel": "Cancel", "save": "Save" } }))
        );
    }

    #[rstest]
    #[case::cancelled(None)]
    #[case::empty(input(""))]
    #[tokio::test]
    async fn missing_key_aborts_without_writes(#[case] key: Option<String>) {
        let fixture = Fixture::new(&["en.json", "fr.json"]);
        let config = fixture.config(Some("locales"));
        let ui = ScriptedUi::new(vec![key]);

        let report = add_localized_message(&ui, &config, None).await;

        assert_that!(report, none());
        assert_that!(ui.input_prompts(), len(eq(1)));
        assert_that!(fs::read_to_string(fixture.locales_dir().join("en.json")).unwrap(), eq("{}"));
        assert_that!(fs::read_to_string(fixture.locales_dir().join("fr.json")).unwrap(), eq("{}"));
    }

    #[rstest]
    #[tokio::test]
    async fn cancelled_locale_prompt_skips_only_that_locale() {
        let fixture = Fixture::new(&["en.json", "fr.json", "ja.json"]);
        let config = fixture.config(Some("locales"));
        let ui = ScriptedUi::new(vec![input("hello"), input("Hello"), None, input("こんにちは")]);

        let report = add_localized_message(&ui, &config, None).await.unwrap();

        assert_that!(report.stored, elements_are![eq("en"), eq("ja")]);
        assert_that!(report.skipped, elements_are![eq("fr")]);
        assert_that!(fixture.read_locale("fr"), eq(&json!({})));
        assert_that!(fixture.read_locale("ja"), eq(&json!({ "hello": "こんにちは" })));
    }

    #[rstest]
    #[tokio::test]
    async fn empty_translation_is_stored() {
        let fixture = Fixture::new(&["en.json"]);
        let config = fixture.config(Some("locales"));
        let ui = ScriptedUi::new(vec![input("hello"), input("")]);

        let report = add_localized_message(&ui, &config, None).await.unwrap();

        assert_that!(report.stored, elements_are![eq("en")]);
        assert_that!(fixture.read_locale("en"), eq(&json!({ "hello": "" })));
    }

    #[rstest]
    #[tokio::test]
    async fn write_failure_does_not_block_later_locales() {
        let fixture = Fixture::new(&["en.json", "fr.json"]);
        let config = fixture.config(Some("locales"));
        let en_file = fixture.locales_dir().join("en.json");
        // Turning the file into a directory makes the write fail.
        let ui = ScriptedUi::new(vec![input("hello"), input("Hello"), input("Bonjour")])
            .on_prompt("Enter the localized message for the locale 'en'", move || {
                fs::remove_file(&en_file).unwrap();
                fs::create_dir(&en_file).unwrap();
            });

        let report = add_localized_message(&ui, &config, None).await.unwrap();

        assert_that!(report.failed, elements_are![eq("en")]);
        assert_that!(report.stored, elements_are![eq("fr")]);
        assert_that!(fixture.read_locale("fr"), eq(&json!({ "hello": "Bonjour" })));
        assert!(ui.events().iter().any(|event| matches!(
            event,
            UiEvent::Error(message) if message.starts_with("Storing the translation failed:")
        )));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_folder_declined_aborts_silently() {
        let fixture = Fixture::new(&["en.json"]);
        let config = fixture.config(None);
        let ui = ScriptedUi::new(vec![]);

        let report = add_localized_message(&ui, &config, None).await;

        assert_that!(report, none());
        assert_that!(
            ui.events(),
            elements_are![eq(&UiEvent::Information("Please select your locale folder".to_string()))]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn browsed_folder_is_saved_relative_to_workspace() {
        let fixture = Fixture::new(&["en.json"]);
        let config = fixture.config(None);
        let ui = ScriptedUi::new(vec![input("hello"), input("Hello")])
            .with_browse()
            .with_picked_folder(fixture.locales_dir());

        let report = add_localized_message(&ui, &config, None).await.unwrap();

        assert_that!(report.locale_folder, eq("locales"));
        assert_that!(fixture.read_locale("en"), eq(&json!({ "hello": "Hello" })));
        let saved: Value = serde_json::from_str(
            &fs::read_to_string(fixture.workspace.path().join(".translation-manager.json"))
                .unwrap(),
        )
        .unwrap();
        assert_that!(saved, eq(&json!({ "localeFolder": "locales" })));
        assert_that!(
            ui.events(),
            contains(eq(&UiEvent::OpenDialog(Some(fixture.workspace.path().to_path_buf()))))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn folder_without_locales_asks_to_browse() {
        let fixture = Fixture::new(&["en.json"]);
        fs::create_dir_all(fixture.workspace.path().join("empty")).unwrap();
        let config = fixture.config(Some("empty"));
        let ui = ScriptedUi::new(vec![input("hello"), input("Hello")])
            .with_browse()
            .with_picked_folder(fixture.locales_dir());

        let report = add_localized_message(&ui, &config, None).await.unwrap();

        assert_that!(report.stored, elements_are![eq("en")]);
        assert_that!(
            config.lock().await.get_settings().locale_folder.as_deref(),
            some(eq("locales"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn cancelled_dialog_reports_missing_folder() {
        let fixture = Fixture::new(&["en.json"]);
        let config = fixture.config(None);
        let ui = ScriptedUi::new(vec![input("hello")]).with_browse();

        let report = add_localized_message(&ui, &config, None).await;

        assert_that!(report, none());
        assert_that!(
            ui.events().last(),
            some(eq(&UiEvent::Error(
                "Translation Manager doesn't work without a valid locale folder.".to_string()
            )))
        );
        assert_that!(ui.input_prompts(), is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn picked_folder_without_locales_warns() {
        let fixture = Fixture::new(&[]);
        let config = fixture.config(None);
        let ui = ScriptedUi::new(vec![input("hello")])
            .with_browse()
            .with_picked_folder(fixture.locales_dir());

        let report = add_localized_message(&ui, &config, None).await;

        assert_that!(report, none());
        assert!(matches!(
            ui.events().last(),
            Some(UiEvent::Warning(message)) if message.contains("No locale files")
        ));
        assert_that!(ui.input_prompts(), is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn absolute_folder_outside_workspace_is_saved_absolute() {
        let fixture = Fixture::new(&[]);
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("en.json"), "{}").unwrap();
        let config = fixture.config(None);
        let ui = ScriptedUi::new(vec![input("a.b"), input("v")])
            .with_browse()
            .with_picked_folder(outside.path().to_path_buf());

        let report = add_localized_message(&ui, &config, None).await.unwrap();

        let expected_setting = outside.path().to_string_lossy().into_owned();
        assert_that!(report.locale_folder, eq(&expected_setting));
        let written: Value = serde_json::from_str(
            &fs::read_to_string(outside.path().join("en.json")).unwrap(),
        )
        .unwrap();
        assert_that!(written, eq(&json!({ "a": { "b": "v" } })));
    }
}
