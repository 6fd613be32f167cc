//! Test helpers shared by the command tests.
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Mutex;

use crate::ide::ui::EditorUi;

/// Something the command showed or asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UiEvent {
    Input { prompt: String, value: Option<String> },
    Information(String),
    OpenDialog(Option<PathBuf>),
    Error(String),
    Warning(String),
    Status(String),
}

type PromptHook = (String, Box<dyn FnOnce() + Send>);

/// [`EditorUi`] answering prompts from a script and recording everything shown.
#[derive(Default)]
pub(crate) struct ScriptedUi {
    inputs: Mutex<VecDeque<Option<String>>>,
    browse: bool,
    picked_folder: Option<PathBuf>,
    hook: Mutex<Option<PromptHook>>,
    events: Mutex<Vec<UiEvent>>,
}

impl ScriptedUi {
    /// Answers input boxes with `inputs` in order; further boxes are cancelled.
    pub(crate) fn new(inputs: Vec<Option<String>>) -> Self {
        Self { inputs: Mutex::new(inputs.into()), ..Self::default() }
    }

    /// Chooses "Browse" when asked to select a locale folder.
    pub(crate) fn with_browse(mut self) -> Self {
        self.browse = true;
        self
    }

    /// Picks `folder` in the folder dialog instead of cancelling it.
    pub(crate) fn with_picked_folder(mut self, folder: PathBuf) -> Self {
        self.picked_folder = Some(folder);
        self
    }

    /// Runs `hook` once, right before answering the input box showing `prompt`.
    pub(crate) fn on_prompt(self, prompt: &str, hook: impl FnOnce() + Send + 'static) -> Self {
        *self.hook.lock().unwrap() = Some((prompt.to_string(), Box::new(hook)));
        self
    }

    pub(crate) fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Prompts and pre-filled values of every input box shown.
    pub(crate) fn input_prompts(&self) -> Vec<(String, Option<String>)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::Input { prompt, value } => Some((prompt, value)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[tower_lsp::async_trait]
impl EditorUi for ScriptedUi {
    async fn show_input_box(&self, prompt: &str, value: Option<&str>) -> Option<String> {
        self.record(UiEvent::Input {
            prompt: prompt.to_string(),
            value: value.map(ToString::to_string),
        });

        let hook = {
            let mut hook = self.hook.lock().unwrap();
            if hook.as_ref().is_some_and(|(expected, _)| expected == prompt) {
                hook.take()
            } else {
                None
            }
        };
        if let Some((_, run)) = hook {
            run();
        }

        self.inputs.lock().unwrap().pop_front().flatten()
    }

    async fn show_information_message(&self, message: &str, actions: &[&str]) -> Option<String> {
        self.record(UiEvent::Information(message.to_string()));
        if self.browse { actions.first().map(ToString::to_string) } else { None }
    }

    async fn show_open_folder_dialog(&self, default_folder: Option<&Path>) -> Option<PathBuf> {
        self.record(UiEvent::OpenDialog(default_folder.map(Path::to_path_buf)));
        self.picked_folder.clone()
    }

    async fn show_error_message(&self, message: &str) {
        self.record(UiEvent::Error(message.to_string()));
    }

    async fn show_warning_message(&self, message: &str) {
        self.record(UiEvent::Warning(message.to_string()));
    }

    async fn set_status_message(&self, message: &str, _timeout_ms: u32) {
        self.record(UiEvent::Status(message.to_string()));
    }
}
