use std::sync::Arc;

use dt_core::{ChoiceButton, DialogTreeError, ErrorKind, LogEntry, NodeKind};
use dt_parser::{parse_tree_json, LoadOptions};
use dt_runtime::{ConversationEngine, ConversationEngineOptions, ConversationObserver};
use serde::Serialize;

use crate::TreeSource;

pub enum WidgetPhase {
    /// Waiting on the one-time tree fetch. Nothing is interactive yet.
    Loading,
    Ready(ConversationEngine),
    Failed(DialogTreeError),
}

#[derive(Clone, Default)]
pub struct ChatWidgetOptions {
    pub load_options: LoadOptions,
    pub observer: Option<Arc<dyn ConversationObserver>>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetView {
    pub loading: bool,
    pub load_error: Option<String>,
    pub entries: Vec<LogEntry>,
    pub kind: Option<NodeKind>,
    pub choices: Vec<ChoiceButton>,
    pub options: Vec<ChoiceButton>,
    pub message: String,
    pub draft: String,
    pub minimized: bool,
}

/// A chat session from fetch to end: owns the draft text box and the engine
/// once the tree has arrived.
pub struct ChatWidget {
    phase: WidgetPhase,
    options: ChatWidgetOptions,
    draft: String,
    minimized: bool,
}

impl ChatWidget {
    pub fn new(options: ChatWidgetOptions) -> Self {
        Self {
            phase: WidgetPhase::Loading,
            options,
            draft: String::new(),
            minimized: false,
        }
    }

    pub fn phase(&self) -> &WidgetPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, WidgetPhase::Loading)
    }

    pub fn load_error(&self) -> Option<&DialogTreeError> {
        match &self.phase {
            WidgetPhase::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Fetches from `source` and completes the load with the result.
    pub fn load_from(&mut self, source: &dyn TreeSource) -> Result<(), DialogTreeError> {
        self.ensure_loading()?;
        let payload = source.fetch();
        self.finish_load(payload)
    }

    /// Completes the pending load with a fetched payload (or the fetch
    /// failure). On success the conversation starts right away; a start node
    /// that does not resolve leaves the widget ready but frozen and returns
    /// that traversal error.
    pub fn finish_load(
        &mut self,
        payload: Result<String, DialogTreeError>,
    ) -> Result<(), DialogTreeError> {
        self.ensure_loading()?;

        let tree = payload
            .map_err(as_load_error)
            .and_then(|raw| parse_tree_json(&raw, self.options.load_options));
        let tree = match tree {
            Ok(tree) => tree,
            Err(error) => {
                log::error!("{}", error);
                if let Some(observer) = &self.options.observer {
                    observer.on_error(&error);
                }
                self.phase = WidgetPhase::Failed(error.clone());
                return Err(error);
            }
        };

        let mut engine_options = ConversationEngineOptions::new(Arc::new(tree));
        engine_options.observer = self.options.observer.clone();
        let mut engine = ConversationEngine::new(engine_options);
        engine.set_minimized(self.minimized);
        let started = engine.start();
        self.phase = WidgetPhase::Ready(engine);
        started
    }

    pub fn engine(&self) -> Result<&ConversationEngine, DialogTreeError> {
        match &self.phase {
            WidgetPhase::Ready(engine) => Ok(engine),
            WidgetPhase::Loading => Err(not_loaded()),
            WidgetPhase::Failed(error) => Err(error.clone()),
        }
    }

    pub fn engine_mut(&mut self) -> Result<&mut ConversationEngine, DialogTreeError> {
        match &mut self.phase {
            WidgetPhase::Ready(engine) => Ok(engine),
            WidgetPhase::Loading => Err(not_loaded()),
            WidgetPhase::Failed(error) => Err(error.clone()),
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Sends the draft as free-text input. The draft is cleared only when the
    /// engine accepts it.
    pub fn submit_draft(&mut self) -> Result<(), DialogTreeError> {
        let draft = self.draft.clone();
        let engine = self.engine_mut()?;
        match engine.submit_input(&draft) {
            Ok(()) => {
                self.draft.clear();
                Ok(())
            }
            Err(error) if error.kind == ErrorKind::Traversal => {
                self.draft.clear();
                Err(error)
            }
            Err(error) => Err(error),
        }
    }

    pub fn select_answer_at(&mut self, index: usize) -> Result<(), DialogTreeError> {
        self.engine_mut()?.select_answer_at(index)
    }

    pub fn is_minimized(&self) -> bool {
        match &self.phase {
            WidgetPhase::Ready(engine) => engine.is_minimized(),
            _ => self.minimized,
        }
    }

    pub fn toggle_minimized(&mut self) -> bool {
        self.minimized = !self.is_minimized();
        if let WidgetPhase::Ready(engine) = &mut self.phase {
            engine.set_minimized(self.minimized);
        }
        self.minimized
    }

    pub fn view(&self) -> WidgetView {
        let mut view = WidgetView {
            loading: self.is_loading(),
            load_error: self.load_error().map(ToString::to_string),
            entries: Vec::new(),
            kind: None,
            choices: Vec::new(),
            options: Vec::new(),
            message: String::new(),
            draft: self.draft.clone(),
            minimized: self.is_minimized(),
        };
        if let WidgetPhase::Ready(engine) = &self.phase {
            view.entries = engine.log().snapshot();
            view.kind = engine.kind();
            view.choices = engine.choices();
            view.options = engine.options();
            view.message = engine.message().to_string();
        }
        view
    }

    fn ensure_loading(&self) -> Result<(), DialogTreeError> {
        if self.is_loading() {
            Ok(())
        } else {
            Err(DialogTreeError::state(
                "API_ALREADY_LOADED",
                "Tree load has already completed for this widget.",
            ))
        }
    }
}

fn not_loaded() -> DialogTreeError {
    DialogTreeError::state("API_NOT_LOADED", "Dialog tree has not finished loading.")
}

fn as_load_error(error: DialogTreeError) -> DialogTreeError {
    if error.kind == ErrorKind::Load {
        error
    } else {
        DialogTreeError::load("API_FETCH_FAILED", error.to_string())
    }
}
