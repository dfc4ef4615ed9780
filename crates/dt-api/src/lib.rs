use std::sync::Arc;

use dt_core::{DialogTreeError, TreeDefinition};
use dt_parser::{parse_tree_json, LoadOptions};
use dt_runtime::{ConversationEngine, ConversationEngineOptions, ConversationObserver};

mod redirect;
mod widget;

pub use redirect::{RedirectRule, RedirectRules};
pub use widget::{ChatWidget, ChatWidgetOptions, WidgetPhase, WidgetView};

/// Transport seam for the tree payload (HTTP, document store, file...).
pub trait TreeSource {
    fn fetch(&self) -> Result<String, DialogTreeError>;

    fn describe(&self) -> String {
        "tree source".to_string()
    }
}

/// Serves a payload held in memory.
#[derive(Debug, Clone)]
pub struct StaticTreeSource {
    payload: String,
}

impl StaticTreeSource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl TreeSource for StaticTreeSource {
    fn fetch(&self) -> Result<String, DialogTreeError> {
        Ok(self.payload.clone())
    }

    fn describe(&self) -> String {
        "inline payload".to_string()
    }
}

#[derive(Clone, Default)]
pub struct CreateEngineFromJsonOptions {
    pub tree_json: String,
    pub load_options: LoadOptions,
    pub observer: Option<Arc<dyn ConversationObserver>>,
}

pub fn load_tree(
    source: &dyn TreeSource,
    load_options: LoadOptions,
) -> Result<TreeDefinition, DialogTreeError> {
    let raw = source.fetch()?;
    parse_tree_json(&raw, load_options)
}

/// Loads, builds and starts an engine in one step. Any failure, including a
/// start node that does not resolve, is returned as an error.
pub fn create_engine_from_json(
    options: CreateEngineFromJsonOptions,
) -> Result<ConversationEngine, DialogTreeError> {
    let tree = match parse_tree_json(&options.tree_json, options.load_options) {
        Ok(tree) => tree,
        Err(error) => {
            log::error!("{}", error);
            if let Some(observer) = &options.observer {
                observer.on_error(&error);
            }
            return Err(error);
        }
    };

    let mut engine = ConversationEngine::new(ConversationEngineOptions {
        tree: Arc::new(tree),
        observer: options.observer,
    });
    engine.start()?;
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dt_core::ErrorKind;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ErrorLog {
        codes: Mutex<Vec<String>>,
    }

    impl ConversationObserver for ErrorLog {
        fn on_error(&self, error: &DialogTreeError) {
            self.codes
                .lock()
                .expect("lock should succeed")
                .push(error.code.clone());
        }
    }

    const TREE: &str = r#"{"data": {
        "startNode": "a",
        "nodes": {
            "a": {"kind": "question", "text": "Hi", "answers": [{"text": "Go", "next": "b"}]},
            "b": {"kind": "statement", "text": "Bye"}
        }
    }}"#;

    struct FailingSource;

    impl TreeSource for FailingSource {
        fn fetch(&self) -> Result<String, DialogTreeError> {
            Err(DialogTreeError::load("API_FETCH_FAILED", "unreachable"))
        }
    }

    #[test]
    fn create_engine_from_json_starts_engine() {
        let engine = create_engine_from_json(CreateEngineFromJsonOptions {
            tree_json: TREE.to_string(),
            ..Default::default()
        })
        .expect("engine should build");
        assert_eq!(engine.log().pairs(), vec![("bot", "Hi")]);
        assert_eq!(engine.choices().len(), 1);
    }

    #[test]
    fn create_engine_from_json_returns_load_errors() {
        let error = create_engine_from_json(CreateEngineFromJsonOptions {
            tree_json: "not json".to_string(),
            ..Default::default()
        })
        .err()
        .expect("bad json should fail");
        assert_eq!(error.kind, ErrorKind::Load);
    }

    #[test]
    fn create_engine_from_json_reports_load_errors_to_observer() {
        let errors = Arc::new(ErrorLog::default());
        let error = create_engine_from_json(CreateEngineFromJsonOptions {
            tree_json: r#"{"startNode": "a"}"#.to_string(),
            observer: Some(errors.clone()),
            ..Default::default()
        })
        .err()
        .expect("payload without nodes should fail");
        assert_eq!(error.code, "LOAD_NODES_MISSING");
        assert_eq!(
            *errors.codes.lock().expect("lock should succeed"),
            vec!["LOAD_NODES_MISSING".to_string()]
        );
    }

    #[test]
    fn create_engine_from_json_returns_start_traversal_error() {
        let error = create_engine_from_json(CreateEngineFromJsonOptions {
            tree_json: r#"{"startNode": "z", "nodes": {"a": {"kind": "statement", "text": "a"}}}"#
                .to_string(),
            ..Default::default()
        })
        .err()
        .expect("missing start should fail");
        assert_eq!(error.kind, ErrorKind::Traversal);
    }

    #[test]
    fn load_tree_uses_source() {
        let tree = load_tree(&StaticTreeSource::new(TREE), LoadOptions::default())
            .expect("tree should load");
        assert_eq!(tree.start_node, "a");

        let error = load_tree(&FailingSource, LoadOptions::default()).expect_err("fetch fails");
        assert_eq!(error.code, "API_FETCH_FAILED");
    }
}
