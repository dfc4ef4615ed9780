use std::sync::Arc;

use dt_core::{ChoiceButton, DialogTreeError, Node, NodeId, NodeKind, TreeDefinition};

use crate::{interpolate, ConversationLog, ConversationObserver, NoopObserver, VariableStore};

mod lifecycle;
mod transitions;
mod view;


#[derive(Clone)]
pub struct ConversationEngineOptions {
    pub tree: Arc<TreeDefinition>,
    pub observer: Option<Arc<dyn ConversationObserver>>,
}

impl ConversationEngineOptions {
    pub fn new(tree: Arc<TreeDefinition>) -> Self {
        Self {
            tree,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ConversationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    NotStarted,
    Active(NodeId),
    /// A reference failed to resolve. The session is frozen here.
    Invalid { target: NodeId },
}

/// One conversation session over a shared, read-only tree.
pub struct ConversationEngine {
    tree: Arc<TreeDefinition>,
    observer: Arc<dyn ConversationObserver>,

    state: EngineState,
    variables: VariableStore,
    log: ConversationLog,
    message: String,
    minimized: bool,
}
