use super::*;

pub(super) const EMPTY_INPUT_MESSAGE: &str = "Please type an answer before sending.";

impl ConversationEngine {
    pub fn new(options: ConversationEngineOptions) -> Self {
        let observer: Arc<dyn ConversationObserver> =
            options.observer.unwrap_or_else(|| Arc::new(NoopObserver));

        Self {
            tree: options.tree,
            observer,
            state: EngineState::NotStarted,
            variables: VariableStore::new(),
            log: ConversationLog::new(),
            message: String::new(),
            minimized: false,
        }
    }

    /// Enters the declared start node and logs its text.
    pub fn start(&mut self) -> Result<(), DialogTreeError> {
        if self.state != EngineState::NotStarted {
            return Err(DialogTreeError::state(
                "ENGINE_ALREADY_STARTED",
                "Conversation has already been started.",
            ));
        }

        let start_node = self.tree.start_node.clone();
        log::info!("starting conversation at \"{}\"", start_node);
        self.enter(start_node)
    }

    /// Drops captured variables and the transcript, then starts over on the
    /// same tree. Works from any state, including `Invalid`.
    pub fn restart(&mut self) -> Result<(), DialogTreeError> {
        self.state = EngineState::NotStarted;
        self.variables.clear();
        self.log = ConversationLog::new();
        self.message.clear();
        self.start()
    }

    pub fn tree(&self) -> &TreeDefinition {
        &self.tree
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_started(&self) -> bool {
        self.state != EngineState::NotStarted
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.state, EngineState::Invalid { .. })
    }

    pub fn current_node_id(&self) -> Option<&str> {
        match &self.state {
            EngineState::Active(id) => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn current_node(&self) -> Option<&Node> {
        self.current_node_id().and_then(|id| self.tree.node_at(id))
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Current node, or the reason no transition can be taken from here.
    pub(super) fn require_active(&self) -> Result<&Node, DialogTreeError> {
        match &self.state {
            EngineState::NotStarted => Err(DialogTreeError::state(
                "ENGINE_NOT_STARTED",
                "Conversation has not been started.",
            )),
            EngineState::Invalid { target } => Err(DialogTreeError::state(
                "ENGINE_FROZEN",
                format!(
                    "Conversation is frozen after failing to reach node \"{}\".",
                    target
                ),
            )),
            EngineState::Active(id) => self.tree.node_at(id).ok_or_else(|| {
                DialogTreeError::traversal(
                    "ENGINE_NODE_NOT_FOUND",
                    format!("Node \"{}\" does not exist.", id),
                )
            }),
        }
    }
}
