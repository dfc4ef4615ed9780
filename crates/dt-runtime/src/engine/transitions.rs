use dt_core::Answer;

use super::lifecycle::EMPTY_INPUT_MESSAGE;
use super::*;

impl ConversationEngine {
    /// Logs the user's choice verbatim, notifies the observer with the node
    /// being left, then moves to `answer.next`.
    pub fn select_answer(&mut self, answer: &Answer) -> Result<(), DialogTreeError> {
        let previous_text = self.require_active()?.text.clone();

        self.log.push_user(answer.text.clone());
        self.observer
            .on_answer_chosen(&previous_text, answer.text.as_str());
        self.enter(answer.next.clone())
    }

    /// Picks an answer of the current node by display index.
    pub fn select_answer_at(&mut self, index: usize) -> Result<(), DialogTreeError> {
        let node = self.require_active()?;
        let Some(answer) = node.answers.get(index).cloned() else {
            return Err(DialogTreeError::state(
                "ENGINE_CHOICE_INDEX",
                format!(
                    "Choice index \"{}\" is out of range ({} answers).",
                    index,
                    node.answers.len()
                ),
            ));
        };
        self.select_answer(&answer)
    }

    /// Captures `raw_text` under the current node's own prompt text and moves
    /// to the node's `next`. Blank input is rejected without touching state
    /// beyond the user-facing message.
    pub fn submit_input(&mut self, raw_text: &str) -> Result<(), DialogTreeError> {
        let node = self.require_active()?;
        let key = node.text.clone();
        let next = node.next.clone().unwrap_or_default();

        if raw_text.trim().is_empty() {
            log::warn!("rejected blank input at \"{}\"", key);
            self.message = EMPTY_INPUT_MESSAGE.to_string();
            return Err(DialogTreeError::validation(
                "ENGINE_EMPTY_INPUT",
                EMPTY_INPUT_MESSAGE,
            ));
        }

        self.message.clear();
        self.log.push_user(raw_text);
        self.variables.set(key, raw_text);
        self.enter(next)
    }

    pub(super) fn enter(&mut self, target: NodeId) -> Result<(), DialogTreeError> {
        if self.tree.node_at(&target).is_none() {
            let message = if target.is_empty() {
                "Current node has no successor to move to.".to_string()
            } else {
                format!("Node \"{}\" does not exist.", target)
            };
            let error = DialogTreeError::traversal("ENGINE_NODE_NOT_FOUND", message);
            self.state = EngineState::Invalid { target };
            self.report(&error);
            return Err(error);
        }

        self.state = EngineState::Active(target);
        self.process_node()
    }

    fn process_node(&mut self) -> Result<(), DialogTreeError> {
        let tree = Arc::clone(&self.tree);
        let Some((id, node)) = self
            .current_node_id()
            .and_then(|id| tree.node_at(id).map(|node| (id.to_string(), node)))
        else {
            let error = DialogTreeError::traversal(
                "ENGINE_INVALID_NODE",
                "There is no current node to process.",
            );
            self.report(&error);
            return Err(error);
        };

        match node.kind {
            NodeKind::Question => {
                log::debug!("node \"{}\": question, {} answers", id, node.answers.len())
            }
            NodeKind::Input => log::debug!("node \"{}\": awaiting free text", id),
            NodeKind::Statement => log::debug!("node \"{}\": statement", id),
        }
        self.observer.on_node_entered(&id, node);

        let text = interpolate(&node.text, &self.variables);
        self.log.push_bot(text);
        Ok(())
    }

    fn report(&self, error: &DialogTreeError) {
        log::error!("{}", error);
        self.observer.on_error(error);
    }
}
