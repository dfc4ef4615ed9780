use super::*;

/// Read side for renderers.
impl ConversationEngine {
    pub fn kind(&self) -> Option<NodeKind> {
        self.current_node().map(|node| node.kind)
    }

    /// Answer buttons of the current question node, keyed by display index.
    /// Empty for every other kind.
    pub fn choices(&self) -> Vec<ChoiceButton> {
        match self.current_node() {
            Some(node) if node.kind == NodeKind::Question => node
                .answers
                .iter()
                .enumerate()
                .map(|(index, answer)| ChoiceButton {
                    key: index.to_string(),
                    text: answer.text.clone(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The current node's `options` in the order the tree lists them.
    pub fn options(&self) -> Vec<ChoiceButton> {
        self.current_node()
            .map(|node| {
                node.options
                    .iter()
                    .map(|(key, text)| ChoiceButton {
                        key: key.clone(),
                        text: text.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn awaits_input(&self) -> bool {
        self.kind() == Some(NodeKind::Input)
    }

    /// True when the current node offers no further transition.
    pub fn is_finished(&self) -> bool {
        self.current_node().is_some_and(Node::is_terminal)
    }

    /// User-facing validation message; empty when there is none.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn clear_message(&mut self) {
        self.message.clear();
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
    }

    pub fn toggle_minimized(&mut self) -> bool {
        self.minimized = !self.minimized;
        self.minimized
    }
}
