use std::sync::Arc;

use dt_core::{DialogTreeError, Node};

/// Hooks the engine calls while it runs. Every method defaults to a no-op and
/// none of them can alter or block a transition.
pub trait ConversationObserver: Send + Sync {
    /// Called after the user's answer is logged and before the engine moves
    /// off `previous_node_text`. Redirect policies hang off this.
    fn on_answer_chosen(&self, _previous_node_text: &str, _answer_text: &str) {}

    /// Called when a node becomes current, before its text is logged.
    fn on_node_entered(&self, _node_id: &str, _node: &Node) {}

    /// Diagnostic channel for load and traversal failures.
    fn on_error(&self, _error: &DialogTreeError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ConversationObserver for NoopObserver {}

/// Forwards every notification to each member in order.
#[derive(Default, Clone)]
pub struct ObserverSet {
    members: Vec<Arc<dyn ConversationObserver>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: Arc<dyn ConversationObserver>) -> Self {
        self.members.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl ConversationObserver for ObserverSet {
    fn on_answer_chosen(&self, previous_node_text: &str, answer_text: &str) {
        for member in &self.members {
            member.on_answer_chosen(previous_node_text, answer_text);
        }
    }

    fn on_node_entered(&self, node_id: &str, node: &Node) {
        for member in &self.members {
            member.on_node_entered(node_id, node);
        }
    }

    fn on_error(&self, error: &DialogTreeError) {
        for member in &self.members {
            member.on_error(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter {
        calls: AtomicUsize,
    }

    impl ConversationObserver for Counter {
        fn on_error(&self, _error: &DialogTreeError) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn observer_set_fans_out_to_every_member() {
        let first = Arc::new(Counter::default());
        let second = Arc::new(Counter::default());
        let set = ObserverSet::new().with(first.clone()).with(second.clone());
        assert_eq!(set.len(), 2);

        set.on_error(&DialogTreeError::traversal("X", "x"));
        set.on_answer_chosen("Hi", "Go");
        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 1);
    }
}
