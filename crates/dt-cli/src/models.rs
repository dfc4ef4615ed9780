use dt_core::NodeId;

pub(crate) const HELP_LINE: &str = "commands: :help :log :vars :restart :min :quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayCommandAction {
    NotHandled,
    Continue,
    RefreshTranscript,
    Quit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CheckReport {
    pub(crate) node_count: usize,
    pub(crate) start_node: NodeId,
    pub(crate) dangling: Vec<(NodeId, NodeId)>,
    pub(crate) inputs_without_next: Vec<NodeId>,
    pub(crate) unresolved_placeholders: Vec<(NodeId, String)>,
}

impl CheckReport {
    pub(crate) fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.inputs_without_next.is_empty()
    }
}
