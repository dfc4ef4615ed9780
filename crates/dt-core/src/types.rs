use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type NodeId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Question,
    Input,
    Statement,
}

impl NodeKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "question" => Some(Self::Question),
            "input" => Some(Self::Input),
            "statement" => Some(Self::Statement),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Input => "input",
            Self::Statement => "statement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub next: NodeId,
}

impl Answer {
    pub fn new(text: impl Into<String>, next: impl Into<NodeId>) -> Self {
        Self {
            text: text.into(),
            next: next.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NodeId>,
    /// Extra `(key, label)` buttons in authored order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<(String, String)>,
}

impl Node {
    pub fn new(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            answers: Vec::new(),
            next: None,
            options: Vec::new(),
        }
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(option_key, _)| option_key == key)
            .map(|(_, label)| label.as_str())
    }

    pub fn with_answers(mut self, answers: Vec<Answer>) -> Self {
        self.answers = answers;
        self
    }

    pub fn with_next(mut self, next: impl Into<NodeId>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// A node with neither answers nor a successor offers no further transition.
    pub fn is_terminal(&self) -> bool {
        self.answers.is_empty() && self.next.is_none()
    }

    /// Every node id this node refers to, in declaration order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.answers
            .iter()
            .map(|answer| answer.next.as_str())
            .chain(self.next.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeDefinition {
    pub start_node: NodeId,
    pub nodes: BTreeMap<NodeId, Node>,
}

impl TreeDefinition {
    pub fn node_at(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// `(from, target)` pairs whose target does not key into `nodes`, plus
    /// `("", start_node)` when the start node itself is missing.
    pub fn dangling_references(&self) -> Vec<(NodeId, NodeId)> {
        let mut dangling = Vec::new();
        if !self.nodes.contains_key(&self.start_node) {
            dangling.push((String::new(), self.start_node.clone()));
        }
        for (id, node) in &self.nodes {
            for target in node.references() {
                if !self.nodes.contains_key(target) {
                    dangling.push((id.clone(), target.to_string()));
                }
            }
        }
        dangling
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Speaker {
    Bot,
    User,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bot => "bot",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl LogEntry {
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }
}

/// A `{key, text}` pair a renderer can turn into a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceButton {
    pub key: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_tree() -> TreeDefinition {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            "a".to_string(),
            Node::new(NodeKind::Question, "Hi").with_answers(vec![
                Answer::new("Go", "b"),
                Answer::new("Lost", "nowhere"),
            ]),
        );
        nodes.insert("b".to_string(), Node::new(NodeKind::Statement, "Bye"));
        TreeDefinition {
            start_node: "a".to_string(),
            nodes,
        }
    }

    #[test]
    fn node_kind_parse_accepts_known_names_only() {
        assert_eq!(NodeKind::parse("question"), Some(NodeKind::Question));
        assert_eq!(NodeKind::parse("input"), Some(NodeKind::Input));
        assert_eq!(NodeKind::parse("statement"), Some(NodeKind::Statement));
        assert_eq!(NodeKind::parse("Question"), None);
        assert_eq!(NodeKind::parse("menu"), None);
    }

    #[test]
    fn terminal_nodes_have_no_answers_and_no_next() {
        assert!(Node::new(NodeKind::Statement, "end").is_terminal());
        assert!(Node::new(NodeKind::Question, "no answers").is_terminal());
        assert!(!Node::new(NodeKind::Input, "name").with_next("x").is_terminal());
    }

    #[test]
    fn dangling_references_reports_unknown_targets() {
        let tree = two_node_tree();
        assert_eq!(
            tree.dangling_references(),
            vec![("a".to_string(), "nowhere".to_string())]
        );
    }

    #[test]
    fn dangling_references_reports_missing_start_node() {
        let mut tree = two_node_tree();
        tree.start_node = "ghost".to_string();
        let dangling = tree.dangling_references();
        assert_eq!(dangling[0], (String::new(), "ghost".to_string()));
    }

    #[test]
    fn log_entry_serializes_lowercase_speaker() {
        let json = serde_json::to_string(&LogEntry::bot("Hi")).expect("entry should serialize");
        assert_eq!(json, r#"{"speaker":"bot","text":"Hi"}"#);
    }
}
