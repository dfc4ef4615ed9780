use std::collections::BTreeMap;

use dt_core::{Answer, DialogTreeError, Node, NodeKind, TreeDefinition};
use serde::Deserialize;
use serde_json::{Map, Value};

const ENVELOPE_FIELD: &str = "data";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Reject trees whose `next` / `answers[].next` targets are unknown.
    /// Lenient loading leaves those to surface as traversal errors.
    pub strict_references: bool,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(alias = "type")]
    kind: String,
    text: String,
    #[serde(default)]
    answers: Option<Vec<RawAnswer>>,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    options: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct RawAnswer {
    text: String,
    next: String,
}

pub fn parse_tree_json(
    source: &str,
    options: LoadOptions,
) -> Result<TreeDefinition, DialogTreeError> {
    let payload: Value = serde_json::from_str(source)
        .map_err(|error| DialogTreeError::load("LOAD_JSON", error.to_string()))?;
    parse_tree_value(payload, options)
}

pub fn parse_tree_value(
    payload: Value,
    options: LoadOptions,
) -> Result<TreeDefinition, DialogTreeError> {
    let Value::Object(mut fields) = unwrap_envelope(payload) else {
        return Err(DialogTreeError::load(
            "LOAD_SHAPE",
            "Tree payload must be a JSON object.",
        ));
    };

    let start_node = match fields.remove("startNode") {
        Some(Value::String(value)) if !value.is_empty() => value,
        Some(Value::String(_)) => {
            return Err(DialogTreeError::load(
                "LOAD_START_NODE_EMPTY",
                "Field \"startNode\" must not be empty.",
            ))
        }
        Some(other) => {
            return Err(DialogTreeError::load(
                "LOAD_START_NODE_TYPE",
                format!("Field \"startNode\" must be a string, got {}.", json_type(&other)),
            ))
        }
        None => {
            return Err(DialogTreeError::load(
                "LOAD_START_NODE_MISSING",
                "Tree payload is missing \"startNode\".",
            ))
        }
    };

    let raw_nodes = match fields.remove("nodes") {
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(DialogTreeError::load(
                "LOAD_NODES_TYPE",
                format!("Field \"nodes\" must be an object, got {}.", json_type(&other)),
            ))
        }
        None => {
            return Err(DialogTreeError::load(
                "LOAD_NODES_MISSING",
                "Tree payload is missing \"nodes\".",
            ))
        }
    };

    if raw_nodes.is_empty() {
        return Err(DialogTreeError::load(
            "LOAD_NODES_EMPTY",
            "Field \"nodes\" must contain at least one node.",
        ));
    }

    let nodes = parse_nodes(raw_nodes)?;
    let tree = TreeDefinition { start_node, nodes };

    if options.strict_references {
        if let Some((from, target)) = tree.dangling_references().into_iter().next() {
            let origin = if from.is_empty() {
                "startNode".to_string()
            } else {
                format!("node \"{}\"", from)
            };
            return Err(DialogTreeError::load(
                "LOAD_DANGLING_REFERENCE",
                format!("{} refers to unknown node \"{}\".", origin, target),
            ));
        }
    }

    log::info!(
        "loaded dialog tree: {} nodes, start node \"{}\"",
        tree.nodes.len(),
        tree.start_node
    );
    Ok(tree)
}

/// Peels one `{"data": {...}}` envelope off a payload that does not itself
/// look like a tree.
pub fn unwrap_envelope(payload: Value) -> Value {
    match payload {
        Value::Object(mut fields)
            if !fields.contains_key("startNode") && fields.contains_key(ENVELOPE_FIELD) =>
        {
            fields.remove(ENVELOPE_FIELD).unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn parse_nodes(
    raw_nodes: Map<String, Value>,
) -> Result<BTreeMap<String, Node>, DialogTreeError> {
    let mut nodes = BTreeMap::new();
    for (id, raw) in raw_nodes {
        let raw: RawNode = serde_json::from_value(raw).map_err(|error| {
            DialogTreeError::load(
                "LOAD_NODE_SHAPE",
                format!("Node \"{}\" is malformed: {}", id, error),
            )
        })?;

        let Some(kind) = NodeKind::parse(&raw.kind) else {
            return Err(DialogTreeError::load(
                "LOAD_UNKNOWN_NODE_KIND",
                format!("Node \"{}\" has unknown kind \"{}\".", id, raw.kind),
            ));
        };

        let answers = raw
            .answers
            .unwrap_or_default()
            .into_iter()
            .map(|answer| Answer::new(answer.text, answer.next))
            .collect();

        let options = parse_options(&id, raw.options.unwrap_or_default())?;

        nodes.insert(
            id,
            Node {
                kind,
                text: raw.text,
                answers,
                next: raw.next,
                options,
            },
        );
    }
    Ok(nodes)
}

/// Keeps the order the author wrote the keys in.
fn parse_options(
    id: &str,
    raw: Map<String, Value>,
) -> Result<Vec<(String, String)>, DialogTreeError> {
    raw.into_iter()
        .map(|(key, value)| match value {
            Value::String(label) => Ok((key, label)),
            other => Err(DialogTreeError::load(
                "LOAD_NODE_SHAPE",
                format!(
                    "Node \"{}\" option \"{}\" must be a string, got {}.",
                    id,
                    key,
                    json_type(&other)
                ),
            )),
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
