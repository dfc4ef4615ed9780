use std::io::Write;

use dt_api::load_tree;
use dt_core::{DialogTreeError, Node, NodeKind, TreeDefinition};
use dt_parser::LoadOptions;
use dt_runtime::placeholder_keys;

use crate::{map_tui_io, CheckArgs, CheckReport, FileTreeSource};

pub(crate) fn run_check(args: CheckArgs, writer: &mut dyn Write) -> Result<i32, DialogTreeError> {
    let tree = load_tree(&FileTreeSource::new(args.tree), LoadOptions::default())?;
    let report = check_tree(&tree);
    emit_check_report(&report, writer)?;
    Ok(if report.is_clean() { 0 } else { 1 })
}

pub(crate) fn check_tree(tree: &TreeDefinition) -> CheckReport {
    let captured_keys = tree
        .nodes
        .values()
        .filter(|node| captures_input(node))
        .map(|node| node.text.as_str())
        .collect::<Vec<_>>();

    let mut report = CheckReport {
        node_count: tree.nodes.len(),
        start_node: tree.start_node.clone(),
        dangling: tree.dangling_references(),
        ..CheckReport::default()
    };

    for (id, node) in &tree.nodes {
        if node.kind == NodeKind::Input && node.next.is_none() {
            report.inputs_without_next.push(id.clone());
        }
        for key in placeholder_keys(&node.text) {
            if !captured_keys.contains(&key) {
                report
                    .unresolved_placeholders
                    .push((id.clone(), key.to_string()));
            }
        }
    }
    report
}

/// Nodes whose text becomes a variable key: input prompts, and any node that
/// offers no answer buttons but moves on after a free-text reply.
fn captures_input(node: &Node) -> bool {
    node.kind == NodeKind::Input || (node.answers.is_empty() && node.next.is_some())
}

pub(crate) fn emit_check_report(
    report: &CheckReport,
    writer: &mut dyn Write,
) -> Result<(), DialogTreeError> {
    let mut lines = vec![
        if report.is_clean() {
            "RESULT:OK".to_string()
        } else {
            "RESULT:ISSUES".to_string()
        },
        format!("NODES:{}", report.node_count),
        format!("START:{}", report.start_node),
    ];
    for (from, target) in &report.dangling {
        let from = if from.is_empty() { "startNode" } else { from };
        lines.push(format!("DANGLING:{}|{}", from, target));
    }
    for id in &report.inputs_without_next {
        lines.push(format!("INPUT_WITHOUT_NEXT:{}", id));
    }
    for (id, key) in &report.unresolved_placeholders {
        lines.push(format!("UNRESOLVED_PLACEHOLDER:{}|{}", id, key));
    }
    for line in lines {
        writeln!(writer, "{}", line).map_err(map_tui_io)?;
    }
    Ok(())
}
