use crate::lang::kind::NodeKind;
use crate::lang::tree::{Node, Range};

/// Resolves an identifier to the `name` node of the procedure or method
/// definition it refers to. The first definition in document order wins.
pub fn resolve<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.kind() != NodeKind::Identifier {
        return None;
    }

    let word = node.text();
    node.tree()
        .root_node()
        .descendants()
        .filter(|n| n.kind().is_definition())
        .filter_map(|n| n.child_by_field_name("name"))
        .find(|name| name.text() == word)
}

/// Finds every use of the definition `node` resolves to. Names introduced by
/// declarations and definitions are not uses; the definition itself is
/// prepended when `include_definition` is set.
pub fn find_references<'t>(node: Node<'t>, include_definition: bool) -> Vec<Node<'t>> {
    let Some(definition) = resolve(node) else {
        return vec![];
    };

    let word = definition.text();
    let uses = definition
        .tree()
        .root_node()
        .descendants()
        .filter(|n| n.kind() == NodeKind::Identifier)
        .filter(|n| n.field_name().is_none())
        .filter(|n| n.text() == word);

    let mut result = vec![];
    if include_definition {
        result.push(definition);
    }
    result.extend(uses);

    log::trace!("Found {} references to {}", result.len(), word);
    result
}

pub fn definition_range(node: Node) -> Option<Range> {
    resolve(node).map(|definition| definition.range())
}
