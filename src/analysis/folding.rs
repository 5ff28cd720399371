use crate::lang::kind::NodeKind;
use crate::lang::tree::{Node, Tree};

/// A foldable region, in LSP terms: lines are zero-based and `end_line` is
/// the last line hidden when the region is folded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FoldingRange {
    pub start_line: usize,
    pub start_character: usize,
    pub end_line: usize,
    pub end_character: usize,
}

fn is_foldable(kind: NodeKind) -> bool {
    kind.is_definition()
        || matches!(
            kind,
            NodeKind::Program
                | NodeKind::IfStatement
                | NodeKind::IfjmpStatement
                | NodeKind::WhileStatement
                | NodeKind::RepeatStatement
                | NodeKind::UntilStatement
        )
}

/// Folds from the line of the opening delimiter up to the line before the
/// closing one, so the closing `}>` stays visible. Both characters are the
/// column of the closing delimiter.
fn fold(node: Node) -> Option<FoldingRange> {
    let open = node.children().find(|c| !c.is_named())?;
    let close = node.last_child().filter(|c| !c.is_named())?;

    let start = open.end_position();
    let end = close.start_position();
    if end.row <= start.row + 1 {
        return None;
    }

    Some(FoldingRange {
        start_line: start.row,
        start_character: end.column,
        end_line: end.row - 1,
        end_character: end.column,
    })
}

pub fn collect(tree: &Tree) -> Vec<FoldingRange> {
    tree.root_node()
        .descendants()
        .filter(|n| is_foldable(n.kind()))
        .filter_map(fold)
        .collect()
}
