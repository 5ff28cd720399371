use crate::analysis::reference;
use crate::lang::tree::Node;

const CODE_FENCE: &str = "```";

/// Markdown hover text for `node`: the full text of the definition it
/// resolves to, fenced as Fift code.
pub fn hover(node: Node) -> Option<String> {
    let definition = reference::resolve(node)?;
    let body = definition.parent()?.text();
    Some(format!("{CODE_FENCE}fift\n{body}\n{CODE_FENCE}"))
}
