use crate::analysis::reference;
use crate::lang::kind::NodeKind;
use crate::lang::tree::{Node, Tree};

/// The standard LSP semantic token types, in protocol order. A token's type
/// is an index into this legend.
pub const TOKEN_TYPES: [&str; 23] = [
    "namespace",
    "type",
    "class",
    "enum",
    "interface",
    "struct",
    "typeParameter",
    "parameter",
    "variable",
    "property",
    "enumMember",
    "event",
    "function",
    "method",
    "macro",
    "keyword",
    "modifier",
    "comment",
    "string",
    "number",
    "regexp",
    "operator",
    "decorator",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenType {
    Function,
}

impl TokenType {
    pub fn legend_index(self) -> u32 {
        match self {
            TokenType::Function => 12,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SemanticToken {
    pub line: usize,
    pub start: usize,
    pub length: usize,
    pub token_type: TokenType,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SemanticTokens {
    tokens: Vec<SemanticToken>,
}

impl SemanticTokens {
    fn push(&mut self, node: Node, token_type: TokenType) {
        let start = node.start_position();
        let end = node.end_position();
        self.tokens.push(SemanticToken {
            line: start.row,
            start: start.column,
            length: end.column.saturating_sub(start.column),
            token_type,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &SemanticToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Encodes the tokens the way `textDocument/semanticTokens` expects:
    /// five integers per token, with line and start relative to the previous
    /// token.
    pub fn encode(&self) -> Vec<u32> {
        let mut data = Vec::with_capacity(self.tokens.len() * 5);
        let (mut prev_line, mut prev_start) = (0, 0);

        for token in &self.tokens {
            let delta_line = token.line - prev_line;
            let delta_start = if delta_line == 0 {
                token.start - prev_start
            } else {
                token.start
            };

            data.extend([
                delta_line as u32,
                delta_start as u32,
                token.length as u32,
                token.token_type.legend_index(),
                0,
            ]);

            prev_line = token.line;
            prev_start = token.start;
        }

        data
    }
}

fn is_callee(node: Node) -> bool {
    node.kind() == NodeKind::Identifier
        && node
            .parent()
            .filter(|p| p.kind() == NodeKind::ProcCall)
            .and_then(|p| p.first_child())
            == Some(node)
}

/// Highlights procedure names where they are declared, defined and called.
pub fn collect(tree: &Tree) -> SemanticTokens {
    let mut tokens = SemanticTokens::default();

    for node in tree.root_node().descendants() {
        if node.kind().is_definition() || node.kind() == NodeKind::Declaration {
            if let Some(name) = node.child_by_field_name("name") {
                tokens.push(name, TokenType::Function);
            }
        }

        if is_callee(node) && reference::resolve(node).is_some() {
            tokens.push(node, TokenType::Function);
        }
    }

    tokens.tokens.sort_by_key(|t| (t.line, t.start));
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::parse;

    const SOURCE: &str = "PROGRAM{
  DECLPROC helper
  helper PROC:<{ DUP }>
  main PROC:<{
    helper CALLDICT
    missing CALLDICT
  }>
END>c
";

    #[test]
    fn function_tokens() {
        let tree = parse(SOURCE).unwrap();
        let tokens: Vec<_> = collect(&tree)
            .iter()
            .map(|t| (t.line, t.start, t.length))
            .collect();

        assert_eq!(tokens, vec![(1, 11, 6), (2, 2, 6), (3, 2, 4), (4, 4, 6)]);
    }

    #[test]
    fn relative_encoding() {
        let tree = parse(SOURCE).unwrap();
        assert_eq!(
            collect(&tree).encode(),
            vec![
                1, 11, 6, 12, 0, //
                1, 2, 6, 12, 0, //
                1, 2, 4, 12, 0, //
                1, 4, 6, 12, 0,
            ]
        );
    }

    #[test]
    fn legend_index_matches_name() {
        assert_eq!(
            TOKEN_TYPES[TokenType::Function.legend_index() as usize],
            "function"
        );
    }

    #[test]
    fn same_line_tokens_are_relative() {
        let tree = parse("PROGRAM{ DECLPROC a DECLPROC bb END>c").unwrap();
        assert_eq!(collect(&tree).encode(), vec![0, 18, 1, 12, 0, 0, 11, 2, 12, 0]);
    }
}
