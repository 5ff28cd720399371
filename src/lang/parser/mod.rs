use std::{error, fmt};

use itertools::Itertools;
use pest::error::{ErrorVariant, InputLocation};
use pest::iterators::Pair;
use pest::Parser as _;

use crate::lang::grammar::{FiftParser, Rule, NAME_FIELD};
use crate::lang::kind::NodeKind;
use crate::lang::language::Language;
use crate::lang::tree::{LineIndex, NodeData, Point, Tree};

type RulePair<'a> = Pair<'a, Rule>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Where parsing stopped.
    pub position: Point,
    pub offset: usize,
    /// Names of the node kinds that would have been accepted at `position`.
    pub expected: Vec<String>,
    pub message: Option<String>,
}

impl ParseError {
    fn from_pest(e: pest::error::Error<Rule>, source: &str) -> Self {
        let offset = match e.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };

        let (expected, message) = match e.variant {
            ErrorVariant::ParsingError { positives, .. } => (
                positives
                    .into_iter()
                    .map(describe_rule)
                    .unique()
                    .collect(),
                None,
            ),
            ErrorVariant::CustomError { message } => (vec![], Some(message)),
        };

        ParseError {
            position: LineIndex::new(source).point(offset),
            offset,
            expected,
            message,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Syntax error at line {}, column {}",
            self.position.row + 1,
            self.position.column + 1
        )?;

        if let Some(message) = &self.message {
            write!(f, ": {}", message)
        } else if !self.expected.is_empty() {
            write!(f, ": expected {}", self.expected.iter().join(", "))
        } else {
            Ok(())
        }
    }
}

impl error::Error for ParseError {}

/// Maps a grammar rule onto the node kind it produces. Rules without a kind
/// are hidden: their children are hoisted into the enclosing node.
fn rule_kind(rule: Rule) -> Option<NodeKind> {
    let kind = match rule {
        Rule::source_file => NodeKind::SourceFile,
        Rule::include_directive => NodeKind::IncludeDirective,
        Rule::COMMENT => NodeKind::Comment,
        Rule::program => NodeKind::Program,
        Rule::declaration => NodeKind::Declaration,
        Rule::global_var => NodeKind::GlobalVar,
        Rule::definition => NodeKind::Definition,
        Rule::proc_definition => NodeKind::ProcDefinition,
        Rule::proc_inline_definition => NodeKind::ProcInlineDefinition,
        Rule::proc_ref_definition => NodeKind::ProcRefDefinition,
        Rule::method_definition => NodeKind::MethodDefinition,
        Rule::instruction => NodeKind::Instruction,
        Rule::if_statement => NodeKind::IfStatement,
        Rule::ifjmp_statement => NodeKind::IfjmpStatement,
        Rule::while_statement => NodeKind::WhileStatement,
        Rule::repeat_statement => NodeKind::RepeatStatement,
        Rule::until_statement => NodeKind::UntilStatement,
        Rule::proc_call => NodeKind::ProcCall,
        Rule::slice_literal => NodeKind::SliceLiteral,
        Rule::hex_literal => NodeKind::HexLiteral,
        Rule::identifier => NodeKind::Identifier,
        Rule::negative_identifier => NodeKind::NegativeIdentifier,
        Rule::number => NodeKind::Number,
        Rule::stack_ref => NodeKind::StackRef,
        Rule::stack_op => NodeKind::StackOp,
        Rule::stack_index => NodeKind::StackIndex,
        Rule::string => NodeKind::String,
        Rule::error => NodeKind::Error,
        Rule::kw_include => NodeKind::Include,
        Rule::kw_program => NodeKind::ProgramStart,
        Rule::kw_end => NodeKind::ProgramEnd,
        Rule::kw_declproc => NodeKind::DeclProc,
        Rule::kw_declmethod => NodeKind::DeclMethod,
        Rule::kw_declglobvar => NodeKind::DeclGlobVar,
        Rule::kw_proc => NodeKind::ProcStart,
        Rule::kw_procinline => NodeKind::ProcInlineStart,
        Rule::kw_procref => NodeKind::ProcRefStart,
        Rule::kw_method => NodeKind::MethodStart,
        Rule::kw_close => NodeKind::BlockEnd,
        Rule::kw_if => NodeKind::IfStart,
        Rule::kw_else => NodeKind::ElseStart,
        Rule::kw_ifjmp => NodeKind::IfjmpStart,
        Rule::kw_while => NodeKind::WhileStart,
        Rule::kw_do => NodeKind::WhileDo,
        Rule::kw_repeat => NodeKind::RepeatStart,
        Rule::kw_until => NodeKind::UntilStart,
        Rule::kw_calldict => NodeKind::CallDict,
        Rule::kw_inlinecalldict => NodeKind::InlineCallDict,
        _ => return None,
    };
    Some(kind)
}

fn describe_rule(rule: Rule) -> String {
    match rule_kind(rule) {
        Some(kind) if kind.is_named() => kind.as_str().to_string(),
        Some(kind) => format!("`{}`", kind),
        None => match rule {
            Rule::EOI => String::from("end of input"),
            Rule::include_path => String::from("include path"),
            Rule::method_id => String::from("method id"),
            Rule::error_open | Rule::error_token => String::from("unrecognized token"),
            other => format!("{:?}", other),
        },
    }
}

/// Turns pest pairs into the arena a [`Tree`] is made of.
struct TreeBuilder<'a> {
    lines: LineIndex,
    source: &'a str,
    nodes: Vec<NodeData>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        TreeBuilder {
            lines: LineIndex::new(source),
            source,
            nodes: vec![],
        }
    }

    fn push_pair(&mut self, pair: RulePair, parent: Option<usize>) {
        let Some(kind) = rule_kind(pair.as_rule()) else {
            for inner in pair.into_inner() {
                self.push_pair(inner, parent);
            }
            return;
        };

        let span = pair.as_span();
        let id = self.nodes.len();
        self.nodes.push(NodeData {
            kind,
            field: None,
            start_byte: span.start(),
            end_byte: span.end(),
            start_position: self.lines.point(span.start()),
            end_position: self.lines.point(span.end()),
            parent,
            children: vec![],
        });

        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }

        for inner in pair.into_inner() {
            self.push_pair(inner, Some(id));
        }

        if kind.has_name_field() {
            self.assign_name(id);
        }
    }

    fn assign_name(&mut self, id: usize) {
        let name = self.nodes[id]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].kind == NodeKind::Identifier);

        if let Some(name) = name {
            self.nodes[name].field = Some(NAME_FIELD);
        }
    }

    fn finish(self, language: Language) -> Tree {
        Tree::new(language, self.source.to_string(), self.nodes)
    }
}

/// Parses Fift source text into [`Tree`]s.
#[derive(Debug, Clone)]
pub struct Parser {
    language: Language,
}

impl Parser {
    pub fn new(language: Language) -> Self {
        Parser { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn parse(&self, source: &str) -> Result<Tree, ParseError> {
        self.parse_rule(Rule::source_file, source)
    }

    pub(crate) fn parse_rule(&self, rule: Rule, source: &str) -> Result<Tree, ParseError> {
        let mut pairs =
            FiftParser::parse(rule, source).map_err(|e| ParseError::from_pest(e, source))?;

        let mut builder = TreeBuilder::new(source);
        if let Some(pair) = pairs.next() {
            builder.push_pair(pair, None);
        }

        if builder.nodes.is_empty() {
            return Err(ParseError {
                position: Point::default(),
                offset: 0,
                expected: vec![describe_rule(rule)],
                message: None,
            });
        }

        log::trace!(
            "Parsed {} bytes into {} nodes",
            source.len(),
            builder.nodes.len()
        );

        Ok(builder.finish(self.language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::grammar::language;

    fn parser() -> Parser {
        Language::new(language()).unwrap().parser()
    }

    fn test_rule_sexp(test_cases: &[(&str, &str)], rule: Rule) {
        let parser = parser();
        for (input, expected_output) in test_cases {
            let tree = parser.parse_rule(rule, input).expect("Unsuccessful parse");
            assert_eq!(&tree.root_node().to_sexp(), expected_output, "input: {}", input);
        }
    }

    #[test]
    fn test_parse_declaration() {
        let test_cases = [
            ("DECLPROC main", "(declaration name: (identifier))"),
            ("main DECLPROC", "(declaration name: (identifier))"),
            ("85143 DECLMETHOD seqno", "(declaration name: (identifier))"),
        ];

        test_rule_sexp(&test_cases, Rule::declaration);
    }

    #[test]
    fn test_parse_global_var() {
        let test_cases = [("DECLGLOBVAR ctx_id", "(global_var name: (identifier))")];

        test_rule_sexp(&test_cases, Rule::global_var);
    }

    #[test]
    fn test_parse_definition() {
        let test_cases = [
            (
                "main PROC:<{ }>",
                "(definition (proc_definition name: (identifier)))",
            ),
            (
                "load_data PROCINLINE:<{ c4 PUSH }>",
                "(definition (proc_inline_definition name: (identifier) \
                 (instruction (identifier)) (instruction (identifier))))",
            ),
            (
                "helper PROCREF:<{ DUP }>",
                "(definition (proc_ref_definition name: (identifier) \
                 (instruction (identifier))))",
            ),
            (
                "seqno METHOD:<{ 0 PUSHINT }>",
                "(definition (method_definition name: (identifier) \
                 (instruction (number)) (instruction (identifier))))",
            ),
        ];

        test_rule_sexp(&test_cases, Rule::definition);
    }

    #[test]
    fn test_parse_instruction() {
        let test_cases = [
            ("DUP", "(instruction (identifier))"),
            ("-1", "(instruction (number))"),
            ("0x1F", "(instruction (hex_literal))"),
            ("-NEGATE", "(instruction (negative_identifier (identifier)))"),
            ("\"hello\"", "(instruction (string))"),
            ("b{0101}", "(instruction (slice_literal))"),
            ("x{DEAD_}", "(instruction (slice_literal))"),
            ("B{ff00}", "(instruction (slice_literal))"),
            ("s(-1)", "(instruction (stack_ref))"),
            (
                "s0 s2 XCHG",
                "(instruction (stack_op (stack_index) (stack_index) (identifier)))",
            ),
            ("load_data CALLDICT", "(instruction (proc_call (identifier)))"),
            ("store INLINECALLDICT", "(instruction (proc_call (identifier)))"),
        ];

        test_rule_sexp(&test_cases, Rule::instruction);
    }

    #[test]
    fn test_parse_control_flow() {
        let test_cases = [
            ("IF:<{ DROP }>", "(instruction (if_statement (instruction (identifier))))"),
            (
                "IF:<{ DROP }>ELSE<{ NIP }>",
                "(instruction (if_statement (instruction (identifier)) \
                 (instruction (identifier))))",
            ),
            ("IFJMP:<{ }>", "(instruction (ifjmp_statement))"),
            (
                "WHILE:<{ DUP }>DO<{ DEC }>",
                "(instruction (while_statement (instruction (identifier)) \
                 (instruction (identifier))))",
            ),
            (
                "REPEAT:<{ INC }>",
                "(instruction (repeat_statement (instruction (identifier))))",
            ),
            (
                "UNTIL:<{ IF:<{ TRUE }> }>",
                "(instruction (until_statement (instruction (if_statement \
                 (instruction (identifier))))))",
            ),
        ];

        test_rule_sexp(&test_cases, Rule::instruction);
    }

    #[test]
    fn test_parse_source_file() {
        let source = "// generated
\"Asm.fif\" include
PROGRAM{
  DECLPROC recv_internal
  85143 DECLMETHOD seqno
  DECLGLOBVAR ctx
  recv_internal PROC:<{
    DROP
  }>
  seqno METHOD:<{
    c4 PUSH CTOS 32 PLDU
  }>
END>c
";
        let tree = parser().parse(source).unwrap();
        assert_eq!(
            tree.root_node().to_sexp(),
            "(source_file (include_directive) (program \
             (declaration name: (identifier)) \
             (declaration name: (identifier)) \
             (global_var name: (identifier)) \
             (definition (proc_definition name: (identifier) (instruction (identifier)))) \
             (definition (method_definition name: (identifier) \
             (instruction (identifier)) (instruction (identifier)) \
             (instruction (identifier)) (instruction (number)) (instruction (identifier))))))"
        );
    }

    #[test]
    fn keywords_need_a_word_boundary() {
        let tree = parser().parse_rule(Rule::instruction, "foo CALLDICTX").unwrap();
        assert_eq!(tree.root_node().to_sexp(), "(instruction (identifier))");
        assert_eq!(tree.root_node().text(), "foo");
    }

    #[test]
    fn digit_prefixed_mnemonics() {
        let test_cases = [
            ("2DUP", "(instruction (number))"),
            ("2DROP", "(instruction (number))"),
        ];
        test_rule_sexp(&test_cases, Rule::instruction);

        let tree = parser()
            .parse("PROGRAM{ main PROC:<{ 2DUP 2DROP }> END>c")
            .unwrap();
        assert_eq!(
            tree.root_node().to_sexp(),
            "(source_file (program (definition (proc_definition name: (identifier) \
             (instruction (number)) (instruction (identifier)) \
             (instruction (number)) (instruction (identifier))))))"
        );
    }

    #[test]
    fn unrecognized_instructions() {
        let test_cases = [
            ("x{}", "(instruction (ERROR))"),
            ("IFNOT:<{ DROP }>", "(instruction (ERROR (instruction (identifier))))"),
            (
                "IFNOTJMP:<{ }>ELSE<{ NIP }>",
                "(instruction (ERROR (instruction (identifier))))",
            ),
            ("<{ DUP }>", "(instruction (ERROR (instruction (identifier))))"),
        ];

        test_rule_sexp(&test_cases, Rule::instruction);
    }

    #[test]
    fn unknown_blocks_keep_the_body() {
        let source = "PROGRAM{
  DECLPROC foo
  foo PROC:<{ }>
  main PROC:<{
    IFNOT:<{ DROP }>
    <{ DUP }> PUSHCONT
    foo CALLDICT
  }>
END>c
";
        let tree = parser().parse(source).unwrap();
        assert!(tree.root_node().has_error());
        assert_eq!(
            tree.root_node().to_sexp(),
            "(source_file (program (declaration name: (identifier)) \
             (definition (proc_definition name: (identifier))) \
             (definition (proc_definition name: (identifier) \
             (instruction (ERROR (instruction (identifier)))) \
             (instruction (ERROR (instruction (identifier)))) \
             (instruction (identifier)) \
             (instruction (proc_call (identifier)))))))"
        );
    }

    #[test]
    fn reports_error_position() {
        // The stray `END>c` is swallowed as an unrecognized token, so parsing
        // gives up at the end of input still waiting for `}>`.
        let source = "PROGRAM{\n  main PROC:<{\n    DUP\n  \nEND>c\n";
        let err = parser().parse(source).unwrap_err();

        assert_eq!(err.position, Point::new(5, 0));
        assert_eq!(err.offset, source.len());
        assert!(err.expected.contains(&String::from("`}>`")));
        assert!(err.to_string().starts_with("Syntax error at line 6, column 1"));
    }

    #[test]
    fn rejects_missing_program() {
        let err = parser().parse("\"Asm.fif\" include\n").unwrap_err();
        assert_eq!(err.position, Point::new(1, 0));
        assert!(!err.expected.is_empty());
    }
}
