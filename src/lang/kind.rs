use std::fmt;

/// Every kind of node that can appear in a Fift syntax tree.
///
/// Named kinds come first and are followed by the anonymous keyword and
/// delimiter tokens. The position of a kind in [`NodeKind::ALL`] is its id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    SourceFile,
    IncludeDirective,
    Comment,
    Program,
    Declaration,
    GlobalVar,
    Definition,
    ProcDefinition,
    ProcInlineDefinition,
    ProcRefDefinition,
    MethodDefinition,
    Instruction,
    IfStatement,
    IfjmpStatement,
    WhileStatement,
    RepeatStatement,
    UntilStatement,
    ProcCall,
    SliceLiteral,
    HexLiteral,
    Identifier,
    NegativeIdentifier,
    Number,
    StackRef,
    StackOp,
    StackIndex,
    String,
    Error,
    Include,
    ProgramStart,
    ProgramEnd,
    DeclProc,
    DeclMethod,
    DeclGlobVar,
    ProcStart,
    ProcInlineStart,
    ProcRefStart,
    MethodStart,
    BlockEnd,
    IfStart,
    ElseStart,
    IfjmpStart,
    WhileStart,
    WhileDo,
    RepeatStart,
    UntilStart,
    CallDict,
    InlineCallDict,
}

impl NodeKind {
    pub const COUNT: usize = 48;

    pub const ALL: [NodeKind; NodeKind::COUNT] = [
        NodeKind::SourceFile,
        NodeKind::IncludeDirective,
        NodeKind::Comment,
        NodeKind::Program,
        NodeKind::Declaration,
        NodeKind::GlobalVar,
        NodeKind::Definition,
        NodeKind::ProcDefinition,
        NodeKind::ProcInlineDefinition,
        NodeKind::ProcRefDefinition,
        NodeKind::MethodDefinition,
        NodeKind::Instruction,
        NodeKind::IfStatement,
        NodeKind::IfjmpStatement,
        NodeKind::WhileStatement,
        NodeKind::RepeatStatement,
        NodeKind::UntilStatement,
        NodeKind::ProcCall,
        NodeKind::SliceLiteral,
        NodeKind::HexLiteral,
        NodeKind::Identifier,
        NodeKind::NegativeIdentifier,
        NodeKind::Number,
        NodeKind::StackRef,
        NodeKind::StackOp,
        NodeKind::StackIndex,
        NodeKind::String,
        NodeKind::Error,
        NodeKind::Include,
        NodeKind::ProgramStart,
        NodeKind::ProgramEnd,
        NodeKind::DeclProc,
        NodeKind::DeclMethod,
        NodeKind::DeclGlobVar,
        NodeKind::ProcStart,
        NodeKind::ProcInlineStart,
        NodeKind::ProcRefStart,
        NodeKind::MethodStart,
        NodeKind::BlockEnd,
        NodeKind::IfStart,
        NodeKind::ElseStart,
        NodeKind::IfjmpStart,
        NodeKind::WhileStart,
        NodeKind::WhileDo,
        NodeKind::RepeatStart,
        NodeKind::UntilStart,
        NodeKind::CallDict,
        NodeKind::InlineCallDict,
    ];

    pub const fn id(self) -> u16 {
        self as u16
    }

    pub fn from_id(id: u16) -> Option<NodeKind> {
        NodeKind::ALL.get(id as usize).copied()
    }

    /// The name the kind carries in S-expressions and in the grammar's kind
    /// table. Anonymous kinds are named after the literal token text.
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::SourceFile => "source_file",
            NodeKind::IncludeDirective => "include_directive",
            NodeKind::Comment => "comment",
            NodeKind::Program => "program",
            NodeKind::Declaration => "declaration",
            NodeKind::GlobalVar => "global_var",
            NodeKind::Definition => "definition",
            NodeKind::ProcDefinition => "proc_definition",
            NodeKind::ProcInlineDefinition => "proc_inline_definition",
            NodeKind::ProcRefDefinition => "proc_ref_definition",
            NodeKind::MethodDefinition => "method_definition",
            NodeKind::Instruction => "instruction",
            NodeKind::IfStatement => "if_statement",
            NodeKind::IfjmpStatement => "ifjmp_statement",
            NodeKind::WhileStatement => "while_statement",
            NodeKind::RepeatStatement => "repeat_statement",
            NodeKind::UntilStatement => "until_statement",
            NodeKind::ProcCall => "proc_call",
            NodeKind::SliceLiteral => "slice_literal",
            NodeKind::HexLiteral => "hex_literal",
            NodeKind::Identifier => "identifier",
            NodeKind::NegativeIdentifier => "negative_identifier",
            NodeKind::Number => "number",
            NodeKind::StackRef => "stack_ref",
            NodeKind::StackOp => "stack_op",
            NodeKind::StackIndex => "stack_index",
            NodeKind::String => "string",
            NodeKind::Error => "ERROR",
            NodeKind::Include => "include",
            NodeKind::ProgramStart => "PROGRAM{",
            NodeKind::ProgramEnd => "END>c",
            NodeKind::DeclProc => "DECLPROC",
            NodeKind::DeclMethod => "DECLMETHOD",
            NodeKind::DeclGlobVar => "DECLGLOBVAR",
            NodeKind::ProcStart => "PROC:<{",
            NodeKind::ProcInlineStart => "PROCINLINE:<{",
            NodeKind::ProcRefStart => "PROCREF:<{",
            NodeKind::MethodStart => "METHOD:<{",
            NodeKind::BlockEnd => "}>",
            NodeKind::IfStart => "IF:<{",
            NodeKind::ElseStart => "ELSE<{",
            NodeKind::IfjmpStart => "IFJMP:<{",
            NodeKind::WhileStart => "WHILE:<{",
            NodeKind::WhileDo => "}>DO<{",
            NodeKind::RepeatStart => "REPEAT:<{",
            NodeKind::UntilStart => "UNTIL:<{",
            NodeKind::CallDict => "CALLDICT",
            NodeKind::InlineCallDict => "INLINECALLDICT",
        }
    }

    pub const fn is_named(self) -> bool {
        (self as u16) < (NodeKind::Include as u16)
    }

    /// Kinds whose `name` field introduces a procedure body.
    pub fn is_definition(self) -> bool {
        matches!(
            self,
            NodeKind::ProcDefinition
                | NodeKind::ProcInlineDefinition
                | NodeKind::ProcRefDefinition
                | NodeKind::MethodDefinition
        )
    }

    /// Kinds that carry a `name` field.
    pub fn has_name_field(self) -> bool {
        self.is_definition() || matches!(self, NodeKind::Declaration | NodeKind::GlobalVar)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_table_order() {
        for (i, kind) in NodeKind::ALL.iter().enumerate() {
            assert_eq!(kind.id() as usize, i);
            assert_eq!(NodeKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(NodeKind::from_id(NodeKind::COUNT as u16), None);
    }

    #[test]
    fn anonymous_kinds_are_literal_tokens() {
        assert!(NodeKind::Identifier.is_named());
        assert!(NodeKind::String.is_named());
        assert!(NodeKind::Error.is_named());
        assert!(!NodeKind::Include.is_named());
        assert!(!NodeKind::BlockEnd.is_named());
        assert_eq!(NodeKind::WhileDo.as_str(), "}>DO<{");
    }

    #[test]
    fn name_field_kinds() {
        assert!(NodeKind::MethodDefinition.has_name_field());
        assert!(NodeKind::GlobalVar.has_name_field());
        assert!(!NodeKind::GlobalVar.is_definition());
        assert!(!NodeKind::ProcCall.has_name_field());
    }
}
