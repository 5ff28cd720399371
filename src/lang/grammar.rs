use pest_derive::Parser;

use crate::lang::kind::NodeKind;

#[derive(Parser)]
#[grammar = "lang/fift.pest"]
pub(crate) struct FiftParser;

/// Current version of the grammar definition layout.
pub const LANGUAGE_VERSION: u32 = 14;

/// Oldest definition layout a [`Language`](crate::Language) can still be
/// built from.
pub const MIN_COMPATIBLE_LANGUAGE_VERSION: u32 = 13;

/// One entry of a grammar's node-kind table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KindInfo {
    pub name: &'static str,
    pub named: bool,
}

/// Raw grammar definition, as handed out by [`language`]. It is only
/// metadata; wrap it with [`Language::new`](crate::Language::new) to get a
/// handle that can parse.
#[derive(Debug)]
pub struct GrammarDef {
    pub name: &'static str,
    pub version: u32,
    pub kinds: &'static [KindInfo],
    pub fields: &'static [&'static str],
    pub root_kind: u16,
}

const fn kind_table() -> [KindInfo; NodeKind::COUNT] {
    let mut table = [KindInfo {
        name: "",
        named: false,
    }; NodeKind::COUNT];

    let mut i = 0;
    while i < NodeKind::COUNT {
        let kind = NodeKind::ALL[i];
        table[i] = KindInfo {
            name: kind.as_str(),
            named: kind.is_named(),
        };
        i += 1;
    }

    table
}

pub(crate) static KINDS: [KindInfo; NodeKind::COUNT] = kind_table();

pub(crate) const NAME_FIELD: &str = "name";

static FIELDS: [&str; 1] = [NAME_FIELD];

static FIFT: GrammarDef = GrammarDef {
    name: "fift",
    version: LANGUAGE_VERSION,
    kinds: &KINDS,
    fields: &FIELDS,
    root_kind: NodeKind::SourceFile.id(),
};

/// Returns the raw Fift grammar definition.
pub fn language() -> &'static GrammarDef {
    &FIFT
}
