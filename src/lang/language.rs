use std::{error, fmt, ptr};

use crate::lang::grammar::{GrammarDef, LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION, NAME_FIELD};
use crate::lang::kind::NodeKind;
use crate::lang::parser::Parser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    IncompatibleVersion(u32),
    EmptyKindTable,
    KindMismatch {
        id: u16,
        expected: &'static str,
        found: &'static str,
    },
    InvalidRootKind(u16),
    MissingField(&'static str),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::IncompatibleVersion(v) => write!(
                f,
                "Incompatible grammar version {}, expected {} through {}",
                v, MIN_COMPATIBLE_LANGUAGE_VERSION, LANGUAGE_VERSION
            ),
            LoadError::EmptyKindTable => write!(f, "Grammar has no node kinds"),
            LoadError::KindMismatch { id, expected, found } => write!(
                f,
                "Node kind {} is `{}` but the parser produces `{}`",
                id, found, expected
            ),
            LoadError::InvalidRootKind(id) => write!(f, "Root node kind {} is not a named kind", id),
            LoadError::MissingField(name) => write!(f, "Grammar does not declare field `{}`", name),
        }
    }
}

impl error::Error for LoadError {}

/// A loaded grammar. Cheap to copy; every copy refers to the same static
/// definition.
#[derive(Copy, Clone)]
pub struct Language {
    def: &'static GrammarDef,
}

impl Language {
    /// Wraps a raw grammar definition after checking that it describes the
    /// node kinds our parser produces.
    pub fn new(def: &'static GrammarDef) -> Result<Language, LoadError> {
        if def.version < MIN_COMPATIBLE_LANGUAGE_VERSION || def.version > LANGUAGE_VERSION {
            return Err(LoadError::IncompatibleVersion(def.version));
        }

        if def.kinds.is_empty() {
            return Err(LoadError::EmptyKindTable);
        }

        for kind in NodeKind::ALL {
            let found = def.kinds.get(kind.id() as usize);
            match found {
                Some(info) if info.name == kind.as_str() && info.named == kind.is_named() => {}
                _ => {
                    return Err(LoadError::KindMismatch {
                        id: kind.id(),
                        expected: kind.as_str(),
                        found: found.map_or("<missing>", |info| info.name),
                    });
                }
            }
        }

        match def.kinds.get(def.root_kind as usize) {
            Some(info) if info.named => {}
            _ => return Err(LoadError::InvalidRootKind(def.root_kind)),
        }

        if !def.fields.contains(&NAME_FIELD) {
            return Err(LoadError::MissingField(NAME_FIELD));
        }

        log::debug!(
            "Loaded grammar {} v{} with {} node kinds",
            def.name,
            def.version,
            def.kinds.len()
        );

        Ok(Language { def })
    }

    pub fn name(&self) -> &'static str {
        self.def.name
    }

    pub fn version(&self) -> u32 {
        self.def.version
    }

    pub fn node_kind_count(&self) -> usize {
        self.def.kinds.len()
    }

    pub fn node_kind_for_id(&self, id: u16) -> Option<&'static str> {
        self.def.kinds.get(id as usize).map(|info| info.name)
    }

    pub fn node_kind_is_named(&self, id: u16) -> bool {
        self.def.kinds.get(id as usize).is_some_and(|info| info.named)
    }

    pub fn id_for_node_kind(&self, name: &str, named: bool) -> Option<u16> {
        self.def
            .kinds
            .iter()
            .position(|info| info.name == name && info.named == named)
            .map(|i| i as u16)
    }

    pub fn field_count(&self) -> usize {
        self.def.fields.len()
    }

    /// Field ids start at 1.
    pub fn field_name_for_id(&self, id: u16) -> Option<&'static str> {
        let index = (id as usize).checked_sub(1)?;
        self.def.fields.get(index).copied()
    }

    pub fn field_id_for_name(&self, name: &str) -> Option<u16> {
        self.def
            .fields
            .iter()
            .position(|field| *field == name)
            .map(|i| i as u16 + 1)
    }

    pub fn parser(&self) -> Parser {
        Parser::new(*self)
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.def, other.def)
    }
}

impl Eq for Language {}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Language({} v{})", self.def.name, self.def.version)
    }
}
