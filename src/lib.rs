//! Fift assembly grammar.
//!
//! [`language`] hands out the raw grammar definition and [`Language::new`]
//! turns it into a handle that can parse:
//!
//! ```
//! use fift_grammar::{language, Language};
//!
//! let language = Language::new(language()).unwrap();
//! let tree = language.parser().parse("PROGRAM{ END>c").unwrap();
//! assert_eq!(tree.root_node().to_sexp(), "(source_file (program))");
//! ```
//!
//! The [`analysis`] module holds the editor features built on the syntax
//! tree: name resolution, references, folding, semantic tokens and hover.

pub mod analysis;
mod lang;

pub use lang::grammar::{
    language, GrammarDef, KindInfo, LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION,
};
pub use lang::kind::NodeKind;
pub use lang::language::{Language, LoadError};
pub use lang::parser::{ParseError, Parser};
pub use lang::tree::{Descendants, Node, Point, Range, Tree};
pub use lang::{parse, Error};
