use std::{error, fmt};

pub mod grammar;
pub mod kind;
pub mod language;
pub mod parser;
pub mod tree;

use language::{Language, LoadError};
use parser::ParseError;
use tree::Tree;

#[derive(Debug)]
pub enum Error {
    Load(LoadError),
    Parse(ParseError),
}

impl From<LoadError> for Error {
    fn from(e: LoadError) -> Self {
        Error::Load(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Load(e) => write!(f, "Error loading Fift grammar: {}", e),
            Error::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Load(e) => Some(e),
            Error::Parse(e) => Some(e),
        }
    }
}

/// Loads the Fift grammar and parses `source` with it.
pub fn parse(source: &str) -> Result<Tree, Error> {
    let language = Language::new(grammar::language())?;
    Ok(language.parser().parse(source)?)
}
