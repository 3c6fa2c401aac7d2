//! # Error Module
//!
//! Every failure in the pipeline is fatal: the first error stops both the
//! scanner and the generator, and is handed back to the caller as-is.
//! No source positions are tracked, so each variant carries just enough
//! of the offending construct to describe it.
use crate::token::{Sigil, Token};
use core::fmt;

/// An error produced while transpiling.
#[derive(Debug)]
pub enum Error {
    /// The input ended inside a string literal.
    UnterminatedString(String),
    /// A sigil was placed directly before a function call.
    PrefixedFunction(Sigil, String),
    /// The input ended inside a function call's argument list.
    UnterminatedFunction(String),
    /// A run of digits too large for a 64-bit word.
    IntegerOutOfRange(String),
    /// A token that matches none of the generation rules.
    InvalidConstruct(Token),
    /// Reading the input or writing the output failed.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnterminatedString(text) => {
                write!(f, "unterminated string literal \"{text}")
            }
            Self::PrefixedFunction(sigil, name) => {
                write!(f, "function call `{name}(...)` cannot be prefixed with `{sigil}`")
            }
            Self::UnterminatedFunction(name) => {
                write!(f, "unterminated argument list for `{name}(`")
            }
            Self::IntegerOutOfRange(digits) => {
                write!(f, "integer literal {digits} does not fit in 64 bits")
            }
            Self::InvalidConstruct(token) => write!(f, "invalid construct `{token}`"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
