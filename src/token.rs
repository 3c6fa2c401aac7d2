//! # Token Module
//!
//! The three shapes of token the scanner produces, and the literal type
//! shared by value payloads and function arguments.
//!
//! Tokens render back into their source notation with `Display`. The
//! rendering is what diagnostics quote when a token can't be lowered.
use crate::Error;
use core::fmt;

/// A single leading character that changes how a bare payload is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sigil {
    /// `$`: copy a stack slot, or push a symbol's value.
    Dollar,
    /// `@`: push the address of a stack slot.
    At,
    /// `?`: discard stack slots.
    Question,
    /// `:`: swap with a stack slot, or define a label.
    Colon,
    /// `#`: load through the address on top of the stack.
    Hash,
    /// `.`: switch sections.
    Dot,
}

impl Sigil {
    /// Every sigil, in the order they're documented.
    pub const ALL: [Sigil; 6] = [
        Self::Dollar,
        Self::At,
        Self::Question,
        Self::Colon,
        Self::Hash,
        Self::Dot,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|sigil| sigil.as_char() == c)
    }

    pub fn as_char(&self) -> char {
        match self {
            Self::Dollar => '$',
            Self::At => '@',
            Self::Question => '?',
            Self::Colon => ':',
            Self::Hash => '#',
            Self::Dot => '.',
        }
    }
}

impl fmt::Display for Sigil {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A bare payload or function argument: an unsigned integer or an identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    Integer(u64),
    Identifier(String),
}

impl Literal {
    /// Decide once whether raw text is an integer.
    ///
    /// Text is an integer if and only if it is non-empty and made entirely of
    /// ASCII decimal digits. Anything else, including the empty string and
    /// text with a leading `-`, is kept verbatim as an identifier.
    pub fn classify(raw: String) -> Result<Self, Error> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            raw.parse()
                .map(Self::Integer)
                .map_err(|_| Error::IntegerOutOfRange(raw))
        } else {
            Ok(Self::Identifier(raw))
        }
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Identifier(_) => None,
        }
    }

    /// The identifier text, if this literal is a non-empty identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) if !name.is_empty() => Some(name),
            _ => None,
        }
    }
}

impl From<u64> for Literal {
    fn from(n: u64) -> Self {
        Self::Integer(n)
    }
}

impl From<&str> for Literal {
    fn from(name: &str) -> Self {
        Self::Identifier(name.to_string())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Identifier(name) => write!(f, "{name}"),
        }
    }
}

/// A token of the source notation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// `name(arg, ...)`
    Call { name: String, args: Vec<Literal> },
    /// `[sigil]payload`
    Value {
        sigil: Option<Sigil>,
        payload: Literal,
    },
    /// `"text"`
    Str(String),
}

impl Token {
    pub fn call(name: impl ToString, args: impl IntoIterator<Item = Literal>) -> Self {
        Self::Call {
            name: name.to_string(),
            args: args.into_iter().collect(),
        }
    }

    pub fn value(sigil: Option<Sigil>, payload: impl Into<Literal>) -> Self {
        Self::Value {
            sigil,
            payload: payload.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Self::Value { sigil, payload } => {
                if let Some(sigil) = sigil {
                    write!(f, "{sigil}")?;
                }
                write!(f, "{payload}")
            }
            Self::Str(text) => write!(f, "\"{text}\""),
        }
    }
}
