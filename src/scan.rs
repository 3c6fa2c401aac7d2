//! # Scanner Module
//!
//! A hand-written, character-at-a-time scanner. It pulls characters from
//! any `char` iterator and hands out tokens one at a time, so nothing is
//! read from the input before the consumer asks for the next token.
//!
//! ## Notation
//!
//! ```text
//! ; comment until the end of the line
//! "string literal, copied verbatim"
//! 42        bare integer
//! name      bare identifier
//! $3  :loop sigil-prefixed values (one of $ @ ? : # .)
//! call(exit, 1)
//! ```
//!
//! A bare payload is a maximal run of characters that are neither
//! whitespace nor `(`. If the run is directly followed by `(`, it names a
//! function call instead, and the arguments up to the closing `)` are split
//! on commas.
use crate::{
    token::{Literal, Sigil, Token},
    Error,
};
use log::trace;
use std::iter::{FusedIterator, Peekable};

/// Scan a string slice.
pub fn scan(source: &str) -> Scanner<std::str::Chars<'_>> {
    Scanner::new(source.chars())
}

/// A lazy token stream over a character stream.
///
/// After yielding an error, the scanner yields nothing else.
pub struct Scanner<I: Iterator<Item = char>> {
    chars: Peekable<I>,
    failed: bool,
}

impl<I: Iterator<Item = char>> Scanner<I> {
    pub fn new(chars: I) -> Self {
        Self {
            chars: chars.peekable(),
            failed: false,
        }
    }

    /// Skip whitespace and comments, then scan one token.
    fn token(&mut self) -> Option<Result<Token, Error>> {
        loop {
            match *self.chars.peek()? {
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                ';' => self.skip_comment(),
                '"' => return Some(self.string()),
                _ => return Some(self.bare()),
            }
        }
    }

    /// Skip a comment, leaving the newline (if any) to the whitespace rule.
    fn skip_comment(&mut self) {
        while self.chars.next_if(|&c| c != '\n').is_some() {}
    }

    fn string(&mut self) -> Result<Token, Error> {
        self.chars.next();
        let mut text = String::new();
        loop {
            match self.chars.next() {
                Some('"') => return Ok(Token::Str(text)),
                Some(c) => text.push(c),
                None => return Err(Error::UnterminatedString(text)),
            }
        }
    }

    fn bare(&mut self) -> Result<Token, Error> {
        let sigil = self
            .chars
            .peek()
            .copied()
            .and_then(Sigil::from_char);
        if sigil.is_some() {
            self.chars.next();
        }

        let mut run = String::new();
        while let Some(c) = self.chars.next_if(|&c| !c.is_whitespace() && c != '(') {
            run.push(c);
        }

        match (self.chars.peek().copied(), sigil) {
            (Some('('), Some(sigil)) => Err(Error::PrefixedFunction(sigil, run)),
            (Some('('), None) => self.call(run),
            _ => Ok(Token::Value {
                sigil,
                payload: Literal::classify(run)?,
            }),
        }
    }

    fn call(&mut self, name: String) -> Result<Token, Error> {
        self.chars.next();
        let mut args = vec![];
        loop {
            while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
            match self.chars.peek().copied() {
                None => return Err(Error::UnterminatedFunction(name)),
                Some(')') => {
                    self.chars.next();
                    return Ok(Token::Call { name, args });
                }
                Some(_) => {}
            }

            // Whitespace inside or after an argument belongs to it.
            let mut raw = String::new();
            while let Some(c) = self.chars.next_if(|&c| c != ',' && c != ')') {
                raw.push(c);
            }
            args.push(Literal::classify(raw)?);
            self.chars.next_if_eq(&',');
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for Scanner<I> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.token()?;
        match &result {
            Ok(token) => trace!("scanned `{token}`"),
            Err(_) => self.failed = true,
        }
        Some(result)
    }
}

impl<I: Iterator<Item = char>> FusedIterator for Scanner<I> {}
