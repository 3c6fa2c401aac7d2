//! # Stasm
//!
//! A one-pass transpiler from a minimal, stack-oriented notation into
//! x86-64 assembly (NASM syntax), ready to hand to an assembler and linker.
//!
//! ```text
//! global(_start)
//! ..text
//! :_start
//!     60 42 syscall(2)    ; exit(42)
//! ```
//!
//! becomes
//!
//! ```text
//! global _start
//! section .text
//! _start:
//! push 60
//! push 42
//! pop rdi
//! pop rax
//! syscall
//! push rax
//! ```
//!
//! ## Pipeline
//!
//! 1. [The Scanner](./scan/index.html) turns characters into tokens.
//! 2. [The Generator](./gen/index.html) turns each token into instructions.
//! 3. [The Assembly Model](./asm/index.html) renders each instruction as one line.
//!
//! Both stages are lazy iterators: a token is only scanned once the
//! generator has handed out every line of the token before it, and the
//! first error stops the whole pipeline. Lines that were already written
//! stay written.
use log::info;
use std::io::{Read, Write};

pub mod asm;
pub mod error;
pub mod gen;
pub mod scan;
pub mod token;

pub use error::Error;
pub use gen::Generator;
pub use scan::{scan, Scanner};
pub use token::{Literal, Sigil, Token};

/// Transpile source text into assembly text, one newline-terminated line
/// per instruction.
pub fn compile(source: &str) -> Result<String, Error> {
    let mut output = String::new();
    for line in Generator::new(scan(source)) {
        output += &line?;
        output.push('\n');
    }
    Ok(output)
}

/// Read all of `input`, then write the generated assembly to `output`
/// line by line as it is produced.
///
/// Returns the number of lines written. The writer is flushed whether or
/// not transpiling succeeds.
pub fn transpile(mut input: impl Read, mut output: impl Write) -> Result<usize, Error> {
    let mut source = String::new();
    input.read_to_string(&mut source)?;
    info!("Read {} bytes of source", source.len());

    let result = write_lines(&source, &mut output);
    output.flush()?;
    let count = result?;
    info!("Wrote {count} lines of assembly");
    Ok(count)
}

fn write_lines(source: &str, output: &mut impl Write) -> Result<usize, Error> {
    let mut count = 0;
    for line in Generator::new(scan(source)) {
        writeln!(output, "{}", line?)?;
        count += 1;
    }
    Ok(count)
}
