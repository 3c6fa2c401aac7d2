//! # Instructions
//!
//! The instructions and directives the generator emits. Every
//! `Instruction` renders to exactly one line of NASM-syntax assembly,
//! without indentation or a trailing newline.
use super::{Register, Width};
use core::fmt;

/// A comparison tested by a `set*` instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    Equal,
    NotEqual,
}

impl Condition {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Equal => "e",
            Self::NotEqual => "ne",
        }
    }
}

/// A two-operand arithmetic instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arithmetic {
    Add,
    Sub,
}

impl Arithmetic {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
        }
    }
}

/// An instruction operand.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    Register(Register),
    Immediate(u64),
    /// A symbol resolved by the assembler, used as an immediate.
    Symbol(String),
    /// The memory at `[base + offset]`.
    Memory { base: Register, offset: u64 },
    /// The memory at `[base]`, accessed with an explicit width.
    Sized { width: Width, base: Register },
}

impl Operand {
    /// The stack slot `offset` bytes above `rsp`.
    pub fn stack(offset: u64) -> Self {
        Self::Memory {
            base: Register::Rsp,
            offset,
        }
    }
}

impl From<Register> for Operand {
    fn from(reg: Register) -> Self {
        Self::Register(reg)
    }
}

impl From<u64> for Operand {
    fn from(n: u64) -> Self {
        Self::Immediate(n)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Register(reg) => write!(f, "{reg}"),
            Self::Immediate(n) => write!(f, "{n}"),
            Self::Symbol(name) => write!(f, "{name}"),
            Self::Memory { base, offset: 0 } => write!(f, "[{base}]"),
            Self::Memory { base, offset } => write!(f, "[{base} + {offset}]"),
            Self::Sized { width, base } => write!(f, "{width} [{base}]"),
        }
    }
}

/// One line of generated assembly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    Push(Operand),
    Pop(Register),
    Mov { dst: Operand, src: Operand },
    Arithmetic { op: Arithmetic, dst: Register, src: Operand },
    Xor(Register, Register),
    Cmp(Register, Register),
    Test(Register, Register),
    Set(Condition, Register),
    Call(String),
    Syscall,
    Jmp(String),
    Jnz(String),
    Ret,
    /// `name:`
    Label(String),
    /// `global name`
    Global(String),
    /// `section name`
    Section(String),
    /// `db 1, 2, 3` and friends.
    Data(Width, Vec<u64>),
}

impl Instruction {
    pub fn mov(dst: impl Into<Operand>, src: impl Into<Operand>) -> Self {
        Self::Mov {
            dst: dst.into(),
            src: src.into(),
        }
    }

    pub fn add(dst: Register, src: impl Into<Operand>) -> Self {
        Self::Arithmetic {
            op: Arithmetic::Add,
            dst,
            src: src.into(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Push(src) => write!(f, "push {src}"),
            Self::Pop(dst) => write!(f, "pop {dst}"),
            Self::Mov { dst, src } => write!(f, "mov {dst}, {src}"),
            Self::Arithmetic { op, dst, src } => write!(f, "{} {dst}, {src}", op.mnemonic()),
            Self::Xor(a, b) => write!(f, "xor {a}, {b}"),
            Self::Cmp(a, b) => write!(f, "cmp {a}, {b}"),
            Self::Test(a, b) => write!(f, "test {a}, {b}"),
            Self::Set(cond, dst) => write!(f, "set{} {dst}", cond.suffix()),
            Self::Call(name) => write!(f, "call {name}"),
            Self::Syscall => write!(f, "syscall"),
            Self::Jmp(label) => write!(f, "jmp {label}"),
            Self::Jnz(label) => write!(f, "jnz {label}"),
            Self::Ret => write!(f, "ret"),
            Self::Label(name) => write!(f, "{name}:"),
            Self::Global(name) => write!(f, "global {name}"),
            Self::Section(name) => write!(f, "section {name}"),
            Self::Data(width, values) => {
                write!(f, "{} ", width.directive())?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
        }
    }
}
