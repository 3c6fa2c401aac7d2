//! # Registers and Widths
//!
//! The x86-64 registers the generated code touches, the fixed argument
//! register orderings of the calling conventions, and the memory access
//! widths that `#` loads and `data(...)` directives understand.
use core::fmt;
use lazy_static::lazy_static;
use maplit::hashmap;
use std::collections::HashMap;

/// A general purpose register (or one of its sub-registers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Register {
    Rax,
    Rdi,
    Rsi,
    Rdx,
    Rcx,
    R8,
    R9,
    R10,
    Rsp,
    /// The low byte of `rsi`.
    Sil,
    /// The low byte of `rdi`.
    Dil,
    /// The low word of `rdi`.
    Di,
    /// The low double word of `rdi`.
    Edi,
}

impl Register {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rax => "rax",
            Self::Rdi => "rdi",
            Self::Rsi => "rsi",
            Self::Rdx => "rdx",
            Self::Rcx => "rcx",
            Self::R8 => "r8",
            Self::R9 => "r9",
            Self::R10 => "r10",
            Self::Rsp => "rsp",
            Self::Sil => "sil",
            Self::Dil => "dil",
            Self::Di => "di",
            Self::Edi => "edi",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The registers used to pass arguments to a routine, in order.
pub const CALL_ARGUMENT_REGISTERS: [Register; 6] = [
    Register::Rdi,
    Register::Rsi,
    Register::Rdx,
    Register::Rcx,
    Register::R8,
    Register::R9,
];

/// The registers used to make a system call, starting with the
/// system call number.
pub const SYSCALL_ARGUMENT_REGISTERS: [Register; 7] = [
    Register::Rax,
    Register::Rdi,
    Register::Rsi,
    Register::Rdx,
    Register::R10,
    Register::R8,
    Register::R9,
];

/// The size of one stack slot in bytes.
pub const WORD_SIZE: u64 = 8;

/// The width of a memory access or data element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Width {
    Byte,
    Word,
    Dword,
    Qword,
}

lazy_static! {
    static ref WIDTHS: HashMap<&'static str, Width> = hashmap! {
        "byte" => Width::Byte,
        "word" => Width::Word,
        "dword" => Width::Dword,
        "qword" => Width::Qword,
    };
}

impl Width {
    /// Look up a width by its name in the source notation.
    pub fn from_name(name: &str) -> Option<Self> {
        WIDTHS.get(name).copied()
    }

    /// The size specifier used in memory operands.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Word => "word",
            Self::Dword => "dword",
            Self::Qword => "qword",
        }
    }

    /// The data definition directive for elements of this width.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::Byte => "db",
            Self::Word => "dw",
            Self::Dword => "dd",
            Self::Qword => "dq",
        }
    }

    /// The part of `rdi` that holds a value of this width.
    pub fn rdi(&self) -> Register {
        match self {
            Self::Byte => Register::Dil,
            Self::Word => Register::Di,
            Self::Dword => Register::Edi,
            Self::Qword => Register::Rdi,
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
