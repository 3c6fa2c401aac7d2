//! # Assembly Module
//!
//! A typed model of the x86-64 assembly that the generator writes out.
//! The generator never formats text itself: it builds `Instruction`s,
//! and each one renders to a single NASM-syntax line.
pub mod instruction;
pub mod register;

pub use instruction::{Arithmetic, Condition, Instruction, Operand};
pub use register::{
    Register, Width, CALL_ARGUMENT_REGISTERS, SYSCALL_ARGUMENT_REGISTERS, WORD_SIZE,
};
