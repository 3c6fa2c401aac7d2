//! # Generator Module
//!
//! Lowers tokens, in source order, into x86-64 instructions.
//!
//! The generated code runs on an implicit evaluation stack: the machine
//! stack itself, one 8-byte slot per value, where slot `n` is the word at
//! `[rsp + 8n]`. The generator keeps no model of this stack. Each rule just
//! emits instructions with a fixed effect on it, for example:
//!
//! | Token          | Effect                                          |
//! |----------------|-------------------------------------------------|
//! | `5`            | push 5                                          |
//! | `+` `-`        | pop `b`, pop `a`, push `a + b` / `a - b`        |
//! | `==` `!=`      | pop `b`, pop `a`, push `1` or `0`               |
//! | `$n`           | push a copy of slot `n`                         |
//! | `$name`        | push the value of the symbol `name`             |
//! | `@n`           | push the address of slot `n`                    |
//! | `?n`           | drop `n` slots                                  |
//! | `:n`           | swap slot 0 with slot `n`                       |
//! | `#width`       | pop an address, push the zero-extended value    |
//! | `call(f, n)`   | pop `n` arguments into registers, push result   |
//! | `syscall(n)`   | pop `n` values into registers, push result      |
//! | `jmpif(l)`     | pop, jump if nonzero                            |
//! | `return()`     | pop the return value, return                    |
//! | `args(n)`      | push the first `n` argument registers           |
//!
//! Labels (`:name`), sections (`.name`), `global`, `data` and string
//! literals only emit directives and leave the stack alone.
use crate::{
    asm::{
        Arithmetic, Condition, Instruction, Operand, Register, Width, CALL_ARGUMENT_REGISTERS,
        SYSCALL_ARGUMENT_REGISTERS, WORD_SIZE,
    },
    token::{Literal, Sigil, Token},
    Error,
};
use lazy_static::lazy_static;
use log::{debug, trace};
use maplit::{btreemap, hashmap};
use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    iter::FusedIterator,
};

/// A function rule. Returns `None` if the arguments don't fit the rule.
type Rule = fn(&[Literal]) -> Option<Vec<Instruction>>;

lazy_static! {
    static ref FUNCTIONS: BTreeMap<&'static str, Rule> = btreemap! {
        "global" => global as Rule,
        "data" => data as Rule,
        "call" => call as Rule,
        "syscall" => syscall as Rule,
        "jmp" => jmp as Rule,
        "jmpif" => jmpif as Rule,
        "return" => ret as Rule,
        "args" => arguments as Rule,
    };
    static ref COMPARISONS: HashMap<&'static str, Condition> = hashmap! {
        "==" => Condition::Equal,
        "!=" => Condition::NotEqual,
    };
    static ref ARITHMETIC: HashMap<&'static str, Arithmetic> = hashmap! {
        "+" => Arithmetic::Add,
        "-" => Arithmetic::Sub,
    };
}

/// Lower a single token into the instructions it stands for.
pub fn lower(token: &Token) -> Result<Vec<Instruction>, Error> {
    let instructions = match token {
        Token::Str(text) => Some(vec![string_data(text)]),
        Token::Value { sigil, payload } => value(*sigil, payload),
        Token::Call { name, args } => FUNCTIONS.get(name.as_str()).and_then(|rule| rule(args)),
    };
    instructions.ok_or_else(|| Error::InvalidConstruct(token.clone()))
}

/// A lazy stream of output lines over a stream of tokens.
///
/// All the lines of one token are handed out before the next token is
/// pulled. The first error, whether it came from the token stream or from
/// lowering, ends the stream.
pub struct Generator<T> {
    tokens: T,
    pending: VecDeque<Instruction>,
    failed: bool,
}

impl<T> Generator<T>
where
    T: Iterator<Item = Result<Token, Error>>,
{
    pub fn new(tokens: T) -> Self {
        Self {
            tokens,
            pending: VecDeque::new(),
            failed: false,
        }
    }
}

impl<T> Iterator for Generator<T>
where
    T: Iterator<Item = Result<Token, Error>>,
{
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(instruction) = self.pending.pop_front() {
                let line = instruction.to_string();
                trace!("emitted `{line}`");
                return Some(Ok(line));
            }

            let lowered = self.tokens.next()?.and_then(|token| {
                let instructions = lower(&token)?;
                debug!("lowered `{token}` into {} instruction(s)", instructions.len());
                Ok(instructions)
            });
            match lowered {
                Ok(instructions) => self.pending.extend(instructions),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<T> FusedIterator for Generator<T> where T: Iterator<Item = Result<Token, Error>> {}

/// A NUL-terminated byte string.
fn string_data(text: &str) -> Instruction {
    let mut bytes: Vec<u64> = text.bytes().map(u64::from).collect();
    if !text.ends_with('\0') {
        bytes.push(0);
    }
    Instruction::Data(Width::Byte, bytes)
}

/// The byte offset of stack slot `n`.
fn slot(n: u64) -> Option<u64> {
    n.checked_mul(WORD_SIZE)
}

fn value(sigil: Option<Sigil>, payload: &Literal) -> Option<Vec<Instruction>> {
    use Instruction::*;
    use Register::*;

    let name = payload.as_identifier();
    Some(match (sigil, payload) {
        (None, Literal::Integer(n)) => vec![Push((*n).into())],
        (None, Literal::Identifier(_)) => operator(name?)?,

        (Some(Sigil::Dollar), Literal::Integer(n)) => vec![
            Instruction::mov(Rax, Operand::stack(slot(*n)?)),
            Push(Rax.into()),
        ],
        (Some(Sigil::Dollar), Literal::Identifier(_)) => vec![
            Instruction::mov(Rax, Operand::Symbol(name?.to_string())),
            Push(Rax.into()),
        ],

        (Some(Sigil::At), Literal::Integer(n)) => vec![
            Instruction::mov(Rax, Rsp),
            Instruction::add(Rax, slot(*n)?),
            Push(Rax.into()),
        ],

        (Some(Sigil::Question), Literal::Integer(n)) => vec![Instruction::add(Rsp, slot(*n)?)],

        (Some(Sigil::Colon), Literal::Integer(n)) => {
            let offset = slot(*n)?;
            vec![
                Instruction::mov(Rax, Operand::stack(0)),
                Instruction::mov(Rdi, Operand::stack(offset)),
                Instruction::mov(Operand::stack(0), Rdi),
                Instruction::mov(Operand::stack(offset), Rax),
            ]
        }
        (Some(Sigil::Colon), Literal::Identifier(_)) => vec![Label(name?.to_string())],

        (Some(Sigil::Hash), Literal::Identifier(_)) => {
            let width = Width::from_name(name?)?;
            vec![
                Pop(Rax),
                Xor(Rdi, Rdi),
                Instruction::mov(width.rdi(), Operand::Sized { width, base: Rax }),
                Push(Rdi.into()),
            ]
        }

        (Some(Sigil::Dot), Literal::Identifier(_)) => vec![Section(name?.to_string())],

        _ => return None,
    })
}

/// A binary operator on the top two slots.
///
/// The first value popped is the right-hand operand.
fn operator(op: &str) -> Option<Vec<Instruction>> {
    use Instruction::*;
    use Register::*;

    if let Some(cond) = COMPARISONS.get(op) {
        Some(vec![
            Pop(Rdi),
            Pop(Rax),
            Xor(Rsi, Rsi),
            Cmp(Rax, Rdi),
            Set(*cond, Sil),
            Push(Rsi.into()),
        ])
    } else {
        let op = *ARITHMETIC.get(op)?;
        Some(vec![
            Pop(Rdi),
            Pop(Rax),
            Instruction::Arithmetic {
                op,
                dst: Rax,
                src: Rdi.into(),
            },
            Push(Rax.into()),
        ])
    }
}

/// Pop `argc` values into the first `argc` registers, last register first.
fn pop_arguments(registers: &[Register], argc: u64) -> Option<Vec<Instruction>> {
    let argc = usize::try_from(argc).ok()?;
    Some(
        registers
            .get(..argc)?
            .iter()
            .rev()
            .map(|reg| Instruction::Pop(*reg))
            .collect(),
    )
}

fn global(args: &[Literal]) -> Option<Vec<Instruction>> {
    match args {
        [name] => Some(vec![Instruction::Global(name.as_identifier()?.to_string())]),
        _ => None,
    }
}

fn data(args: &[Literal]) -> Option<Vec<Instruction>> {
    let (width, values) = args.split_first()?;
    let width = Width::from_name(width.as_identifier()?)?;
    if values.is_empty() {
        return None;
    }
    let values = values
        .iter()
        .map(Literal::as_integer)
        .collect::<Option<Vec<_>>>()?;
    Some(vec![Instruction::Data(width, values)])
}

fn call(args: &[Literal]) -> Option<Vec<Instruction>> {
    match args {
        [name, argc] => {
            let name = name.as_identifier()?;
            let mut instructions = pop_arguments(&CALL_ARGUMENT_REGISTERS, argc.as_integer()?)?;
            instructions.push(Instruction::Call(name.to_string()));
            instructions.push(Instruction::Push(Register::Rax.into()));
            Some(instructions)
        }
        _ => None,
    }
}

fn syscall(args: &[Literal]) -> Option<Vec<Instruction>> {
    match args {
        [argc] => {
            let mut instructions =
                pop_arguments(&SYSCALL_ARGUMENT_REGISTERS, argc.as_integer()?)?;
            instructions.push(Instruction::Syscall);
            instructions.push(Instruction::Push(Register::Rax.into()));
            Some(instructions)
        }
        _ => None,
    }
}

fn jmp(args: &[Literal]) -> Option<Vec<Instruction>> {
    match args {
        [label] => Some(vec![Instruction::Jmp(label.as_identifier()?.to_string())]),
        _ => None,
    }
}

fn jmpif(args: &[Literal]) -> Option<Vec<Instruction>> {
    use Register::*;
    match args {
        [label] => Some(vec![
            Instruction::Pop(Rax),
            Instruction::Test(Rax, Rax),
            Instruction::Jnz(label.as_identifier()?.to_string()),
        ]),
        _ => None,
    }
}

fn ret(args: &[Literal]) -> Option<Vec<Instruction>> {
    args.is_empty()
        .then(|| vec![Instruction::Pop(Register::Rax), Instruction::Ret])
}

fn arguments(args: &[Literal]) -> Option<Vec<Instruction>> {
    match args {
        [n] => {
            let n = usize::try_from(n.as_integer()?).ok()?;
            Some(
                CALL_ARGUMENT_REGISTERS
                    .get(..n)?
                    .iter()
                    .map(|reg| Instruction::Push((*reg).into()))
                    .collect(),
            )
        }
        _ => None,
    }
}
