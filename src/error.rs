use std::fmt;

/// A syntax problem confined to one source line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("'{0}' is not a label.")]
    NotALabel(String),
    #[error("'{0}' is not a register.")]
    NotARegister(String),
    #[error("'{0}' is not a number.")]
    NotANumber(String),
    #[error("'{0}' is not a string.")]
    NotAString(String),
    #[error("'{0}' is not ascii encoded string.")]
    NotAscii(String),
    #[error("String is too large ({len} bytes, at most {max}).")]
    StringTooLong { len: usize, max: usize },
    #[error("'{mnemonic}' requires {expected} parameters, found {found}.")]
    OperandCount {
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("'{mnemonic}' takes no parameters, found '{text}'.")]
    UnexpectedOperands { mnemonic: &'static str, text: String },
    #[error("Unexpected '{0}' after string.")]
    TrailingText(String),
    #[error("'{mnemonic}' cannot take the indirect register '{operand}'.")]
    IndirectNotAllowed {
        mnemonic: &'static str,
        operand: String,
    },
    #[error("{0} out of range [0, 63].")]
    TileIdOutOfRange(String),
    #[error("Unknown instruction: {0}")]
    UnknownInstruction(String),
}

/// A [`ParseError`] tagged with the 0-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub error: ParseError,
}

impl LineError {
    /// 1-based line number as shown to users.
    pub fn reported_line(&self) -> usize {
        self.line + 1
    }
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "> Line {}: {}", self.reported_line(), self.error)
    }
}

impl std::error::Error for LineError {}

/// Every per-line error of one compile, in source order.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{} compile error(s)", .errors.len())]
pub struct CompileError {
    pub errors: Vec<LineError>,
}

impl CompileError {
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.errors.iter().map(|e| e.line)
    }
}

/// Whole-program failures; the first one stops the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("Too many registers: {count} user registers, capacity is {capacity}.")]
    TooManyRegisters { count: usize, capacity: usize },
    #[error("Too many instructions: program reaches {size} bytes, the address space ends at 0xFFFF.")]
    ProgramTooLarge { size: usize },
    #[error("Could not resolve '{name}'")]
    Unresolved { name: String },
    #[error(transparent)]
    Compile(#[from] CompileError),
}
