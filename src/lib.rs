pub mod decoder;
pub mod disasm;
pub mod emit;
pub mod error;
pub mod instructions;
pub mod introspect;
pub mod labels;
pub mod operand;
pub mod parser;
pub mod program;
pub mod registers;
pub mod scanner;

pub use emit::emit;
pub use error::{AsmError, CompileError, LineError, ParseError};
pub use introspect::{label_comments, labels, registers};
pub use labels::{resolve_labels, LabelTable};
pub use parser::{compile, Compilation, ParsedLine};
pub use program::{Instruction, Program};
pub use registers::{resolve_registers, RegisterTable};

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AsmConfig {
    /// Carry on with the lines that parsed when some did not.
    pub keep_going: bool,
}

/// Runs the whole pipeline: parse, allocate registers, lay out labels, emit.
pub fn assemble(source: &str, cfg: &AsmConfig) -> Result<Vec<u8>, AsmError> {
    let Compilation { mut program, errors } = compile(source);
    if !errors.is_empty() {
        if !cfg.keep_going {
            return Err(CompileError { errors }.into());
        }
        warn!(skipped = errors.len(), "assembling without the lines that failed to parse");
    }
    resolve_registers(&mut program)?;
    resolve_labels(&mut program)?;
    emit(&program)
}
