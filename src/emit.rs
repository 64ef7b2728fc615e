use tracing::debug;

use crate::error::AsmError;
use crate::program::Program;

/// Concatenates every instruction's encoding. The image has no header and
/// starts at address 0.
pub fn emit(program: &Program) -> Result<Vec<u8>, AsmError> {
    let mut out = Vec::with_capacity(program.size());
    for inst in program {
        inst.encode_into(&mut out)?;
    }
    debug!(bytes = out.len(), "emitted image");
    Ok(out)
}
