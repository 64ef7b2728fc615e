use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::AsmError;
use crate::program::{Instruction, Program};

/// Highest byte offset the 16-bit address field can hold.
pub const MAX_OFFSET: usize = 0xFFFF;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelTable {
    offsets: BTreeMap<String, u16>,
}

impl LabelTable {
    pub fn get(&self, name: &str) -> Option<u16> {
        self.offsets.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.offsets.iter().map(|(n, off)| (n.as_str(), *off))
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Lays the program out from offset 0 and records every label. A label
/// declared twice takes its last offset.
pub fn layout(program: &Program) -> Result<LabelTable, AsmError> {
    let mut table = LabelTable::default();
    let mut offset = 0usize;
    for inst in program {
        if let Instruction::Label { name, .. } = inst {
            // offset <= MAX_OFFSET is checked after every step
            if let Some(prev) = table.offsets.insert(name.clone(), offset as u16) {
                warn!(label = %name, prev, offset, "label declared more than once");
            }
        }
        offset += inst.size();
        if offset > MAX_OFFSET {
            return Err(AsmError::ProgramTooLarge { size: offset });
        }
    }
    Ok(table)
}

/// Binds every jump/call target. References to undeclared labels stay
/// unresolved and are reported by the emitter.
pub fn resolve_labels(program: &mut Program) -> Result<LabelTable, AsmError> {
    let table = layout(program)?;
    for inst in program.iter_mut() {
        let Some(target) = inst.target().map(str::to_owned) else {
            continue;
        };
        match table.get(&target) {
            Some(offset) => {
                inst.update_label(&target, offset);
            }
            None => warn!(label = %target, "reference to undeclared label"),
        }
    }
    debug!(labels = table.len(), size = program.size(), "resolved labels");
    Ok(table)
}
