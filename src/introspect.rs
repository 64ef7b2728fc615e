//! Read-only queries for editor tooling.

use std::collections::{BTreeMap, HashSet};

use crate::instructions::{OpDesc, TABLE};
use crate::program::{Instruction, Program};
use crate::registers::FIXED_REGISTERS;

/// Distinct label names, first declaration first.
pub fn labels(program: &Program) -> Vec<String> {
    let mut seen = HashSet::new();
    program
        .iter()
        .filter_map(|inst| match inst {
            Instruction::Label { name, .. } => Some(name),
            _ => None,
        })
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

/// Doc comment of every label, lines joined with `\n`. A redeclared label
/// keeps the comment of its last declaration.
pub fn label_comments(program: &Program) -> BTreeMap<String, String> {
    program
        .iter()
        .filter_map(|inst| match inst {
            Instruction::Label { name, comments } => Some((name.clone(), comments.join("\n"))),
            _ => None,
        })
        .collect()
}

/// Fixed register names followed by every other register the program
/// mentions, without `*`/`&` prefixes.
pub fn registers(program: &Program) -> Vec<String> {
    let mut out: Vec<String> = FIXED_REGISTERS.iter().map(|(n, _)| n.to_string()).collect();
    let mut seen: HashSet<String> = out.iter().cloned().collect();
    for inst in program {
        for reg in inst.registers() {
            if seen.insert(reg.name.clone()) {
                out.push(reg.name.clone());
            }
        }
    }
    out
}

/// Instruction reference, in opcode order.
pub fn mnemonics() -> &'static [OpDesc] {
    TABLE
}
