//! Register allocation: fixed names first, then user names numbered from
//! [`REGISTER_BASE`] in the order they first appear.

use serde::Serialize;
use tracing::debug;

use crate::error::AsmError;
use crate::program::Program;

/// First number handed to a user register.
pub const REGISTER_BASE: u8 = 5;
/// 128 register slots minus the accumulator, 4 carry and 16 storage registers.
pub const REGISTER_CAPACITY: usize = 128 - 16 - 4 - 1;

/// Accumulator, carry registers, then storage registers.
pub const FIXED_REGISTERS: &[(&str, u8)] = &[
    ("r0", 0),
    ("rc0", 1),
    ("rc1", 2),
    ("rc2", 3),
    ("rc3", 4),
    ("rs0", 112),
    ("rs1", 113),
    ("rs2", 114),
    ("rs3", 115),
    ("rs4", 116),
    ("rs5", 117),
    ("rs6", 118),
    ("rs7", 119),
    ("rs8", 120),
    ("rs9", 121),
    ("rs10", 122),
    ("rs11", 123),
    ("rs12", 124),
    ("rs13", 125),
    ("rs14", 126),
    ("rs15", 127),
];

pub fn fixed_number(name: &str) -> Option<u8> {
    FIXED_REGISTERS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, num)| num)
}

/// Name to number assignments of one program, in allocation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegisterTable {
    /// User registers only; fixed ones come from [`FIXED_REGISTERS`].
    user: Vec<(String, u8)>,
}

impl RegisterTable {
    pub fn get(&self, name: &str) -> Option<u8> {
        fixed_number(name).or_else(|| {
            self.user
                .iter()
                .find(|(n, _)| n == name)
                .map(|&(_, num)| num)
        })
    }

    pub fn user(&self) -> &[(String, u8)] {
        &self.user
    }

    /// Fixed registers followed by the user ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        FIXED_REGISTERS
            .iter()
            .copied()
            .chain(self.user.iter().map(|(n, num)| (n.as_str(), *num)))
    }
}

/// Computes the numbering without touching the program.
pub fn allocate(program: &Program) -> Result<RegisterTable, AsmError> {
    let mut user: Vec<String> = Vec::new();
    for inst in program {
        for reg in inst.registers() {
            if fixed_number(&reg.name).is_none() && !user.contains(&reg.name) {
                user.push(reg.name.clone());
            }
        }
    }
    if user.len() > REGISTER_CAPACITY {
        return Err(AsmError::TooManyRegisters {
            count: user.len(),
            capacity: REGISTER_CAPACITY,
        });
    }
    let user = user
        .into_iter()
        .zip(REGISTER_BASE..)
        .collect::<Vec<_>>();
    Ok(RegisterTable { user })
}

/// Binds every register operand of `program`. Fixed names are applied
/// before user names are collected, so they never take a user slot.
pub fn resolve_registers(program: &mut Program) -> Result<RegisterTable, AsmError> {
    for inst in program.iter_mut() {
        let fixed: Vec<(String, u8)> = inst
            .registers()
            .iter()
            .filter_map(|r| fixed_number(&r.name).map(|num| (r.name.clone(), num)))
            .collect();
        for (name, num) in fixed {
            inst.update_register(&name, num);
        }
    }

    let table = allocate(program)?;
    for inst in program.iter_mut() {
        let names: Vec<String> = inst.registers().iter().map(|r| r.name.clone()).collect();
        for name in names {
            if let Some(num) = table.get(&name) {
                inst.update_register(&name, num);
            }
        }
    }
    debug!(user = table.user.len(), "allocated registers");
    Ok(table)
}
