use serde::Serialize;

use crate::error::AsmError;
use crate::instructions::Opcode;
use crate::operand::{AddrRef, RegRef, Source};

/// Operand of a one-operand instruction; which one is fixed by the opcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Operand {
    Register(RegRef),
    Address(AddrRef),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Instruction {
    /// Zero-size marker naming the offset of the next instruction.
    Label { name: String, comments: Vec<String> },
    Zero { op: Opcode },
    One { op: Opcode, operand: Operand },
    Two { op: Opcode, src: Source, dst: RegRef },
    Tile { id: u8, data: [u8; 8] },
    /// `text` includes its terminator.
    Text { reg: RegRef, text: Vec<u8> },
    /// Every option includes its terminator; the list terminator is added
    /// on encoding.
    Selector { reg: RegRef, options: Vec<Vec<u8>> },
}

impl Instruction {
    pub fn opcode(&self) -> Option<Opcode> {
        match self {
            Instruction::Label { .. } => None,
            Instruction::Zero { op } | Instruction::One { op, .. } | Instruction::Two { op, .. } => {
                Some(*op)
            }
            Instruction::Tile { .. } => Some(Opcode::Tile),
            Instruction::Text { .. } => Some(Opcode::Dtxt),
            Instruction::Selector { .. } => Some(Opcode::Dsel),
        }
    }

    /// Encoded size in bytes.
    pub fn size(&self) -> usize {
        match self {
            Instruction::Label { .. } => 0,
            Instruction::Zero { .. } => 1,
            Instruction::One {
                operand: Operand::Register(_),
                ..
            } => 2,
            Instruction::One {
                operand: Operand::Address(_),
                ..
            } => 3,
            Instruction::Two { .. } => 3,
            Instruction::Tile { .. } => 10,
            Instruction::Text { text, .. } => 2 + text.len(),
            Instruction::Selector { options, .. } => {
                2 + options.iter().map(Vec::len).sum::<usize>() + 1
            }
        }
    }

    /// Appends the encoding to `out`. Fails on the first unbound operand.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), AsmError> {
        match self {
            Instruction::Label { .. } => {}
            Instruction::Zero { op } => out.push(op.byte()),
            Instruction::One {
                op,
                operand: Operand::Register(r),
            } => out.extend_from_slice(&[op.byte(), r.resolved()?]),
            Instruction::One {
                op,
                operand: Operand::Address(a),
            } => {
                let [hi, lo] = a.resolved()?.to_be_bytes();
                out.extend_from_slice(&[op.byte(), hi, lo]);
            }
            Instruction::Two { op, src, dst } => {
                out.extend_from_slice(&[op.byte(), src.resolved()?, dst.resolved()?])
            }
            Instruction::Tile { id, data } => {
                out.push(Opcode::Tile.byte());
                out.push(*id);
                out.extend_from_slice(data);
            }
            Instruction::Text { reg, text } => {
                out.extend_from_slice(&[Opcode::Dtxt.byte(), reg.resolved()?]);
                out.extend_from_slice(text);
            }
            Instruction::Selector { reg, options } => {
                out.extend_from_slice(&[Opcode::Dsel.byte(), reg.resolved()?]);
                for option in options {
                    out.extend_from_slice(option);
                }
                out.push(0);
            }
        }
        Ok(())
    }

    pub fn bytes(&self) -> Result<Vec<u8>, AsmError> {
        let mut out = Vec::with_capacity(self.size());
        self.encode_into(&mut out)?;
        Ok(out)
    }

    /// Register operands in operand order.
    pub fn registers(&self) -> Vec<&RegRef> {
        match self {
            Instruction::One {
                operand: Operand::Register(r),
                ..
            } => vec![r],
            Instruction::Two { src, dst, .. } => match src {
                Source::Register(s) => vec![s, dst],
                Source::Literal(_) => vec![dst],
            },
            Instruction::Text { reg, .. } | Instruction::Selector { reg, .. } => vec![reg],
            _ => Vec::new(),
        }
    }

    fn registers_mut(&mut self) -> Vec<&mut RegRef> {
        match self {
            Instruction::One {
                operand: Operand::Register(r),
                ..
            } => vec![r],
            Instruction::Two { src, dst, .. } => match src {
                Source::Register(s) => vec![s, dst],
                Source::Literal(_) => vec![dst],
            },
            Instruction::Text { reg, .. } | Instruction::Selector { reg, .. } => vec![reg],
            _ => Vec::new(),
        }
    }

    /// Binds every operand naming register `name` (normalized) to `number`,
    /// honouring each operand's addressing mode.
    pub fn update_register(&mut self, name: &str, number: u8) -> bool {
        let mut hit = false;
        for r in self.registers_mut() {
            hit |= r.bind(name, number);
        }
        hit
    }

    /// Label referenced by a jump/call.
    pub fn target(&self) -> Option<&str> {
        match self {
            Instruction::One {
                operand: Operand::Address(a),
                ..
            } => Some(&a.label),
            _ => None,
        }
    }

    /// Binds the address operand if it references `label`.
    pub fn update_label(&mut self, label: &str, offset: u16) -> bool {
        match self {
            Instruction::One {
                operand: Operand::Address(a),
                ..
            } => a.bind(label, offset),
            _ => false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        let addr_ok = match self {
            Instruction::One {
                operand: Operand::Address(a),
                ..
            } => a.value.is_some(),
            _ => true,
        };
        addr_ok && self.registers().iter().all(|r| r.is_resolved())
    }
}

/// One translation unit, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, inst: Instruction) {
        self.instructions.push(inst);
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Instruction> {
        self.instructions.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Total encoded size in bytes.
    pub fn size(&self) -> usize {
        self.instructions.iter().map(Instruction::size).sum()
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }
}

impl Extend<Instruction> for Program {
    fn extend<T: IntoIterator<Item = Instruction>>(&mut self, iter: T) {
        self.instructions.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
