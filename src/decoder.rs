use serde::Serialize;

use crate::instructions::{Opcode, Shape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Operands {
    None,
    Register(u8),
    Address(u16),
    /// First byte is a literal for STOR, a register otherwise.
    Pair(u8, u8),
    Tile { id: u8, data: [u8; 8] },
    Text { reg: u8, text: Vec<u8> },
    Selector { reg: u8, options: Vec<Vec<u8>> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub op: Opcode,
    /// Bytes consumed, opcode included.
    pub width: usize,
    pub operands: Operands,
}

pub trait Decoder {
    /// Decodes the instruction at the start of `code`. `None` for an
    /// unknown opcode or a truncated instruction.
    fn decode(&self, code: &[u8]) -> Option<Decoded>;
}

pub struct VasmDecoder;

impl VasmDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VasmDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for VasmDecoder {
    fn decode(&self, code: &[u8]) -> Option<Decoded> {
        let op = Opcode::from_byte(*code.first()?)?;
        let (width, operands) = match op.shape() {
            Shape::Zero => (1, Operands::None),
            Shape::OneRegister => (2, Operands::Register(*code.get(1)?)),
            Shape::OneAddress => {
                let addr = u16::from_be_bytes([*code.get(1)?, *code.get(2)?]);
                (3, Operands::Address(addr))
            }
            Shape::Two => (3, Operands::Pair(*code.get(1)?, *code.get(2)?)),
            Shape::Tile => {
                let id = *code.get(1)?;
                let data: [u8; 8] = code.get(2..10)?.try_into().ok()?;
                (10, Operands::Tile { id, data })
            }
            Shape::Text => {
                let reg = *code.get(1)?;
                let text = c_str(code.get(2..)?)?;
                (2 + text.len() + 1, Operands::Text { reg, text: text.to_vec() })
            }
            Shape::Selector => {
                let reg = *code.get(1)?;
                let mut pos = 2;
                let mut options = Vec::new();
                loop {
                    let option = c_str(code.get(pos..)?)?;
                    pos += option.len() + 1;
                    if option.is_empty() {
                        break;
                    }
                    options.push(option.to_vec());
                }
                (pos, Operands::Selector { reg, options })
            }
        };
        Some(Decoded { op, width, operands })
    }
}

/// Bytes up to (not including) the next 0.
fn c_str(bytes: &[u8]) -> Option<&[u8]> {
    let end = bytes.iter().position(|&b| b == 0)?;
    Some(&bytes[..end])
}
