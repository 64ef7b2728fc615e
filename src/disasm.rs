use crate::decoder::{Decoded, Operands};
use crate::instructions::Opcode;
use crate::operand::INDIRECT;

pub fn fmt_decoded(d: &Decoded) -> String {
    let mn = d.op.mnemonic();
    match &d.operands {
        Operands::None => mn.to_string(),
        Operands::Register(r) => format!("{mn} {}", reg(*r)),
        Operands::Address(a) => format!("{mn} {a:#06x}"),
        Operands::Pair(a, b) if d.op == Opcode::Stor => format!("{mn} {a:#04x} {}", reg(*b)),
        Operands::Pair(a, b) => format!("{mn} {} {}", reg(*a), reg(*b)),
        Operands::Tile { id, data } => {
            let data: Vec<String> = data.iter().map(|b| format!("{b:#04x}")).collect();
            format!("{mn} {id} {}", data.join(" "))
        }
        Operands::Text { reg: r, text } => format!("{mn} {} {}", reg(*r), quoted(text)),
        Operands::Selector { reg: r, options } => {
            let options: Vec<String> = options.iter().map(|o| quoted(o)).collect();
            format!("{mn} {} {}", reg(*r), options.join(" "))
        }
    }
}

fn reg(byte: u8) -> String {
    if byte & INDIRECT != 0 {
        format!("*r{}", byte & !INDIRECT)
    } else {
        format!("r{byte}")
    }
}

fn quoted(text: &[u8]) -> String {
    let mut s = String::with_capacity(text.len() + 2);
    s.push('"');
    for &b in text {
        match b {
            b'"' => s.push_str("\\\""),
            b'\\' => s.push_str("\\\\"),
            0x20..=0x7E => s.push(b as char),
            _ => s.push_str(&format!("\\x{b:02x}")),
        }
    }
    s.push('"');
    s
}
