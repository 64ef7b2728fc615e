use serde::Serialize;
use std::fmt::Write as _;

use vasm::decoder::{Decoder, VasmDecoder};
use vasm::disasm::fmt_decoded;

use crate::model::Image;

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub offset: usize,
    pub bytes: Vec<u8>,
    pub text: String,
}

/// Decodes the whole image front to back. Bytes that do not start a valid
/// instruction are listed one at a time as `.byte`.
pub fn listing(img: &Image) -> Vec<Line> {
    let dec = VasmDecoder::new();
    let mut out = Vec::new();
    let mut pc = img.base;
    while let Some(code) = img.tail(pc).filter(|c| !c.is_empty()) {
        let (width, text) = match dec.decode(code) {
            Some(d) => (d.width, fmt_decoded(&d)),
            None => (1, format!(".byte {:#04x}", code[0])),
        };
        out.push(Line { offset: pc, bytes: code[..width].to_vec(), text });
        pc += width;
    }
    out
}

pub fn render_text(lines: &[Line], show_bytes: bool) -> String {
    let mut buf = String::new();
    for l in lines {
        let _ = write!(buf, "{:#06x}: ", l.offset);
        if show_bytes {
            for b in &l.bytes {
                let _ = write!(buf, "{b:02x} ");
            }
            buf.push_str("  ");
        }
        let _ = writeln!(buf, "{}", l.text);
    }
    buf
}
