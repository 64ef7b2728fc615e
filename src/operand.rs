//! Operand syntax and the resolution state each operand carries.
//!
//! Operands are created unresolved by the parser. The register allocator
//! and the label resolver bind them in place; the emitter refuses to encode
//! anything still unbound.

use serde::Serialize;

use crate::error::{AsmError, ParseError};

/// Largest data payload (string bytes including terminators) of one
/// DTXT/DSEL instruction.
pub const MAX_PAYLOAD: usize = 128;

/// Bit marking an indirect register in the encoded register byte.
pub const INDIRECT: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegMode {
    /// `rname`
    Direct,
    /// `*rname`, encoded as number + 128
    Indirect,
    /// `&rname`, the register's own number as an immediate
    AddressOf,
}

/// A symbolic register operand. `name` is normalized (no `*`/`&`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegRef {
    pub name: String,
    pub mode: RegMode,
    pub value: Option<u8>,
}

impl RegRef {
    /// Parses a direct or indirect register operand.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let (name, mode) = match text.strip_prefix('*') {
            Some(rest) => (rest, RegMode::Indirect),
            None => (text, RegMode::Direct),
        };
        if !is_register_name(name) {
            return Err(ParseError::NotARegister(text.to_string()));
        }
        Ok(Self::new(name, mode))
    }

    pub fn new(name: &str, mode: RegMode) -> Self {
        Self {
            name: name.to_string(),
            mode,
            value: None,
        }
    }

    /// Binds the register if `name` is the one referenced. Returns whether
    /// anything changed.
    pub fn bind(&mut self, name: &str, number: u8) -> bool {
        if self.name != name {
            return false;
        }
        self.value = Some(match self.mode {
            RegMode::Direct | RegMode::AddressOf => number,
            RegMode::Indirect => number | INDIRECT,
        });
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }

    pub fn resolved(&self) -> Result<u8, AsmError> {
        self.value.ok_or_else(|| AsmError::Unresolved {
            name: self.to_string(),
        })
    }
}

impl std::fmt::Display for RegRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mode {
            RegMode::Direct => write!(f, "{}", self.name),
            RegMode::Indirect => write!(f, "*{}", self.name),
            RegMode::AddressOf => write!(f, "&{}", self.name),
        }
    }
}

/// A label operand of a jump/call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddrRef {
    pub label: String,
    pub value: Option<u16>,
}

impl AddrRef {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        if !is_label_name(text) {
            return Err(ParseError::NotALabel(text.to_string()));
        }
        Ok(Self {
            label: text.to_string(),
            value: None,
        })
    }

    pub fn bind(&mut self, label: &str, offset: u16) -> bool {
        if self.label != label {
            return false;
        }
        self.value = Some(offset);
        true
    }

    pub fn resolved(&self) -> Result<u16, AsmError> {
        self.value.ok_or_else(|| AsmError::Unresolved {
            name: self.label.clone(),
        })
    }
}

/// Source operand of a two-operand instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Source {
    Literal(u8),
    Register(RegRef),
}

impl Source {
    /// STOR source: a literal or `&rname`.
    pub fn parse_immediate(text: &str) -> Result<Self, ParseError> {
        if let Some(name) = text.strip_prefix('&') {
            if !is_register_name(name) {
                return Err(ParseError::NotANumber(text.to_string()));
            }
            return Ok(Source::Register(RegRef::new(name, RegMode::AddressOf)));
        }
        parse_literal(text).map(Source::Literal)
    }

    pub fn resolved(&self) -> Result<u8, AsmError> {
        match self {
            Source::Literal(v) => Ok(*v),
            Source::Register(r) => r.resolved(),
        }
    }
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// `l` followed by one or more word characters.
pub fn is_label_name(s: &str) -> bool {
    s.strip_prefix('l').is_some_and(is_word)
}

/// `r` followed by one or more word characters (no prefix).
pub fn is_register_name(s: &str) -> bool {
    s.strip_prefix('r').is_some_and(is_word)
}

/// Strips a `*` or `&` prefix.
pub fn normalize_register(s: &str) -> &str {
    s.strip_prefix('*')
        .or_else(|| s.strip_prefix('&'))
        .unwrap_or(s)
}

/// Decimal, `0b` binary or `0x` hex literal, reduced modulo 256.
pub fn parse_literal(text: &str) -> Result<u8, ParseError> {
    let bad = || ParseError::NotANumber(text.to_string());
    let (digits, radix) = if let Some(d) = text.strip_prefix("0b") {
        (d, 2u32)
    } else if let Some(d) = text.strip_prefix("0x") {
        (d, 16)
    } else {
        (text, 10)
    };
    if digits.is_empty() {
        return Err(bad());
    }
    digits.chars().try_fold(0u8, |acc, c| {
        let d = c.to_digit(radix).ok_or_else(bad)?;
        Ok(acc.wrapping_mul(radix as u8).wrapping_add(d as u8))
    })
}

/// Reads one double-quoted string at the start of `text` (leading
/// whitespace allowed). Returns the bytes with a trailing 0 and the text
/// after the closing quote.
pub fn parse_string(text: &str) -> Result<(Vec<u8>, &str), ParseError> {
    let not_string = || ParseError::NotAString(text.to_string());
    let body = text.trim_start().strip_prefix('"').ok_or_else(not_string)?;

    let mut content = String::new();
    let mut chars = body.char_indices();
    let rest = loop {
        let Some((i, c)) = chars.next() else {
            return Err(not_string());
        };
        match c {
            '"' => break &body[i + 1..],
            '\\' => match chars.next() {
                Some((_, '"')) => content.push('"'),
                Some((_, '\'')) => content.push('\''),
                Some((_, '\t' | '\u{0B}' | '\r' | '\n')) => content.push(' '),
                Some((_, '\\')) => content.push('\\'),
                Some((_, other)) => {
                    content.push('\\');
                    content.push(other);
                }
                None => return Err(not_string()),
            },
            c => content.push(c),
        }
    };

    if !content.chars().all(|c| (' '..='~').contains(&c)) {
        return Err(ParseError::NotAscii(text.trim().to_string()));
    }
    let mut bytes = content.into_bytes();
    bytes.push(0);
    Ok((bytes, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_wrap_to_a_byte() {
        assert_eq!(parse_literal("42"), Ok(42));
        assert_eq!(parse_literal("0x2A"), Ok(0x2A));
        assert_eq!(parse_literal("0b101"), Ok(5));
        assert_eq!(parse_literal("256"), Ok(0));
        assert_eq!(parse_literal("0x1ff"), Ok(0xFF));
        assert_eq!(parse_literal("99999999999999999999"), Ok((99999999999999999999u128 % 256) as u8));
        assert!(parse_literal("0b").is_err());
        assert!(parse_literal("0b12").is_err());
        assert!(parse_literal("-1").is_err());
        assert!(parse_literal("").is_err());
    }

    #[test]
    fn names() {
        assert!(is_label_name("lmain"));
        assert!(is_label_name("l_1"));
        assert!(!is_label_name("l"));
        assert!(!is_label_name("main"));
        assert!(!is_label_name("l-x"));
        assert!(is_register_name("r0"));
        assert!(is_register_name("rcount"));
        assert!(!is_register_name("*r0"));
        assert_eq!(normalize_register("*rx"), "rx");
        assert_eq!(normalize_register("&rx"), "rx");
    }

    #[test]
    fn strings_and_escapes() {
        let (b, rest) = parse_string(r#"  "hi" tail"#).unwrap();
        assert_eq!(b, b"hi\0");
        assert_eq!(rest, " tail");

        let (b, _) = parse_string(r#""say \"x\" \'y\' a\\b \q""#).unwrap();
        assert_eq!(b, b"say \"x\" 'y' a\\b \\q\0");

        let (b, _) = parse_string("\"a\\\tb\"").unwrap();
        assert_eq!(b, b"a b\0");

        assert!(matches!(parse_string("hi"), Err(ParseError::NotAString(_))));
        assert!(matches!(parse_string("\"open"), Err(ParseError::NotAString(_))));
        assert!(matches!(parse_string("\"tab\there\""), Err(ParseError::NotAscii(_))));
        assert!(matches!(parse_string("\"caf\u{e9}\""), Err(ParseError::NotAscii(_))));
    }

    #[test]
    fn bind_applies_mode() {
        let mut r = RegRef::parse("*rx").unwrap();
        assert!(!r.bind("ry", 7));
        assert!(r.resolved().is_err());
        assert!(r.bind("rx", 7));
        assert_eq!(r.resolved().unwrap(), 135);

        let mut s = Source::parse_immediate("&rx").unwrap();
        if let Source::Register(r) = &mut s {
            r.bind("rx", 7);
        }
        assert_eq!(s.resolved().unwrap(), 7);
        assert!(Source::parse_immediate("&x").is_err());
    }
}
