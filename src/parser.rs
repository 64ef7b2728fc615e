//! Source text to [`Program`], collecting per-line errors as it goes.

use tracing::debug;

use crate::error::{CompileError, LineError, ParseError};
use crate::instructions::{lookup, Opcode, Shape};
use crate::operand::{
    is_label_name, parse_literal, parse_string, AddrRef, RegMode, RegRef, Source, MAX_PAYLOAD,
};
use crate::program::{Instruction, Operand, Program};
use crate::scanner::{scan, CommentTracker};

/// Result of [`compile`]: every instruction that parsed, plus the errors of
/// the lines that did not.
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    pub program: Program,
    pub errors: Vec<LineError>,
}

impl Compilation {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The program, or the aggregated errors if any line failed.
    pub fn into_result(self) -> Result<Program, CompileError> {
        if self.errors.is_empty() {
            Ok(self.program)
        } else {
            Err(CompileError {
                errors: self.errors,
            })
        }
    }
}

/// Parses a whole translation unit. Never fails: bad lines are reported in
/// [`Compilation::errors`] and skipped.
pub fn compile(source: &str) -> Compilation {
    let mut out = Compilation::default();
    let mut comments = CommentTracker::new();

    for line in scan(source) {
        if let Some(c) = line.comment {
            comments.push(c);
        }
        if !line.code.is_empty() {
            let parsed = parse_line(line.code, comments.pending());
            out.program.extend(parsed.instructions);
            if let Some(error) = parsed.error {
                debug!(line = line.number + 1, %error, "rejected line");
                out.errors.push(LineError {
                    line: line.number,
                    error,
                });
            }
            comments.clear();
        }
        if line.blank {
            comments.clear();
        }
    }

    debug!(
        instructions = out.program.len(),
        errors = out.errors.len(),
        "parsed source"
    );
    out
}

/// What one source line produced. A label line keeps its label even when
/// the instruction after it fails, so `error` may come with instructions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedLine {
    pub instructions: Vec<Instruction>,
    pub error: Option<ParseError>,
}

impl From<Result<Instruction, ParseError>> for ParsedLine {
    fn from(r: Result<Instruction, ParseError>) -> Self {
        match r {
            Ok(inst) => ParsedLine {
                instructions: vec![inst],
                error: None,
            },
            Err(e) => ParsedLine {
                instructions: Vec::new(),
                error: Some(e),
            },
        }
    }
}

/// Parses one comment-free, non-empty line. A label may carry one
/// instruction after it on the same line.
pub fn parse_line(text: &str, comments: &[String]) -> ParsedLine {
    let (tag, params) = split_token(text);
    let Some(name) = tag.strip_prefix(':') else {
        return parse_instruction(text).into();
    };
    if !is_label_name(name) {
        return Err(ParseError::NotALabel(name.to_string())).into();
    }
    let label = Instruction::Label {
        name: name.to_string(),
        comments: comments.to_vec(),
    };
    let mut out = if params.is_empty() {
        ParsedLine::default()
    } else {
        parse_instruction(params).into()
    };
    out.instructions.insert(0, label);
    out
}

/// Parses a single mnemonic with its operands.
pub fn parse_instruction(text: &str) -> Result<Instruction, ParseError> {
    let (tag, params) = split_token(text);
    let desc = lookup(tag).ok_or_else(|| ParseError::UnknownInstruction(text.to_string()))?;
    let op = desc.op;
    let mnemonic = desc.mnemonic;

    match desc.shape {
        Shape::Zero => {
            if !params.is_empty() {
                return Err(ParseError::UnexpectedOperands {
                    mnemonic,
                    text: params.to_string(),
                });
            }
            Ok(Instruction::Zero { op })
        }
        Shape::OneRegister => {
            let reg = RegRef::parse(params)?;
            if reg.mode == RegMode::Indirect {
                return Err(ParseError::IndirectNotAllowed {
                    mnemonic,
                    operand: params.to_string(),
                });
            }
            Ok(Instruction::One {
                op,
                operand: Operand::Register(reg),
            })
        }
        Shape::OneAddress => Ok(Instruction::One {
            op,
            operand: Operand::Address(AddrRef::parse(params)?),
        }),
        Shape::Two => {
            let [src, dst] = operands::<2>(mnemonic, params)?;
            let src = if op == Opcode::Stor {
                Source::parse_immediate(src)?
            } else {
                Source::Register(RegRef::parse(src)?)
            };
            Ok(Instruction::Two {
                op,
                src,
                dst: RegRef::parse(dst)?,
            })
        }
        Shape::Tile => {
            let ops = operands::<9>(mnemonic, params)?;
            let id = parse_literal(ops[0])?;
            if id > 63 {
                return Err(ParseError::TileIdOutOfRange(ops[0].to_string()));
            }
            let mut data = [0u8; 8];
            for (slot, text) in data.iter_mut().zip(&ops[1..]) {
                *slot = parse_literal(text)?;
            }
            Ok(Instruction::Tile { id, data })
        }
        Shape::Text => {
            let (reg, rest) = register_then_strings(mnemonic, params)?;
            let (text, tail) = parse_string(rest)?;
            let tail = tail.trim();
            if !tail.is_empty() {
                return Err(ParseError::TrailingText(tail.to_string()));
            }
            check_payload(text.len())?;
            Ok(Instruction::Text { reg, text })
        }
        Shape::Selector => {
            let (reg, mut rest) = register_then_strings(mnemonic, params)?;
            let mut options = Vec::new();
            loop {
                let (option, tail) = parse_string(rest)?;
                options.push(option);
                if tail.trim().is_empty() {
                    break;
                }
                rest = tail;
            }
            check_payload(options.iter().map(Vec::len).sum::<usize>() + 1)?;
            Ok(Instruction::Selector { reg, options })
        }
    }
}

fn split_token(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((tag, rest)) => (tag, rest.trim()),
        None => (text, ""),
    }
}

fn operands<'a, const N: usize>(
    mnemonic: &'static str,
    params: &'a str,
) -> Result<[&'a str; N], ParseError> {
    let ops: Vec<&str> = params.split_whitespace().collect();
    let found = ops.len();
    ops.try_into().map_err(|_| ParseError::OperandCount {
        mnemonic,
        expected: N,
        found,
    })
}

fn register_then_strings<'a>(
    mnemonic: &'static str,
    params: &'a str,
) -> Result<(RegRef, &'a str), ParseError> {
    if params.is_empty() {
        return Err(ParseError::OperandCount {
            mnemonic,
            expected: 2,
            found: 0,
        });
    }
    let (reg, rest) = split_token(params);
    Ok((RegRef::parse(reg)?, rest))
}

fn check_payload(len: usize) -> Result<(), ParseError> {
    if len > MAX_PAYLOAD {
        return Err(ParseError::StringTooLong {
            len,
            max: MAX_PAYLOAD,
        });
    }
    Ok(())
}
