//! Parses the `P,W` header line and the `K,a,b,c` instruction records that
//! follow it.

use std::io::BufRead;

use crate::common::error::ParseError;
use crate::config::MachineConfig;
use crate::isa::instruction::{Kind, RawInstruction};

/// Parses a complete input stream: the header line followed by zero or more
/// instruction lines. Returns the validated machine configuration and every
/// parsed instruction, in file order.
///
/// # Errors
///
/// Returns [`ParseError`] if the header is missing or malformed, names an
/// illegal physical register count or issue width, or if any instruction
/// line is malformed.
pub fn parse(reader: impl BufRead) -> Result<(MachineConfig, Vec<RawInstruction>), ParseError> {
    let mut lines = reader.lines();

    let header_line = lines
        .next()
        .ok_or(ParseError::MissingHeader)?
        .map_err(|_| ParseError::MissingHeader)?;
    let config = parse_header(&header_line)?.validate()?;

    let mut instructions = Vec::new();
    for (offset, line) in lines.enumerate() {
        let line_no = offset + 2; // header is line 1
        let text = line.map_err(|_| ParseError::InvalidInstructionLine {
            line_no,
            text: String::new(),
        })?;
        if text.trim().is_empty() {
            continue;
        }
        instructions.push(parse_instruction(line_no, &text)?);
    }

    Ok((config, instructions))
}

/// Parses `P,W` into an (unvalidated) [`MachineConfig`].
fn parse_header(line: &str) -> Result<MachineConfig, ParseError> {
    let mut fields = line.trim().split(',');
    let (Some(p), Some(w), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(ParseError::InvalidHeader {
            line: line.to_string(),
        });
    };
    let phys_regs: u32 = p.trim().parse().map_err(|_| ParseError::InvalidHeader {
        line: line.to_string(),
    })?;
    let issue_width: u32 = w.trim().parse().map_err(|_| ParseError::InvalidHeader {
        line: line.to_string(),
    })?;
    Ok(MachineConfig {
        phys_regs,
        issue_width,
    })
}

/// Parses one `K,a,b,c` instruction record.
fn parse_instruction(line_no: usize, text: &str) -> Result<RawInstruction, ParseError> {
    let mut fields = text.trim().split(',');
    let (Some(kind_text), Some(a_text), Some(b_text), Some(c_text), None) = (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) else {
        return Err(ParseError::InvalidInstructionLine {
            line_no,
            text: text.to_string(),
        });
    };

    let kind = match kind_text.trim() {
        "R" => Kind::R,
        "I" => Kind::I,
        "L" => Kind::L,
        "S" => Kind::S,
        other => {
            return Err(ParseError::UnknownKind {
                line_no,
                kind: other.to_string(),
            });
        }
    };

    let parse_field = |text: &str| {
        text.trim().parse::<u32>().map_err(|_| ParseError::InvalidOperand {
            line_no,
            text: text.to_string(),
        })
    };
    let a = parse_field(a_text)?;
    let b = parse_field(b_text)?;
    let c = parse_field(c_text)?;

    Ok(RawInstruction { kind, a, b, c })
}
