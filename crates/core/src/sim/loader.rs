//! Program and sample text loading.
//!
//! This module turns input text into typed programs and samples. It handles:
//! 1. **Programs:** `<name> a b c` lines, with an optional leading `#ip N` directive.
//! 2. **Raw programs:** the same layout with numeric opcode ids in place of names.
//! 3. **Sample files:** `Before:` / instruction / `After:` groups, optionally
//!    followed by a raw program.
//!
//! Blank lines and lines starting with `;` are ignored in listings. Line numbers
//! in errors are 1-based.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::common::{Result, VmError, Word};
use crate::isa::{Instruction, OpcodeId, Operation, Program, RawInstruction, RawProgram};
use crate::solver::Sample;

/// Contents of a sample file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleFile {
    /// Every sample, in file order.
    pub samples: Vec<Sample>,
    /// Raw program following the samples, if the file has one.
    pub program: Option<RawProgram>,
}

/// Reads a whole file into a string.
///
/// # Errors
///
/// [`VmError::Io`] if the file cannot be read.
pub fn load_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| VmError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Parses a symbolic program.
///
/// # Errors
///
/// [`VmError::MalformedProgram`] for an unknown mnemonic, a wrong operand count,
/// a non-integer operand or a misplaced `#ip` directive.
pub fn parse_program(text: &str) -> Result<Program> {
    parse_listing(numbered(text), |token| {
        Operation::from_str(token).map_err(|err| err.to_string())
    })
}

/// Parses a program whose opcodes are numeric ids.
///
/// # Errors
///
/// [`VmError::MalformedProgram`] as for [`parse_program`], including ids
/// outside `0..16`.
pub fn parse_raw_program(text: &str) -> Result<RawProgram> {
    parse_listing(numbered(text), parse_opcode)
}

/// Parses a sample file.
///
/// # Errors
///
/// [`VmError::MalformedProgram`] for text that does not follow the sample
/// layout, and [`VmError::MalformedSample`] for a group whose register lists
/// differ in length.
pub fn parse_samples(text: &str) -> Result<SampleFile> {
    let lines: Vec<(usize, &str)> = numbered(text).collect();
    let mut samples = Vec::new();
    let mut cursor = 0;

    loop {
        while lines.get(cursor).is_some_and(|(_, line)| line.is_empty()) {
            cursor += 1;
        }
        let Some(&(line_no, line)) = lines.get(cursor) else {
            break;
        };
        if !line.starts_with("Before:") {
            break;
        }
        let before = parse_register_list(line_no, line, "Before:")?;
        let &(insn_no, insn) = lines
            .get(cursor + 1)
            .ok_or_else(|| VmError::malformed(line_no, "sample is missing its instruction"))?;
        let instruction = parse_raw_instruction(insn_no, insn)?;
        let &(after_no, after) = lines
            .get(cursor + 2)
            .ok_or_else(|| VmError::malformed(insn_no, "sample is missing its `After:` line"))?;
        let after = parse_register_list(after_no, after, "After:")?;
        samples.push(Sample::new(before, instruction, after)?);
        cursor += 3;
    }

    let rest = lines.get(cursor..).unwrap_or_default();
    let program = if rest.iter().any(|(_, line)| !line.is_empty()) {
        Some(parse_listing(rest.iter().copied(), parse_opcode)?)
    } else {
        None
    };
    Ok(SampleFile { samples, program })
}

/// Pairs each trimmed line with its 1-based number.
fn numbered(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().map(|(i, line)| (i + 1, line.trim()))
}

fn parse_opcode(token: &str) -> std::result::Result<OpcodeId, String> {
    let raw: Word = token
        .parse()
        .map_err(|_| format!("opcode `{token}` is not a number"))?;
    OpcodeId::new(raw).map_err(|err| err.to_string())
}

fn parse_listing<'a, O>(
    lines: impl Iterator<Item = (usize, &'a str)>,
    decode: impl Fn(&str) -> std::result::Result<O, String>,
) -> Result<Program<O>> {
    let mut ip_register = None;
    let mut instructions = Vec::new();

    for (line_no, line) in lines {
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        if let Some(arg) = line.strip_prefix("#ip") {
            if ip_register.is_some() {
                return Err(VmError::malformed(line_no, "duplicate `#ip` directive"));
            }
            if !instructions.is_empty() {
                return Err(VmError::malformed(
                    line_no,
                    "`#ip` must precede the first instruction",
                ));
            }
            let register = arg.trim().parse::<usize>().map_err(|_| {
                VmError::malformed(line_no, format!("bad `#ip` register `{}`", arg.trim()))
            })?;
            ip_register = Some(register);
            continue;
        }
        let (mnemonic, operands) = split_instruction(line_no, line)?;
        let op = decode(mnemonic).map_err(|reason| VmError::malformed(line_no, reason))?;
        let [a, b, c] = operands;
        instructions.push(Instruction::new(op, a, b, c));
    }
    Ok(Program::new(ip_register, instructions))
}

fn parse_raw_instruction(line_no: usize, line: &str) -> Result<RawInstruction> {
    let (token, [a, b, c]) = split_instruction(line_no, line)?;
    let op = parse_opcode(token).map_err(|reason| VmError::malformed(line_no, reason))?;
    Ok(Instruction::new(op, a, b, c))
}

/// Splits `<opcode> a b c` into the opcode token and three integer operands.
fn split_instruction(line_no: usize, line: &str) -> Result<(&str, [Word; 3])> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [opcode, operands @ ..] = tokens.as_slice() else {
        return Err(VmError::malformed(line_no, "empty instruction"));
    };
    if operands.len() != 3 {
        return Err(VmError::malformed(
            line_no,
            format!("`{opcode}` takes 3 operands, found {}", operands.len()),
        ));
    }
    let mut values = [0; 3];
    for (value, token) in values.iter_mut().zip(operands) {
        *value = token
            .parse()
            .map_err(|_| VmError::malformed(line_no, format!("operand `{token}` is not an integer")))?;
    }
    Ok((*opcode, values))
}

/// Parses `Before: [3, 2, 1, 1]` style register lists.
fn parse_register_list(line_no: usize, line: &str, label: &str) -> Result<Vec<Word>> {
    let list = line
        .strip_prefix(label)
        .map(str::trim)
        .and_then(|rest| rest.strip_prefix('['))
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| VmError::malformed(line_no, format!("expected `{label} [r0, r1, ...]`")))?;
    list.split(',')
        .map(|value| {
            value.trim().parse::<Word>().map_err(|_| {
                VmError::malformed(line_no, format!("register value `{}` is not an integer", value.trim()))
            })
        })
        .collect()
}
