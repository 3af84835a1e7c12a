//! Trace file reader.
//!
//! Each non-blank line holds one access: `<mode> <address> <process>`, e.g.
//! `s 0x7fff5a8c 1`. Only the first character of the mode matters (`l` for
//! load, `s` for store). Addresses may be written in hex (`0x`, `0X`, `#`),
//! octal (leading `0`) or decimal.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use log::debug;
use thiserror::Error;

use crate::access::{Access, AccessMode, ProcessId};

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("could not read trace: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: '{token}' is not a load (l) or store (s)")]
    BadMode { line: usize, token: String },

    #[error("line {line}: '{token}' is not a valid address")]
    BadAddress { line: usize, token: String },

    #[error("line {line}: '{token}' is not a process (0 or 1)")]
    BadProcess { line: usize, token: String },
}

/// Decodes an integer the way trace generators print them.
fn parse_address(token: &str) -> Option<u64> {
    let (digits, radix) = if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .or_else(|| token.strip_prefix('#'))
    {
        (hex, 16)
    } else if token.len() > 1 && token.starts_with('0') {
        (&token[1..], 8)
    } else {
        (token, 10)
    };

    // from_str_radix accepts a leading '+', which would let "0x+1" through
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    u64::from_str_radix(digits, radix).ok()
}

/// Parses one line. `line` is 1-based and only used for error reporting.
/// Blank lines yield `Ok(None)`.
pub fn parse_line(text: &str, line: usize, index: usize) -> Result<Option<Access>, TraceError> {
    let mut fields = text.split_whitespace();

    let Some(mode_token) = fields.next() else {
        return Ok(None);
    };

    let mode = match mode_token.chars().next() {
        Some('l') => AccessMode::Load,
        Some('s') => AccessMode::Store,
        _ => {
            return Err(TraceError::BadMode {
                line,
                token: mode_token.to_owned(),
            })
        }
    };

    let address_token = fields.next().ok_or(TraceError::MissingField {
        line,
        field: "address",
    })?;
    let address = parse_address(address_token).ok_or_else(|| TraceError::BadAddress {
        line,
        token: address_token.to_owned(),
    })?;

    let process_token = fields.next().ok_or(TraceError::MissingField {
        line,
        field: "process",
    })?;
    let process = process_token
        .parse::<u64>()
        .ok()
        .and_then(|p| ProcessId::try_from(p).ok())
        .ok_or_else(|| TraceError::BadProcess {
            line,
            token: process_token.to_owned(),
        })?;

    Ok(Some(Access::new(mode, address, process, index)))
}

/// Reads every access from `reader`, numbering them in order.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<Access>, TraceError> {
    let mut accesses = Vec::new();

    for (line_idx, text) in reader.lines().enumerate() {
        let text = text?;

        if let Some(access) = parse_line(&text, line_idx + 1, accesses.len())? {
            accesses.push(access);
        }
    }

    Ok(accesses)
}

/// Opens and parses a trace file. The file is closed before returning.
pub fn read_trace<P: AsRef<Path>>(filename: P) -> Result<Vec<Access>, TraceError> {
    let path = filename.as_ref();
    let file = File::open(path)?;
    let accesses = parse_reader(BufReader::new(file))?;

    debug!(
        "trace: read {} accesses from {}",
        accesses.len(),
        path.display()
    );

    Ok(accesses)
}
