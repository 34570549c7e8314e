//! Character decoding for TextGrid files.
//!
//! Praat writes TextGrids as UTF-16 by default, so that is the default here too.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::TableError;

/// Text encoding of the input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-16", alias = "utf16", alias = "UTF-16")]
    Utf16,
    #[serde(rename = "utf-8", alias = "utf8", alias = "UTF-8")]
    Utf8,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf16 => write!(f, "utf-16"),
            Encoding::Utf8 => write!(f, "utf-8"),
        }
    }
}

impl FromStr for Encoding {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-16" | "utf16" => Ok(Encoding::Utf16),
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            other => Err(TableError::ConfigError(format!(
                "Unknown encoding '{}' (expected utf-16 or utf-8)",
                other
            ))),
        }
    }
}

/// Decode raw file bytes into a string.
///
/// UTF-16 input honours a byte-order mark and falls back to little endian
/// when there is none. A UTF-8 byte-order mark is skipped.
pub fn decode(bytes: &[u8], encoding: Encoding) -> Result<String, TableError> {
    match encoding {
        Encoding::Utf8 => {
            let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
            String::from_utf8(body.to_vec())
                .map_err(|e| TableError::Encoding(format!("invalid UTF-8: {}", e)))
        }
        Encoding::Utf16 => decode_utf16(bytes),
    }
}

fn decode_utf16(bytes: &[u8]) -> Result<String, TableError> {
    let (body, big_endian) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        _ => (bytes, false),
    };

    if body.len() % 2 != 0 {
        return Err(TableError::Encoding(format!(
            "UTF-16 input has an odd number of bytes ({})",
            bytes.len()
        )));
    }

    let units = body.chunks_exact(2).map(|pair| {
        let pair = [pair[0], pair[1]];
        if big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        }
    });

    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|e| TableError::Encoding(format!("invalid UTF-16: {}", e)))
}
