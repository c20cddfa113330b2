//! The decode error taxonomy.
//!
//! Every failure carries the absolute offset of the bytes that caused it. By
//! the time a caller sees a [`DecodeError`], the same failure has already been
//! reported to the session's [`Diagnostics`](crate::Diagnostics) sink together
//! with the context breadcrumb that was active when it happened.
use crate::core::Opcode;
use crate::features::Feature;
use thiserror::Error;

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Coarse classification shared by decode and CFG failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Malformed,
    InvalidOpcode,
    FeatureDisabled,
    OutOfRange,
    LogicError,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("malformed input at offset {offset:#x}: {reason}")]
    Malformed { offset: usize, reason: Malformed },

    #[error("unknown opcode {} at offset {offset:#x}", .opcode.encoding())]
    InvalidOpcode { offset: usize, opcode: Opcode },

    #[error("{what} at offset {offset:#x} requires the `{feature}` feature")]
    FeatureDisabled {
        offset: usize,
        what: &'static str,
        feature: Feature,
    },

    #[error("{what} at offset {offset:#x} is out of range: {value} exceeds {limit}")]
    OutOfRange {
        offset: usize,
        what: &'static str,
        value: u64,
        limit: u64,
    },
}

impl DecodeError {
    pub fn malformed(offset: usize, reason: Malformed) -> Self {
        Self::Malformed { offset, reason }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Malformed { .. } => ErrorKind::Malformed,
            Self::InvalidOpcode { .. } => ErrorKind::InvalidOpcode,
            Self::FeatureDisabled { .. } => ErrorKind::FeatureDisabled,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }

    /// Absolute offset of the offending bytes.
    pub fn offset(&self) -> usize {
        match *self {
            Self::Malformed { offset, .. }
            | Self::InvalidOpcode { offset, .. }
            | Self::FeatureDisabled { offset, .. }
            | Self::OutOfRange { offset, .. } => offset,
        }
    }
}

/// Why an encoding is structurally invalid.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Malformed {
    #[error("unexpected end of input: needed {needed} more bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("{what} representation too long")]
    Leb128TooLong { what: &'static str },

    #[error("{what} too large")]
    Leb128TooLarge { what: &'static str },

    #[error("invalid UTF-8 in name")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("invalid {what} marker byte: expected one of {expected}; got {byte:#04X}")]
    InvalidMarker {
        what: &'static str,
        expected: String,
        byte: u8,
    },

    #[error("unexpected magic number: expected [00, 61, 73, 6D]; got {0:02X?}")]
    BadMagic([u8; 4]),

    #[error("unsupported version: expected [01, 00, 00, 00]; got {0:02X?}")]
    BadVersion([u8; 4]),

    #[error("{what} has {leftover} bytes left unread")]
    TrailingBytes { what: &'static str, leftover: usize },

    #[error("negative type index in block type: {0}")]
    NegativeBlockTypeIndex(i64),

    #[error("constant expression is missing its `end`")]
    UnterminatedExpression,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_offset_follow_the_variant() {
        let err = DecodeError::malformed(7, Malformed::Leb128TooLong { what: "u32" });
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert_eq!(err.offset(), 7);
        assert_eq!(
            err.to_string(),
            "malformed input at offset 0x7: u32 representation too long"
        );

        let err = DecodeError::FeatureDisabled {
            offset: 0x20,
            what: "return_call",
            feature: Feature::TailCall,
        };
        assert_eq!(err.kind(), ErrorKind::FeatureDisabled);
        assert_eq!(
            err.to_string(),
            "return_call at offset 0x20 requires the `tail-call` feature"
        );
    }

    #[test]
    fn invalid_opcode_prints_raw_encoding() {
        let err = DecodeError::InvalidOpcode {
            offset: 3,
            opcode: Opcode::prefixed(0xFC, 0x42),
        };
        assert_eq!(err.to_string(), "unknown opcode 0xFC 0x42 at offset 0x3");
    }
}
