use crate::serde::ElementType;
use std::io::{self, ErrorKind};
use thiserror::Error;

pub type Result<T, E = RbeError> = std::result::Result<T, E>;

/// Everything that can go wrong while encoding or decoding a tree.
///
/// None of these are transient. A failed read means the source is corrupt or
/// incomplete; a failed write means the tree cannot be represented.
#[derive(Error, Debug)]
pub enum RbeError {
    #[error("Truncated input: wanted {wanted} more byte(s)")]
    Truncated { wanted: usize },

    #[error("Unknown element type {0}")]
    UnknownElementType(u8),

    #[error("Invalid segmented length tag. Byte = {0:#04x}")]
    InvalidLengthTag(u8),

    #[error("Length is too large to fit into a segmented length: {0}")]
    LengthTooLarge(u64),

    #[error("Key is longer than 255 bytes: {key_len}")]
    KeyTooLong { key_len: usize },

    #[error("No such key for index {index}; the key table holds {table_len}")]
    KeyIndexOutOfRange { index: usize, table_len: usize },

    #[error("No such index for key {0:?}")]
    MissingKeyIndex(String),

    #[error("Key {0:?} appears more than once in one dictionary")]
    DuplicateKey(String),

    #[error("String is not valid UTF-8")]
    InvalidUtf8,

    #[error("Struct data of {data_len} byte(s) is inconsistent with struct width {width}")]
    StructWidthMismatch { width: usize, data_len: usize },

    #[error("No such entry {key:?} of type {expected}")]
    NoSuchEntry { key: String, expected: ElementType },

    #[error("Key already in use: {0:?}")]
    KeyInUse(String),

    #[error("Containers nested {depth} deep exceed the limit")]
    TooDeep { depth: usize },

    #[error("Entry {key:?} holds {value}, which names no enum member")]
    InvalidEnumValue { key: String, value: i64 },

    #[error("Enum value for {key:?} does not fit an entry of type {expected}")]
    EnumOutOfRange { key: String, expected: ElementType },

    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for RbeError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            ErrorKind::UnexpectedEof => RbeError::Truncated { wanted: 1 },
            _ => RbeError::Io(e),
        }
    }
}
