use crate::io_utils;
use crate::{RbeError, Result};
use derive_more::Deref;
use std::io::{Read, Write};

const LEN_U1: u32 = 0b00;
const LEN_U2: u32 = 0b01;
const LEN_S4: u32 = 0b10;
const LEN_MASK: u8 = 0b11;

/// Largest value carried by the 1-byte form: 6 value bits.
pub const MAX_U1: u32 = (u8::MAX >> 2) as u32;
/// Largest value carried by the 2-byte form: 14 value bits.
pub const MAX_U2: u32 = (u16::MAX >> 2) as u32;
/// Largest value carried by the 4-byte form: 30 value bits.
pub const MAX_S4: u32 = u32::MAX >> 2;

/// The variable-width unsigned integer used for every count and length.
///
/// The value is shifted left by two, the width tag is ORed into the low two
/// bits, and the word is written little-endian in 1, 2 or 4 bytes.
/// The encoder always picks the narrowest form, so each value has exactly one
/// canonical encoding.
#[derive(Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct SegmentedLen(u32);

impl SegmentedLen {
    pub fn from_len(len: usize) -> Result<Self> {
        match u32::try_from(len) {
            Ok(int) if int <= MAX_S4 => Ok(Self(int)),
            _ => Err(RbeError::LengthTooLarge(len as u64)),
        }
    }

    /// Count of bytes [`Self::ser`] emits for this value.
    pub fn encoded_len(&self) -> usize {
        match self.0 {
            v if v <= MAX_U1 => 1,
            v if v <= MAX_U2 => 2,
            _ => 4,
        }
    }

    pub fn ser(&self, w: &mut impl Write) -> Result<usize> {
        let v = self.0;
        if v <= MAX_U1 {
            let word = ((v << 2) | LEN_U1) as u8;
            io_utils::write_all(w, &word.to_le_bytes())
        } else if v <= MAX_U2 {
            let word = ((v << 2) | LEN_U2) as u16;
            io_utils::write_all(w, &word.to_le_bytes())
        } else {
            let word = (v << 2) | LEN_S4;
            io_utils::write_all(w, &word.to_le_bytes())
        }
    }

    pub fn deser(r: &mut impl Read) -> Result<(usize, Self)> {
        let mut buf = [0u8; 4];
        let mut r_len = io_utils::read_exact(r, &mut buf[..1])?;
        let word = match (buf[0] & LEN_MASK) as u32 {
            LEN_U1 => buf[0] as u32,
            LEN_U2 => {
                r_len += io_utils::read_exact(r, &mut buf[1..2])?;
                u16::from_le_bytes([buf[0], buf[1]]) as u32
            }
            LEN_S4 => {
                r_len += io_utils::read_exact(r, &mut buf[1..4])?;
                u32::from_le_bytes(buf)
            }
            _ => return Err(RbeError::InvalidLengthTag(buf[0])),
        };
        Ok((r_len, Self(word >> 2)))
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

/// Longest key, in bytes, that fits the packed key table's 1-byte length prefix.
pub const MAX_PACKED_KEY_LEN: usize = u8::MAX as usize;

/// The 1-byte length prefix of a key in the packed key table.
#[derive(Deref, Clone, Copy)]
pub struct PackedKeyLen(u8);

impl PackedKeyLen {
    pub fn from_key(key: &str) -> Result<Self> {
        let key_len = key.len();
        u8::try_from(key_len)
            .map(Self)
            .map_err(|_| RbeError::KeyTooLong { key_len })
    }

    pub fn ser(&self, w: &mut impl Write) -> Result<usize> {
        io_utils::write_all(w, &self.0.to_le_bytes())
    }

    pub fn deser(r: &mut impl Read) -> Result<(usize, Self)> {
        let mut buf = [0u8; 1];
        let r_len = io_utils::read_exact(r, &mut buf)?;
        Ok((r_len, Self(buf[0])))
    }
}
