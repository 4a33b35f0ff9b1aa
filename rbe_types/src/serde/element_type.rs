use crate::io_utils;
use crate::serde::Element;
use crate::{RbeError, Result};
use derive_more::{Deref, From};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;
use std::io::{Read, Write};
use std::mem;

/// The tag byte exactly as it appears on the wire.
#[derive(From, Deref, Clone, Copy, Debug)]
pub struct ElementTypeInt(u8);
impl From<ElementType> for ElementTypeInt {
    fn from(el_type: ElementType) -> Self {
        Self(el_type as u8)
    }
}
impl ElementTypeInt {
    pub fn ser(&self, w: &mut impl Write) -> Result<usize> {
        io_utils::write_all(w, &self.0.to_le_bytes())
    }
    pub fn deser(r: &mut impl Read) -> Result<(usize, Self)> {
        let mut buf = [0u8; mem::size_of::<u8>()];
        let r_len = io_utils::read_exact(r, &mut buf)?;
        Ok((r_len, Self(u8::from_le_bytes(buf))))
    }
}

/// We manually map members to tag integers because persisted files identify
/// element kinds purely by this number.
/// - Never renumber an existing member. Only append.
/// - `Unknown` is reserved; it is never written and is rejected on read.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum ElementType {
    Unknown = 0,
    Dictionary = 1,
    List = 2,
    Byte = 3,
    Short = 4,
    Int = 5,
    Long = 6,
    Float = 7,
    Double = 8,
    String = 9,
    Struct = 10,
    ByteArray = 11,
    ShortArray = 12,
    IntArray = 13,
    LongArray = 14,
    FloatArray = 15,
    DoubleArray = 16,
    StringArray = 17,
    StructArray = 18,
    Guid = 19,
}
impl TryFrom<ElementTypeInt> for ElementType {
    type Error = RbeError;
    fn try_from(int: ElementTypeInt) -> Result<Self> {
        match ElementType::from_u8(int.0) {
            None | Some(ElementType::Unknown) => Err(RbeError::UnknownElementType(int.0)),
            Some(el_type) => Ok(el_type),
        }
    }
}
impl TryFrom<u8> for ElementType {
    type Error = RbeError;
    fn try_from(int: u8) -> Result<Self> {
        Self::try_from(ElementTypeInt(int))
    }
}
impl From<&Element> for ElementType {
    fn from(el: &Element) -> Self {
        match el {
            Element::Dictionary(_) => ElementType::Dictionary,
            Element::List(_) => ElementType::List,
            Element::Byte(_) => ElementType::Byte,
            Element::Short(_) => ElementType::Short,
            Element::Int(_) => ElementType::Int,
            Element::Long(_) => ElementType::Long,
            Element::Float(_) => ElementType::Float,
            Element::Double(_) => ElementType::Double,
            Element::String(_) => ElementType::String,
            Element::Struct(_) => ElementType::Struct,
            Element::ByteArray(_) => ElementType::ByteArray,
            Element::ShortArray(_) => ElementType::ShortArray,
            Element::IntArray(_) => ElementType::IntArray,
            Element::LongArray(_) => ElementType::LongArray,
            Element::FloatArray(_) => ElementType::FloatArray,
            Element::DoubleArray(_) => ElementType::DoubleArray,
            Element::StringArray(_) => ElementType::StringArray,
            Element::StructArray(_) => ElementType::StructArray,
            Element::Guid(_) => ElementType::Guid,
        }
    }
}
impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
