use crate::io_utils;
use crate::serde::primitives::{self, FixedWidth};
use crate::serde::{Element, ElementType, ElementTypeInt, KeyDecoder, PlainKeys, SegmentedLen};
use crate::types::{Dictionary, List, StructArray, StructBlob};
use crate::{RbeError, Result};
use std::io::Read;
use uuid::Uuid;

#[derive(PartialEq, Debug)]
pub enum ReadResult<T> {
    EOF,
    Some(usize, T),
}

impl Element {
    /// Reads one element, tag first, in plain mode.
    ///
    /// A source that is empty at the tag yields [`ReadResult::EOF`].
    /// A source that ends anywhere later is [`RbeError::Truncated`].
    pub fn deser<R: Read>(r: &mut R) -> Result<ReadResult<Self>> {
        Self::deser_with(r, &mut PlainKeys)
    }

    pub fn deser_with<R: Read, K: KeyDecoder>(r: &mut R, keys: &mut K) -> Result<ReadResult<Self>> {
        Self::deser_at_depth(r, keys, 0)
    }

    fn deser_at_depth<R: Read, K: KeyDecoder>(
        r: &mut R,
        keys: &mut K,
        depth: usize,
    ) -> Result<ReadResult<Self>> {
        /* element_type */
        let (mut r_len, el_type_int) = match ElementTypeInt::deser(r) {
            Err(RbeError::Truncated { .. }) => return Ok(ReadResult::EOF),
            Err(e) => return Err(e),
            Ok((r_len, el_type_int)) => (r_len, el_type_int),
        };
        let el_type = ElementType::try_from(el_type_int)?;

        /* payload */
        let el = Self::deser_payload(el_type, r, keys, depth, &mut r_len)?;

        Ok(ReadResult::Some(r_len, el))
    }

    /// A nested element must be present; running out here is truncation.
    fn deser_nested<R: Read, K: KeyDecoder>(
        r: &mut R,
        keys: &mut K,
        depth: usize,
    ) -> Result<(usize, Self)> {
        if depth > MAX_DEPTH {
            return Err(RbeError::TooDeep { depth });
        }
        match Self::deser_at_depth(r, keys, depth)? {
            ReadResult::EOF => Err(RbeError::Truncated { wanted: 1 }),
            ReadResult::Some(r_len, el) => Ok((r_len, el)),
        }
    }

    fn deser_payload<R: Read, K: KeyDecoder>(
        el_type: ElementType,
        r: &mut R,
        keys: &mut K,
        depth: usize,
        r_len: &mut usize,
    ) -> Result<Self> {
        let el = match el_type {
            ElementType::Dictionary => {
                /* entries_count */
                let (delta_r_len, count) = SegmentedLen::deser(r)?;
                *r_len += delta_r_len;

                /* entries */
                let mut dict = Dictionary::with_capacity(count.as_usize().min(PREALLOC_ENTRIES));
                for _ in 0..count.as_usize() {
                    let (delta_r_len, key) = keys.deser_key(r)?;
                    *r_len += delta_r_len;
                    if dict.contains_key(&key) {
                        return Err(RbeError::DuplicateKey(key));
                    }
                    let (delta_r_len, value) = Self::deser_nested(r, keys, depth + 1)?;
                    *r_len += delta_r_len;
                    dict.insert(key, value);
                }
                Element::Dictionary(dict)
            }
            ElementType::List => {
                /* entries_count */
                let (delta_r_len, count) = SegmentedLen::deser(r)?;
                *r_len += delta_r_len;

                /* entries */
                let mut list = List::with_capacity(count.as_usize().min(PREALLOC_ENTRIES));
                for _ in 0..count.as_usize() {
                    let (delta_r_len, entry) = Self::deser_nested(r, keys, depth + 1)?;
                    *r_len += delta_r_len;
                    list.push(entry);
                }
                Element::List(list)
            }
            ElementType::Byte => Element::Byte(Self::deser_scalar(r, r_len)?),
            ElementType::Short => Element::Short(Self::deser_scalar(r, r_len)?),
            ElementType::Int => Element::Int(Self::deser_scalar(r, r_len)?),
            ElementType::Long => Element::Long(Self::deser_scalar(r, r_len)?),
            ElementType::Float => Element::Float(Self::deser_scalar(r, r_len)?),
            ElementType::Double => Element::Double(Self::deser_scalar(r, r_len)?),
            ElementType::String => {
                let (delta_r_len, s) = primitives::deser_str(r)?;
                *r_len += delta_r_len;
                Element::String(s)
            }
            ElementType::Struct => {
                let (delta_r_len, bytes) = primitives::deser_bytes(r)?;
                *r_len += delta_r_len;
                Element::Struct(StructBlob::from_bytes(bytes))
            }
            ElementType::ByteArray => {
                let (delta_r_len, bytes) = primitives::deser_bytes(r)?;
                *r_len += delta_r_len;
                Element::ByteArray(bytes)
            }
            ElementType::ShortArray => Element::ShortArray(Self::deser_array(r, r_len)?),
            ElementType::IntArray => Element::IntArray(Self::deser_array(r, r_len)?),
            ElementType::LongArray => Element::LongArray(Self::deser_array(r, r_len)?),
            ElementType::FloatArray => Element::FloatArray(Self::deser_array(r, r_len)?),
            ElementType::DoubleArray => Element::DoubleArray(Self::deser_array(r, r_len)?),
            ElementType::StringArray => {
                let (delta_r_len, count) = SegmentedLen::deser(r)?;
                *r_len += delta_r_len;

                let mut items = Vec::with_capacity(count.as_usize().min(PREALLOC_ENTRIES));
                for _ in 0..count.as_usize() {
                    let (delta_r_len, s) = primitives::deser_str(r)?;
                    *r_len += delta_r_len;
                    items.push(s);
                }
                Element::StringArray(items)
            }
            ElementType::StructArray => {
                let (delta_r_len, count) = SegmentedLen::deser(r)?;
                *r_len += delta_r_len;
                let (delta_r_len, width) = SegmentedLen::deser(r)?;
                *r_len += delta_r_len;

                // A zero width holds no structs, whatever the count says.
                if *width == 0 && *count > 0 {
                    return Err(RbeError::StructWidthMismatch {
                        width: 0,
                        data_len: 0,
                    });
                }
                let data_len = count
                    .as_usize()
                    .checked_mul(width.as_usize())
                    .ok_or(RbeError::LengthTooLarge(*count as u64 * *width as u64))?;
                let data = io_utils::read_vec(r, data_len)?;
                *r_len += data.len();
                Element::StructArray(StructArray::new(width.as_usize(), data)?)
            }
            ElementType::Guid => {
                let (delta_r_len, bytes) = primitives::deser_blob::<{ GUID_LEN }>(r)?;
                *r_len += delta_r_len;
                Element::Guid(Uuid::from_bytes_le(bytes))
            }
            ElementType::Unknown => return Err(RbeError::UnknownElementType(el_type as u8)),
        };
        Ok(el)
    }

    fn deser_scalar<T: FixedWidth, R: Read>(r: &mut R, r_len: &mut usize) -> Result<T> {
        let (delta_r_len, v) = T::deser(r)?;
        *r_len += delta_r_len;
        Ok(v)
    }

    fn deser_array<T: FixedWidth, R: Read>(r: &mut R, r_len: &mut usize) -> Result<Vec<T>> {
        let (delta_r_len, items) = primitives::deser_fixed_array(r)?;
        *r_len += delta_r_len;
        Ok(items)
    }
}

pub const GUID_LEN: usize = 16;

/// Cap on capacity reserved up front from an entry count read off the wire.
const PREALLOC_ENTRIES: usize = 1024;

/// Deepest container nesting either direction accepts. The root is depth 0.
pub const MAX_DEPTH: usize = 128;
