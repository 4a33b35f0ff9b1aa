use crate::io_utils;
use crate::serde::primitives::{self, FixedWidth};
use crate::serde::{Element, ElementTypeInt, KeyEncoder, PlainKeys, SegmentedLen, MAX_DEPTH};
use crate::{RbeError, Result};
use derive_more::Deref;
use std::io::Write;

/// Count of bytes emitted by one write call.
#[derive(Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct WriteLen(usize);
impl WriteLen {
    pub fn new_manual(i: usize) -> Self {
        Self(i)
    }
}

impl Element {
    /// Writes this element, tag first, in plain mode.
    pub fn ser(&self, w: &mut impl Write) -> Result<WriteLen> {
        self.ser_with(w, &mut PlainKeys)
    }

    /// Writes the tag, then the payload. Dictionary keys go through `keys`.
    ///
    /// This is the only place a tag byte is written; payload writers below
    /// recurse back into it for every dictionary value and list entry.
    /// Trees nested deeper than [`MAX_DEPTH`] are refused, as the reader would refuse them.
    pub fn ser_with<W: Write, K: KeyEncoder>(&self, w: &mut W, keys: &mut K) -> Result<WriteLen> {
        self.ser_at_depth(w, keys, 0)
    }

    fn ser_at_depth<W: Write, K: KeyEncoder>(
        &self,
        w: &mut W,
        keys: &mut K,
        depth: usize,
    ) -> Result<WriteLen> {
        if depth > MAX_DEPTH {
            return Err(RbeError::TooDeep { depth });
        }
        let mut w_len = WriteLen(0);

        /* element_type */
        w_len.0 += ElementTypeInt::from(self.element_type()).ser(w)?;

        /* payload */
        w_len.0 += self.ser_payload(w, keys, depth)?;

        Ok(w_len)
    }

    fn ser_payload<W: Write, K: KeyEncoder>(
        &self,
        w: &mut W,
        keys: &mut K,
        depth: usize,
    ) -> Result<usize> {
        let w_len = match self {
            Element::Dictionary(dict) => {
                /* entries_count */
                let mut w_len = SegmentedLen::from_len(dict.len())?.ser(w)?;

                /* entries */
                for (key, value) in dict.iter() {
                    w_len += keys.ser_key(w, key)?;
                    w_len += *value.ser_at_depth(w, keys, depth + 1)?;
                }
                w_len
            }
            Element::List(list) => {
                /* entries_count */
                let mut w_len = SegmentedLen::from_len(list.len())?.ser(w)?;

                /* entries */
                for entry in list.iter() {
                    w_len += *entry.ser_at_depth(w, keys, depth + 1)?;
                }
                w_len
            }
            Element::Byte(v) => v.ser(w)?,
            Element::Short(v) => v.ser(w)?,
            Element::Int(v) => v.ser(w)?,
            Element::Long(v) => v.ser(w)?,
            Element::Float(v) => v.ser(w)?,
            Element::Double(v) => v.ser(w)?,
            Element::String(s) => primitives::ser_str(w, s)?,
            Element::Struct(blob) => primitives::ser_bytes(w, blob.as_bytes())?,
            Element::ByteArray(items) => primitives::ser_bytes(w, items)?,
            Element::ShortArray(items) => primitives::ser_fixed_array(w, items)?,
            Element::IntArray(items) => primitives::ser_fixed_array(w, items)?,
            Element::LongArray(items) => primitives::ser_fixed_array(w, items)?,
            Element::FloatArray(items) => primitives::ser_fixed_array(w, items)?,
            Element::DoubleArray(items) => primitives::ser_fixed_array(w, items)?,
            Element::StringArray(items) => {
                let mut w_len = SegmentedLen::from_len(items.len())?.ser(w)?;
                for s in items {
                    w_len += primitives::ser_str(w, s)?;
                }
                w_len
            }
            Element::StructArray(arr) => {
                let mut w_len = SegmentedLen::from_len(arr.len())?.ser(w)?;
                w_len += SegmentedLen::from_len(arr.width())?.ser(w)?;
                w_len += io_utils::write_all(w, arr.as_bytes())?;
                w_len
            }
            Element::Guid(guid) => primitives::ser_blob(w, &guid.to_bytes_le())?,
        };
        Ok(w_len)
    }
}
