//! Packed mode: every distinct dictionary key is written once, up front, and
//! dictionary entries refer to it by index.
//!
//! ```text
//! struct PackedFile {
//!     keys_count:     SegmentedLen,
//!     keys:           [PackedKey; keys_count],
//!     root:           Element,    // dictionary keys are SegmentedLen indices
//! }
//!
//! struct PackedKey {
//!     key_len:        u8,
//!     key:            [u8; key_len],  // UTF-8
//! }
//! ```

use crate::io_utils;
use crate::serde::{
    Element, KeyDecoder, KeyEncoder, PackedKeyLen, ReadResult, SegmentedLen, WriteLen,
};
use crate::{RbeError, Result};
use indexmap::IndexSet;
use std::io::{self, Read, Write};
use tracing::trace;

/// The ordered vocabulary of dictionary keys. A key's position is its index.
#[derive(Default, PartialEq, Eq, Clone, Debug)]
pub struct KeyTable {
    keys: IndexSet<String>,
}

impl KeyTable {
    /// Accumulation pass.
    ///
    /// Runs the regular tree writer into a sink, with an encoder that assigns
    /// the next index to each key the first time it is seen.
    pub fn collect(root: &Element) -> Result<Self> {
        let mut collector = KeyCollector::default();
        root.ser_with(&mut io::sink(), &mut collector)?;
        Ok(Self {
            keys: collector.keys,
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.keys.get_index(index).map(String::as_str)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.get_index_of(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn ser(&self, w: &mut impl Write) -> Result<usize> {
        /* keys_count */
        let mut w_len = SegmentedLen::from_len(self.keys.len())?.ser(w)?;

        /* keys */
        for (index, key) in self.keys.iter().enumerate() {
            w_len += PackedKeyLen::from_key(key)?.ser(w)?;
            w_len += io_utils::write_all(w, key.as_bytes())?;
            trace!(index, key = key.as_str(), "wrote packed key");
        }
        Ok(w_len)
    }

    pub fn deser(r: &mut impl Read) -> Result<(usize, Self)> {
        /* keys_count */
        let (mut r_len, count) = SegmentedLen::deser(r)?;

        /* keys */
        let mut keys = IndexSet::with_capacity(count.as_usize().min(PREALLOC_KEYS));
        for index in 0..count.as_usize() {
            let (delta_r_len, key_len) = PackedKeyLen::deser(r)?;
            r_len += delta_r_len;
            let bytes = io_utils::read_vec(r, *key_len as usize)?;
            r_len += bytes.len();
            let key = String::from_utf8(bytes).map_err(|_| RbeError::InvalidUtf8)?;
            trace!(index, key = key.as_str(), "read packed key");
            if keys.contains(&key) {
                return Err(RbeError::DuplicateKey(key));
            }
            keys.insert(key);
        }
        Ok((r_len, Self { keys }))
    }

    pub fn encoder(&self) -> PackedKeys<'_> {
        PackedKeys { table: self }
    }
}

/// Records keys instead of writing them.
#[derive(Default)]
struct KeyCollector {
    keys: IndexSet<String>,
}

impl KeyEncoder for KeyCollector {
    fn ser_key<W: Write>(&mut self, _w: &mut W, key: &str) -> Result<usize> {
        PackedKeyLen::from_key(key)?;
        if !self.keys.contains(key) {
            self.keys.insert(key.to_owned());
        }
        Ok(0)
    }
}

/// Writes and reads keys as indices into a [`KeyTable`].
#[derive(Clone, Copy)]
pub struct PackedKeys<'t> {
    table: &'t KeyTable,
}

impl<'t> KeyEncoder for PackedKeys<'t> {
    fn ser_key<W: Write>(&mut self, w: &mut W, key: &str) -> Result<usize> {
        let index = self
            .table
            .index_of(key)
            .ok_or_else(|| RbeError::MissingKeyIndex(key.to_owned()))?;
        SegmentedLen::from_len(index)?.ser(w)
    }
}

impl<'t> KeyDecoder for PackedKeys<'t> {
    fn deser_key<R: Read>(&mut self, r: &mut R) -> Result<(usize, String)> {
        let (r_len, index) = SegmentedLen::deser(r)?;
        let index = index.as_usize();
        let key = self
            .table
            .get(index)
            .ok_or(RbeError::KeyIndexOutOfRange {
                index,
                table_len: self.table.len(),
            })?;
        Ok((r_len, key.to_owned()))
    }
}

impl Element {
    /// Key table first, then the tree with indices in place of keys.
    pub fn ser_packed(&self, w: &mut impl Write) -> Result<WriteLen> {
        let table = KeyTable::collect(self)?;
        self.ser_packed_with(w, &table)
    }

    /// As [`Self::ser_packed`], against a table the caller already collected.
    ///
    /// `table` must hold every key in this tree; a key it lacks fails with
    /// [`RbeError::MissingKeyIndex`] partway through the write.
    pub fn ser_packed_with(&self, w: &mut impl Write, table: &KeyTable) -> Result<WriteLen> {
        let mut w_len = table.ser(w)?;
        w_len += *self.ser_with(w, &mut table.encoder())?;
        Ok(WriteLen::new_manual(w_len))
    }

    /// Mirror of [`Self::ser_packed`]. Also hands back the table that was read.
    pub fn deser_packed<R: Read>(r: &mut R) -> Result<ReadResult<(KeyTable, Self)>> {
        let mut head = [0u8; 1];
        if io_utils::read_head(r, &mut head)? == 0 {
            return Ok(ReadResult::EOF);
        }
        let mut r = (&head[..]).chain(r);

        let (mut r_len, table) = KeyTable::deser(&mut r)?;
        let root = Self::deser_with(&mut r, &mut table.encoder())?;
        match root {
            ReadResult::EOF => Err(RbeError::Truncated { wanted: 1 }),
            ReadResult::Some(delta_r_len, el) => {
                r_len += delta_r_len;
                Ok(ReadResult::Some(r_len, (table, el)))
            }
        }
    }
}

const PREALLOC_KEYS: usize = 1024;
