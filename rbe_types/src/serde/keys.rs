//! How a dictionary entry's key is put on the wire.
//!
//! The tree codec is written once, generic over these traits. Plain mode
//! writes key strings inline; packed mode writes indices into a [`KeyTable`].
//! The packing compiler's accumulation pass is the very same tree walk, run
//! with an encoder that records keys instead of emitting them, so both passes
//! always see keys in the same order.
//!
//! [`KeyTable`]: crate::serde::KeyTable

use crate::serde::primitives;
use crate::Result;
use std::io::{Read, Write};

pub trait KeyEncoder {
    fn ser_key<W: Write>(&mut self, w: &mut W, key: &str) -> Result<usize>;
}

pub trait KeyDecoder {
    fn deser_key<R: Read>(&mut self, r: &mut R) -> Result<(usize, String)>;
}

/// Keys as segmented-length-prefixed UTF-8.
#[derive(Default, Clone, Copy, Debug)]
pub struct PlainKeys;

impl KeyEncoder for PlainKeys {
    fn ser_key<W: Write>(&mut self, w: &mut W, key: &str) -> Result<usize> {
        primitives::ser_str(w, key)
    }
}

impl KeyDecoder for PlainKeys {
    fn deser_key<R: Read>(&mut self, r: &mut R) -> Result<(usize, String)> {
        primitives::deser_str(r)
    }
}
