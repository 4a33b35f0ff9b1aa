//! Fixed-width little-endian numbers, raw blobs and length-prefixed strings.

use crate::io_utils;
use crate::serde::SegmentedLen;
use crate::{RbeError, Result};
use std::io::{Read, Write};

/// A number stored as exactly `WIDTH` little-endian bytes.
pub trait FixedWidth: Copy {
    const WIDTH: usize;

    fn ser(&self, w: &mut impl Write) -> Result<usize>;
    fn deser(r: &mut impl Read) -> Result<(usize, Self)>;
}

macro_rules! impl_fixed_width {
    ($($t:ty),*) => {
        $(
            impl FixedWidth for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                fn ser(&self, w: &mut impl Write) -> Result<usize> {
                    io_utils::write_all(w, &self.to_le_bytes())
                }

                fn deser(r: &mut impl Read) -> Result<(usize, Self)> {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    let r_len = io_utils::read_exact(r, &mut buf)?;
                    Ok((r_len, <$t>::from_le_bytes(buf)))
                }
            }
        )*
    };
}

impl_fixed_width!(u8, i16, i32, i64, f32, f64);

/// Writes `count` followed by each element, with no per-element tag.
pub fn ser_fixed_array<T: FixedWidth>(w: &mut impl Write, items: &[T]) -> Result<usize> {
    let mut w_len = SegmentedLen::from_len(items.len())?.ser(w)?;
    for item in items {
        w_len += item.ser(w)?;
    }
    Ok(w_len)
}

pub fn deser_fixed_array<T: FixedWidth>(r: &mut impl Read) -> Result<(usize, Vec<T>)> {
    let (mut r_len, count) = SegmentedLen::deser(r)?;
    let count = count.as_usize();
    let mut items = Vec::with_capacity(count.min(io_utils::PREALLOC_LIMIT / T::WIDTH));
    for _ in 0..count {
        let (delta_r_len, item) = T::deser(r)?;
        r_len += delta_r_len;
        items.push(item);
    }
    Ok((r_len, items))
}

/// A blob of `W` bytes, copied verbatim in both directions.
pub fn ser_blob<const W: usize>(w: &mut impl Write, blob: &[u8; W]) -> Result<usize> {
    io_utils::write_all(w, blob)
}

pub fn deser_blob<const W: usize>(r: &mut impl Read) -> Result<(usize, [u8; W])> {
    let mut buf = [0u8; W];
    let r_len = io_utils::read_exact(r, &mut buf)?;
    Ok((r_len, buf))
}

/// Segmented length, then the bytes.
pub fn ser_bytes(w: &mut impl Write, bytes: &[u8]) -> Result<usize> {
    let mut w_len = SegmentedLen::from_len(bytes.len())?.ser(w)?;
    w_len += io_utils::write_all(w, bytes)?;
    Ok(w_len)
}

pub fn deser_bytes(r: &mut impl Read) -> Result<(usize, Vec<u8>)> {
    let (mut r_len, len) = SegmentedLen::deser(r)?;
    let bytes = io_utils::read_vec(r, len.as_usize())?;
    r_len += bytes.len();
    Ok((r_len, bytes))
}

pub fn ser_str(w: &mut impl Write, s: &str) -> Result<usize> {
    ser_bytes(w, s.as_bytes())
}

pub fn deser_str(r: &mut impl Read) -> Result<(usize, String)> {
    let (r_len, bytes) = deser_bytes(r)?;
    let s = String::from_utf8(bytes).map_err(|_| RbeError::InvalidUtf8)?;
    Ok((r_len, s))
}
