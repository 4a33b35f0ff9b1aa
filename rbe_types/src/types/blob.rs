use crate::{RbeError, Result};
use bytemuck::Pod;
use std::mem;

/// An opaque fixed-size value, stored byte-for-byte.
///
/// The format does not interpret the bytes. Writer and reader agree on the
/// width out-of-band, and state it at both ends: either as the `W` of
/// [`Self::to_array`], or as the size of the [`Pod`] type passed to
/// [`Self::value`]. A width disagreement is an error, never a reinterpretation.
#[derive(PartialEq, Eq, Clone, Default, Debug)]
pub struct StructBlob(Vec<u8>);

impl StructBlob {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn from_array<const W: usize>(bytes: [u8; W]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn from_value<T: Pod>(value: &T) -> Self {
        Self(bytemuck::bytes_of(value).to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn width(&self) -> usize {
        self.0.len()
    }

    pub fn to_array<const W: usize>(&self) -> Result<[u8; W]> {
        <[u8; W]>::try_from(&self.0[..]).map_err(|_| RbeError::StructWidthMismatch {
            width: W,
            data_len: self.0.len(),
        })
    }

    pub fn value<T: Pod>(&self) -> Result<T> {
        let width = mem::size_of::<T>();
        if self.0.len() != width {
            return Err(RbeError::StructWidthMismatch {
                width,
                data_len: self.0.len(),
            });
        }
        Ok(bytemuck::pod_read_unaligned(&self.0))
    }
}

/// A run of same-width opaque values, stored contiguously.
#[derive(PartialEq, Eq, Clone, Default, Debug)]
pub struct StructArray {
    width: usize,
    data: Vec<u8>,
}

impl StructArray {
    /// `data.len()` must be a whole multiple of `width`.
    /// A zero width only admits empty data.
    pub fn new(width: usize, data: Vec<u8>) -> Result<Self> {
        let consistent = match width {
            0 => data.is_empty(),
            _ => data.len() % width == 0,
        };
        if !consistent {
            return Err(RbeError::StructWidthMismatch {
                width,
                data_len: data.len(),
            });
        }
        Ok(Self { width, data })
    }

    pub fn from_values<T: Pod>(values: &[T]) -> Self {
        Self {
            width: mem::size_of::<T>(),
            data: bytemuck::cast_slice(values).to_vec(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        match self.width {
            0 => 0,
            width => self.data.len() / width,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, i: usize) -> Option<&[u8]> {
        if i >= self.len() {
            return None;
        }
        let begin = i * self.width;
        Some(&self.data[begin..begin + self.width])
    }

    pub fn values<T: Pod>(&self) -> Result<Vec<T>> {
        let width = mem::size_of::<T>();
        if width != self.width || width == 0 {
            return Err(RbeError::StructWidthMismatch {
                width,
                data_len: self.data.len(),
            });
        }
        let values = self
            .data
            .chunks_exact(width)
            .map(bytemuck::pod_read_unaligned)
            .collect();
        Ok(values)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bytemuck::{Pod, Zeroable};

    #[repr(C)]
    #[derive(Clone, Copy, PartialEq, Debug, Pod, Zeroable)]
    struct Span {
        begin: i64,
        duration: i64,
    }

    #[test]
    fn typed_value_comes_back() -> anyhow::Result<()> {
        let span = Span {
            begin: 30,
            duration: 120,
        };
        let blob = StructBlob::from_value(&span);
        assert_eq!(blob.width(), 16);
        assert_eq!(blob.value::<Span>()?, span);
        Ok(())
    }

    #[test]
    fn width_disagreement_is_an_error() {
        let blob = StructBlob::from_array([1u8, 2, 3, 4]);
        assert!(matches!(
            blob.value::<u64>(),
            Err(RbeError::StructWidthMismatch {
                width: 8,
                data_len: 4
            })
        ));
        assert!(blob.to_array::<3>().is_err());
        assert_eq!(blob.to_array::<4>().ok(), Some([1, 2, 3, 4]));
    }

    #[test]
    fn struct_array_slices_by_width() -> anyhow::Result<()> {
        let spans = [
            Span {
                begin: 0,
                duration: 10,
            },
            Span {
                begin: 10,
                duration: 5,
            },
        ];
        let arr = StructArray::from_values(&spans);
        assert_eq!((arr.len(), arr.width()), (2, 16));
        assert_eq!(arr.get(1), Some(bytemuck::bytes_of(&spans[1])));
        assert_eq!(arr.get(2), None);
        assert_eq!(arr.values::<Span>()?, spans);
        assert!(arr.values::<u32>().is_err());
        Ok(())
    }

    #[test]
    fn ragged_struct_array_is_rejected() {
        assert!(StructArray::new(4, vec![0; 6]).is_err());
        assert!(StructArray::new(0, vec![0]).is_err());
        assert!(StructArray::new(0, vec![]).is_ok());
    }
}
