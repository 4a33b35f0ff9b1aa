use crate::config::{CodecConfig, Format};
use crate::serde::{Element, KeyTable, ReadResult};
use crate::Result;
use std::io::{BufReader, Read};
use tracing::debug;

/// Buffers the caller's source and reads whole trees out of it.
///
/// Trees may be concatenated; each read consumes exactly one, and
/// [`ReadResult::EOF`] marks a source that ended cleanly between trees.
pub struct ElementReader<R> {
    r: BufReader<R>,
}

impl<R: Read> From<R> for ElementReader<R> {
    fn from(r: R) -> Self {
        Self {
            r: BufReader::new(r),
        }
    }
}

impl<R: Read> ElementReader<R> {
    pub fn new(r: R, config: &CodecConfig) -> Self {
        Self {
            r: BufReader::with_capacity(config.buffer_capacity, r),
        }
    }

    pub fn read(&mut self, format: Format) -> Result<ReadResult<Element>> {
        match format {
            Format::Plain => self.read_plain(),
            Format::Packed => match self.read_packed()? {
                ReadResult::EOF => Ok(ReadResult::EOF),
                ReadResult::Some(r_len, (_table, root)) => Ok(ReadResult::Some(r_len, root)),
            },
        }
    }

    pub fn read_plain(&mut self) -> Result<ReadResult<Element>> {
        let res = Element::deser(&mut self.r)?;
        if let ReadResult::Some(r_len, root) = &res {
            debug!(format = %Format::Plain, r_len, root = %root, "read tree");
        }
        Ok(res)
    }

    pub fn read_packed(&mut self) -> Result<ReadResult<(KeyTable, Element)>> {
        let res = Element::deser_packed(&mut self.r)?;
        if let ReadResult::Some(r_len, (table, root)) = &res {
            debug!(
                format = %Format::Packed,
                r_len,
                keys = table.len(),
                root = %root,
                "read tree"
            );
        }
        Ok(res)
    }

    pub fn into_inner(self) -> R {
        self.r.into_inner()
    }
}
