use crate::config::{CodecConfig, Format};
use crate::serde::{Element, KeyTable, WriteLen};
use crate::{RbeError, Result};
use derive_more::{Deref, DerefMut, From};
use std::io::{BufWriter, Write};
use tracing::debug;

/// Buffers the caller's sink and writes whole trees into it.
#[derive(From, Deref, DerefMut)]
pub struct ElementWriter<W: Write> {
    w: BufWriter<W>,
}

impl<W: Write> ElementWriter<W> {
    pub fn new(w: W, config: &CodecConfig) -> Self {
        Self {
            w: BufWriter::with_capacity(config.buffer_capacity, w),
        }
    }

    pub fn write(&mut self, root: &Element, format: Format) -> Result<WriteLen> {
        match format {
            Format::Plain => self.write_plain(root),
            Format::Packed => self.write_packed(root),
        }
    }

    pub fn write_plain(&mut self, root: &Element) -> Result<WriteLen> {
        let w_len = root.ser(&mut self.w)?;
        debug!(format = %Format::Plain, w_len = *w_len, root = %root, "wrote tree");
        Ok(w_len)
    }

    pub fn write_packed(&mut self, root: &Element) -> Result<WriteLen> {
        let table = KeyTable::collect(root)?;
        let w_len = root.ser_packed_with(&mut self.w, &table)?;
        debug!(
            format = %Format::Packed,
            w_len = *w_len,
            keys = table.len(),
            root = %root,
            "wrote tree"
        );
        Ok(w_len)
    }

    /// Flushes the buffer and hands back the sink.
    pub fn finish(self) -> Result<W> {
        self.w
            .into_inner()
            .map_err(|e| RbeError::Io(e.into_error()))
    }
}
