//! One-call reading and writing of a root element, against any byte stream or a file path.
//!
//! Stream functions return the codec's own [`RbeError`]. Path functions
//! return [`anyhow::Result`] with the path attached; the `RbeError` underneath
//! is still reachable through `downcast_ref`.

mod reader;
mod writer;

pub use reader::*;
pub use writer::*;

use crate::config::{CodecConfig, Format};
use crate::serde::{Element, ReadResult, WriteLen};
use crate::{RbeError, Result};
use anyhow::Context;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub fn write_to<W: Write>(w: W, root: &Element, config: &CodecConfig) -> Result<WriteLen> {
    let mut writer = ElementWriter::new(w, config);
    let w_len = writer.write(root, config.format)?;
    writer.finish()?;
    Ok(w_len)
}

/// Reads exactly one root. A source with no tree in it is [`RbeError::Truncated`].
pub fn read_from<R: Read>(r: R, config: &CodecConfig) -> Result<Element> {
    let mut reader = ElementReader::new(r, config);
    match reader.read(config.format)? {
        ReadResult::EOF => Err(RbeError::Truncated { wanted: 1 }),
        ReadResult::Some(_r_len, root) => Ok(root),
    }
}

pub fn write_plain<W: Write>(w: W, root: &Element) -> Result<WriteLen> {
    write_to(w, root, &CodecConfig::default().with_format(Format::Plain))
}

pub fn write_packed<W: Write>(w: W, root: &Element) -> Result<WriteLen> {
    write_to(w, root, &CodecConfig::default().with_format(Format::Packed))
}

pub fn read_plain<R: Read>(r: R) -> Result<Element> {
    read_from(r, &CodecConfig::default().with_format(Format::Plain))
}

pub fn read_packed<R: Read>(r: R) -> Result<Element> {
    read_from(r, &CodecConfig::default().with_format(Format::Packed))
}

/// Creates or truncates the file at `path`.
pub fn write_to_file<P: AsRef<Path>>(
    path: P,
    root: &Element,
    config: &CodecConfig,
) -> anyhow::Result<WriteLen> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {path:?}"))?;
    let w_len = write_to(file, root, config)
        .with_context(|| format!("write {} tree {path:?}", config.format))?;
    Ok(w_len)
}

pub fn read_from_file<P: AsRef<Path>>(path: P, config: &CodecConfig) -> anyhow::Result<Element> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {path:?}"))?;
    let root =
        read_from(file, config).with_context(|| format!("read {} tree {path:?}", config.format))?;
    Ok(root)
}

pub fn write_file_plain<P: AsRef<Path>>(path: P, root: &Element) -> anyhow::Result<WriteLen> {
    write_to_file(path, root, &CodecConfig::default().with_format(Format::Plain))
}

pub fn write_file_packed<P: AsRef<Path>>(path: P, root: &Element) -> anyhow::Result<WriteLen> {
    write_to_file(path, root, &CodecConfig::default().with_format(Format::Packed))
}

pub fn read_file_plain<P: AsRef<Path>>(path: P) -> anyhow::Result<Element> {
    read_from_file(path, &CodecConfig::default().with_format(Format::Plain))
}

pub fn read_file_packed<P: AsRef<Path>>(path: P) -> anyhow::Result<Element> {
    read_from_file(path, &CodecConfig::default().with_format(Format::Packed))
}
