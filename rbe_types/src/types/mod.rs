//! The in-memory element tree: containers and opaque struct payloads.

mod blob;
mod dictionary;
mod list;

pub use blob::*;
pub use dictionary::*;
pub use list::*;
