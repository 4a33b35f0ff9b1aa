//! # Serialization format
//!
//! The de/serializable unit is [`Element`]. A document is a single root
//! element, almost always a [`Element::Dictionary`].
//!
//! Every element starts with `element_type`, encoded in `u8`. The numbering is
//! part of the file format: existing numbers are never reassigned, and new
//! element types may only be appended.
//!
//! All fixed-width numbers are little-endian.
//! All counts and lengths are [`SegmentedLen`]s.
//! There is no per-element body length; readers must understand every element.
//!
//! ```text
//! struct Element::{Byte, Short, Int, Long, Float, Double} {
//!     element_type:   u8,
//!     body:           [u8; 1 | 2 | 4 | 8 | 4 | 8],
//! }
//!
//! struct Element::String or Element::Struct or Element::ByteArray {
//!     element_type:   u8,
//!     body_len:       SegmentedLen,
//!     body:           [u8; body_len],
//! }
//!
//! struct Element::{Short, Int, Long, Float, Double}Array {
//!     element_type:   u8,
//!     count:          SegmentedLen,
//!     items:          [T; count],     // no per-item element_type
//! }
//!
//! struct Element::StringArray {
//!     element_type:   u8,
//!     count:          SegmentedLen,
//!     items:          [{ len: SegmentedLen, utf8: [u8; len] }; count],
//! }
//!
//! struct Element::StructArray {
//!     element_type:   u8,
//!     count:          SegmentedLen,
//!     width:          SegmentedLen,
//!     data:           [u8; count * width],
//! }
//!
//! struct Element::Guid {
//!     element_type:   u8,
//!     body:           [u8; 16],       // Uuid::to_bytes_le
//! }
//!
//! struct Element::List {
//!     element_type:   u8,
//!     count:          SegmentedLen,
//!     entries:        [Element; count],   // each with its own element_type
//! }
//!
//! struct Element::Dictionary {
//!     element_type:   u8,
//!     count:          SegmentedLen,
//!     entries:        [{
//!         key:            { len: SegmentedLen, utf8: [u8; len] }
//!                         // or, in packed mode, index: SegmentedLen
//!         value:          Element,
//!     }; count],
//! }
//! ```
//!
//! See [`packing`] for the packed document layout.

mod element;
mod element_type;
mod keys;
mod lengths;
pub mod packing;
pub mod primitives;

pub use element::*;
pub use element_type::*;
pub use keys::*;
pub use lengths::*;
pub use packing::{KeyTable, PackedKeys};
