use crate::serde::ElementType;
use crate::types::{Dictionary, List, StructArray, StructBlob};
use derive_more::From;
use std::fmt;
use uuid::Uuid;

mod deser;
mod ser;
pub use deser::*;
pub use ser::*;

/// One node of a persisted tree.
///
/// Containers own their children outright, so `clone()` is always a deep copy.
#[derive(From, PartialEq, Clone, Debug)]
pub enum Element {
    Dictionary(Dictionary),
    List(List),
    Byte(u8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Struct(StructBlob),
    ByteArray(Vec<u8>),
    ShortArray(Vec<i16>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    StringArray(Vec<String>),
    StructArray(StructArray),
    Guid(Uuid),
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Element::String(s.to_owned())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element_type())
    }
}

impl Element {
    pub fn element_type(&self) -> ElementType {
        ElementType::from(self)
    }
}

/* Copyable payloads are returned by value. */
macro_rules! copy_accessors {
    ($($as_fn:ident => $variant:ident: $ty:ty),* $(,)?) => {
        impl Element {
            $(
                pub fn $as_fn(&self) -> Option<$ty> {
                    match self {
                        Element::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            )*
        }
    };
}

/* Everything else is borrowed. */
macro_rules! ref_accessors {
    ($($as_fn:ident, $as_mut_fn:ident => $variant:ident: $ty:ty),* $(,)?) => {
        impl Element {
            $(
                pub fn $as_fn(&self) -> Option<&$ty> {
                    match self {
                        Element::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                pub fn $as_mut_fn(&mut self) -> Option<&mut $ty> {
                    match self {
                        Element::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            )*
        }
    };
}

copy_accessors! {
    as_byte => Byte: u8,
    as_short => Short: i16,
    as_int => Int: i32,
    as_long => Long: i64,
    as_float => Float: f32,
    as_double => Double: f64,
    as_guid => Guid: Uuid,
}

ref_accessors! {
    as_dictionary, as_dictionary_mut => Dictionary: Dictionary,
    as_list, as_list_mut => List: List,
    as_string, as_string_mut => String: String,
    as_struct, as_struct_mut => Struct: StructBlob,
    as_byte_array, as_byte_array_mut => ByteArray: Vec<u8>,
    as_short_array, as_short_array_mut => ShortArray: Vec<i16>,
    as_int_array, as_int_array_mut => IntArray: Vec<i32>,
    as_long_array, as_long_array_mut => LongArray: Vec<i64>,
    as_float_array, as_float_array_mut => FloatArray: Vec<f32>,
    as_double_array, as_double_array_mut => DoubleArray: Vec<f64>,
    as_string_array, as_string_array_mut => StringArray: Vec<String>,
    as_struct_array, as_struct_array_mut => StructArray: StructArray,
}
