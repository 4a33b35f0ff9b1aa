use crate::serde::{Element, ElementType};
use crate::types::{List, StructArray, StructBlob};
use crate::{RbeError, Result};
use bytemuck::Pod;
use indexmap::map::{Entry, IndexMap};
use num_traits::{FromPrimitive, ToPrimitive};
use uuid::Uuid;

/// A string-keyed map of child elements.
///
/// Keys are unique. Iteration follows insertion order, which makes encoded
/// output deterministic; replacing a key's value keeps its position.
#[derive(PartialEq, Clone, Default, Debug)]
pub struct Dictionary {
    map: IndexMap<String, Element>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Element> {
        self.map.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Element> {
        self.map.get_mut(key)
    }

    /// Returns the previous value under `key`, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Element>) -> Option<Element> {
        self.map.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Element> {
        self.map.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    fn missing(key: &str, expected: ElementType) -> RbeError {
        RbeError::NoSuchEntry {
            key: key.to_owned(),
            expected,
        }
    }
}

/* Nested containers. */
impl Dictionary {
    /// Fails with [`RbeError::KeyInUse`] if `key` holds anything already.
    pub fn create_dictionary(&mut self, key: impl Into<String>) -> Result<&mut Dictionary> {
        match self.map.entry(key.into()) {
            Entry::Occupied(o) => Err(RbeError::KeyInUse(o.key().clone())),
            Entry::Vacant(v) => match v.insert(Element::Dictionary(Dictionary::new())) {
                Element::Dictionary(dict) => Ok(dict),
                _ => unreachable!(),
            },
        }
    }

    /// Replaces whatever `key` holds unless it is already a dictionary.
    pub fn get_or_create_dictionary(&mut self, key: impl Into<String>) -> &mut Dictionary {
        let slot = self
            .map
            .entry(key.into())
            .or_insert_with(|| Element::Dictionary(Dictionary::new()));
        if slot.as_dictionary().is_none() {
            *slot = Element::Dictionary(Dictionary::new());
        }
        match slot {
            Element::Dictionary(dict) => dict,
            _ => unreachable!(),
        }
    }

    pub fn create_list(&mut self, key: impl Into<String>) -> Result<&mut List> {
        match self.map.entry(key.into()) {
            Entry::Occupied(o) => Err(RbeError::KeyInUse(o.key().clone())),
            Entry::Vacant(v) => match v.insert(Element::List(List::new())) {
                Element::List(list) => Ok(list),
                _ => unreachable!(),
            },
        }
    }

    pub fn get_or_create_list(&mut self, key: impl Into<String>) -> &mut List {
        let slot = self
            .map
            .entry(key.into())
            .or_insert_with(|| Element::List(List::new()));
        if slot.as_list().is_none() {
            *slot = Element::List(List::new());
        }
        match slot {
            Element::List(list) => list,
            _ => unreachable!(),
        }
    }

    pub fn try_get_dictionary(&self, key: &str) -> Option<&Dictionary> {
        self.get(key).and_then(Element::as_dictionary)
    }

    pub fn get_dictionary(&self, key: &str) -> Result<&Dictionary> {
        self.try_get_dictionary(key)
            .ok_or_else(|| Self::missing(key, ElementType::Dictionary))
    }

    pub fn get_dictionary_mut(&mut self, key: &str) -> Result<&mut Dictionary> {
        self.get_mut(key)
            .and_then(Element::as_dictionary_mut)
            .ok_or_else(|| Self::missing(key, ElementType::Dictionary))
    }

    pub fn set_dictionary(&mut self, key: impl Into<String>, value: Dictionary) {
        self.insert(key, value);
    }

    pub fn try_get_list(&self, key: &str) -> Option<&List> {
        self.get(key).and_then(Element::as_list)
    }

    pub fn get_list(&self, key: &str) -> Result<&List> {
        self.try_get_list(key)
            .ok_or_else(|| Self::missing(key, ElementType::List))
    }

    pub fn get_list_mut(&mut self, key: &str) -> Result<&mut List> {
        self.get_mut(key)
            .and_then(Element::as_list_mut)
            .ok_or_else(|| Self::missing(key, ElementType::List))
    }

    pub fn set_list(&mut self, key: impl Into<String>, value: List) {
        self.insert(key, value);
    }
}

/* Scalars: returned by value. */
macro_rules! scalar_entries {
    ($($variant:ident: $ty:ty => $as_fn:ident, $try_get:ident, $get:ident, $get_or:ident, $set:ident;)*) => {
        impl Dictionary {
            $(
                pub fn $try_get(&self, key: &str) -> Option<$ty> {
                    self.get(key).and_then(Element::$as_fn)
                }

                pub fn $get(&self, key: &str) -> Result<$ty> {
                    self.$try_get(key)
                        .ok_or_else(|| Self::missing(key, ElementType::$variant))
                }

                pub fn $get_or(&self, key: &str, default: $ty) -> $ty {
                    self.$try_get(key).unwrap_or(default)
                }

                pub fn $set(&mut self, key: impl Into<String>, value: $ty) {
                    self.insert(key, Element::$variant(value));
                }
            )*
        }
    };
}

scalar_entries! {
    Byte: u8 => as_byte, try_get_byte, get_byte, get_byte_or, set_byte;
    Short: i16 => as_short, try_get_short, get_short, get_short_or, set_short;
    Int: i32 => as_int, try_get_int, get_int, get_int_or, set_int;
    Long: i64 => as_long, try_get_long, get_long, get_long_or, set_long;
    Float: f32 => as_float, try_get_float, get_float, get_float_or, set_float;
    Double: f64 => as_double, try_get_double, get_double, get_double_or, set_double;
    Guid: Uuid => as_guid, try_get_guid, get_guid, get_guid_or, set_guid;
}

/* Strings and arrays: borrowed out, owned in. */
macro_rules! borrowed_entries {
    ($($variant:ident: $owned:ty, $borrowed:ty => $as_fn:ident, $try_get:ident, $get:ident, $get_or:ident, $set:ident;)*) => {
        impl Dictionary {
            $(
                pub fn $try_get(&self, key: &str) -> Option<&$borrowed> {
                    self.get(key).and_then(Element::$as_fn).map(|v| &v[..])
                }

                pub fn $get(&self, key: &str) -> Result<&$borrowed> {
                    self.$try_get(key)
                        .ok_or_else(|| Self::missing(key, ElementType::$variant))
                }

                pub fn $get_or<'a>(&'a self, key: &str, default: &'a $borrowed) -> &'a $borrowed {
                    self.$try_get(key).unwrap_or(default)
                }

                pub fn $set(&mut self, key: impl Into<String>, value: impl Into<$owned>) {
                    self.insert(key, Element::$variant(value.into()));
                }
            )*
        }
    };
}

borrowed_entries! {
    String: String, str => as_string, try_get_string, get_string, get_string_or, set_string;
    ByteArray: Vec<u8>, [u8] => as_byte_array, try_get_byte_array, get_byte_array, get_byte_array_or, set_byte_array;
    ShortArray: Vec<i16>, [i16] => as_short_array, try_get_short_array, get_short_array, get_short_array_or, set_short_array;
    IntArray: Vec<i32>, [i32] => as_int_array, try_get_int_array, get_int_array, get_int_array_or, set_int_array;
    LongArray: Vec<i64>, [i64] => as_long_array, try_get_long_array, get_long_array, get_long_array_or, set_long_array;
    FloatArray: Vec<f32>, [f32] => as_float_array, try_get_float_array, get_float_array, get_float_array_or, set_float_array;
    DoubleArray: Vec<f64>, [f64] => as_double_array, try_get_double_array, get_double_array, get_double_array_or, set_double_array;
    StringArray: Vec<String>, [String] => as_string_array, try_get_string_array, get_string_array, get_string_array_or, set_string_array;
}

/* Enums: stored as their integer value in the named width. */
macro_rules! enum_entries {
    ($($variant:ident => $get_raw:ident, $try_get_raw:ident, $from:ident, $to:ident, $try_get:ident, $get:ident, $get_or:ident, $set:ident;)*) => {
        impl Dictionary {
            $(
                pub fn $try_get<E: FromPrimitive>(&self, key: &str) -> Option<E> {
                    self.$try_get_raw(key).and_then(E::$from)
                }

                /// Fails on a missing entry and on a value no member of `E` maps to.
                pub fn $get<E: FromPrimitive>(&self, key: &str) -> Result<E> {
                    let raw = self.$get_raw(key)?;
                    E::$from(raw).ok_or_else(|| RbeError::InvalidEnumValue {
                        key: key.to_owned(),
                        value: i64::from(raw),
                    })
                }

                pub fn $get_or<E: FromPrimitive>(&self, key: &str, default: E) -> E {
                    self.$try_get(key).unwrap_or(default)
                }

                pub fn $set<E: ToPrimitive>(&mut self, key: impl Into<String>, value: E) -> Result<()> {
                    let key = key.into();
                    let raw = value.$to().ok_or_else(|| RbeError::EnumOutOfRange {
                        key: key.clone(),
                        expected: ElementType::$variant,
                    })?;
                    self.insert(key, Element::$variant(raw));
                    Ok(())
                }
            )*
        }
    };
}

enum_entries! {
    Byte => get_byte, try_get_byte, from_u8, to_u8, try_get_enum8, get_enum8, get_enum8_or, set_enum8;
    Short => get_short, try_get_short, from_i16, to_i16, try_get_enum16, get_enum16, get_enum16_or, set_enum16;
    Int => get_int, try_get_int, from_i32, to_i32, try_get_enum32, get_enum32, get_enum32_or, set_enum32;
    Long => get_long, try_get_long, from_i64, to_i64, try_get_enum64, get_enum64, get_enum64_or, set_enum64;
}

/* Conveniences layered on the stored kinds. */
impl Dictionary {
    /// Stored as a [`ElementType::Byte`]; any non-zero byte reads as `true`.
    pub fn try_get_bool(&self, key: &str) -> Option<bool> {
        self.try_get_byte(key).map(|b| b != 0)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get_byte(key).map(|b| b != 0)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.try_get_bool(key).unwrap_or(default)
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.set_byte(key, value as u8);
    }

    /// Stored bit-for-bit as an [`ElementType::Int`].
    pub fn try_get_uint(&self, key: &str) -> Option<u32> {
        self.try_get_int(key).map(|i| i as u32)
    }

    pub fn get_uint(&self, key: &str) -> Result<u32> {
        self.get_int(key).map(|i| i as u32)
    }

    pub fn get_uint_or(&self, key: &str, default: u32) -> u32 {
        self.try_get_uint(key).unwrap_or(default)
    }

    pub fn set_uint(&mut self, key: impl Into<String>, value: u32) {
        self.set_int(key, value as i32);
    }

    /// Stored bit-for-bit as an [`ElementType::Long`].
    pub fn try_get_ulong(&self, key: &str) -> Option<u64> {
        self.try_get_long(key).map(|i| i as u64)
    }

    pub fn get_ulong(&self, key: &str) -> Result<u64> {
        self.get_long(key).map(|i| i as u64)
    }

    pub fn get_ulong_or(&self, key: &str, default: u64) -> u64 {
        self.try_get_ulong(key).unwrap_or(default)
    }

    pub fn set_ulong(&mut self, key: impl Into<String>, value: u64) {
        self.set_long(key, value as i64);
    }

    pub fn try_get_struct_blob(&self, key: &str) -> Option<&StructBlob> {
        self.get(key).and_then(Element::as_struct)
    }

    pub fn get_struct_blob(&self, key: &str) -> Result<&StructBlob> {
        self.try_get_struct_blob(key)
            .ok_or_else(|| Self::missing(key, ElementType::Struct))
    }

    /// Fails on a missing entry and on a width that does not match `T`.
    pub fn get_struct<T: Pod>(&self, key: &str) -> Result<T> {
        self.get_struct_blob(key)?.value()
    }

    pub fn try_get_struct<T: Pod>(&self, key: &str) -> Option<T> {
        self.try_get_struct_blob(key)?.value().ok()
    }

    pub fn get_struct_or<T: Pod>(&self, key: &str, default: T) -> T {
        self.try_get_struct(key).unwrap_or(default)
    }

    pub fn set_struct<T: Pod>(&mut self, key: impl Into<String>, value: &T) {
        self.insert(key, StructBlob::from_value(value));
    }

    pub fn set_struct_blob(&mut self, key: impl Into<String>, value: StructBlob) {
        self.insert(key, value);
    }

    /// The caller names the width; a stored blob of any other width is an error.
    pub fn get_struct_bytes<const W: usize>(&self, key: &str) -> Result<[u8; W]> {
        self.get_struct_blob(key)?.to_array()
    }

    pub fn set_struct_bytes<const W: usize>(&mut self, key: impl Into<String>, bytes: [u8; W]) {
        self.insert(key, StructBlob::from_array(bytes));
    }

    pub fn try_get_struct_array_raw(&self, key: &str) -> Option<&StructArray> {
        self.get(key).and_then(Element::as_struct_array)
    }

    pub fn get_struct_array<T: Pod>(&self, key: &str) -> Result<Vec<T>> {
        self.try_get_struct_array_raw(key)
            .ok_or_else(|| Self::missing(key, ElementType::StructArray))?
            .values()
    }

    pub fn try_get_struct_array<T: Pod>(&self, key: &str) -> Option<Vec<T>> {
        self.try_get_struct_array_raw(key)?.values().ok()
    }

    pub fn set_struct_array<T: Pod>(&mut self, key: impl Into<String>, values: &[T]) {
        self.insert(key, StructArray::from_values(values));
    }
}

impl FromIterator<(String, Element)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (String, Element)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use anyhow::Result;
    use num_derive::{FromPrimitive, ToPrimitive};

    #[test]
    fn typed_accessors() -> Result<()> {
        let mut dict = Dictionary::new();
        dict.set_string("FilePath", "C:/x.png");
        dict.set_bool("IsRawBitmapMode", false);
        dict.set_uint("Flags", u32::MAX);
        dict.set_byte_array("Thumb", vec![1, 2, 3]);

        assert_eq!(dict.get_string("FilePath")?, "C:/x.png");
        assert_eq!(dict.get_bool("IsRawBitmapMode")?, false);
        assert_eq!(dict.get_uint("Flags")?, u32::MAX);
        assert_eq!(dict.get_int("Flags")?, -1);
        assert_eq!(dict.try_get_byte_array("Thumb"), Some(&[1u8, 2, 3][..]));

        assert_eq!(dict.get_long_or("Missing", 7), 7);
        assert_eq!(dict.get_string_or("Missing", "def"), "def");
        assert_eq!(dict.try_get_int("FilePath"), None);
        assert!(matches!(
            dict.get_double("FilePath"),
            Err(RbeError::NoSuchEntry {
                expected: ElementType::Double,
                ..
            })
        ));
        Ok(())
    }

    #[derive(FromPrimitive, ToPrimitive, PartialEq, Clone, Copy, Debug)]
    enum BlendMode {
        Normal = 0,
        Add = 1,
        Multiply = 300,
    }

    #[test]
    fn enum_entries() -> Result<()> {
        let mut dict = Dictionary::new();
        dict.set_enum8("Blend", BlendMode::Add)?;
        assert_eq!(dict.get_byte("Blend")?, 1);
        assert_eq!(dict.get_enum8::<BlendMode>("Blend")?, BlendMode::Add);

        // 300 needs more than a byte.
        assert!(matches!(
            dict.set_enum8("Wide", BlendMode::Multiply),
            Err(RbeError::EnumOutOfRange {
                expected: ElementType::Byte,
                ..
            })
        ));
        assert!(!dict.contains_key("Wide"));
        dict.set_enum16("Wide", BlendMode::Multiply)?;
        assert_eq!(dict.get_enum16::<BlendMode>("Wide")?, BlendMode::Multiply);

        dict.set_int("Stale", 7);
        assert!(matches!(
            dict.get_enum32::<BlendMode>("Stale"),
            Err(RbeError::InvalidEnumValue { value: 7, .. })
        ));
        assert_eq!(dict.try_get_enum32::<BlendMode>("Stale"), None);
        assert_eq!(
            dict.get_enum64_or("Missing", BlendMode::Normal),
            BlendMode::Normal
        );
        // Width is part of the stored type.
        assert_eq!(dict.try_get_enum64::<BlendMode>("Blend"), None);
        Ok(())
    }

    #[test]
    fn replacing_keeps_position() {
        let mut dict = Dictionary::new();
        dict.set_int("a", 1);
        dict.set_int("b", 2);
        dict.set_int("a", 3);
        assert_eq!(dict.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(dict.get_int_or("a", 0), 3);

        dict.remove("a");
        assert_eq!(dict.keys().collect::<Vec<_>>(), ["b"]);
    }

    #[test]
    fn nested_containers() -> Result<()> {
        let mut dict = Dictionary::new();
        dict.create_dictionary("Child")?.set_int("x", 1);
        assert!(matches!(
            dict.create_dictionary("Child"),
            Err(RbeError::KeyInUse(_))
        ));
        dict.get_or_create_dictionary("Child").set_int("y", 2);
        assert_eq!(dict.get_dictionary("Child")?.len(), 2);

        dict.set_int("Scalar", 5);
        dict.get_or_create_list("Scalar").push_int(9);
        assert_eq!(dict.get_list("Scalar")?.get_int(0), Some(9));

        dict.create_list("Items")?.push_string("one");
        dict.get_list_mut("Items")?.push_string("two");
        assert_eq!(dict.get_list("Items")?.len(), 2);
        Ok(())
    }

    #[test]
    fn clone_is_deep() -> Result<()> {
        let mut original = Dictionary::new();
        original.create_dictionary("Child")?.set_int_array("xs", vec![1, 2]);

        let mut copy = original.clone();
        if let Some(xs) = copy
            .get_dictionary_mut("Child")?
            .get_mut("xs")
            .and_then(Element::as_int_array_mut)
        {
            xs.push(3);
        }

        assert_eq!(original.get_dictionary("Child")?.get_int_array("xs")?, [1, 2]);
        assert_eq!(copy.get_dictionary("Child")?.get_int_array("xs")?, [1, 2, 3]);
        Ok(())
    }
}
