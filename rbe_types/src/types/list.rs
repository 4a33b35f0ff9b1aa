use crate::serde::Element;
use crate::types::{Dictionary, StructBlob};
use bytemuck::Pod;
use uuid::Uuid;

/// An ordered sequence of elements. Entries may be of mixed types.
#[derive(PartialEq, Clone, Default, Debug)]
pub struct List {
    items: Vec<Element>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, el: impl Into<Element>) {
        self.items.push(el.into());
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.items.get_mut(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<Element> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.items.iter()
    }

    /// Appends an empty dictionary and hands it back for filling.
    pub fn push_dictionary(&mut self) -> &mut Dictionary {
        self.items.push(Element::Dictionary(Dictionary::new()));
        match self.items.last_mut() {
            Some(Element::Dictionary(dict)) => dict,
            _ => unreachable!(),
        }
    }

    pub fn push_list(&mut self) -> &mut List {
        self.items.push(Element::List(List::new()));
        match self.items.last_mut() {
            Some(Element::List(list)) => list,
            _ => unreachable!(),
        }
    }

    pub fn get_dictionary(&self, index: usize) -> Option<&Dictionary> {
        self.get(index).and_then(Element::as_dictionary)
    }

    pub fn get_list(&self, index: usize) -> Option<&List> {
        self.get(index).and_then(Element::as_list)
    }

    pub fn push_struct<T: Pod>(&mut self, value: &T) {
        self.push(StructBlob::from_value(value));
    }

    pub fn get_struct<T: Pod>(&self, index: usize) -> Option<T> {
        self.get(index)
            .and_then(Element::as_struct)
            .and_then(|blob| blob.value().ok())
    }

    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(Element::as_string).map(String::as_str)
    }

    pub fn push_string(&mut self, s: impl Into<String>) {
        self.items.push(Element::String(s.into()));
    }
}

macro_rules! scalar_items {
    ($($variant:ident: $ty:ty => $as_fn:ident, $get:ident, $push:ident;)*) => {
        impl List {
            $(
                pub fn $get(&self, index: usize) -> Option<$ty> {
                    self.get(index).and_then(Element::$as_fn)
                }

                pub fn $push(&mut self, value: $ty) {
                    self.items.push(Element::$variant(value));
                }
            )*
        }
    };
}

scalar_items! {
    Byte: u8 => as_byte, get_byte, push_byte;
    Short: i16 => as_short, get_short, push_short;
    Int: i32 => as_int, get_int, push_int;
    Long: i64 => as_long, get_long, push_long;
    Float: f32 => as_float, get_float, push_float;
    Double: f64 => as_double, get_double, push_double;
    Guid: Uuid => as_guid, get_guid, push_guid;
}

impl FromIterator<Element> for List {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
