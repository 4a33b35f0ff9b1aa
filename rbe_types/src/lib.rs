//! A compact tagged binary format for persisting trees of typed elements.
//!
//! Build a tree out of [`types::Dictionary`], [`types::List`] and leaf
//! [`serde::Element`]s, then hand its root to [`streams`].

pub mod config;
mod error;
mod io_utils;
pub mod serde;
pub mod streams;
pub mod types;

pub use error::*;
