//! Emoji picker core: builds a categorized catalog from an emoji dataset,
//! answers incremental searches over it, and converts shorthand such as
//! `:pizza:` into glyphs.
//!
//! The terminal front end in `main.rs` is one consumer; anything that can
//! paint a grid and forward keystrokes can mount a [`widget::PickerWidget`].

pub mod catalog;
pub mod config;
pub mod convert;
pub mod dataset;
pub mod debounce;
pub mod error;
pub mod insert;
pub mod search;
pub mod widget;

pub use catalog::{Catalog, Category, EmojiRecord, EntryId, Provider, RawEmojiRecord};
pub use error::{PickerError, Result};
pub use search::{QueryResult, SearchIndex, query};
pub use widget::{FieldKind, PickerId, PickerWidget};
