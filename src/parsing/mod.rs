//! Page-level parsing utilities.
//!
//! This module holds the raw deserialization model of an export page and the
//! functions that turn one page into a [`Record`](crate::Record). The
//! document-level walk lives in [`transform`](crate::transform).

pub mod fedwiki;

pub use fedwiki::{
    FRAGMENT_SEPARATOR, RawFragment, RawJournalEntry, RawPage, json_type_name, parse_page,
    reconstruct_content, resolve_created_millis,
};
