//! JSON-file backend for the maildrop submission store.
//!
//! The whole collection lives in one pretty-printed JSON file, the single
//! well-known location both the writer and the admin panel share. Every
//! load/save moves the entire blob; there is no locking or versioning, so
//! concurrent writers clobber each other under last-write-wins.

mod decode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{JsonStore, MemoryStore};
