//! Core types and trait definitions for the maildrop submission inbox.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod admin;
pub mod credentials;
pub mod error;
pub mod export;
pub mod mailto;
pub mod store;
pub mod submission;
pub mod writer;

pub use error::{Error, Result};
