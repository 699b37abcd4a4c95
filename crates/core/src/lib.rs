//! Core domain for bookshelf.
//!
//! Pure types and capability traits shared by every backend. Nothing in this
//! crate performs I/O: stores, caches and publishers are declared here as
//! traits and implemented by the `bookshelf` binary crate.

pub mod book;
pub mod cache;
pub mod events;
pub mod serde;
pub mod storage;
