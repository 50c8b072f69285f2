//! notedb - A minimal file-backed note service
//!
//! Notes live in one JSON file. The HTTP layer stores and fetches them
//! through a single lock-guarded [`note::NoteStore`].

pub mod cli;
pub mod http_server;
pub mod note;
pub mod observability;
