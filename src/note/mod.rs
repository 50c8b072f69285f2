//! # Notes
//!
//! The note record and its file-backed store.

pub mod errors;
pub mod model;
pub mod store;

pub use errors::{ErrorKind, NoteError, NoteResult};
pub use model::{Note, NoteMap};
pub use store::{NoteStore, DEFAULT_DATA_FILE};
