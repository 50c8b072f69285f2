//! # HTTP Server Module
//!
//! Axum server exposing the note store.
//!
//! # Endpoints
//!
//! - `POST /note` - Create or overwrite a note
//! - `GET /note/:id` - Fetch a note
//! - `/health` - Health check
//! - `/metrics` - Counters

pub mod config;
pub mod note_routes;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use note_routes::{ErrorResponse, NoteState};
pub use server::HttpServer;
