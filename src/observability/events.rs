//! Observable events for the note service
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Data file created by `init`
    DataFileCreated,
    /// Server listening
    Serving,
    /// Server stopped
    ShutdownComplete,

    // Store
    /// Note store constructed
    StoreInit,
    /// Data file read begins
    NotesLoading,
    /// Data file read into memory
    NotesLoaded,
    /// Data file rewritten
    NotesSaved,
    /// Note written
    NoteStored,
    /// Note served
    NoteFetched,
    /// Store operation failed
    StoreError,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DataFileCreated => "DATA_FILE_CREATED",
            Event::Serving => "SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::StoreInit => "STORE_INIT",
            Event::NotesLoading => "NOTES_LOADING",
            Event::NotesLoaded => "NOTES_LOADED",
            Event::NotesSaved => "NOTES_SAVED",
            Event::NoteStored => "NOTE_STORED",
            Event::NoteFetched => "NOTE_FETCHED",
            Event::StoreError => "STORE_ERROR",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Event::StoreError)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::BootStart.as_str(), "BOOT_START");
        assert_eq!(Event::NotesLoading.as_str(), "NOTES_LOADING");
        assert_eq!(Event::NotesLoaded.as_str(), "NOTES_LOADED");
        assert_eq!(Event::StoreError.to_string(), "STORE_ERROR");
    }

    #[test]
    fn test_only_store_error_is_error() {
        assert!(Event::StoreError.is_error());
        assert!(!Event::NoteStored.is_error());
        assert!(!Event::NotesLoading.is_error());
        assert!(!Event::Serving.is_error());
    }
}
