//! # Note Store
//!
//! In-memory id -> note map backed by one JSON file.
//!
//! Every operation holds the store lock for its full duration, file I/O
//! included. Writes rewrite the whole file. Reads reload the whole file
//! before the lookup, so the disk is the only source of truth for `get`.

use std::fs::{self, File, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::errors::{NoteError, NoteResult};
use super::model::{Note, NoteMap};
use crate::observability::{log_event_with_fields, Event};

/// Data file location used when no configuration overrides it,
/// relative to the process working directory.
pub const DEFAULT_DATA_FILE: &str = "note/db/notes.json";

/// File-backed note store
#[derive(Debug)]
pub struct NoteStore {
    path: PathBuf,
    notes: Mutex<NoteMap>,
}

impl NoteStore {
    /// Create a store over `path`. Nothing is read or written until the
    /// first operation; the file is not required to exist yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        log_event_with_fields(Event::StoreInit, &[("path", path.display().to_string().as_str())]);
        Self {
            path,
            notes: Mutex::new(NoteMap::new()),
        }
    }

    /// Store over [`DEFAULT_DATA_FILE`] beneath `working_dir`
    pub fn in_dir(working_dir: impl AsRef<Path>) -> Self {
        Self::new(working_dir.as_ref().join(DEFAULT_DATA_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty `{}` data file, creating parent directories.
    ///
    /// This is the only code path that creates the data file; `save`
    /// refuses to. Returns `Ok(false)` if the file already exists.
    pub fn create_data_file(path: impl AsRef<Path>) -> NoteResult<bool> {
        let path = path.as_ref();
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                NoteError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        fs::write(path, b"{}")
            .map_err(|e| NoteError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        log_event_with_fields(Event::DataFileCreated, &[("path", path.display().to_string().as_str())]);
        Ok(true)
    }

    /// Replace the in-memory map with the contents of the data file
    pub fn load(&self) -> NoteResult<()> {
        let mut notes = self.lock();
        self.load_into(&mut notes)
    }

    /// Rewrite the data file from the in-memory map
    pub fn save(&self) -> NoteResult<()> {
        let notes = self.lock();
        self.save_from(&notes)
    }

    /// Insert or overwrite `note`, then persist the whole map.
    ///
    /// The id is not validated; an empty id is stored like any other.
    pub fn put(&self, note: Note) -> NoteResult<Note> {
        let mut notes = self.lock();
        notes.insert(note.id.clone(), note.clone());
        self.save_from(&notes)?;

        log_event_with_fields(Event::NoteStored, &[("id", note.id.as_str())]);
        Ok(note)
    }

    /// Reload from disk, then look up `id`.
    ///
    /// Any in-memory entry whose save failed is discarded by the reload.
    pub fn get(&self, id: &str) -> NoteResult<Note> {
        let mut notes = self.lock();
        self.load_into(&mut notes)?;

        let note = notes
            .get(id)
            .cloned()
            .ok_or_else(|| NoteError::NoteNotFound(id.to_string()))?;

        log_event_with_fields(Event::NoteFetched, &[("id", id)]);
        Ok(note)
    }

    /// Number of notes currently held in memory
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Poison is ignored: the next `get` replaces the map wholesale.
    fn lock(&self) -> MutexGuard<'_, NoteMap> {
        self.notes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_into(&self, notes: &mut NoteMap) -> NoteResult<()> {
        log_event_with_fields(
            Event::NotesLoading,
            &[("path", self.path.display().to_string().as_str())],
        );
        let bytes = fs::read(&self.path).map_err(|e| self.io_error("read", e))?;

        let loaded: NoteMap = serde_json::from_slice(&bytes).map_err(|e| {
            NoteError::Decode(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;

        *notes = loaded;
        log_event_with_fields(
            Event::NotesLoaded,
            &[
                ("count", notes.len().to_string().as_str()),
            ],
        );
        Ok(())
    }

    fn save_from(&self, notes: &NoteMap) -> NoteResult<()> {
        let bytes = serde_json::to_vec(notes).map_err(|e| {
            NoteError::Encode(format!("Failed to serialize notes: {}", e))
        })?;

        // The data file must already exist; its permissions carry over
        let metadata = fs::metadata(&self.path).map_err(|e| self.io_error("stat", e))?;

        // Replace the file a symlink points at, not the link itself
        let target = fs::canonicalize(&self.path).map_err(|e| self.io_error("resolve", e))?;

        let tmp_path = Self::tmp_path(&target);
        if let Err(e) = Self::write_synced(&tmp_path, &bytes, metadata.permissions()) {
            let _ = fs::remove_file(&tmp_path);
            return Err(NoteError::Io(format!(
                "Failed to write {}: {}",
                tmp_path.display(),
                e
            )));
        }

        fs::rename(&tmp_path, &target).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            NoteError::Io(format!(
                "Failed to replace {}: {}",
                target.display(),
                e
            ))
        })?;

        log_event_with_fields(
            Event::NotesSaved,
            &[
                ("bytes", bytes.len().to_string().as_str()),
                ("count", notes.len().to_string().as_str()),
            ],
        );
        Ok(())
    }

    fn write_synced(path: &Path, bytes: &[u8], permissions: Permissions) -> io::Result<()> {
        let mut file = File::create(path)?;
        file.set_permissions(permissions)?;
        file.write_all(bytes)?;
        file.sync_all()
    }

    /// Sibling of the data file, so the final rename stays on one filesystem
    fn tmp_path(target: &Path) -> PathBuf {
        let mut tmp = target.to_path_buf().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn io_error(&self, op: &str, e: io::Error) -> NoteError {
        if e.kind() == io::ErrorKind::NotFound {
            NoteError::FileNotFound(self.path.clone())
        } else {
            NoteError::Io(format!("Failed to {} {}: {}", op, self.path.display(), e))
        }
    }
}
