use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::SelectionEntry;

pub const SNAPSHOT_VERSION: u32 = 1;

fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Both selection lists as one record, so a single write keeps them in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub favorites: Vec<SelectionEntry>,
    #[serde(default)]
    pub compare: Vec<SelectionEntry>,
}

impl Default for SelectionSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            favorites: Vec::new(),
            compare: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("selection store io failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("selection record is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("selection record could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("unsupported selection record version {0}")]
    UnsupportedVersion(u32),
}

/// Durable home of the selection snapshot.
pub trait SelectionPersistence: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<SelectionSnapshot>, PersistenceError>;
    fn save(&self, snapshot: &SelectionSnapshot) -> Result<(), PersistenceError>;
}

/// Stored document with its entries still untyped, so one bad entry does not
/// cost the rest of the list.
#[derive(Debug, Deserialize)]
struct StoredSnapshot {
    #[serde(default = "current_version")]
    version: u32,
    #[serde(default)]
    favorites: Vec<serde_json::Value>,
    #[serde(default)]
    compare: Vec<serde_json::Value>,
}

fn decode_entries(list: &'static str, values: Vec<serde_json::Value>) -> Vec<SelectionEntry> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(list, index, error = %err, "dropping unreadable selection entry");
                None
            }
        })
        .collect()
}

/// Fails only when the document itself is unreadable or too new.
fn decode(text: &str) -> Result<SelectionSnapshot, PersistenceError> {
    let stored: StoredSnapshot = serde_json::from_str(text).map_err(PersistenceError::Decode)?;
    if stored.version > SNAPSHOT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(stored.version));
    }
    Ok(SelectionSnapshot {
        version: stored.version,
        favorites: decode_entries("favorites", stored.favorites),
        compare: decode_entries("compare", stored.compare),
    })
}

/// JSON file written through a temporary sibling that is synced and then
/// renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        PathBuf::from(temp)
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SelectionPersistence for JsonFilePersistence {
    fn load(&self) -> Result<Option<SelectionSnapshot>, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };
        decode(&text).map(Some)
    }

    fn save(&self, snapshot: &SelectionSnapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
            }
        }

        let body = serde_json::to_vec_pretty(snapshot).map_err(PersistenceError::Encode)?;
        let temp_path = self.temp_path();
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|err| self.io_error(err))?;
        file.write_all(&body).map_err(|err| self.io_error(err))?;
        file.sync_all().map_err(|err| self.io_error(err))?;
        fs::rename(&temp_path, &self.path).map_err(|err| self.io_error(err))?;
        Ok(())
    }
}

/// In-memory stand-in holding the raw serialized text, so callers can inspect
/// what was written or seed it with arbitrary content.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    raw: Mutex<Option<String>>,
    fail_saves: bool,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
            fail_saves: false,
        }
    }

    /// Every save fails with an io error; loads still work.
    pub fn failing() -> Self {
        Self {
            raw: Mutex::new(None),
            fail_saves: true,
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.raw
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SelectionPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<SelectionSnapshot>, PersistenceError> {
        match self.raw() {
            Some(text) => decode(&text).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &SelectionSnapshot) -> Result<(), PersistenceError> {
        if self.fail_saves {
            return Err(PersistenceError::Io {
                path: PathBuf::from("memory"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "saves disabled"),
            });
        }
        let text = serde_json::to_string(snapshot).map_err(PersistenceError::Encode)?;
        *self.raw.lock().unwrap_or_else(PoisonError::into_inner) = Some(text);
        Ok(())
    }
}
