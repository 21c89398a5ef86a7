// ---------------------------------------------------------------------------
// SaveError: error types for save/load operations
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur during save/load operations.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (permission denied, disk full, unreadable file, etc.)
    Io(std::io::Error),
    /// Serializing the save record failed.
    Encode(String),
    /// The stored blob is not a valid save record.
    Decode(String),
    /// A storage backend could not be used at all.
    Unavailable(String),
    /// No save data was available to load.
    NoData,
    /// A required resource was missing from the ECS world.
    MissingResource(String),
}

impl SaveError {
    /// Corrupt data is treated like missing data by the loader.
    pub fn is_decode(&self) -> bool {
        matches!(self, SaveError::Decode(_))
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::Encode(msg) => write!(f, "Encoding error: {msg}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::Unavailable(msg) => write!(f, "Storage unavailable: {msg}"),
            SaveError::NoData => write!(f, "No save data available to load"),
            SaveError::MissingResource(name) => {
                write!(f, "Missing required resource: {name}")
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            SaveError::Io(e.into())
        } else {
            SaveError::Decode(e.to_string())
        }
    }
}
