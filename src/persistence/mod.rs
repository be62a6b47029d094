//! High score persistence
//!
//! The simulation reads the high score once at start-up and writes it back
//! whenever a round beats it. Where it lives is up to the host:
//! - [`MemoryStore`]: in-process, used by tests and throwaway sessions
//! - [`JsonFileStore`]: versioned JSON file, written via tmp + rename (native)
//! - [`LocalStorageStore`]: browser LocalStorage (wasm32)

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Current save envelope version
pub const SAVE_VERSION: u32 = 1;

/// Somewhere the high score can be read from and written to
pub trait HighScoreStore {
    /// Read the persisted high score (0 when nothing was saved yet)
    fn load(&mut self) -> Result<u32, PersistError>;
    /// Persist a new high score
    fn save(&mut self, high_score: u32) -> Result<(), PersistError>;
}

/// Versioned on-disk representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub high_score: u32,
}

impl SaveData {
    pub fn new(high_score: u32) -> Self {
        Self {
            version: SAVE_VERSION,
            high_score,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        serde_json::to_string(self).map_err(PersistError::Corrupt)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let data: SaveData = serde_json::from_str(json).map_err(PersistError::Corrupt)?;
        if data.version > SAVE_VERSION {
            return Err(PersistError::Unavailable(format!(
                "save version {} is newer than supported {}",
                data.version, SAVE_VERSION
            )));
        }
        Ok(data)
    }
}

/// Errors surfaced by a [`HighScoreStore`]
#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Corrupt(serde_json::Error),
    Unavailable(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "High score I/O failed: {}", e),
            PersistError::Corrupt(e) => write!(f, "High score data is corrupt: {}", e),
            PersistError::Unavailable(why) => write!(f, "High score storage unavailable: {}", why),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Corrupt(e) => Some(e),
            PersistError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        PersistError::Io(e)
    }
}

/// In-memory store. Can be told to fail, and remembers every save.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<u32>,
    pub fail_loads: bool,
    pub fail_saves: bool,
    pub saves: Vec<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds a high score
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            value: Some(high_score),
            ..Default::default()
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u32, PersistError> {
        if self.fail_loads {
            return Err(PersistError::Unavailable("memory store set to fail".into()));
        }
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, high_score: u32) -> Result<(), PersistError> {
        if self.fail_saves {
            return Err(PersistError::Unavailable("memory store set to fail".into()));
        }
        self.value = Some(high_score);
        self.saves.push(high_score);
        Ok(())
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&mut self) -> Result<u32, PersistError> {
        (**self).load()
    }

    fn save(&mut self, high_score: u32) -> Result<(), PersistError> {
        (**self).save(high_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_data_round_trip() {
        let json = SaveData::new(42).to_json().unwrap();
        assert_eq!(json, r#"{"version":1,"high_score":42}"#);
        assert_eq!(SaveData::from_json(&json).unwrap().high_score, 42);
    }

    #[test]
    fn test_save_data_rejects_future_version() {
        let err = SaveData::from_json(r#"{"version":9,"high_score":3}"#).unwrap_err();
        assert!(matches!(err, PersistError::Unavailable(_)));
    }

    #[test]
    fn test_save_data_rejects_garbage() {
        let err = SaveData::from_json("highscore=12").unwrap_err();
        assert!(matches!(err, PersistError::Corrupt(_)));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), 0);
        store.save(7).unwrap();
        assert_eq!(store.load().unwrap(), 7);
        assert_eq!(store.saves, vec![7]);

        store.fail_saves = true;
        assert!(store.save(8).is_err());
        assert_eq!(store.load().unwrap(), 7);
    }
}
