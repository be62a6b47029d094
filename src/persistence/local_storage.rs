use super::{HighScoreStore, PersistError, SaveData};

/// High score kept in the browser's LocalStorage
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "floppybird_highscore";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistError::Unavailable("LocalStorage is not accessible".into()))
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&mut self) -> Result<u32, PersistError> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => {
                let data = SaveData::from_json(&json)?;
                log::info!("Loaded high score {}", data.high_score);
                Ok(data.high_score)
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Ok(0)
            }
            Err(_) => Err(PersistError::Unavailable("LocalStorage read failed".into())),
        }
    }

    fn save(&mut self, high_score: u32) -> Result<(), PersistError> {
        let storage = Self::storage()?;
        let json = SaveData::new(high_score).to_json()?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| PersistError::Unavailable("LocalStorage write failed".into()))?;
        log::info!("High score {} saved", high_score);
        Ok(())
    }
}
