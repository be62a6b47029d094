use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{HighScoreStore, PersistError, SaveData};

/// High score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<u32, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => {
                let data = SaveData::from_json(&json)?;
                log::info!("Loaded high score {} from {}", data.high_score, self.path.display());
                Ok(data.high_score)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                Ok(0)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, high_score: u32) -> Result<(), PersistError> {
        let json = SaveData::new(high_score).to_json()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved to {}", high_score, self.path.display());
        Ok(())
    }
}
