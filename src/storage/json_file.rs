use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{HIGH_SCORE_KEY, HighScoreStore};

/// High score kept as a small JSON object on disk
///
/// The file holds `{"snakeHighScore": <n>}`. Other keys already present in
/// the file are preserved on save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, serde_json::Value>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read high score from {:?}", self.path));
            }
        };

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse high score file {:?}", self.path))
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32> {
        let entries = self.read_entries()?;
        match entries.get(HIGH_SCORE_KEY) {
            None => Ok(0),
            Some(value) => serde_json::from_value(value.clone())
                .with_context(|| format!("Invalid {} entry in {:?}", HIGH_SCORE_KEY, self.path)),
        }
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        // An unreadable file is overwritten rather than blocking the save
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(HIGH_SCORE_KEY.to_string(), high_score.into());

        let json =
            serde_json::to_string_pretty(&entries).context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}
