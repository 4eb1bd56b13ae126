use super::{KeyValueStore, StorageKey};
use crate::error::{Result, SelahError};
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: StorageKey) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| write_error("data directory", e))?;
        }
        Ok(())
    }
}

fn read_error(key: impl ToString, e: std::io::Error) -> SelahError {
    SelahError::StorageRead {
        key: key.to_string(),
        reason: e.to_string(),
    }
}

fn write_error(key: impl ToString, e: std::io::Error) -> SelahError {
    SelahError::StorageWrite {
        key: key.to_string(),
        reason: e.to_string(),
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: StorageKey) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| read_error(key, e))?;
        Ok(Some(content))
    }

    fn save(&mut self, key: StorageKey, value: &str) -> Result<()> {
        self.ensure_dir()?;

        let path = self.key_path(key);
        let tmp_path = self
            .root
            .join(format!(".{}-{}.tmp", key, std::process::id()));
        fs::write(&tmp_path, value).map_err(|e| write_error(key, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| write_error(key, e))?;

        Ok(())
    }
}
