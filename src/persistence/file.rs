//! JSON file store for native builds
//!
//! All keys live in one flat JSON object. Writes go to `{path}.tmp`, are
//! synced, then renamed over the real file, so a crash mid-write leaves the
//! previous contents intact.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{IntegerStore, StoreError};

/// Integer store backed by a JSON file
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

    fn read_all(&self) -> Result<BTreeMap<String, i64>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, i64>) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(values)?;
        atomic_write(&self.path, &json)?;
        Ok(())
    }
}

impl IntegerStore for JsonFileStore {
    fn get_integer(&self, key: &str) -> Result<i64, StoreError> {
        Ok(self.read_all()?.get(key).copied().unwrap_or(0))
    }

    fn set_integer(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        // An unreadable file is replaced rather than blocking the write
        let mut values = self.read_all().unwrap_or_else(|e| {
            log::warn!("Discarding unreadable store {}: {}", self.path.display(), e);
            BTreeMap::new()
        });
        values.insert(key.to_string(), value);
        self.write_all(&values)?;
        log::info!("Saved {}={} to {}", key, value, self.path.display());
        Ok(())
    }
}

fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&tmp)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
