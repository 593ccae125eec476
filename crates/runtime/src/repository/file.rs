//! JSON-file repository.
//!
//! Each record lives in `{kind}_{id}.json` under the base directory. Writes go
//! to a temp file first and are renamed into place, so a crash mid-save
//! leaves the previous version intact.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{RecordId, Repository, RepositoryError, Result};

pub struct JsonFileRepository<K, T> {
    base_dir: PathBuf,
    _records: PhantomData<fn() -> (K, T)>,
}

impl<K: RecordId, T> JsonFileRepository<K, T> {
    /// Create the repository, making `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            _records: PhantomData,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, id: K) -> PathBuf {
        self.base_dir.join(format!("{}_{}.json", K::KIND, id.raw()))
    }

    fn parse_file_name(name: &str) -> Option<K> {
        let raw = name
            .strip_prefix(K::KIND)?
            .strip_prefix('_')?
            .strip_suffix(".json")?
            .parse::<u32>()
            .ok()?;
        Some(K::from_raw(raw))
    }
}

impl<K, T> Repository<K, T> for JsonFileRepository<K, T>
where
    K: RecordId,
    T: Serialize + DeserializeOwned,
{
    fn save(&self, id: K, record: &T) -> Result<()> {
        let path = self.record_path(id);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(record)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(target: "runtime::store", kind = K::KIND, id = %id, path = %path.display(), "record saved");
        Ok(())
    }

    fn load(&self, id: K) -> Result<Option<T>> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let record = serde_json::from_slice(&bytes).map_err(|e| RepositoryError::CorruptedData {
            kind: K::KIND,
            id: id.raw(),
            reason: e.to_string(),
        })?;
        Ok(Some(record))
    }

    fn exists(&self, id: K) -> bool {
        self.record_path(id).exists()
    }

    fn delete(&self, id: K) -> Result<()> {
        let path = self.record_path(id);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(target: "runtime::store", kind = K::KIND, id = %id, "record deleted");
        }
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<K>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(name) = path.file_name().and_then(|s| s.to_str())
                && let Some(id) = Self::parse_file_name(name)
            {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}
