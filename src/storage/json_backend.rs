use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::utils::paths::{ensure_dir, write_atomic};

use super::{KeyValueStore, Result};

const FILE_EXTENSION: &str = "json";

/// Filesystem-backed store: each key is one `<key>.json` file in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", canonical_key(key), FILE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        write_atomic(&self.path_for(key), value)
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn absent_key_reads_as_none() {
        let temp = tempdir().unwrap();
        let store = JsonFileStore::new(temp.path().join("data")).unwrap();
        assert!(store.get("debt-tracker-data").unwrap().is_none());
    }

    #[test]
    fn set_then_get_returns_bytes() {
        let temp = tempdir().unwrap();
        let store = JsonFileStore::new(temp.path().to_path_buf()).unwrap();
        store.set("debt-tracker-data", b"{\"a\":1}").unwrap();
        assert_eq!(
            store.get("debt-tracker-data").unwrap().as_deref(),
            Some(&b"{\"a\":1}"[..])
        );
        assert!(temp.path().join("debt-tracker-data.json").exists());
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let temp = tempdir().unwrap();
        let store = JsonFileStore::new(temp.path().to_path_buf()).unwrap();
        let path = store.path_for("../outside");
        assert_eq!(path.parent(), Some(temp.path()));
        assert_eq!(store.path_for("///").file_name().unwrap(), "ledger.json");
    }

    #[test]
    fn unreadable_entry_is_an_error() {
        let temp = tempdir().unwrap();
        let store = JsonFileStore::new(temp.path().to_path_buf()).unwrap();
        fs::create_dir_all(store.path_for("blocked")).unwrap();
        assert!(store.get("blocked").is_err());
    }
}
