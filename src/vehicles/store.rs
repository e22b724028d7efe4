//! Durable vehicle record store.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::vehicles::model::VehicleRecord;

/// On-disk layout of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    vehicles: Vec<VehicleRecord>,
}

/// Keyed collection of vehicle records. Records are write-once.
#[derive(Debug, Default)]
pub struct VehicleStore {
    records: DashMap<String, VehicleRecord>,
    persistence_path: Option<PathBuf>,
    /// Serializes writes to the store file.
    write_lock: Mutex<()>,
}

impl VehicleStore {
    /// Create an empty store. With a path, every push is written to that file.
    pub fn new(persistence_path: Option<PathBuf>) -> Self {
        Self {
            records: DashMap::new(),
            persistence_path,
            write_lock: Mutex::new(()),
        }
    }

    /// Open a file-backed store, loading existing records if the file exists.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let store = Self::new(Some(path.to_path_buf()));
        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            let file: StoreFile = serde_json::from_reader(reader)?;
            for record in file.vehicles {
                store.records.entry(record.id.clone()).or_insert(record);
            }
            tracing::info!(
                path = %path.display(),
                count = store.records.len(),
                "Loaded vehicle records"
            );
        }
        Ok(store)
    }

    pub fn find(&self, id: &str) -> Option<VehicleRecord> {
        self.records.get(id).map(|r| r.value().clone())
    }

    /// Insert a record if its id is not stored yet, then persist.
    ///
    /// Returns `Ok(false)` when a record with the same id already exists.
    /// Blocks on file IO; call from a blocking context inside the runtime.
    pub fn push(&self, record: VehicleRecord) -> std::io::Result<bool> {
        let inserted = match self.records.entry(record.id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        };
        if inserted {
            self.save()?;
        }
        Ok(inserted)
    }

    /// All records, ordered by id.
    pub fn all(&self) -> Vec<VehicleRecord> {
        let mut records: Vec<_> = self.records.iter().map(|r| r.value().clone()).collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write every record to a temp file, fsync it, then rename it over the store file.
    fn save(&self) -> std::io::Result<()> {
        let Some(path) = &self.persistence_path else {
            return Ok(());
        };
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let file = StoreFile { vehicles: self.all() };
        let tmp = path.with_extension("tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, &file)?;
            writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        }
        fs::rename(&tmp, path)?;
        tracing::debug!(
            path = %path.display(),
            count = file.vehicles.len(),
            "Saved vehicle records"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, color: &str) -> VehicleRecord {
        VehicleRecord {
            id: id.into(),
            vin: format!("VIN{id}"),
            color: color.into(),
            door_count: 4,
            drive_train: "v8".into(),
        }
    }

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("vehicle-store-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_store_operations() {
        let store = VehicleStore::new(None);
        assert!(store.find("1234").is_none());
        assert!(store.is_empty());

        assert!(store.push(record("1234", "Red")).unwrap());
        assert_eq!(store.find("1234").unwrap().color, "Red");

        // write-once
        assert!(!store.push(record("1234", "Blue")).unwrap());
        assert_eq!(store.find("1234").unwrap().color, "Red");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_all_is_sorted() {
        let store = VehicleStore::new(None);
        store.push(record("1235", "Red")).unwrap();
        store.push(record("1234", "Blue")).unwrap();
        let ids: Vec<_> = store.all().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["1234", "1235"]);
    }

    #[test]
    fn test_persistence() {
        let path = temp_path();

        let store = VehicleStore::open(&path).unwrap();
        store.push(record("1234", "Metallic Silver")).unwrap();

        let loaded = VehicleStore::open(&path).unwrap();
        assert_eq!(loaded.find("1234"), Some(record("1234", "Metallic Silver")));
        assert!(!path.with_extension("tmp").exists());

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[tokio::test]
    async fn test_push_from_blocking_task() {
        let path = temp_path();
        let store = std::sync::Arc::new(VehicleStore::open(&path).unwrap());

        let writer = store.clone();
        let inserted = tokio::task::spawn_blocking(move || writer.push(record("1236", "Red")))
            .await
            .unwrap()
            .unwrap();
        assert!(inserted);

        let contents: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(contents["vehicles"][0]["id"], "1236");
        assert_eq!(VehicleStore::open(&path).unwrap().len(), 1);

        std::fs::remove_file(&path).unwrap_or_default();
    }
}
