//! Cart persistence in a JSON file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_commerce::prelude::*;

/// On-disk layout: the snapshot fields plus when it was written.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartFile {
    #[serde(flatten)]
    snapshot: CartSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

/// A cart stored as one JSON document.
///
/// A missing file loads as an empty cart. Writes go to a sibling temp file
/// first and are renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    config: CartConfig,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, config: CartConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the file was last written by this tool, if recorded.
    pub fn saved_at(&self) -> Result<Option<DateTime<Utc>>, CommerceError> {
        Ok(self.read()?.and_then(|file| file.saved_at))
    }

    fn read(&self) -> Result<Option<CartFile>, CommerceError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(&self.path, e)),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CartSource for JsonFileStore {
    fn load(&self) -> Result<CartSnapshot, CommerceError> {
        match self.read()? {
            Some(file) => {
                tracing::debug!(path = %self.path.display(), version = file.snapshot.version, "loaded cart file");
                Ok(file.snapshot)
            }
            None => {
                tracing::debug!(path = %self.path.display(), "no cart file, starting empty");
                Ok(Cart::with_config(&self.config).snapshot())
            }
        }
    }
}

impl CartSink for JsonFileStore {
    fn persist(&self, snapshot: &CartSnapshot) -> Result<(), CommerceError> {
        let file = CartFile {
            snapshot: snapshot.clone(),
            saved_at: Some(Utc::now()),
        };
        let content = serde_json::to_string_pretty(&file)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| storage_error(dir, e))?;
        }
        let temp = self.temp_path();
        fs::write(&temp, content).map_err(|e| storage_error(&temp, e))?;
        fs::rename(&temp, &self.path).map_err(|e| storage_error(&self.path, e))?;

        tracing::info!(path = %self.path.display(), version = snapshot.version, "saved cart");
        Ok(())
    }
}

fn storage_error(path: &Path, e: std::io::Error) -> CommerceError {
    CommerceError::Storage(format!("{}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO_CART: &str = include_str!("../../../demos/cart.json");

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("carts").join("cart.json"), CartConfig::default())
    }

    #[test]
    fn test_missing_file_is_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(
            dir.path().join("cart.json"),
            CartConfig {
                currency: Currency::EUR,
            },
        );

        let snapshot = store.load().unwrap();
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.version, 0);
        assert_eq!(snapshot.currency, Currency::EUR);
    }

    #[test]
    fn test_persist_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let demo: CartSnapshot = serde_json::from_str(DEMO_CART).unwrap();

        store.persist(&demo).unwrap();
        assert_eq!(store.load().unwrap(), demo);
        assert!(store.saved_at().unwrap().is_some());
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_shared_cart_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .persist(&serde_json::from_str(DEMO_CART).unwrap())
            .unwrap();

        let cart = SharedCart::hydrate(&store).unwrap();
        cart.increment_quantity(&"9f1fba8a-c39c-44f3-8f7e-a380ef6620fc".into())
            .unwrap();
        assert!(cart.sync_to(&store).unwrap());

        let reloaded = SharedCart::hydrate(&store).unwrap();
        assert_eq!(reloaded.snapshot(), cart.snapshot());
        assert_eq!(reloaded.total_in_cents(), 47_996 + 24_999);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(path, CartConfig::default()).load().unwrap_err();
        assert!(matches!(err, CommerceError::Serialization(_)));
    }
}
