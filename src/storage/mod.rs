pub mod collections;
pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use crate::config::{AppConfig, StorageKind};
use crate::core::storage::Stores;
use crate::core::time::Clock;
use crate::errors::Result;

pub use collections::{CollectionKind, Collections};
pub use json_backend::JsonStorage;
pub use memory::MemoryStore;

/// An opened storage backend. Open once at startup and close at shutdown.
#[derive(Debug, Clone)]
pub enum StorageHandle {
    Json(Arc<JsonStorage>),
    Memory(Arc<MemoryStore>),
}

impl StorageHandle {
    pub fn open(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        match config.storage {
            StorageKind::Json => Ok(StorageHandle::Json(Arc::new(
                JsonStorage::open_with_clock(config.resolve_data_dir(), clock)?,
            ))),
            StorageKind::Memory => {
                tracing::warn!("using in-memory storage; records are not persisted");
                Ok(StorageHandle::Memory(Arc::new(MemoryStore::with_clock(
                    clock,
                ))))
            }
        }
    }

    pub fn stores(&self) -> Stores {
        match self {
            StorageHandle::Json(storage) => Stores::from_backend(storage.clone()),
            StorageHandle::Memory(storage) => Stores::from_backend(storage.clone()),
        }
    }

    pub fn close(&self) -> Result<()> {
        match self {
            StorageHandle::Json(storage) => storage.close(),
            StorageHandle::Memory(_) => Ok(()),
        }
    }
}
