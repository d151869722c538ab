//! Pick the storage backend named by the configuration.
//!
//! `Auto` prefers localStorage and falls back to memory.

use std::rc::Rc;
use chat_core::ports::StoragePort;
use chat_types::{Result, config::StorageBackendType};
use super::{LocalStorage, MemoryStorage};

/// Returns a trait object so callers are backend-agnostic.
/// Only an explicit `LocalStorage` request can fail.
pub fn open_storage(kind: &StorageBackendType) -> Result<Rc<dyn StoragePort>> {
    match kind {
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory");
            Ok(Rc::new(MemoryStorage::new()))
        }
        StorageBackendType::LocalStorage => {
            let local = LocalStorage::open()?;
            log::info!("Storage backend: localStorage");
            Ok(Rc::new(local))
        }
        StorageBackendType::Auto => match LocalStorage::open() {
            Ok(local) => {
                log::info!("Storage backend: localStorage");
                Ok(Rc::new(local))
            }
            Err(e) => {
                log::warn!("localStorage unavailable ({}), falling back to memory", e);
                Ok(Rc::new(MemoryStorage::new()))
            }
        },
    }
}
