use serde::{Deserialize, Serialize};

/// Top-level client configuration, persisted as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub backend: BackendConfig,
    pub storage: StorageConfig,
    pub assistant_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            storage: StorageConfig::default(),
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl BackendConfig {
    /// Join an endpoint path onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// localStorage when the browser allows it, memory otherwise
    #[default]
    Auto,
    LocalStorage,
    Memory,
}

impl StorageBackendType {
    pub fn all() -> &'static [StorageBackendType] {
        &[
            StorageBackendType::Auto,
            StorageBackendType::LocalStorage,
            StorageBackendType::Memory,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            StorageBackendType::Auto => "Auto",
            StorageBackendType::LocalStorage => "Local storage",
            StorageBackendType::Memory => "Memory (not persisted)",
        }
    }
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_ASSISTANT_NAME: &str = "Alina";
