//! Implements TokenStorePort using a JSON file.
//!
//! A single token under the fixed key `auth_token`.

use crate::domain::DomainError;
use crate::ports::TokenStorePort;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Default, Serialize, Deserialize)]
struct TokenData {
    auth_token: Option<String>,
}

/// JSON file-based token storage.
pub struct TokenFile {
    path: std::path::PathBuf,
}

impl TokenFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Atomic save using the write-replace pattern:
    /// 1. Write to temp file
    /// 2. sync_all() to ensure flush to disk
    /// 3. Atomic rename to target path
    async fn write_atomic(&self, data: &TokenData) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| DomainError::TokenStore(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::TokenStore(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::TokenStore(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::TokenStore(format!("sync temp file: {}", e)))?;
        drop(f); // Close file handle before rename

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::TokenStore(format!("atomic rename failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TokenStorePort for TokenFile {
    /// A missing or unreadable file counts as "no token".
    async fn load(&self) -> Result<Option<String>, DomainError> {
        let data: TokenData = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
            Err(_) => TokenData::default(),
        };
        Ok(data.auth_token)
    }

    async fn save(&self, token: &str) -> Result<(), DomainError> {
        self.write_atomic(&TokenData {
            auth_token: Some(token.to_string()),
        })
        .await
    }

    async fn clear(&self) -> Result<(), DomainError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::TokenStore(format!("remove token file: {}", e))),
        }
    }
}
