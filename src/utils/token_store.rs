use std::path::{Path, PathBuf};

use tokio::sync::RwLock;

use crate::error::AppResult;

/// The single provider token, cached in memory and persisted to a file so it
/// survives restarts.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    cached: RwLock<Option<String>>,
}

impl TokenStore {
    /// Read the token file once. A missing or blank file means no token yet.
    pub async fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let cached = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => normalize(&contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        };

        tracing::debug!(
            path = %path.display(),
            present = cached.is_some(),
            "Loaded provider token"
        );
        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self) -> Option<String> {
        self.cached.read().await.clone()
    }

    /// Replace the token; an empty value clears it
    pub async fn set(&self, token: &str) -> AppResult<()> {
        let token = normalize(token);
        let mut cached = self.cached.write().await;

        tokio::fs::write(&self.path, token.as_deref().unwrap_or_default()).await?;
        *cached = token;

        tracing::info!(
            path = %self.path.display(),
            cleared = cached.is_none(),
            "Stored provider token"
        );
        Ok(())
    }
}

fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
