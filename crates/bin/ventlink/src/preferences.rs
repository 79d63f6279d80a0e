//! JSON file implementation of [`PreferenceStore`].

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ventlink_app::ports::PreferenceStore;
use ventlink_domain::error::PreferenceError;

/// On-disk layout of the preference file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Preferences {
    ip_address: String,
}

/// Preference file errors.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceFileError {
    #[error("failed to access preference file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed preference file {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<PreferenceFileError> for PreferenceError {
    fn from(err: PreferenceFileError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Stores the user's chosen unit address in a small JSON file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Preferences, PreferenceFileError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Preferences::default());
            }
            Err(source) => {
                return Err(PreferenceFileError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| PreferenceFileError::Json {
            path: self.path.clone(),
            source,
        })
    }

    async fn write(&self, preferences: &Preferences) -> Result<(), PreferenceFileError> {
        let content =
            serde_json::to_string_pretty(preferences).map_err(|source| PreferenceFileError::Json {
                path: self.path.clone(),
                source,
            })?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| PreferenceFileError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn ip_address(&self) -> impl Future<Output = String> + Send {
        async move {
            match self.read().await {
                Ok(preferences) => preferences.ip_address,
                Err(err) => {
                    tracing::warn!(error = %err, cause = ?std::error::Error::source(&err), "ignoring unreadable preferences");
                    String::new()
                }
            }
        }
    }

    fn set_ip_address(
        &self,
        ip_address: String,
    ) -> impl Future<Output = Result<(), PreferenceError>> + Send {
        async move {
            let preferences = Preferences { ip_address };
            self.write(&preferences).await.map_err(|err| {
                tracing::warn!(error = %err, cause = ?std::error::Error::source(&err), "unable to save preferences");
                PreferenceError::from(err)
            })
        }
    }
}
