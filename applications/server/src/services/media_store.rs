/// Media store - persists uploaded files on disk
use crate::error::{Result, ServerError};
use std::path::{Component, Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 16;
const MAX_NAME_ATTEMPTS: usize = 3;

/// A file written by [`MediaStore::save`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Reference handed to clients, resolvable by the static file server
    pub location: String,

    /// Path on disk
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    base_path: PathBuf,
    public_prefix: String,
}

impl MediaStore {
    pub fn new(base_path: PathBuf, public_prefix: impl Into<String>) -> Self {
        Self {
            base_path,
            public_prefix: public_prefix.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Initialize the storage directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Write an uploaded file under a fresh, unique name
    ///
    /// The name is `<UTC timestamp>-<uuid>.<original extension>`. The file
    /// is created with create-new semantics so an existing file is never
    /// overwritten, and is synced to disk before this returns.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<StoredMedia> {
        let mut attempt = 0;
        let (file_name, path, mut file) = loop {
            let file_name = unique_file_name(original_name);
            let path = self.base_path.join(&file_name);

            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => break (file_name, path, file),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists
                    && attempt + 1 < MAX_NAME_ATTEMPTS =>
                {
                    attempt += 1;
                }
                Err(e) => {
                    return Err(ServerError::Storage(format!(
                        "Failed to create {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        };

        let written = async {
            file.write_all(data).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(ServerError::Storage(format!(
                "Failed to write {}: {}",
                path.display(),
                e
            )));
        }

        tracing::debug!("Stored {} as {}", original_name, path.display());

        Ok(StoredMedia {
            location: format!("{}/{}", self.public_prefix, file_name),
            path,
        })
    }

    /// Map a location back to its path on disk
    ///
    /// Only locations naming a single file directly under the storage
    /// directory resolve; anything else is rejected as a traversal attempt.
    pub fn resolve(&self, location: &str) -> Result<PathBuf> {
        let file_name = location
            .strip_prefix(self.public_prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| {
                ServerError::BadRequest(format!("Location outside media store: {}", location))
            })?;

        let mut components = Path::new(file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if !file_name.contains('\\') => {
                Ok(self.base_path.join(name))
            }
            _ => Err(ServerError::BadRequest(format!(
                "Path traversal attempt detected: {}",
                location
            ))),
        }
    }

    /// Delete the file behind a location
    ///
    /// Returns `false` if the file was already gone.
    pub async fn delete(&self, location: &str) -> Result<bool> {
        let path = self.resolve(location)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Deleted {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ServerError::Storage(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Build a collision-free file name that keeps the original extension
fn unique_file_name(original_name: &str) -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%3f");
    let id = Uuid::new_v4().simple();

    match sanitized_extension(original_name) {
        Some(ext) => format!("{}-{}.{}", timestamp, id, ext),
        None => format!("{}-{}", timestamp, id),
    }
}

fn sanitized_extension(original_name: &str) -> Option<String> {
    let ext = Path::new(original_name).extension()?.to_str()?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
