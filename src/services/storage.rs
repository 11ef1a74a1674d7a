//! Local filesystem storage for avatar images.
//!
//! One file per student at `<root>/<student_id>.<ext>`. Writes go to a staging
//! file under `<root>/.upload_temp` first and are moved into place with a
//! rename, so a reader never observes a half-written avatar.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

const STAGING_DIR: &str = ".upload_temp";

/// Avatar storage rooted at the configured directory.
#[derive(Clone)]
pub struct AvatarStorage {
    root: PathBuf,
    counter: Arc<AtomicU64>,
}

/// A fully written staging file waiting to be moved onto its final path.
#[derive(Debug)]
pub struct StagedFile {
    temp_path: PathBuf,
    target_path: PathBuf,
}

impl StagedFile {
    /// Path the file will occupy once committed.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }
}

impl AvatarStorage {
    /// Create the storage, creating the root and staging directories if needed.
    pub async fn new(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(root.join(STAGING_DIR))
            .await
            .map_err(|e| {
                AppError::FileSystem(format!(
                    "Failed to create avatar directory {}: {}",
                    root.display(),
                    e
                ))
            })?;

        info!("Avatar storage initialized: dir={}", root.display());

        Ok(Self {
            root,
            counter: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Whether the staging directory exists, i.e. uploads can be accepted.
    pub async fn is_available(&self) -> bool {
        tokio::fs::metadata(self.root.join(STAGING_DIR))
            .await
            .is_ok_and(|meta| meta.is_dir())
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Extract the extension (text after the last '.') from an uploaded file name.
    ///
    /// Names without an extension, and extensions that are not plain ASCII
    /// alphanumerics, are rejected.
    pub fn extension_of(file_name: &str) -> AppResult<&str> {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .ok_or_else(|| {
                AppError::InvalidInput(format!("File name '{}' has no extension", file_name))
            })?;

        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::InvalidInput(format!(
                "File name '{}' has an invalid extension",
                file_name
            )));
        }

        Ok(ext)
    }

    /// Get the content type for an image based on its extension.
    pub fn content_type_for_extension(ext: &str) -> &'static str {
        match ext.to_lowercase().as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            "svg" => "image/svg+xml",
            "ico" => "image/x-icon",
            _ => "application/octet-stream",
        }
    }

    /// Final path of a student's avatar: `<root>/<student_id>.<ext>`.
    pub fn avatar_path(&self, student_id: i32, ext: &str) -> PathBuf {
        self.root.join(format!("{}.{}", student_id, ext))
    }

    /// Write the bytes to a fresh staging file.
    pub async fn stage(&self, student_id: i32, ext: &str, data: &[u8]) -> AppResult<StagedFile> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let temp_path = self
            .root
            .join(STAGING_DIR)
            .join(format!("{}.{}.{}.part", student_id, ext, n));

        let mut file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(|e| AppError::FileSystem(format!("Failed to create staging file: {}", e)))?;

        let written = async {
            file.write_all(data).await?;
            file.flush().await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            remove_quietly(&temp_path).await;
            return Err(AppError::FileSystem(format!(
                "Failed to write staging file: {}",
                e
            )));
        }

        Ok(StagedFile {
            temp_path,
            target_path: self.avatar_path(student_id, ext),
        })
    }

    /// Move a staged file onto its final path, replacing any file already there.
    ///
    /// On failure the staging file is removed.
    pub async fn commit(&self, staged: StagedFile) -> AppResult<PathBuf> {
        if let Err(e) = tokio::fs::rename(&staged.temp_path, &staged.target_path).await {
            remove_quietly(&staged.temp_path).await;
            return Err(AppError::FileSystem(format!(
                "Failed to move avatar into place at {}: {}",
                staged.target_path.display(),
                e
            )));
        }

        Ok(staged.target_path)
    }

    /// Drop a staged file that will not be committed.
    pub async fn discard(&self, staged: StagedFile) {
        remove_quietly(&staged.temp_path).await;
    }

    /// Read a stored avatar file.
    pub async fn read(&self, path: &Path) -> AppResult<Vec<u8>> {
        tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound(format!("Avatar file {}", path.display()))
            } else {
                AppError::FileSystem(format!("Failed to read {}: {}", path.display(), e))
            }
        })
    }

    /// Remove a stored file. Failures are logged and otherwise ignored.
    pub async fn remove(&self, path: &Path) {
        remove_quietly(path).await;
    }
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!("Failed to remove {}: {}", path.display(), e);
    }
}
