//! Avatar service: upload with a filesystem + database dual write, lookups
//! and pagination.

use std::path::Path;

use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::{debug, info, warn};

use super::AvatarStorage;
use crate::db::DbPool;
use crate::db::avatars::{AvatarRecord, find_avatar_by_student, upsert_avatar};
use crate::entity::avatar;
use crate::error::{AppError, AppResult};
use crate::models::{AvatarUpload, Pagination, PaginationParams};

/// Part type that says nothing about the image; the extension decides instead.
const GENERIC_MEDIA_TYPE: &str = "application/octet-stream";

/// Avatar domain operations.
#[derive(Clone)]
pub struct AvatarService {
    pool: DbPool,
    storage: AvatarStorage,
    max_size: usize,
}

impl AvatarService {
    pub fn new(pool: DbPool, storage: AvatarStorage, max_size: usize) -> Self {
        Self {
            pool,
            storage,
            max_size,
        }
    }

    /// Largest accepted avatar payload in bytes.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Whether avatar storage can accept uploads.
    pub async fn storage_available(&self) -> bool {
        self.storage.is_available().await
    }

    /// Store an avatar for a student, replacing any previous one.
    ///
    /// The bytes are staged on disk, the row is written inside a transaction,
    /// and the staged file is renamed onto `<root>/<student_id>.<ext>` before
    /// the transaction commits. A failure before the commit rolls back the row
    /// and removes the staged file.
    pub async fn upload_avatar(
        &self,
        student_id: i32,
        upload: AvatarUpload,
    ) -> AppResult<avatar::Model> {
        if self.pool.get_student_by_id(student_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Student {}", student_id)));
        }

        let ext = AvatarStorage::extension_of(&upload.file_name)?;

        if upload.data.is_empty() {
            return Err(AppError::InvalidInput("Avatar file is empty".to_string()));
        }
        if upload.data.len() > self.max_size {
            return Err(AppError::PayloadTooLarge(format!(
                "Avatar is {} bytes, the limit is {} bytes",
                upload.data.len(),
                self.max_size
            )));
        }

        let media_type = upload
            .content_type
            .as_deref()
            .filter(|ct| !ct.trim().is_empty() && *ct != GENERIC_MEDIA_TYPE)
            .unwrap_or_else(|| AvatarStorage::content_type_for_extension(ext))
            .to_string();

        let staged = self.storage.stage(student_id, ext, &upload.data).await?;
        let file_path = staged.target_path().to_string_lossy().into_owned();

        let record = AvatarRecord {
            file_path,
            file_size: upload.data.len() as i64,
            media_type,
            data: upload.data,
        };

        let txn = match self.pool.connection().begin().await {
            Ok(txn) => txn,
            Err(e) => {
                self.storage.discard(staged).await;
                return Err(AppError::Database(format!(
                    "Failed to begin transaction: {}",
                    e
                )));
            }
        };

        let (avatar, previous_path) = match upsert_avatar(&txn, student_id, record).await {
            Ok(result) => result,
            Err(e) => {
                rollback_quietly(txn).await;
                self.storage.discard(staged).await;
                return Err(e);
            }
        };

        if let Err(e) = self.storage.commit(staged).await {
            rollback_quietly(txn).await;
            return Err(e);
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit avatar: {}", e)))?;

        if let Some(previous) = previous_path
            && previous != avatar.file_path
        {
            self.storage.remove(Path::new(&previous)).await;
        }

        info!(
            "Avatar uploaded: student_id={}, avatar_id={}, size={}",
            student_id, avatar.id, avatar.file_size
        );

        Ok(avatar)
    }

    /// Get an avatar by ID.
    pub async fn find_avatar(&self, id: i32) -> AppResult<avatar::Model> {
        debug!("Reading avatar {}", id);
        self.pool
            .get_avatar_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Avatar {}", id)))
    }

    /// One page of avatars in ID order, with pagination metadata.
    pub async fn get_all_avatars(
        &self,
        params: &PaginationParams,
    ) -> AppResult<(Vec<avatar::Model>, Pagination)> {
        let page = params.page();
        let limit = params.clamped_limit();

        let (avatars, total) = self
            .pool
            .list_avatars(params.page_index(), u64::from(limit))
            .await?;

        Ok((avatars, Pagination::new(page, limit, total)))
    }

    /// The avatar of a student.
    pub async fn get_avatar_by_student(&self, student_id: i32) -> AppResult<avatar::Model> {
        if self.pool.get_student_by_id(student_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Student {}", student_id)));
        }

        find_avatar_by_student(self.pool.connection(), student_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Avatar of student {}", student_id)))
    }

    /// Delete the avatar row. The file on disk is left in place.
    pub async fn delete_avatar(&self, id: i32) -> AppResult<avatar::Model> {
        let avatar = self
            .pool
            .delete_avatar_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Avatar {}", id)))?;

        info!(
            "Avatar {} deleted, file kept at {}",
            avatar.id, avatar.file_path
        );
        Ok(avatar)
    }

    /// Read the on-disk copy of an avatar, with its media type.
    pub async fn read_avatar_file(&self, id: i32) -> AppResult<(Vec<u8>, String)> {
        let avatar = self.find_avatar(id).await?;
        let data = self.storage.read(Path::new(&avatar.file_path)).await?;
        Ok((data, avatar.media_type))
    }
}

async fn rollback_quietly(txn: DatabaseTransaction) {
    if let Err(e) = txn.rollback().await {
        warn!("Failed to roll back avatar transaction: {}", e);
    }
}
