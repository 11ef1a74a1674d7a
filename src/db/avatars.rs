//! Database queries for avatars.
//!
//! `find_avatar_by_student` and `upsert_avatar` take any SeaORM connection so
//! the upload path can run them inside a transaction.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entity::avatar::{self, ActiveModel, Entity as Avatar};
use crate::error::{AppError, AppResult};

use super::DbPool;

/// Fields written on every avatar upload.
#[derive(Debug, Clone)]
pub struct AvatarRecord {
    pub file_path: String,
    pub file_size: i64,
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Find the avatar belonging to a student.
pub async fn find_avatar_by_student<C>(db: &C, student_id: i32) -> AppResult<Option<avatar::Model>>
where
    C: ConnectionTrait,
{
    Avatar::find()
        .filter(avatar::Column::StudentId.eq(student_id))
        .one(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get avatar for student: {}", e)))
}

/// Insert the student's avatar, or overwrite the existing row in place.
///
/// Returns the stored row and, when a row was overwritten, its previous file path.
pub async fn upsert_avatar<C>(
    db: &C,
    student_id: i32,
    record: AvatarRecord,
) -> AppResult<(avatar::Model, Option<String>)>
where
    C: ConnectionTrait,
{
    let existing = find_avatar_by_student(db, student_id).await?;
    let previous_path = existing.as_ref().map(|m| m.file_path.clone());

    let model = match existing {
        Some(model) => {
            let mut active: ActiveModel = model.into();
            active.file_path = Set(record.file_path);
            active.file_size = Set(record.file_size);
            active.media_type = Set(record.media_type);
            active.data = Set(record.data);
            active
                .update(db)
                .await
                .map_err(|e| AppError::Database(format!("Failed to update avatar: {}", e)))?
        }
        None => ActiveModel {
            student_id: Set(student_id),
            file_path: Set(record.file_path),
            file_size: Set(record.file_size),
            media_type: Set(record.media_type),
            data: Set(record.data),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert avatar: {}", e)))?,
    };

    Ok((model, previous_path))
}

impl DbPool {
    /// Get an avatar by ID.
    pub async fn get_avatar_by_id(&self, id: i32) -> AppResult<Option<avatar::Model>> {
        Avatar::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get avatar: {}", e)))
    }

    /// List avatars by ID, one page at a time.
    ///
    /// `page` is 0-based. Returns the page rows and the total row count.
    pub async fn list_avatars(&self, page: u64, limit: u64) -> AppResult<(Vec<avatar::Model>, u64)> {
        let paginator = Avatar::find()
            .order_by_asc(avatar::Column::Id)
            .paginate(self.connection(), limit);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| AppError::Database(format!("Failed to count avatars: {}", e)))?;

        let avatars = paginator
            .fetch_page(page)
            .await
            .map_err(|e| AppError::Database(format!("Failed to list avatars: {}", e)))?;

        Ok((avatars, total))
    }

    /// Delete an avatar row, returning it as it was before deletion.
    pub async fn delete_avatar_by_id(&self, id: i32) -> AppResult<Option<avatar::Model>> {
        let Some(existing) = self.get_avatar_by_id(id).await? else {
            return Ok(None);
        };

        existing
            .clone()
            .delete(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete avatar: {}", e)))?;

        Ok(Some(existing))
    }
}
