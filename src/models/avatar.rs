//! Avatar models.

use serde::Serialize;
use utoipa::ToSchema;

use super::Pagination;
use crate::entity::avatar;

/// A received avatar file, before it is stored.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    /// Original file name as sent by the client; only its extension is kept
    pub file_name: String,
    /// Content type of the multipart part, if the client sent one
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Avatar metadata as returned by the API. The image bytes are served
/// separately.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvatarResponse {
    pub id: i32,
    pub student_id: i32,
    pub file_path: String,
    pub file_size: i64,
    pub media_type: String,
}

impl From<avatar::Model> for AvatarResponse {
    fn from(m: avatar::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            file_path: m.file_path,
            file_size: m.file_size,
            media_type: m.media_type,
        }
    }
}

/// Paginated avatar list.
#[derive(Debug, Serialize, ToSchema)]
pub struct AvatarListResponse {
    pub avatars: Vec<AvatarResponse>,
    pub pagination: Pagination,
}
