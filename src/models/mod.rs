//! Request and response models for the school API.

use utoipa::ToSchema;

pub mod avatar;
pub mod faculty;
pub mod student;

pub use avatar::{AvatarListResponse, AvatarResponse, AvatarUpload};
pub use faculty::{FacultyColorQuery, FacultyRequest, FacultyResponse, FacultySearchQuery};
pub use student::{AgeQuery, AgeRangeQuery, StudentRequest, StudentResponse};

/// Pagination parameters.
#[derive(Debug, Clone, Default, serde::Deserialize, ToSchema)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    100
}

impl PaginationParams {
    /// 1-based page number, never below 1.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(default_page()).max(1)
    }

    /// Clamp limit to `1..=100`.
    pub fn clamped_limit(&self) -> u32 {
        self.limit.unwrap_or(default_limit()).clamp(1, 100)
    }

    /// 0-based page index for the paginator.
    pub fn page_index(&self) -> u64 {
        u64::from(self.page() - 1)
    }
}

/// Pagination metadata for responses.
#[derive(Debug, Clone, serde::Serialize, ToSchema)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Create pagination metadata.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit.max(1))) as u32
        };

        Pagination {
            page,
            limit,
            total,
            total_pages,
        }
    }
}
