//! Faculty request/response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::faculty;

/// Body for creating or updating a faculty.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FacultyRequest {
    pub name: String,
    pub color: String,
}

/// Faculty as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FacultyResponse {
    pub id: i32,
    pub name: String,
    pub color: String,
}

impl From<faculty::Model> for FacultyResponse {
    fn from(m: faculty::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            color: m.color,
        }
    }
}

/// Exact color filter; absent lists every faculty.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FacultyColorQuery {
    pub color: Option<String>,
}

/// Case-insensitive search; a faculty matching either field is returned.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FacultySearchQuery {
    pub name: Option<String>,
    pub color: Option<String>,
}
