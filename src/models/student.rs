//! Student request/response models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::student;

/// Body for creating or updating a student.
///
/// `faculty_id` is only honoured on create; updates never touch the link.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StudentRequest {
    pub name: String,
    pub age: i32,
    #[serde(default)]
    pub faculty_id: Option<i32>,
}

/// Student as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub faculty_id: Option<i32>,
}

impl From<student::Model> for StudentResponse {
    fn from(m: student::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            age: m.age,
            faculty_id: m.faculty_id,
        }
    }
}

/// Exact-age filter. Without `age` every student is returned.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AgeQuery {
    pub age: Option<i32>,
}

/// Inclusive age range.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AgeRangeQuery {
    pub from: i32,
    pub to: i32,
}
