//! Faculty service: CRUD, color queries and the students of a faculty.

use tracing::{debug, info};

use crate::db::DbPool;
use crate::entity::{faculty, student};
use crate::error::{AppError, AppResult};
use crate::models::FacultyRequest;

/// Faculty domain operations.
#[derive(Clone)]
pub struct FacultyService {
    pool: DbPool,
}

impl FacultyService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, req: &FacultyRequest) -> AppResult<faculty::Model> {
        let faculty = self.pool.insert_faculty(&req.name, &req.color).await?;
        info!("Faculty {} created", faculty.id);
        Ok(faculty)
    }

    pub async fn read(&self, id: i32) -> AppResult<faculty::Model> {
        debug!("Reading faculty {}", id);
        self.pool
            .get_faculty_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Faculty {}", id)))
    }

    /// Overwrite name and color.
    pub async fn update(&self, id: i32, req: &FacultyRequest) -> AppResult<faculty::Model> {
        let faculty = self
            .pool
            .update_faculty(id, &req.name, &req.color)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Faculty {}", id)))?;

        info!("Faculty {} updated", id);
        Ok(faculty)
    }

    /// Delete a faculty, returning its last state. Its students lose the link.
    pub async fn delete(&self, id: i32) -> AppResult<faculty::Model> {
        let faculty = self
            .pool
            .delete_faculty_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Faculty {}", id)))?;

        info!("Faculty {} deleted", id);
        Ok(faculty)
    }

    /// All faculties, ordered by ID.
    pub async fn list_all(&self) -> AppResult<Vec<faculty::Model>> {
        self.pool.list_faculties().await
    }

    /// Faculties with exactly this color (case-sensitive).
    pub async fn filter_by_color(&self, color: &str) -> AppResult<Vec<faculty::Model>> {
        self.pool.find_faculties_by_color(color).await
    }

    /// Faculties whose name matches `name` or whose color matches `color`,
    /// case-insensitively. At least one criterion is required.
    pub async fn find_by_name_or_color_ignore_case(
        &self,
        name: Option<&str>,
        color: Option<&str>,
    ) -> AppResult<Vec<faculty::Model>> {
        if name.is_none() && color.is_none() {
            return Err(AppError::InvalidInput(
                "Either name or color must be given".to_string(),
            ));
        }

        self.pool
            .find_faculties_by_name_or_color_ignore_case(name, color)
            .await
    }

    /// Students of a faculty. An existing faculty with no students yields an
    /// empty list; a missing faculty is NotFound.
    pub async fn get_students(&self, id: i32) -> AppResult<Vec<student::Model>> {
        let faculty = self.read(id).await?;
        self.pool.find_students_by_faculty(&faculty).await
    }
}
