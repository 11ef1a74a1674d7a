//! Student service: CRUD, age queries and aggregates.

use tracing::{debug, info};

use crate::db::DbPool;
use crate::entity::{faculty, student};
use crate::error::{AppError, AppResult};
use crate::models::StudentRequest;

/// How many students the "latest" query returns.
pub const LATEST_STUDENTS: u64 = 5;

/// Student domain operations.
#[derive(Clone)]
pub struct StudentService {
    pool: DbPool,
}

impl StudentService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a student. A `faculty_id` must name an existing faculty.
    pub async fn create(&self, req: &StudentRequest) -> AppResult<student::Model> {
        validate(req)?;

        if let Some(faculty_id) = req.faculty_id
            && self.pool.get_faculty_by_id(faculty_id).await?.is_none()
        {
            return Err(AppError::InvalidInput(format!(
                "Faculty {} does not exist",
                faculty_id
            )));
        }

        let student = self
            .pool
            .insert_student(&req.name, req.age, req.faculty_id)
            .await?;

        info!("Student {} created", student.id);
        Ok(student)
    }

    /// Get a student by ID.
    pub async fn read(&self, id: i32) -> AppResult<student::Model> {
        debug!("Reading student {}", id);
        self.pool
            .get_student_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student {}", id)))
    }

    /// Overwrite name and age; the faculty link is kept as is.
    pub async fn update(&self, id: i32, req: &StudentRequest) -> AppResult<student::Model> {
        validate(req)?;

        let student = self
            .pool
            .update_student(id, &req.name, req.age)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student {}", id)))?;

        info!("Student {} updated", id);
        Ok(student)
    }

    /// Delete a student, returning its last state.
    pub async fn delete(&self, id: i32) -> AppResult<student::Model> {
        let student = self
            .pool
            .delete_student_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student {}", id)))?;

        info!("Student {} deleted", id);
        Ok(student)
    }

    /// All students, ordered by ID.
    pub async fn list_all(&self) -> AppResult<Vec<student::Model>> {
        self.pool.list_students().await
    }

    /// Students of exactly the given age.
    pub async fn filter_by_age(&self, age: i32) -> AppResult<Vec<student::Model>> {
        debug!("Filtering students by age {}", age);
        self.pool.find_students_by_age(age).await
    }

    /// Students with `from_age <= age <= to_age`.
    pub async fn find_all_by_age_between(
        &self,
        from_age: i32,
        to_age: i32,
    ) -> AppResult<Vec<student::Model>> {
        debug!("Finding students aged {}..={}", from_age, to_age);
        self.pool
            .find_students_by_age_between(from_age, to_age)
            .await
    }

    /// The faculty a student belongs to.
    pub async fn get_faculty_of_student(&self, id: i32) -> AppResult<faculty::Model> {
        let student = self.read(id).await?;

        let faculty_id = student
            .faculty_id
            .ok_or_else(|| AppError::NotFound(format!("Faculty of student {}", id)))?;

        self.pool
            .get_faculty_by_id(faculty_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Faculty {}", faculty_id)))
    }

    /// Total number of students.
    pub async fn count_all(&self) -> AppResult<u64> {
        self.pool.count_students().await
    }

    /// Mean age computed by the store; 0 when there are no students.
    pub async fn average_age(&self) -> AppResult<f64> {
        Ok(self.pool.average_student_age().await?.unwrap_or(0.0))
    }

    /// The five most recently added students, newest first.
    pub async fn latest(&self) -> AppResult<Vec<student::Model>> {
        self.pool.find_latest_students(LATEST_STUDENTS).await
    }

    /// Upper-cased names starting with 'A' or 'a', sorted ascending.
    pub async fn names_starting_with_a(&self) -> AppResult<Vec<String>> {
        let students = self.pool.list_students().await?;
        Ok(names_starting_with_a(&students))
    }

    /// Mean age computed over all rows loaded in memory; 0 when empty.
    pub async fn average_age_in_memory(&self) -> AppResult<f64> {
        let students = self.pool.list_students().await?;
        Ok(mean_age(&students))
    }
}

fn validate(req: &StudentRequest) -> AppResult<()> {
    if req.name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Student name must not be empty".to_string(),
        ));
    }
    if req.age <= 0 {
        return Err(AppError::InvalidInput(
            "Student age must be positive".to_string(),
        ));
    }
    Ok(())
}

fn names_starting_with_a(students: &[student::Model]) -> Vec<String> {
    let mut names: Vec<String> = students
        .iter()
        .map(|s| s.name.as_str())
        .filter(|name| name.starts_with('A') || name.starts_with('a'))
        .map(str::to_uppercase)
        .collect();
    names.sort();
    names
}

fn mean_age(students: &[student::Model]) -> f64 {
    if students.is_empty() {
        return 0.0;
    }
    let total: i64 = students.iter().map(|s| i64::from(s.age)).sum();
    total as f64 / students.len() as f64
}
