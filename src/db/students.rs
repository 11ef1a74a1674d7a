//! Database queries for students.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entity::faculty;
use crate::entity::student::{self, ActiveModel, Entity as Student};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// Insert a new student.
    pub async fn insert_student(
        &self,
        name: &str,
        age: i32,
        faculty_id: Option<i32>,
    ) -> AppResult<student::Model> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            age: Set(age),
            faculty_id: Set(faculty_id),
            ..Default::default()
        };

        model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert student: {}", e)))
    }

    /// Get a student by ID.
    pub async fn get_student_by_id(&self, id: i32) -> AppResult<Option<student::Model>> {
        Student::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get student: {}", e)))
    }

    /// Overwrite name and age of a student. The faculty link is left untouched.
    ///
    /// Returns `None` without writing when the student does not exist.
    pub async fn update_student(
        &self,
        id: i32,
        name: &str,
        age: i32,
    ) -> AppResult<Option<student::Model>> {
        let Some(existing) = self.get_student_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.age = Set(age);

        let updated = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update student: {}", e)))?;

        Ok(Some(updated))
    }

    /// Delete a student, returning the row as it was before deletion.
    pub async fn delete_student_by_id(&self, id: i32) -> AppResult<Option<student::Model>> {
        let Some(existing) = self.get_student_by_id(id).await? else {
            return Ok(None);
        };

        existing
            .clone()
            .delete(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete student: {}", e)))?;

        Ok(Some(existing))
    }

    /// List all students ordered by ID.
    pub async fn list_students(&self) -> AppResult<Vec<student::Model>> {
        Student::find()
            .order_by_asc(student::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list students: {}", e)))
    }

    /// Find students with exactly the given age.
    pub async fn find_students_by_age(&self, age: i32) -> AppResult<Vec<student::Model>> {
        Student::find()
            .filter(student::Column::Age.eq(age))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to filter students by age: {}", e)))
    }

    /// Find students whose age lies in `[from_age, to_age]`.
    pub async fn find_students_by_age_between(
        &self,
        from_age: i32,
        to_age: i32,
    ) -> AppResult<Vec<student::Model>> {
        Student::find()
            .filter(student::Column::Age.between(from_age, to_age))
            .order_by_asc(student::Column::Age)
            .order_by_asc(student::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to filter students by age range: {}", e))
            })
    }

    /// Count all students.
    pub async fn count_students(&self) -> AppResult<u64> {
        Student::find()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count students: {}", e)))
    }

    /// Average age computed by the store. `None` when there are no students.
    pub async fn average_student_age(&self) -> AppResult<Option<f64>> {
        // AVG over an integer column is NUMERIC on PostgreSQL; cast so both
        // backends decode into f64.
        let average = Student::find()
            .select_only()
            .column_as(
                Expr::cust("CAST(AVG(\"age\") AS DOUBLE PRECISION)"),
                "average_age",
            )
            .into_tuple::<Option<f64>>()
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to average student age: {}", e)))?;

        Ok(average.flatten())
    }

    /// The most recently created students, highest ID first.
    pub async fn find_latest_students(&self, limit: u64) -> AppResult<Vec<student::Model>> {
        Student::find()
            .order_by_desc(student::Column::Id)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get latest students: {}", e)))
    }

    /// Students linked to the given faculty row.
    pub async fn find_students_by_faculty(
        &self,
        faculty: &faculty::Model,
    ) -> AppResult<Vec<student::Model>> {
        faculty
            .find_related(Student)
            .order_by_asc(student::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get faculty students: {}", e)))
    }
}
