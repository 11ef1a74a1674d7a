//! Database queries for faculties.

use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::entity::faculty::{self, ActiveModel, Entity as Faculty};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// Insert a new faculty.
    pub async fn insert_faculty(&self, name: &str, color: &str) -> AppResult<faculty::Model> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            color: Set(color.to_string()),
            ..Default::default()
        };

        model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert faculty: {}", e)))
    }

    /// Get a faculty by ID.
    pub async fn get_faculty_by_id(&self, id: i32) -> AppResult<Option<faculty::Model>> {
        Faculty::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get faculty: {}", e)))
    }

    /// Overwrite name and color of a faculty.
    ///
    /// Returns `None` without writing when the faculty does not exist.
    pub async fn update_faculty(
        &self,
        id: i32,
        name: &str,
        color: &str,
    ) -> AppResult<Option<faculty::Model>> {
        let Some(existing) = self.get_faculty_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.color = Set(color.to_string());

        let updated = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update faculty: {}", e)))?;

        Ok(Some(updated))
    }

    /// Delete a faculty, returning the row as it was before deletion.
    ///
    /// Linked students keep existing with their faculty link cleared.
    pub async fn delete_faculty_by_id(&self, id: i32) -> AppResult<Option<faculty::Model>> {
        let Some(existing) = self.get_faculty_by_id(id).await? else {
            return Ok(None);
        };

        existing
            .clone()
            .delete(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete faculty: {}", e)))?;

        Ok(Some(existing))
    }

    /// All faculties, ordered by ID.
    pub async fn list_faculties(&self) -> AppResult<Vec<faculty::Model>> {
        Faculty::find()
            .order_by_asc(faculty::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list faculties: {}", e)))
    }

    /// Find faculties with exactly the given color (case-sensitive).
    pub async fn find_faculties_by_color(&self, color: &str) -> AppResult<Vec<faculty::Model>> {
        Faculty::find()
            .filter(faculty::Column::Color.eq(color))
            .order_by_asc(faculty::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to filter faculties: {}", e)))
    }

    /// Find faculties whose name equals `name` OR whose color equals `color`,
    /// ignoring case on both sides. A `None` criterion matches nothing.
    pub async fn find_faculties_by_name_or_color_ignore_case(
        &self,
        name: Option<&str>,
        color: Option<&str>,
    ) -> AppResult<Vec<faculty::Model>> {
        if name.is_none() && color.is_none() {
            return Ok(Vec::new());
        }

        let mut condition = Condition::any();

        if let Some(name) = name {
            condition = condition.add(
                Expr::expr(Func::lower(Expr::col(faculty::Column::Name)))
                    .eq(name.to_lowercase()),
            );
        }

        if let Some(color) = color {
            condition = condition.add(
                Expr::expr(Func::lower(Expr::col(faculty::Column::Color)))
                    .eq(color.to_lowercase()),
            );
        }

        Faculty::find()
            .filter(condition)
            .order_by_asc(faculty::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to search faculties: {}", e)))
    }
}
