//! SeaORM entity definitions for the school database.

pub mod avatar;
pub mod faculty;
pub mod student;
