//! Create avatar table.
//!
//! `student_id` is unique: a second upload for the same student overwrites the row.

use sea_orm_migration::prelude::*;

use super::m20241001_000002_create_student::Student;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Avatar::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Avatar::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Avatar::StudentId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Avatar::FilePath).string().not_null())
                    .col(ColumnDef::new(Avatar::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Avatar::MediaType).string().not_null())
                    .col(ColumnDef::new(Avatar::Data).blob().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_avatar_student")
                            .from(Avatar::Table, Avatar::StudentId)
                            .to(Student::Table, Student::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Avatar::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Avatar {
    Table,
    Id,
    StudentId,
    FilePath,
    FileSize,
    MediaType,
    Data,
}
