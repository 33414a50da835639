use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000004_student_profile::StudentProfile;

static IDX_QUERY_STUDENT_ID: &str = "idx-queries-student_id";
static FK_QUERY_STUDENT_ID: &str = "fk-queries-student_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Query::Table)
                    .if_not_exists()
                    .col(pk_auto(Query::Id))
                    .col(integer(Query::StudentId))
                    .col(string(Query::Title))
                    .col(text(Query::Description))
                    .col(string_len(Query::Status, 16))
                    .col(text_null(Query::AdminResponse))
                    .col(timestamp(Query::CreatedAt))
                    .col(timestamp(Query::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_QUERY_STUDENT_ID)
                    .table(Query::Table)
                    .col(Query::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_QUERY_STUDENT_ID)
                    .from_tbl(Query::Table)
                    .from_col(Query::StudentId)
                    .to_tbl(StudentProfile::Table)
                    .to_col(StudentProfile::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_QUERY_STUDENT_ID)
                    .table(Query::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_QUERY_STUDENT_ID)
                    .table(Query::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Query::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Query {
    #[sea_orm(iden = "queries")]
    Table,
    Id,
    StudentId,
    Title,
    Description,
    Status,
    AdminResponse,
    CreatedAt,
    UpdatedAt,
}
