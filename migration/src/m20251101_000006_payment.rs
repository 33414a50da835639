use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000004_student_profile::StudentProfile;

static IDX_PAYMENT_STUDENT_TYPE_DUE_DATE: &str = "idx-payments-student_id-type-due_date";
static FK_PAYMENT_STUDENT_ID: &str = "fk-payments-student_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_auto(Payment::Id))
                    .col(integer(Payment::StudentId))
                    .col(string_len(Payment::Type, 16))
                    .col(big_integer(Payment::Amount))
                    .col(big_integer(Payment::PaidAmount).default(0))
                    .col(date(Payment::DueDate))
                    .col(string_len(Payment::Status, 16))
                    .col(timestamp(Payment::CreatedAt))
                    .col(timestamp(Payment::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // One payment row per student, fee type and month
        manager
            .create_index(
                Index::create()
                    .name(IDX_PAYMENT_STUDENT_TYPE_DUE_DATE)
                    .table(Payment::Table)
                    .col(Payment::StudentId)
                    .col(Payment::Type)
                    .col(Payment::DueDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAYMENT_STUDENT_ID)
                    .from_tbl(Payment::Table)
                    .from_col(Payment::StudentId)
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
                    .name(FK_PAYMENT_STUDENT_ID)
                    .table(Payment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PAYMENT_STUDENT_TYPE_DUE_DATE)
                    .table(Payment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Payment {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
    StudentId,
    Type,
    Amount,
    PaidAmount,
    DueDate,
    Status,
    CreatedAt,
    UpdatedAt,
}
