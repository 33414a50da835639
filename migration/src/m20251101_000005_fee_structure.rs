use sea_orm_migration::{prelude::*, schema::*};

static IDX_FEE_STRUCTURE_YEAR_SEMESTER: &str = "idx-fee_structures-year-semester";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeeStructure::Table)
                    .if_not_exists()
                    .col(pk_auto(FeeStructure::Id))
                    .col(integer(FeeStructure::Year))
                    .col(string_len(FeeStructure::Semester, 16))
                    .col(big_integer(FeeStructure::SingleRoomFees))
                    .col(big_integer(FeeStructure::DoubleRoomFees))
                    .col(big_integer(FeeStructure::TripleRoomFees))
                    .col(big_integer(FeeStructure::HostelFees))
                    .col(big_integer(FeeStructure::MessFees))
                    .col(date(FeeStructure::DueDate))
                    .col(timestamp(FeeStructure::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // One fee structure per academic period
        manager
            .create_index(
                Index::create()
                    .name(IDX_FEE_STRUCTURE_YEAR_SEMESTER)
                    .table(FeeStructure::Table)
                    .col(FeeStructure::Year)
                    .col(FeeStructure::Semester)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_FEE_STRUCTURE_YEAR_SEMESTER)
                    .table(FeeStructure::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(FeeStructure::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum FeeStructure {
    #[sea_orm(iden = "fee_structures")]
    Table,
    Id,
    Year,
    Semester,
    SingleRoomFees,
    DoubleRoomFees,
    TripleRoomFees,
    HostelFees,
    MessFees,
    DueDate,
    CreatedAt,
}
