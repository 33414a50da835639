use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Room::Table)
                    .if_not_exists()
                    .col(pk_auto(Room::Id))
                    .col(string_uniq(Room::RoomNumber))
                    .col(integer(Room::Capacity))
                    .col(integer(Room::OccupiedSeats).default(0))
                    .col(integer(Room::Floor))
                    .col(string(Room::Block))
                    .col(boolean(Room::IsActive).default(true))
                    .col(timestamp(Room::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Room::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Room {
    #[sea_orm(iden = "rooms")]
    Table,
    Id,
    RoomNumber,
    Capacity,
    OccupiedSeats,
    Floor,
    Block,
    IsActive,
    CreatedAt,
}
