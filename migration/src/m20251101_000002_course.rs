use sea_orm_migration::{prelude::*, schema::*};

/// Courses available at registration until an admin curates the list.
static DEFAULT_COURSES: &[&str] = &[
    "B.Tech Computer Science",
    "B.Tech Electronics",
    "B.Tech Mechanical",
    "B.Tech Civil",
    "BCA",
    "MCA",
    "MBA",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(pk_auto(Course::Id))
                    .col(string_uniq(Course::Name))
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(Course::Table).columns([Course::Name]);
        for name in DEFAULT_COURSES {
            insert.values_panic([(*name).into()]);
        }

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Course {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Name,
}
