use sea_orm_migration::{prelude::*, schema::*};

static IDX_VERIFICATION_TOKEN_IDENTIFIER: &str = "idx-verification_tokens-identifier";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VerificationToken::Table)
                    .if_not_exists()
                    .col(string(VerificationToken::Token).primary_key())
                    .col(string(VerificationToken::Identifier))
                    .col(timestamp(VerificationToken::Expires))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_VERIFICATION_TOKEN_IDENTIFIER)
                    .table(VerificationToken::Table)
                    .col(VerificationToken::Identifier)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_VERIFICATION_TOKEN_IDENTIFIER)
                    .table(VerificationToken::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(VerificationToken::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum VerificationToken {
    #[sea_orm(iden = "verification_tokens")]
    Table,
    Token,
    Identifier,
    Expires,
}
