use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_loans_user_id")
                    .table(Loans::Table)
                    .col(Loans::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_loans_book_isbn")
                    .table(Loans::Table)
                    .col(Loans::BookIsbn)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_loans_state_expected")
                    .table(Loans::Table)
                    .col(Loans::State)
                    .col(Loans::ExpectedReturnDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_loans_state_expected",
            "idx_loans_book_isbn",
            "idx_loans_user_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Loans::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Loans {
    Table,
    UserId,
    BookIsbn,
    State,
    ExpectedReturnDate,
}
