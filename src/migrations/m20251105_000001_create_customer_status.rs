use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerStatus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerStatus::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CustomerStatus::CustomerId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerStatus::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomerStatus::ConsumptionKwh)
                            .decimal_len(10, 3)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CustomerStatus::PricePerKwh)
                            .decimal_len(10, 4)
                            .not_null()
                            .default(0),
                    )
                    // No default: every row carries an explicit status
                    .col(
                        ColumnDef::new(CustomerStatus::DonationStatus)
                            .string_len(10)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_customer_status_customer_id")
                    .table(CustomerStatus::Table)
                    .col(CustomerStatus::CustomerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerStatus::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CustomerStatus {
    Table,
    Id,
    CustomerId,
    Timestamp,
    ConsumptionKwh,
    PricePerKwh,
    DonationStatus,
}
