#![allow(elided_lifetimes_in_paths)]

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_catalog_tables::Migration),
            Box::new(m20240101_000002_create_stock_tables::Migration),
            Box::new(m20240101_000003_create_proposal_tables::Migration),
            Box::new(m20240101_000004_create_order_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_catalog_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Products::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Products::Sku).string().not_null().unique_key())
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(ColumnDef::new(Products::Description).text().not_null())
                        .col(
                            ColumnDef::new(Products::ReorderPoint)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Products::Category)
                                .string()
                                .not_null()
                                .default("standard"),
                        )
                        .col(
                            ColumnDef::new(Products::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Locations::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Locations::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Locations::Code)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Locations::Description).text().not_null())
                        .col(
                            ColumnDef::new(Locations::Capacity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Locations::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Locations::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Locations::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Products {
        Table,
        Id,
        Sku,
        Name,
        Description,
        ReorderPoint,
        Category,
        CreatedAt,
    }

    #[derive(Iden)]
    enum Locations {
        Table,
        Id,
        Code,
        Description,
        Capacity,
        IsActive,
        CreatedAt,
    }
}

mod m20240101_000002_create_stock_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_stock_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Stock::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Stock::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Stock::ProductId).uuid().not_null())
                        .col(ColumnDef::new(Stock::LocationId).uuid().not_null())
                        .col(ColumnDef::new(Stock::Quantity).integer().not_null())
                        .col(ColumnDef::new(Stock::CustomReorderPoint).integer().null())
                        .col(
                            ColumnDef::new(Stock::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // One stock row per (product, location) pair.
            manager
                .create_index(
                    Index::create()
                        .name("idx_stock_product_location")
                        .table(Stock::Table)
                        .col(Stock::ProductId)
                        .col(Stock::LocationId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StockMovements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockMovements::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockMovements::ProductId).uuid().not_null())
                        .col(ColumnDef::new(StockMovements::LocationId).uuid().not_null())
                        .col(ColumnDef::new(StockMovements::Actor).string().null())
                        .col(
                            ColumnDef::new(StockMovements::MovementType)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockMovements::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(StockMovements::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_stock_movements_created_at")
                        .table(StockMovements::Table)
                        .col(StockMovements::CreatedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StockAudits::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockAudits::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockAudits::ProductId).uuid().not_null())
                        .col(ColumnDef::new(StockAudits::LocationId).uuid().not_null())
                        .col(ColumnDef::new(StockAudits::Actor).string().null())
                        .col(ColumnDef::new(StockAudits::Direction).string().not_null())
                        .col(ColumnDef::new(StockAudits::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(StockAudits::PreviousStock)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockAudits::NewStock).integer().not_null())
                        .col(ColumnDef::new(StockAudits::Observations).text().not_null())
                        .col(
                            ColumnDef::new(StockAudits::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockAudits::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(StockMovements::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Stock::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Stock {
        Table,
        Id,
        ProductId,
        LocationId,
        Quantity,
        CustomReorderPoint,
        UpdatedAt,
    }

    #[derive(Iden)]
    enum StockMovements {
        Table,
        Id,
        ProductId,
        LocationId,
        Actor,
        MovementType,
        Quantity,
        CreatedAt,
    }

    #[derive(Iden)]
    enum StockAudits {
        Table,
        Id,
        ProductId,
        LocationId,
        Actor,
        Direction,
        Quantity,
        PreviousStock,
        NewStock,
        Observations,
        CreatedAt,
    }
}

mod m20240101_000003_create_proposal_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_proposal_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(AdjustmentRequests::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AdjustmentRequests::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AdjustmentRequests::ProductId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AdjustmentRequests::LocationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AdjustmentRequests::SystemQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AdjustmentRequests::PhysicalQuantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AdjustmentRequests::Delta)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AdjustmentRequests::Reason).text().not_null())
                        .col(
                            ColumnDef::new(AdjustmentRequests::AttachmentUrl)
                                .text()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AdjustmentRequests::Flagged)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(AdjustmentRequests::Status)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(AdjustmentRequests::CreatedBy)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(AdjustmentRequests::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AdjustmentRequests::ProcessedBy)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(AdjustmentRequests::ProcessedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(AdjustmentRequests::ResolutionComment)
                                .text()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InternalTransfers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InternalTransfers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InternalTransfers::ProductId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InternalTransfers::OriginLocationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InternalTransfers::DestinationLocationId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InternalTransfers::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InternalTransfers::Reason).text().not_null())
                        .col(
                            ColumnDef::new(InternalTransfers::DestinationReorderPoint)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InternalTransfers::Status)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(InternalTransfers::CreatedBy).string().null())
                        .col(
                            ColumnDef::new(InternalTransfers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InternalTransfers::ProcessedBy)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InternalTransfers::ProcessedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InternalTransfers::ResolutionComment)
                                .text()
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InternalTransfers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(AdjustmentRequests::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum AdjustmentRequests {
        Table,
        Id,
        ProductId,
        LocationId,
        SystemQuantity,
        PhysicalQuantity,
        Delta,
        Reason,
        AttachmentUrl,
        Flagged,
        Status,
        CreatedBy,
        CreatedAt,
        ProcessedBy,
        ProcessedAt,
        ResolutionComment,
    }

    #[derive(Iden)]
    enum InternalTransfers {
        Table,
        Id,
        ProductId,
        OriginLocationId,
        DestinationLocationId,
        Quantity,
        Reason,
        DestinationReorderPoint,
        Status,
        CreatedBy,
        CreatedAt,
        ProcessedBy,
        ProcessedAt,
        ResolutionComment,
    }
}

mod m20240101_000004_create_order_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Orders::Seller).string().null())
                        .col(
                            ColumnDef::new(Orders::Status)
                                .string()
                                .not_null()
                                .default("created"),
                        )
                        .col(ColumnDef::new(Orders::CustomerName).string().not_null())
                        .col(ColumnDef::new(Orders::CustomerAddress).text().not_null())
                        .col(ColumnDef::new(Orders::ContactName).string().not_null())
                        .col(ColumnDef::new(Orders::ContactPhone).string().not_null())
                        .col(
                            ColumnDef::new(Orders::PaymentMethod)
                                .string()
                                .not_null()
                                .default("cash"),
                        )
                        .col(
                            ColumnDef::new(Orders::DepartureTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Orders::EstimatedArrivalTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Orders::ActualArrivalTime)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Orders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrderItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderItems::OrderId).uuid().not_null())
                        .col(ColumnDef::new(OrderItems::ProductId).uuid().not_null())
                        .col(ColumnDef::new(OrderItems::LocationId).uuid().null())
                        .col(ColumnDef::new(OrderItems::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(OrderItems::Reserved)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_order_items_order")
                        .table(OrderItems::Table)
                        .col(OrderItems::OrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DeliveryAlerts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DeliveryAlerts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryAlerts::OrderId)
                                .uuid()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(DeliveryAlerts::DueTime)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(DeliveryAlerts::Message).text().not_null())
                        .col(
                            ColumnDef::new(DeliveryAlerts::Resolved)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(DeliveryAlerts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DeliveryAlerts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(OrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Orders {
        Table,
        Id,
        Seller,
        Status,
        CustomerName,
        CustomerAddress,
        ContactName,
        ContactPhone,
        PaymentMethod,
        DepartureTime,
        EstimatedArrivalTime,
        ActualArrivalTime,
        CreatedAt,
    }

    #[derive(Iden)]
    enum OrderItems {
        Table,
        Id,
        OrderId,
        ProductId,
        LocationId,
        Quantity,
        Reserved,
    }

    #[derive(Iden)]
    enum DeliveryAlerts {
        Table,
        Id,
        OrderId,
        DueTime,
        Message,
        Resolved,
        CreatedAt,
    }
}
