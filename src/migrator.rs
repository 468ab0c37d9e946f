// sea-orm-migration's trait signatures elide the SchemaManager lifetime.
#![allow(elided_lifetimes_in_paths)]

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_catalog_tables::Migration)]
    }
}

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
                        .table(Categories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Categories::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Categories::Name)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Categories::Slug)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Categories::Description).text().null())
                        .col(ColumnDef::new(Categories::ImageUrl).string().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Products::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Products::CategoryId).uuid().not_null())
                        .col(
                            ColumnDef::new(Products::Name)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Products::Slug)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Products::Description).text().null())
                        .col(ColumnDef::new(Products::Price).decimal().not_null())
                        .col(
                            ColumnDef::new(Products::Discount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Products::ImageUrl).string().null())
                        .col(
                            ColumnDef::new(Products::Stock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Products::IsNew)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Products::IsAvailable)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Products::CreatedAt).timestamp_with_time_zone().not_null())
                        .col(ColumnDef::new(Products::UpdatedAt).timestamp_with_time_zone().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_category")
                                .from(Products::Table, Products::CategoryId)
                                .to(Categories::Table, Categories::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_category_id")
                        .table(Products::Table)
                        .col(Products::CategoryId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_is_available")
                        .table(Products::Table)
                        .col(Products::IsAvailable)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Variations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Variations::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Variations::ProductId).uuid().not_null())
                        .col(ColumnDef::new(Variations::Kind).string_len(20).not_null())
                        .col(ColumnDef::new(Variations::Value).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Variations::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Variations::CreatedAt).timestamp_with_time_zone().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_variations_product")
                                .from(Variations::Table, Variations::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // One axis value per product: duplicate (product, kind, value)
            // rows are meaningless.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uniq_variations_product_kind_value")
                        .table(Variations::Table)
                        .col(Variations::ProductId)
                        .col(Variations::Kind)
                        .col(Variations::Value)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ReviewRatings::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ReviewRatings::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ReviewRatings::ProductId).uuid().not_null())
                        .col(ColumnDef::new(ReviewRatings::UserId).uuid().not_null())
                        .col(ColumnDef::new(ReviewRatings::Rating).double().not_null())
                        .col(ColumnDef::new(ReviewRatings::Review).text().not_null())
                        .col(ColumnDef::new(ReviewRatings::Ip).string_len(45).null())
                        .col(
                            ColumnDef::new(ReviewRatings::Visibility)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReviewRatings::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReviewRatings::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_review_ratings_product")
                                .from(ReviewRatings::Table, ReviewRatings::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // The one-review-per-user invariant lives in the schema; the
            // service relies on it for its ON CONFLICT upsert.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uniq_review_ratings_user_product")
                        .table(ReviewRatings::Table)
                        .col(ReviewRatings::UserId)
                        .col(ReviewRatings::ProductId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_review_ratings_product_id")
                        .table(ReviewRatings::Table)
                        .col(ReviewRatings::ProductId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductGallery::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductGallery::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductGallery::ProductId).uuid().not_null())
                        .col(ColumnDef::new(ProductGallery::ImageUrl).string().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_gallery_product")
                                .from(ProductGallery::Table, ProductGallery::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_gallery_product_id")
                        .table(ProductGallery::Table)
                        .col(ProductGallery::ProductId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductGallery::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ReviewRatings::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Variations::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Categories::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    enum Categories {
        Table,
        Id,
        Name,
        Slug,
        Description,
        ImageUrl,
    }

    #[derive(DeriveIden)]
    enum Products {
        Table,
        Id,
        CategoryId,
        Name,
        Slug,
        Description,
        Price,
        Discount,
        ImageUrl,
        Stock,
        IsNew,
        IsAvailable,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Variations {
        Table,
        Id,
        ProductId,
        Kind,
        Value,
        IsActive,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum ReviewRatings {
        Table,
        Id,
        ProductId,
        UserId,
        Rating,
        Review,
        Ip,
        Visibility,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum ProductGallery {
        Table,
        Id,
        ProductId,
        ImageUrl,
    }
}
