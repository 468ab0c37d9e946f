use crate::entities::{
    category, product, product_gallery, review_rating, variation, Category, Product,
    ProductGallery, ReviewRating, Variation,
};
use crate::errors::ServiceError;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Listing pages always hold six products.
pub const PAGE_SIZE: u64 = 6;

/// One page of a product listing.
#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub items: Vec<product::Model>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

impl ProductPage {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            total_pages: 0,
        }
    }
}

/// Out-of-range page numbers land on the nearest valid page instead of
/// erroring. Pages are 1-based.
fn clamp_page(page: u64, total_pages: u64) -> u64 {
    if total_pages == 0 {
        1
    } else {
        page.max(1).min(total_pages)
    }
}

/// Read side of the catalog store: listings, lookups, search, and the
/// review/gallery aggregates shown on product pages.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn available_products() -> Select<Product> {
        Product::find()
            .filter(product::Column::IsAvailable.eq(true))
            .order_by_desc(product::Column::CreatedAt)
    }

    #[instrument(skip(self))]
    pub async fn find_category(
        &self,
        slug: &str,
    ) -> Result<Option<category::Model>, ServiceError> {
        Category::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// All available products, newest first, optionally narrowed to one
    /// category. An unresolvable category slug yields an empty sequence;
    /// callers needing a not-found signal resolve the category themselves.
    #[instrument(skip(self))]
    pub async fn list_available_products(
        &self,
        category_slug: Option<&str>,
    ) -> Result<Vec<product::Model>, ServiceError> {
        let mut query = Self::available_products();

        if let Some(slug) = category_slug {
            let Some(cat) = self.find_category(slug).await? else {
                return Ok(Vec::new());
            };
            query = query.filter(product::Column::CategoryId.eq(cat.id));
        }

        query.all(&*self.db).await.map_err(Into::into)
    }

    /// One fixed-size page of the available-product listing.
    #[instrument(skip(self))]
    pub async fn product_page(
        &self,
        category_slug: Option<&str>,
        page: u64,
    ) -> Result<ProductPage, ServiceError> {
        let mut query = Self::available_products();

        if let Some(slug) = category_slug {
            let Some(cat) = self.find_category(slug).await? else {
                return Ok(ProductPage::empty());
            };
            query = query.filter(product::Column::CategoryId.eq(cat.id));
        }

        let paginator = query.paginate(&*self.db, PAGE_SIZE);
        let total = paginator.num_items().await?;
        let total_pages = paginator.num_pages().await?;
        let page = clamp_page(page, total_pages);

        let items = paginator.fetch_page(page - 1).await?;

        Ok(ProductPage {
            items,
            total,
            page,
            total_pages,
        })
    }

    /// Resolves a (category slug, product slug) pair to a single product.
    #[instrument(skip(self))]
    pub async fn get_product_by_slug(
        &self,
        category_slug: &str,
        product_slug: &str,
    ) -> Result<product::Model, ServiceError> {
        let cat = self.find_category(category_slug).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("Category {} not found", category_slug))
        })?;

        Product::find()
            .filter(product::Column::CategoryId.eq(cat.id))
            .filter(product::Column::Slug.eq(product_slug))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Product {} not found in category {}",
                    product_slug, category_slug
                ))
            })
    }

    /// Mean rating over published reviews; 0.0 when none exist.
    #[instrument(skip(self))]
    pub async fn average_rating(&self, product_id: Uuid) -> Result<f64, ServiceError> {
        let avg: Option<Option<f64>> = ReviewRating::find()
            .select_only()
            .column_as(
                Expr::expr(Func::avg(Expr::col(review_rating::Column::Rating))),
                "avg_rating",
            )
            .filter(review_rating::Column::ProductId.eq(product_id))
            .filter(review_rating::Column::Visibility.eq(review_rating::Visibility::Published))
            .into_tuple()
            .one(&*self.db)
            .await?;

        Ok(avg.flatten().unwrap_or(0.0))
    }

    /// Count of published reviews.
    #[instrument(skip(self))]
    pub async fn count_reviews(&self, product_id: Uuid) -> Result<u64, ServiceError> {
        ReviewRating::find()
            .filter(review_rating::Column::ProductId.eq(product_id))
            .filter(review_rating::Column::Visibility.eq(review_rating::Visibility::Published))
            .count(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Published reviews, most recently updated first.
    #[instrument(skip(self))]
    pub async fn list_reviews(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<review_rating::Model>, ServiceError> {
        ReviewRating::find()
            .filter(review_rating::Column::ProductId.eq(product_id))
            .filter(review_rating::Column::Visibility.eq(review_rating::Visibility::Published))
            .order_by_desc(review_rating::Column::UpdatedAt)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn list_gallery_images(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<product_gallery::Model>, ServiceError> {
        ProductGallery::find()
            .filter(product_gallery::Column::ProductId.eq(product_id))
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Active variations for a product.
    #[instrument(skip(self))]
    pub async fn list_variations(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<variation::Model>, ServiceError> {
        Variation::find()
            .filter(variation::Column::ProductId.eq(product_id))
            .filter(variation::Column::IsActive.eq(true))
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Case-insensitive substring search over product name and description.
    ///
    /// An absent or empty keyword yields an empty result set by policy, not
    /// the full catalog.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        keyword: Option<&str>,
    ) -> Result<(Vec<product::Model>, u64), ServiceError> {
        let Some(keyword) = keyword.map(str::trim).filter(|k| !k.is_empty()) else {
            return Ok((Vec::new(), 0));
        };

        let pattern = format!("%{}%", keyword.to_lowercase());
        let query = Self::available_products()
            .filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(product::Column::Name)))
                            .like(pattern.clone()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(product::Column::Description)))
                            .like(pattern),
                    ),
            );

        let products = query.all(&*self.db).await?;
        let count = products.len() as u64;
        Ok((products, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_clamps_to_valid_range() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(1, 3), 1);
        assert_eq!(clamp_page(3, 3), 3);
        assert_eq!(clamp_page(99, 3), 3);
    }

    #[test]
    fn empty_listing_lands_on_page_one() {
        assert_eq!(clamp_page(1, 0), 1);
        assert_eq!(clamp_page(42, 0), 1);
    }
}
