use crate::auth::MaybeUser;
use crate::entities::{product, review_rating, variation};
use crate::errors::ApiError;
use crate::handlers::common::{success_response, PageQuery};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Header carrying the opaque cart identifier owned by the cart module.
pub const CART_ID_HEADER: &str = "x-cart-id";

/// Product data as rendered on listing and detail surfaces.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount: Decimal,
    pub image_url: Option<String>,
    pub stock: i32,
    pub is_new: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<product::Model> for ProductView {
    fn from(m: product::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            description: m.description,
            price: m.price,
            discount: m.discount,
            image_url: m.image_url,
            stock: m.stock,
            is_new: m.is_new,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    pub products: Vec<ProductView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub category_slug: Option<String>,
    pub products: Vec<ProductView>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub rating: f64,
    pub review: String,
    pub updated_at: DateTime<Utc>,
}

impl From<review_rating::Model> for ReviewView {
    fn from(m: review_rating::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            rating: m.rating,
            review: m.review,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u64,
}

/// Detail-page view model: everything the product template renders.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetailResponse {
    pub product: ProductView,
    pub gallery: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub reviews: Vec<ReviewView>,
    pub rating: RatingSummary,
    /// Whether the requester's cart already holds this product.
    pub in_cart: bool,
    /// Whether the requester ever ordered this product; absent for
    /// anonymous requests.
    pub has_ordered: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, IntoParams)]
pub struct SearchQuery {
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub products: Vec<ProductView>,
    pub total: u64,
}

/// Home listing of available products, newest first
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Available products", body = HomeResponse)),
    tag = "Catalog"
)]
pub(crate) async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>, ApiError> {
    let products = state
        .services
        .catalog
        .list_available_products(None)
        .await?;
    Ok(Json(HomeResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

/// Paginated listing of all available products
#[utoipa::path(
    get,
    path = "/products",
    params(PageQuery),
    responses((status = 200, description = "One page of products", body = ProductListResponse)),
    tag = "Catalog"
)]
pub(crate) async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ProductListResponse>, ApiError> {
    list_page(state, None, query.page_number()).await
}

/// Paginated listing narrowed to one category
#[utoipa::path(
    get,
    path = "/products/{category_slug}",
    params(("category_slug" = String, Path, description = "Category slug"), PageQuery),
    responses((status = 200, description = "One page of products", body = ProductListResponse)),
    tag = "Catalog"
)]
pub(crate) async fn list_category_products(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ProductListResponse>, ApiError> {
    list_page(state, Some(category_slug), query.page_number()).await
}

async fn list_page(
    state: AppState,
    category_slug: Option<String>,
    page: u64,
) -> Result<Json<ProductListResponse>, ApiError> {
    let result = state
        .services
        .catalog
        .product_page(category_slug.as_deref(), page)
        .await?;

    Ok(Json(ProductListResponse {
        category_slug,
        products: result.items.into_iter().map(Into::into).collect(),
        total: result.total,
        page: result.page,
        total_pages: result.total_pages,
    }))
}

/// Product detail page view model
#[utoipa::path(
    get,
    path = "/products/{category_slug}/{product_slug}",
    params(
        ("category_slug" = String, Path, description = "Category slug"),
        ("product_slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Product detail view model", body = ProductDetailResponse),
        (status = 303, description = "Unresolvable slug pair; redirected home")
    ),
    tag = "Catalog"
)]
pub(crate) async fn product_details(
    State(state): State<AppState>,
    Path((category_slug, product_slug)): Path<(String, String)>,
    MaybeUser(user): MaybeUser,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let catalog = &state.services.catalog;

    let product = match catalog
        .get_product_by_slug(&category_slug, &product_slug)
        .await
    {
        Ok(product) => product,
        // An unresolvable slug sends the visitor back to the home page
        // rather than erroring.
        Err(crate::errors::ServiceError::NotFound(_)) => {
            return Ok(Redirect::to("/").into_response())
        }
        Err(e) => return Err(e.into()),
    };

    let gallery = catalog.list_gallery_images(product.id).await?;
    let variations = catalog.list_variations(product.id).await?;
    let reviews = catalog.list_reviews(product.id).await?;
    let average = catalog.average_rating(product.id).await?;
    let count = catalog.count_reviews(product.id).await?;

    let in_cart = match headers.get(CART_ID_HEADER).and_then(|v| v.to_str().ok()) {
        Some(cart_id) => state.services.cart.cart_contains(cart_id, product.id).await?,
        None => false,
    };

    let has_ordered = match &user {
        Some(user) => Some(
            state
                .services
                .orders
                .has_ordered(user.user_id, product.id)
                .await?,
        ),
        None => None,
    };

    let (colors, sizes) = split_variations(variations);

    let detail = ProductDetailResponse {
        product: product.into(),
        gallery: gallery.into_iter().map(|g| g.image_url).collect(),
        colors,
        sizes,
        reviews: reviews.into_iter().map(Into::into).collect(),
        rating: RatingSummary {
            average,
            count,
        },
        in_cart,
        has_ordered,
    };

    Ok(success_response(detail))
}

fn split_variations(variations: Vec<variation::Model>) -> (Vec<String>, Vec<String>) {
    let mut colors = Vec::new();
    let mut sizes = Vec::new();
    for v in variations {
        match v.kind {
            variation::VariationKind::Color => colors.push(v.value),
            variation::VariationKind::Size => sizes.push(v.value),
        }
    }
    (colors, sizes)
}

/// Keyword search over product name and description
#[utoipa::path(
    get,
    path = "/search",
    params(SearchQuery),
    responses((status = 200, description = "Matching products", body = SearchResponse)),
    tag = "Catalog"
)]
pub(crate) async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let (products, total) = state
        .services
        .catalog
        .search(query.keyword.as_deref())
        .await?;

    Ok(Json(SearchResponse {
        products: products.into_iter().map(Into::into).collect(),
        total,
    }))
}
