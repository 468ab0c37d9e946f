use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Registers the bearer scheme referenced by the authenticated paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront Catalog API",
        version = "0.1.0",
        description = r#"
Product catalog and review backend for an e-commerce storefront.

- **Listings**: available products, newest first, six per page
- **Product detail**: gallery, variations, published reviews, rating summary,
  cart/order display flags
- **Search**: case-insensitive keyword match on name and description
- **Reviews**: authenticated per-user rating/review upsert

Review submission requires a bearer token issued by the accounts service:

```
Authorization: Bearer <jwt>
```
"#
    ),
    paths(
        crate::handlers::catalog::home,
        crate::handlers::catalog::list_products,
        crate::handlers::catalog::list_category_products,
        crate::handlers::catalog::product_details,
        crate::handlers::catalog::search,
        crate::handlers::reviews::submit_review,
    ),
    components(schemas(
        crate::handlers::catalog::ProductView,
        crate::handlers::catalog::HomeResponse,
        crate::handlers::catalog::ProductListResponse,
        crate::handlers::catalog::ProductDetailResponse,
        crate::handlers::catalog::ReviewView,
        crate::handlers::catalog::RatingSummary,
        crate::handlers::catalog::SearchResponse,
        crate::services::SubmitReviewInput,
        crate::errors::ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Catalog", description = "Product listings, detail pages, and search"),
        (name = "Reviews", description = "Per-user product reviews and ratings")
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
