pub mod catalog;
pub mod collaborators;
pub mod review;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub use catalog::{CatalogService, ProductPage, PAGE_SIZE};
pub use collaborators::{CartLookup, NoopCartLookup, NoopOrderHistory, OrderHistory};
pub use review::{ReviewService, SubmitReviewInput};

/// Aggregated services shared through `AppState`.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: CatalogService,
    pub reviews: ReviewService,
    pub cart: Arc<dyn CartLookup>,
    pub orders: Arc<dyn OrderHistory>,
}

impl AppServices {
    pub fn new(
        db: Arc<DatabaseConnection>,
        cart: Arc<dyn CartLookup>,
        orders: Arc<dyn OrderHistory>,
    ) -> Self {
        Self {
            catalog: CatalogService::new(db.clone()),
            reviews: ReviewService::new(db),
            cart,
            orders,
        }
    }

    /// Standalone wiring: collaborator checks always come back negative.
    pub fn standalone(db: Arc<DatabaseConnection>) -> Self {
        Self::new(
            db,
            Arc::new(NoopCartLookup),
            Arc::new(NoopOrderHistory),
        )
    }
}
