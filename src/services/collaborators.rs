//! Display-flag lookups owned by the cart and order modules.
//!
//! The catalog only ever asks two questions of those systems; they are kept
//! behind traits so the storefront runs standalone and the real
//! implementations can be injected at wiring time.

use crate::errors::ServiceError;
use async_trait::async_trait;
use uuid::Uuid;

/// "Does the requester's cart already contain this product?"
#[async_trait]
pub trait CartLookup: Send + Sync {
    async fn cart_contains(&self, cart_id: &str, product_id: Uuid) -> Result<bool, ServiceError>;
}

/// "Has this user ever ordered this product?"
#[async_trait]
pub trait OrderHistory: Send + Sync {
    async fn has_ordered(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, ServiceError>;
}

/// Cart collaborator that knows of no carts.
pub struct NoopCartLookup;

#[async_trait]
impl CartLookup for NoopCartLookup {
    async fn cart_contains(&self, _cart_id: &str, _product_id: Uuid) -> Result<bool, ServiceError> {
        Ok(false)
    }
}

/// Order collaborator that knows of no orders.
pub struct NoopOrderHistory;

#[async_trait]
impl OrderHistory for NoopOrderHistory {
    async fn has_ordered(&self, _user_id: Uuid, _product_id: Uuid) -> Result<bool, ServiceError> {
        Ok(false)
    }
}
