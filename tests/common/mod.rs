#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Set};
use storefront_api::{
    auth,
    config::AppConfig,
    db,
    entities::{category, product},
    handlers, health,
    services::AppServices,
    AppState,
};
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only_32chars";

/// Harness spinning up app state over an in-memory SQLite database.
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            TEST_JWT_SECRET.to_string(),
            "127.0.0.1".to_string(),
            0,
            "test".to_string(),
        );
        // A single connection keeps every query on the same in-memory database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let state = AppState {
            db: db_arc.clone(),
            config: cfg,
            services: AppServices::standalone(db_arc),
        };

        let router = handlers::storefront_routes()
            .merge(health::health_routes())
            .with_state(state.clone());

        Self { state, router }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bearer token accepted by the app's auth shim.
    pub fn token_for(&self, user_id: Uuid) -> String {
        auth::issue_token(user_id, TEST_JWT_SECRET, 3600).expect("failed to issue test token")
    }

    pub async fn seed_category(&self, name: &str, slug: &str) -> Uuid {
        let id = Uuid::new_v4();
        category::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            slug: Set(slug.to_string()),
            description: Set(None),
            image_url: Set(None),
        }
        .insert(&*self.state.db)
        .await
        .expect("failed to seed category");
        id
    }

    pub async fn seed_product(&self, seed: ProductSeed<'_>) -> Uuid {
        let id = Uuid::new_v4();
        product::ActiveModel {
            id: Set(id),
            category_id: Set(seed.category_id),
            name: Set(seed.name.to_string()),
            slug: Set(seed.slug.to_string()),
            description: Set(seed.description.map(str::to_string)),
            price: Set(dec!(19.99)),
            discount: Set(dec!(0.00)),
            image_url: Set(None),
            stock: Set(10),
            is_new: Set(false),
            is_available: Set(seed.is_available),
            created_at: Set(seed.created_at),
            updated_at: Set(seed.created_at),
        }
        .insert(&*self.state.db)
        .await
        .expect("failed to seed product");
        id
    }
}

/// Seed data for one product row.
pub struct ProductSeed<'a> {
    pub category_id: Uuid,
    pub name: &'a str,
    pub slug: &'a str,
    pub description: Option<&'a str>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl<'a> ProductSeed<'a> {
    pub fn new(category_id: Uuid, name: &'a str, slug: &'a str) -> Self {
        Self {
            category_id,
            name,
            slug,
            description: None,
            is_available: true,
            created_at: Utc::now(),
        }
    }

    pub fn description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}
