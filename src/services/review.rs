use crate::entities::{review_rating, Product, ReviewRating};
use crate::errors::ServiceError;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Validated review submission payload.
///
/// `rating` is optional at the wire level so a missing field surfaces as a
/// validation failure rather than a deserialization error, matching the
/// form-validation behavior of the storefront.
#[derive(Debug, Clone, Deserialize, Serialize, validator::Validate, utoipa::ToSchema)]
pub struct SubmitReviewInput {
    #[validate(required, range(min = 1.0, max = 5.0))]
    pub rating: Option<f64>,
    #[validate(length(max = 700))]
    pub review: Option<String>,
}

/// Review submission workflow: one review per (user, product), enforced by
/// a unique index and a single insert-or-update statement.
#[derive(Clone)]
pub struct ReviewService {
    db: Arc<DatabaseConnection>,
}

impl ReviewService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates the user's review of a product, or updates it in place if one
    /// already exists. An update preserves row identity, creation timestamp,
    /// and moderation state; rating, text, ip, and the update timestamp are
    /// refreshed. Validation failure mutates nothing.
    #[instrument(skip(self, input))]
    pub async fn submit_review(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        input: SubmitReviewInput,
        ip: Option<String>,
    ) -> Result<review_rating::Model, ServiceError> {
        validator::Validate::validate(&input)?;
        let rating = input
            .rating
            .ok_or_else(|| ServiceError::ValidationError("rating is required".to_string()))?;

        if Product::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!(
                "Product {} not found",
                product_id
            )));
        }

        let now = Utc::now();
        let submission = review_rating::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product_id),
            user_id: Set(user_id),
            rating: Set(rating),
            review: Set(input.review.unwrap_or_default()),
            ip: Set(ip),
            visibility: Set(review_rating::Visibility::Published),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // Single atomic statement keyed by the unique (user, product) index:
        // concurrent submissions cannot race into two rows.
        ReviewRating::insert(submission)
            .on_conflict(
                OnConflict::columns([
                    review_rating::Column::UserId,
                    review_rating::Column::ProductId,
                ])
                .update_columns([
                    review_rating::Column::Rating,
                    review_rating::Column::Review,
                    review_rating::Column::Ip,
                    review_rating::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec(&*self.db)
            .await?;

        let review = ReviewRating::find()
            .filter(review_rating::Column::UserId.eq(user_id))
            .filter(review_rating::Column::ProductId.eq(product_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError("review row missing after upsert".to_string())
            })?;

        info!(
            "Stored review {} for product {} by user {}",
            review.id, product_id, user_id
        );
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn rating_must_be_present() {
        let input = SubmitReviewInput {
            rating: None,
            review: Some("fine".into()),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn rating_must_be_in_range() {
        for rating in [0.0, 0.9, 5.1, 10.0] {
            let input = SubmitReviewInput {
                rating: Some(rating),
                review: None,
            };
            assert!(input.validate().is_err(), "rating {} should fail", rating);
        }
        for rating in [1.0, 2.5, 5.0] {
            let input = SubmitReviewInput {
                rating: Some(rating),
                review: None,
            };
            assert!(input.validate().is_ok(), "rating {} should pass", rating);
        }
    }

    #[test]
    fn review_text_capped_at_700_chars() {
        let input = SubmitReviewInput {
            rating: Some(4.0),
            review: Some("x".repeat(700)),
        };
        assert!(input.validate().is_ok());

        let input = SubmitReviewInput {
            rating: Some(4.0),
            review: Some("x".repeat(701)),
        };
        assert!(input.validate().is_err());
    }
}
