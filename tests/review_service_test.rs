mod common;

use common::{ProductSeed, TestApp};
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait};
use storefront_api::entities::{review_rating, ReviewRating};
use storefront_api::errors::ServiceError;
use storefront_api::services::SubmitReviewInput;
use uuid::Uuid;

fn input(rating: Option<f64>, review: Option<&str>) -> SubmitReviewInput {
    SubmitReviewInput {
        rating,
        review: review.map(str::to_string),
    }
}

async fn seed_one_product(app: &TestApp) -> Uuid {
    let cat = app.seed_category("Shirts", "shirts").await;
    app.seed_product(ProductSeed::new(cat, "Red Shirt", "red-shirt"))
        .await
}

#[tokio::test]
async fn first_submission_creates_one_row() {
    let app = TestApp::new().await;
    let product_id = seed_one_product(&app).await;
    let user_id = Uuid::new_v4();

    let review = app
        .state
        .services
        .reviews
        .submit_review(
            product_id,
            user_id,
            input(Some(4.0), Some("Great shirt")),
            Some("203.0.113.9".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(review.product_id, product_id);
    assert_eq!(review.user_id, user_id);
    assert_eq!(review.rating, 4.0);
    assert_eq!(review.review, "Great shirt");
    assert_eq!(review.ip.as_deref(), Some("203.0.113.9"));
    assert_eq!(review.visibility, review_rating::Visibility::Published);

    let rows = ReviewRating::find().all(&*app.state.db).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn resubmission_updates_the_same_row() {
    let app = TestApp::new().await;
    let product_id = seed_one_product(&app).await;
    let user_id = Uuid::new_v4();
    let reviews = &app.state.services.reviews;

    let first = reviews
        .submit_review(product_id, user_id, input(Some(2.0), Some("meh")), None)
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let second = reviews
        .submit_review(
            product_id,
            user_id,
            input(Some(5.0), Some("grew on me")),
            None,
        )
        .await
        .unwrap();

    // Same identity, refreshed update timestamp, creation timestamp intact.
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.rating, 5.0);
    assert_eq!(second.review, "grew on me");

    let rows = ReviewRating::find().all(&*app.state.db).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn same_user_reviews_two_products_independently() {
    let app = TestApp::new().await;
    let cat = app.seed_category("Shirts", "shirts").await;
    let shirt = app
        .seed_product(ProductSeed::new(cat, "Red Shirt", "red-shirt"))
        .await;
    let tee = app
        .seed_product(ProductSeed::new(cat, "Plain Tee", "plain-tee"))
        .await;
    let user_id = Uuid::new_v4();
    let reviews = &app.state.services.reviews;

    reviews
        .submit_review(shirt, user_id, input(Some(4.0), None), None)
        .await
        .unwrap();
    reviews
        .submit_review(tee, user_id, input(Some(2.0), None), None)
        .await
        .unwrap();

    let rows = ReviewRating::find().all(&*app.state.db).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn invalid_payloads_mutate_nothing() {
    let app = TestApp::new().await;
    let product_id = seed_one_product(&app).await;
    let user_id = Uuid::new_v4();
    let reviews = &app.state.services.reviews;

    let long_text = "x".repeat(701);
    let bad_inputs = vec![
        input(None, Some("no rating")),
        input(Some(0.5), None),
        input(Some(6.0), None),
        input(Some(3.0), Some(&long_text)),
    ];

    for bad in bad_inputs {
        let err = reviews
            .submit_review(product_id, user_id, bad, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(_)));
    }

    let rows = ReviewRating::find().all(&*app.state.db).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let app = TestApp::new().await;
    seed_one_product(&app).await;

    let err = app
        .state
        .services
        .reviews
        .submit_review(Uuid::new_v4(), Uuid::new_v4(), input(Some(4.0), None), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn moderated_review_stays_hidden_after_resubmission() {
    let app = TestApp::new().await;
    let product_id = seed_one_product(&app).await;
    let user_id = Uuid::new_v4();
    let reviews = &app.state.services.reviews;

    let review = reviews
        .submit_review(product_id, user_id, input(Some(1.0), Some("spam")), None)
        .await
        .unwrap();

    // Moderator hides the review out of band.
    let mut hidden: review_rating::ActiveModel = review.into();
    hidden.visibility = ActiveValue::Set(review_rating::Visibility::Hidden);
    hidden.update(&*app.state.db).await.unwrap();

    let resubmitted = reviews
        .submit_review(
            product_id,
            user_id,
            input(Some(5.0), Some("still spam")),
            None,
        )
        .await
        .unwrap();

    // The upsert refreshes content but never resets moderation state.
    assert_eq!(resubmitted.visibility, review_rating::Visibility::Hidden);
    assert_eq!(resubmitted.rating, 5.0);
}
