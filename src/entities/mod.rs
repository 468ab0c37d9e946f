//! SeaORM entities for the catalog store.
//!
//! Ownership runs Category -> Products -> {Variations, Reviews, Gallery};
//! every child table cascade-deletes with its parent (see `migrator`).

pub mod category;
pub mod product;
pub mod product_gallery;
pub mod review_rating;
pub mod variation;

pub use category::Entity as Category;
pub use product::Entity as Product;
pub use product_gallery::Entity as ProductGallery;
pub use review_rating::Entity as ReviewRating;
pub use variation::Entity as Variation;
