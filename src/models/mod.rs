pub mod category;
pub mod product;

pub use category::Category;
pub use product::{FeaturedRef, ImageEntry, Product, ProductPayload, SizeVariant};
