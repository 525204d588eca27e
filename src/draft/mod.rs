//! Transient, editable representation of a product being created or edited.
//!
//! A draft is a superset of [`Product`](crate::models::Product) held as
//! independently-mutable local state. It is discarded on cancel and promoted
//! to an immutable [`ProductPayload`](crate::models::ProductPayload) on
//! submit; it is never validated or persisted in place.

pub mod images;
pub mod sizes;
pub mod validate;

use rust_decimal::Decimal;

use crate::models::{Product, ProductPayload, SizeVariant};
use self::images::ImageCollection;
use self::sizes::{SizeRowDraft, SizeRows};

#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    /// None until the first successful save assigns a server id.
    pub id: Option<i64>,
    /// Raw select-box value; validated against the loaded category list.
    pub category_id: String,
    pub name: String,
    pub description: String,
    pub advantages: String,
    pub how_to_wear: String,
    pub is_active: bool,
    pub sizes: SizeRows,
    pub images: ImageCollection,
}

impl ProductDraft {
    /// Blank draft for the create path.
    pub fn new() -> Self {
        Self {
            is_active: true,
            ..Self::default()
        }
    }

    /// Populate-for-edit path: lift an existing product into form state.
    pub fn from_product(product: &Product) -> Self {
        let rows = product
            .sizes
            .iter()
            .map(|v| SizeRowDraft {
                size: v.size.clone(),
                price: v.price.to_string(),
                dummy_price: v.dummy_price.to_string(),
                stock: v.stock.to_string(),
            })
            .collect();
        Self {
            id: Some(product.id),
            category_id: product.category_id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            advantages: product.advantages.clone(),
            how_to_wear: product.how_to_wear.clone(),
            is_active: product.is_active,
            sizes: SizeRows::from_rows(rows),
            images: ImageCollection::from_entries(product.images.clone()),
        }
    }

    /// Build the immutable request payload.
    ///
    /// Text fields are trimmed; numeric form strings are coerced, with
    /// invalid numerics becoming 0 rather than failing here (validation is
    /// expected to have caught missing or malformed values already). `id`
    /// is stamped 0 for creation.
    pub fn to_payload(&self) -> ProductPayload {
        ProductPayload {
            id: self.id.unwrap_or(0),
            category_id: self.category_id.trim().parse().unwrap_or(0),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            advantages: self.advantages.trim().to_string(),
            how_to_wear: self.how_to_wear.trim().to_string(),
            is_active: self.is_active,
            sizes: self
                .sizes
                .rows()
                .iter()
                .map(|row| SizeVariant {
                    size: row.size.trim().to_string(),
                    price: coerce_decimal(&row.price),
                    dummy_price: coerce_decimal(&row.dummy_price),
                    stock: row.stock.trim().parse().unwrap_or(0),
                })
                .collect(),
            images: self.images.entries().to_vec(),
        }
    }
}

fn coerce_decimal(raw: &str) -> Decimal {
    raw.trim().parse().unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageEntry;
    use rust_decimal_macros::dec;

    fn sample_product() -> Product {
        Product {
            id: 42,
            category_id: 3,
            name: "Moonstone Pendant".to_string(),
            description: "Rainbow moonstone set in silver".to_string(),
            advantages: "Calming".to_string(),
            how_to_wear: "On a short chain".to_string(),
            is_active: true,
            is_featured: false,
            is_slideshow_visible: false,
            sizes: vec![
                SizeVariant {
                    size: "S".to_string(),
                    price: dec!(1500),
                    dummy_price: dec!(1800),
                    stock: 4,
                },
                SizeVariant {
                    size: "M".to_string(),
                    price: dec!(1750.50),
                    dummy_price: dec!(2100),
                    stock: 0,
                },
            ],
            images: vec![ImageEntry {
                data: "ref:42/main.jpg".to_string(),
                alt_text: "Moonstone Pendant image 1".to_string(),
                is_primary: true,
                is_active: true,
            }],
        }
    }

    #[test]
    fn edit_round_trip_reproduces_the_product() {
        let product = sample_product();
        let payload = ProductDraft::from_product(&product).to_payload();

        assert_eq!(payload.id, product.id);
        assert_eq!(payload.category_id, product.category_id);
        assert_eq!(payload.name, product.name);
        assert_eq!(payload.description, product.description);
        assert_eq!(payload.advantages, product.advantages);
        assert_eq!(payload.how_to_wear, product.how_to_wear);
        assert_eq!(payload.is_active, product.is_active);
        assert_eq!(payload.sizes, product.sizes);
        assert_eq!(payload.images, product.images);
    }

    #[test]
    fn new_draft_stamps_id_zero() {
        let mut draft = ProductDraft::new();
        draft.name = "  Raw Garnet  ".to_string();
        draft.category_id = "7".to_string();
        let payload = draft.to_payload();
        assert_eq!(payload.id, 0);
        assert_eq!(payload.category_id, 7);
        assert_eq!(payload.name, "Raw Garnet");
    }

    #[test]
    fn invalid_numerics_coerce_to_zero() {
        let mut draft = ProductDraft::new();
        draft.sizes.update_field(0, sizes::SizeField::Price, "not-a-number");
        draft.sizes.update_field(0, sizes::SizeField::Stock, "");
        let payload = draft.to_payload();
        assert_eq!(payload.sizes[0].price, Decimal::ZERO);
        assert_eq!(payload.sizes[0].dummy_price, Decimal::ZERO);
        assert_eq!(payload.sizes[0].stock, 0);
    }
}
