use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single size/price/stock row of a product.
///
/// Every product carries at least one variant. Size tokens come from a fixed
/// size catalog on the storefront side and are treated as opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeVariant {
    #[serde(alias = "Size")]
    pub size: String,
    #[serde(alias = "Price")]
    pub price: Decimal,
    /// "Was" price shown struck through for discount display.
    #[serde(alias = "DummyPrice")]
    pub dummy_price: Decimal,
    #[serde(alias = "Stock")]
    pub stock: i64,
}

/// One image of a product's gallery.
///
/// `data` is either a base64 payload (freshly attached) or a remote
/// reference handed back by the backend. Order within the collection is
/// significant: index 0 is the default list-view image regardless of
/// `is_primary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntry {
    #[serde(alias = "Data")]
    pub data: String,
    #[serde(alias = "AltText", default)]
    pub alt_text: String,
    #[serde(alias = "IsPrimary", default)]
    pub is_primary: bool,
    #[serde(alias = "IsActive", default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Canonical product record as held by the catalog store.
///
/// Backend records arrive under either PascalCase or camelCase field names
/// depending on which service produced them; the serde aliases fold both
/// conventions into this one shape. `is_featured` is not trusted from the
/// product payload itself, it is recomputed from the featured subset on
/// load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "Id")]
    pub id: i64,
    #[serde(alias = "CategoryId")]
    pub category_id: i64,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Description")]
    pub description: String,
    #[serde(alias = "Advantages", default)]
    pub advantages: String,
    #[serde(alias = "HowToWear", default)]
    pub how_to_wear: String,
    #[serde(alias = "IsActive", default = "default_true")]
    pub is_active: bool,
    #[serde(alias = "IsFeatured", default)]
    pub is_featured: bool,
    #[serde(alias = "IsSlideshowVisible", default)]
    pub is_slideshow_visible: bool,
    #[serde(alias = "Sizes", default)]
    pub sizes: Vec<SizeVariant>,
    #[serde(alias = "Images", default)]
    pub images: Vec<ImageEntry>,
}

/// Member of the featured subset returned by the backend; only the id is
/// relevant for set membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedRef {
    #[serde(alias = "Id")]
    pub id: i64,
}

/// Immutable request body for the create-or-update endpoint.
///
/// Built once per submission from a draft; `id` is 0 for creation and the
/// existing id for an edit. Numeric fields are already coerced, text fields
/// already trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: String,
    pub advantages: String,
    pub how_to_wear: String,
    pub is_active: bool,
    pub sizes: Vec<SizeVariant>,
    pub images: Vec<ImageEntry>,
}
