use super::active;
use aggregate_fetch::RestResource;
use serde::{Deserialize, Serialize};

id_type!(
    /// Identifier of a [`Product`].
    ProductId
);
id_type!(
    /// Identifier of a [`Category`].
    CategoryId
);
id_type!(
    /// Identifier of a [`GstRate`].
    GstRateId
);

/// A product offered on the site (panels, inverters, batteries...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub gst_rate_id: Option<GstRateId>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "active")]
    pub is_active: bool,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCreate {
    pub name: String,
    pub category_id: CategoryId,
    pub gst_rate_id: Option<GstRateId>,
    pub price: f64,
    pub description: Option<String>,
}

/// Payload for updating a product. Unset fields are left out of the request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_rate_id: Option<GstRateId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RestResource for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    const PATH: &'static str = "products";
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "active")]
    pub is_active: bool,
}

/// Payload for creating or renaming a category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryUpsert {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RestResource for Category {
    type Id = CategoryId;
    type Create = CategoryUpsert;
    type Update = CategoryUpsert;
    const PATH: &'static str = "categories";
}

/// A GST slab applied to product prices.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GstRate {
    pub id: GstRateId,
    #[serde(default)]
    pub name: Option<String>,
    /// Percentage, e.g. `18.0`.
    pub rate: f64,
    #[serde(default = "active")]
    pub is_active: bool,
}

/// Payload for creating or editing a GST rate.
#[derive(Debug, Clone, Serialize)]
pub struct GstRateUpsert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub rate: f64,
}

impl RestResource for GstRate {
    type Id = GstRateId;
    type Create = GstRateUpsert;
    type Update = GstRateUpsert;
    const PATH: &'static str = "gst-rates";
}
