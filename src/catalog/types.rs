//! Types for the product catalog

use serde::{Deserialize, Serialize};

/// A sellable item as the backend reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// The product ID
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Long description
    pub description: String,

    /// Current price
    pub price: f64,

    /// Image reference
    pub image: String,

    /// Category label
    pub category: String,

    /// Units in stock
    #[serde(rename = "countInStock")]
    pub count_in_stock: u32,
}

/// A product draft submitted at creation; the backend assigns the id and
/// returns the canonical record
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    /// Display name
    pub name: String,

    /// Long description
    pub description: String,

    /// Price; must be positive
    pub price: f64,

    /// Image reference
    pub image: String,

    /// Category label
    pub category: String,

    /// Units in stock
    #[serde(rename = "countInStock")]
    pub count_in_stock: u32,
}

/// Partial update for a product; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPatch {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Long description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Category label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Units in stock
    #[serde(rename = "countInStock", skip_serializing_if = "Option::is_none")]
    pub count_in_stock: Option<u32>,
}
