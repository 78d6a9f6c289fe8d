//! Types for the basket

use serde::{Deserialize, Serialize};

/// One line of the basket; at most one entry exists per product id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasketEntry {
    /// Id of the product this entry was created from
    #[serde(rename = "productId")]
    pub product_id: String,

    /// Display name
    pub name: String,

    /// Unit price snapshot taken when the item was added; not live-linked
    /// to the catalog price
    pub price: f64,

    /// Image reference
    pub image: String,

    /// Quantity, always at least 1
    pub quantity: u32,
}
