//! Types for orders

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an order.
///
/// The nominal path is pending → processing → shipped → delivered, with
/// cancelled reachable from any non-terminal state. Transition rules are
/// the backend's concern; the client sets whatever an admin asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created, not yet picked up
    Pending,
    /// Being prepared
    Processing,
    /// Handed to the carrier
    Shipped,
    /// Received by the customer
    Delivered,
    /// Cancelled before delivery
    Cancelled,
}

impl OrderStatus {
    /// Whether the backend considers this state final
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// One line of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Id of the product the line was created from
    pub product: String,

    /// Display name at order time
    pub name: String,

    /// Quantity ordered
    pub quantity: u32,

    /// Unit price fixed at order creation
    pub price: f64,
}

/// A submitted order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// The order ID
    #[serde(rename = "_id")]
    pub id: String,

    /// Id of the owning user
    pub user: String,

    /// Ordered lines
    pub items: Vec<OrderLine>,

    /// Total computed once at creation; never recomputed from live
    /// catalog prices
    pub total: f64,

    /// Lifecycle state
    pub status: OrderStatus,

    /// Shipping address given at checkout
    #[serde(rename = "shippingAddress")]
    pub shipping_address: String,

    /// Creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
