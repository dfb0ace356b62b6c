use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cart line as captured at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub item_id: String,
    /// Unit price in the site's base fiat unit.
    pub price: Decimal,
    /// Always at least 1 for a line that exists.
    pub quantity: u32,
}

/// Read-only snapshot of the cart at the moment of submission.
///
/// The total is derived, never stored, so an amount can never be computed
/// from a stale total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    items: Vec<CartItem>,
}

impl CartSnapshot {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `price × quantity` over all lines.
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum()
    }
}
