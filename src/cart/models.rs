//! Shopping Cart Domain Models

use serde::Serialize;

use crate::catalog::models::Product;

/// Rounds a currency amount to minor-unit precision (2 decimal places).
///
/// Applied only at display or submission time; stored totals keep full
/// precision so repeated small mutations do not compound rounding error.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// A line in the cart: a product snapshot plus how many of it.
///
/// The snapshot is captured when the product is added; later catalog changes
/// do not reach items already in the cart. Quantity is always at least 1;
/// a zero-quantity line is not representable, updating to zero removes the
/// line instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
    pub product: Product,
}

impl CartItem {
    /// Price contribution of this line, unrounded.
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}
