//! Session-local cart store.
//!
//! Owns the authoritative item list and its derived total. The total is
//! recomputed from scratch after every mutation rather than adjusted
//! incrementally, which keeps it drift-free across many small changes.

use thiserror::Error;
use tracing::debug;

use super::models::{round_to_cents, CartItem};
use crate::catalog::models::Product;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// The cart: an insertion-ordered list of items plus the derived total.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
    total: f64,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` of `product`, snapshotting the product on first add.
    ///
    /// If the product is already in the cart the quantities are summed; a
    /// second line for the same product id is never created. Stock is not
    /// re-validated here; gating an out-of-stock add is the caller's job.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(existing) => existing.quantity += quantity,
            None => self.items.push(CartItem {
                product_id: product.id.clone(),
                quantity,
                product: product.clone(),
            }),
        }

        self.recompute_total();
        debug!(product_id = %product.id, quantity, total = self.total, "cart add");
        Ok(())
    }

    /// Removes the line for `product_id`. Idempotent when absent.
    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
        self.recompute_total();
        debug!(product_id, total = self.total, "cart remove");
    }

    /// Replaces the quantity for `product_id`.
    ///
    /// A new quantity of zero or less is defined to be a removal; no
    /// zero-quantity line ever exists. Unknown ids are ignored.
    pub fn update_quantity(&mut self, product_id: &str, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
            self.recompute_total();
            debug!(product_id, new_quantity, total = self.total, "cart update");
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute_total();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Unrounded running total.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Total rounded to minor units, for display and submission.
    pub fn display_total(&self) -> f64 {
        round_to_cents(self.total)
    }

    // Single source of truth for the total: a full re-sum over all items.
    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(CartItem::line_total).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Category;
    use chrono::Utc;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            price,
            original_price: None,
            image: format!("/images/{id}.png"),
            category: Category::Tech,
            in_stock: true,
            rating: 4.0,
            review_count: 3,
            featured: false,
            active: true,
            display_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn expected_total(cart: &CartStore) -> f64 {
        cart.items().iter().map(CartItem::line_total).sum()
    }

    #[test]
    fn total_matches_item_sum_after_every_mutation() {
        let mut cart = CartStore::new();
        let a = product("a", 12.99);
        let b = product("b", 7.45);

        cart.add(&a, 2).unwrap();
        assert_eq!(cart.total(), expected_total(&cart));

        cart.add(&b, 3).unwrap();
        assert_eq!(cart.total(), expected_total(&cart));

        cart.update_quantity("a", 5);
        assert_eq!(cart.total(), expected_total(&cart));

        cart.remove("b");
        assert_eq!(cart.total(), expected_total(&cart));
    }

    #[test]
    fn concrete_totals_round_to_301() {
        let mut cart = CartStore::new();
        cart.add(&product("a", 150.00), 1).unwrap();
        cart.add(&product("b", 75.50), 2).unwrap();

        assert_eq!(cart.display_total(), 301.00);
    }

    #[test]
    fn repeated_add_merges_into_one_line() {
        let mut cart = CartStore::new();
        let a = product("a", 10.0);

        cart.add(&a, 2).unwrap();
        cart.add(&a, 3).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn zero_quantity_add_is_rejected() {
        let mut cart = CartStore::new();
        assert_eq!(cart.add(&product("a", 10.0), 0), Err(CartError::ZeroQuantity));
        assert!(cart.is_empty());
    }

    #[test]
    fn update_to_zero_or_negative_equals_remove() {
        let a = product("a", 10.0);

        let mut removed = CartStore::new();
        removed.add(&a, 2).unwrap();
        removed.remove("a");

        let mut zeroed = CartStore::new();
        zeroed.add(&a, 2).unwrap();
        zeroed.update_quantity("a", 0);

        let mut negated = CartStore::new();
        negated.add(&a, 2).unwrap();
        negated.update_quantity("a", -1);

        assert_eq!(zeroed.items(), removed.items());
        assert_eq!(negated.items(), removed.items());
        assert_eq!(zeroed.total(), removed.total());
        assert_eq!(negated.total(), removed.total());
    }

    #[test]
    fn remove_is_idempotent_when_absent() {
        let mut cart = CartStore::new();
        cart.add(&product("a", 10.0), 1).unwrap();

        cart.remove("missing");
        cart.remove("missing");

        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn update_quantity_for_unknown_id_is_ignored() {
        let mut cart = CartStore::new();
        cart.add(&product("a", 10.0), 1).unwrap();

        cart.update_quantity("missing", 4);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn cart_holds_a_snapshot_not_a_live_reference() {
        let mut cart = CartStore::new();
        let mut a = product("a", 10.0);
        cart.add(&a, 1).unwrap();

        // A later catalog price change must not reach the captured line.
        a.price = 99.0;

        assert_eq!(cart.items()[0].product.price, 10.0);
        assert_eq!(cart.total(), 10.0);
    }

    #[test]
    fn clear_empties_items_and_total() {
        let mut cart = CartStore::new();
        cart.add(&product("a", 10.0), 2).unwrap();

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }
}
