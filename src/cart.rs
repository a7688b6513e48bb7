//! Cart / Quantity Store
//!
//! Selected merchandise keyed by product id. Count and total are computed
//! from the entries on every read; nothing is cached.

use std::collections::BTreeMap;

use crate::models::{format_amount, PaymentLine, Product};

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    /// Always >= 1
    pub quantity: u32,
}

impl CartItem {
    pub fn product_id(&self) -> u32 {
        self.product.id
    }

    pub fn unit_price(&self) -> f64 {
        self.product.unit_price
    }

    pub fn subtotal(&self) -> f64 {
        self.product.unit_price * self.quantity as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    entries: BTreeMap<u32, CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert with quantity 1, or bump the existing entry
    pub fn add(&mut self, product: Product) {
        self.entries
            .entry(product.id)
            .and_modify(|item| item.quantity += 1)
            .or_insert(CartItem { product, quantity: 1 });
    }

    /// No-op for unknown ids
    pub fn increment(&mut self, product_id: u32) {
        if let Some(item) = self.entries.get_mut(&product_id) {
            item.quantity += 1;
        }
    }

    /// Drops the entry instead of storing quantity 0
    pub fn decrement(&mut self, product_id: u32) {
        let Some(item) = self.entries.get_mut(&product_id) else {
            return;
        };
        if item.quantity <= 1 {
            self.entries.remove(&product_id);
        } else {
            item.quantity -= 1;
        }
    }

    pub fn remove(&mut self, product_id: u32) {
        self.entries.remove(&product_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn quantity_of(&self, product_id: u32) -> u32 {
        self.entries.get(&product_id).map(|i| i.quantity).unwrap_or(0)
    }

    pub fn items(&self) -> impl Iterator<Item = &CartItem> {
        self.entries.values()
    }

    /// Sum of quantities
    pub fn count(&self) -> u32 {
        self.entries.values().map(|i| i.quantity).sum()
    }

    /// Sum of unit price x quantity
    pub fn total(&self) -> f64 {
        self.entries.values().map(CartItem::subtotal).sum()
    }

    /// One line per entry, e.g. `School T-shirt x2 = 1000.00`
    pub fn items_summary(&self) -> String {
        self.entries
            .values()
            .map(|i| format!("{} x{} = {}", i.product.name, i.quantity, format_amount(i.subtotal())))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Take paid quantities off the cart. Units added after the payment
    /// lines were taken stay in the cart.
    pub fn settle_paid(&mut self, paid: &[PaymentLine]) {
        for line in paid {
            let Some(item) = self.entries.get_mut(&line.product_id) else {
                continue;
            };
            if item.quantity <= line.quantity {
                self.entries.remove(&line.product_id);
            } else {
                item.quantity -= line.quantity;
            }
        }
    }

    /// Payment lines for checkout
    pub fn lines(&self) -> Vec<PaymentLine> {
        self.entries
            .values()
            .map(|i| PaymentLine {
                product_id: i.product.id,
                quantity: i.quantity,
                unit_price: i.product.unit_price,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32, price: f64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            description: String::new(),
            unit_price: price,
            school_name: "Northside".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_add_same_product_twice_merges() {
        let mut cart = Cart::new();
        cart.add(product(1, 500.0));
        cart.add(product(1, 500.0));

        let items: Vec<_> = cart.items().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total(), 1000.0);
    }

    #[test]
    fn test_decrement_last_unit_removes_entry() {
        let mut cart = Cart::new();
        cart.add(product(1, 500.0));
        cart.decrement(1);

        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(1), 0);
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn test_remove_ignores_quantity() {
        let mut cart = Cart::new();
        cart.add(product(1, 10.0));
        cart.increment(1);
        cart.increment(1);
        cart.add(product(2, 5.0));
        cart.remove(1);

        assert_eq!(cart.quantity_of(1), 0);
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.total(), 5.0);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut cart = Cart::new();
        cart.add(product(1, 10.0));
        let before = cart.clone();

        cart.increment(99);
        cart.decrement(99);
        cart.remove(99);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_summary_and_lines() {
        let mut cart = Cart::new();
        cart.add(product(2, 250.0));
        cart.add(product(1, 500.0));
        cart.add(product(1, 500.0));

        assert_eq!(cart.items_summary(), "Product 1 x2 = 1000.00\nProduct 2 x1 = 250.00");
        let lines = cart.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], PaymentLine { product_id: 1, quantity: 2, unit_price: 500.0 });
    }

    #[test]
    fn test_clear_empties() {
        let mut cart = Cart::new();
        cart.add(product(1, 1.0));
        cart.add(product(2, 2.0));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.items_summary(), "");
    }

    #[test]
    fn test_settle_paid_keeps_units_added_during_payment() {
        let mut cart = Cart::new();
        cart.add(product(1, 500.0));
        cart.add(product(1, 500.0));
        cart.add(product(2, 250.0));
        let paid = cart.lines();

        // Edits made while the payment was in flight
        cart.increment(1);
        cart.add(product(3, 100.0));
        cart.settle_paid(&paid);

        assert_eq!(cart.quantity_of(1), 1);
        assert_eq!(cart.quantity_of(2), 0);
        assert_eq!(cart.quantity_of(3), 1);
        assert_eq!(cart.total(), 600.0);
    }

    #[test]
    fn test_settle_paid_after_removal_is_noop_for_that_line() {
        let mut cart = Cart::new();
        cart.add(product(1, 10.0));
        cart.add(product(2, 20.0));
        let paid = cart.lines();

        cart.remove(1);
        cart.settle_paid(&paid);
        assert!(cart.is_empty());

        cart.settle_paid(&paid);
        assert!(cart.is_empty());
    }

    /// Random mutation sequences never produce duplicate ids, zero
    /// quantities, or a total that disagrees with the entries.
    #[test]
    fn test_invariants_hold_under_random_mutations() {
        // Small LCG so the sequence is reproducible
        let mut seed: u64 = 0x5eed;
        let mut next = move |bound: u64| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) % bound
        };

        let mut cart = Cart::new();
        for _ in 0..2000 {
            let id = next(6) as u32;
            match next(4) {
                0 => cart.add(product(id, (id as f64) * 1.5)),
                1 => cart.increment(id),
                2 => cart.decrement(id),
                _ => cart.remove(id),
            }

            let ids: Vec<u32> = cart.items().map(CartItem::product_id).collect();
            let mut deduped = ids.clone();
            deduped.dedup();
            assert_eq!(ids, deduped);
            assert!(cart.items().all(|i| i.quantity >= 1));

            let expected: f64 = cart.items().map(|i| i.unit_price() * i.quantity as f64).sum();
            assert!((cart.total() - expected).abs() < 1e-9);
            assert_eq!(cart.count(), cart.items().map(|i| i.quantity).sum::<u32>());
        }
    }
}
