//! Seed products loaded at startup.

use inventory_core::{Product, ProductId};

/// The starter inventory.
pub fn seed_products() -> Vec<(ProductId, Product)> {
    vec![
        (1, Product::new("Product 1", 24.99).with_in_stock(true)),
        (2, Product::new("Product 2", 19.99).with_in_stock(false)),
        (3, Product::new("Product 3", 14.99).with_in_stock(true)),
        (4, Product::new("Product 4", 59.99).with_in_stock(true)),
    ]
}
