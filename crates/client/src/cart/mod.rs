//! Cart store: the selected catalog items pending order submission.
//!
//! Maintains the item collection with strict numeric correctness and
//! persists a full-state snapshot to a durable backend on every mutation,
//! so the cart survives restarts. The two aggregates (`total`, `item_count`)
//! are recomputed from the collection on every read - they are never cached
//! and never persisted.

use serde::{Deserialize, Serialize};

use sucre_store_core::{Price, ProductId};

use crate::storage::{StorageBackend, keys};

/// One cart line.
///
/// `id` is unique within the cart. `price` is the authoritative per-unit
/// value copied at first insertion and never recomputed from elsewhere;
/// repeat adds only increment `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog product id.
    pub id: ProductId,
    /// Display name, copied at insertion.
    pub name: String,
    /// Per-unit price, fixed at first-add time.
    pub price: Price,
    /// Main product image URL, copied at insertion.
    pub main_image: String,
    /// Units of this product in the cart, always >= 1 while the item exists.
    pub quantity: u32,
}

impl CartItem {
    fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Catalog fields carried into the cart on add.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetails {
    /// Catalog product id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Per-unit price.
    pub price: Price,
    /// Main product image URL.
    pub main_image: String,
}

/// The persisted cart record: the full item list, nothing derived.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CartRecord {
    items: Vec<CartItem>,
}

/// Cart state container with injected durable persistence.
///
/// Insertion order is preserved for display (first-added stays first);
/// incrementing an existing item does not change its position.
pub struct CartStore<S: StorageBackend> {
    items: Vec<CartItem>,
    storage: S,
}

impl<S: StorageBackend> CartStore<S> {
    /// Build a store, restoring any persisted cart record from `storage`.
    /// An unreadable or corrupt record degrades to an empty cart.
    pub fn new(storage: S) -> Self {
        let items = Self::restore(&storage);
        Self { items, storage }
    }

    fn restore(storage: &S) -> Vec<CartItem> {
        let Some(raw) = storage
            .load(keys::CART)
            .unwrap_or_else(|e| {
                tracing::warn!("failed to read cart record: {e}");
                None
            })
        else {
            return Vec::new();
        };

        match serde_json::from_str::<CartRecord>(&raw) {
            Ok(record) => record.items,
            Err(e) => {
                tracing::warn!("corrupt cart record, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Add one unit of `product`.
    ///
    /// If the product is already in the cart its quantity increments by
    /// exactly 1 and every other field stays untouched - a stale `product`
    /// argument cannot overwrite the price recorded at first add. Otherwise
    /// the item is appended with quantity 1.
    pub fn add_item(&mut self, product: ProductDetails) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            item.quantity += 1;
        } else {
            self.items.push(CartItem {
                id: product.id,
                name: product.name,
                price: product.price,
                main_image: product.main_image,
                quantity: 1,
            });
        }
        self.persist();
    }

    /// Remove the item with `id`. Silent no-op when absent.
    pub fn remove_item(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
        self.persist();
    }

    /// Set the quantity of the item with `id` to exactly `quantity`.
    ///
    /// A quantity of zero or less removes the item entirely, identical to
    /// [`remove_item`](Self::remove_item) - an item is never stored at
    /// quantity 0. Silent no-op when `id` is absent.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        // Signed input so a negative delta from UI code cannot panic
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = quantity;
            self.persist();
        }
    }

    /// Empty the entire cart. Called after an order is placed and
    /// acknowledged by the user.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Sum of `price * quantity` over all items, recomputed fresh.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all items, recomputed fresh.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Read-only view of the items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The durable backend holding the cart record.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Snapshot the full item list. Persistence is fire-and-forget: a
    /// failure loses at most this mutation and is logged, never surfaced.
    fn persist(&mut self) {
        let record = CartRecord {
            items: self.items.clone(),
        };
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = self.storage.store(keys::CART, &json) {
                    tracing::warn!("failed to persist cart record: {e}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize cart record: {e}"),
        }
    }
}
