//! Cart
//!
//! The cart store owns the authoritative snapshot of (product, quantity)
//! entries for the active session. It is constructed once per application
//! instance, loaded explicitly, and passed by reference to consumers; views
//! and the checkout composer only ever see read-only slices of it.
//!
//! Every effective mutation serializes the snapshot and hands it to the
//! storage backend. Persistence failures are logged, never raised: the
//! in-memory snapshot stays authoritative for the session either way.

use serde::{Deserialize, Serialize};

use crate::{
    products::{Product, ProductId},
    storage::{CartStorage, MemoryStorage},
};

pub mod groups;

/// A (product, quantity) entry captured at the time the product was added.
///
/// The product is a value copy, not a live catalog reference: later catalog
/// changes do not retroactively alter the captured price or title. Stock
/// ceilings are re-validated against the freshest count available (see
/// [`CartStore::add_item`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    product: Product,
    quantity: u32,
}

impl CartEntry {
    /// Callers obtain entries through the store, which enforces
    /// `1 <= quantity <= product.stock` at construction.
    pub(crate) fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// The captured product snapshot.
    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Units of the product in the cart.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price times quantity, in minor currency units.
    #[must_use]
    pub fn line_total(&self) -> i64 {
        self.product.price * i64::from(self.quantity)
    }
}

/// Outcome of a cart mutation, surfaced as a return value rather than an
/// error: every condition here is recoverable locally and must not unwind
/// across the cart boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEffect {
    /// The entry now holds exactly the requested quantity.
    Updated {
        /// Quantity now in the cart for the product.
        quantity: u32,
    },

    /// The request exceeded the stock ceiling and was clamped.
    ///
    /// The mutation still went through; callers use this to show a
    /// "stock limit reached" warning.
    Clamped {
        /// Quantity actually applied (the stock ceiling).
        applied: u32,

        /// Requested units beyond the ceiling that were dropped.
        truncated: u32,
    },

    /// The entry was removed.
    Removed,

    /// Nothing changed: store not ready, entry absent, or zero request.
    Unchanged,
}

impl CartEffect {
    /// True when the stock ceiling truncated the request.
    #[must_use]
    pub fn hit_stock_limit(&self) -> bool {
        matches!(self, Self::Clamped { .. })
    }
}

/// Cart store with an explicit construct → [`load`](CartStore::load) → ready
/// lifecycle.
///
/// Until [`load`](CartStore::load) has run, the store reports itself not
/// ready, reads return zero/empty, and mutations are no-ops: an empty cart
/// before load completes is indistinguishable from "not yet loaded" and must
/// be treated as the latter.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    entries: Vec<CartEntry>,
    storage: S,
    ready: bool,
}

impl CartStore<MemoryStorage> {
    /// Store backed by in-process memory, for tests and ephemeral sessions.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }
}

impl<S: CartStorage> CartStore<S> {
    /// Construct an unloaded store over `storage`.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            entries: Vec::new(),
            storage,
            ready: false,
        }
    }

    /// Load the persisted snapshot and mark the store ready.
    ///
    /// An absent blob starts an empty cart. A corrupt blob is logged and
    /// discarded, also starting empty; the corrupt record is overwritten on
    /// the next successful mutation. Storage read failures are logged and
    /// treated as absent.
    pub fn load(&mut self) {
        match self.storage.load() {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(entries) => self.entries = entries,
                Err(err) => {
                    tracing::warn!(error = %err, "discarding corrupt cart snapshot");
                    self.entries = Vec::new();
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "failed to read cart snapshot");
            }
        }

        self.ready = true;
    }

    /// Whether the initial load has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Add `quantity` units of `product`, merging with any existing entry.
    ///
    /// The stock ceiling is checked against the stock count on the product
    /// passed in, which is expected to be the freshest catalog value the
    /// caller has. An existing entry keeps its captured price and title.
    ///
    /// Requests that exceed the ceiling are clamped and reported via
    /// [`CartEffect::Clamped`]. Out-of-stock products never enter the cart.
    /// A zero quantity, or any call before the store is ready, is a no-op.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> CartEffect {
        if !self.ready || quantity == 0 {
            return CartEffect::Unchanged;
        }

        let effect = match self.position_of(&product.id) {
            Some(at) => {
                let Some(entry) = self.entries.get_mut(at) else {
                    return CartEffect::Unchanged;
                };

                let requested = entry.quantity.saturating_add(quantity);

                if product.stock == 0 {
                    // The product sold out since it was added; a quantity of
                    // zero would violate the entry invariant, so drop it.
                    self.entries.remove(at);

                    CartEffect::Clamped {
                        applied: 0,
                        truncated: requested,
                    }
                } else if requested > product.stock {
                    entry.quantity = product.stock;

                    CartEffect::Clamped {
                        applied: product.stock,
                        truncated: requested - product.stock,
                    }
                } else {
                    entry.quantity = requested;

                    CartEffect::Updated {
                        quantity: requested,
                    }
                }
            }
            None if product.stock == 0 => CartEffect::Clamped {
                applied: 0,
                truncated: quantity,
            },
            None if quantity > product.stock => {
                self.entries
                    .push(CartEntry::new(product.clone(), product.stock));

                CartEffect::Clamped {
                    applied: product.stock,
                    truncated: quantity - product.stock,
                }
            }
            None => {
                self.entries.push(CartEntry::new(product.clone(), quantity));

                CartEffect::Updated { quantity }
            }
        };

        if effect != CartEffect::Unchanged {
            self.persist();
        }

        effect
    }

    /// Remove the entry for `id`, if present. Removing an absent product is
    /// a no-op, not an error.
    pub fn remove_item(&mut self, id: &ProductId) -> CartEffect {
        if !self.ready {
            return CartEffect::Unchanged;
        }

        match self.position_of(id) {
            Some(at) => {
                self.entries.remove(at);
                self.persist();

                CartEffect::Removed
            }
            None => CartEffect::Unchanged,
        }
    }

    /// Set the quantity for `id` exactly.
    ///
    /// A quantity of zero removes the entry. Requests above the entry's
    /// captured stock count are clamped and reported. An absent id is a
    /// no-op.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> CartEffect {
        if !self.ready {
            return CartEffect::Unchanged;
        }

        if quantity == 0 {
            return self.remove_item(id);
        }

        let Some(at) = self.position_of(id) else {
            return CartEffect::Unchanged;
        };

        let Some(entry) = self.entries.get_mut(at) else {
            return CartEffect::Unchanged;
        };

        let ceiling = entry.product.stock;

        let effect = if quantity > ceiling {
            entry.quantity = ceiling;

            CartEffect::Clamped {
                applied: ceiling,
                truncated: quantity - ceiling,
            }
        } else {
            entry.quantity = quantity;

            CartEffect::Updated { quantity }
        };

        self.persist();

        effect
    }

    /// Empty the snapshot entirely.
    pub fn clear(&mut self) {
        if !self.ready {
            return;
        }

        self.entries.clear();
        self.persist();
    }

    /// Sum of price times quantity across all entries, in minor units.
    /// Zero before the store is ready.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Total unit count across all entries (not the entry count).
    /// Zero before the store is ready.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.entries.iter().map(CartEntry::quantity).sum()
    }

    /// Quantity in the cart for `id`, or zero if absent.
    #[must_use]
    pub fn quantity_for(&self, id: &ProductId) -> u32 {
        self.position_of(id)
            .and_then(|at| self.entries.get(at))
            .map_or(0, CartEntry::quantity)
    }

    /// Read-only view of the current snapshot, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Iterate over the entries in the snapshot.
    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    /// Number of distinct entries in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The storage backend, mainly for inspection in tests.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn position_of(&self, id: &ProductId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.product.id == id)
    }

    fn persist(&self) {
        match serde_json::to_string(&self.entries) {
            Ok(blob) => {
                if let Err(err) = self.storage.save(&blob) {
                    tracing::warn!(error = %err, "failed to persist cart snapshot");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize cart snapshot");
            }
        }
    }
}
