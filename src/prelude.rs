//! Souk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CartEffect, CartEntry, CartStore,
        groups::{ShopGroup, group_by_shop},
    },
    checkout::{Checkout, CheckoutComposer, CheckoutError, DEFAULT_LINK_BASE},
    directory::{DirectoryError, ShopDirectory, parse_product, parse_shop},
    fixtures::{FixtureError, MarketFixture},
    products::{Product, ProductId, ShopId},
    shops::Shop,
    storage::{CartStorage, JsonFileStorage, MemoryStorage, StorageError},
};
