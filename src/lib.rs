//! Souk
//!
//! Souk is the cart and checkout core for a multi-vendor local marketplace:
//! a session cart persisted to durable storage, per-shop grouping, and
//! WhatsApp deep-link checkout composition.

pub mod cart;
pub mod checkout;
pub mod directory;
pub mod fixtures;
pub mod prelude;
pub mod products;
pub mod shops;
pub mod storage;
pub mod utils;
