//! Checkout
//!
//! Turns one shop's subset of the cart into an order message and a messaging
//! deep-link of the form `<base>/<handle>?text=<encoded>`. Composition is
//! pure: no navigation, no I/O, no cart mutation. Opening the URL, and any
//! post-checkout cart clearing, is the caller's decision.

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{cart::CartEntry, products::ShopId, shops::Shop};

/// Default deep-link base for the WhatsApp `wa.me` service.
pub const DEFAULT_LINK_BASE: &str = "https://wa.me";

/// Characters escaped in the message query parameter.
///
/// Matches JavaScript's `encodeURIComponent`: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is percent-encoded.
const MESSAGE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Errors preventing a checkout from being composed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The shop has no usable contact handle; there is no delivery target,
    /// so checkout cannot proceed.
    #[error("shop {0} has no contact handle")]
    MissingContact(ShopId),

    /// Composing a checkout for an empty item group is a caller error.
    #[error("no items to check out for shop {0}")]
    EmptyGroup(ShopId),
}

/// A composed checkout: the outbound deep-link plus its order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    url: String,
    message: String,
    subtotal: i64,
}

impl Checkout {
    /// The fully formed deep-link URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The plain-text order message, before percent-encoding.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The shop subtotal in minor currency units.
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.subtotal
    }
}

/// Composer producing deterministic order messages and deep-links.
#[derive(Debug, Clone)]
pub struct CheckoutComposer {
    currency: &'static Currency,
    link_base: String,
}

impl CheckoutComposer {
    /// Composer for the given display currency, linking via
    /// [`DEFAULT_LINK_BASE`].
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            link_base: DEFAULT_LINK_BASE.to_string(),
        }
    }

    /// Override the messaging-service base URL.
    #[must_use]
    pub fn with_link_base(mut self, base: impl Into<String>) -> Self {
        self.link_base = base.into();
        self
    }

    /// The currency amounts are rendered in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Money view of a minor-unit amount in this composer's currency.
    #[must_use]
    pub fn money(&self, minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, self.currency)
    }

    /// Compose the order message and deep-link for one shop's items.
    ///
    /// `items` is expected to be one group from
    /// [`group_by_shop`](crate::cart::groups::group_by_shop), so every entry
    /// belongs to `shop`.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::MissingContact`] if the shop's handle is absent,
    ///   empty, or contains no digits.
    /// - [`CheckoutError::EmptyGroup`] if `items` is empty.
    pub fn compose(&self, shop: &Shop, items: &[CartEntry]) -> Result<Checkout, CheckoutError> {
        let handle = contact_digits(shop)
            .ok_or_else(|| CheckoutError::MissingContact(shop.id.clone()))?;

        if items.is_empty() {
            return Err(CheckoutError::EmptyGroup(shop.id.clone()));
        }

        debug_assert!(
            items.iter().all(|entry| entry.product().shop_id == shop.id),
            "checkout items must all belong to the shop"
        );

        let subtotal: i64 = items.iter().map(CartEntry::line_total).sum();
        let message = self.render_message(shop, items, subtotal);
        let encoded = utf8_percent_encode(&message, MESSAGE_SET);
        let url = format!("{}/{handle}?text={encoded}", self.link_base);

        Ok(Checkout {
            url,
            message,
            subtotal,
        })
    }

    fn render_message(&self, shop: &Shop, items: &[CartEntry], subtotal: i64) -> String {
        let mut message = String::new();

        _ = writeln!(message, "Hello {},", shop.name);
        _ = writeln!(message, "I would like to order the following items:");

        for entry in items {
            _ = writeln!(
                message,
                "{} (Qty: {}) - {}",
                entry.product().title,
                entry.quantity(),
                self.money(entry.line_total())
            );
        }

        _ = writeln!(message);
        _ = writeln!(message, "Total: {}", self.money(subtotal));

        message.push_str("\nThank you!");

        message
    }
}

/// Digits of the shop's contact handle, dropping formatting such as `+`,
/// spaces, and dashes: `wa.me` links want a bare international number.
fn contact_digits(shop: &Shop) -> Option<String> {
    let handle = shop.contact()?;
    let digits: String = handle.chars().filter(char::is_ascii_digit).collect();

    (!digits.is_empty()).then_some(digits)
}
