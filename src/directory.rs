//! Shop Directory & Boundary Adapters
//!
//! The remote catalog and shop APIs have shipped several incompatible field
//! spellings over time (`name` vs `title`, `stockCount` vs `stock`,
//! `vendorWhatsapp` vs `whatsappNumber`). The adapters here normalize
//! external payloads into the canonical records at the boundary; the core
//! never tolerates the variant shapes internally.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    products::{Product, ProductId, ShopId},
    shops::Shop,
};

/// Errors normalizing an external payload.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The payload did not match any known product or shop shape.
    #[error(transparent)]
    Malformed(#[from] serde_json::Error),

    /// The price was negative or not representable in minor units.
    #[error("invalid price: {0}")]
    InvalidPrice(Decimal),
}

/// External product payload, accepting the historical field variants.
#[derive(Debug, Deserialize)]
struct RawProduct {
    id: String,

    #[serde(alias = "name")]
    title: String,

    /// Major-unit decimal price as the remote API sends it.
    price: Decimal,

    #[serde(alias = "stockCount")]
    stock: u32,

    #[serde(rename = "shopId")]
    shop_id: String,
}

/// External shop payload, accepting the historical field variants.
#[derive(Debug, Deserialize)]
struct RawShop {
    id: String,
    name: String,

    #[serde(default, alias = "whatsappNumber", alias = "vendorWhatsapp")]
    whatsapp: Option<String>,
}

/// Normalize an external product payload into the canonical record.
///
/// # Errors
///
/// Returns a [`DirectoryError`] if the payload is malformed or the price is
/// negative or not representable in minor units.
pub fn parse_product(payload: &serde_json::Value) -> Result<Product, DirectoryError> {
    let raw: RawProduct = serde_json::from_value(payload.clone())?;
    let price = minor_units(raw.price)?;

    Ok(Product {
        id: ProductId::new(raw.id),
        title: raw.title,
        price,
        stock: raw.stock,
        shop_id: ShopId::new(raw.shop_id),
    })
}

/// Normalize an external shop payload into the canonical record.
///
/// # Errors
///
/// Returns a [`DirectoryError::Malformed`] if the payload does not match any
/// known shop shape.
pub fn parse_shop(payload: &serde_json::Value) -> Result<Shop, DirectoryError> {
    let raw: RawShop = serde_json::from_value(payload.clone())?;

    Ok(Shop {
        id: ShopId::new(raw.id),
        name: raw.name,
        whatsapp: raw.whatsapp,
    })
}

/// Convert a major-unit decimal price into minor units (two decimal places).
fn minor_units(price: Decimal) -> Result<i64, DirectoryError> {
    if price.is_sign_negative() {
        return Err(DirectoryError::InvalidPrice(price));
    }

    price
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or(DirectoryError::InvalidPrice(price))
}

/// Read-only lookup from shop identifier to shop record, used to resolve
/// cart groupings into checkout-ready shops.
#[derive(Debug, Default)]
pub struct ShopDirectory {
    shops: FxHashMap<ShopId, Shop>,
}

impl ShopDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from shop records. Later records win on id clashes.
    pub fn from_shops(shops: impl IntoIterator<Item = Shop>) -> Self {
        let mut directory = Self::new();

        for shop in shops {
            directory.insert(shop);
        }

        directory
    }

    /// Insert or replace a shop record.
    pub fn insert(&mut self, shop: Shop) {
        self.shops.insert(shop.id.clone(), shop);
    }

    /// Look up a shop by identifier.
    #[must_use]
    pub fn get(&self, id: &ShopId) -> Option<&Shop> {
        self.shops.get(id)
    }

    /// Iterate over the shops in the directory, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Shop> {
        self.shops.values()
    }

    /// Number of shops in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shops.len()
    }

    /// Check if the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_product_accepts_canonical_fields() -> TestResult {
        let payload = json!({
            "id": "p-1",
            "title": "Heirloom Tomatoes",
            "price": 4.25,
            "stock": 12,
            "shopId": "verdura"
        });

        let product = parse_product(&payload)?;

        assert_eq!(product.id, ProductId::new("p-1"));
        assert_eq!(product.title, "Heirloom Tomatoes");
        assert_eq!(product.price, 425);
        assert_eq!(product.stock, 12);
        assert_eq!(product.shop_id, ShopId::new("verdura"));

        Ok(())
    }

    #[test]
    fn parse_product_accepts_legacy_field_variants() -> TestResult {
        let payload = json!({
            "id": "p-1",
            "name": "Heirloom Tomatoes",
            "price": "4.25",
            "stockCount": 12,
            "shopId": "verdura"
        });

        let product = parse_product(&payload)?;

        assert_eq!(product.title, "Heirloom Tomatoes");
        assert_eq!(product.price, 425);
        assert_eq!(product.stock, 12);

        Ok(())
    }

    #[test]
    fn parse_product_rejects_negative_price() {
        let payload = json!({
            "id": "p-1",
            "title": "Heirloom Tomatoes",
            "price": -1.00,
            "stock": 12,
            "shopId": "verdura"
        });

        let result = parse_product(&payload);

        assert!(matches!(result, Err(DirectoryError::InvalidPrice(_))));
    }

    #[test]
    fn parse_product_rejects_missing_fields() {
        let payload = json!({ "id": "p-1", "price": 4.25 });

        let result = parse_product(&payload);

        assert!(matches!(result, Err(DirectoryError::Malformed(_))));
    }

    #[test]
    fn parse_product_rounds_sub_minor_precision() -> TestResult {
        let payload = json!({
            "id": "p-1",
            "title": "Loose Grapes",
            "price": "1.999",
            "stock": 3,
            "shopId": "verdura"
        });

        let product = parse_product(&payload)?;

        assert_eq!(product.price, 200);

        Ok(())
    }

    #[test]
    fn parse_shop_accepts_both_handle_spellings() -> TestResult {
        let current = json!({
            "id": "verdura",
            "name": "Verdura Fresh Produce",
            "whatsappNumber": "2348012345678"
        });

        let legacy = json!({
            "id": "verdura",
            "name": "Verdura Fresh Produce",
            "vendorWhatsapp": "2348012345678"
        });

        assert_eq!(
            parse_shop(&current)?.whatsapp.as_deref(),
            Some("2348012345678")
        );
        assert_eq!(
            parse_shop(&legacy)?.whatsapp.as_deref(),
            Some("2348012345678")
        );

        Ok(())
    }

    #[test]
    fn parse_shop_tolerates_missing_handle() -> TestResult {
        let payload = json!({ "id": "paperleaf", "name": "Paperleaf Books" });

        let shop = parse_shop(&payload)?;

        assert_eq!(shop.whatsapp, None);

        Ok(())
    }

    #[test]
    fn directory_lookup_resolves_inserted_shops() -> TestResult {
        let directory = ShopDirectory::from_shops([
            parse_shop(&json!({
                "id": "verdura",
                "name": "Verdura Fresh Produce",
                "whatsappNumber": "2348012345678"
            }))?,
            parse_shop(&json!({ "id": "paperleaf", "name": "Paperleaf Books" }))?,
        ]);

        assert_eq!(directory.len(), 2);
        assert!(!directory.is_empty());

        let shop = directory
            .get(&ShopId::new("verdura"))
            .ok_or("shop missing from directory")?;

        assert_eq!(shop.name, "Verdura Fresh Produce");
        assert_eq!(directory.get(&ShopId::new("unknown")), None);

        Ok(())
    }

    #[test]
    fn directory_insert_replaces_existing_record() -> TestResult {
        let mut directory = ShopDirectory::new();

        directory.insert(parse_shop(&json!({
            "id": "verdura",
            "name": "Verdura"
        }))?);

        directory.insert(parse_shop(&json!({
            "id": "verdura",
            "name": "Verdura Fresh Produce"
        }))?);

        assert_eq!(directory.len(), 1);

        let shop = directory
            .get(&ShopId::new("verdura"))
            .ok_or("shop missing from directory")?;

        assert_eq!(shop.name, "Verdura Fresh Produce");

        Ok(())
    }
}
