//! Fixtures
//!
//! YAML-backed sample market data for demos and integration tests. A fixture
//! set is a pair of files, `shops/<name>.yml` and `products/<name>.yml`,
//! under a base path (`./fixtures` by default).

use std::{fs, path::PathBuf};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    directory::ShopDirectory,
    products::{Product, ProductId, ShopId},
    shops::Shop,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Product references a shop missing from the shops fixture
    #[error("Unknown shop key: {0}")]
    UnknownShop(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

/// Wrapper for shops in YAML
#[derive(Debug, Deserialize)]
struct ShopsFixture {
    /// Map of shop key -> shop fixture
    shops: FxHashMap<String, ShopFixture>,
}

/// Shop Fixture
#[derive(Debug, Deserialize)]
struct ShopFixture {
    /// Shop display name
    name: String,

    /// WhatsApp contact handle, if the shop has one
    #[serde(default)]
    whatsapp: Option<String>,
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
struct ProductsFixture {
    /// Map of product key -> product fixture
    products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
struct ProductFixture {
    /// Product title
    title: String,

    /// Major-unit price (e.g., "4.25")
    price: String,

    /// Units available
    stock: u32,

    /// Key of the owning shop in the shops fixture
    shop: String,
}

/// Sample market data loaded from YAML fixture sets.
#[derive(Debug)]
pub struct MarketFixture {
    /// Base path for fixture files
    base_path: PathBuf,

    directory: ShopDirectory,
    products: Vec<Product>,

    /// String key -> product index mappings for lookups
    product_keys: FxHashMap<String, usize>,
}

impl MarketFixture {
    /// Create a new empty fixture with the default base path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            directory: ShopDirectory::new(),
            products: Vec::new(),
            product_keys: FxHashMap::default(),
        }
    }

    /// Load shops from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_shops(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("shops").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ShopsFixture = serde_norway::from_str(&contents)?;

        for (key, shop_fixture) in fixture.shops {
            self.directory.insert(Shop {
                id: ShopId::new(key),
                name: shop_fixture.name,
                whatsapp: shop_fixture.whatsapp,
            });
        }

        Ok(self)
    }

    /// Load products from a YAML fixture file.
    ///
    /// Products are inserted in sorted key order so demo output is
    /// reproducible despite the unordered map in the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price is
    /// malformed, or if a product references an unknown shop.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        let mut entries: Vec<(String, ProductFixture)> = fixture.products.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, product_fixture) in entries {
            let shop_id = ShopId::new(product_fixture.shop.clone());

            if self.directory.get(&shop_id).is_none() {
                return Err(FixtureError::UnknownShop(product_fixture.shop));
            }

            let price = parse_price(&product_fixture.price)?;

            self.product_keys.insert(key.clone(), self.products.len());

            self.products.push(Product {
                id: ProductId::new(key),
                title: product_fixture.title,
                price,
                stock: product_fixture.stock,
                shop_id,
            });
        }

        Ok(self)
    }

    /// Load a complete fixture set (shops and products with the same name).
    ///
    /// # Errors
    ///
    /// Returns an error if either fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_shops(name)?.load_products(name)?;

        Ok(fixture)
    }

    /// Get a product by its string key.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        self.product_keys
            .get(key)
            .and_then(|&at| self.products.get(at))
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// All loaded products, in sorted key order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The loaded shop directory.
    #[must_use]
    pub fn directory(&self) -> &ShopDirectory {
        &self.directory
    }
}

impl Default for MarketFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a major-unit price string (e.g., "4.25") into minor units.
///
/// # Errors
///
/// Returns an error if the string is not a non-negative decimal amount.
pub fn parse_price(s: &str) -> Result<i64, FixtureError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::Path};

    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    fn temp_base(tag: &str) -> PathBuf {
        let unique = format!(
            "souk-fixtures-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos())
                .unwrap_or_default()
        );

        env::temp_dir().join(unique)
    }

    #[test]
    fn parse_price_converts_to_minor_units() -> TestResult {
        assert_eq!(parse_price("4.25")?, 425);
        assert_eq!(parse_price("12")?, 1200);
        assert_eq!(parse_price(" 0.99 ")?, 99);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_garbage_and_negatives() {
        assert!(matches!(
            parse_price("4.25 USD"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("-1.00"),
            Err(FixtureError::InvalidPrice(_))
        ));
    }

    #[test]
    fn fixture_loads_shops_and_products() -> TestResult {
        let base_path = temp_base("load");

        write_fixture(
            &base_path,
            "shops",
            "mini",
            "shops:\n  verdura:\n    name: Verdura Fresh Produce\n    whatsapp: \"2348012345678\"\n",
        )?;

        write_fixture(
            &base_path,
            "products",
            "mini",
            "products:\n  tomatoes:\n    title: Heirloom Tomatoes\n    price: \"4.25\"\n    stock: 12\n    shop: verdura\n",
        )?;

        let mut fixture = MarketFixture::with_base_path(&base_path);

        fixture.load_shops("mini")?.load_products("mini")?;

        assert_eq!(fixture.directory().len(), 1);
        assert_eq!(fixture.products().len(), 1);

        let tomatoes = fixture.product("tomatoes")?;

        assert_eq!(tomatoes.title, "Heirloom Tomatoes");
        assert_eq!(tomatoes.price, 425);
        assert_eq!(tomatoes.stock, 12);
        assert_eq!(tomatoes.shop_id, ShopId::new("verdura"));

        Ok(())
    }

    #[test]
    fn fixture_rejects_product_with_unknown_shop() -> TestResult {
        let base_path = temp_base("unknown-shop");

        write_fixture(&base_path, "shops", "mini", "shops: {}\n")?;

        write_fixture(
            &base_path,
            "products",
            "mini",
            "products:\n  tomatoes:\n    title: Heirloom Tomatoes\n    price: \"4.25\"\n    stock: 12\n    shop: nowhere\n",
        )?;

        let mut fixture = MarketFixture::with_base_path(&base_path);

        fixture.load_shops("mini")?;

        let result = fixture.load_products("mini");

        assert!(matches!(result, Err(FixtureError::UnknownShop(key)) if key == "nowhere"));

        Ok(())
    }

    #[test]
    fn fixture_products_come_back_in_sorted_key_order() -> TestResult {
        let base_path = temp_base("order");

        write_fixture(
            &base_path,
            "shops",
            "mini",
            "shops:\n  stall:\n    name: Stall\n",
        )?;

        write_fixture(
            &base_path,
            "products",
            "mini",
            "products:\n  zucchini:\n    title: Zucchini\n    price: \"1.00\"\n    stock: 1\n    shop: stall\n  apple:\n    title: Apple\n    price: \"1.00\"\n    stock: 1\n    shop: stall\n",
        )?;

        let fixture = {
            let mut fixture = MarketFixture::with_base_path(&base_path);
            fixture.load_shops("mini")?.load_products("mini")?;
            fixture
        };

        let keys: Vec<&str> = fixture
            .products()
            .iter()
            .map(|product| product.id.as_str())
            .collect();

        assert_eq!(keys, vec!["apple", "zucchini"]);

        Ok(())
    }

    #[test]
    fn fixture_product_not_found_returns_error() {
        let fixture = MarketFixture::new();
        let result = fixture.product("nonexistent");

        assert!(matches!(result, Err(FixtureError::ProductNotFound(_))));
    }

    #[test]
    fn fixture_default_matches_new() {
        let fixture = MarketFixture::default();

        assert_eq!(fixture.base_path, PathBuf::from("./fixtures"));
        assert!(fixture.products().is_empty());
        assert!(fixture.directory().is_empty());
    }
}
