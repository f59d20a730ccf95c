//! Market Demo
//!
//! Loads a fixture set, fills a cart from the catalog, and prints one
//! checkout deep-link per shop.
//!
//! Use `-f` to load a fixture set by name
//! Use `-n` to limit how many catalog products go into the cart

use anyhow::Result;
use clap::Parser;
use rusty_money::iso::USD;

use souk::{
    cart::{CartStore, groups::group_by_shop},
    checkout::CheckoutComposer,
    fixtures::MarketFixture,
    utils::DemoMarketArgs,
};

/// Market Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoMarketArgs::parse();

    let fixture = MarketFixture::from_set(&args.fixture)?;

    let mut cart = CartStore::in_memory();
    cart.load();

    let take = args.n.unwrap_or(fixture.products().len());

    for product in fixture.products().iter().take(take) {
        let effect = cart.add_item(product, 1);

        if effect.hit_stock_limit() {
            println!("note: {} is stock-limited", product.title);
        }
    }

    println!(
        "Cart: {} unit(s) across {} entr(y/ies)\n",
        cart.item_count(),
        cart.len()
    );

    let composer = CheckoutComposer::new(USD);

    for group in group_by_shop(cart.entries()) {
        let Some(shop) = fixture.directory().get(group.shop_id()) else {
            println!("{} — shop not in directory", group.shop_id());
            continue;
        };

        match composer.compose(shop, group.items()) {
            Ok(checkout) => {
                println!("{} — subtotal {}", shop.name, composer.money(checkout.subtotal()));
                println!("  {}", checkout.url());
            }
            Err(err) => println!("{} — checkout unavailable: {err}", shop.name),
        }
    }

    Ok(())
}
