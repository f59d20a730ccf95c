//! Integration test for the bundled `market` fixture set.

use rusty_money::iso::USD;
use testresult::TestResult;

use souk::{
    cart::{CartStore, groups::group_by_shop},
    checkout::CheckoutComposer,
    fixtures::MarketFixture,
    products::ShopId,
};

#[test]
fn market_set_loads_shops_and_products() -> TestResult {
    let fixture = MarketFixture::from_set("market")?;

    assert_eq!(fixture.directory().len(), 3);
    assert_eq!(fixture.products().len(), 5);

    let charger = fixture.product("usb-charger")?;

    assert_eq!(charger.title, "Dual USB Wall Charger");
    assert_eq!(charger.price, 1299);
    assert_eq!(charger.shop_id, ShopId::new("brightspark"));

    Ok(())
}

#[test]
fn market_cart_checks_out_per_shop() -> TestResult {
    let fixture = MarketFixture::from_set("market")?;

    let mut cart = CartStore::in_memory();
    cart.load();

    for product in fixture.products() {
        cart.add_item(product, 1);
    }

    let composer = CheckoutComposer::new(USD);
    let groups = group_by_shop(cart.entries());

    assert_eq!(groups.len(), 3);

    let mut reachable = 0;
    let mut unreachable = 0;

    for group in &groups {
        let shop = fixture
            .directory()
            .get(group.shop_id())
            .ok_or("grouping produced a shop missing from the directory")?;

        match composer.compose(shop, group.items()) {
            Ok(checkout) => {
                assert_eq!(checkout.subtotal(), group.subtotal());
                reachable += 1;
            }
            Err(_) => unreachable += 1,
        }
    }

    // Paperleaf Books ships without a contact handle in the fixture.
    assert_eq!(reachable, 2);
    assert_eq!(unreachable, 1);

    Ok(())
}
