//! Utils

use clap::Parser;

/// Arguments for the market demo
#[derive(Debug, Parser)]
pub struct DemoMarketArgs {
    /// Fixture set to use for the shops & products
    #[clap(short, long, default_value = "market")]
    pub fixture: String,

    /// Number of catalog products to add to the cart
    #[clap(short, long)]
    pub n: Option<usize>,
}
