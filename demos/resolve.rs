//! Catalog Example
//!
//! This example lists a fixture set the way the storefront shows it, with prices, stock and
//! images taken from the resolved display facts.
//!
//! Use `-f` to load a fixture set by name
//! Use `-s` to search names, descriptions and tags
//! Use `-c` to restrict to a category
//! Use `--in-stock` to hide products that cannot be bought
//! Use `--sort` and `--order` to sort by name or price
//! Use `--page` and `--limit` to show one page

use std::io;

use anyhow::Result;

use clap::Parser;
use storefront::{
    catalog::{list_page, write_listings},
    fixtures::Fixture,
    utils::ExampleCatalogArgs,
};

/// Catalog Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = ExampleCatalogArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let page = list_page(fixture.products(), &args.query());

    write_listings(&page.listings, io::stdout().lock())?;

    println!(
        "Page {} of {} ({} products)",
        page.page, page.pages, page.total
    );

    for listing in &page.listings {
        if let Some(discount) = listing.facts.discount_percentage() {
            println!("{}: {discount}% off", listing.product.name);
        }
    }

    Ok(())
}
