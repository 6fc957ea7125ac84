//! Storefront Catalog
//!
//! Display-fact resolution and shopping feed generation for the Serenleaf Natural and
//! Electromatt storefronts.
//!
//! Every surface that shows a product (listings, search, the cart and the merchant feed)
//! derives its price, stock and image through [`resolver::resolve`], so they never disagree.

pub mod brand;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod feed;
pub mod fixtures;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod resolver;
pub mod service;
pub mod utils;
