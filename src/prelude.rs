//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    brand::Brand,
    cart::{CartError, CartLine},
    catalog::{
        CatalogQuery, Listing, ListingPage, SortKey, SortOrder, list, list_page, slugify,
    },
    feed::{
        Feed, FeedOptions, generate_feed,
        document::{Element, FeedDocument, Node},
        report::{FeedReport, FeedStats, Skip, SkipReason},
    },
    fixtures::{Fixture, FixtureError},
    pricing::{WholesaleTier, compare_at, discount_percentage, format_price},
    products::{Offer, Product, SimpleOffer, Stock, Variant, VariantKind},
    resolver::{Availability, DisplayFacts, DisplayImage, resolve},
    service::{FeedResponse, FeedService, FixtureSource, ProductSource, SourceError},
};
