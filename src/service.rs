//! Feed service
//!
//! Host-side wrapper around [`generate_feed`]: fetches the product snapshot, renders the
//! document, logs what the generator decided and shapes the HTTP-style response.

use std::path::PathBuf;

use jiff::Timestamp;
use mockall::automock;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{
    config::FeedSettings,
    feed::{FeedOptions, document::FeedDocument, generate_feed, report::FeedStats},
    fixtures::{Fixture, FixtureError},
    products::Product,
};

/// Content type of both the feed and the error document.
pub const CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Cache directive of a successfully rendered feed.
pub const CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=7200";

/// Message of the error document.
pub const FAILURE_MESSAGE: &str = "Failed to generate feed";

/// Errors raised by a product source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The store could not be reached.
    #[error("product source unavailable: {0}")]
    Unavailable(String),

    /// Stored records failed validation.
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

/// Where the feed reads its product snapshot from.
#[automock]
pub trait ProductSource {
    /// Load every product; inactive ones may be included.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the snapshot cannot be read.
    fn load_products(&self) -> Result<Vec<Product<'static>>, SourceError>;
}

/// Reads products from a YAML fixture set.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    base_path: PathBuf,
    set: String,
}

impl FixtureSource {
    /// Source reading `{base_path}/products/{set}.yml`.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>, set: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            set: set.into(),
        }
    }
}

impl ProductSource for FixtureSource {
    fn load_products(&self) -> Result<Vec<Product<'static>>, SourceError> {
        let mut fixture = Fixture::with_base_path(&self.base_path);

        fixture.load_products(&self.set)?;

        Ok(fixture.into_products())
    }
}

/// Rendered feed, ready to be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    /// HTTP status code
    pub status: u16,

    /// `Content-Type` header
    pub content_type: &'static str,

    /// `Cache-Control` header, absent on failure
    pub cache_control: Option<&'static str>,

    /// XML document
    pub body: String,

    /// Summary of a successful render
    pub stats: Option<FeedStats>,
}

impl FeedResponse {
    /// Whether the feed was rendered.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Renders the catalog feed for one storefront.
#[derive(Debug, Clone, Default)]
pub struct FeedService {
    settings: FeedSettings,
}

impl FeedService {
    /// Create a new feed service.
    #[must_use]
    pub fn new(settings: FeedSettings) -> Self {
        Self { settings }
    }

    /// Storefront settings.
    #[must_use]
    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    /// Render the feed from a fresh snapshot.
    ///
    /// A failing source yields a 500 response carrying the error document; skipped
    /// products never fail the render.
    pub fn render(&self, source: &dyn ProductSource, now: Timestamp) -> FeedResponse {
        let products = match source.load_products() {
            Ok(products) => products,
            Err(source_error) => {
                error!(error = %source_error, "failed to load products for feed");

                return Self::failure();
            }
        };

        let options = FeedOptions {
            base_url: &self.settings.base_url,
            brand: self.settings.brand,
            build_time: now,
        };

        let feed = generate_feed(&products, &options);

        for skip in feed.report().skipped() {
            debug!(
                product_id = %skip.product_id,
                variant_id = skip.variant_id.as_deref(),
                reason = %skip.reason,
                "skipped feed entry"
            );
        }

        let (body, stats) = feed.render();

        info!(
            brand = self.settings.brand.label(),
            products = products.len(),
            entries = stats.entries,
            skipped = stats.skipped,
            bytes = stats.bytes,
            "generated catalog feed"
        );

        FeedResponse {
            status: 200,
            content_type: CONTENT_TYPE,
            cache_control: Some(CACHE_CONTROL),
            body,
            stats: Some(stats),
        }
    }

    fn failure() -> FeedResponse {
        FeedResponse {
            status: 500,
            content_type: CONTENT_TYPE,
            cache_control: None,
            body: FeedDocument::error(FAILURE_MESSAGE).to_xml(),
            stats: None,
        }
    }
}
