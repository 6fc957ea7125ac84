//! Catalog Feed
//!
//! Builds a Google Shopping style RSS feed from resolved display facts: one base entry per
//! active product and one entry per sellable variant, grouped under the parent product id.

use jiff::Timestamp;

use crate::{
    brand::Brand,
    feed::{
        document::{Element, FeedDocument},
        entries::EntryContext,
        report::{FeedReport, FeedStats, SkipReason},
    },
    products::Product,
    resolver::resolve,
};

pub mod description;
pub mod document;
pub mod entries;
pub mod report;

/// Namespace of the shopping attributes.
pub const GOOGLE_NAMESPACE: &str = "http://base.google.com/ns/1.0";

/// Caller-supplied settings for a feed run.
#[derive(Debug, Clone, Copy)]
pub struct FeedOptions<'o> {
    /// Storefront base URL; product links are `{base_url}/product/{slug}`
    pub base_url: &'o str,

    /// Brand written on every entry
    pub brand: Brand,

    /// Channel `lastBuildDate`
    pub build_time: Timestamp,
}

/// A generated feed and the decisions made while building it.
#[derive(Debug, Clone)]
pub struct Feed {
    document: FeedDocument,
    report: FeedReport,
}

impl Feed {
    /// The feed document.
    #[must_use]
    pub fn document(&self) -> &FeedDocument {
        &self.document
    }

    /// Emitted and skipped entries.
    #[must_use]
    pub fn report(&self) -> &FeedReport {
        &self.report
    }

    /// Entry elements in document order.
    pub fn items(&self) -> impl Iterator<Item = &Element> {
        self.document
            .root()
            .element("channel")
            .into_iter()
            .flat_map(|channel| channel.elements("item"))
    }

    /// Serialize the document and summarise it.
    #[must_use]
    pub fn render(&self) -> (String, FeedStats) {
        let body = self.document.to_xml();
        let stats = FeedStats::new(&self.report, &body);

        (body, stats)
    }

    /// Split into the document and the report.
    #[must_use]
    pub fn into_parts(self) -> (FeedDocument, FeedReport) {
        (self.document, self.report)
    }
}

/// Generate the catalog feed for a snapshot of products.
///
/// Products are visited once, in input order, and their entries are appended straight to
/// the channel. Inactive products are skipped even if the caller already filtered them.
/// A product that fails the completeness gate is recorded in the report and never stops
/// the products after it.
#[must_use]
pub fn generate_feed(products: &[Product<'_>], options: &FeedOptions<'_>) -> Feed {
    let mut channel = channel_header(options);
    let mut report = FeedReport::default();

    for product in products {
        if !product.is_active {
            report.record_skip(&product.id, None, SkipReason::Inactive);
            continue;
        }

        let facts = resolve(product);
        let context = EntryContext::new(product, options);

        match context.base_entry(&facts) {
            Ok(item) => {
                channel.push(item);
                report.record_entry();
            }
            Err(reason) => report.record_skip(&product.id, None, reason),
        }

        for variant in product.sellable_variants() {
            match context.variant_entry(variant) {
                Ok(item) => {
                    channel.push(item);
                    report.record_entry();
                }
                Err(reason) => {
                    report.record_skip(&product.id, Some(variant.id.as_str()), reason);
                }
            }
        }
    }

    let mut rss = Element::new("rss")
        .attribute("version", "2.0")
        .attribute("xmlns:g", GOOGLE_NAMESPACE);

    rss.push(channel);

    Feed {
        document: FeedDocument::new(rss),
        report,
    }
}

fn channel_header(options: &FeedOptions<'_>) -> Element {
    let mut channel = Element::new("channel");

    channel.push_text("title", options.brand.channel_title());
    channel.push_text("link", options.base_url);
    channel.push_text("description", options.brand.channel_description());
    channel.push_text("lastBuildDate", options.build_time.to_string());

    channel
}
