//! Catalog listing
//!
//! Read paths that show many products at once. Listings carry the resolved display facts
//! so cards, search results and filters agree with the product page and the feed.

use std::{cmp::Ordering, io};

use tabled::{builder::Builder, settings::Style};

use crate::{
    pricing::format_price,
    products::Product,
    resolver::{DisplayFacts, resolve},
};

/// Derive a URL slug from a product name.
///
/// Lowercases, replaces every run of characters outside `[a-z0-9]` with a single `-` and
/// trims dashes from both ends.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }

            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Listing sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortKey {
    /// Catalog order
    #[default]
    Catalog,

    /// Product name, case-insensitively
    Name,

    /// Resolved display price
    Price,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    /// Smallest first
    #[default]
    Asc,

    /// Largest first
    Desc,
}

/// Catalog filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Exact category, compared case-insensitively
    pub category: Option<String>,

    /// Free-text search over name, description and tags
    pub search: Option<String>,

    /// Only include products with a sellable unit
    pub in_stock_only: bool,

    /// Sort key
    pub sort: SortKey,

    /// Sort direction
    pub order: SortOrder,

    /// One-based page number; `0` is read as the first page
    pub page: usize,

    /// Listings per page; `0` returns every listing on a single page
    pub limit: usize,
}

impl CatalogQuery {
    /// Restrict to a category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict to products matching a search term.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restrict to products in stock.
    #[must_use]
    pub fn in_stock_only(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    /// Sort the listings.
    #[must_use]
    pub fn sorted_by(mut self, sort: SortKey, order: SortOrder) -> Self {
        self.sort = sort;
        self.order = order;
        self
    }

    /// Return one page of `limit` listings.
    #[must_use]
    pub fn paginate(mut self, page: usize, limit: usize) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    fn compare(&self, a: &Listing<'_>, b: &Listing<'_>) -> Ordering {
        let ordering = match self.sort {
            SortKey::Catalog => Ordering::Equal,
            SortKey::Name => a
                .product
                .name
                .to_lowercase()
                .cmp(&b.product.name.to_lowercase()),
            SortKey::Price => a
                .facts
                .display_price
                .to_minor_units()
                .cmp(&b.facts.display_price.to_minor_units()),
        };

        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    fn matches_category(&self, product: &Product<'_>) -> bool {
        let Some(wanted) = self.category.as_deref() else {
            return true;
        };

        product
            .category
            .as_deref()
            .is_some_and(|category| category.eq_ignore_ascii_case(wanted.trim()))
    }

    fn matches_search(&self, product: &Product<'_>) -> bool {
        let Some(term) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
        else {
            return true;
        };

        let term = term.to_lowercase();

        product.name.to_lowercase().contains(&term)
            || product.description.to_lowercase().contains(&term)
            || product
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&term))
    }
}

/// A product with its resolved display facts.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    /// The listed product
    pub product: &'a Product<'a>,

    /// Facts to display for it
    pub facts: DisplayFacts<'a>,
}

/// One page of listings and the size of the full result.
#[derive(Debug, Clone)]
pub struct ListingPage<'a> {
    /// Listings on this page
    pub listings: Vec<Listing<'a>>,

    /// One-based page number
    pub page: usize,

    /// Page size, `0` for unpaginated
    pub limit: usize,

    /// Listings matching the query across all pages
    pub total: usize,

    /// Number of pages; `1` when unpaginated
    pub pages: usize,
}

/// List every active product matching a query, sorted as requested.
///
/// Pagination is ignored; see [`list_page`]. Sorting is stable, so ties keep input order.
#[must_use]
pub fn list<'a>(products: &'a [Product<'a>], query: &CatalogQuery) -> Vec<Listing<'a>> {
    let mut listings: Vec<Listing<'a>> = products
        .iter()
        .filter(|product| product.is_active)
        .filter(|product| query.matches_category(product))
        .filter(|product| query.matches_search(product))
        .map(|product| Listing {
            product,
            facts: resolve(product),
        })
        .filter(|listing| !query.in_stock_only || listing.facts.availability.is_in_stock())
        .collect();

    if query.sort != SortKey::Catalog {
        listings.sort_by(|a, b| query.compare(a, b));
    }

    listings
}

/// List the requested page of active products matching a query.
///
/// A page past the end is empty but still reports the total.
#[must_use]
pub fn list_page<'a>(products: &'a [Product<'a>], query: &CatalogQuery) -> ListingPage<'a> {
    let all = list(products, query);
    let total = all.len();
    let page = query.page.max(1);

    if query.limit == 0 {
        return ListingPage {
            listings: all,
            page,
            limit: 0,
            total,
            pages: 1,
        };
    }

    let listings = all
        .into_iter()
        .skip((page - 1).saturating_mul(query.limit))
        .take(query.limit)
        .collect();

    ListingPage {
        listings,
        page,
        limit: query.limit,
        total,
        pages: total.div_ceil(query.limit),
    }
}

/// Write listings as a table.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_listings(listings: &[Listing<'_>], mut out: impl io::Write) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Product", "Price", "Was", "Stock", "Image"]);

    for listing in listings {
        let facts = &listing.facts;

        builder.push_record([
            listing.product.name.clone(),
            format_price(&facts.display_price),
            facts
                .display_old_price
                .as_ref()
                .map(format_price)
                .unwrap_or_default(),
            facts.availability.to_string(),
            facts.display_image.src().to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")
}
