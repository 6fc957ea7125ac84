//! Utils

use clap::Parser;

use crate::catalog::{CatalogQuery, SortKey, SortOrder};

/// Arguments for the catalog examples
#[derive(Debug, Parser)]
pub struct ExampleCatalogArgs {
    /// Fixture set to load products from
    #[clap(short, long, default_value = "storefront")]
    pub fixture: String,

    /// Only list products matching this search term
    #[clap(short, long)]
    pub search: Option<String>,

    /// Only list products in this category
    #[clap(short, long)]
    pub category: Option<String>,

    /// Hide products that are out of stock
    #[clap(long)]
    pub in_stock: bool,

    /// Sort key
    #[clap(long, value_enum, default_value_t)]
    pub sort: SortKey,

    /// Sort direction
    #[clap(long, value_enum, default_value_t)]
    pub order: SortOrder,

    /// Page to show, starting at 1
    #[clap(long, default_value_t = 1)]
    pub page: usize,

    /// Listings per page; 0 shows everything
    #[clap(long, default_value_t = 0)]
    pub limit: usize,
}

impl ExampleCatalogArgs {
    /// The catalog query described by the arguments.
    #[must_use]
    pub fn query(&self) -> CatalogQuery {
        CatalogQuery {
            category: self.category.clone(),
            search: self.search.clone(),
            in_stock_only: self.in_stock,
            sort: self.sort,
            order: self.order,
            page: self.page,
            limit: self.limit,
        }
    }
}
