//! Fixtures

use std::{fs, path::PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::products::Product;

pub mod products;

pub use products::{parse_price, parse_products};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Price below zero
    #[error("Negative price: {0}")]
    NegativePrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Prices of one product in different currencies
    #[error("Currency mismatch in product {product}: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Product with the mismatched price
        product: String,
        /// Currency of the product price
        expected: String,
        /// Currency of the offending price
        found: String,
    },

    /// Only one of wholesale price and threshold given
    #[error("Product {0} must set both wholesalePrice and wholesaleThreshold, or neither")]
    IncompleteWholesale(String),

    /// Wholesale threshold of zero
    #[error("Product {0} has a wholesale threshold of zero")]
    ZeroWholesaleThreshold(String),

    /// Product without an id
    #[error("Product is missing an id")]
    MissingId,

    /// Product without a slug
    #[error("Product {0} is missing a slug")]
    MissingSlug(String),

    /// Two products with the same id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Two products with the same slug
    #[error("Duplicate product slug: {0}")]
    DuplicateSlug(String),

    /// Two variants of one product with the same id
    #[error("Duplicate variant {variant} in product {product}")]
    DuplicateVariant {
        /// Product owning the variants
        product: String,
        /// Repeated variant id
        variant: String,
    },

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products in load order
    products: Vec<Product<'static>>,

    /// Product id -> index into `products`
    product_keys: FxHashMap<String, usize>,

    /// Slugs already taken
    slugs: FxHashSet<String>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            product_keys: FxHashMap::default(),
            slugs: FxHashSet::default(),
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a record fails validation,
    /// or if an id or slug was already loaded.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        for product in parse_products(&contents)? {
            if self.product_keys.contains_key(&product.id) {
                return Err(FixtureError::DuplicateProduct(product.id));
            }

            if !self.slugs.insert(product.slug.clone()) {
                return Err(FixtureError::DuplicateSlug(product.slug));
            }

            self.product_keys
                .insert(product.id.clone(), self.products.len());
            self.products.push(product);
        }

        Ok(self)
    }

    /// Load a named product set from the default fixture path
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?;

        Ok(fixture)
    }

    /// Get a product by its id
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, id: &str) -> Result<&Product<'static>, FixtureError> {
        self.product_keys
            .get(id)
            .and_then(|index| self.products.get(*index))
            .ok_or_else(|| FixtureError::ProductNotFound(id.to_string()))
    }

    /// Get all products, in load order
    pub fn products(&self) -> &[Product<'static>] {
        &self.products
    }

    /// Take ownership of the loaded products
    pub fn into_products(self) -> Vec<Product<'static>> {
        self.products
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
