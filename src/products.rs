//! Products

use rusty_money::{Money, iso::Currency};

use crate::pricing::WholesaleTier;

pub mod variants;

pub use variants::{Variant, VariantKind};

/// Image served wherever a product has no usable image of its own.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Product
///
/// A validated catalog entry. Loose storage records are converted into this shape at the
/// boundary (see [`crate::fixtures`]), so everything downstream can rely on the prices being
/// present, non-negative and in a single currency.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Stable unique identifier
    pub id: String,

    /// Unique URL slug
    pub slug: String,

    /// Product name
    pub name: String,

    /// Description, possibly containing markup
    pub description: String,

    /// Category label
    pub category: Option<String>,

    /// Free-text tags
    pub tags: Vec<String>,

    /// Ordered image URLs, the first is canonical
    pub images: Vec<String>,

    /// Currency shared by every price on the product and its variants
    pub currency: &'a Currency,

    /// Soft-delete flag; inactive products are hidden from every public read path
    pub is_active: bool,

    /// How the product is sold
    pub offer: Offer<'a>,
}

/// Offer
#[derive(Debug, Clone)]
pub enum Offer<'a> {
    /// A single-SKU product priced and stocked on the product itself
    Simple(SimpleOffer<'a>),

    /// A product sold through its variants; product-level pricing and images are ignored
    Variants(Vec<Variant<'a>>),
}

/// Pricing and stock of a single-SKU product.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleOffer<'a> {
    /// Current selling price
    pub price: Money<'a, Currency>,

    /// Pre-discount reference price
    pub old_price: Option<Money<'a, Currency>>,

    /// Bulk pricing tier
    pub wholesale: Option<WholesaleTier<'a>>,

    /// Stock level
    pub stock: Stock,
}

/// Stock level of a single-SKU product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stock {
    /// Merchant-controlled availability flag
    pub in_stock: bool,

    /// Units on hand
    pub quantity: u32,
}

impl Stock {
    /// Create a new stock level.
    #[must_use]
    pub fn new(in_stock: bool, quantity: u32) -> Self {
        Self { in_stock, quantity }
    }

    /// Whether the product can be sold: the flag is set *and* units are on hand.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.in_stock && self.quantity > 0
    }
}

impl<'a> Product<'a> {
    /// Whether the product is sold through variants.
    #[must_use]
    pub fn has_variants(&self) -> bool {
        matches!(self.offer, Offer::Variants(_))
    }

    /// The product's variants, empty for simple products.
    #[must_use]
    pub fn variants(&self) -> &[Variant<'a>] {
        match &self.offer {
            Offer::Simple(_) => &[],
            Offer::Variants(variants) => variants,
        }
    }

    /// Variants that are active and in stock, in their original order.
    pub fn sellable_variants(&self) -> impl Iterator<Item = &Variant<'a>> {
        self.variants().iter().filter(|variant| variant.is_sellable())
    }

    /// Find a variant by its identifier.
    #[must_use]
    pub fn variant(&self, id: &str) -> Option<&Variant<'a>> {
        self.variants().iter().find(|variant| variant.id == id)
    }

    /// The canonical product image, if there is a non-empty one.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Images after the canonical one.
    pub fn additional_images(&self) -> impl Iterator<Item = &str> {
        self.images
            .iter()
            .skip(1)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }
}
