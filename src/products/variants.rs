//! Variants

use std::fmt;

use rusty_money::{Money, iso::Currency};

use crate::pricing::WholesaleTier;

/// Variant
///
/// One purchasable configuration of a product. Variants have no identity outside their
/// parent product.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant<'a> {
    /// Identifier, unique within the parent product
    pub id: String,

    /// Classification of the variant
    pub kind: VariantKind,

    /// Human-readable label, e.g. "30ml Rose"
    pub value: String,

    /// Current selling price
    pub price: Money<'a, Currency>,

    /// Pre-discount reference price
    pub old_price: Option<Money<'a, Currency>>,

    /// Bulk pricing tier
    pub wholesale: Option<WholesaleTier<'a>>,

    /// Variant image
    pub image: Option<String>,

    /// Units on hand
    pub stock: u32,

    /// Whether the variant is offered at all
    pub is_active: bool,

    /// Stock keeping unit
    pub sku: Option<String>,
}

impl Variant<'_> {
    /// A variant is sellable only when it is active and has stock.
    #[must_use]
    pub fn is_sellable(&self) -> bool {
        self.is_active && self.stock > 0
    }

    /// The variant's own image, if it has a non-empty one.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| !url.is_empty())
    }
}

/// Variant classification.
///
/// Only `size` and `color` carry meaning for the shopping feed; anything else is kept
/// verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// `size`
    Size,

    /// `color`
    Color,

    /// Any other label, e.g. `scent`
    Other(String),
}

impl VariantKind {
    /// Classify a raw label. Matching is exact: `Size` or `colour` are [`VariantKind::Other`].
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label {
            "size" => Self::Size,
            "color" => Self::Color,
            other => Self::Other(other.to_string()),
        }
    }

    /// The raw label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Size => "size",
            Self::Color => "color",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
