//! Variant Resolver
//!
//! Derives the display facts of a product: the headline price, the comparison price, the
//! representative image, availability and whether bulk pricing exists. Every surface that
//! shows a product goes through [`resolve`] rather than reading the raw fields.
//!
//! Precedence rules:
//!
//! - Simple products use their own price, images and stock (flag *and* quantity).
//! - Variant products only consider *sellable* variants (active with stock). The headline
//!   price is the lowest sellable price; on ties the earliest variant in list order wins.
//!   The image comes from the first sellable variant in list order.
//! - With no sellable variant the price is zero, which every consumer treats as
//!   "not sellable".

use std::fmt;

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::{compare_at, discount_percentage},
    products::{Offer, PLACEHOLDER_IMAGE, Product, SimpleOffer, Variant},
};

/// Whether at least one sellable unit exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// At least one unit can be sold
    InStock,

    /// Nothing can be sold right now
    OutOfStock,
}

impl Availability {
    /// Label used by the shopping feed.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::InStock => "in stock",
            Self::OutOfStock => "out of stock",
        }
    }

    /// Whether this is [`Availability::InStock`].
    #[must_use]
    pub fn is_in_stock(self) -> bool {
        self == Self::InStock
    }
}

impl From<bool> for Availability {
    fn from(in_stock: bool) -> Self {
        if in_stock {
            Self::InStock
        } else {
            Self::OutOfStock
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Representative image of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayImage<'a> {
    /// A real image URL
    Url(&'a str),

    /// No image exists; render [`PLACEHOLDER_IMAGE`]
    Placeholder,
}

impl<'a> DisplayImage<'a> {
    /// The image URL, or `None` for the placeholder.
    #[must_use]
    pub fn url(self) -> Option<&'a str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Placeholder => None,
        }
    }

    /// Source to render, substituting the placeholder.
    #[must_use]
    pub fn src(self) -> &'a str {
        self.url().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

impl<'a> From<Option<&'a str>> for DisplayImage<'a> {
    fn from(url: Option<&'a str>) -> Self {
        url.map_or(Self::Placeholder, Self::Url)
    }
}

/// Derived, never-persisted display facts of a product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayFacts<'a> {
    /// Headline price; zero when nothing is sellable
    pub display_price: Money<'a, Currency>,

    /// Comparison price, only present when strictly greater than the headline price
    pub display_old_price: Option<Money<'a, Currency>>,

    /// Representative image
    pub display_image: DisplayImage<'a>,

    /// Whether any sellable unit exists
    pub availability: Availability,

    /// Whether a sellable unit carries a wholesale tier
    pub has_wholesale_pricing: bool,
}

impl DisplayFacts<'_> {
    /// Whether the headline price describes something that can be sold.
    #[must_use]
    pub fn is_sellable(&self) -> bool {
        self.display_price.to_minor_units() > 0
    }

    /// Discount of the headline price against the comparison price, in whole percent.
    #[must_use]
    pub fn discount_percentage(&self) -> Option<u32> {
        self.display_old_price
            .as_ref()
            .and_then(|old_price| discount_percentage(&self.display_price, old_price))
    }
}

/// Resolve the display facts of a product.
///
/// Total and pure: defined for every validated product, including variant products with an
/// empty variant list, and never reorders the variants.
#[must_use]
pub fn resolve<'a>(product: &'a Product<'a>) -> DisplayFacts<'a> {
    match &product.offer {
        Offer::Simple(offer) => resolve_simple(product, offer),
        Offer::Variants(variants) => resolve_variants(product, variants),
    }
}

fn resolve_simple<'a>(product: &'a Product<'a>, offer: &'a SimpleOffer<'a>) -> DisplayFacts<'a> {
    DisplayFacts {
        display_price: offer.price,
        display_old_price: compare_at(offer.old_price, offer.price),
        display_image: product.primary_image().into(),
        availability: offer.stock.is_available().into(),
        has_wholesale_pricing: offer.wholesale.is_some(),
    }
}

fn resolve_variants<'a>(product: &'a Product<'a>, variants: &'a [Variant<'a>]) -> DisplayFacts<'a> {
    let Some(cheapest) = cheapest_sellable(variants) else {
        let image = variants
            .first()
            .and_then(Variant::image)
            .or_else(|| product.primary_image());

        return DisplayFacts {
            display_price: Money::from_minor(0, product.currency),
            display_old_price: None,
            display_image: image.into(),
            availability: Availability::OutOfStock,
            has_wholesale_pricing: false,
        };
    };

    let image = variants
        .iter()
        .find(|variant| variant.is_sellable())
        .and_then(Variant::image)
        .or_else(|| product.primary_image());

    DisplayFacts {
        display_price: cheapest.price,
        display_old_price: compare_at(cheapest.old_price, cheapest.price),
        display_image: image.into(),
        availability: Availability::InStock,
        has_wholesale_pricing: variants
            .iter()
            .filter(|variant| variant.is_sellable())
            .any(|variant| variant.wholesale.is_some()),
    }
}

/// The cheapest sellable variant, earliest in list order on ties.
fn cheapest_sellable<'a>(variants: &'a [Variant<'a>]) -> Option<&'a Variant<'a>> {
    variants
        .iter()
        .filter(|variant| variant.is_sellable())
        .min_by_key(|variant| variant.price.to_minor_units())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::KES;

    use crate::{
        pricing::WholesaleTier,
        products::{Stock, VariantKind},
    };

    use super::*;

    fn kes(minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, KES)
    }

    fn variant(id: &str, price: i64, is_active: bool, stock: u32) -> Variant<'static> {
        Variant {
            id: id.to_string(),
            kind: VariantKind::Size,
            value: format!("{id}ml"),
            price: kes(price),
            old_price: None,
            wholesale: None,
            image: Some(format!("{id}.jpg")),
            stock,
            is_active,
            sku: None,
        }
    }

    fn product(offer: Offer<'static>) -> Product<'static> {
        Product {
            id: "p1".to_string(),
            slug: "kettle".to_string(),
            name: "Kettle".to_string(),
            description: String::new(),
            category: None,
            tags: Vec::new(),
            images: vec!["product.jpg".to_string()],
            currency: KES,
            is_active: true,
            offer,
        }
    }

    fn simple(price: i64, old_price: Option<i64>, stock: Stock) -> Offer<'static> {
        Offer::Simple(SimpleOffer {
            price: kes(price),
            old_price: old_price.map(kes),
            wholesale: None,
            stock,
        })
    }

    #[test]
    fn simple_product_uses_own_fields() {
        let product = product(simple(100_000, Some(150_000), Stock::new(true, 5)));
        let facts = resolve(&product);

        assert_eq!(facts.display_price, kes(100_000));
        assert_eq!(facts.display_old_price, Some(kes(150_000)));
        assert_eq!(facts.display_image, DisplayImage::Url("product.jpg"));
        assert_eq!(facts.availability, Availability::InStock);
        assert_eq!(facts.discount_percentage(), Some(33));
        assert!(!facts.has_wholesale_pricing);
    }

    #[test]
    fn simple_product_old_price_not_above_price_is_dropped() {
        for old in [50_000, 100_000] {
            let product = product(simple(100_000, Some(old), Stock::new(true, 5)));

            assert_eq!(resolve(&product).display_old_price, None);
        }
    }

    #[test]
    fn simple_product_availability_is_strict() {
        let flag_only = product(simple(100, None, Stock::new(true, 0)));
        let quantity_only = product(simple(100, None, Stock::new(false, 3)));

        assert_eq!(resolve(&flag_only).availability, Availability::OutOfStock);
        assert_eq!(
            resolve(&quantity_only).availability,
            Availability::OutOfStock
        );
    }

    #[test]
    fn simple_product_without_images_uses_placeholder() {
        let mut product = product(simple(100, None, Stock::new(true, 1)));
        product.images.clear();

        let facts = resolve(&product);

        assert_eq!(facts.display_image, DisplayImage::Placeholder);
        assert_eq!(facts.display_image.src(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn simple_product_wholesale_tier_is_reported() {
        let product = product(Offer::Simple(SimpleOffer {
            price: kes(1_000),
            old_price: None,
            wholesale: Some(WholesaleTier::new(kes(800), 12)),
            stock: Stock::new(true, 40),
        }));

        assert!(resolve(&product).has_wholesale_pricing);
    }

    #[test]
    fn variant_price_skips_out_of_stock_variants() {
        let product = product(Offer::Variants(vec![
            variant("a", 10_000, true, 0),
            variant("b", 12_000, true, 5),
        ]));

        let facts = resolve(&product);

        assert_eq!(facts.display_price, kes(12_000));
        assert_eq!(facts.display_image, DisplayImage::Url("b.jpg"));
        assert!(facts.availability.is_in_stock());
    }

    #[test]
    fn variant_price_skips_inactive_variants() {
        let product = product(Offer::Variants(vec![
            variant("a", 9_000, false, 10),
            variant("b", 15_000, true, 5),
            variant("c", 11_000, true, 1),
        ]));

        assert_eq!(resolve(&product).display_price, kes(11_000));
    }

    #[test]
    fn image_comes_from_first_sellable_variant_not_cheapest() {
        let product = product(Offer::Variants(vec![
            variant("large", 20_000, true, 3),
            variant("small", 8_000, true, 3),
        ]));

        let facts = resolve(&product);

        assert_eq!(facts.display_price, kes(8_000));
        assert_eq!(facts.display_image, DisplayImage::Url("large.jpg"));
    }

    #[test]
    fn ties_use_earliest_variant_for_old_price() {
        let mut first = variant("first", 5_000, true, 1);
        first.old_price = Some(kes(7_000));

        let mut second = variant("second", 5_000, true, 1);
        second.old_price = Some(kes(9_000));

        let product = product(Offer::Variants(vec![first, second]));
        let facts = resolve(&product);

        assert_eq!(facts.display_old_price, Some(kes(7_000)));
        assert_eq!(facts.display_image, DisplayImage::Url("first.jpg"));
    }

    #[test]
    fn sellable_variant_without_image_falls_back_to_product_image() {
        let mut only = variant("only", 5_000, true, 1);
        only.image = None;

        let product = product(Offer::Variants(vec![only]));

        assert_eq!(
            resolve(&product).display_image,
            DisplayImage::Url("product.jpg")
        );
    }

    #[test]
    fn no_sellable_variants_returns_zero_sentinel() {
        let product = product(Offer::Variants(vec![
            variant("a", 10_000, true, 0),
            variant("b", 12_000, false, 4),
        ]));

        let facts = resolve(&product);

        assert_eq!(facts.display_price, kes(0));
        assert_eq!(facts.availability, Availability::OutOfStock);
        assert_eq!(facts.display_image, DisplayImage::Url("a.jpg"));
        assert_eq!(facts.display_old_price, None);
        assert!(!facts.is_sellable());
    }

    #[test]
    fn empty_variant_list_is_total() {
        let mut product = product(Offer::Variants(Vec::new()));
        product.images.clear();

        let facts = resolve(&product);

        assert_eq!(facts.display_price, kes(0));
        assert_eq!(facts.display_image, DisplayImage::Placeholder);
        assert_eq!(facts.availability, Availability::OutOfStock);
    }

    #[test]
    fn wholesale_only_counts_sellable_variants() {
        let mut hidden = variant("hidden", 5_000, false, 10);
        hidden.wholesale = Some(WholesaleTier::new(kes(4_000), 6));

        let visible = variant("visible", 6_000, true, 10);

        let before = product(Offer::Variants(vec![hidden.clone(), visible.clone()]));
        assert!(!resolve(&before).has_wholesale_pricing);

        hidden.is_active = true;
        let after = product(Offer::Variants(vec![hidden, visible]));
        assert!(resolve(&after).has_wholesale_pricing);
    }

    #[test]
    fn resolve_is_idempotent_and_does_not_reorder() {
        let product = product(Offer::Variants(vec![
            variant("c", 30_000, true, 1),
            variant("a", 10_000, true, 1),
            variant("b", 10_000, true, 1),
        ]));

        let first = resolve(&product);
        let second = resolve(&product);

        assert_eq!(first, second);

        let ids: Vec<&str> = product.variants().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }
}
