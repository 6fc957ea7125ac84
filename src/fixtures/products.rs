//! Product Fixtures
//!
//! Loose product records as they are stored, and their validation into the closed
//! [`Product`] schema.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashSet;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, KES, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    pricing::WholesaleTier,
    products::{Offer, Product, SimpleOffer, Stock, Variant, VariantKind},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Product records, in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFixture {
    /// Product identifier
    pub id: String,

    /// URL slug
    pub slug: String,

    /// Product name
    pub name: String,

    /// Description, possibly with markup
    #[serde(default)]
    pub description: String,

    /// Category label
    pub category: Option<String>,

    /// Free-text tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,

    /// Soft-delete flag
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Product price (e.g., "1000 KES"); a placeholder for variant products
    pub price: String,

    /// Pre-discount price
    pub old_price: Option<String>,

    /// Bulk unit price
    pub wholesale_price: Option<String>,

    /// Bulk quantity threshold
    pub wholesale_threshold: Option<u32>,

    /// Stock flag
    #[serde(default)]
    pub in_stock: bool,

    /// Units on hand
    #[serde(default)]
    pub stock_quantity: u32,

    /// Whether the variants are authoritative
    #[serde(default)]
    pub has_variants: bool,

    /// Variant records
    #[serde(default)]
    pub variants: Vec<VariantFixture>,
}

/// Variant Fixture
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantFixture {
    /// Variant identifier
    pub id: String,

    /// Variant classification, e.g. `size`
    #[serde(rename = "type")]
    pub kind: String,

    /// Variant label
    pub value: String,

    /// Variant price
    pub price: String,

    /// Pre-discount price
    pub old_price: Option<String>,

    /// Bulk unit price
    pub wholesale_price: Option<String>,

    /// Bulk quantity threshold
    pub wholesale_threshold: Option<u32>,

    /// Variant image
    pub image: Option<String>,

    /// Units on hand
    #[serde(default)]
    pub stock: u32,

    /// Whether the variant is offered
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Stock keeping unit
    pub sku: Option<String>,
}

fn default_active() -> bool {
    true
}

impl TryFrom<ProductFixture> for Product<'static> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        if fixture.id.trim().is_empty() {
            return Err(FixtureError::MissingId);
        }

        if fixture.slug.trim().is_empty() {
            return Err(FixtureError::MissingSlug(fixture.id));
        }

        let (price_minor, currency) = parse_price(&fixture.price)?;

        let prices = PriceReader {
            product_id: &fixture.id,
            currency,
        };

        let offer = if fixture.has_variants {
            let mut seen = FxHashSet::default();
            let mut variants = Vec::with_capacity(fixture.variants.len());

            for variant in fixture.variants {
                if !seen.insert(variant.id.clone()) {
                    return Err(FixtureError::DuplicateVariant {
                        product: fixture.id.clone(),
                        variant: variant.id,
                    });
                }

                variants.push(prices.variant(variant)?);
            }

            Offer::Variants(variants)
        } else {
            Offer::Simple(SimpleOffer {
                price: Money::from_minor(price_minor, currency),
                old_price: prices.optional(fixture.old_price.as_deref())?,
                wholesale: prices.wholesale(
                    fixture.wholesale_price.as_deref(),
                    fixture.wholesale_threshold,
                )?,
                stock: Stock::new(fixture.in_stock, fixture.stock_quantity),
            })
        };

        Ok(Product {
            id: fixture.id,
            slug: fixture.slug,
            name: fixture.name,
            description: fixture.description,
            category: fixture.category,
            tags: fixture.tags,
            images: fixture.images,
            currency,
            is_active: fixture.is_active,
            offer,
        })
    }
}

/// Parses a product's prices, enforcing its currency.
struct PriceReader<'f> {
    product_id: &'f str,
    currency: &'static Currency,
}

impl PriceReader<'_> {
    fn money(&self, s: &str) -> Result<Money<'static, Currency>, FixtureError> {
        let (minor_units, currency) = parse_price(s)?;

        if currency != self.currency {
            return Err(FixtureError::CurrencyMismatch {
                product: self.product_id.to_string(),
                expected: self.currency.iso_alpha_code.to_string(),
                found: currency.iso_alpha_code.to_string(),
            });
        }

        Ok(Money::from_minor(minor_units, self.currency))
    }

    fn optional(&self, s: Option<&str>) -> Result<Option<Money<'static, Currency>>, FixtureError> {
        s.map(|s| self.money(s)).transpose()
    }

    fn wholesale(
        &self,
        price: Option<&str>,
        threshold: Option<u32>,
    ) -> Result<Option<WholesaleTier<'static>>, FixtureError> {
        match (price, threshold) {
            (None, None) => Ok(None),
            (Some(_), Some(0)) => Err(FixtureError::ZeroWholesaleThreshold(
                self.product_id.to_string(),
            )),
            (Some(price), Some(threshold)) => {
                Ok(Some(WholesaleTier::new(self.money(price)?, threshold)))
            }
            _ => Err(FixtureError::IncompleteWholesale(
                self.product_id.to_string(),
            )),
        }
    }

    fn variant(&self, fixture: VariantFixture) -> Result<Variant<'static>, FixtureError> {
        Ok(Variant {
            kind: VariantKind::parse(&fixture.kind),
            price: self.money(&fixture.price)?,
            old_price: self.optional(fixture.old_price.as_deref())?,
            wholesale: self.wholesale(
                fixture.wholesale_price.as_deref(),
                fixture.wholesale_threshold,
            )?,
            image: fixture.image.filter(|url| !url.is_empty()),
            id: fixture.id,
            value: fixture.value,
            stock: fixture.stock,
            is_active: fixture.is_active,
            sku: fixture.sku,
        })
    }
}

/// Parse price string (e.g., "1000 KES" or "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount
/// cannot be parsed or is negative, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FixtureError::NegativePrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "KES" => KES,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Parse a YAML product set and validate every record.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a record fails validation, or two records
/// share an id or slug.
pub fn parse_products(yaml: &str) -> Result<Vec<Product<'static>>, FixtureError> {
    let fixture: ProductsFixture = serde_norway::from_str(yaml)?;

    let mut ids = FxHashSet::default();
    let mut slugs = FxHashSet::default();

    fixture
        .products
        .into_iter()
        .map(|record| {
            let product = Product::try_from(record)?;

            if !ids.insert(product.id.clone()) {
                return Err(FixtureError::DuplicateProduct(product.id));
            }

            if !slugs.insert(product.slug.clone()) {
                return Err(FixtureError::DuplicateSlug(product.slug));
            }

            Ok(product)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const KETTLE: &str = r#"
products:
  - id: "p-kettle"
    slug: electric-kettle
    name: Electric Kettle
    category: Kitchen
    images: [kettle.jpg]
    price: "1000 KES"
    oldPrice: "1500 KES"
    wholesalePrice: "850 KES"
    wholesaleThreshold: 6
    inStock: true
    stockQuantity: 5
"#;

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("2.99KES");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_rejects_negative_amounts() {
        let result = parse_price("-5 KES");

        assert!(matches!(result, Err(FixtureError::NegativePrice(_))));
    }

    #[test]
    fn parse_price_accepts_kes_and_usd() -> Result<(), FixtureError> {
        let (kes_minor, kes) = parse_price("1000 KES")?;
        let (usd_minor, usd) = parse_price("2.50 USD")?;

        assert_eq!(kes_minor, 100_000);
        assert_eq!(kes, KES);
        assert_eq!(usd_minor, 250);
        assert_eq!(usd, USD);

        Ok(())
    }

    #[test]
    fn simple_record_becomes_simple_offer() -> TestResult {
        let products = parse_products(KETTLE)?;
        let product = products.first().ok_or("no product parsed")?;

        assert_eq!(product.slug, "electric-kettle");
        assert!(product.is_active);

        let Offer::Simple(offer) = &product.offer else {
            return Err("expected a simple offer".into());
        };

        assert_eq!(offer.price, Money::from_minor(100_000, KES));
        assert_eq!(offer.old_price, Some(Money::from_minor(150_000, KES)));
        assert_eq!(
            offer.wholesale,
            Some(WholesaleTier::new(Money::from_minor(85_000, KES), 6))
        );
        assert_eq!(offer.stock, Stock::new(true, 5));

        Ok(())
    }

    #[test]
    fn variant_record_ignores_product_pricing() -> TestResult {
        let yaml = r#"
products:
  - id: "p-oil"
    slug: rosehip-oil
    name: Rosehip Oil
    price: "0 KES"
    hasVariants: true
    variants:
      - id: "30"
        type: size
        value: 30ml
        price: "850 KES"
        image: ""
        stock: 4
      - id: "rose"
        type: scent
        value: Rose
        price: "900 KES"
        stock: 0
        isActive: false
"#;

        let products = parse_products(yaml)?;
        let product = products.first().ok_or("no product parsed")?;
        let variants = product.variants();

        assert_eq!(variants.len(), 2);
        assert_eq!(variants.first().map(|v| &v.kind), Some(&VariantKind::Size));
        assert_eq!(variants.first().and_then(|v| v.image.as_deref()), None);
        assert_eq!(
            variants.get(1).map(|v| v.kind.as_str()),
            Some("scent")
        );
        assert_eq!(variants.get(1).map(|v| v.is_active), Some(false));

        Ok(())
    }

    #[test]
    fn currency_mismatch_within_product_is_rejected() {
        let yaml = KETTLE.replace("\"1500 KES\"", "\"15 USD\"");
        let result = parse_products(&yaml);

        assert!(matches!(
            result,
            Err(FixtureError::CurrencyMismatch { ref expected, ref found, .. })
                if expected == "KES" && found == "USD"
        ));
    }

    #[test]
    fn wholesale_price_without_threshold_is_rejected() {
        let yaml = KETTLE.replace("    wholesaleThreshold: 6\n", "");
        let result = parse_products(&yaml);

        assert!(matches!(result, Err(FixtureError::IncompleteWholesale(id)) if id == "p-kettle"));
    }

    #[test]
    fn zero_wholesale_threshold_is_rejected() {
        let yaml = KETTLE.replace("wholesaleThreshold: 6", "wholesaleThreshold: 0");
        let result = parse_products(&yaml);

        assert!(matches!(result, Err(FixtureError::ZeroWholesaleThreshold(_))));
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let second = KETTLE
            .replace("products:\n", "")
            .replace("\"p-kettle\"", "\"p-kettle-2\"");
        let yaml = format!("{KETTLE}{second}");

        let result = parse_products(&yaml);

        assert!(matches!(result, Err(FixtureError::DuplicateSlug(slug)) if slug == "electric-kettle"));
    }

    #[test]
    fn duplicate_variant_ids_are_rejected() {
        let yaml = r#"
products:
  - id: "p1"
    slug: soap
    name: Soap
    price: "0 KES"
    hasVariants: true
    variants:
      - { id: "a", type: scent, value: Mint, price: "200 KES", stock: 1 }
      - { id: "a", type: scent, value: Lime, price: "200 KES", stock: 1 }
"#;

        let result = parse_products(yaml);

        assert!(matches!(
            result,
            Err(FixtureError::DuplicateVariant { ref variant, .. }) if variant == "a"
        ));
    }

    #[test]
    fn blank_slug_is_rejected() {
        let yaml = KETTLE.replace("slug: electric-kettle", "slug: \"\"");

        assert!(matches!(
            parse_products(&yaml),
            Err(FixtureError::MissingSlug(id)) if id == "p-kettle"
        ));
    }
}
