//! Cart lines

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    pricing::{WholesaleTier, unit_price},
    products::{Offer, Product, Variant},
};

/// Errors raised when adding a product to the cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantity of zero.
    #[error("Quantity must be at least one")]
    ZeroQuantity,

    /// The product is soft-deleted.
    #[error("Product {0} is not available")]
    Inactive(String),

    /// A variant product was added without choosing a variant.
    #[error("Product {0} requires a variant")]
    VariantRequired(String),

    /// The variant does not belong to the product.
    #[error("Product {product} has no variant {variant}")]
    UnknownVariant {
        /// Product id
        product: String,
        /// Requested variant id
        variant: String,
    },

    /// The product or variant is not currently sellable.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    /// More units requested than are on hand.
    #[error("Only {available} of {key} in stock, requested {requested}")]
    InsufficientStock {
        /// Line key
        key: String,
        /// Requested quantity
        requested: u32,
        /// Units on hand
        available: u32,
    },

    /// The resolved price is zero.
    #[error("{0} has no price")]
    NotPriced(String),

    /// The line total does not fit in the money type.
    #[error("Line total overflow for {0}")]
    Overflow(String),
}

/// A product, an optional variant and a quantity, priced for checkout.
#[derive(Debug, Clone)]
pub struct CartLine<'a> {
    product: &'a Product<'a>,
    variant: Option<&'a Variant<'a>>,
    quantity: u32,
    unit_price: Money<'a, Currency>,
}

impl<'a> CartLine<'a> {
    /// Price a cart line.
    ///
    /// The unit price is the variant's price for variant products and the product's price
    /// otherwise, replaced by the wholesale price once `quantity` reaches the threshold.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the product is inactive, the variant is missing, unknown
    /// or unsellable, the quantity is zero or exceeds stock, or the price is zero.
    pub fn new(
        product: &'a Product<'a>,
        variant_id: Option<&str>,
        quantity: u32,
    ) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        if !product.is_active {
            return Err(CartError::Inactive(product.id.clone()));
        }

        let key = line_key(&product.id, variant_id);

        let (variant, base, tier, available) = match (&product.offer, variant_id) {
            (Offer::Simple(offer), None) => {
                if !offer.stock.is_available() {
                    return Err(CartError::OutOfStock(key));
                }

                (None, offer.price, offer.wholesale.as_ref(), offer.stock.quantity)
            }
            (Offer::Variants(_), None) => {
                return Err(CartError::VariantRequired(product.id.clone()));
            }
            (_, Some(variant_id)) => {
                let variant =
                    product
                        .variant(variant_id)
                        .ok_or_else(|| CartError::UnknownVariant {
                            product: product.id.clone(),
                            variant: variant_id.to_string(),
                        })?;

                if !variant.is_sellable() {
                    return Err(CartError::OutOfStock(key));
                }

                (
                    Some(variant),
                    variant.price,
                    variant.wholesale.as_ref(),
                    variant.stock,
                )
            }
        };

        if quantity > available {
            return Err(CartError::InsufficientStock {
                key,
                requested: quantity,
                available,
            });
        }

        let unit_price = unit_price(base, tier, quantity);

        if unit_price.to_minor_units() <= 0 {
            return Err(CartError::NotPriced(key));
        }

        Ok(Self {
            product,
            variant,
            quantity,
            unit_price,
        })
    }

    /// Line identity, `{productId}-{variantId}` or `{productId}-default`.
    #[must_use]
    pub fn key(&self) -> String {
        line_key(
            &self.product.id,
            self.variant.map(|variant| variant.id.as_str()),
        )
    }

    /// The product on this line.
    #[must_use]
    pub fn product(&self) -> &'a Product<'a> {
        self.product
    }

    /// The chosen variant.
    #[must_use]
    pub fn variant(&self) -> Option<&'a Variant<'a>> {
        self.variant
    }

    /// Units on this line.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of one unit at this quantity.
    #[must_use]
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// Whether the wholesale tier priced this line.
    #[must_use]
    pub fn is_wholesale(&self) -> bool {
        self.tier()
            .is_some_and(|tier| tier.applies_to(self.quantity))
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the total does not fit.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, CartError> {
        self.unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .map(|minor| Money::from_minor(minor, self.unit_price.currency()))
            .ok_or_else(|| CartError::Overflow(self.key()))
    }

    fn tier(&self) -> Option<&'a WholesaleTier<'a>> {
        match (self.variant, &self.product.offer) {
            (Some(variant), _) => variant.wholesale.as_ref(),
            (None, Offer::Simple(offer)) => offer.wholesale.as_ref(),
            (None, Offer::Variants(_)) => None,
        }
    }
}

fn line_key(product_id: &str, variant_id: Option<&str>) -> String {
    format!("{product_id}-{}", variant_id.unwrap_or("default"))
}
