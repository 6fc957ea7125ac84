//! Feed entries

use crate::{
    brand::Brand,
    feed::{FeedOptions, description::clean_description, document::Element, report::SkipReason},
    pricing::{compare_at, format_price},
    products::{Offer, Product, Variant, VariantKind},
    resolver::{Availability, DisplayFacts},
};

/// Most extra images a single entry may carry.
pub const MAX_ADDITIONAL_IMAGES: usize = 10;

const CONDITION: &str = "new";
const IDENTIFIER_EXISTS: &str = "no";

/// Canonical product page URL.
#[must_use]
pub fn product_link(base_url: &str, slug: &str) -> String {
    format!("{}/product/{slug}", base_url.trim_end_matches('/'))
}

/// Fields shared by a product's base entry and all of its variant entries.
#[derive(Debug)]
pub(crate) struct EntryContext<'p> {
    product: &'p Product<'p>,
    description: String,
    link: String,
    brand: Brand,
}

impl<'p> EntryContext<'p> {
    pub(crate) fn new(product: &'p Product<'p>, options: &FeedOptions<'_>) -> Self {
        Self {
            product,
            description: clean_description(&product.description),
            link: product_link(options.base_url, &product.slug),
            brand: options.brand,
        }
    }

    /// Entry for the product itself, priced at its resolved headline price.
    pub(crate) fn base_entry(&self, facts: &DisplayFacts<'_>) -> Result<Element, SkipReason> {
        let title = self.title()?;
        let image = facts.display_image.url().ok_or(SkipReason::MissingImage)?;

        if !facts.is_sellable() {
            return Err(SkipReason::NotSellable);
        }

        let price = format_price(&facts.display_price);
        let mut item = self.item(&self.product.id, title, image, &price, facts.availability);

        if let Offer::Simple(offer) = &self.product.offer {
            for url in self
                .product
                .additional_images()
                .take(MAX_ADDITIONAL_IMAGES)
            {
                item.push_text("g:additional_image_link", url);
            }

            if compare_at(offer.old_price, offer.price).is_some() {
                item.push_text("g:sale_price", price);
            }
        }

        item.push_text("g:identifier_exists", IDENTIFIER_EXISTS);

        Ok(item)
    }

    /// Entry for one sellable variant, grouped under the parent product.
    pub(crate) fn variant_entry(&self, variant: &Variant<'_>) -> Result<Element, SkipReason> {
        let title = format!("{} - {}", self.title()?, variant.value);
        let image = variant
            .image()
            .or_else(|| self.product.primary_image())
            .ok_or(SkipReason::MissingImage)?;

        if variant.price.to_minor_units() <= 0 {
            return Err(SkipReason::NotSellable);
        }

        let id = format!("{}_{}", self.product.id, variant.id);
        let price = format_price(&variant.price);
        let mut item = self.item(&id, &title, image, &price, Availability::InStock);

        item.push_text("g:item_group_id", self.product.id.as_str());

        match variant.kind {
            VariantKind::Size => item.push_text("g:size", variant.value.as_str()),
            VariantKind::Color => item.push_text("g:color", variant.value.as_str()),
            VariantKind::Other(_) => {}
        }

        if compare_at(variant.old_price, variant.price).is_some() {
            item.push_text("g:sale_price", price);
        }

        item.push_text("g:identifier_exists", IDENTIFIER_EXISTS);

        Ok(item)
    }

    /// The product name as stored; a name of only whitespace counts as blank.
    fn title(&self) -> Result<&'p str, SkipReason> {
        let name = self.product.name.as_str();

        if name.trim().is_empty() {
            Err(SkipReason::EmptyTitle)
        } else {
            Ok(name)
        }
    }

    fn item(
        &self,
        id: &str,
        title: &str,
        image: &str,
        price: &str,
        availability: Availability,
    ) -> Element {
        let mut item = Element::new("item");

        item.push_text("g:id", id);
        item.push_text("g:title", title);
        item.push_text("g:description", self.description.as_str());
        item.push_text("g:link", self.link.as_str());
        item.push_text("g:image_link", image);
        item.push_text("g:price", price);
        item.push_text("g:availability", availability.label());
        item.push_text("g:brand", self.brand.label());
        item.push_text("g:condition", CONDITION);

        if let Some(category) = self
            .product
            .category
            .as_deref()
            .filter(|category| !category.is_empty())
        {
            item.push_text("g:product_type", category);
        }

        item
    }
}
