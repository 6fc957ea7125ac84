//! `catalog-feed`
//!
//! Renders the shopping feed for a product fixture set.

use std::{fs, io};

use anyhow::{Result, bail};
use jiff::Timestamp;
use storefront::{
    config::CatalogFeedConfig,
    observability::init_subscriber,
    service::{FeedService, FixtureSource},
};
use tracing::info;

fn main() -> Result<()> {
    let config = CatalogFeedConfig::load()?;

    init_subscriber(&config.logging)?;

    let source = FixtureSource::new(&config.fixtures, &config.set);
    let service = FeedService::new(config.feed);
    let response = service.render(&source, Timestamp::now());

    if let Some(out) = config.out.as_deref() {
        fs::write(out, &response.body)?;
        info!(path = %out.display(), "wrote feed");
    } else {
        io::Write::write_all(&mut io::stdout().lock(), response.body.as_bytes())?;
    }

    let Some(stats) = response.stats else {
        bail!("feed generation failed with status {}", response.status);
    };

    stats.write_to(io::stderr().lock())?;

    Ok(())
}
