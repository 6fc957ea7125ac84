//! Integration tests for serving the feed through `FeedService`.

use jiff::Timestamp;
use testresult::TestResult;

use storefront::{
    brand::Brand,
    config::FeedSettings,
    fixtures::FixtureError,
    service::{
        CACHE_CONTROL, CONTENT_TYPE, FeedService, FixtureSource, MockProductSource,
        ProductSource, SourceError,
    },
};

fn serenleaf() -> FeedService {
    FeedService::new(FeedSettings {
        base_url: "https://serenleaf.co.ke/".to_string(),
        brand: Brand::Serenleaf,
    })
}

#[test]
fn fixture_set_renders_successfully() -> TestResult {
    let source = FixtureSource::new("./fixtures", "scenarios");
    let build_time: Timestamp = "2026-03-01T08:30:00Z".parse()?;

    let response = serenleaf().render(&source, build_time);
    let stats = response.stats.ok_or("missing stats")?;

    assert_eq!(response.status, 200);
    assert_eq!(response.content_type, CONTENT_TYPE);
    assert_eq!(response.cache_control, Some(CACHE_CONTROL));
    assert_eq!(stats.entries, 4);
    assert_eq!(stats.skipped, 3);
    assert_eq!(stats.bytes, response.body.len());

    assert!(response.body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(
        response
            .body
            .contains("<rss version=\"2.0\" xmlns:g=\"http://base.google.com/ns/1.0\">")
    );
    assert!(response.body.contains("<lastBuildDate>2026-03-01T08:30:00Z</lastBuildDate>"));
    assert!(response.body.contains("<g:brand>Serenleaf Natural</g:brand>"));
    assert!(
        response
            .body
            .contains("<g:link>https://serenleaf.co.ke/product/rose-toner</g:link>")
    );

    Ok(())
}

#[test]
fn invalid_fixture_set_is_fatal() -> TestResult {
    let dir = tempfile::tempdir()?;
    let products = dir.path().join("products");

    std::fs::create_dir_all(&products)?;
    std::fs::write(
        products.join("broken.yml"),
        "products:\n  - id: a\n    slug: a\n    name: A\n    price: \"12 XYZ\"\n",
    )?;

    let source = FixtureSource::new(dir.path(), "broken");

    assert!(matches!(
        source.load_products(),
        Err(SourceError::Fixture(FixtureError::UnknownCurrency(_)))
    ));

    let response = serenleaf().render(&source, Timestamp::UNIX_EPOCH);

    assert_eq!(response.status, 500);
    assert_eq!(response.content_type, CONTENT_TYPE);
    assert_eq!(response.cache_control, None);
    assert_eq!(
        response.body,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<error>Failed to generate feed</error>\n"
    );

    Ok(())
}

#[test]
fn empty_catalog_renders_an_empty_channel() -> TestResult {
    let mut source = MockProductSource::new();

    source
        .expect_load_products()
        .times(1)
        .returning(|| Ok(Vec::new()));

    let response = serenleaf().render(&source, Timestamp::UNIX_EPOCH);
    let stats = response.stats.ok_or("missing stats")?;

    assert!(response.is_success());
    assert_eq!(stats.entries, 0);
    assert!(!response.body.contains("<item>"));
    assert!(
        response
            .body
            .contains("<title>Serenleaf Natural - Natural Skincare &amp; Wellness</title>")
    );

    Ok(())
}
