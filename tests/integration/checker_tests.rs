use super::*;
use manga_watcher::{AddOutcome, SeriesRecord};
use tempfile::TempDir;

#[tokio::test]
async fn test_add_then_check_cycle() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    serve_series(&server, "/series/title-x", "Title X", 10).await;

    let dir = TempDir::new()?;
    let store = CountingStore::new(&dir.path().join("tracked_series.json"));
    let checker = create_test_checker(store.clone());
    let series_url = format!("{}/series/title-x", server.uri());

    let outcome = checker.add_new_series("asura", &series_url).await?;
    assert!(matches!(outcome, AddOutcome::Added { replaced: false, .. }));
    assert_eq!(store.save_count(), 1);

    // Nothing new upstream yet
    let summary = checker.check_for_updates().await?;
    assert!(!summary.has_updates());
    assert_eq!(store.save_count(), 1);

    // Two chapters drop
    server.reset().await;
    serve_series(&server, "/series/title-x", "Title X", 12).await;

    let summary = checker.check_for_updates().await?;
    assert_eq!(summary.updates.len(), 1);
    assert_eq!(summary.updates[0].previous_chapter, 10);
    assert_eq!(summary.updates[0].chapter_number, 12);
    assert_eq!(summary.updates[0].chapter_url, "/series/slug/chapter/12");
    assert_eq!(store.save_count(), 2);

    let reloaded = JsonFileStore::new(dir.path().join("tracked_series.json")).load()?;
    assert_eq!(
        reloaded.get("asura", "Title X"),
        Some(&SeriesRecord {
            url: series_url,
            last_chapter: 12,
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_repeated_check_is_idempotent() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    serve_series(&server, "/series/title-x", "Title X", 12).await;

    let dir = TempDir::new()?;
    let store = CountingStore::new(&dir.path().join("tracked_series.json"));
    let mut catalog = SeriesCatalog::new();
    catalog.upsert(
        "asura",
        "Title X",
        SeriesRecord {
            url: format!("{}/series/title-x", server.uri()),
            last_chapter: 10,
        },
    );
    JsonFileStore::new(dir.path().join("tracked_series.json")).save(&catalog)?;

    let checker = create_test_checker(store.clone());

    let first = checker.check_for_updates().await?;
    assert_eq!(first.updates.len(), 1);
    assert_eq!(store.save_count(), 1);
    let after_first = std::fs::read_to_string(dir.path().join("tracked_series.json"))?;

    let second = checker.check_for_updates().await?;
    assert!(!second.has_updates());
    assert_eq!(store.save_count(), 1);
    let after_second = std::fs::read_to_string(dir.path().join("tracked_series.json"))?;

    assert_eq!(after_first, after_second);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_and_unknown_entries_do_not_block_others() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    serve_series(&server, "/series/healthy", "Healthy", 31).await;
    Mock::given(method("GET"))
        .and(path("/series/gone"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = TempDir::new()?;
    let path = dir.path().join("tracked_series.json");
    let mut catalog = SeriesCatalog::new();
    catalog.upsert(
        "asura",
        "Gone",
        SeriesRecord {
            url: format!("{}/series/gone", server.uri()),
            last_chapter: 5,
        },
    );
    catalog.upsert(
        "asura",
        "Healthy",
        SeriesRecord {
            url: format!("{}/series/healthy", server.uri()),
            last_chapter: 30,
        },
    );
    catalog.upsert(
        "flame",
        "Elsewhere",
        SeriesRecord {
            url: "https://flamecomics.xyz/series/1".to_string(),
            last_chapter: 56,
        },
    );
    JsonFileStore::new(&path).save(&catalog)?;

    let store = CountingStore::new(&path);
    let checker = create_test_checker(store.clone());

    let summary = checker.check_for_updates().await?;

    assert_eq!(summary.skipped_sites, vec!["flame".to_string()]);
    assert_eq!(summary.series_checked, 2);
    assert_eq!(summary.failed_series.len(), 1);
    assert_eq!(summary.updates.len(), 1);
    assert_eq!(summary.updates[0].title, "Healthy");

    let reloaded = store.load()?;
    assert_eq!(reloaded.get("asura", "Healthy").unwrap().last_chapter, 31);
    assert_eq!(reloaded.get("asura", "Gone").unwrap().last_chapter, 5);
    assert_eq!(reloaded.get("flame", "Elsewhere").unwrap().last_chapter, 56);
    Ok(())
}

#[tokio::test]
async fn test_corrupted_catalog_is_replaced_on_add() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    serve_series(&server, "/series/new", "New Series", 1).await;

    let dir = TempDir::new()?;
    let path = dir.path().join("tracked_series.json");
    std::fs::write(&path, "{\"asura\": {\"broken\"")?;

    let store = CountingStore::new(&path);
    let checker = create_test_checker(store.clone());

    assert!(checker.tracked_series()?.is_empty());

    checker
        .add_new_series("asura", &format!("{}/series/new", server.uri()))
        .await?;

    let tracked = checker.tracked_series()?;
    assert_eq!(tracked.len(), 1);
    assert_eq!(tracked[0].title, "New Series");
    assert_eq!(tracked[0].last_chapter, 1);
    Ok(())
}

#[tokio::test]
async fn test_add_with_broken_page_adds_nothing() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><p>maintenance</p></html>"))
        .mount(&server)
        .await;

    let dir = TempDir::new()?;
    let path = dir.path().join("tracked_series.json");
    let store = CountingStore::new(&path);
    let checker = create_test_checker(store.clone());

    let outcome = checker
        .add_new_series("asura", &format!("{}/series/new", server.uri()))
        .await?;

    assert!(matches!(outcome, AddOutcome::ScrapeFailed { .. }));
    assert_eq!(store.save_count(), 0);
    assert!(!path.exists());
    Ok(())
}

#[tokio::test]
async fn test_unreadable_catalog_is_not_overwritten_on_add() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    serve_series(&server, "/series/new", "New", 1).await;

    let dir = TempDir::new()?;
    let path = dir.path().join("tracked_series.json");
    let original =
        b"{\"asura\": {\"T\xff\": {\"url\": \"http://t\", \"last_chapter\": 5}, \"Keep\": {\"url\": \"http://k\", \"last_chapter\": 9}}}";
    std::fs::write(&path, original)?;

    let store = CountingStore::new(&path);
    let checker = create_test_checker(store.clone());

    let result = checker
        .add_new_series("asura", &format!("{}/series/new", server.uri()))
        .await;

    assert!(result.is_err());
    assert_eq!(store.save_count(), 0);
    assert_eq!(std::fs::read(&path)?, original.to_vec());
    Ok(())
}
