use super::support::{harness, RecordingFetcher, Reply};
use map_config::{ConfigError, InitializationState};
use serde_json::json;
use std::time::Duration;

fn two_languages() -> RecordingFetcher {
    RecordingFetcher::new()
        .reply("cfg.en.json", Reply::Ok(json!({"title": "Map"})))
        .reply("cfg.fr.json", Reply::Ok(json!({"title": "Carte", "zoom": 6})))
}

#[tokio::test]
async fn url_template_fetches_each_default_language() {
    let h = harness(Some("cfg.$LANG.json"), None, two_languages());

    h.loader.initialize().await.unwrap();

    let mut calls = h.fetcher.calls();
    calls.sort();
    assert_eq!(calls, vec!["cfg.en.json", "cfg.fr.json"]);
    assert_eq!(h.loader.store().len(), 2);
    assert!(h.loader.store().contains("en"));
    assert!(h.loader.store().contains("fr"));
    assert_eq!(h.loader.state(), InitializationState::Complete);
}

#[tokio::test]
async fn each_language_is_merged_over_defaults() {
    let h = harness(Some("cfg.$LANG.json"), None, two_languages());
    h.loader.initialize().await.unwrap();

    let fr = h.loader.store().get("fr").unwrap();
    assert_eq!(fr["title"], "Carte");
    assert_eq!(fr["zoom"], 6);
    assert_eq!(fr["map"], json!({"center": [45.5, -73.6], "basemap": "osm"}));

    let en = h.loader.store().get("en").unwrap();
    assert_eq!(en["zoom"], 4);
}

#[tokio::test]
async fn declared_language_list_drives_fanout() {
    let fetcher = RecordingFetcher::new()
        .reply("/i18n/de/app.json", Reply::Ok(json!({"title": "Karte"})))
        .reply("/i18n/it/app.json", Reply::Ok(json!({"title": "Mappa"})));
    let h = harness(Some("/i18n/$LANG/app.json"), Some(r#"["de","it"]"#), fetcher);

    h.loader.initialize().await.unwrap();

    assert_eq!(h.fetcher.calls().len(), 2);
    assert_eq!(h.loader.store().get("it").unwrap()["title"], "Mappa");
    assert!(h.loader.store().get("en").is_none());
}

#[tokio::test]
async fn store_order_follows_completion_not_request() {
    let fetcher = RecordingFetcher::new()
        .reply_after("cfg.en.json", Reply::Ok(json!({})), 60)
        .reply_after("cfg.fr.json", Reply::Ok(json!({})), 5);
    let h = harness(Some("cfg.$LANG.json"), None, fetcher);

    h.loader.initialize().await.unwrap();

    assert_eq!(h.loader.store().languages(), vec!["fr", "en"]);
}

#[tokio::test]
async fn fetches_are_issued_concurrently() {
    let fetcher = RecordingFetcher::new()
        .reply_after("cfg.en.json", Reply::Ok(json!({})), 50)
        .reply_after("cfg.fr.json", Reply::Ok(json!({})), 50);
    let h = harness(Some("cfg.$LANG.json"), None, fetcher);

    let handle = h.loader.initialize();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    // Both requests are in flight before either completes.
    assert_eq!(h.fetcher.calls().len(), 2);
    assert_eq!(h.loader.state(), InitializationState::InProgress);
    handle.await.unwrap();
}

#[tokio::test]
async fn one_failed_language_rejects_the_whole_batch() {
    let fetcher = RecordingFetcher::new()
        .reply("cfg.en.json", Reply::Ok(json!({"title": "Map"})))
        .reply_after("cfg.fr.json", Reply::Fail("503 Service Unavailable"), 10);
    let h = harness(Some("cfg.$LANG.json"), None, fetcher);

    let err = h.loader.initialize().await.unwrap_err();

    match err {
        ConfigError::Fetch { language, url, .. } => {
            assert_eq!(language, "fr");
            assert_eq!(url, "cfg.fr.json");
        }
        other => panic!("expected fetch error, got {:?}", other),
    }
    assert_eq!(h.loader.state(), InitializationState::Failed);
    // The successful sibling may already be published.
    assert!(h.loader.store().get("fr").is_none());
    assert!(h.loader.store().get("en").is_some());
}

#[tokio::test]
async fn siblings_finish_after_rejection_but_are_not_published() {
    let fetcher = RecordingFetcher::new()
        .reply_after("cfg.en.json", Reply::Ok(json!({"title": "Map"})), 50)
        .reply("cfg.fr.json", Reply::Fail("connection reset"));
    let h = harness(Some("cfg.$LANG.json"), None, fetcher);

    let err = h.loader.initialize().await.unwrap_err();
    assert!(matches!(err, ConfigError::Fetch { ref language, .. } if language == "fr"));
    assert!(h.loader.store().is_empty());

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(h.fetcher.finished().contains(&"cfg.en.json".to_string()));
    assert!(h.loader.store().is_empty());
    assert_eq!(h.loader.state(), InitializationState::Failed);
}

#[tokio::test]
async fn repeated_initialize_issues_one_batch() {
    let h = harness(Some("cfg.$LANG.json"), None, two_languages());

    let handles: Vec<_> = (0..5).map(|_| h.loader.initialize()).collect();
    for handle in &handles {
        assert!(handle.ptr_eq(&handles[0]));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(h.fetcher.calls().len(), 2);
}

#[tokio::test]
async fn concurrent_initialize_from_tasks_issues_one_batch() {
    let h = harness(Some("cfg.$LANG.json"), None, two_languages());

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let loader = h.loader.clone();
            tokio::spawn(async move { loader.initialize().await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(h.fetcher.calls().len(), 2);
}

#[tokio::test]
async fn current_resolves_region_tag_to_primary_language() {
    let h = harness(Some("cfg.$LANG.json"), None, two_languages());
    h.loader.initialize().await.unwrap();

    h.selector.use_language("fr-CA");

    assert_eq!(h.loader.current().unwrap()["title"], "Carte");
}
