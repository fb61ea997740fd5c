use super::support::{defaults, harness, RecordingFetcher, Reply};
use map_config::overlay::merge_over_defaults;
use serde_json::json;

#[tokio::test]
async fn inline_config_is_merged_under_en() {
    let inline = json!({"title": "Transit", "map": {"basemap": "dark"}, "layers": ["bus"]});
    let h = harness(Some(&inline.to_string()), None, RecordingFetcher::new());

    h.loader.initialize().await.unwrap();

    assert!(h.fetcher.calls().is_empty());
    assert_eq!(h.loader.store().languages(), vec!["en"]);
    assert_eq!(
        *h.loader.current().unwrap(),
        merge_over_defaults(&defaults(), &inline)
    );
    assert_eq!(
        *h.loader.current().unwrap(),
        json!({
            "title": "Transit",
            "zoom": 4,
            "map": {"center": [45.5, -73.6], "basemap": "dark"},
            "layers": ["bus"]
        })
    );
}

#[tokio::test]
async fn inline_config_ignores_declared_languages() {
    let h = harness(
        Some(r#"{"zoom": 11}"#),
        Some(r#"["en","fr","de"]"#),
        RecordingFetcher::new(),
    );

    h.loader.initialize().await.unwrap();

    assert_eq!(h.loader.store().len(), 1);
    assert!(h.loader.store().get("fr").is_none());
}

#[tokio::test]
async fn malformed_inline_json_falls_through_to_url_fetch() {
    let raw = "{\"title\": broken";
    let fetcher = RecordingFetcher::new()
        .reply(raw, Reply::Ok(json!({"title": "Recovered"})));
    let h = harness(Some(raw), Some("not json"), fetcher);

    h.loader.initialize().await.unwrap();

    // Same raw string used as the template, once per default language.
    assert_eq!(h.fetcher.calls(), vec![raw.to_string(), raw.to_string()]);
    assert_eq!(h.loader.store().len(), 2);
    assert_eq!(h.loader.store().get("fr").unwrap()["title"], "Recovered");
}

#[tokio::test]
async fn absent_source_serves_defaults() {
    let h = harness(None, Some(r#"["fr"]"#), RecordingFetcher::new());

    h.loader.initialize().await.unwrap();

    assert!(h.fetcher.calls().is_empty());
    assert_eq!(h.loader.store().languages(), vec!["en"]);
    assert_eq!(*h.loader.current().unwrap(), defaults());
}

#[tokio::test]
async fn non_object_inline_json_replaces_defaults_without_fetching() {
    for raw in ["42", "[1,2]", r#""x""#] {
        let h = harness(Some(raw), None, RecordingFetcher::new());

        h.loader.initialize().await.unwrap();

        assert!(h.fetcher.calls().is_empty(), "{raw} must not be fetched");
        assert_eq!(h.loader.store().languages(), vec!["en"]);
        let expected: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(*h.loader.current().unwrap(), expected);
    }
}

#[tokio::test]
async fn whitespace_source_is_used_as_template() {
    let fetcher = RecordingFetcher::new().reply(" ", Reply::Ok(json!({})));
    let h = harness(Some(" "), Some(r#"["en"]"#), fetcher);

    h.loader.initialize().await.unwrap();

    assert_eq!(h.fetcher.calls(), vec![" ".to_string()]);
}
