use super::support::{harness, RecordingFetcher, Reply};
use futures::FutureExt;
use map_config::{InitializationState, ReadyCondition};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn ready_with_no_extras_settles_after_rejection() {
    let fetcher = RecordingFetcher::new().reply("cfg.en.json", Reply::Ok(json!({})));
    let h = harness(Some("cfg.$LANG.json"), None, fetcher);

    let report = tokio::time::timeout(Duration::from_secs(5), h.loader.ready(Vec::new()))
        .await
        .expect("ready must not hang");

    assert!(!report.config_loaded);
    assert_eq!(h.loader.state(), InitializationState::Failed);
}

#[tokio::test]
async fn ready_starts_initialization_when_nobody_has() {
    let fetcher = RecordingFetcher::new()
        .reply("cfg.en.json", Reply::Ok(json!({})))
        .reply("cfg.fr.json", Reply::Ok(json!({})));
    let h = harness(Some("cfg.$LANG.json"), None, fetcher);
    assert_eq!(h.loader.state(), InitializationState::NotStarted);

    let report = h.loader.ready(Vec::new()).await;

    assert!(report.config_loaded);
    assert_eq!(h.loader.store().len(), 2);
}

#[tokio::test]
async fn ready_waits_for_config_and_extra_conditions() {
    let fetcher = RecordingFetcher::new()
        .reply_after("cfg.en.json", Reply::Ok(json!({})), 20)
        .reply_after("cfg.fr.json", Reply::Ok(json!({})), 20);
    let h = harness(Some("cfg.$LANG.json"), None, fetcher);
    let tiles_loaded = Arc::new(AtomicBool::new(false));
    let flag = tiles_loaded.clone();
    let extra: Vec<ReadyCondition> = vec![async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        flag.store(true, Ordering::SeqCst);
        Ok(())
    }
    .boxed()];

    let report = h.loader.ready(extra).await;

    assert!(report.config_loaded);
    assert_eq!(report.failed_conditions, 0);
    assert!(tiles_loaded.load(Ordering::SeqCst));
    assert_eq!(h.loader.state(), InitializationState::Complete);
}

#[tokio::test]
async fn failing_extra_condition_is_counted_not_raised() {
    let h = harness(None, None, RecordingFetcher::new());
    let extra: Vec<ReadyCondition> = vec![
        async { Err(anyhow::anyhow!("translations unavailable")) }.boxed(),
        async { Err(anyhow::anyhow!("tiles unavailable")) }.boxed(),
        async { Ok(()) }.boxed(),
    ];

    let report = h.loader.ready(extra).await;

    assert!(report.config_loaded);
    assert_eq!(report.failed_conditions, 2);
}

#[tokio::test]
async fn many_waiters_share_one_initialization() {
    let fetcher = RecordingFetcher::new()
        .reply_after("cfg.en.json", Reply::Ok(json!({})), 10)
        .reply_after("cfg.fr.json", Reply::Ok(json!({})), 10);
    let h = harness(Some("cfg.$LANG.json"), None, fetcher);

    let waiters: Vec<_> = (0..4)
        .map(|_| {
            let loader = h.loader.clone();
            tokio::spawn(async move { loader.ready(Vec::new()).await })
        })
        .collect();
    for waiter in waiters {
        assert!(waiter.await.unwrap().config_loaded);
    }

    assert_eq!(h.fetcher.calls().len(), 2);
}
