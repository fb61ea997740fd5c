use async_trait::async_trait;
use map_config::fetch::ConfigFetcher;
use map_config::{ConfigError, ConfigLoader, DeclaredAttributes, SharedLanguageSelector};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted response for one URL.
#[derive(Clone)]
pub enum Reply {
    Ok(Value),
    Fail(&'static str),
}

/// Fetcher that records requested URLs and answers from a script,
/// optionally after a per-URL delay.
#[derive(Default)]
pub struct RecordingFetcher {
    replies: HashMap<String, (Reply, Duration)>,
    calls: Mutex<Vec<String>>,
    finished: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, url: &str, reply: Reply) -> Self {
        self.replies
            .insert(url.to_string(), (reply, Duration::from_millis(0)));
        self
    }

    pub fn reply_after(mut self, url: &str, reply: Reply, delay_ms: u64) -> Self {
        self.replies
            .insert(url.to_string(), (reply, Duration::from_millis(delay_ms)));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// URLs whose reply was delivered, in delivery order.
    pub fn finished(&self) -> Vec<String> {
        self.finished.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfigFetcher for RecordingFetcher {
    async fn fetch(&self, url: &str) -> Result<Value, ConfigError> {
        self.calls.lock().unwrap().push(url.to_string());
        let (reply, delay) = self.replies.get(url).cloned().unwrap_or((
            Reply::Fail("no scripted reply"),
            Duration::from_millis(0),
        ));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.finished.lock().unwrap().push(url.to_string());
        match reply {
            Reply::Ok(doc) => Ok(doc),
            Reply::Fail(message) => Err(ConfigError::Fetch {
                language: String::new(),
                url: url.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

pub fn defaults() -> Value {
    json!({
        "title": "Map",
        "zoom": 4,
        "map": {"center": [45.5, -73.6], "basemap": "osm"},
        "layers": ["roads"]
    })
}

pub struct Harness {
    pub loader: Arc<ConfigLoader>,
    pub fetcher: Arc<RecordingFetcher>,
    pub selector: Arc<SharedLanguageSelector>,
}

pub fn harness(config: Option<&str>, languages: Option<&str>, fetcher: RecordingFetcher) -> Harness {
    let fetcher = Arc::new(fetcher);
    let selector = Arc::new(SharedLanguageSelector::new("en"));
    let loader = ConfigLoader::new(
        DeclaredAttributes::new(config.map(String::from), languages.map(String::from)),
        defaults(),
        fetcher.clone(),
        selector.clone(),
    );
    Harness {
        loader: Arc::new(loader),
        fetcher,
        selector,
    }
}
