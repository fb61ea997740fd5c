//! Config Loader
//!
//! One-shot, memoized initialization: classify the declared source, fetch one
//! document per language when the source is a URL template, merge each over
//! the defaults, and publish the results in the [`ConfigStore`]. Consumers
//! wait on [`ConfigLoader::ready`] before reading configuration.

use crate::config::LoaderSettings;
use crate::defaults;
use crate::error::ConfigError;
use crate::fetch::{ConfigFetcher, FileFetcher, HttpFetcher};
use crate::locale::{normalize_language_tag, LanguageSelector};
use crate::overlay::merge_over_defaults;
use crate::source::{ConfigSource, DeclaredAttributes, LanguageList, UrlTemplate};
use crate::store::ConfigStore;
use crate::types::{ConfigDocument, LanguageCode, PublishedConfig};
use futures::future::{join_all, BoxFuture, Shared};
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::{debug, error, info, warn};

/// Outcome replayed to every holder of the initialization handle.
pub type InitOutcome = Result<(), ConfigError>;

/// Extra condition folded into [`ConfigLoader::ready`].
pub type ReadyCondition = BoxFuture<'static, anyhow::Result<()>>;

/// Lifecycle of the one-shot initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializationState {
    NotStarted,
    InProgress,
    Complete,
    /// The handle rejected; the store may hold a partial set of languages.
    Failed,
}

/// Shared handle to the single initialization run.
///
/// Cloning is cheap; every clone observes the same outcome, which settles once.
#[derive(Clone)]
pub struct InitHandle {
    inner: Shared<BoxFuture<'static, InitOutcome>>,
}

impl InitHandle {
    /// Whether both handles refer to the same initialization run.
    pub fn ptr_eq(&self, other: &InitHandle) -> bool {
        self.inner.ptr_eq(&other.inner)
    }

    /// Outcome if the run has already settled.
    pub fn peek(&self) -> Option<&InitOutcome> {
        self.inner.peek()
    }
}

impl Future for InitHandle {
    type Output = InitOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner).poll(cx)
    }
}

impl std::fmt::Debug for InitHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitHandle")
            .field("settled", &self.peek().is_some())
            .finish()
    }
}

/// What [`ConfigLoader::ready`] observed. Readiness itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyReport {
    /// Whether initialization completed successfully.
    pub config_loaded: bool,
    /// Error the initialization rejected with, if any.
    pub init_error: Option<ConfigError>,
    /// Number of extra conditions that failed.
    pub failed_conditions: usize,
}

/// Loader knobs taken from [`LoaderSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    pub placeholder: String,
    pub default_languages: Vec<LanguageCode>,
    pub inline_language: LanguageCode,
    pub fallback_language: LanguageCode,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        LoaderOptions::from(&LoaderSettings::default())
    }
}

impl From<&LoaderSettings> for LoaderOptions {
    fn from(settings: &LoaderSettings) -> Self {
        Self {
            placeholder: settings.placeholder.clone(),
            default_languages: settings.default_languages.clone(),
            inline_language: settings.inline_language.clone(),
            fallback_language: settings.fallback_language.clone(),
        }
    }
}

/// Owned configuration context handed to consumers.
pub struct ConfigLoader {
    declared: DeclaredAttributes,
    options: LoaderOptions,
    defaults: Arc<ConfigDocument>,
    fetcher: Arc<dyn ConfigFetcher>,
    selector: Arc<dyn LanguageSelector>,
    store: Arc<ConfigStore>,
    init: Mutex<Option<InitHandle>>,
}

impl ConfigLoader {
    /// Create a loader with default options.
    pub fn new(
        declared: DeclaredAttributes,
        defaults: ConfigDocument,
        fetcher: Arc<dyn ConfigFetcher>,
        selector: Arc<dyn LanguageSelector>,
    ) -> Self {
        Self {
            declared,
            options: LoaderOptions::default(),
            defaults: Arc::new(defaults),
            fetcher,
            selector,
            store: Arc::new(ConfigStore::new()),
            init: Mutex::new(None),
        }
    }

    pub fn with_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Build a loader from settings: declared attributes, defaults file, and transport.
    ///
    /// A `base_url` with an `http`/`https` scheme (or no base URL) selects the
    /// HTTP fetcher; any other base is treated as a local directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the defaults file cannot be read or the
    /// transport cannot be built.
    pub fn from_settings(
        settings: &LoaderSettings,
        selector: Arc<dyn LanguageSelector>,
    ) -> Result<Self, ConfigError> {
        let defaults = defaults::load_optional_defaults(settings.defaults_path.as_deref())?;
        let fetcher = fetcher_for(settings)?;
        Ok(Self::new(settings.declared(), defaults, fetcher, selector)
            .with_options(LoaderOptions::from(settings)))
    }

    /// Start initialization, or return the handle of the run already started.
    ///
    /// Only the first call classifies the source and issues fetches. When a
    /// tokio runtime is available the run is driven in the background;
    /// otherwise it progresses when the handle is awaited.
    pub fn initialize(&self) -> InitHandle {
        let mut slot = self.init.lock();
        if let Some(handle) = slot.as_ref() {
            return handle.clone();
        }

        let run = InitRun {
            declared: self.declared.clone(),
            options: self.options.clone(),
            defaults: Arc::clone(&self.defaults),
            fetcher: Arc::clone(&self.fetcher),
            store: Arc::clone(&self.store),
        };
        let handle = InitHandle {
            inner: run.execute().boxed().shared(),
        };
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let driver = handle.clone();
            runtime.spawn(async move {
                let _ = driver.await;
            });
        }
        *slot = Some(handle.clone());
        handle
    }

    pub fn state(&self) -> InitializationState {
        match self.init.lock().as_ref() {
            None => InitializationState::NotStarted,
            Some(handle) => match handle.peek() {
                None => InitializationState::InProgress,
                Some(Ok(())) => InitializationState::Complete,
                Some(Err(_)) => InitializationState::Failed,
            },
        }
    }

    /// Read-only view of the published configurations.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn defaults(&self) -> &ConfigDocument {
        &self.defaults
    }

    /// Language key the selector currently resolves to.
    pub fn current_language(&self) -> LanguageCode {
        normalize_language_tag(&self.selector.effective_language())
    }

    /// Configuration for the active language.
    ///
    /// When the active language was never loaded, falls back to the
    /// configured fallback language; `None` when that is missing too.
    pub fn current(&self) -> Option<PublishedConfig> {
        let lang = self.current_language();
        if let Some(config) = self.store.get(&lang) {
            return Some(config);
        }
        let fallback = &self.options.fallback_language;
        let config = self.store.get(fallback);
        if config.is_some() {
            warn!(
                language = %lang,
                fallback = %fallback,
                "No config loaded for language, serving fallback"
            );
        }
        config
    }

    /// Configuration for the active language, without fallback.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LanguageNotLoaded`] when the language has no entry.
    pub fn current_strict(&self) -> Result<PublishedConfig, ConfigError> {
        let lang = self.current_language();
        self.store
            .get(&lang)
            .ok_or(ConfigError::LanguageNotLoaded(lang))
    }

    /// Wait for initialization, then for every extra condition.
    ///
    /// Never fails: an initialization error or a failing condition is logged
    /// and recorded in the report, not returned. Initialization is started
    /// if no caller has started it yet.
    pub async fn ready(&self, extra: Vec<ReadyCondition>) -> ReadyReport {
        let init_error = match self.initialize().await {
            Ok(()) => None,
            Err(e) => {
                error!(error = %e, "Config initialization failed; continuing readiness");
                Some(e)
            }
        };

        let failed_conditions = join_all(extra)
            .await
            .into_iter()
            .filter_map(Result::err)
            .inspect(|e| error!(error = %e, "Readiness condition failed"))
            .count();

        ReadyReport {
            config_loaded: init_error.is_none(),
            init_error,
            failed_conditions,
        }
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("declared", &self.declared)
            .field("options", &self.options)
            .field("state", &self.state())
            .field("store", &self.store)
            .finish()
    }
}

fn fetcher_for(settings: &LoaderSettings) -> Result<Arc<dyn ConfigFetcher>, ConfigError> {
    match settings.http.base_url.as_deref() {
        Some(base) if !base.starts_with("http://") && !base.starts_with("https://") => {
            let dir = base.strip_prefix("file://").unwrap_or(base);
            Ok(Arc::new(FileFetcher::new(dir)))
        }
        _ => Ok(Arc::new(HttpFetcher::new(&settings.http)?)),
    }
}

/// Everything the initialization run owns, detached from the loader.
struct InitRun {
    declared: DeclaredAttributes,
    options: LoaderOptions,
    defaults: Arc<ConfigDocument>,
    fetcher: Arc<dyn ConfigFetcher>,
    store: Arc<ConfigStore>,
}

impl InitRun {
    async fn execute(self) -> InitOutcome {
        let source =
            ConfigSource::classify(self.declared.config.as_deref(), &self.options.placeholder);
        info!(source = source.kind(), "Initializing config");

        match source {
            ConfigSource::Absent => {
                publish_merged(
                    &self.store,
                    &self.defaults,
                    &self.options.inline_language,
                    &defaults::empty_defaults(),
                )?;
            }
            ConfigSource::Inline(doc) => {
                // Parsed for its diagnostics only; inline config is single-language.
                let languages = self.languages();
                debug!(declared = ?languages.as_slice(), "Inline config ignores language list");
                publish_merged(&self.store, &self.defaults, &self.options.inline_language, &doc)?;
            }
            ConfigSource::UrlTemplate(template) => {
                let languages = self.languages();
                if languages.is_empty() {
                    warn!(template = template.template(), "URL template declared with no languages");
                }
                if !template.has_placeholder() {
                    warn!(
                        template = template.template(),
                        placeholder = %self.options.placeholder,
                        "URL template has no placeholder; every language fetches the same document"
                    );
                }
                self.fan_out(&template, &languages).await?;
            }
        }

        info!(languages = ?self.store.languages(), "Config initialization complete");
        Ok(())
    }

    fn languages(&self) -> LanguageList {
        LanguageList::parse_or(
            self.declared.languages.as_deref(),
            &self.options.default_languages,
        )
    }

    /// Fetch every language concurrently; the first failure rejects the run.
    ///
    /// Fetches still in flight at that point are not cancelled. They keep
    /// running on the ambient runtime and their results are discarded.
    async fn fan_out(&self, template: &UrlTemplate, languages: &LanguageList) -> InitOutcome {
        let rejected = Arc::new(AtomicBool::new(false));
        let mut pending: FuturesUnordered<BoxFuture<'static, InitOutcome>> = languages
            .iter()
            .map(|lang| {
                LanguageFetch {
                    language: lang.clone(),
                    url: template.expand(lang),
                    fetcher: Arc::clone(&self.fetcher),
                    defaults: Arc::clone(&self.defaults),
                    store: Arc::clone(&self.store),
                    rejected: Arc::clone(&rejected),
                }
                .run()
                .boxed()
            })
            .collect();

        while let Some(outcome) = pending.next().await {
            if let Err(e) = outcome {
                rejected.store(true, Ordering::SeqCst);
                settle_detached(pending);
                return Err(e);
            }
        }
        Ok(())
    }
}

/// One per-language fetch, owning what it needs to outlive a rejected run.
struct LanguageFetch {
    language: LanguageCode,
    url: String,
    fetcher: Arc<dyn ConfigFetcher>,
    defaults: Arc<ConfigDocument>,
    store: Arc<ConfigStore>,
    rejected: Arc<AtomicBool>,
}

impl LanguageFetch {
    async fn run(self) -> InitOutcome {
        let lang = self.language.as_str();
        debug!(language = lang, url = %self.url, "Fetching config");
        let result = self.fetcher.fetch(&self.url).await;
        if self.rejected.load(Ordering::SeqCst) {
            debug!(language = lang, "Initialization already failed, ignoring fetch result");
            return Ok(());
        }
        let doc = result.map_err(|e| {
            let e = e.for_language(lang);
            error!(error = %e, "Config fetch failed");
            e
        })?;
        publish_merged(&self.store, &self.defaults, lang, &doc)?;
        debug!(language = lang, "Config published");
        Ok(())
    }
}

/// Let fetches outstanding after a rejection run to completion.
fn settle_detached(mut pending: FuturesUnordered<BoxFuture<'static, InitOutcome>>) {
    if pending.is_empty() {
        return;
    }
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => {
            runtime.spawn(async move { while pending.next().await.is_some() {} });
        }
        Err(_) => {
            debug!(
                outstanding = pending.len(),
                "No runtime to finish outstanding fetches after failure"
            );
        }
    }
}

fn publish_merged(
    store: &ConfigStore,
    defaults: &ConfigDocument,
    lang: &str,
    loaded: &ConfigDocument,
) -> InitOutcome {
    store.publish(lang, merge_over_defaults(defaults, loaded))?;
    Ok(())
}
