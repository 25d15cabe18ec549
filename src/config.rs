use std::{
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};

/// Endpoint used when nothing has been stored
pub const DEFAULT_ENDPOINT: &str = "https://notif.imtaqin.id/";

/// Default HTTP request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of transmissions in flight at once
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Where relayed notifications are POSTed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Target URL
    pub url: String,
}

impl EndpointConfig {
    /// Creates an instance of [`EndpointConfig`]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Supplies the endpoint on demand.
///
/// Read once per transmission attempt, so changes apply from the next event on.
pub trait EndpointProvider: Send + Sync {
    /// Current endpoint, `None` when nothing is stored and there is no default
    fn endpoint(&self) -> Option<EndpointConfig>;
}

impl EndpointProvider for EndpointConfig {
    fn endpoint(&self) -> Option<EndpointConfig> {
        Some(self.clone())
    }
}

impl<T: EndpointProvider + ?Sized> EndpointProvider for Arc<T> {
    fn endpoint(&self) -> Option<EndpointConfig> {
        (**self).endpoint()
    }
}

/// In-process endpoint setting with an explicit fallback.
///
/// Clones share the stored value.
#[derive(Debug, Clone)]
pub struct EndpointStore {
    stored: Arc<RwLock<Option<String>>>,
    default: Option<String>,
}

impl EndpointStore {
    /// Store falling back to [`DEFAULT_ENDPOINT`]
    pub fn new() -> Self {
        Self::with_default(DEFAULT_ENDPOINT)
    }

    /// Store falling back to `url`
    pub fn with_default(url: impl Into<String>) -> Self {
        Self {
            stored: Arc::default(),
            default: Some(url.into()),
        }
    }

    /// Store with no fallback: nothing is relayed until a URL is set
    pub fn without_default() -> Self {
        Self {
            stored: Arc::default(),
            default: None,
        }
    }

    /// Replaces the stored URL
    pub fn set_url(&self, url: impl Into<String>) {
        let url = url.into();
        tracing::debug!(host = %endpoint_host(&url), "Endpoint updated");

        *self.stored.write().unwrap_or_else(PoisonError::into_inner) = Some(url);
    }

    /// Forgets the stored URL, reverting to the default
    pub fn clear(&self) {
        *self.stored.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Stored URL, or the default
    pub fn url(&self) -> Option<String> {
        self.stored
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .or_else(|| self.default.clone())
    }
}

impl Default for EndpointStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointProvider for EndpointStore {
    fn endpoint(&self) -> Option<EndpointConfig> {
        self.url().map(EndpointConfig::new)
    }
}

/// Host part of `url`, so credentials in paths or queries stay out of logs
fn endpoint_host(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_owned))
        .unwrap_or_else(|| "<invalid>".to_string())
}

/// Tuning for the HTTP relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Per-request timeout
    pub timeout: Duration,

    /// Maximum transmissions in flight
    pub concurrency: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}
