use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, Method, Request, Url};
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tower::limit::RateLimit;
use tower::{Service, ServiceExt};

use crate::error::HubError;

/// Shared HTTP transport for every accessor. Requests are pushed through a
/// rate limiter so that a burst of freshly mounted views cannot hammer the
/// upstream APIs.
pub struct Transport {
    rate_limited_client: tokio::sync::Mutex<RateLimit<Client>>
}

impl Transport {
    pub fn new() -> Self {
        let svc = tower::ServiceBuilder::new()
            .rate_limit(100, Duration::from_secs(60))
            .service(Client::new());

        Transport {
            rate_limited_client: tokio::sync::Mutex::new(svc)
        }
    }

    /// Issues a single GET for `locator` and decodes the body as JSON.
    /// Non-2xx statuses are failures.
    pub async fn get_json<T: DeserializeOwned>(&self, locator: &str) -> Result<T, HubError> {
        let url = Url::parse(locator)
            .map_err(|err| format!("Invalid locator {}: {}", locator, err))?;

        let mut request = Request::new(Method::GET, url);
        request.headers_mut().insert(ACCEPT, HeaderValue::from_static("application/json"));

        let response = {
            let mut client = self.rate_limited_client.lock().await;
            client.ready().await
                .map_err(|err| format!("Failed to await transport readiness: {}", err))?
                .call(request).await
                .map_err(|err| format!("Failed to request {}: {}", locator, err))?
        };

        if !response.status().is_success() {
            return Err(format!("Request to {} returned status {}", locator, response.status()).into());
        }

        let body = response.text().await
            .map_err(|err| format!("Failed to read response body from {}: {}", locator, err))?;

        serde_json::from_str(body.as_str())
            .map_err(|err| format!("Failed to decode response from {}: {}", locator, err).into())
    }
}

impl Default for Transport {
    fn default() -> Self {
        Transport::new()
    }
}

/// The latest observed state of one polled resource: the last successfully
/// decoded payload (retained across later failures), whether the first
/// round has completed, and the most recent error if any.
#[derive(Debug, Clone)]
pub struct FetchSnapshot<T> {
    pub data: Option<Arc<T>>,
    pub loading: bool,
    pub error: Option<HubError>
}

struct FetchState<T> {
    data: Option<Arc<T>>,
    loading: bool,
    error: Option<HubError>
}

struct PollerShared<T> {
    state: Mutex<FetchState<T>>,
    // Cleared on teardown; a round that resolves afterwards publishes nothing.
    active: AtomicBool
}

impl<T> PollerShared<T> {
    fn read(&self) -> FetchSnapshot<T> {
        let state = self.state.lock().unwrap();
        FetchSnapshot {
            data: state.data.clone(),
            loading: state.loading,
            error: state.error.clone()
        }
    }

    fn publish_ok(&self, value: T) {
        if !self.active.load(Ordering::Acquire) {
            return;
        }
        let mut state = self.state.lock().unwrap();
        state.data = Some(Arc::new(value));
        state.error = None;
        state.loading = false;
    }

    fn publish_err(&self, err: HubError) {
        if !self.active.load(Ordering::Acquire) {
            return;
        }
        let mut state = self.state.lock().unwrap();
        state.error = Some(err);
        state.loading = false;
    }
}

/// A repeating fetch bound to the lifetime of this value: an immediate
/// retrieval on spawn, another every `every` thereafter. Failed rounds keep
/// the previous snapshot and never stop the timer. Dropping the poller
/// cancels the timer and suppresses any still in-flight result.
///
/// Responses carry no sequence number, so a slow round resolving after a
/// newer one can overwrite it. Accepted; all payloads are full snapshots.
pub struct Poller<T> {
    transport: Arc<Transport>,
    locator: Option<String>,
    shared: Arc<PollerShared<T>>,
    task: Option<JoinHandle<()>>
}

impl<T: DeserializeOwned + Send + Sync + 'static> Poller<T> {
    /// Starts polling `locator` on a fixed cadence. A `None` locator means
    /// "do not fetch": the poller reports not-loading, holds no data, and
    /// performs no network activity for its whole lifetime.
    pub fn spawn(transport: Arc<Transport>, locator: Option<String>, every: Duration) -> Self {
        let shared = Arc::new(PollerShared {
            state: Mutex::new(FetchState {
                data: None,
                loading: locator.is_some(),
                error: None
            }),
            active: AtomicBool::new(true)
        });

        let task = locator.clone().map(|url| {
            let shared = Arc::clone(&shared);
            let transport = Arc::clone(&transport);

            tokio::task::spawn(async move {
                let mut interval = tokio::time::interval(every);
                interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                loop {
                    // First tick fires immediately.
                    interval.tick().await;
                    run_round(&transport, url.as_str(), &shared).await;
                }
            })
        });

        Poller { transport, locator, shared, task }
    }

    /// A poller that is already settled with a local error: not loading, no
    /// data, no network activity. Used for failures detected before any
    /// request makes sense (e.g. an unknown leaderboard category).
    pub fn failed(transport: Arc<Transport>, err: HubError) -> Self {
        Poller {
            transport,
            locator: None,
            shared: Arc::new(PollerShared {
                state: Mutex::new(FetchState {
                    data: None,
                    loading: false,
                    error: Some(err)
                }),
                active: AtomicBool::new(true)
            }),
            task: None
        }
    }

    /// One immediate out-of-cycle round, for explicit refresh actions.
    pub async fn refetch(&self) {
        if let Some(url) = &self.locator {
            run_round(&self.transport, url.as_str(), &self.shared).await;
        }
    }

    pub fn snapshot(&self) -> FetchSnapshot<T> {
        self.shared.read()
    }

    /// A read-only handle onto this poller's state. Readers may outlive the
    /// poller; once it is torn down they keep seeing the final snapshot.
    pub fn reader(&self) -> SnapshotReader<T> {
        SnapshotReader { shared: Arc::clone(&self.shared) }
    }
}

#[derive(Clone)]
pub struct SnapshotReader<T> {
    shared: Arc<PollerShared<T>>
}

impl<T> SnapshotReader<T> {
    pub fn snapshot(&self) -> FetchSnapshot<T> {
        self.shared.read()
    }
}

async fn run_round<T: DeserializeOwned>(transport: &Transport, url: &str, shared: &PollerShared<T>) {
    match transport.get_json::<T>(url).await {
        Ok(value) => shared.publish_ok(value),
        Err(err) => {
            tracing::warn!("Fetch of {} failed: {}", url, err);
            shared.publish_err(err);
        }
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.shared.active.store(false, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
