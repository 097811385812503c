use crate::core::summary::format_summary;
use crate::domain::model::{Country, SearchState};
use crate::domain::ports::{CountryGateway, DisplaySurface, Notifier};
use crate::utils::error::SearchError;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::{AbortHandle, JoinHandle};

pub const LOADING_TEXT: &str = "Loading...";

/// How a search invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Displayed(Country),
    Failed(SearchError),
    /// A newer search was started, or the screen was torn down, before this one completed.
    Discarded,
}

struct Screen {
    state: SearchState,
    latest_token: u64,
    torn_down: bool,
}

struct Inner<G> {
    gateway: G,
    display: Arc<dyn DisplaySurface>,
    notifier: Arc<dyn Notifier>,
    screen: Mutex<Screen>,
    // Serializes token checks with display writes. Taken before `screen`, never by `state()`.
    output: Mutex<()>,
    in_flight: Mutex<Vec<AbortHandle>>,
}

/// Drives the country search screen: validates input, dispatches lookups and
/// writes results to the display surface.
///
/// Every search takes a new request token, blank ones included. Only the
/// completion holding the latest token is allowed to write, so a slow earlier
/// lookup can never overwrite a later action.
///
/// The display and notifier are called with no screen lock held, so they may
/// read [`state`](Self::state) while rendering.
pub struct CountrySearchController<G: CountryGateway> {
    inner: Arc<Inner<G>>,
}

impl<G: CountryGateway> Clone for CountrySearchController<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn failure_state(err: &SearchError) -> SearchState {
    match err {
        SearchError::NotFound => SearchState::NotFound,
        SearchError::HttpError { .. } => SearchState::HttpError,
        SearchError::TransportError { .. } => SearchState::TransportError,
        SearchError::EmptyInput => SearchState::Idle,
    }
}

impl<G: CountryGateway> CountrySearchController<G> {
    pub fn new(gateway: G, display: Arc<dyn DisplaySurface>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner: Arc::new(Inner {
                gateway,
                display,
                notifier,
                screen: Mutex::new(Screen {
                    state: SearchState::Idle,
                    latest_token: 0,
                    torn_down: false,
                }),
                output: Mutex::new(()),
                in_flight: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn state(&self) -> SearchState {
        lock(&self.inner.screen).state
    }

    /// Whether [`teardown`](Self::teardown) has run.
    pub fn is_torn_down(&self) -> bool {
        lock(&self.inner.screen).torn_down
    }

    /// Runs one search to completion.
    pub async fn search(&self, raw_input: &str) -> SearchOutcome {
        match self.begin(raw_input) {
            Ok((token, name)) => self.complete(token, &name).await,
            Err(outcome) => outcome,
        }
    }

    /// Marks the screen destroyed and aborts lookups started with [`submit`](Self::submit).
    /// Completions arriving afterwards are dropped.
    pub fn teardown(&self) {
        {
            let _output = lock(&self.inner.output);
            let mut screen = lock(&self.inner.screen);
            if screen.torn_down {
                return;
            }
            screen.torn_down = true;
            screen.state = SearchState::Idle;
        }

        let handles: Vec<AbortHandle> = lock(&self.inner.in_flight).drain(..).collect();
        tracing::debug!("Tearing down search screen, aborting {} lookup(s)", handles.len());
        for handle in handles {
            handle.abort();
        }
    }

    /// Validates the input and writes the pre-dispatch status. Returns the
    /// request token and trimmed name when a lookup should follow.
    fn begin(&self, raw_input: &str) -> Result<(u64, String), SearchOutcome> {
        let _output = lock(&self.inner.output);
        let name = raw_input.trim();

        let token = {
            let mut screen = lock(&self.inner.screen);
            if screen.torn_down {
                tracing::warn!("Search ignored: screen already torn down");
                return Err(SearchOutcome::Discarded);
            }
            screen.state = SearchState::Validating;
            // A blank search supersedes any lookup still in flight.
            screen.latest_token += 1;
            screen.state = if name.is_empty() {
                SearchState::Idle
            } else {
                SearchState::Loading
            };
            screen.latest_token
        };

        if name.is_empty() {
            let err = SearchError::EmptyInput;
            self.inner.display.set_text(err.display_text());
            tracing::debug!("Empty search input, no lookup dispatched");
            return Err(SearchOutcome::Failed(err));
        }

        self.inner.display.set_text(LOADING_TEXT);
        tracing::debug!(token, "Dispatching lookup for '{}'", name);
        Ok((token, name.to_string()))
    }

    async fn complete(&self, token: u64, name: &str) -> SearchOutcome {
        let response = self.inner.gateway.get_country_by_name(name).await;
        let result = response
            .map_err(SearchError::from)
            .and_then(|countries| countries.into_iter().next().ok_or(SearchError::NotFound));

        let _output = lock(&self.inner.output);
        {
            let mut screen = lock(&self.inner.screen);
            if screen.torn_down || token != screen.latest_token {
                tracing::warn!(
                    token,
                    latest = screen.latest_token,
                    "Discarding stale completion for '{}'",
                    name
                );
                return SearchOutcome::Discarded;
            }
            screen.state = match &result {
                Ok(_) => SearchState::Displayed,
                Err(err) => failure_state(err),
            };
        }

        match result {
            Ok(country) => {
                self.inner.display.set_text(&format_summary(&country));
                tracing::info!("Displayed '{}' for query '{}'", country.name.common, name);
                SearchOutcome::Displayed(country)
            }
            Err(err) => {
                self.inner.display.set_text(err.display_text());
                if let Some(message) = err.notification() {
                    self.inner.notifier.notify(&message);
                }
                tracing::warn!("Search for '{}' failed: {}", name, err);
                SearchOutcome::Failed(err)
            }
        }
    }
}

impl<G: CountryGateway + 'static> CountrySearchController<G> {
    /// Non-blocking form of [`search`](Self::search). Validation and the
    /// `Loading...` write happen before this returns; the lookup runs on a
    /// spawned task. Returns `None` when no lookup was dispatched.
    pub fn submit(&self, raw_input: &str) -> Option<JoinHandle<SearchOutcome>> {
        let (token, name) = self.begin(raw_input).ok()?;

        let controller = self.clone();
        let handle = tokio::spawn(async move { controller.complete(token, &name).await });

        let mut in_flight = lock(&self.inner.in_flight);
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(handle.abort_handle());
        Some(handle)
    }
}
