use async_trait::async_trait;
use country_search::core::{Country, CountryGateway, CountryName, DisplaySurface, Notifier, SearchState};
use country_search::{CountrySearchController, GatewayError, SearchError, SearchOutcome};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

type Reply = Result<Vec<Country>, GatewayError>;

#[derive(Default)]
struct RecordingDisplay {
    writes: Mutex<Vec<String>>,
}

impl RecordingDisplay {
    fn last(&self) -> Option<String> {
        self.writes.lock().unwrap().last().cloned()
    }

    fn all(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl DisplaySurface for RecordingDisplay {
    fn set_text(&self, text: &str) {
        self.writes.lock().unwrap().push(text.to_string());
    }
}

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn all(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Answers each query from a canned table and records what was asked.
#[derive(Default)]
struct ScriptedGateway {
    replies: HashMap<String, Reply>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    fn with(mut self, name: &str, reply: Reply) -> Self {
        self.replies.insert(name.to_string(), reply);
        self
    }
}

#[async_trait]
impl CountryGateway for ScriptedGateway {
    async fn get_country_by_name(&self, name: &str) -> Reply {
        self.queries.lock().unwrap().push(name.to_string());
        self.replies.get(name).cloned().unwrap_or_else(|| Ok(vec![]))
    }
}

/// Holds every lookup open until the test releases it, so completion order is under test control.
#[derive(Default)]
struct GatedGateway {
    pending: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
}

impl GatedGateway {
    fn gate(&self, name: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().insert(name.to_string(), rx);
        tx
    }
}

#[async_trait]
impl CountryGateway for GatedGateway {
    async fn get_country_by_name(&self, name: &str) -> Reply {
        let rx = self.pending.lock().unwrap().remove(name);
        match rx {
            Some(rx) => rx.await.unwrap_or_else(|_| {
                Err(GatewayError::Transport {
                    message: "gate dropped".to_string(),
                })
            }),
            None => Ok(vec![]),
        }
    }
}

fn country(common: &str, official: &str, capital: &[&str], population: u64, region: &str, subregion: Option<&str>) -> Country {
    Country {
        name: CountryName {
            common: common.to_string(),
            official: official.to_string(),
        },
        capital: Some(capital.iter().map(|c| c.to_string()).collect()),
        population,
        region: region.to_string(),
        subregion: subregion.map(String::from),
    }
}

fn france() -> Country {
    country("France", "French Republic", &["Paris"], 67_391_582, "Europe", Some("Western Europe"))
}

fn peru() -> Country {
    country("Peru", "Republic of Peru", &["Lima"], 32_971_846, "Americas", Some("South America"))
}

fn build<G: CountryGateway>(gateway: G) -> (CountrySearchController<G>, Arc<RecordingDisplay>, Arc<RecordingNotifier>) {
    let display = Arc::new(RecordingDisplay::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = CountrySearchController::new(gateway, display.clone(), notifier.clone());
    (controller, display, notifier)
}

#[tokio::test]
async fn test_france_scenario_displays_six_fields() {
    let gateway = Arc::new(ScriptedGateway::default().with("france", Ok(vec![france()])));
    let (controller, display, notifier) = build(gateway.clone());

    let outcome = controller.search("france").await;

    assert_eq!(outcome, SearchOutcome::Displayed(france()));
    assert_eq!(
        display.last().unwrap(),
        "Country: France\n\
         Official Name: French Republic\n\
         Capital: Paris\n\
         Population: 67,391,582\n\
         Region: Europe\n\
         Subregion: Western Europe"
    );
    assert!(notifier.all().is_empty());
    assert_eq!(controller.state(), SearchState::Displayed);
}

#[tokio::test]
async fn test_whitespace_inputs_never_reach_gateway() {
    let gateway = Arc::new(ScriptedGateway::default());
    let (controller, display, notifier) = build(gateway.clone());

    for input in ["", "  ", "\t", " \n \r\n "] {
        let outcome = controller.search(input).await;
        assert_eq!(outcome, SearchOutcome::Failed(SearchError::EmptyInput));
        assert_eq!(display.last().as_deref(), Some("Please enter a country name"));
    }

    assert!(gateway.queries.lock().unwrap().is_empty());
    assert!(notifier.all().is_empty());
    assert!(!display.all().iter().any(|w| w == "Loading..."));
}

#[tokio::test]
async fn test_input_is_trimmed_before_lookup() {
    let gateway = Arc::new(ScriptedGateway::default().with("peru", Ok(vec![peru()])));
    let (controller, display, _) = build(gateway.clone());

    controller.search("   peru \t").await;

    assert_eq!(*gateway.queries.lock().unwrap(), vec!["peru".to_string()]);
    assert!(display.last().unwrap().starts_with("Country: Peru"));
}

#[tokio::test]
async fn test_only_first_record_is_displayed() {
    let gateway = Arc::new(ScriptedGateway::default().with("guinea", Ok(vec![france(), peru(), france()])));
    let (controller, display, _) = build(gateway);

    controller.search("guinea").await;

    let text = display.last().unwrap();
    assert!(text.starts_with("Country: France"));
    assert!(!text.contains("Peru"));
}

#[tokio::test]
async fn test_empty_result_shows_not_found() {
    let gateway = Arc::new(ScriptedGateway::default().with("xyzabc", Ok(vec![])));
    let (controller, display, notifier) = build(gateway);

    let outcome = controller.search("xyzabc").await;

    assert_eq!(outcome, SearchOutcome::Failed(SearchError::NotFound));
    assert_eq!(display.all(), vec!["Loading...".to_string(), "Country not found".to_string()]);
    assert!(notifier.all().is_empty());
    assert_eq!(controller.state(), SearchState::NotFound);
}

#[tokio::test]
async fn test_http_failure_shows_error_and_notifies() {
    let gateway = Arc::new(ScriptedGateway::default().with("atlantis", Err(GatewayError::Status { status: 404 })));
    let (controller, display, notifier) = build(gateway);

    let outcome = controller.search("atlantis").await;

    assert_eq!(outcome, SearchOutcome::Failed(SearchError::HttpError { status: 404 }));
    assert_eq!(display.last().as_deref(), Some("Error: Country not found"));
    assert_eq!(notifier.all(), vec!["Failed to fetch data".to_string()]);
    assert_eq!(controller.state(), SearchState::HttpError);
}

#[tokio::test]
async fn test_transport_failure_notifies_with_cause() {
    let gateway = Arc::new(ScriptedGateway::default().with(
        "france",
        Err(GatewayError::Transport {
            message: "dns error: no such host".to_string(),
        }),
    ));
    let (controller, display, notifier) = build(gateway);

    controller.search("france").await;

    assert_eq!(display.last().as_deref(), Some("Network error. Please check your connection."));
    let messages = notifier.all();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("dns error: no such host"));
    assert_eq!(controller.state(), SearchState::TransportError);
}

#[tokio::test]
async fn test_new_search_after_failure_recovers() {
    let gateway = Arc::new(
        ScriptedGateway::default()
            .with("atlantis", Err(GatewayError::Status { status: 500 }))
            .with("peru", Ok(vec![peru()])),
    );
    let (controller, display, _) = build(gateway);

    controller.search("atlantis").await;
    controller.search("peru").await;

    assert!(display.last().unwrap().starts_with("Country: Peru"));
    assert_eq!(controller.state(), SearchState::Displayed);
}

#[tokio::test]
async fn test_stale_completion_does_not_overwrite_newer_result() {
    let gateway = Arc::new(GatedGateway::default());
    let france_gate = gateway.gate("france");
    let peru_gate = gateway.gate("peru");
    let (controller, display, notifier) = build(gateway);

    let first = controller.submit("france").unwrap();
    let second = controller.submit("peru").unwrap();
    assert_eq!(controller.state(), SearchState::Loading);
    assert_eq!(display.last().as_deref(), Some("Loading..."));

    peru_gate.send(Ok(vec![peru()])).unwrap();
    assert_eq!(second.await.unwrap(), SearchOutcome::Displayed(peru()));

    france_gate.send(Err(GatewayError::Status { status: 500 })).unwrap();
    assert_eq!(first.await.unwrap(), SearchOutcome::Discarded);

    assert!(display.last().unwrap().starts_with("Country: Peru"));
    assert!(notifier.all().is_empty());
    assert_eq!(controller.state(), SearchState::Displayed);
}

#[tokio::test]
async fn test_blank_search_supersedes_lookup_in_flight() {
    let gateway = Arc::new(GatedGateway::default());
    let france_gate = gateway.gate("france");
    let (controller, display, notifier) = build(gateway);

    let pending = controller.submit("france").unwrap();
    assert_eq!(controller.state(), SearchState::Loading);

    let outcome = controller.search("   ").await;
    assert_eq!(outcome, SearchOutcome::Failed(SearchError::EmptyInput));
    assert_eq!(controller.state(), SearchState::Idle);

    france_gate.send(Ok(vec![france()])).unwrap();
    assert_eq!(pending.await.unwrap(), SearchOutcome::Discarded);

    assert_eq!(display.last().as_deref(), Some("Please enter a country name"));
    assert!(notifier.all().is_empty());
    assert_eq!(controller.state(), SearchState::Idle);
}

#[tokio::test]
async fn test_teardown_aborts_submitted_lookup() {
    let gateway = Arc::new(GatedGateway::default());
    let france_gate = gateway.gate("france");
    let (controller, display, _) = build(gateway);

    let handle = controller.submit("france").unwrap();
    controller.teardown();
    let _ = france_gate.send(Ok(vec![france()]));

    assert!(handle.await.unwrap_err().is_cancelled());
    assert!(controller.is_torn_down());
    assert_eq!(display.all(), vec!["Loading...".to_string()]);
}

#[tokio::test]
async fn test_completion_after_teardown_is_dropped() {
    let gateway = Arc::new(GatedGateway::default());
    let france_gate = gateway.gate("france");
    let (controller, display, notifier) = build(gateway);

    let release = async {
        tokio::task::yield_now().await;
        controller.teardown();
        france_gate.send(Err(GatewayError::Status { status: 404 })).unwrap();
    };
    let (outcome, ()) = tokio::join!(controller.search("france"), release);

    assert_eq!(outcome, SearchOutcome::Discarded);
    assert_eq!(display.all(), vec!["Loading...".to_string()]);
    assert!(notifier.all().is_empty());
}
