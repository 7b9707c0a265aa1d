use std::sync::{Arc, Mutex};

use futures::StreamExt;
use gemlist_runtime::{
    Config, EndpointConfig, FetchError, FetchRequest, Fetcher, ListingEvent, ListingSession,
    LoadState, Method, RecentSearches, Resolution,
};
use gemlist_testing::assertions::assert_query_pairs;
use gemlist_testing::{ScriptedFetcher, fixtures};
use gemlist_types::{CatalogKind, Facet, NormalizedItem, ParamValue};
use serde_json::Value;

fn session(
    config: Config,
    kind: CatalogKind,
) -> (ListingSession<ScriptedFetcher>, Arc<ScriptedFetcher>) {
    let fetcher = Arc::new(ScriptedFetcher::new());
    let session = ListingSession::with_shared_fetcher(config, kind, Arc::clone(&fetcher));
    (session, fetcher)
}

async fn wait_for_requests(fetcher: &ScriptedFetcher, count: usize) {
    while fetcher.request_count() < count {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_load_normalizes_first_page() {
    let (mut session, fetcher) = session(Config::default(), CatalogKind::SINGLE_DIAMONDS);
    fetcher.respond(fixtures::diamond_listing());

    let update = session.load().await.unwrap();
    assert_eq!(update.resolution, Resolution::Applied);
    assert_eq!(update.view.state, LoadState::Success);
    assert_eq!(update.view.items.len(), 2);
    assert_eq!(update.view.pagination.total, 2);
    assert!(!session.is_loading());

    let NormalizedItem::Diamond(first) = &update.view.items[0] else {
        panic!("expected a diamond");
    };
    assert_eq!(first.price, 12500.0);
    assert_eq!(first.images.len(), 2);

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/diamonds");
    assert_eq!(requests[0].method, Method::Get);
    assert_query_pairs(&requests[0].params, &[("page", "1"), ("limit", "20")]).unwrap();
}

#[tokio::test]
async fn test_superseded_request_never_lands() {
    let (mut session, fetcher) = session(Config::default(), CatalogKind::SINGLE_DIAMONDS);
    let slow = fetcher.gate();
    let fast = fetcher.gate();

    let first = session.apply(ListingEvent::Page(2)).unwrap();
    wait_for_requests(&fetcher, 1).await;
    let second = session.apply(ListingEvent::Page(3)).unwrap();
    assert!(second > first);
    wait_for_requests(&fetcher, 2).await;

    fast.respond(fixtures::paged_listing(&[41, 42], 3, 20, 60));
    slow.respond(fixtures::paged_listing(&[21, 22], 2, 20, 60));

    let update = session.next_update().await.expect("an update");
    assert_eq!(update.seq, second);
    assert_eq!(update.view.pagination.page, 3);
    let ids: Vec<&str> = update.view.items.iter().map(|item| item.id()).collect();
    assert_eq!(ids, vec!["41", "42"]);

    // nothing else is in flight, so the late response is gone for good
    assert!(session.next_update().await.is_none());
    assert_eq!(session.view().pagination.page, 3);
}

#[tokio::test]
async fn test_retry_after_failure_repeats_params() {
    let (mut session, fetcher) = session(Config::default(), CatalogKind::SINGLE_GEMSTONES);
    fetcher
        .fail(FetchError::Status {
            code: 503,
            body: "maintenance".to_string(),
        })
        .respond(fixtures::gemstone_listing());

    session
        .apply(ListingEvent::Sort(Some("price_asc".to_string())))
        .unwrap();
    let failed = session.next_update().await.expect("an update");
    assert_eq!(failed.resolution, Resolution::Failed);
    assert_eq!(failed.view.state, LoadState::Error);
    assert_eq!(failed.view.error.as_deref(), Some("http 503: maintenance"));

    session.apply(ListingEvent::Retry).unwrap();
    let applied = session.next_update().await.expect("an update");
    assert_eq!(applied.resolution, Resolution::Applied);
    assert_eq!(applied.view.error, None);
    assert_eq!(applied.view.items.len(), 1);

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].params, requests[1].params);
    assert_eq!(
        requests[1].params.get("sort"),
        Some(&ParamValue::text("price_asc"))
    );
}

struct PanickingFetcher;

impl Fetcher for PanickingFetcher {
    async fn fetch(&self, _request: FetchRequest) -> Result<Value, FetchError> {
        panic!("connection pool poisoned");
    }
}

#[tokio::test]
async fn test_panicked_fetch_resolves_as_transport_error() {
    let mut session = ListingSession::new(
        Config::default(),
        CatalogKind::WATCHES,
        PanickingFetcher,
    );

    let update = session.load().await.unwrap();
    assert_eq!(update.resolution, Resolution::Failed);
    assert_eq!(update.view.state, LoadState::Error);
    assert_eq!(
        update.view.error.as_deref(),
        Some("network error: fetch task failed")
    );
    assert!(!session.is_loading());
    assert!(session.next_update().await.is_none());
}

#[tokio::test]
async fn test_kind_change_clears_items_before_fetching() {
    let (mut session, fetcher) = session(Config::default(), CatalogKind::SINGLE_DIAMONDS);
    fetcher
        .respond(fixtures::diamond_listing())
        .respond(fixtures::watch_listing());

    session.load().await.unwrap();
    assert_eq!(session.view().items.len(), 2);

    session.apply(ListingEvent::Kind(CatalogKind::WATCHES)).unwrap();
    let pending = session.view();
    assert!(pending.items.is_empty());
    assert_eq!(pending.state, LoadState::Loading);
    assert_eq!(pending.kind, CatalogKind::WATCHES);

    let update = session.next_update().await.expect("an update");
    assert_eq!(update.view.items.len(), 1);
    assert_eq!(update.view.items[0].title(), "Omega Speedmaster 311.30.42.30.01.005 2019");
    assert_eq!(fetcher.requests()[1].path, "/watches");
}

#[tokio::test]
async fn test_endpoint_overrides_reach_the_fetcher() {
    let mut config = Config::default();
    config.endpoints.insert(
        "watches".to_string(),
        EndpointConfig {
            path: Some("/v2/watches/search".to_string()),
            method: Some(Method::Post),
            page_key: Some("pageNumber".to_string()),
            ..Default::default()
        },
    );
    let (mut session, fetcher) = session(config, CatalogKind::WATCHES);
    fetcher.respond(fixtures::watch_listing());

    let mut filters = session.view().filters;
    filters.toggle(Facet::Brand, "Omega").unwrap();
    session.apply(ListingEvent::Filters(filters)).unwrap();
    session.next_update().await.expect("an update");

    let request = &fetcher.requests()[0];
    assert_eq!(request.path, "/v2/watches/search");
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.params.get("brand"), Some(&ParamValue::text("Omega")));
    assert_eq!(request.params.get("pageNumber"), Some(&ParamValue::Integer(1)));
    assert!(!request.params.contains_key("page"));
}

#[tokio::test]
async fn test_rejected_envelope_keeps_previous_items() {
    let (mut session, fetcher) = session(Config::default(), CatalogKind::SINGLE_DIAMONDS);
    fetcher
        .respond(fixtures::diamond_listing())
        .respond(fixtures::rejected("rate limited"));

    session.load().await.unwrap();
    let update = session.load().await.unwrap();

    assert_eq!(update.resolution, Resolution::Failed);
    assert_eq!(update.view.items.len(), 2);
    assert_eq!(
        update.view.error.as_deref(),
        Some("request rejected: rate limited")
    );
}

#[tokio::test]
async fn test_stream_yields_updates_and_records_searches() {
    let recent = Arc::new(Mutex::new(RecentSearches::new(5)));
    let (session, fetcher) = session(Config::default(), CatalogKind::SINGLE_GEMSTONES);
    let mut session = session.with_recorder(Box::new(Arc::clone(&recent)));
    fetcher.respond(fixtures::gemstone_listing());

    let mut filters = session.view().filters;
    filters.set_text(Facet::Search, "  padparadscha ").unwrap();
    session.apply(ListingEvent::Filters(filters)).unwrap();

    let update = session.next().await.expect("an update");
    assert_eq!(update.resolution, Resolution::Applied);
    assert_eq!(recent.lock().unwrap().terms(), &["padparadscha"]);
}
