use aggregate_fetch::mock::MockHttpClient;
use aggregate_fetch::{
    AggregateFetcher, FetchActor, FetchError, NormalizedValue, Phase, RequestSet, ResourceRegistry,
};
use serde_json::json;
use std::collections::BTreeSet;
use std::time::Duration;

fn landing_registry() -> ResourceRegistry {
    ResourceRegistry::new()
        .singular("hero")
        .singular("about")
        .plural("whatWeDo")
        .plural("products")
}

fn landing_requests() -> RequestSet {
    RequestSet::new()
        .with("hero", "/hero")
        .and_then(|s| s.with("about", "/about"))
        .and_then(|s| s.with("whatWeDo", "/what-we-do"))
        .unwrap()
}

/// hero resolves, about rejects, whatWeDo resolves double-nested.
#[tokio::test]
async fn test_partial_failure_scenario() {
    let mut mock = MockHttpClient::new();
    mock.expect_get("/hero").return_ok(json!({ "data": { "name": "X" } }));
    mock.expect_get("/about").return_err(FetchError::Transport {
        url: "/about".into(),
        message: "dns error".into(),
    });
    mock.expect_get("/what-we-do")
        .return_ok(json!({ "data": { "data": [{ "id": 1 }, { "id": 2 }] } }));

    let mut fetcher = AggregateFetcher::new(mock.clone(), landing_registry());
    let result = fetcher.fetch(&landing_requests()).await;

    assert_eq!(result.values.len(), 2);
    assert_eq!(result.values["hero"], NormalizedValue::Record(json!({ "name": "X" })));
    assert_eq!(
        result.values["whatWeDo"],
        NormalizedValue::List(vec![json!({ "id": 1 }), json!({ "id": 2 })])
    );
    assert_eq!(result.failed_keys, BTreeSet::from(["about".to_string()]));
    assert!(!fetcher.state().is_loading());
    mock.verify();
}

#[tokio::test]
async fn test_every_request_rejects() {
    let mut mock = MockHttpClient::new();
    mock.expect_get("/hero").return_status(500);
    mock.expect_get("/about").return_status(502);
    mock.expect_get("/what-we-do").return_err(FetchError::Timeout {
        url: "/what-we-do".into(),
    });

    let mut fetcher = AggregateFetcher::new(mock, landing_registry());
    let result = fetcher.fetch(&landing_requests()).await;

    assert!(result.values.is_empty());
    let expected: BTreeSet<String> = landing_requests().keys().map(String::from).collect();
    assert_eq!(result.failed_keys, expected);
    assert_eq!(fetcher.state().phase, Phase::Settled);
}

/// Whatever order the requests settle in, the result is the same and the
/// success and failure sets never overlap.
#[tokio::test]
async fn test_result_is_independent_of_completion_order() {
    let delays = [[0u64, 10, 20], [20, 10, 0], [10, 0, 20]];
    let mut results = Vec::new();

    for [hero, about, what] in delays {
        let mut mock = MockHttpClient::new();
        mock.expect_get("/hero")
            .with_delay(Duration::from_millis(hero))
            .return_ok(json!({ "title": "Solar" }));
        mock.expect_get("/about")
            .with_delay(Duration::from_millis(about))
            .return_status(503);
        mock.expect_get("/what-we-do")
            .with_delay(Duration::from_millis(what))
            .return_ok(json!({ "data": [{ "id": 4 }] }));

        let mut fetcher = AggregateFetcher::new(mock, landing_registry());
        let result = fetcher.fetch(&landing_requests()).await;

        let succeeded: BTreeSet<_> = result.values.keys().cloned().collect();
        assert!(succeeded.is_disjoint(&result.failed_keys));
        assert_eq!(succeeded.len() + result.failed_keys.len(), 3);
        results.push(result);
    }

    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_plural_single_nesting_through_fetch() {
    let mut mock = MockHttpClient::new();
    mock.expect_get("/products").return_ok(json!({ "data": [{ "id": 9 }] }));

    let mut fetcher = AggregateFetcher::new(mock, landing_registry());
    let result = fetcher
        .fetch(&RequestSet::new().with("products", "/products").unwrap())
        .await;

    assert_eq!(
        result.values["products"],
        NormalizedValue::List(vec![json!({ "id": 9 })])
    );
}

/// Loading is published once per cycle and is followed by exactly one Settled.
#[tokio::test]
async fn test_phase_sequence_across_two_cycles() {
    let mut mock = MockHttpClient::new();
    for _ in 0..2 {
        mock.expect_get("/hero")
            .with_delay(Duration::from_millis(15))
            .return_ok(json!({ "title": "Solar" }));
    }

    let fetcher = AggregateFetcher::new(mock, landing_registry());
    let mut rx = fetcher.subscribe();
    let (actor, handle) = FetchActor::new(fetcher, RequestSet::new().with("hero", "/hero").unwrap(), 4);
    tokio::spawn(actor.run());

    let observer = tokio::spawn(async move {
        let mut seen = Vec::new();
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            seen.push((state.cycle, state.phase));
            if state.cycle == 2 && state.phase == Phase::Settled {
                break;
            }
        }
        seen
    });

    handle.refresh().await.unwrap();
    // Let the observer record the first Settled before the next cycle starts.
    tokio::time::sleep(Duration::from_millis(5)).await;
    handle.refresh().await.unwrap();

    let seen = observer.await.unwrap();
    assert_eq!(
        seen,
        vec![
            (1, Phase::Loading),
            (1, Phase::Settled),
            (2, Phase::Loading),
            (2, Phase::Settled),
        ]
    );
}
