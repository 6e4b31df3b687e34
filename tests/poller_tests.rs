use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use craft_hub::api::ApiClient;
use craft_hub::config::Config;
use craft_hub::fetch::{Poller, Transport};
use craft_hub::views::votes::VoteArchive;

#[derive(Clone, Default)]
struct Hits {
    kills: Arc<AtomicUsize>,
    last_month: Arc<AtomicUsize>,
    flaky: Arc<AtomicUsize>,
    slow: Arc<AtomicUsize>
}

/// Local stand-in for the upstream APIs, with per-route request counters.
async fn spawn_upstream(hits: Hits) -> SocketAddr {
    let kills = Arc::clone(&hits.kills);
    let last_month = Arc::clone(&hits.last_month);
    let flaky = Arc::clone(&hits.flaky);
    let slow = Arc::clone(&hits.slow);

    let app = Router::new()
        .route("/api/stats/playerkills", get(move || {
            let kills = Arc::clone(&kills);
            async move {
                kills.fetch_add(1, Ordering::SeqCst);
                Json(json!([
                    { "uuid": "u1", "username": "Steve", "kills": 40 },
                    { "uuid": "u2", "username": "Alex", "kills": 12 }
                ]))
            }
        }))
        .route("/api/votes/lastmonth", get(move || {
            let last_month = Arc::clone(&last_month);
            async move {
                last_month.fetch_add(1, Ordering::SeqCst);
                Json(json!([
                    {
                        "uuid": "u1", "username": "Steve",
                        "lastMonthVotes": 31, "currentMonth": 4, "allTime": 120,
                        "streak": { "current": 2, "best": 9 }, "points": 55
                    }
                ]))
            }
        }))
        .route("/flaky", get(move || {
            let flaky = Arc::clone(&flaky);
            async move {
                if flaky.fetch_add(1, Ordering::SeqCst) == 0 {
                    Json(json!({ "value": 1 })).into_response()
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }))
        .route("/slow", get(move || {
            let slow = Arc::clone(&slow);
            async move {
                slow.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(300)).await;
                Json(json!({ "value": 2 }))
            }
        }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::task::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(Config {
        stats_api_base: format!("http://{}", addr),
        plan_api_base: format!("http://{}/v1", addr),
        status_api_url: format!("http://{}/status", addr),
        widget_url: format!("http://{}/widget.json", addr),
        poll_interval_secs: 30,
        status_interval_secs: 10,
        plan_interval_secs: 60
    })
}

#[tokio::test]
async fn absent_locator_reports_not_loading_without_network() {
    let poller: Poller<Value> = Poller::spawn(
        Arc::new(Transport::new()),
        None,
        Duration::from_millis(50)
    );

    tokio::time::sleep(Duration::from_millis(150)).await;

    let snapshot = poller.snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.data.is_none());
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn unknown_category_fails_locally_without_network() {
    let hits = Hits::default();
    let addr = spawn_upstream(hits.clone()).await;
    let client = client_for(addr);

    let poller = client.leaderboard_by_key("bedwars");
    let snapshot = poller.snapshot();

    assert!(!snapshot.loading);
    assert!(snapshot.data.is_none());
    assert!(snapshot.error.unwrap().cause.contains("Unknown leaderboard category"));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(hits.kills.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn poller_reissues_on_schedule() {
    let hits = Hits::default();
    let addr = spawn_upstream(hits.clone()).await;

    let poller: Poller<Vec<Value>> = Poller::spawn(
        Arc::new(Transport::new()),
        Some(format!("http://{}/api/stats/playerkills", addr)),
        Duration::from_millis(50)
    );

    tokio::time::sleep(Duration::from_millis(220)).await;

    // One immediate round plus at least two timer-driven ones.
    assert!(hits.kills.load(Ordering::SeqCst) >= 3);

    let snapshot = poller.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.data.unwrap().len(), 2);
}

#[tokio::test]
async fn refetch_issues_an_out_of_cycle_round() {
    let hits = Hits::default();
    let addr = spawn_upstream(hits.clone()).await;

    let poller: Poller<Vec<Value>> = Poller::spawn(
        Arc::new(Transport::new()),
        Some(format!("http://{}/api/stats/playerkills", addr)),
        Duration::from_secs(30)
    );

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(hits.kills.load(Ordering::SeqCst), 1);

    poller.refetch().await;
    poller.refetch().await;

    assert_eq!(hits.kills.load(Ordering::SeqCst), 3);
    assert!(poller.snapshot().data.is_some());
}

#[tokio::test]
async fn failed_round_keeps_previous_snapshot() {
    let hits = Hits::default();
    let addr = spawn_upstream(hits.clone()).await;

    let poller: Poller<Value> = Poller::spawn(
        Arc::new(Transport::new()),
        Some(format!("http://{}/flaky", addr)),
        Duration::from_millis(50)
    );

    tokio::time::sleep(Duration::from_millis(220)).await;

    // First round succeeded, every later one returned 500.
    assert!(hits.flaky.load(Ordering::SeqCst) >= 2);

    let snapshot = poller.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.data.unwrap().as_ref(), &json!({ "value": 1 }));
    assert!(snapshot.error.unwrap().cause.contains("500"));
}

#[tokio::test]
async fn teardown_suppresses_late_results() {
    let hits = Hits::default();
    let addr = spawn_upstream(hits.clone()).await;

    let poller: Poller<Value> = Poller::spawn(
        Arc::new(Transport::new()),
        Some(format!("http://{}/slow", addr)),
        Duration::from_secs(30)
    );
    let reader = poller.reader();

    // Let the first request get in flight, then tear the poller down while
    // the response is still pending.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(hits.slow.load(Ordering::SeqCst), 1);
    drop(poller);

    tokio::time::sleep(Duration::from_millis(500)).await;

    let snapshot = reader.snapshot();
    assert!(snapshot.data.is_none());
    assert!(snapshot.error.is_none());
    assert_eq!(hits.slow.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn prior_month_archive_fetches_once_per_session() {
    let hits = Hits::default();
    let addr = spawn_upstream(hits.clone()).await;
    let client = client_for(addr);

    let archive = VoteArchive::new();

    let first = archive.prior_month(&client).await.unwrap();
    let second = archive.prior_month(&client).await.unwrap();

    // A later view sharing the archive sees the same settled rows.
    let shared = archive.clone();
    let third = shared.prior_month(&client).await.unwrap();

    assert_eq!(hits.last_month.load(Ordering::SeqCst), 1);
    assert_eq!(first.as_ref(), second.as_ref());
    assert_eq!(first.as_ref(), third.as_ref());
    assert_eq!(first[0].votes, 31);
}
