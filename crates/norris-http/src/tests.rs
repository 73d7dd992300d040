//! Client tests against a local axum server.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex},
  time::Duration,
};

use axum::{Router, extract::Query, http::{HeaderMap, StatusCode}, routing::get};
use norris_core::error::NetworkError;

use crate::{
  Connectivity, Endpoint, FactsApi, HttpClient, Transport, fixtures, wire,
};

async fn serve() -> String {
  let router = Router::new()
    .route("/jokes/categories", get(|| async { fixtures::CATEGORIES }))
    .route(
      "/jokes/search",
      get(|Query(params): Query<HashMap<String, String>>| async move {
        params.get("query").cloned().unwrap_or_default()
      }),
    )
    .route(
      "/jokes/broken",
      get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    )
    .route(
      "/jokes/header",
      get(|headers: HeaderMap| async move {
        headers
          .get("x-norris")
          .and_then(|v| v.to_str().ok())
          .unwrap_or("missing")
          .to_owned()
      }),
    )
    .route(
      "/jokes/slow",
      get(|| async {
        tokio::time::sleep(Duration::from_secs(30)).await;
        "late"
      }),
    );

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
  format!("http://{addr}/jokes")
}

fn client() -> HttpClient { HttpClient::new(Connectivity::online()).unwrap() }

struct Route {
  base: String,
  path: &'static str,
}

impl Endpoint for Route {
  fn base_url(&self) -> &str { &self.base }

  fn path(&self) -> String { self.path.to_owned() }
}

// ─── Exchanges ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn fetches_categories() {
  let api = FactsApi::new(serve().await);
  let response = client().execute(&api.categories()).await.unwrap();

  assert_eq!(response.status_code, 200);
  assert_eq!(wire::decode_categories(&response.body).unwrap().len(), 16);
}

#[tokio::test]
async fn search_term_is_query_encoded() {
  let api = FactsApi::new(serve().await);
  let response = client().execute(&api.search("chuck & norris?")).await.unwrap();
  assert_eq!(&response.body[..], b"chuck & norris?");
}

#[tokio::test]
async fn error_statuses_are_still_responses() {
  let base = serve().await;
  let response = client().execute(&Route { base, path: "/broken" }).await.unwrap();
  assert_eq!(response.status_code, 500);
  assert_eq!(&response.body[..], b"boom");
}

#[tokio::test]
async fn unparseable_url_is_unknown() {
  let err = client().execute(&FactsApi::new("not a url").categories()).await.unwrap_err();
  assert_eq!(err, NetworkError::Unknown(None));
}

#[tokio::test]
async fn refused_connection_is_unknown() {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let api = FactsApi::new(format!("http://{addr}/jokes"));
  let err = client().execute(&api.categories()).await.unwrap_err();
  assert_eq!(err, NetworkError::Unknown(None));
}

// ─── Connectivity and sample data ────────────────────────────────────────────

#[tokio::test]
async fn offline_fails_without_sending() {
  let api = FactsApi::new(serve().await);
  let client = HttpClient::new(Connectivity::offline()).unwrap();

  let err = client.execute(&api.categories()).await.unwrap_err();
  assert_eq!(err, NetworkError::NoInternetConnection);
}

#[tokio::test]
async fn sample_data_bypasses_network_and_connectivity() {
  let api = FactsApi::new("http://127.0.0.1:1/jokes").with_stubs(crate::ApiStubs::fixtures());
  let client = HttpClient::new(Connectivity::offline()).unwrap();

  let response = client.execute(&api.search("sport")).await.unwrap();
  assert_eq!(response.status_code, 200);
  assert_eq!(wire::decode_search(&response.body).unwrap().facts.len(), 4);
}

#[tokio::test]
async fn shared_reachability_gates_requests() {
  let api = FactsApi::new(serve().await);
  let shared: Arc<dyn crate::Reachability> = Arc::new(Connectivity::offline());
  let client = HttpClient::new(shared).unwrap();

  let err = client.execute(&api.categories()).await.unwrap_err();
  assert_eq!(err, NetworkError::NoInternetConnection);
}

#[tokio::test]
async fn connectivity_can_change_at_runtime() {
  let api = FactsApi::new(serve().await);
  let connectivity = Connectivity::offline();
  let client = HttpClient::new(connectivity.clone()).unwrap();

  assert!(client.execute(&api.categories()).await.is_err());
  connectivity.set_online(true);
  assert!(client.execute(&api.categories()).await.is_ok());
}

// ─── Hooks ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn hooks_see_request_and_response() {
  let base = serve().await;
  let seen: Arc<Mutex<Vec<u16>>> = Arc::default();
  let sink = seen.clone();

  let client = client()
    .on_request(|req| {
      req.headers_mut().insert("x-norris", "roundhouse".parse().unwrap());
    })
    .on_response(move |res: &reqwest::Response| sink.lock().unwrap().push(res.status().as_u16()));

  let response = client.execute(&Route { base, path: "/header" }).await.unwrap();
  assert_eq!(&response.body[..], b"roundhouse");
  assert_eq!(*seen.lock().unwrap(), vec![200]);
}

#[tokio::test]
async fn response_hook_runs_before_a_truncated_body() {
  use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
      let n = socket.read(&mut buf).await.unwrap();
      if n == 0 {
        return;
      }
      request.extend_from_slice(&buf[..n]);
    }
    socket
      .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 100\r\n\r\npartial")
      .await
      .unwrap();
    socket.shutdown().await.unwrap();
  });

  let seen: Arc<Mutex<Vec<u16>>> = Arc::default();
  let sink = seen.clone();
  let client = client()
    .on_response(move |res: &reqwest::Response| sink.lock().unwrap().push(res.status().as_u16()));

  let err = client
    .execute(&Route { base: format!("http://{addr}"), path: "/cut" })
    .await
    .unwrap_err();
  assert_eq!(err, NetworkError::ConnectionError);
  assert_eq!(*seen.lock().unwrap(), vec![200]);
}

// ─── Cancellation ────────────────────────────────────────────────────────────

#[tokio::test]
async fn cancelled_request_has_no_outcome() {
  let base = serve().await;
  let handle = client().send(Route { base, path: "/slow" });

  handle.cancel();
  assert!(handle.outcome().await.is_none());
}

#[tokio::test]
async fn cancel_after_completion_is_a_no_op() {
  let api = FactsApi::new(serve().await);
  let handle = client().send(api.categories());

  while !handle.is_finished() {
    tokio::time::sleep(Duration::from_millis(5)).await;
  }
  handle.cancel();

  let response = handle.outcome().await.unwrap().unwrap();
  assert_eq!(response.status_code, 200);
}
