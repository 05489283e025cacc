use axum::{
    body::Body,
    extract::State,
    http::{Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::TcpListener;

/// Canned upstream: answers every request with the next scripted response,
/// repeating the last one once the script runs out
#[derive(Clone)]
pub struct StubUpstream {
    script: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
    hits: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<String>>>,
}

impl StubUpstream {
    pub fn new(script: Vec<(StatusCode, String)>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            hits: Arc::new(AtomicUsize::new(0)),
            paths: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().clone()
    }

    fn next_response(&self) -> (StatusCode, String) {
        let mut script = self.script.lock();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script
                .front()
                .cloned()
                .unwrap_or((StatusCode::NOT_FOUND, String::new()))
        }
    }

    /// Serve on an ephemeral local port and return the base URL
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .fallback(stub_handler)
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }
}

async fn stub_handler(
    State(stub): State<StubUpstream>,
    request: axum::extract::Request,
) -> Response<Body> {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    let uri = request.uri();
    let path = match uri.query() {
        Some(query) => format!("{}?{}", uri.path(), query),
        None => uri.path().to_string(),
    };
    stub.paths.lock().push(path);

    let (status, body) = stub.next_response();
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Base URL nothing is listening on
#[allow(dead_code)]
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Collect a response body into JSON
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub fn profiles_body(profiles: serde_json::Value) -> String {
    serde_json::json!({ "count": profiles.as_array().map(|a| a.len()).unwrap_or(0), "profiles": profiles })
        .to_string()
}
