use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

struct MockState {
    base_url: String,
    routes: HashMap<String, (StatusCode, String)>,
    requests: Mutex<Vec<String>>,
}

/// Local stand-in for api.github.com serving canned bodies by path.
/// Unknown paths answer 404. `{base}` in a body is replaced by the mock's
/// own base URL.
pub struct MockGitHub {
    pub base_url: String,
    state: Arc<MockState>,
}

#[derive(Default)]
pub struct MockGitHubBuilder {
    routes: HashMap<String, (StatusCode, String)>,
}

impl MockGitHubBuilder {
    pub fn ok(mut self, path: &str, body: impl Into<String>) -> Self {
        self.routes
            .insert(path.to_string(), (StatusCode::OK, body.into()));
        self
    }

    pub fn status(mut self, path: &str, status: StatusCode) -> Self {
        self.routes
            .insert(path.to_string(), (status, r#"{"message":"error"}"#.to_string()));
        self
    }

    pub async fn start(self) -> anyhow::Result<MockGitHub> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let state = Arc::new(MockState {
            base_url: base_url.clone(),
            routes: self.routes,
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(respond).with_state(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(MockGitHub { base_url, state })
    }
}

impl MockGitHub {
    pub fn builder() -> MockGitHubBuilder {
        MockGitHubBuilder::default()
    }

    /// Requests received so far, as `path?query`.
    pub fn requests(&self) -> Vec<String> {
        self.state
            .requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

async fn respond(State(state): State<Arc<MockState>>, uri: Uri) -> (StatusCode, String) {
    if let Ok(mut requests) = state.requests.lock() {
        requests.push(uri.path_and_query().map(ToString::to_string).unwrap_or_default());
    }
    match state.routes.get(uri.path()) {
        Some((status, body)) => (*status, body.replace("{base}", &state.base_url)),
        None => (StatusCode::NOT_FOUND, r#"{"message":"Not Found"}"#.to_string()),
    }
}
