//! Pluggable request transports.

use crate::{FetchError, Method, RequestBuilder, Response};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;

/// Something that can carry a request to a server and bring back the reply.
///
/// Transports return every reply, whatever its status; turning non-2xx
/// into errors is the caller's decision.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Transport backed by a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing client, keeping its connection pool and settings.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let mut builder = self
            .client
            .request(reqwest_method(request.method), &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(method = %request.method, url = %request.url, status, "http");
        Ok(Response::new(status, headers, body))
    }
}

type RouteKey = (Method, String);

/// In-memory transport answering from canned replies.
///
/// Routes match on method and the URL path (scheme, host and query are
/// ignored). Each route holds a queue; the last reply is repeated once the
/// queue is down to one. Unrouted requests fail as if the server were down.
/// Every request is recorded for later inspection.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<RouteKey, VecDeque<Result<Response, FetchError>>>>,
    requests: Mutex<Vec<RequestBuilder>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `method path`.
    pub fn route(self, method: Method, path: &str, reply: Result<Response, FetchError>) -> Self {
        self.routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Queue a JSON reply.
    pub fn json(self, method: Method, path: &str, status: u16, body: serde_json::Value) -> Self {
        self.route(method, path, Ok(Response::from_json(status, &body)))
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<RequestBuilder> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

fn url_path(url: &str) -> &str {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme
        .find('/')
        .map_or("/", |i| &without_scheme[i..]);
    path.split('?').next().unwrap_or(path)
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let key = (request.method, url_path(&request.url).to_string());
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::RequestError("empty route".into()))),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(FetchError::RequestError("empty route".into()))),
            None => Err(FetchError::RequestError(format!(
                "connection refused: {} {}",
                key.0, key.1
            ))),
        }
    }
}
