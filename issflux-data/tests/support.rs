//! In-process HTTP server recording the requests it receives.

use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, mpsc};
use std::thread::JoinHandle;
use tokio::sync::oneshot;

/// A request as observed by [`TestServer`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Serves a canned response to every request on an ephemeral local port.
pub struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

fn header(request: &Request<Body>, name: &str) -> Option<String> {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

async fn capture(
    request: Request<Body>,
    log: Arc<Mutex<Vec<CapturedRequest>>>,
    status: u16,
    reply: &'static str,
) -> Result<Response<Body>, Infallible> {
    let method = request.method().to_string();
    let path = request.uri().path().to_owned();
    let query = request.uri().query().map(str::to_owned);
    let authorization = header(&request, "authorization");
    let content_type = header(&request, "content-type");
    let bytes = hyper::body::to_bytes(request.into_body())
        .await
        .unwrap_or_else(|err| panic!("failed to read request body: {err}"));
    log.lock()
        .unwrap_or_else(|err| panic!("request log poisoned: {err}"))
        .push(CapturedRequest {
            method,
            path,
            query,
            authorization,
            content_type,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(reply))
        .unwrap_or_else(|err| panic!("failed to build response: {err}"));
    Ok(response)
}

impl TestServer {
    /// Answer every request with `status` and `reply`.
    pub fn start(status: u16, reply: &'static str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        let (addr_tx, addr_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap_or_else(|err| panic!("failed to build server runtime: {err}"));
            runtime.block_on(async move {
                let make_service = make_service_fn(move |_conn| {
                    let log = Arc::clone(&log);
                    async move {
                        Ok::<_, Infallible>(service_fn(move |request| {
                            capture(request, Arc::clone(&log), status, reply)
                        }))
                    }
                });
                let server =
                    Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make_service);
                addr_tx
                    .send(server.local_addr())
                    .unwrap_or_else(|err| panic!("failed to publish server address: {err}"));
                server
                    .with_graceful_shutdown(async {
                        shutdown_rx.await.ok();
                    })
                    .await
                    .unwrap_or_else(|err| panic!("test server failed: {err}"));
            });
        });

        let addr = addr_rx
            .recv()
            .unwrap_or_else(|err| panic!("test server did not start: {err}"));
        Self {
            addr,
            requests,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|err| panic!("request log poisoned: {err}"))
            .clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
        if let Some(thread) = self.thread.take() {
            thread.join().ok();
        }
    }
}
