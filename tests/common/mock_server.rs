//! A local HTTP server standing in for the chat-completions endpoint.

use std::io::Read;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    /// A 200 whose single choice carries `content`.
    pub fn completion(content: &str) -> Self {
        let body = serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        });
        Self::new(200, &body.to_string())
    }
}

/// What the server saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

pub struct MockServer {
    pub base_url: String,
    stop_tx: mpsc::Sender<()>,
    requests_rx: mpsc::Receiver<RecordedRequest>,
}

impl MockServer {
    /// Serve `response` to every request until dropped.
    pub fn start(response: MockResponse) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("Failed to start test server");
        let port = server.server_addr().to_ip().unwrap().port();
        let base_url = format!("http://127.0.0.1:{}/v1", port);

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (requests_tx, requests_rx) = mpsc::channel::<RecordedRequest>();

        thread::spawn(move || loop {
            if stop_rx.try_recv().is_ok() {
                break;
            }

            match server.recv_timeout(Duration::from_millis(100)) {
                Ok(Some(mut request)) => {
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);
                    let authorization = request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Authorization"))
                        .map(|h| h.value.as_str().to_string());
                    let _ = requests_tx.send(RecordedRequest {
                        url: request.url().to_string(),
                        authorization,
                        body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
                    });

                    let reply = tiny_http::Response::from_string(response.body.clone())
                        .with_status_code(response.status)
                        .with_header(
                            tiny_http::Header::from_bytes(
                                &b"Content-Type"[..],
                                &b"application/json"[..],
                            )
                            .unwrap(),
                        );
                    let _ = request.respond(reply);
                }
                Ok(None) => {}
                Err(_) => break,
            }
        });

        Self {
            base_url,
            stop_tx,
            requests_rx,
        }
    }

    /// The next request the server received, waiting briefly for it.
    pub fn next_request(&self) -> Option<RecordedRequest> {
        self.next_request_within(Duration::from_secs(5))
    }

    pub fn next_request_within(&self, wait: Duration) -> Option<RecordedRequest> {
        self.requests_rx.recv_timeout(wait).ok()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
    }
}
