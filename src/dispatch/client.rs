use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use super::{ActionClient, ActionRequest, DispatchError, coerce_body};

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/proc";

/// [`ActionClient`] that POSTs JSON to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpActionClient {
    client: Client,
    endpoint: String,
}

impl HttpActionClient {
    /// Build a client for `endpoint`. `None` waits indefinitely for a response.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(endpoint, client))
    }

    /// Wrap an already configured [`Client`].
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ActionClient for HttpActionClient {
    fn send(&self, request: &ActionRequest) -> Result<String, DispatchError> {
        let body =
            serde_json::to_vec(request).map_err(|err| DispatchError::Decode(err.to_string()))?;
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|err| DispatchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Status(status.as_u16()));
        }
        let value: serde_json::Value = response
            .json()
            .map_err(|err| DispatchError::Decode(err.to_string()))?;
        coerce_body(value)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    use super::*;
    use crate::dispatch::Command;

    struct CapturedRequest {
        request_line: String,
        content_type: Option<String>,
        body: String,
    }

    /// Serve one canned response on a loopback port; returns the endpoint URL
    /// and a receiver for the request that arrived.
    fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<CapturedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut content_length = 0usize;
            let mut content_type = None;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    let value = value.trim().to_string();
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.parse().unwrap();
                    } else if name.eq_ignore_ascii_case("content-type") {
                        content_type = Some(value);
                    }
                }
            }
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();
            let _ = tx.send(CapturedRequest {
                request_line: request_line.trim_end().to_string(),
                content_type,
                body: String::from_utf8(request_body).unwrap(),
            });
            let mut stream = stream;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });
        (format!("http://{addr}/proc"), rx)
    }

    fn client_for(endpoint: &str) -> HttpActionClient {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpActionClient::with_client(endpoint, client)
    }

    #[test]
    fn test_posts_json_and_returns_string_body() {
        let (endpoint, rx) = serve_once("200 OK", "\"Hello world\"");
        let client = client_for(&endpoint);

        let result = client.send(&ActionRequest::new("hi there", Command::Paraphrase));
        assert_eq!(result, Ok("Hello world".to_string()));

        let captured = rx.recv().unwrap();
        assert_eq!(captured.request_line, "POST /proc HTTP/1.1");
        assert_eq!(captured.content_type.as_deref(), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"text": "hi there", "command": "paraphrase"})
        );
    }

    #[test]
    fn test_server_error_is_request_failed() {
        let (endpoint, _rx) = serve_once("500 Internal Server Error", "\"boom\"");
        let client = client_for(&endpoint);
        let result = client.send(&ActionRequest::new("x", Command::Expand));
        assert_eq!(result, Err(DispatchError::Status(500)));
    }

    #[test]
    fn test_malformed_json_is_request_failed() {
        let (endpoint, _rx) = serve_once("200 OK", "not json");
        let client = client_for(&endpoint);
        let result = client.send(&ActionRequest::new("x", Command::Translate));
        assert!(matches!(result, Err(DispatchError::Decode(_))));
    }

    #[test]
    fn test_object_body_is_request_failed() {
        let (endpoint, _rx) = serve_once("200 OK", "{\"text\":\"x\"}");
        let client = client_for(&endpoint);
        let result = client.send(&ActionRequest::new("x", Command::Summarize));
        assert_eq!(result, Err(DispatchError::UnexpectedBody("an object")));
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = client_for(&format!("http://127.0.0.1:{port}/proc"));
        let result = client.send(&ActionRequest::new("x", Command::Expand));
        assert!(matches!(result, Err(DispatchError::Transport(_))));
    }

    #[test]
    fn test_default_endpoint_is_local_proc() {
        let client = HttpActionClient::new(DEFAULT_ENDPOINT, None).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:8080/proc");
    }
}
