//! HTTP client for the survey API
//!
//! Posts the answers as a flat JSON object to `<base-url>/submit-symptom/` and
//! expects a JSON object with a `message` field back.

use super::traits::{SubmissionOutcome, SubmitClientTrait, SubmitResponse};
use crate::error::TransportError;
use crate::state::FormState;
use async_trait::async_trait;
use reqwest::Client;

/// Path appended to the configured base URL
const SUBMIT_PATH: &str = "submit-symptom/";

/// Build the submission endpoint from a base URL, with or without a
/// trailing slash
pub fn endpoint_url(base_url: &str) -> String {
    format!("{}/{SUBMIT_PATH}", base_url.trim_end_matches('/'))
}

/// Client for submitting survey answers
pub struct HttpSubmitClient {
    client: Client,
    endpoint: String,
}

impl HttpSubmitClient {
    /// Create a client targeting `base_url`
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client around a preconfigured `reqwest::Client`
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            endpoint: endpoint_url(base_url),
        }
    }
}

#[async_trait]
impl SubmitClientTrait for HttpSubmitClient {
    async fn submit(&self, answers: &FormState) -> SubmissionOutcome {
        tracing::info!(
            "Submitting {} answer(s) to {}",
            answers.len(),
            self.endpoint
        );
        tracing::debug!(
            "Answered fields: {:?}",
            answers.iter().map(|(name, _)| name).collect::<Vec<_>>()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(answers)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!("Submission rejected with {status}: {body}");
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let parsed: SubmitResponse =
            serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))?;
        tracing::info!("Submission accepted");
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Accept one connection, reply with `status_line` and `body`, and hand
    /// back the raw request text.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (format!("http://{addr}"), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        line.to_ascii_lowercase()
                            .strip_prefix("content-length:")
                            .and_then(|v| v.trim().parse::<usize>().ok())
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    fn client(base_url: &str) -> HttpSubmitClient {
        let inner = Client::builder().no_proxy().build().unwrap();
        HttpSubmitClient::with_client(base_url, inner)
    }

    fn request_body(request: &str) -> serde_json::Value {
        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_endpoint_url_joins_path() {
        assert_eq!(
            endpoint_url("http://localhost:8000"),
            "http://localhost:8000/submit-symptom/"
        );
        assert_eq!(
            endpoint_url("http://localhost:8000/"),
            "http://localhost:8000/submit-symptom/"
        );
        assert_eq!(
            endpoint_url("https://api.example.org/v1"),
            "https://api.example.org/v1/submit-symptom/"
        );
    }

    #[tokio::test]
    async fn test_submit_posts_answers_as_json() {
        let (base, server) = serve_once("200 OK", r#"{"message": "Thanks for sharing!"}"#).await;
        let answers = FormState::from_pairs([("age", "30"), ("country", "US")]);

        let response = client(&base).submit(&answers).await.unwrap();
        assert_eq!(response.message, "Thanks for sharing!");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /submit-symptom/ HTTP/1.1"));
        assert!(request
            .to_ascii_lowercase()
            .contains("content-type: application/json"));
        assert_eq!(
            request_body(&request),
            serde_json::json!({"age": "30", "country": "US"})
        );
    }

    #[tokio::test]
    async fn test_message_is_returned_verbatim() {
        let (base, server) =
            serve_once("201 Created", r#"{"message": "  ¡Gracias!  ", "id": 12}"#).await;
        let response = client(&base)
            .submit(&FormState::from_pairs([("age", "30")]))
            .await
            .unwrap();
        assert_eq!(response.message, "  ¡Gracias!  ");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let (base, server) = serve_once("200 OK", "<html>oops</html>").await;
        let err = client(&base)
            .submit(&FormState::from_pairs([("age", "30")]))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_message_field_is_decode_error() {
        let (base, server) = serve_once("200 OK", r#"{"status": "ok"}"#).await;
        let err = client(&base)
            .submit(&FormState::from_pairs([("age", "30")]))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let (base, server) =
            serve_once("500 Internal Server Error", r#"{"message": "boom"}"#).await;
        let err = client(&base)
            .submit(&FormState::from_pairs([("age", "30")]))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 500 }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"))
            .submit(&FormState::from_pairs([("age", "30")]))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
