//! Shared HTTP client plumbing for the upstream adapters

use std::time::Duration;

use civic_domain::core::error::{AdapterError, AdapterResult};
use civic_domain::tool::provider::ProviderError;
use reqwest::{Client, ClientBuilder, Response};

use crate::config::FileHttpConfig;

fn builder(http: &FileHttpConfig) -> ClientBuilder {
    Client::builder()
        .timeout(Duration::from_secs(http.timeout_seconds))
        .user_agent(http.user_agent.clone())
}

/// Client for public HTTPS endpoints
pub fn build_client(http: &FileHttpConfig) -> Result<Client, ProviderError> {
    builder(http)
        .build()
        .map_err(|e| ProviderError::ConfigurationError(format!("Failed to create HTTP client: {}", e)))
}

/// Client for a device on the local network that presents a self-signed
/// certificate
pub fn build_local_device_client(http: &FileHttpConfig) -> Result<Client, ProviderError> {
    builder(http)
        .danger_accept_invalid_certs(true)
        .build()
        .map_err(|e| ProviderError::ConfigurationError(format!("Failed to create HTTP client: {}", e)))
}

pub fn transport_failure(error: reqwest::Error) -> AdapterError {
    if error.is_timeout() {
        AdapterError::TransportFailure(format!("request timed out: {}", error))
    } else {
        AdapterError::TransportFailure(error.to_string())
    }
}

/// Body of a successful response; any non-2xx status is a transport failure
pub async fn success_body(response: Response) -> AdapterResult<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(AdapterError::TransportFailure(format!(
            "HTTP {} from {}",
            status,
            response.url()
        )));
    }
    response.text().await.map_err(transport_failure)
}

/// One-shot HTTP server on the loopback interface for adapter tests
#[cfg(test)]
pub(crate) mod test_server {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer exactly one request with the given response.
    ///
    /// Returns the base URL and a handle resolving to the raw request text.
    pub async fn serve_once(status: u16, content_type: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {} Canned\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{}", address), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);

            let Some(head_end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buffer[..head_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buffer.len() >= head_end + 4 + content_length {
                break;
            }
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
