//! Generator reached over HTTP.
//!
//! Sends `width` and `height` as form fields in a POST to a fixed endpoint and
//! treats the plain-text body as the maze.

use maze_model::MazeRequest;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::MazeGenerator;
use crate::error::{GeneratorError, Result};

#[derive(Debug, Clone)]
pub struct HttpGenerator {
    client: Client,
    endpoint: String,
}

impl HttpGenerator {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl MazeGenerator for HttpGenerator {
    fn describe(&self) -> String {
        format!("http {}", self.endpoint)
    }

    async fn generate(&self, request: MazeRequest) -> Result<String> {
        debug!(endpoint = %self.endpoint, %request, "posting maze request");
        let response = self
            .client
            .post(&self.endpoint)
            .header(USER_AGENT, concat!("maze/", env!("CARGO_PKG_VERSION")))
            .form(&[("width", request.width), ("height", request.height)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GeneratorError::Rejected {
                detail: format!("HTTP {}: {}", status.as_u16(), body.trim()),
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one request with `status` and `body`, returning the request text.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/mazebuilder.php", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });
        (url, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);
            let text = String::from_utf8_lossy(&buffer);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buffer.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }

    #[tokio::test]
    async fn posts_dimensions_as_form_fields() {
        let (url, server) = serve_once("200 OK", "+-+-+\n| | |\n").await;
        let generator = HttpGenerator::new(url).unwrap();
        let maze = generator.generate(MazeRequest::new(25, 10)).await.unwrap();
        assert_eq!(maze, "+-+-+\n| | |\n");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /mazebuilder.php"), "{request}");
        assert!(request.ends_with("width=25&height=10"), "{request}");
    }

    #[tokio::test]
    async fn error_status_is_rejected_with_body() {
        let (url, server) = serve_once("400 Bad Request", "Width or height is missing").await;
        let generator = HttpGenerator::new(url).unwrap();
        let error = generator.generate(MazeRequest::new(5, 5)).await.unwrap_err();
        assert_eq!(
            error,
            GeneratorError::Rejected {
                detail: "HTTP 400: Width or height is missing".to_string()
            }
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);
        let generator = HttpGenerator::new(url).unwrap();
        let error = generator.generate(MazeRequest::new(5, 5)).await.unwrap_err();
        assert!(error.is_transport(), "{error:?}");
    }
}
