use reqwest::Client;

use super::FetchError;

/// Anything that can return the HTML of a listing page.
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches listings from the build server over HTTP.
pub struct HttpSource {
    client: Client,
    user_agent: String,
}

impl HttpSource {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait::async_trait]
impl ListingSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let res = self
            .client
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        res.text().await.map_err(transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn source() -> HttpSource {
        HttpSource {
            client: Client::builder().no_proxy().build().unwrap(),
            user_agent: "webhost-test".to_string(),
        }
    }

    /// Answers one request with `response` and hands back the raw request.
    async fn serve_once(response: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/feature-x/", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });

        (url, handle)
    }

    #[tokio::test]
    async fn success_returns_the_body_and_sends_the_user_agent() {
        let (url, server) =
            serve_once("HTTP/1.1 200 OK\r\ncontent-length: 13\r\nconnection: close\r\n\r\n<html></html>").await;

        let body = source().fetch(&url).await.unwrap();
        let request = server.await.unwrap().to_ascii_lowercase();

        assert_eq!(body, "<html></html>");
        assert!(request.starts_with("get /feature-x/ http/1.1"));
        assert!(request.contains("user-agent: webhost-test"));
    }

    #[tokio::test]
    async fn server_error_is_a_status_failure() {
        let (url, server) = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;

        let err = source().fetch(&url).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, FetchError::Status { status: 500, url: ref at } if *at == url));
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let err = source().fetch(&url).await.unwrap_err();

        assert!(matches!(err, FetchError::Transport { url: ref at, .. } if *at == url));
    }
}
