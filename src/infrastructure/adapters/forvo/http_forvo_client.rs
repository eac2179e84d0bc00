//! HTTP Forvo Client - 调用 Forvo 发音 API
//!
//! 实现 PronunciationProviderPort 与 AudioDownloadPort
//!
//! Forvo API:
//! GET {scheme}://apifree.forvo.com/key/{key}/format/json/action/word-pronunciations
//!     /word/{word}/language/{lang}/order/rate-desc
//! Response: {"attributes": {...}, "items": [{"pathmp3": "...", "rate": 3, ...}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{
    AudioDownloadPort, AudioFetchError, FetchError, PronunciationProviderPort,
};
use crate::domain::lookup::{LookupKey, LookupResult, PronunciationItem};

/// 单条发音记录（只取需要的字段）
#[derive(Debug, Deserialize)]
struct ForvoItem {
    #[serde(default)]
    pathmp3: String,
    #[serde(default)]
    rate: i32,
    #[serde(default)]
    num_votes: i32,
    #[serde(default)]
    num_positive_votes: i32,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    sex: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForvoResponse {
    #[serde(default)]
    items: Vec<ForvoItem>,
}

impl ForvoResponse {
    /// 按响应顺序编号
    fn into_lookup_result(self) -> LookupResult {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| PronunciationItem {
                index: index as u32,
                remote_audio_ref: item.pathmp3,
                rating: item.rate,
                votes: item.num_votes,
                positive_votes: item.num_positive_votes,
                username: item.username,
                country: item.country,
                sex: item.sex,
            })
            .collect();
        LookupResult::new(items)
    }
}

/// HTTP Forvo 客户端配置
#[derive(Debug, Clone)]
pub struct HttpForvoClientConfig {
    /// API 主机名
    pub host: String,
    /// API key
    pub api_key: String,
    /// 使用明文 HTTP（更快，但 API key 会以明文暴露在网络上）
    pub insecure: bool,
    /// 请求超时时间（秒），None 表示使用传输层默认值
    pub timeout_secs: Option<u64>,
}

impl Default for HttpForvoClientConfig {
    fn default() -> Self {
        Self {
            host: "apifree.forvo.com".to_string(),
            api_key: String::new(),
            insecure: false,
            timeout_secs: None,
        }
    }
}

impl HttpForvoClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// HTTP Forvo 客户端
pub struct HttpForvoClient {
    client: Client,
    config: HttpForvoClientConfig,
}

impl HttpForvoClient {
    pub fn new(config: HttpForvoClientConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        if config.insecure {
            tracing::warn!("Using plain HTTP for the provider API, the API key is sent unencrypted");
        }

        Ok(Self { client, config })
    }

    fn scheme(&self) -> &'static str {
        if self.config.insecure {
            "http"
        } else {
            "https"
        }
    }

    /// 获取查询 URL
    fn pronunciations_url(&self, key: &LookupKey) -> String {
        // Forvo 对单独的 "0" 返回错误，加前导空格可绕过
        let word = if key.word() == "0" { " 0" } else { key.word() };
        format!(
            "{}://{}/key/{}/format/json/action/word-pronunciations/word/{}/language/{}/order/rate-desc",
            self.scheme(),
            self.config.host,
            self.config.api_key,
            urlencoding::encode(word),
            urlencoding::encode(key.lang()),
        )
    }
}

fn map_send_error(e: reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Request timeout: {}", e)
    } else if e.is_connect() {
        format!("Cannot connect: {}", e)
    } else {
        e.to_string()
    }
}

#[async_trait]
impl PronunciationProviderPort for HttpForvoClient {
    async fn fetch(&self, key: &LookupKey) -> Result<LookupResult, FetchError> {
        if self.config.api_key.is_empty() {
            return Err(FetchError::NotConfigured("API key is not set".to_string()));
        }

        tracing::info!(word = %key.word(), lang = %key.lang(), "Downloading pronunciation list");

        let response = self
            .client
            .get(self.pronunciations_url(key))
            .send()
            .await
            .map_err(|e| FetchError::NetworkError(map_send_error(e)))?;

        let status = response.status();
        let body = response.bytes().await;

        if !status.is_success() {
            let body = body
                .map(|b| String::from_utf8_lossy(&b).into_owned())
                .unwrap_or_default();
            return Err(FetchError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let body = body.map_err(|e| FetchError::ReadError(e.to_string()))?;
        let parsed: ForvoResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::DecodeError {
                reason: e.to_string(),
                body: String::from_utf8_lossy(&body).into_owned(),
            })?;

        let result = parsed.into_lookup_result();
        tracing::debug!(word = %key.word(), items = result.len(), "Pronunciation list received");
        Ok(result)
    }
}

#[async_trait]
impl AudioDownloadPort for HttpForvoClient {
    async fn download(&self, remote_ref: &str) -> Result<Vec<u8>, AudioFetchError> {
        let response = self
            .client
            .get(remote_ref)
            .send()
            .await
            .map_err(|e| AudioFetchError::NetworkError(map_send_error(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AudioFetchError::BadStatus(status.as_u16()));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| AudioFetchError::ReadError(e.to_string()))?
            .to_vec();

        tracing::debug!(url = %remote_ref, size_bytes = data.len(), "Audio downloaded");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client(insecure: bool) -> HttpForvoClient {
        HttpForvoClient::new(HttpForvoClientConfig::new("secret").with_insecure(insecure)).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = HttpForvoClientConfig::default();
        assert_eq!(config.host, "apifree.forvo.com");
        assert!(!config.insecure);
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpForvoClientConfig::new("k").with_insecure(true).with_timeout(10);
        assert_eq!(config.api_key, "k");
        assert!(config.insecure);
        assert_eq!(config.timeout_secs, Some(10));
    }

    #[test]
    fn test_url_is_https_by_default() {
        let key = LookupKey::new("Ich", "de").unwrap();
        assert_eq!(
            client(false).pronunciations_url(&key),
            "https://apifree.forvo.com/key/secret/format/json/action/word-pronunciations/word/ich/language/de/order/rate-desc"
        );
    }

    #[test]
    fn test_url_insecure_and_escaped() {
        let key = LookupKey::new("guten Tag", "de").unwrap();
        let url = client(true).pronunciations_url(&key);
        assert!(url.starts_with("http://apifree.forvo.com/"));
        assert!(url.contains("/word/guten%20tag/"));
    }

    #[test]
    fn test_url_zero_workaround() {
        let key = LookupKey::new("0", "en").unwrap();
        assert!(client(false).pronunciations_url(&key).contains("/word/%200/"));
    }

    #[test]
    fn test_response_decoding_assigns_indices() {
        let json = r#"{
            "attributes": {"total": 2},
            "items": [
                {"id": 1, "word": "ich", "pathmp3": "https://a/1.mp3", "rate": 5,
                 "num_votes": 7, "num_positive_votes": 6, "username": "anna", "country": "Germany", "sex": "f"},
                {"id": 2, "word": "ich", "pathmp3": "https://a/2.mp3", "rate": 1}
            ]
        }"#;
        let parsed: ForvoResponse = serde_json::from_str(json).unwrap();
        let result = parsed.into_lookup_result();

        assert_eq!(result.len(), 2);
        assert_eq!(result.items[0].index, 0);
        assert_eq!(result.items[0].remote_audio_ref, "https://a/1.mp3");
        assert_eq!(result.items[0].votes, 7);
        assert_eq!(result.items[1].index, 1);
        assert_eq!(result.items[1].username, None);
    }

    #[test]
    fn test_empty_response_is_valid() {
        let parsed: ForvoResponse = serde_json::from_str(r#"{"attributes":{"total":0},"items":[]}"#).unwrap();
        assert!(parsed.into_lookup_result().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_without_api_key_fails_fast() {
        let client = HttpForvoClient::new(HttpForvoClientConfig::default()).unwrap();
        let key = LookupKey::new("ich", "de").unwrap();
        assert!(matches!(
            client.fetch(&key).await,
            Err(FetchError::NotConfigured(_))
        ));
    }

    /// 在本地端口上对一次请求返回固定响应
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        addr.to_string()
    }

    /// 指向本地服务的客户端（不走系统代理）
    fn local_client(host: String) -> HttpForvoClient {
        HttpForvoClient {
            client: Client::builder().no_proxy().build().unwrap(),
            config: HttpForvoClientConfig {
                host,
                api_key: "secret".to_string(),
                insecure: true,
                timeout_secs: None,
            },
        }
    }

    #[tokio::test]
    async fn test_fetch_non_2xx_carries_status_and_body() {
        let host = serve_once("400 Bad Request", r#"["Limit/day reached."]"#).await;
        let key = LookupKey::new("ich", "de").unwrap();

        match local_client(host).fetch(&key).await {
            Err(FetchError::Provider { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, r#"["Limit/day reached."]"#);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_undecodable_body_is_kept() {
        let host = serve_once("200 OK", r#"["Limit/day reached."]"#).await;
        let key = LookupKey::new("ich", "de").unwrap();

        match local_client(host).fetch(&key).await {
            Err(FetchError::DecodeError { body, .. }) => {
                assert_eq!(body, r#"["Limit/day reached."]"#);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let host = serve_once(
            "200 OK",
            r#"{"attributes":{"total":1},"items":[{"pathmp3":"http://x/1.mp3","rate":2,"num_votes":3}]}"#,
        )
        .await;
        let key = LookupKey::new("ich", "de").unwrap();

        let result = local_client(host).fetch(&key).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].index, 0);
        assert_eq!(result.items[0].remote_audio_ref, "http://x/1.mp3");
        assert_eq!(result.items[0].rating, 2);
        assert_eq!(result.items[0].votes, 3);
    }

    #[tokio::test]
    async fn test_download_non_2xx_is_bad_status() {
        let host = serve_once("404 Not Found", "missing").await;
        let url = format!("http://{}/audio/1.mp3", host);

        assert!(matches!(
            local_client(host).download(&url).await,
            Err(AudioFetchError::BadStatus(404))
        ));
    }

    #[tokio::test]
    async fn test_download_returns_full_body() {
        let host = serve_once("200 OK", "mp3 bytes").await;
        let url = format!("http://{}/audio/1.mp3", host);

        let data = local_client(host).download(&url).await.unwrap();
        assert_eq!(data, b"mp3 bytes".to_vec());
    }
}
