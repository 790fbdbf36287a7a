// src/source/http.rs
use crate::error::{UdfError, Result};
use crate::source::{clamp_range, ByteRangeSource};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RANGE};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Remote resource read with HTTP range requests.
///
/// # Example
///
/// ```no_run
/// use udf_rs::source::HttpSource;
/// use std::time::Duration;
///
/// let source = HttpSource::builder("https://example.com/data.udf")
///     .header("Authorization", "Bearer token")
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
    headers: HeaderMap,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::builder(url).build()
    }

    pub fn builder(url: impl Into<String>) -> HttpSourceBuilder {
        HttpSourceBuilder {
            url: url.into(),
            headers: Vec::new(),
            timeout: None,
            client: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug)]
pub struct HttpSourceBuilder {
    url: String,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    client: Option<Client>,
}

impl HttpSourceBuilder {
    /// Extra header sent with every range request; overrides `Range` if given
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Per-request timeout. Ignored when a client is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<HttpSource> {
        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| UdfError::InvalidConfig(format!("invalid header name: {}", name)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| UdfError::InvalidConfig(format!("invalid value for header {}", name)))?;
            headers.insert(header_name, header_value);
        }

        let client = match self.client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(HttpSource {
            client,
            url: self.url,
            headers,
        })
    }
}

#[async_trait]
impl ByteRangeSource for HttpSource {
    async fn read(&self, offset: u64, length: u64) -> Result<Bytes> {
        if length == 0 {
            return Ok(Bytes::new());
        }
        let last = offset
            .checked_add(length - 1)
            .ok_or(UdfError::InvalidFileOffset { offset, size: length })?;

        tracing::debug!(url = %self.url, offset, length, "range request");
        let response = self
            .client
            .get(&self.url)
            .header(RANGE, format!("bytes={}-{}", offset, last))
            .headers(self.headers.clone())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::RANGE_NOT_SATISFIABLE {
            return Ok(Bytes::new());
        }
        if !status.is_success() {
            return Err(UdfError::HttpStatus(status.as_u16()));
        }

        let mut body = response.bytes().await?;
        if status == StatusCode::PARTIAL_CONTENT {
            if body.len() as u64 > length {
                body.truncate(length as usize);
            }
        } else {
            // The server ignored the range and sent the whole resource
            let (start, end) = clamp_range(offset, length, body.len() as u64);
            body = body.slice(start as usize..end as usize);
        }

        if (body.len() as u64) < length {
            tracing::warn!(url = %self.url, offset, length, received = body.len(), "short range read");
        }
        Ok(body)
    }
}
