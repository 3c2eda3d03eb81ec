//! HTTP 传输 - 基础设施层
//!
//! 持有唯一的 HTTP 客户端资源，只暴露"GET 一个地址"的能力

use crate::config::Config;
use crate::error::{AppResult, TransportError};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, LINK};
use tracing::debug;

/// 一次 GET 请求的原始结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// 分页头 `Link` 的原始值
    pub link: Option<String>,
    pub body: String,
}

impl RawResponse {
    /// 状态码 200 的响应
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            link: None,
            body: body.into(),
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 传输层接口
///
/// 职责：
/// - 发出 GET 请求并原样返回状态码、分页头和响应体
/// - 不解析响应体
/// - 不认识课程 / 作业
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError>;
}

/// 基于 reqwest 的传输实现
pub struct HttpTransport {
    client: reqwest::Client,
    access_token: Option<String>,
}

impl HttpTransport {
    /// 创建新的 HTTP 传输
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|source| TransportError::RequestFailed {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            access_token: config.access_token.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        debug!("GET {}", url);

        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|source| TransportError::RequestFailed {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .text()
            .await
            .map_err(|source| TransportError::RequestFailed {
                url: url.to_string(),
                source,
            })?;

        debug!("GET {} -> {} ({} 字节)", url, status, body.len());

        Ok(RawResponse { status, link, body })
    }
}
