//! 分页遍历 - 基础设施层
//!
//! ## 职责
//!
//! - `Fetcher`：发出单个请求（取消、状态码检查、可选的有限重试）
//! - `PageWalker`：沿着 `next` 关系逐页前进的只进遍历器，不可重启
//! - `decode_body`：去掉防护前缀后解析 JSON
//!
//! 分页链天然是顺序的：下一页的地址来自上一页的响应头。

use crate::config::Config;
use crate::error::{AppError, AppResult, DecodeError, TransportError};
use crate::infrastructure::link_header::parse_link_header;
use crate::infrastructure::transport::{RawResponse, Transport};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// 平台在响应体前添加的防护前缀
pub const GUARD_TOKEN: &str = "while(1);";

/// 去掉响应体开头的防护前缀，没有前缀时原样返回
pub fn strip_guard(body: &str) -> &str {
    body.trim_start().strip_prefix(GUARD_TOKEN).unwrap_or(body)
}

/// 去掉防护前缀并解析为指定类型
pub fn decode_body<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, DecodeError> {
    serde_json::from_str(strip_guard(body)).map_err(|source| DecodeError {
        url: url.to_string(),
        source,
    })
}

/// 网络错误的重试策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub backoff: Duration,
}

impl RetryPolicy {
    /// 不重试
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            max_retries: config.max_transport_retries,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }
}

/// 请求执行器
///
/// 职责：
/// - 每个请求都和取消信号竞争
/// - 非 2xx 状态码视为网络错误
/// - 只对网络错误做有限重试，解析错误从不重试
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    /// 发出请求（带重试）
    pub async fn request(&self, url: &str, cancel: &CancellationToken) -> AppResult<RawResponse> {
        let mut attempt = 0;
        loop {
            match self.request_once(url, cancel).await {
                Ok(response) => return Ok(response),
                Err(AppError::Transport(e)) if attempt < self.retry.max_retries => {
                    attempt += 1;
                    let wait = self.retry.backoff * attempt as u32;
                    warn!(
                        "请求失败 (尝试 {}/{}), {:?} 后重试: {}",
                        attempt,
                        self.retry.max_retries + 1,
                        wait,
                        e
                    );
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(AppError::Cancelled),
                        _ = sleep(wait) => {}
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn request_once(&self, url: &str, cancel: &CancellationToken) -> AppResult<RawResponse> {
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AppError::Cancelled),
            result = self.transport.get(url) => result?,
        };

        if !response.is_success() {
            return Err(TransportError::BadStatus {
                url: url.to_string(),
                status: response.status,
            }
            .into());
        }

        Ok(response)
    }

    /// 单个资源（不分页）：一次请求，去前缀，解析
    pub async fn fetch_one<T: DeserializeOwned>(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> AppResult<T> {
        let response = self.request(url, cancel).await?;
        Ok(decode_body(url, &response.body)?)
    }

    /// 从 `start_url` 开始的分页遍历器
    pub fn walk<T: DeserializeOwned>(
        &self,
        start_url: impl Into<String>,
        cancel: &CancellationToken,
    ) -> PageWalker<T> {
        PageWalker {
            fetcher: self.clone(),
            cancel: cancel.clone(),
            next_url: Some(start_url.into()),
            visited: HashSet::new(),
            pages_fetched: 0,
            _marker: PhantomData,
        }
    }
}

/// 只进、不可重启的分页遍历器
///
/// 终止条件（任一满足即停止）：
/// - 没有 `next` 关系
/// - `current` 与 `last` 相同
/// - 分页头无法解析（视为最后一页）
/// - 本页解析为空序列
/// - `next` 指向已经请求过的地址
pub struct PageWalker<T> {
    fetcher: Fetcher,
    cancel: CancellationToken,
    next_url: Option<String>,
    visited: HashSet<String>,
    pages_fetched: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> PageWalker<T> {
    /// 取下一页
    ///
    /// # 返回
    /// - `Ok(Some(items))`：新的一页
    /// - `Ok(None)`：遍历结束
    /// - `Err(_)`：请求或解析失败，遍历器随之结束
    pub async fn next_page(&mut self) -> AppResult<Option<Vec<T>>> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };
        self.visited.insert(url.clone());

        let response = self.fetcher.request(&url, &self.cancel).await?;
        let items: Vec<T> = decode_body(&url, &response.body)?;
        self.pages_fetched += 1;

        if items.is_empty() {
            debug!("第 {} 页为空，停止翻页: {}", self.pages_fetched, url);
            return Ok(None);
        }

        self.next_url = self.follow(&url, response.link.as_deref());
        Ok(Some(items))
    }

    /// 依次取完所有页并按顺序拼接
    pub async fn collect_all(mut self) -> AppResult<Vec<T>> {
        let mut all = Vec::new();
        while let Some(mut page) = self.next_page().await? {
            all.append(&mut page);
        }
        debug!("共请求 {} 页，得到 {} 条", self.pages_fetched, all.len());
        Ok(all)
    }

    /// 已经请求过的页数
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    fn follow(&self, url: &str, link: Option<&str>) -> Option<String> {
        let relations = match parse_link_header(link) {
            Ok(relations) => relations,
            Err(e) => {
                warn!("{} 的分页头无法解析，视为最后一页: {}", url, e);
                return None;
            }
        };

        if relations.is_last_page() {
            return None;
        }

        let next = relations.next()?;
        if self.visited.contains(next) {
            warn!("分页链出现重复地址，停止翻页: {}", next);
            return None;
        }

        Some(next.to_string())
    }
}
