use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 网络请求错误（只中止所在的学生流水线或课程子流程）
    #[error("网络错误: {0}")]
    Transport(#[from] TransportError),
    /// 响应体解析错误（只中止所在的调用）
    #[error("解析错误: {0}")]
    Decode(#[from] DecodeError),
    /// 分页头解析错误（调用方通常视为"没有下一页"）
    #[error("分页头错误: {0}")]
    HeaderParse(#[from] HeaderParseError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 流水线已被取消
    #[error("流水线已取消")]
    Cancelled,
    /// 后台任务异常退出
    #[error("任务执行失败: {0}")]
    Task(String),
}

/// 网络请求错误
#[derive(Debug, Error)]
pub enum TransportError {
    /// 请求发送或读取响应体失败
    #[error("请求失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务端返回非 2xx 状态码
    #[error("请求返回状态码 {status} ({url})")]
    BadStatus { url: String, status: u16 },
    /// 其他传输层不可用的情况（连接被拒绝、测试桩等）
    #[error("传输不可用 ({url}): {reason}")]
    Unavailable { url: String, reason: String },
}

impl TransportError {
    /// 出错的请求地址
    pub fn url(&self) -> &str {
        match self {
            TransportError::RequestFailed { url, .. }
            | TransportError::BadStatus { url, .. }
            | TransportError::Unavailable { url, .. } => url,
        }
    }
}

/// 去掉防护前缀后的响应体不是合法 JSON
#[derive(Debug, Error)]
#[error("响应体解析失败 ({url}): {source}")]
pub struct DecodeError {
    pub url: String,
    #[source]
    pub source: serde_json::Error,
}

/// 分页头中存在无法识别的片段
#[derive(Debug, Error, PartialEq, Eq)]
#[error("无法解析分页头片段: {segment:?}")]
pub struct HeaderParseError {
    pub segment: String,
}

/// 配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 配置项取值非法
    #[error("配置项 {name} 取值非法: {reason}")]
    InvalidValue { name: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建传输不可用错误
    pub fn transport_unavailable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Transport(TransportError::Unavailable {
            url: url.into(),
            reason: reason.into(),
        })
    }

    /// 是否为取消导致的错误
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled)
    }
}

impl ConfigError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
