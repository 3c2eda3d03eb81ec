use crate::error::ConfigError;
use crate::services::eligibility::WindowPolicy;

/// 程序配置
///
/// 显式地传入编排器，不使用任何全局可变状态
#[derive(Clone, Debug)]
pub struct Config {
    /// REST API 基础地址（不带结尾的 `/`）
    pub base_url: String,
    /// 可选的访问令牌，在浏览器会话之外运行时使用
    pub access_token: Option<String>,
    /// 分页请求的每页条数
    pub per_page: usize,
    /// 单门课程内同时进行的提交记录请求数量（1 表示顺序请求）
    pub submission_concurrency: usize,
    /// 单个学生流水线内同时处理的课程数量
    pub max_concurrent_courses: usize,
    /// 作业开放窗口策略
    pub window_policy: WindowPolicy,
    /// 网络错误的最大重试次数（0 表示不重试）
    pub max_transport_retries: usize,
    /// 重试退避基数（毫秒），第 n 次重试等待 n 倍
    pub retry_backoff_ms: u64,
    /// 宿主页面就绪轮询间隔（毫秒）
    pub ready_poll_interval_ms: u64,
    /// 宿主页面就绪等待上限（毫秒）
    pub ready_timeout_ms: u64,
    /// 截止时间显示所用的 UTC 偏移（分钟），为空时使用本机时区
    pub display_utc_offset_minutes: Option<i32>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://hcpss.instructure.com/api/v1".to_string(),
            access_token: None,
            per_page: 10,
            submission_concurrency: 1,
            max_concurrent_courses: 4,
            window_policy: WindowPolicy::UnlockAndDue,
            max_transport_retries: 0,
            retry_backoff_ms: 500,
            ready_poll_interval_ms: 300,
            ready_timeout_ms: 5 * 60 * 1000,
            display_utc_offset_minutes: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: std::env::var("CANVAS_BASE_URL").map(|v| v.trim_end_matches('/').to_string()).unwrap_or(default.base_url),
            access_token: std::env::var("CANVAS_ACCESS_TOKEN").ok().filter(|v| !v.is_empty()).or(default.access_token),
            per_page: std::env::var("CANVAS_PER_PAGE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.per_page),
            submission_concurrency: std::env::var("SUBMISSION_CONCURRENCY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.submission_concurrency),
            max_concurrent_courses: std::env::var("MAX_CONCURRENT_COURSES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_courses),
            window_policy: std::env::var("WINDOW_POLICY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.window_policy),
            max_transport_retries: std::env::var("MAX_TRANSPORT_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_transport_retries),
            retry_backoff_ms: std::env::var("RETRY_BACKOFF_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.retry_backoff_ms),
            ready_poll_interval_ms: std::env::var("READY_POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.ready_poll_interval_ms),
            ready_timeout_ms: std::env::var("READY_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.ready_timeout_ms),
            display_utc_offset_minutes: std::env::var("DISPLAY_UTC_OFFSET_MINUTES").ok().and_then(|v| v.parse().ok()).or(default.display_utc_offset_minutes),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 检查配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::invalid("base_url", "不能为空"));
        }
        if self.per_page == 0 {
            return Err(ConfigError::invalid("per_page", "必须大于 0"));
        }
        if self.submission_concurrency == 0 {
            return Err(ConfigError::invalid("submission_concurrency", "必须大于 0"));
        }
        if self.max_concurrent_courses == 0 {
            return Err(ConfigError::invalid("max_concurrent_courses", "必须大于 0"));
        }
        if self.ready_poll_interval_ms == 0 {
            return Err(ConfigError::invalid("ready_poll_interval_ms", "必须大于 0"));
        }
        if let Some(offset) = self.display_utc_offset_minutes {
            if offset.abs() >= 24 * 60 {
                return Err(ConfigError::invalid(
                    "display_utc_offset_minutes",
                    format!("偏移 {} 分钟超出范围", offset),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.submission_concurrency, 1);
        assert_eq!(config.window_policy, WindowPolicy::UnlockAndDue);
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let config = Config {
            submission_concurrency: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref name, .. }) if name == "submission_concurrency"
        ));
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let config = Config {
            display_utc_offset_minutes: Some(24 * 60),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
