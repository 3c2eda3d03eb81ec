use crate::config::Config;
use crate::infrastructure::HttpTransport;
use crate::models::DisplayNode;
use crate::orchestrator::{wait_until_ready, HostPage, PanelOrchestrator, Readiness};
use crate::utils::logging;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// 应用主结构
pub struct App {
    config: Config,
    orchestrator: PanelOrchestrator,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        logging::log_startup(&config);

        let transport = Arc::new(HttpTransport::new(&config)?);
        let orchestrator = PanelOrchestrator::new(&config, transport);

        Ok(Self {
            config,
            orchestrator,
        })
    }

    /// 运行应用主逻辑
    ///
    /// 宿主未在等待上限内就绪时静默结束
    pub async fn run(&self, host: &dyn HostPage) -> Result<Vec<DisplayNode>> {
        let readiness = wait_until_ready(
            host,
            Duration::from_millis(self.config.ready_poll_interval_ms),
            Duration::from_millis(self.config.ready_timeout_ms),
        )
        .await;

        if readiness == Readiness::TimedOut {
            warn!("⚠️ 宿主页面未就绪，程序结束");
            return Ok(Vec::new());
        }

        let report = self.orchestrator.run().await?;

        logging::print_final_stats(&report);

        Ok(report.panels.into_iter().map(DisplayNode::Panel).collect())
    }

    /// 宿主页面卸载
    pub fn shutdown(&self) {
        self.orchestrator.shutdown();
    }
}
