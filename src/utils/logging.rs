/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数
use crate::config::Config;
use crate::models::Student;
use crate::orchestrator::RunReport;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则详细模式为 `debug`，普通模式为 `info`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 未提交作业面板");
    info!("🌐 API 地址: {}", config.base_url);
    info!(
        "📊 课程并发: {}, 提交记录并发: {}",
        config.max_concurrent_courses, config.submission_concurrency
    );
    info!("🪟 开放窗口策略: {:?}", config.window_policy);
    if config.access_token.is_none() {
        warn!("⚠️ 未设置 CANVAS_ACCESS_TOKEN，请求可能被拒绝");
    }
    info!("{}", "=".repeat(60));
}

/// 记录本次要生成面板的学生
pub fn log_students(students: &[Student]) {
    info!("👥 共 {} 个面板", students.len());
    for (slot, student) in students.iter().enumerate() {
        info!("  [{}] {} ({})", slot, student.panel_title(), student.id);
    }
}

/// 打印最终统计信息
pub fn print_final_stats(report: &RunReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));

    for outcome in &report.outcomes {
        let label = outcome.student.panel_title();
        match &outcome.result {
            Ok(stats) => info!(
                "✅ {}: 课程 {}, 可见 {}, 作业 {}, 失败 {}",
                label, stats.courses, stats.visible_sections, stats.rows, stats.failed_courses
            ),
            Err(e) => info!("❌ {}: {}", label, e),
        }
    }

    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", report.succeeded(), report.outcomes.len());
    info!("❌ 失败: {}", report.failed());
    info!("{}", "=".repeat(60));
}
