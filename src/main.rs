use anyhow::Result;
use canvas_unsubmitted::orchestrator::DetachedHost;
use canvas_unsubmitted::utils::logging;
use canvas_unsubmitted::{App, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config)?;

    let panels = tokio::select! {
        result = app.run(&DetachedHost) => result?,
        _ = tokio::signal::ctrl_c() => {
            app.shutdown();
            return Ok(());
        }
    };

    for panel in panels {
        print!("{}", panel.render_text());
    }

    Ok(())
}
