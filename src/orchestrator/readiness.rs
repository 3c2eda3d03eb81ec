//! 宿主页面就绪等待
//!
//! 以固定间隔轮询，直到注入锚点存在且就绪标记出现；超过等待上限后静默放弃。
//! 就绪最多到达一次，或者永远不到达。

use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

/// 注入锚点元素 ID
pub const ANCHOR_ID: &str = "right-side";
/// 就绪标记的元素 class
pub const READY_MARKER_CLASS: &str = "events_list";

/// 宿主页面
///
/// 真实实现是浏览器文档树，这里只需要两个查询
pub trait HostPage: Send + Sync {
    /// 是否存在指定 ID 的元素
    fn has_element_id(&self, id: &str) -> bool;
    /// 指定 class 的元素数量
    fn count_class(&self, class: &str) -> usize;
}

/// 等待结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    TimedOut,
}

/// 始终就绪的宿主（没有文档树的运行环境）
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedHost;

impl HostPage for DetachedHost {
    fn has_element_id(&self, _id: &str) -> bool {
        true
    }

    fn count_class(&self, _class: &str) -> usize {
        1
    }
}

fn is_ready(host: &dyn HostPage) -> bool {
    host.has_element_id(ANCHOR_ID) && host.count_class(READY_MARKER_CLASS) > 0
}

/// 等待宿主页面就绪
///
/// # 参数
/// - `host`: 宿主页面
/// - `interval`: 轮询间隔
/// - `budget`: 等待上限
pub async fn wait_until_ready(host: &dyn HostPage, interval: Duration, budget: Duration) -> Readiness {
    let started = Instant::now();
    let mut waited = Duration::ZERO;
    let mut polls = 0usize;

    loop {
        polls += 1;
        if is_ready(host) {
            info!("✓ 宿主页面已就绪 (轮询 {} 次, 耗时 {:?})", polls, started.elapsed());
            return Readiness::Ready;
        }

        if waited >= budget {
            debug!("等待宿主页面超时 ({:?})，放弃注入", budget);
            return Readiness::TimedOut;
        }

        waited += interval;
        sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 第 `ready_after` 次查询时出现就绪标记
    struct SlowHost {
        ready_after: usize,
        queries: AtomicUsize,
        has_anchor: bool,
    }

    impl HostPage for SlowHost {
        fn has_element_id(&self, id: &str) -> bool {
            self.has_anchor && id == ANCHOR_ID
        }

        fn count_class(&self, class: &str) -> usize {
            let n = self.queries.fetch_add(1, Ordering::SeqCst) + 1;
            usize::from(class == READY_MARKER_CLASS && n >= self.ready_after)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn becomes_ready_after_a_few_polls() {
        let host = SlowHost {
            ready_after: 4,
            queries: AtomicUsize::new(0),
            has_anchor: true,
        };
        let started = Instant::now();

        let result = wait_until_ready(&host, Duration::from_millis(300), Duration::from_secs(300)).await;

        assert_eq!(result, Readiness::Ready);
        assert_eq!(host.queries.load(Ordering::SeqCst), 4);
        assert_eq!(started.elapsed(), Duration::from_millis(900));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_the_budget() {
        let host = SlowHost {
            ready_after: usize::MAX,
            queries: AtomicUsize::new(0),
            has_anchor: true,
        };
        let started = Instant::now();

        let result = wait_until_ready(&host, Duration::from_millis(300), Duration::from_millis(3000)).await;

        assert_eq!(result, Readiness::TimedOut);
        assert_eq!(host.queries.load(Ordering::SeqCst), 11);
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_anchor_never_becomes_ready() {
        let host = SlowHost {
            ready_after: 1,
            queries: AtomicUsize::new(0),
            has_anchor: false,
        };

        let result = wait_until_ready(&host, Duration::from_millis(300), Duration::from_millis(600)).await;

        assert_eq!(result, Readiness::TimedOut);
    }

    #[tokio::test]
    async fn detached_host_is_ready_immediately() {
        let result = wait_until_ready(&DetachedHost, Duration::from_millis(300), Duration::ZERO).await;
        assert_eq!(result, Readiness::Ready);
    }
}
