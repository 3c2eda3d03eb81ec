//! 面板编排器 - 编排层
//!
//! ## 职责
//!
//! 本模块是流水线的扇出点：确定要为哪些学生生成面板，并为每个学生启动一条独立流水线。
//!
//! ## 核心功能
//!
//! 1. **学生发现**：查询被观察者列表；为空时回退到当前用户自身
//! 2. **流水线扇出**：每个学生一个 `tokio::spawn` 任务，互不等待
//! 3. **取消控制**：每条流水线持有根信号的子信号，可以单独取消
//! 4. **结果汇总**：等待所有流水线结束，收集宿主面板和统计
//!
//! ## 设计特点
//!
//! - **向下委托**：委托 `StudentPipeline` 处理单个学生
//! - **无共享可变状态**：流水线之间只通过各自的 `PanelWriter` 输出

use crate::clients::CanvasClient;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::Transport;
use crate::models::{PanelNode, Student};
use crate::orchestrator::host_panel::{HostPanel, PanelSink};
use crate::orchestrator::student_pipeline::{PipelineStats, StudentPipeline};
use crate::utils::logging;
use crate::workflow::{CourseFlow, StudentCtx};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// 已启动的学生流水线
pub struct PipelineHandle {
    pub slot: usize,
    pub student: Student,
    cancel: CancellationToken,
    join: JoinHandle<AppResult<PipelineStats>>,
}

impl PipelineHandle {
    /// 取消本流水线尚未完成的请求，不影响其他流水线
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 等待流水线结束
    pub async fn join(self) -> AppResult<PipelineStats> {
        match self.join.await {
            Ok(result) => result,
            Err(e) => {
                error!("[学生 #{}] 任务执行失败: {}", self.slot, e);
                Err(AppError::Task(e.to_string()))
            }
        }
    }
}

/// 单条流水线的最终结果
#[derive(Debug)]
pub struct PipelineOutcome {
    pub slot: usize,
    pub student: Student,
    pub result: AppResult<PipelineStats>,
}

/// 一次完整运行的结果
#[derive(Debug)]
pub struct RunReport {
    /// 宿主面板的最终渲染树，按槽位顺序
    pub panels: Vec<PanelNode>,
    /// 每条流水线的结果，按槽位顺序
    pub outcomes: Vec<PipelineOutcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// 面板编排器
pub struct PanelOrchestrator {
    client: CanvasClient,
    pipeline: StudentPipeline,
    root: CancellationToken,
    reference_time: Option<DateTime<Utc>>,
}

impl PanelOrchestrator {
    /// 创建编排器
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let client = CanvasClient::new(config, transport);
        let flow = CourseFlow::new(config, client.clone());
        let pipeline = StudentPipeline::new(client.clone(), flow, config.max_concurrent_courses);

        Self {
            client,
            pipeline,
            root: CancellationToken::new(),
            reference_time: None,
        }
    }

    /// 固定开放窗口的参考时刻（默认为每条流水线启动时的当前时间）
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    /// 宿主页面卸载：取消所有流水线
    pub fn shutdown(&self) {
        info!("宿主页面卸载，取消所有流水线");
        self.root.cancel();
    }

    /// 确定目标学生
    ///
    /// 有被观察者时每个被观察者一个；否则只有当前用户自身
    pub async fn discover_students(&self) -> AppResult<Vec<Student>> {
        let observees = self.client.fetch_observees(&self.root).await?;

        if observees.is_empty() {
            info!("没有被观察者，为当前用户生成面板");
            return Ok(vec![Student::myself()]);
        }

        info!("找到 {} 个被观察者", observees.len());
        Ok(observees.into_iter().map(Student::from).collect())
    }

    /// 为每个学生启动一条独立流水线
    pub fn spawn_pipelines(&self, students: Vec<Student>, sink: &PanelSink) -> Vec<PipelineHandle> {
        students
            .into_iter()
            .enumerate()
            .map(|(slot, student)| self.spawn_one(slot, student, sink))
            .collect()
    }

    fn spawn_one(&self, slot: usize, student: Student, sink: &PanelSink) -> PipelineHandle {
        let cancel = self.root.child_token();
        let now = self.reference_time.unwrap_or_else(Utc::now);
        let ctx = StudentCtx::new(student.clone(), slot, now, cancel.clone());
        let writer = sink.writer(slot);
        let pipeline = self.pipeline.clone();

        let join = tokio::spawn(async move {
            let result = pipeline.run(&ctx, &writer).await;
            if let Err(e) = &result {
                if e.is_cancelled() {
                    info!("{} 流水线已取消", ctx);
                } else {
                    error!("{} ❌ 流水线失败: {}", ctx, e);
                }
            }
            result
        });

        PipelineHandle {
            slot,
            student,
            cancel,
            join,
        }
    }

    /// 学生发现 + 扇出
    pub async fn start(&self, sink: &PanelSink) -> AppResult<Vec<PipelineHandle>> {
        let students = self.discover_students().await?;
        logging::log_students(&students);
        Ok(self.spawn_pipelines(students, sink))
    }

    /// 完整运行：启动所有流水线，等待全部结束，返回宿主面板
    pub async fn run(&self) -> AppResult<RunReport> {
        let (sink, host) = HostPanel::channel();
        let handles = self.start(&sink).await?;
        drop(sink);

        let joins = join_all(handles.into_iter().map(|handle| async move {
            let slot = handle.slot;
            let student = handle.student.clone();
            PipelineOutcome {
                slot,
                student,
                result: handle.join().await,
            }
        }));

        let (panels, outcomes) = tokio::join!(host.collect(), joins);

        Ok(RunReport { panels, outcomes })
    }
}
